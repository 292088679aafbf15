//! Carrito prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartChange, CartLine},
    catalog::{
        Catalog, CatalogError, CatalogSource, FileCatalogSource, HttpCatalogSource,
        StaticCatalogSource, source::from_location,
    },
    checkout::{CheckoutDialog, CheckoutOutcome, Visibility},
    config::{LogFormat, LoggingConfig, ShopConfig},
    history::PurchaseHistoryEntry,
    notifications::{Notification, Notifier, RecordingNotifier, TracingNotifier},
    offers::{ProductFilter, offer_badge},
    pricing::{PricingError, Totals, compute_totals},
    products::{Product, ProductId},
    render::{AmountFormatter, HeadlessRenderer, Renderer, TableRenderer, UnknownCurrency},
    storage::{FileStore, KeyValueStore, MemoryStore, StorageError},
    storefront::{Command, CommandParseError, Storefront},
};
