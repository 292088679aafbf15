//! Offers
//!
//! Product grid filters. Filters always start from the full catalog, they are
//! not composed with the previous selection.

use rust_decimal::Decimal;

use crate::{catalog::Catalog, pricing::offer_discount, products::Product};

/// Which products the grid shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductFilter {
    /// Every product
    #[default]
    All,

    /// Only products on offer
    Offers,
}

impl ProductFilter {
    /// Apply the filter to the full catalog.
    pub fn apply(self, catalog: &Catalog) -> Vec<&Product> {
        match self {
            ProductFilter::All => all_products(catalog),
            ProductFilter::Offers => filter_offers(catalog),
        }
    }
}

/// All products, in catalog order.
pub fn all_products(catalog: &Catalog) -> Vec<&Product> {
    catalog.products().iter().collect()
}

/// Products on offer, in catalog order.
pub fn filter_offers(catalog: &Catalog) -> Vec<&Product> {
    catalog
        .products()
        .iter()
        .filter(|product| product.on_offer)
        .collect()
}

/// Badge text advertising the offer discount, or `None` when nothing is on offer.
pub fn offer_badge(catalog: &Catalog) -> Option<String> {
    if !catalog.products().iter().any(|product| product.on_offer) {
        return None;
    }

    let points = ((offer_discount() * Decimal::ONE) * Decimal::ONE_HUNDRED).normalize();

    Some(format!("-{points}%"))
}
