//! Carrito
//!
//! Carrito is the core of a single-page storefront: it loads a product catalog, keeps a
//! persistent shopping cart with offer pricing and tax, filters the grid by offers and
//! records confirmed purchases.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod history;
pub mod logging;
pub mod notifications;
pub mod offers;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod render;
pub mod storage;
pub mod storefront;
