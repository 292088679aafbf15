//! Catalog
//!
//! The product list is fetched once at startup. Any failure to fetch or parse it
//! degrades to an empty catalog instead of an error.

use thiserror::Error;
use tracing::{info, warn};

use crate::products::{Product, ProductId};

pub mod source;

pub use source::{CatalogSource, FileCatalogSource, HttpCatalogSource, StaticCatalogSource};

/// Errors raised while fetching a catalog. [`load`] turns all of them into an empty catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport or body decoding error
    #[error("Failed to fetch catalog: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog resource answered with a non-success status
    #[error("Catalog request returned status {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing error
    #[error("Failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("Failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from products, in display order.
    pub fn new(products: impl Into<Vec<Product>>) -> Self {
        Self {
            products: products.into(),
        }
    }

    /// All products, in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by id.
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl From<Vec<Product>> for Catalog {
    fn from(products: Vec<Product>) -> Self {
        Self::new(products)
    }
}

/// Fetch the catalog from `source`, substituting an empty catalog on any failure.
pub async fn load<C>(source: &C) -> Catalog
where
    C: CatalogSource + ?Sized,
{
    match source.fetch().await {
        Ok(products) => {
            info!(products = products.len(), source = %source.describe(), "loaded catalog");

            Catalog::from(products)
        }
        Err(error) => {
            warn!(%error, source = %source.describe(), "catalog unavailable, using an empty catalog");

            Catalog::default()
        }
    }
}
