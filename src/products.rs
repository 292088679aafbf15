//! Products

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product identifier, as supplied by the catalog resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Product
///
/// Serialized with the storefront's field names (`nombre`, `precio`, `imagen`, `oferta`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product id, unique within a catalog
    pub id: ProductId,

    /// Product name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Shelf price in whole currency units
    #[serde(rename = "precio", with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Image URL
    #[serde(rename = "imagen", default)]
    pub image: String,

    /// Whether the product carries the flat offer discount
    #[serde(rename = "oferta", default)]
    pub on_offer: bool,
}

impl Product {
    /// Create a new product.
    pub fn new(id: u64, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
            price,
            image: String::new(),
            on_offer: false,
        }
    }

    /// Mark the product as being on offer.
    #[must_use]
    pub fn with_offer(mut self, on_offer: bool) -> Self {
        self.on_offer = on_offer;
        self
    }

    /// Set the product's image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}
