//! Cart Lines

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    pricing::{PricingError, effective_unit_price, line_total},
    products::{Product, ProductId},
};

/// A product held in the cart, with the product fields copied at add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Id of the product this line was created from
    pub id: ProductId,

    /// Product name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Shelf price at add time
    #[serde(rename = "precio", with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Offer flag at add time
    #[serde(rename = "oferta", default)]
    pub on_offer: bool,

    /// Image URL
    #[serde(rename = "imagen", default)]
    pub image: String,

    /// Quantity, always at least one while the line is in a cart
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

impl CartLine {
    /// Unit price after the offer discount.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the discount calculation overflows.
    pub fn unit_price(&self) -> Result<Decimal, PricingError> {
        effective_unit_price(self.price, self.on_offer)
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the calculation overflows.
    pub fn total(&self) -> Result<Decimal, PricingError> {
        line_total(self)
    }
}

impl From<&Product> for CartLine {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            on_offer: product.on_offer,
            image: product.image.clone(),
            quantity: 1,
        }
    }
}
