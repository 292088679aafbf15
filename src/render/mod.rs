//! Rendering
//!
//! Renderers receive plain view models built from the current state and redraw
//! from scratch on every call. Nothing here mutates storefront state.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Formatter, LocalFormat, Money, Params, Position,
    iso::{ARS, Currency, EUR, GBP, USD},
};
use thiserror::Error;

use crate::{
    cart::Cart,
    checkout::Visibility,
    pricing::{PricingError, effective_unit_price, round_to_unit},
    products::{Product, ProductId},
};

pub mod table;

pub use table::TableRenderer;

/// Unknown currency code
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown currency code: {0}")]
pub struct UnknownCurrency(pub String);

/// Formats whole-unit amounts as money in a fixed currency.
#[derive(Debug, Clone, Copy)]
pub struct AmountFormatter {
    currency: &'static Currency,
}

impl AmountFormatter {
    /// Create a formatter for the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Self { currency }
    }

    /// Create a formatter from an ISO currency code (ARS, USD, EUR or GBP).
    ///
    /// # Errors
    ///
    /// Returns [`UnknownCurrency`] for any other code.
    pub fn for_code(code: &str) -> Result<Self, UnknownCurrency> {
        let currency = match code.trim().to_ascii_uppercase().as_str() {
            "ARS" => ARS,
            "USD" => USD,
            "EUR" => EUR,
            "GBP" => GBP,
            _ => return Err(UnknownCurrency(code.to_string())),
        };

        Ok(Self::new(currency))
    }

    /// Currency used for formatting.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Format an amount given in whole currency units.
    ///
    /// Whole amounts are shown without minor digits (`$460`); anything else keeps the
    /// currency's usual number of decimals.
    pub fn format(&self, amount: Decimal) -> String {
        let Some(minor) = to_minor_units(amount) else {
            return amount.to_string();
        };

        let format = LocalFormat::from_locale(self.currency.locale);
        let positions: &[Position] = if self.currency.symbol_first {
            &[Position::Sign, Position::Symbol, Position::Amount]
        } else {
            &[Position::Sign, Position::Amount, Position::Symbol]
        };

        let rounding = if amount.fract().is_zero() {
            0
        } else {
            self.currency.exponent
        };

        Formatter::money(
            &Money::from_minor(minor, self.currency),
            Params {
                digit_separator: format.digit_separator,
                exponent_separator: format.exponent_separator,
                separator_pattern: format.digit_separator_pattern,
                positions,
                rounding: Some(rounding),
                symbol: Some(self.currency.symbol),
                code: Some(self.currency.iso_alpha_code),
            },
        )
    }
}

impl Default for AmountFormatter {
    fn default() -> Self {
        Self::new(ARS)
    }
}

/// Convert whole currency units to minor units (hundredths), if representable.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(round_to_unit)
        .and_then(|minor| minor.to_i64())
}

/// A product in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    /// Product id, the key of the card's "add" action
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Image URL
    pub image: String,

    /// Shelf price (crossed out when the product is on offer)
    pub price: String,

    /// Discounted price, for products on offer
    pub offer_price: Option<String>,
}

/// A line in the cart panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    /// Position in the cart, the key of the row's actions
    pub index: usize,

    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Image URL
    pub image: String,

    /// Effective unit price
    pub unit_price: String,

    /// Quantity
    pub quantity: u32,

    /// Unit price times quantity
    pub line_total: String,
}

/// The cart panel, its totals and the count badge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartView {
    /// Rows in display order
    pub rows: Vec<CartRow>,

    /// Subtotal
    pub subtotal: String,

    /// Tax
    pub tax: String,

    /// Total
    pub total: String,

    /// Total shown in the checkout confirmation dialog
    pub dialog_total: String,

    /// Sum of quantities, for the cart badge
    pub item_count: u64,
}

/// Visibility of the cart side panel and the checkout dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlays {
    /// Cart side panel
    pub cart_panel: Visibility,

    /// Checkout confirmation dialog
    pub checkout_dialog: Visibility,
}

/// Build grid cards for a list of products.
///
/// # Errors
///
/// Returns a [`PricingError`] if an offer price cannot be calculated.
pub fn product_cards<'a>(
    products: impl IntoIterator<Item = &'a Product>,
    formatter: &AmountFormatter,
) -> Result<Vec<ProductCard>, PricingError> {
    products
        .into_iter()
        .map(|product| -> Result<ProductCard, PricingError> {
            let offer_price = if product.on_offer {
                Some(formatter.format(effective_unit_price(product.price, true)?))
            } else {
                None
            };

            Ok(ProductCard {
                id: product.id,
                name: product.name.clone(),
                image: product.image.clone(),
                price: formatter.format(product.price),
                offer_price,
            })
        })
        .collect()
}

/// Build the cart panel view.
///
/// # Errors
///
/// Returns a [`PricingError`] if any price or total cannot be calculated.
pub fn cart_view(cart: &Cart, formatter: &AmountFormatter) -> Result<CartView, PricingError> {
    let rows = cart
        .lines()
        .iter()
        .enumerate()
        .map(|(index, line)| -> Result<CartRow, PricingError> {
            Ok(CartRow {
                index,
                id: line.id,
                name: line.name.clone(),
                image: line.image.clone(),
                unit_price: formatter.format(line.unit_price()?),
                quantity: line.quantity,
                line_total: formatter.format(line.total()?),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let totals = cart.totals()?;
    let total = formatter.format(totals.total);

    Ok(CartView {
        rows,
        subtotal: formatter.format(totals.subtotal),
        tax: formatter.format(totals.tax),
        dialog_total: total.clone(),
        total,
        item_count: cart.item_count(),
    })
}

/// Presentation layer
pub trait Renderer {
    /// Redraw the product grid.
    fn render_products(&mut self, cards: &[ProductCard]);

    /// Show the offer badge, or hide it when `None`.
    fn render_offer_badge(&mut self, badge: Option<&str>);

    /// Redraw the cart panel, totals and count badge.
    fn render_cart(&mut self, view: &CartView);

    /// Show or hide the cart panel and checkout dialog.
    fn render_overlays(&mut self, overlays: Overlays);
}

/// Renderer that keeps the latest view models instead of drawing them.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRenderer {
    /// Cards from the last grid render
    pub products: Vec<ProductCard>,

    /// Last offer badge
    pub offer_badge: Option<String>,

    /// Last cart view
    pub cart: CartView,

    /// Last overlay state
    pub overlays: Overlays,

    /// Number of grid renders
    pub product_renders: usize,

    /// Number of cart renders
    pub cart_renders: usize,
}

impl HeadlessRenderer {
    /// Create a renderer that has not rendered anything yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for HeadlessRenderer {
    fn render_products(&mut self, cards: &[ProductCard]) {
        self.products = cards.to_vec();
        self.product_renders += 1;
    }

    fn render_offer_badge(&mut self, badge: Option<&str>) {
        self.offer_badge = badge.map(str::to_string);
    }

    fn render_cart(&mut self, view: &CartView) {
        self.cart = view.clone();
        self.cart_renders += 1;
    }

    fn render_overlays(&mut self, overlays: Overlays) {
        self.overlays = overlays;
    }
}
