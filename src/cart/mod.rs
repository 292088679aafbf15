//! Cart
//!
//! An ordered list of [`CartLine`]s, one per product id. Positions are the
//! display order and shift when lines are removed, so callers must re-read
//! positions after every change.

use serde::{Deserialize, Serialize};

use crate::{
    pricing::{PricingError, Totals, compute_totals},
    products::{Product, ProductId},
};

pub mod line;
pub mod persist;

pub use line::CartLine;

/// A change applied to the cart by one of its operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended at the given position.
    Added {
        /// Position of the new line
        index: usize,
    },

    /// The quantity of an existing line changed.
    QuantityChanged {
        /// Position of the line
        index: usize,

        /// New quantity
        quantity: u32,
    },

    /// The line at the given position was removed.
    Removed {
        /// Former position of the line
        index: usize,

        /// Product id of the removed line
        id: ProductId,
    },

    /// All lines were removed.
    Cleared,
}

/// Cart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product, appending a new line the first time the product is seen.
    pub fn add(&mut self, product: &Product) -> CartChange {
        if let Some(change) = self
            .position_of(product.id)
            .and_then(|index| self.bump(index))
        {
            return change;
        }

        self.lines.push(CartLine::from(product));

        CartChange::Added {
            index: self.lines.len() - 1,
        }
    }

    /// Add one unit to the line at `index`.
    ///
    /// Returns `None` without changing anything if there is no line at `index`.
    pub fn increment(&mut self, index: usize) -> Option<CartChange> {
        self.bump(index)
    }

    /// Remove one unit from the line at `index`, dropping the line when its last unit goes.
    ///
    /// Returns `None` without changing anything if there is no line at `index`.
    pub fn decrement(&mut self, index: usize) -> Option<CartChange> {
        let line = self.lines.get_mut(index)?;

        if line.quantity > 1 {
            line.quantity -= 1;

            return Some(CartChange::QuantityChanged {
                index,
                quantity: line.quantity,
            });
        }

        self.remove(index)
    }

    /// Remove the line at `index`.
    ///
    /// Returns `None` without changing anything if there is no line at `index`.
    pub fn remove(&mut self, index: usize) -> Option<CartChange> {
        if index >= self.lines.len() {
            return None;
        }

        let line = self.lines.remove(index);

        Some(CartChange::Removed { index, id: line.id })
    }

    /// Remove every line.
    pub fn clear(&mut self) -> CartChange {
        self.lines.clear();

        CartChange::Cleared
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line at the given position.
    pub fn get(&self, index: usize) -> Option<&CartLine> {
        self.lines.get(index)
    }

    /// Position of the line holding the given product.
    pub fn position_of(&self, id: ProductId) -> Option<usize> {
        self.lines.iter().position(|line| line.id == id)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Calculate subtotal, tax and total.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the calculation overflows.
    pub fn totals(&self) -> Result<Totals, PricingError> {
        compute_totals(&self.lines)
    }

    fn bump(&mut self, index: usize) -> Option<CartChange> {
        let line = self.lines.get_mut(index)?;

        line.quantity = line.quantity.saturating_add(1);

        Some(CartChange::QuantityChanged {
            index,
            quantity: line.quantity,
        })
    }
}

impl From<Vec<CartLine>> for Cart {
    /// Build a cart from stored lines, dropping zero quantities and merging repeated ids
    /// into the first line for that id.
    fn from(stored: Vec<CartLine>) -> Self {
        let mut lines: Vec<CartLine> = Vec::with_capacity(stored.len());

        for line in stored.into_iter().filter(|line| line.quantity > 0) {
            match lines.iter_mut().find(|existing| existing.id == line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => lines.push(line),
            }
        }

        Self { lines }
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
