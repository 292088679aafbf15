//! Checkout Confirmation
//!
//! The confirmation dialog is a two-state machine: it opens on request and closes
//! on either confirmation or cancellation.

use jiff::Timestamp;

use crate::{cart::Cart, history::PurchaseHistoryEntry};

/// Whether an overlay (dialog or side panel) is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    /// Showing
    Open,

    /// Hidden
    #[default]
    Closed,
}

impl Visibility {
    /// Check if the overlay is showing.
    pub fn is_open(self) -> bool {
        self == Visibility::Open
    }
}

/// Result of confirming the checkout dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// The dialog was not open, nothing happened.
    NotOpen,

    /// The cart was empty; the dialog closed without recording a purchase.
    EmptyCart,

    /// A purchase should be recorded and the cart cleared.
    Completed(PurchaseHistoryEntry),
}

/// Checkout confirmation dialog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckoutDialog {
    state: Visibility,
}

impl CheckoutDialog {
    /// Create a closed dialog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(self) -> Visibility {
        self.state
    }

    /// Show the dialog.
    pub fn open(&mut self) {
        self.state = Visibility::Open;
    }

    /// Close the dialog without confirming. Returns whether it was open.
    pub fn cancel(&mut self) -> bool {
        let was_open = self.state.is_open();
        self.state = Visibility::Closed;

        was_open
    }

    /// Confirm the dialog against the current cart, closing it.
    ///
    /// The cart itself is not touched; on [`CheckoutOutcome::Completed`] the caller
    /// records the entry and clears the cart.
    pub fn confirm(&mut self, cart: &Cart, now: Timestamp) -> CheckoutOutcome {
        if !self.state.is_open() {
            return CheckoutOutcome::NotOpen;
        }

        self.state = Visibility::Closed;

        if cart.is_empty() {
            return CheckoutOutcome::EmptyCart;
        }

        CheckoutOutcome::Completed(PurchaseHistoryEntry::new(now, cart.lines()))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::products::Product;

    use super::*;

    #[test]
    fn starts_closed() {
        assert_eq!(CheckoutDialog::new().state(), Visibility::Closed);
    }

    #[test]
    fn cancel_closes_open_dialog() {
        let mut dialog = CheckoutDialog::new();
        dialog.open();

        assert!(dialog.cancel());
        assert_eq!(dialog.state(), Visibility::Closed);
        assert!(!dialog.cancel());
    }

    #[test]
    fn confirm_on_empty_cart_closes_without_entry() {
        let mut dialog = CheckoutDialog::new();
        dialog.open();

        let outcome = dialog.confirm(&Cart::new(), Timestamp::UNIX_EPOCH);

        assert_eq!(outcome, CheckoutOutcome::EmptyCart);
        assert_eq!(dialog.state(), Visibility::Closed);
    }

    #[test]
    fn confirm_snapshots_cart_lines() {
        let mut cart = Cart::new();
        cart.add(&Product::new(1, "A", Decimal::from(100)));
        cart.add(&Product::new(2, "B", Decimal::from(200)).with_offer(true));

        let mut dialog = CheckoutDialog::new();
        dialog.open();

        let outcome = dialog.confirm(&cart, Timestamp::UNIX_EPOCH);

        match outcome {
            CheckoutOutcome::Completed(entry) => {
                assert_eq!(entry.date, Timestamp::UNIX_EPOCH);
                assert_eq!(entry.items, cart.lines());
            }
            other => panic!("expected Completed, got {other:?}"),
        }

        assert_eq!(dialog.state(), Visibility::Closed);
    }

    #[test]
    fn confirm_while_closed_does_nothing() {
        let mut cart = Cart::new();
        cart.add(&Product::new(1, "A", Decimal::from(100)));

        let mut dialog = CheckoutDialog::new();

        assert_eq!(
            dialog.confirm(&cart, Timestamp::UNIX_EPOCH),
            CheckoutOutcome::NotOpen
        );
    }
}
