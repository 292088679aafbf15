//! Notifications
//!
//! Short-lived messages shown to the shopper after an action.

use std::time::Duration;

use mockall::automock;
use tracing::info;

/// How long a notification stays on screen.
pub const DISPLAY_DURATION: Duration = Duration::from_millis(1_800);

/// Shown after a product is added to the cart.
pub const PRODUCT_ADDED: &str = "Producto agregado al carrito";

/// Shown when checkout is confirmed with nothing in the cart.
pub const CART_EMPTY: &str = "El carrito está vacío";

/// Shown after a purchase is recorded.
pub const PURCHASE_COMPLETED: &str = "✅ Compra realizada con éxito";

/// A transient message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Text to display
    pub message: String,

    /// How long to display it for
    pub duration: Duration,
}

impl Notification {
    /// Create a notification with the default display duration.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: DISPLAY_DURATION,
        }
    }
}

/// Receiver of notifications.
#[automock]
pub trait Notifier {
    /// Display a notification.
    fn notify(&mut self, notification: Notification);
}

/// Notifier that emits each notification as a log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, notification: Notification) {
        info!(
            text = %notification.message,
            duration = ?notification.duration,
            "notification"
        );
    }
}

/// Notifier that keeps every notification it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notifications: Vec<Notification>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications received so far, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Messages received so far, oldest first.
    pub fn messages(&self) -> Vec<&str> {
        self.notifications
            .iter()
            .map(|notification| notification.message.as_str())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}
