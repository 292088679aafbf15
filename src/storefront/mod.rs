//! Storefront
//!
//! Application state for the shop page: the catalog snapshot, the cart, the grid
//! filter and the overlay states. State changes only through [`Storefront::dispatch`];
//! every cart change runs the same hook, which persists the cart and re-renders it.

use jiff::Timestamp;
use tracing::{debug, error, info, warn};

use crate::{
    cart::{self, Cart, CartChange},
    catalog::{self, Catalog, CatalogSource},
    checkout::{CheckoutDialog, CheckoutOutcome, Visibility},
    history,
    notifications::{CART_EMPTY, Notification, Notifier, PRODUCT_ADDED, PURCHASE_COMPLETED},
    offers::{ProductFilter, offer_badge},
    pricing::{PricingError, Totals},
    products::ProductId,
    render::{AmountFormatter, CartView, Overlays, Renderer, cart_view, product_cards},
    storage::KeyValueStore,
};

pub mod command;

pub use command::{Command, CommandParseError};

/// Storefront
#[derive(Debug)]
pub struct Storefront<S, R, N> {
    catalog: Catalog,
    cart: Cart,
    filter: ProductFilter,
    checkout: CheckoutDialog,
    cart_panel: Visibility,
    storage: S,
    renderer: R,
    notifier: N,
    formatter: AmountFormatter,
}

impl<S, R, N> Storefront<S, R, N>
where
    S: KeyValueStore,
    R: Renderer,
    N: Notifier,
{
    /// Create a storefront with an empty catalog, restoring the cart from `storage`
    /// and rendering it.
    pub fn new(storage: S, renderer: R, notifier: N, formatter: AmountFormatter) -> Self {
        let cart = cart::persist::load(&storage);

        info!(lines = cart.len(), items = cart.item_count(), "restored cart");

        let mut storefront = Self {
            catalog: Catalog::default(),
            cart,
            filter: ProductFilter::All,
            checkout: CheckoutDialog::new(),
            cart_panel: Visibility::Closed,
            storage,
            renderer,
            notifier,
            formatter,
        };

        storefront.render_cart();

        storefront
    }

    /// Fetch the catalog once and render the grid, the offer badge and the cart.
    pub async fn start<C>(&mut self, source: &C)
    where
        C: CatalogSource + ?Sized,
    {
        let catalog = catalog::load(source).await;

        self.set_catalog(catalog);
    }

    /// Replace the catalog snapshot and redraw everything that depends on it.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.filter = ProductFilter::All;

        self.render_products();
        self.renderer
            .render_offer_badge(offer_badge(&self.catalog).as_deref());
        self.render_cart();
    }

    /// Apply a shopper action.
    pub fn dispatch(&mut self, command: Command) {
        debug!(?command, "dispatching command");

        match command {
            Command::ShowAllProducts => self.show(ProductFilter::All),
            Command::ShowOffers => self.show(ProductFilter::Offers),
            Command::AddToCart(id) => self.add(id),
            Command::IncrementLine(index) => {
                let change = self.cart.increment(index);
                self.after_index_change(command, change);
            }
            Command::DecrementLine(index) => {
                let change = self.cart.decrement(index);
                self.after_index_change(command, change);
            }
            Command::RemoveLine(index) => {
                let change = self.cart.remove(index);
                self.after_index_change(command, change);
            }
            Command::ClearCart => {
                let change = self.cart.clear();
                self.on_cart_changed(change);
            }
            Command::OpenCartPanel => self.set_cart_panel(Visibility::Open),
            Command::CloseCartPanel => self.set_cart_panel(Visibility::Closed),
            Command::OpenCheckout => {
                self.checkout.open();
                self.render_overlays();
            }
            Command::CancelCheckout => {
                if self.checkout.cancel() {
                    self.render_overlays();
                }
            }
            Command::ConfirmCheckout => self.confirm_checkout(Timestamp::now()),
        }
    }

    /// Confirm the checkout dialog, stamping any recorded purchase with `now`.
    pub fn confirm_checkout(&mut self, now: Timestamp) {
        match self.checkout.confirm(&self.cart, now) {
            CheckoutOutcome::NotOpen => {
                debug!("ignoring confirmation while the checkout dialog is closed");
            }
            CheckoutOutcome::EmptyCart => {
                self.render_overlays();
                self.notifier.notify(Notification::new(CART_EMPTY));
            }
            CheckoutOutcome::Completed(entry) => {
                let items = entry.items.len();

                match history::append(&mut self.storage, entry) {
                    Ok(purchases) => info!(items, purchases, "recorded purchase"),
                    Err(error) => error!(%error, items, "failed to record purchase"),
                }

                let change = self.cart.clear();
                self.on_cart_changed(change);

                self.cart_panel = Visibility::Closed;
                self.render_overlays();

                self.notifier.notify(Notification::new(PURCHASE_COMPLETED));
            }
        }
    }

    /// Current catalog snapshot.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Filter applied to the grid.
    pub fn filter(&self) -> ProductFilter {
        self.filter
    }

    /// Checkout dialog state.
    pub fn checkout_state(&self) -> Visibility {
        self.checkout.state()
    }

    /// Cart side panel state.
    pub fn cart_panel(&self) -> Visibility {
        self.cart_panel
    }

    /// Cart totals.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the calculation overflows.
    pub fn totals(&self) -> Result<Totals, PricingError> {
        self.cart.totals()
    }

    /// Sum of quantities in the cart.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Backing store.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    fn show(&mut self, filter: ProductFilter) {
        self.filter = filter;
        self.render_products();
    }

    fn add(&mut self, id: ProductId) {
        let Some(product) = self.catalog.find(id) else {
            debug!(%id, "ignoring add for a product missing from the catalog");
            return;
        };

        let change = self.cart.add(product);

        self.on_cart_changed(change);
        self.notifier.notify(Notification::new(PRODUCT_ADDED));
    }

    fn after_index_change(&mut self, command: Command, change: Option<CartChange>) {
        match change {
            Some(change) => self.on_cart_changed(change),
            None => debug!(?command, lines = self.cart.len(), "ignoring stale cart position"),
        }
    }

    fn set_cart_panel(&mut self, visibility: Visibility) {
        self.cart_panel = visibility;
        self.render_overlays();
    }

    /// Runs after every cart mutation.
    fn on_cart_changed(&mut self, change: CartChange) {
        debug!(?change, items = self.cart.item_count(), "cart changed");

        if let Err(error) = cart::persist::save(&mut self.storage, &self.cart) {
            error!(%error, "failed to persist cart");
        }

        self.render_cart();
    }

    fn render_products(&mut self) {
        let visible = self.filter.apply(&self.catalog);

        match product_cards(visible, &self.formatter) {
            Ok(cards) => self.renderer.render_products(&cards),
            Err(error) => warn!(%error, "failed to price product grid"),
        }
    }

    fn render_cart(&mut self) {
        let view = cart_view(&self.cart, &self.formatter).unwrap_or_else(|error| {
            warn!(%error, "failed to price cart, rendering without totals");

            CartView {
                item_count: self.cart.item_count(),
                ..CartView::default()
            }
        });

        self.renderer.render_cart(&view);
    }

    fn render_overlays(&mut self) {
        self.renderer.render_overlays(Overlays {
            cart_panel: self.cart_panel,
            checkout_dialog: self.checkout.state(),
        });
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        catalog::StaticCatalogSource,
        notifications::{MockNotifier, RecordingNotifier},
        products::Product,
        render::HeadlessRenderer,
        storage::{CART_KEY, HISTORY_KEY, MemoryStore, MockKeyValueStore, StorageError},
    };

    use super::*;

    type TestStorefront = Storefront<MemoryStore, HeadlessRenderer, RecordingNotifier>;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new(1, "A", Decimal::from(100)),
            Product::new(2, "B", Decimal::from(200)).with_offer(true),
        ])
    }

    fn storefront_with(storage: MemoryStore) -> TestStorefront {
        let mut storefront = Storefront::new(
            storage,
            HeadlessRenderer::new(),
            RecordingNotifier::new(),
            AmountFormatter::default(),
        );

        storefront.set_catalog(catalog());

        storefront
    }

    fn storefront() -> TestStorefront {
        storefront_with(MemoryStore::new())
    }

    #[test]
    fn add_unknown_product_is_silently_ignored() {
        let mut storefront = storefront();
        let renders = storefront.renderer().cart_renders;

        storefront.dispatch(Command::AddToCart(ProductId(99)));

        assert!(storefront.cart().is_empty());
        assert!(storefront.notifier().notifications().is_empty());
        assert!(storefront.storage().is_empty());
        assert_eq!(storefront.renderer().cart_renders, renders);
    }

    #[test]
    fn add_persists_renders_and_notifies() -> TestResult {
        let mut storefront = storefront();
        let renders = storefront.renderer().cart_renders;

        storefront.dispatch(Command::AddToCart(ProductId(1)));

        assert_eq!(storefront.item_count(), 1);
        assert_eq!(storefront.renderer().cart_renders, renders + 1);
        assert_eq!(storefront.renderer().cart.item_count, 1);
        assert_eq!(storefront.notifier().messages(), vec![PRODUCT_ADDED]);
        assert!(storefront.storage().get(CART_KEY)?.is_some());

        Ok(())
    }

    #[test]
    fn stale_positions_do_not_persist_or_render() {
        let mut storefront = storefront();
        storefront.dispatch(Command::AddToCart(ProductId(1)));
        let renders = storefront.renderer().cart_renders;

        storefront.dispatch(Command::IncrementLine(4));
        storefront.dispatch(Command::DecrementLine(1));
        storefront.dispatch(Command::RemoveLine(usize::MAX));

        assert_eq!(storefront.item_count(), 1);
        assert_eq!(storefront.renderer().cart_renders, renders);
    }

    #[test]
    fn clear_always_persists() -> TestResult {
        let mut storefront = storefront();

        storefront.dispatch(Command::ClearCart);

        assert_eq!(storefront.storage().get(CART_KEY)?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn cart_is_restored_on_creation() {
        let storage = MemoryStore::with_entry(
            CART_KEY,
            r#"[{"id":2,"nombre":"B","precio":200,"oferta":true,"cantidad":2,"imagen":""}]"#,
        );

        let storefront = storefront_with(storage);

        assert_eq!(storefront.item_count(), 2);
        assert_eq!(storefront.renderer().cart.rows.len(), 1);
    }

    #[test]
    fn filters_render_from_full_catalog() {
        let mut storefront = storefront();

        storefront.dispatch(Command::ShowOffers);
        assert_eq!(storefront.renderer().products.len(), 1);
        assert_eq!(storefront.filter(), ProductFilter::Offers);

        storefront.dispatch(Command::ShowOffers);
        assert_eq!(storefront.renderer().products.len(), 1);

        storefront.dispatch(Command::ShowAllProducts);
        assert_eq!(storefront.renderer().products.len(), 2);
    }

    #[test]
    fn cart_panel_opens_and_closes() {
        let mut storefront = storefront();

        storefront.dispatch(Command::OpenCartPanel);
        assert_eq!(storefront.renderer().overlays.cart_panel, Visibility::Open);

        storefront.dispatch(Command::CloseCartPanel);
        assert_eq!(storefront.cart_panel(), Visibility::Closed);
    }

    #[test]
    fn cancel_checkout_changes_nothing_else() {
        let mut storefront = storefront();
        storefront.dispatch(Command::AddToCart(ProductId(1)));
        storefront.dispatch(Command::OpenCheckout);

        storefront.dispatch(Command::CancelCheckout);

        assert_eq!(storefront.checkout_state(), Visibility::Closed);
        assert_eq!(storefront.item_count(), 1);
        assert!(history::load(storefront.storage()).is_empty());
    }

    #[test]
    fn empty_checkout_notifies_without_history() -> TestResult {
        let mut storefront = storefront();
        storefront.dispatch(Command::OpenCheckout);

        storefront.confirm_checkout(Timestamp::UNIX_EPOCH);

        assert_eq!(storefront.checkout_state(), Visibility::Closed);
        assert_eq!(storefront.notifier().messages(), vec![CART_EMPTY]);
        assert!(storefront.storage().get(HISTORY_KEY)?.is_none());

        Ok(())
    }

    #[test]
    fn confirmed_checkout_records_and_clears() {
        let mut storefront = storefront();
        storefront.dispatch(Command::AddToCart(ProductId(1)));
        storefront.dispatch(Command::AddToCart(ProductId(2)));
        storefront.dispatch(Command::OpenCartPanel);
        storefront.dispatch(Command::OpenCheckout);

        storefront.confirm_checkout(Timestamp::UNIX_EPOCH);

        let entries = history::load(storefront.storage());

        assert_eq!(entries.len(), 1);
        assert_eq!(entries.first().map(|entry| entry.date), Some(Timestamp::UNIX_EPOCH));
        assert!(storefront.cart().is_empty());
        assert_eq!(storefront.cart_panel(), Visibility::Closed);
        assert_eq!(storefront.renderer().overlays, Overlays::default());
        assert_eq!(storefront.renderer().cart.item_count, 0);
        assert_eq!(
            storefront.notifier().messages().last().copied(),
            Some(PURCHASE_COMPLETED)
        );
    }

    #[test]
    fn confirm_without_open_dialog_is_ignored() {
        let mut storefront = storefront();
        storefront.dispatch(Command::AddToCart(ProductId(1)));

        storefront.dispatch(Command::ConfirmCheckout);

        assert_eq!(storefront.item_count(), 1);
        assert!(history::load(storefront.storage()).is_empty());
    }

    #[tokio::test]
    async fn failed_catalog_fetch_leaves_cart_alone() {
        let storage = MemoryStore::with_entry(
            CART_KEY,
            r#"[{"id":1,"nombre":"A","precio":100,"oferta":false,"cantidad":1,"imagen":""}]"#,
        );
        let mut storefront = Storefront::new(
            storage,
            HeadlessRenderer::new(),
            RecordingNotifier::new(),
            AmountFormatter::default(),
        );

        storefront
            .start(&StaticCatalogSource::new("this is not json"))
            .await;

        assert!(storefront.catalog().is_empty());
        assert!(storefront.renderer().products.is_empty());
        assert_eq!(storefront.renderer().offer_badge, None);
        assert_eq!(storefront.item_count(), 1);
    }

    #[test]
    fn storage_failures_do_not_stop_the_cart() {
        let mut storage = MockKeyValueStore::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .times(1)
            .returning(|_, _| Err(StorageError::Io(std::io::Error::other("disk full"))));

        let mut storefront = Storefront::new(
            storage,
            HeadlessRenderer::new(),
            RecordingNotifier::new(),
            AmountFormatter::default(),
        );
        storefront.set_catalog(catalog());

        storefront.dispatch(Command::AddToCart(ProductId(2)));

        assert_eq!(storefront.item_count(), 1);
        assert_eq!(storefront.renderer().cart.item_count, 1);
    }

    #[test]
    fn notifier_receives_one_message_per_add() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .with(eq(Notification::new(PRODUCT_ADDED)))
            .times(2)
            .return_const(());

        let mut storefront = Storefront::new(
            MemoryStore::new(),
            HeadlessRenderer::new(),
            notifier,
            AmountFormatter::default(),
        );
        storefront.set_catalog(catalog());

        storefront.dispatch(Command::AddToCart(ProductId(1)));
        storefront.dispatch(Command::AddToCart(ProductId(1)));
        storefront.dispatch(Command::AddToCart(ProductId(3)));
    }
}
