//! Cart persistence

use tracing::warn;

use crate::{
    cart::Cart,
    storage::{CART_KEY, KeyValueStore, StorageError, read_json, write_json},
};

/// Load the stored cart, falling back to an empty cart when nothing usable is stored.
pub fn load<S>(store: &S) -> Cart
where
    S: KeyValueStore + ?Sized,
{
    match read_json::<Cart, _>(store, CART_KEY) {
        Ok(cart) => cart.unwrap_or_default(),
        Err(error) => {
            warn!(%error, key = CART_KEY, "ignoring unreadable stored cart");

            Cart::default()
        }
    }
}

/// Overwrite the stored cart with `cart`.
///
/// # Errors
///
/// Returns a [`StorageError`] if the cart cannot be serialized or written.
pub fn save<S>(store: &mut S, cart: &Cart) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
{
    write_json(store, CART_KEY, cart)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{products::Product, storage::MemoryStore};

    use super::*;

    #[test]
    fn saved_cart_loads_back() -> TestResult {
        let mut store = MemoryStore::new();
        let mut cart = Cart::new();
        cart.add(&Product::new(1, "A", Decimal::from(100)));
        cart.add(&Product::new(2, "B", Decimal::from(200)).with_offer(true));

        save(&mut store, &cart)?;

        assert_eq!(load(&store), cart);

        Ok(())
    }

    #[test]
    fn cleared_cart_loads_back_empty() -> TestResult {
        let mut store = MemoryStore::new();
        let mut cart = Cart::new();
        cart.add(&Product::new(1, "A", Decimal::from(100)));
        save(&mut store, &cart)?;

        cart.clear();
        save(&mut store, &cart)?;

        assert!(load(&store).is_empty());
        assert_eq!(store.get(CART_KEY)?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn absent_cart_is_empty() {
        assert!(load(&MemoryStore::new()).is_empty());
    }

    #[test]
    fn malformed_cart_is_empty() {
        let store = MemoryStore::with_entry(CART_KEY, "{\"oops\":");

        assert!(load(&store).is_empty());
    }

    #[test]
    fn null_cart_is_empty() {
        let store = MemoryStore::with_entry(CART_KEY, "null");

        assert!(load(&store).is_empty());
    }
}
