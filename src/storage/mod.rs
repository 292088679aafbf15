//! Storage
//!
//! A string-keyed store of string values, the local-storage analogue the cart and
//! purchase history are mirrored into.

use mockall::automock;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Key holding the serialized cart.
pub const CART_KEY: &str = "carrito";

/// Key holding the serialized purchase history.
pub const HISTORY_KEY: &str = "compras_historial";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error reading or writing a stored value
    #[error("Failed to access storage: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized or parsed
    #[error("Failed to (de)serialize stored value: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key-value store
#[automock]
pub trait KeyValueStore {
    /// Retrieve the value stored under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read and parse a JSON value.
///
/// # Errors
///
/// Returns a [`StorageError`] if the value cannot be read or is not valid JSON for `T`.
pub fn read_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    store
        .get(key)?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(StorageError::from)
}

/// Serialize a value as JSON and store it.
///
/// # Errors
///
/// Returns a [`StorageError`] if the value cannot be serialized or written.
pub fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;

    store.set(key, &raw)
}
