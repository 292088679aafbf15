//! Purchase History
//!
//! Append-only list of confirmed purchases, stored under [`HISTORY_KEY`].

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    cart::CartLine,
    storage::{HISTORY_KEY, KeyValueStore, StorageError, read_json, write_json},
};

/// A confirmed purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseHistoryEntry {
    /// When the purchase was confirmed
    pub date: Timestamp,

    /// Cart lines at confirmation time
    pub items: Vec<CartLine>,
}

impl PurchaseHistoryEntry {
    /// Create a new entry from a snapshot of cart lines.
    pub fn new(date: Timestamp, items: impl Into<Vec<CartLine>>) -> Self {
        Self {
            date,
            items: items.into(),
        }
    }
}

/// Read the stored history, treating a missing or unreadable value as empty.
pub fn load<S>(store: &S) -> Vec<PurchaseHistoryEntry>
where
    S: KeyValueStore + ?Sized,
{
    match read_json::<Vec<PurchaseHistoryEntry>, _>(store, HISTORY_KEY) {
        Ok(entries) => entries.unwrap_or_default(),
        Err(error) => {
            warn!(%error, key = HISTORY_KEY, "ignoring unreadable purchase history");

            Vec::new()
        }
    }
}

/// Append an entry to the stored history (read, push, write back).
///
/// A stored value that is not valid history is replaced. A value that cannot be read
/// at all is left alone and nothing is written.
///
/// # Errors
///
/// Returns a [`StorageError`] if the stored history cannot be read or the updated
/// history cannot be written.
pub fn append<S>(store: &mut S, entry: PurchaseHistoryEntry) -> Result<usize, StorageError>
where
    S: KeyValueStore + ?Sized,
{
    let mut entries = match read_json::<Vec<PurchaseHistoryEntry>, _>(store, HISTORY_KEY) {
        Ok(entries) => entries.unwrap_or_default(),
        Err(StorageError::Json(error)) => {
            warn!(%error, key = HISTORY_KEY, "replacing unreadable purchase history");

            Vec::new()
        }
        Err(error) => return Err(error),
    };

    entries.push(entry);

    write_json(store, HISTORY_KEY, &entries)?;

    Ok(entries.len())
}
