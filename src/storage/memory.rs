//! In-memory storage

use rustc_hash::FxHashMap;

use super::{KeyValueStore, StorageError};

/// Store that keeps values in memory for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a single value.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = FxHashMap::default();
        values.insert(key.into(), value.into());

        Self { values }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn set_replaces_previous_value() -> TestResult {
        let mut store = MemoryStore::with_entry("k", "old");

        store.set("k", "new")?;

        assert_eq!(store.get("k")?.as_deref(), Some("new"));
        assert_eq!(store.len(), 1);

        Ok(())
    }

    #[test]
    fn missing_key_is_none() -> TestResult {
        let store = MemoryStore::new();

        assert!(store.get("missing")?.is_none());
        assert!(store.is_empty());

        Ok(())
    }
}
