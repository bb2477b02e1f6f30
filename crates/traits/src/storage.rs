//! KeyValueStore trait for durable, named string records.
//!
//! The cart persists its quantity map as one JSON record through this trait.
//! Callers treat storage as best-effort, so implementations report failures
//! but never panic.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum StorageError {
    #[error("Failed to read record '{key}': {message}")]
    ReadFailed { key: String, message: String },

    #[error("Failed to write record '{key}': {message}")]
    WriteFailed { key: String, message: String },

    #[error("Invalid record key: {0}")]
    InvalidKey(String),
}

pub trait KeyValueStore: Send + Sync + Debug {
    /// Returns the stored value, or `None` when no record exists under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the record under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Returns a human-readable name for this store (for logging/debugging).
    fn name(&self) -> &'static str;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// A process-local store. Records live as long as the store.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    records: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let records = self.records.read().map_err(|_| StorageError::ReadFailed {
            key: key.to_string(),
            message: "record store lock poisoned".to_string(),
        })?;
        Ok(records.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut records = self.records.write().map_err(|_| StorageError::WriteFailed {
            key: key.to_string(),
            message: "record store lock poisoned".to_string(),
        })?;
        records.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "InMemoryKeyValueStore"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store_roundtrip() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get("cart-q").unwrap(), None);

        store.set("cart-q", "{\"a\":1}").unwrap();
        assert_eq!(store.get("cart-q").unwrap().as_deref(), Some("{\"a\":1}"));

        store.set("cart-q", "{}").unwrap();
        assert_eq!(store.get("cart-q").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_shared_store_sees_writes() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let other = Arc::clone(&store);
        store.set("k", "v").unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));
        assert_eq!(other.name(), "InMemoryKeyValueStore");
    }
}
