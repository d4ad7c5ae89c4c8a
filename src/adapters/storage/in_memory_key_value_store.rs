//! In-Memory Key-Value Store Adapter
//!
//! Keeps values in a process-local map.
//! Useful for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::ports::{KeyValueStore, StorageError};

/// In-memory key-value storage
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    values: Arc<RwLock<HashMap<String, String>>>,
    fail_writes: bool,
}

impl InMemoryKeyValueStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with values
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: Arc::new(RwLock::new(map)),
            fail_writes: false,
        }
    }

    /// Make every `set` fail (for error-path tests); reads and removes still work
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `key` holds a value
    pub fn contains(&self, key: &str) -> bool {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::IoError(format!("write to '{}' refused", key)));
        }
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}
