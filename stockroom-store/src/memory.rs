//! In-memory gateway implementation
//!
//! Used for testing and ephemeral runs without a data directory.
//! Thread-safe using RwLock for concurrent access.

use crate::error::StoreError;
use crate::gateway::KeyValueStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// In-memory key-value store
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    /// Create a new empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with one value
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.put_raw(key, value);
        store
    }

    /// Write a value without going through the async interface
    pub fn put_raw(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), value.into());
    }

    /// Read a value without going through the async interface
    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
    }

    /// Get the number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True when nothing has been written
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all data (useful for test setup)
    pub fn clear(&self) {
        self.entries.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get_raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.put_raw(key, value);
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
