//! Persistence gateway trait (Port)
//!
//! A key-value blob store. The gateway only moves strings; it knows nothing
//! about products or their encoding. Implementations can be in-memory, a
//! directory of files, or a mock for testing.

use crate::error::StoreError;
use async_trait::async_trait;
use std::sync::Arc;

/// Asynchronous key-value blob storage
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value).await
    }
}
