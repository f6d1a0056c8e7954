//! Repository trait definitions (Ports)
//!
//! The catalog persists its whole collection at once, so the repository
//! only knows how to load everything and overwrite everything.

use crate::error::StoreError;
use crate::gateway::KeyValueStore;
use crate::record::{decode_products, encode_products};
use async_trait::async_trait;
use std::sync::Arc;
use stockroom_domain::Product;
use tracing::debug;

/// Blob key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "@products_storage";

/// Repository for the product collection
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Load the stored collection in order (empty if nothing was ever saved)
    async fn load_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Overwrite the stored collection
    async fn save_all(&self, products: &[Product]) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: ProductRepository + ?Sized> ProductRepository for Arc<T> {
    async fn load_all(&self) -> Result<Vec<Product>, StoreError> {
        (**self).load_all().await
    }

    async fn save_all(&self, products: &[Product]) -> Result<(), StoreError> {
        (**self).save_all(products).await
    }
}

/// Product repository that keeps the collection as one blob in a gateway
#[derive(Debug, Clone)]
pub struct BlobProductRepository<K> {
    gateway: K,
    key: String,
}

impl<K: KeyValueStore> BlobProductRepository<K> {
    /// Create a repository using the default storage key
    pub fn new(gateway: K) -> Self {
        Self::with_key(gateway, DEFAULT_STORAGE_KEY)
    }

    /// Create a repository using a custom storage key
    pub fn with_key(gateway: K, key: impl Into<String>) -> Self {
        Self {
            gateway,
            key: key.into(),
        }
    }

    /// Storage key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying gateway
    pub fn gateway(&self) -> &K {
        &self.gateway
    }
}

#[async_trait]
impl<K: KeyValueStore> ProductRepository for BlobProductRepository<K> {
    async fn load_all(&self) -> Result<Vec<Product>, StoreError> {
        match self.gateway.get(&self.key).await? {
            Some(blob) => {
                let products = decode_products(&blob)?;
                debug!(key = %self.key, count = products.len(), "Loaded products");
                Ok(products)
            },
            None => {
                debug!(key = %self.key, "No stored products");
                Ok(Vec::new())
            },
        }
    }

    async fn save_all(&self, products: &[Product]) -> Result<(), StoreError> {
        let blob = encode_products(products)?;
        self.gateway.set(&self.key, &blob).await?;
        debug!(key = %self.key, count = products.len(), "Saved products");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
