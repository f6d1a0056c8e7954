//! App: wires configuration, storage and the catalog together.
//!
//! # Lifecycle
//!
//! 1. Pick a gateway for the environment (memory for `test`, files otherwise)
//! 2. Build the catalog and load the stored collection
//! 3. Run one command against the catalog
//! 4. Persist if the command changed anything

use std::sync::Arc;

use tracing::info;

use stockroom_domain::{Product, ProductDraft, ProductId};
use stockroom_store::{
    BlobProductRepository, FileKeyValueStore, KeyValueStore, MemoryKeyValueStore,
};

use crate::catalog::{Capacity, ProductCatalog, Submission};
use crate::config::{Config, Environment};
use crate::error::{AppError, AppResult};

/// Repository type used by the application
pub type AppRepository = BlobProductRepository<Arc<dyn KeyValueStore>>;

/// Catalog type used by the application
pub type AppCatalog = ProductCatalog<AppRepository>;

/// Field changes for an edit; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    /// New name
    pub name: Option<String>,
    /// New price
    pub price: Option<String>,
    /// New image reference
    pub image_ref: Option<String>,
}

impl ProductPatch {
    fn apply(self, mut draft: ProductDraft) -> ProductDraft {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(image_ref) = self.image_ref {
            draft.image_ref = image_ref;
        }
        draft
    }
}

// =============================================================================
// App
// =============================================================================

/// The stockroom application.
pub struct App {
    config: Config,
    catalog: Arc<AppCatalog>,
}

impl App {
    /// Open storage for `config` and load the stored collection.
    ///
    /// Fails if the stored collection could not be loaded, so a command
    /// never overwrites data it failed to read.
    pub async fn open(config: Config) -> AppResult<Self> {
        let gateway: Arc<dyn KeyValueStore> = match config.environment {
            Environment::Test => Arc::new(MemoryKeyValueStore::new()),
            Environment::Development | Environment::Production => {
                Arc::new(FileKeyValueStore::open(&config.storage.data_dir).await?)
            },
        };

        Self::with_gateway(config, gateway).await
    }

    /// Build the app over an existing gateway and load the stored collection.
    pub async fn with_gateway(config: Config, gateway: Arc<dyn KeyValueStore>) -> AppResult<Self> {
        let repository = BlobProductRepository::with_key(gateway, config.storage.storage_key.clone());
        let catalog = Arc::new(ProductCatalog::with_max_count(repository, config.catalog.max_products));

        catalog.load().await;
        if let Some(e) = catalog.error() {
            return Err(AppError::Catalog(e));
        }

        info!(
            environment = %config.environment,
            key = %config.storage.storage_key,
            count = catalog.len(),
            "Catalog ready"
        );

        Ok(Self { config, catalog })
    }

    /// Configuration in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared catalog
    pub fn catalog(&self) -> &Arc<AppCatalog> {
        &self.catalog
    }

    /// All products with the current capacity
    pub fn list(&self) -> (Capacity, Vec<Product>) {
        (self.catalog.capacity(), self.catalog.products())
    }

    /// One product by id
    pub fn show(&self, id: &ProductId) -> AppResult<Product> {
        self.catalog.get(id).ok_or_else(|| AppError::ProductNotFound(id.clone()))
    }

    /// Validate and add a new product, then persist.
    pub async fn add(&self, draft: &ProductDraft) -> AppResult<Submission> {
        let submission = self.catalog.submit_new(draft);
        Self::check(&submission)?;
        self.persist().await?;
        Ok(submission)
    }

    /// Apply a patch to an existing product, then persist.
    pub async fn edit(&self, id: &ProductId, patch: ProductPatch) -> AppResult<Product> {
        let existing = self.show(id)?;
        let submission = self.catalog.submit_edit(id, &patch.apply(existing.to_draft()));
        Self::check(&submission)?;
        self.persist().await?;

        match submission {
            Submission::Updated { product } => Ok(product),
            _ => Err(AppError::ProductNotFound(id.clone())),
        }
    }

    /// Delete a product, then persist.
    pub async fn delete(&self, id: &ProductId) -> AppResult<()> {
        if !self.catalog.delete(id) {
            return Err(AppError::ProductNotFound(id.clone()));
        }
        self.persist().await
    }

    fn check(submission: &Submission) -> AppResult<()> {
        match submission {
            Submission::Added { .. } | Submission::Updated { .. } => Ok(()),
            Submission::Invalid(errors) => Err(AppError::Validation(errors.clone())),
            Submission::Rejected(e) => Err(AppError::Catalog(*e)),
            Submission::NotFound(id) => Err(AppError::ProductNotFound(id.clone())),
        }
    }

    async fn persist(&self) -> AppResult<()> {
        Ok(self.catalog.persist().await?)
    }
}

// =============================================================================
// Tests
// =============================================================================
