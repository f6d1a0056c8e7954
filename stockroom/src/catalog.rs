//! Product Catalog: the capacity-bounded product collection.
//!
//! The catalog owns the ordered product list, its error slot and the
//! loading lifecycle. It is responsible for:
//! - Enforcing the product cap on add
//! - In-place update and delete by id
//! - Loading from and saving to the product repository
//! - Publishing a revision number after every mutation
//!
//! # Concurrency
//!
//! Methods take `&self`; share the catalog as `Arc<ProductCatalog<_>>`.
//! The state lock is never held across an `.await`, so add/update/delete
//! run atomically and may interleave with an in-flight load or save.
//!
//! ```text
//! UI / CLI ──add/update/delete──▶ ProductCatalog ──revision──▶ Autosave
//!                                      │  ▲                      │
//!                                 save │  │ load            persist
//!                                      ▼  │                      │
//!                                ProductRepository ◀─────────────┘
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use stockroom_domain::{DraftErrors, Product, ProductDraft, ProductId};
use stockroom_store::ProductRepository;

/// Default maximum number of products
pub const MAX_PRODUCTS: usize = 5;

// =============================================================================
// Errors and lifecycle
// =============================================================================

/// Catalog-level error flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum CatalogError {
    /// Stored collection could not be read or decoded
    #[error("Failed to load products")]
    LoadFailed,

    /// Collection could not be written
    #[error("Failed to save products")]
    SaveFailed,

    /// Add rejected because the catalog is full
    #[error("Maximum product limit reached")]
    LimitReached,
}

impl CatalogError {
    /// Stable code for this error (e.g. `LIMIT_REACHED`)
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::LoadFailed => "LOAD_FAILED",
            CatalogError::SaveFailed => "SAVE_FAILED",
            CatalogError::LimitReached => "LIMIT_REACHED",
        }
    }
}

/// Persistence lifecycle of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// No load or save issued yet
    Idle,
    /// A load or save is in flight
    Loading,
    /// Last load or save succeeded
    Loaded,
    /// Last load failed (collection fell back to empty)
    LoadFailed,
    /// Last save failed (in-memory collection kept)
    SaveFailed,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncPhase::Idle => write!(f, "idle"),
            SyncPhase::Loading => write!(f, "loading"),
            SyncPhase::Loaded => write!(f, "loaded"),
            SyncPhase::LoadFailed => write!(f, "load_failed"),
            SyncPhase::SaveFailed => write!(f, "save_failed"),
        }
    }
}

/// How full the catalog is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    /// Products currently held
    pub count: usize,
    /// Maximum products allowed
    pub max: usize,
}

impl Capacity {
    /// Slots left
    pub fn remaining(&self) -> usize {
        self.max.saturating_sub(self.count)
    }

    /// True if another product can be added
    pub fn can_add_more(&self) -> bool {
        self.count < self.max
    }

    /// True if the cap has been reached
    pub fn is_full(&self) -> bool {
        !self.can_add_more()
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} products", self.count, self.max)
    }
}

/// Outcome of submitting a product form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// New product appended
    Added {
        /// The stored product
        product: Product,
        /// Capacity after the add
        capacity: Capacity,
    },
    /// Existing product replaced
    Updated {
        /// The stored product
        product: Product,
    },
    /// Form had invalid fields; nothing changed
    Invalid(DraftErrors),
    /// Catalog refused the change
    Rejected(CatalogError),
    /// No product with this id
    NotFound(ProductId),
}

impl Submission {
    /// True if the catalog changed
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Added { .. } | Submission::Updated { .. })
    }

    /// True if this add filled the last free slot
    pub fn reached_limit(&self) -> bool {
        matches!(self, Submission::Added { capacity, .. } if capacity.is_full())
    }
}

// =============================================================================
// Product Catalog
// =============================================================================

struct CatalogState {
    products: Vec<Product>,
    error: Option<CatalogError>,
    /// Loads and saves currently awaiting the repository
    pending_io: usize,
    /// Result of the most recently finished load or save
    last_outcome: SyncPhase,
}

/// Capacity-bounded, ordered product collection.
pub struct ProductCatalog<R: ProductRepository> {
    repository: R,
    max_count: usize,
    state: Mutex<CatalogState>,
    revision: watch::Sender<u64>,
}

impl<R: ProductRepository> ProductCatalog<R> {
    /// Create an empty catalog holding at most [`MAX_PRODUCTS`] products.
    pub fn new(repository: R) -> Self {
        Self::with_max_count(repository, MAX_PRODUCTS)
    }

    /// Create an empty catalog with a custom cap.
    pub fn with_max_count(repository: R, max_count: usize) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            repository,
            max_count,
            state: Mutex::new(CatalogState {
                products: Vec::new(),
                error: None,
                pending_io: 0,
                last_outcome: SyncPhase::Idle,
            }),
            revision,
        }
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump_revision(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Load the stored collection, replacing the in-memory one.
    ///
    /// Never fails: a read error or malformed blob leaves the catalog empty
    /// with [`CatalogError::LoadFailed`] set. Overlapping loads are not
    /// deduplicated; whichever resolves last wins.
    pub async fn load(&self) {
        {
            let mut state = self.lock();
            state.pending_io += 1;
            state.error = None;
        }
        debug!("Loading products");

        let result = self.repository.load_all().await;

        let mut state = self.lock();
        state.pending_io -= 1;

        let loaded = match result {
            Ok(products) => self.check_loaded(products),
            Err(e) => Err(e.to_string()),
        };

        match loaded {
            Ok(products) => {
                info!(count = products.len(), max = self.max_count, "Products loaded");
                state.products = products;
                state.error = None;
                state.last_outcome = SyncPhase::Loaded;
            },
            Err(reason) => {
                warn!(error = %reason, "Failed to load products, starting empty");
                state.products.clear();
                state.error = Some(CatalogError::LoadFailed);
                state.last_outcome = SyncPhase::LoadFailed;
            },
        }
    }

    /// Reject stored collections this catalog could never have produced.
    fn check_loaded(&self, products: Vec<Product>) -> Result<Vec<Product>, String> {
        if products.len() > self.max_count {
            return Err(format!(
                "stored collection has {} products, limit is {}",
                products.len(),
                self.max_count
            ));
        }

        let duplicate = {
            let mut seen = HashSet::with_capacity(products.len());
            products.iter().find(|p| !seen.insert(p.id())).map(|p| p.id().to_string())
        };
        match duplicate {
            Some(id) => Err(format!("duplicate product id {}", id)),
            None => Ok(products),
        }
    }

    /// Overwrite the stored collection with `products`.
    ///
    /// On failure sets [`CatalogError::SaveFailed`] and returns it; the
    /// in-memory collection is left as it is.
    pub async fn save(&self, products: &[Product]) -> Result<(), CatalogError> {
        self.lock().pending_io += 1;

        let result = self.repository.save_all(products).await;

        let mut state = self.lock();
        state.pending_io -= 1;
        match result {
            Ok(()) => {
                debug!(count = products.len(), "Products saved");
                state.last_outcome = SyncPhase::Loaded;
                Ok(())
            },
            Err(e) => {
                warn!(error = %e, count = products.len(), "Failed to save products");
                state.error = Some(CatalogError::SaveFailed);
                state.last_outcome = SyncPhase::SaveFailed;
                Err(CatalogError::SaveFailed)
            },
        }
    }

    /// Save whatever the collection holds right now.
    pub async fn persist(&self) -> Result<(), CatalogError> {
        let snapshot = self.products();
        self.save(&snapshot).await
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Append a product.
    ///
    /// Returns `false` and sets [`CatalogError::LimitReached`] when the
    /// catalog is full. A product whose id is already present is refused
    /// without touching the error slot.
    pub fn add(&self, product: Product) -> bool {
        let mut state = self.lock();

        if state.products.len() >= self.max_count {
            warn!(product_id = %product.id(), max = self.max_count, "Product limit reached");
            state.error = Some(CatalogError::LimitReached);
            return false;
        }

        if state.products.iter().any(|p| p.id() == product.id()) {
            warn!(product_id = %product.id(), "Product id already present, add ignored");
            return false;
        }

        debug!(product_id = %product.id(), count = state.products.len() + 1, "Adding product");
        state.products.push(product);
        state.error = None;
        drop(state);

        self.bump_revision();
        true
    }

    /// Replace the product with the same id, keeping its position.
    ///
    /// Returns `false` (and changes nothing) if no product has that id.
    pub fn update(&self, product: Product) -> bool {
        let mut state = self.lock();

        let Some(slot) = state.products.iter_mut().find(|p| p.id() == product.id()) else {
            debug!(product_id = %product.id(), "Update for unknown product ignored");
            return false;
        };

        debug!(product_id = %product.id(), "Updating product");
        *slot = product;
        state.error = None;
        drop(state);

        self.bump_revision();
        true
    }

    /// Remove the product with this id. Always clears the error slot.
    ///
    /// Returns whether a product was removed.
    pub fn delete(&self, id: &ProductId) -> bool {
        let mut state = self.lock();

        let before = state.products.len();
        state.products.retain(|p| p.id() != id);
        let removed = state.products.len() != before;
        state.error = None;
        drop(state);

        if removed {
            debug!(product_id = %id, "Deleted product");
            self.bump_revision();
        }
        removed
    }

    /// Reset the error slot.
    pub fn clear_error(&self) {
        self.lock().error = None;
    }

    // -------------------------------------------------------------------------
    // Form submission
    // -------------------------------------------------------------------------

    /// Validate a new-product form and add it.
    pub fn submit_new(&self, draft: &ProductDraft) -> Submission {
        if self.capacity().is_full() {
            self.lock().error = Some(CatalogError::LimitReached);
            return Submission::Rejected(CatalogError::LimitReached);
        }

        let product = match Product::from_draft(draft) {
            Ok(product) => product,
            Err(errors) => return Submission::Invalid(errors),
        };

        if !self.add(product.clone()) {
            return Submission::Rejected(self.error().unwrap_or(CatalogError::LimitReached));
        }

        let capacity = self.capacity();
        info!(product_id = %product.id(), %capacity, "Product added");
        if capacity.is_full() {
            info!(max = capacity.max, "Product limit reached");
        }
        Submission::Added { product, capacity }
    }

    /// Validate an edit form and apply it to an existing product.
    pub fn submit_edit(&self, id: &ProductId, draft: &ProductDraft) -> Submission {
        let Some(existing) = self.get(id) else {
            return Submission::NotFound(id.clone());
        };

        let product = match existing.revise(draft) {
            Ok(product) => product,
            Err(errors) => return Submission::Invalid(errors),
        };

        if !self.update(product.clone()) {
            return Submission::NotFound(id.clone());
        }

        info!(product_id = %id, "Product updated");
        Submission::Updated { product }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Snapshot of the collection in insertion order
    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    /// Look up a product by id
    pub fn get(&self, id: &ProductId) -> Option<Product> {
        self.lock().products.iter().find(|p| p.id() == id).cloned()
    }

    /// Number of products held
    pub fn len(&self) -> usize {
        self.lock().products.len()
    }

    /// True if the catalog holds no products
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum products allowed
    pub fn max_count(&self) -> usize {
        self.max_count
    }

    /// Current count against the cap
    pub fn capacity(&self) -> Capacity {
        Capacity {
            count: self.len(),
            max: self.max_count,
        }
    }

    /// True while a load or save is in flight
    pub fn is_loading(&self) -> bool {
        self.lock().pending_io > 0
    }

    /// Current error flag
    pub fn error(&self) -> Option<CatalogError> {
        self.lock().error
    }

    /// Persistence lifecycle phase
    pub fn phase(&self) -> SyncPhase {
        let state = self.lock();
        if state.pending_io > 0 {
            SyncPhase::Loading
        } else {
            state.last_outcome
        }
    }

    /// Subscribe to mutation revisions.
    ///
    /// The value increments after every add, update or delete that changed
    /// the collection. Loads do not bump it.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Current mutation revision
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Underlying repository
    pub fn repository(&self) -> &R {
        &self.repository
    }
}

// =============================================================================
// Tests
// =============================================================================
