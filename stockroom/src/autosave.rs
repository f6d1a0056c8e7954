//! Autosave worker: persists the catalog whenever it changes.
//!
//! Listens on the catalog's revision channel. Bursts of mutations that land
//! while a save is in flight collapse into a single follow-up save.

use crate::catalog::{CatalogError, ProductCatalog};
use std::sync::{Arc, Weak};
use stockroom_store::ProductRepository;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Autosave worker.
pub struct AutosaveWorker<R: ProductRepository> {
    catalog: Weak<ProductCatalog<R>>,
    changes: watch::Receiver<u64>,
}

impl<R: ProductRepository> AutosaveWorker<R> {
    /// Create a worker for `catalog`.
    ///
    /// The worker holds only a weak reference, so it never keeps the
    /// catalog alive on its own.
    pub fn new(catalog: &Arc<ProductCatalog<R>>) -> Self {
        Self {
            catalog: Arc::downgrade(catalog),
            changes: catalog.subscribe(),
        }
    }

    /// Run the autosave loop.
    ///
    /// Returns when shutdown is signaled or the catalog is dropped. On
    /// shutdown any revision not yet saved is flushed once.
    pub async fn run(mut self, shutdown: CancellationToken) {
        let mut saved = *self.changes.borrow_and_update();
        info!(revision = saved, "Autosave worker started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!("Autosave shutdown requested");
                    let latest = *self.changes.borrow_and_update();
                    if latest != saved {
                        let _ = self.save(latest).await;
                    }
                    break;
                }
                changed = self.changes.changed() => {
                    if changed.is_err() {
                        debug!("Catalog dropped, autosave exiting");
                        break;
                    }
                    let revision = *self.changes.borrow_and_update();
                    if self.save(revision).await.is_none() {
                        break;
                    }
                    saved = revision;
                }
            }
        }

        info!("Autosave worker stopped");
    }

    /// Persist the catalog. Returns `None` once the catalog is gone.
    async fn save(&self, revision: u64) -> Option<Result<(), CatalogError>> {
        let catalog = self.catalog.upgrade()?;

        let outcome = catalog.persist().await;
        match outcome {
            Ok(()) => debug!(revision, count = catalog.len(), "Autosaved products"),
            Err(e) => warn!(revision, error = %e, "Autosave failed"),
        }
        Some(outcome)
    }
}

/// Handle to a running autosave task.
pub struct AutosaveHandle {
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl AutosaveHandle {
    /// Stop the worker, flushing any unsaved revision, and wait for it.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(e) = self.task.await {
            warn!(error = %e, "Autosave task ended abnormally");
        }
    }

    /// True once the worker has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Spawn an autosave worker for `catalog` on the current tokio runtime.
pub fn spawn_autosave<R>(catalog: &Arc<ProductCatalog<R>>) -> AutosaveHandle
where
    R: ProductRepository + 'static,
{
    let shutdown = CancellationToken::new();
    let worker = AutosaveWorker::new(catalog);
    let task = tokio::spawn(worker.run(shutdown.clone()));

    AutosaveHandle { shutdown, task }
}

// =============================================================================
// Tests
// =============================================================================
