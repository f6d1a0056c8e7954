//! Stockroom Library
//!
//! A small product inventory: at most five products, each with a name, a
//! price and an image, persisted as one blob in a key-value store.
//!
//! # Architecture
//!
//! ```text
//! CLI → App → ProductCatalog → ProductRepository → KeyValueStore (memory | files)
//!                  │
//!               revision
//!                  ↓
//!          Autosave Worker (persist on change)
//! ```
//!
//! # Components
//!
//! - **ProductCatalog**: Capacity-bounded collection with load/save lifecycle
//! - **Autosave**: Background task that persists after every change
//! - **App**: Wires configuration, storage and the catalog for the CLI
//! - **Config**: Environment-based configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use stockroom::{App, Config};
//! use stockroom_domain::ProductDraft;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::open(Config::from_env()?).await?;
//!     app.add(&ProductDraft::new("Desk Lamp", "39.99", "file:///lamp.jpg")).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod app;
pub mod autosave;
pub mod catalog;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use app::{App, AppCatalog, AppRepository, ProductPatch};
pub use autosave::{spawn_autosave, AutosaveHandle, AutosaveWorker};
pub use catalog::{Capacity, CatalogError, ProductCatalog, Submission, SyncPhase, MAX_PRODUCTS};
pub use config::{CatalogConfig, Config, Environment, StorageConfig};
pub use error::{AppError, AppResult};
