//! Stockroom Storage Layer
//!
//! Provides persistence for the product collection.
//!
//! # Architecture
//!
//! - **Gateway trait**: key-value blob storage interface (port)
//! - **In-memory gateway**: fast implementation for testing
//! - **File gateway**: one file per key in a data directory
//! - **Product repository**: encodes the whole collection into one blob
//!
//! # Usage
//!
//! ```rust
//! use stockroom_store::{BlobProductRepository, MemoryKeyValueStore, ProductRepository};
//! use stockroom_domain::{Product, ProductDraft};
//!
//! #[tokio::main]
//! async fn main() {
//!     let repo = BlobProductRepository::new(MemoryKeyValueStore::new());
//!
//!     let product = Product::from_draft(&ProductDraft::new("Widget", "12.5", "widget.jpg")).unwrap();
//!     repo.save_all(&[product]).await.unwrap();
//!
//!     let products = repo.load_all().await.unwrap();
//!     println!("Stored products: {}", products.len());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Modules
mod error;
mod file;
mod gateway;
mod memory;
mod record;
mod repository;

// Re-exports
pub use error::StoreError;
pub use file::FileKeyValueStore;
pub use gateway::KeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use record::{decode_products, encode_products, ProductRecord};
pub use repository::{BlobProductRepository, ProductRepository, DEFAULT_STORAGE_KEY};
