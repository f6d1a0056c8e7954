//! Application error types.

use crate::catalog::CatalogError;
use stockroom_domain::{DomainError, DraftErrors, ProductId};
use stockroom_store::StoreError;
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Domain error
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Store error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Catalog flagged a failure (load, save, or limit)
    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Submitted form had invalid fields
    #[error("Invalid product: {0}")]
    Validation(DraftErrors),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
