//! Storage layer errors

use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key cannot be used by this gateway
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// Underlying storage failed to read or write
    #[error("I/O error on key {key}: {message}")]
    Io {
        /// Key being accessed
        key: String,
        /// Description of the failure
        message: String,
    },

    /// Backend refused the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error (reading a stored blob)
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Domain error passthrough
    #[error("Domain error: {0}")]
    Domain(#[from] stockroom_domain::DomainError),
}

impl StoreError {
    /// Create an I/O error for a key
    pub fn io(key: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Io {
            key: key.into(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            StoreError::Deserialization(err.to_string())
        } else {
            StoreError::Serialization(err.to_string())
        }
    }
}
