//! Stockroom Domain Layer
//!
//! Pure domain logic with zero I/O dependencies.
//! Contains the product entity, its validated value objects, form
//! validation rules and price formatting.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod entities;
pub mod format;
pub mod validation;
pub mod value_objects;

// Re-export commonly used types
pub use entities::Product;
pub use format::{format_amount, format_price};
pub use validation::{
    validate_image_ref, validate_name, validate_price, DraftErrors, Field, FieldError,
    FieldViolation, ProductDraft, NAME_MAX_CHARS, NAME_MIN_CHARS, PRICE_MAX,
};
pub use value_objects::{DomainError, ImageRef, ProductId, ProductName, ProductPrice};
