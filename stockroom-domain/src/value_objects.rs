//! Value Objects for the Stockroom domain
//!
//! Immutable, validated product fields.
//! All value objects enforce invariants at construction time, so a value
//! that exists is a value that passed the form rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::format::format_amount;
use crate::validation::{parse_price, validate_image_ref, validate_name, FieldViolation};

/// Domain errors for value object construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A form field failed validation
    #[error("Invalid field: {0}")]
    InvalidField(#[from] FieldViolation),

    /// Product id must be non-empty
    #[error("Invalid product id: {0:?}")]
    InvalidId(String),

    /// Timestamp out of the representable range
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}

// =============================================================================
// ProductId
// =============================================================================

/// Opaque product identifier
///
/// New ids are time-ordered UUIDv7 strings. Ids read back from storage are
/// accepted as-is as long as they are not blank.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Generate a fresh id
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wrap an existing id
    ///
    /// # Errors
    /// Returns `DomainError::InvalidId` if the id is blank
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidId(id));
        }
        Ok(Self(id))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

// =============================================================================
// ProductName
// =============================================================================

/// Product display name
///
/// # Invariants
/// - Stored trimmed
/// - 3 to 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductName(String);

impl ProductName {
    /// Parse a name as typed into the form
    ///
    /// # Errors
    /// Returns the name violation (`Empty`, `TooShort`, `TooLong`)
    pub fn parse(text: &str) -> Result<Self, FieldViolation> {
        validate_name(text)?;
        Ok(Self(text.trim().to_string()))
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ProductName {
    type Error = FieldViolation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductName> for String {
    fn from(name: ProductName) -> Self {
        name.0
    }
}

// =============================================================================
// ProductPrice
// =============================================================================

/// Product price, kept as the text the user entered
///
/// The text is what gets persisted; the parsed amount is derived from it
/// and cached for formatting and comparisons.
///
/// # Invariants
/// - Stored trimmed
/// - Parses to an amount in (0, 1_000_000]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductPrice {
    text: String,
    amount: Decimal,
}

impl ProductPrice {
    /// Parse a price as typed into the form
    ///
    /// # Errors
    /// Returns the price violation (`Empty`, `NotANumber`, `NotPositive`, `TooLarge`)
    pub fn parse(text: &str) -> Result<Self, FieldViolation> {
        let amount = parse_price(text)?;
        Ok(Self {
            text: text.trim().to_string(),
            amount,
        })
    }

    /// Get the price text as entered
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Get the parsed amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Format as US currency (e.g. `$1,234.50`)
    pub fn formatted(&self) -> String {
        format_amount(self.amount)
    }
}

impl fmt::Display for ProductPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl TryFrom<String> for ProductPrice {
    type Error = FieldViolation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductPrice> for String {
    fn from(price: ProductPrice) -> Self {
        price.text
    }
}

// =============================================================================
// ImageRef
// =============================================================================

/// Reference to a product photo (local URI or path)
///
/// Only the reference is held; the image itself is never read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageRef(String);

impl ImageRef {
    /// Wrap a picked image reference
    ///
    /// # Errors
    /// Returns the `Empty` image violation for blank references
    pub fn parse(text: &str) -> Result<Self, FieldViolation> {
        validate_image_ref(text)?;
        Ok(Self(text.to_string()))
    }

    /// Get the reference as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ImageRef {
    type Error = FieldViolation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ImageRef> for String {
    fn from(image: ImageRef) -> Self {
        image.0
    }
}

// =============================================================================
// Tests
// =============================================================================
