//! Field validation for product forms
//!
//! Pure checks for the three user-editable product fields. Every check
//! returns either `Ok(())` or the specific reason the text was rejected.
//! A form is checked with [`ProductDraft::validate`], which runs all three
//! checks so every field error can be shown at once.

use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::value_objects::{ImageRef, ProductName, ProductPrice};

/// Minimum product name length (characters, after trimming)
pub const NAME_MIN_CHARS: usize = 3;

/// Maximum product name length (characters, after trimming)
pub const NAME_MAX_CHARS: usize = 50;

/// Largest accepted price (inclusive)
pub const PRICE_MAX: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

// =============================================================================
// Violations
// =============================================================================

/// Product form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Product name
    Name,
    /// Product price
    Price,
    /// Product image reference
    ImageRef,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::Price => write!(f, "price"),
            Field::ImageRef => write!(f, "image"),
        }
    }
}

/// Reason a field value was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldError {
    /// Blank after trimming
    Empty,
    /// Shorter than the minimum length
    TooShort,
    /// Longer than the maximum length
    TooLong,
    /// Not a decimal literal
    NotANumber,
    /// Zero or negative
    NotPositive,
    /// Above the maximum amount
    TooLarge,
}

impl FieldError {
    /// Stable code for this error (e.g. `TOO_SHORT`)
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::Empty => "EMPTY",
            FieldError::TooShort => "TOO_SHORT",
            FieldError::TooLong => "TOO_LONG",
            FieldError::NotANumber => "NOT_A_NUMBER",
            FieldError::NotPositive => "NOT_POSITIVE",
            FieldError::TooLarge => "TOO_LARGE",
        }
    }
}

/// A rejected field together with the reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldViolation {
    /// Which field was rejected
    pub field: Field,
    /// Why it was rejected
    pub error: FieldError,
}

impl FieldViolation {
    /// Create a violation for a field
    pub fn new(field: Field, error: FieldError) -> Self {
        Self { field, error }
    }

    /// Human-readable message shown next to the form field
    pub fn message(&self) -> &'static str {
        match (self.field, self.error) {
            (Field::Name, FieldError::Empty) => "Product name is required",
            (Field::Name, FieldError::TooShort) => "Product name must be at least 3 characters",
            (Field::Name, FieldError::TooLong) => "Product name must be less than 50 characters",
            (Field::Price, FieldError::Empty) => "Product price is required",
            (Field::Price, FieldError::NotANumber) => "Please enter a valid number",
            (Field::Price, FieldError::NotPositive) => "Price must be greater than 0",
            (Field::Price, FieldError::TooLarge) => "Price must be less than 1,000,000",
            (Field::ImageRef, FieldError::Empty) => "Product image is required",
            (_, FieldError::Empty) => "Value is required",
            (_, _) => "Invalid value",
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FieldViolation {}

// =============================================================================
// Field checks
// =============================================================================

/// Check a product name.
///
/// # Examples
/// ```
/// # use stockroom_domain::validation::{validate_name, FieldError};
/// assert!(validate_name("  Widget  ").is_ok());
/// assert_eq!(validate_name("ab").unwrap_err().error, FieldError::TooShort);
/// ```
pub fn validate_name(text: &str) -> Result<(), FieldViolation> {
    let trimmed = text.trim();
    let chars = trimmed.chars().count();
    let reject = |error| Err(FieldViolation::new(Field::Name, error));

    if chars == 0 {
        return reject(FieldError::Empty);
    }
    if chars < NAME_MIN_CHARS {
        return reject(FieldError::TooShort);
    }
    if chars > NAME_MAX_CHARS {
        return reject(FieldError::TooLong);
    }
    Ok(())
}

/// Check a product price.
pub fn validate_price(text: &str) -> Result<(), FieldViolation> {
    parse_price(text).map(|_| ())
}

/// Check a product image reference.
pub fn validate_image_ref(text: &str) -> Result<(), FieldViolation> {
    if text.trim().is_empty() {
        return Err(FieldViolation::new(Field::ImageRef, FieldError::Empty));
    }
    Ok(())
}

/// Smallest positive amount a price can hold
const PRICE_MIN_POSITIVE: Decimal = Decimal::from_parts(1, 0, 0, false, 28);

/// Parse a price, applying the same rules as [`validate_price`].
///
/// Plain decimal literals (`12.5`, `-3`) and scientific notation
/// (`1e3`) are accepted. Trailing garbage (`12abc`) and digit
/// separators (`1_000`) are not. Numbers too large or too small for
/// `Decimal` are still judged by sign and magnitude; a positive value
/// below its precision keeps the smallest positive amount.
pub(crate) fn parse_price(text: &str) -> Result<Decimal, FieldViolation> {
    let trimmed = text.trim();
    let reject = |error| Err(FieldViolation::new(Field::Price, error));

    if trimmed.is_empty() {
        return reject(FieldError::Empty);
    }

    let decimal = parse_decimal(trimmed);
    let amount = match decimal {
        Some(amount) if !amount.is_zero() => amount,
        _ => {
            let Some(value) = parse_float(trimmed) else {
                return reject(match decimal {
                    Some(_) => FieldError::NotPositive,
                    None => FieldError::NotANumber,
                });
            };
            if value <= 0.0 {
                return reject(FieldError::NotPositive);
            }
            if value > 1_000_000.0 {
                return reject(FieldError::TooLarge);
            }
            Decimal::try_from(value)
                .ok()
                .filter(|d| d.is_sign_positive() && !d.is_zero())
                .unwrap_or(PRICE_MIN_POSITIVE)
        },
    };

    if amount <= Decimal::ZERO {
        return reject(FieldError::NotPositive);
    }
    if amount > PRICE_MAX {
        return reject(FieldError::TooLarge);
    }
    Ok(amount)
}

/// Parse a decimal literal that fits in `Decimal`.
pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.contains('_') {
        return None;
    }
    Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text)).ok()
}

/// Parse a decimal literal of any magnitude as `f64`.
///
/// Overflow saturates to infinity; the words `inf`, `infinity` and `nan`
/// are not numbers here.
pub(crate) fn parse_float(text: &str) -> Option<f64> {
    let unsigned = text.trim_start_matches(['+', '-']);
    if text.contains('_') || unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| !v.is_nan())
}

// =============================================================================
// Draft (form submission)
// =============================================================================

/// Raw form input for creating or editing a product
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    /// Name as typed
    pub name: String,
    /// Price as typed
    pub price: String,
    /// Image reference as picked
    pub image_ref: String,
}

/// Parsed fields of a valid draft
pub type DraftFields = (ProductName, ProductPrice, ImageRef);

impl ProductDraft {
    /// Create a draft from raw form values
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            image_ref: image_ref.into(),
        }
    }

    /// Run every field check and collect the results.
    pub fn validate(&self) -> DraftErrors {
        DraftErrors {
            name: validate_name(&self.name).err(),
            price: validate_price(&self.price).err(),
            image_ref: validate_image_ref(&self.image_ref).err(),
        }
    }

    /// Parse the draft into validated field values.
    ///
    /// # Errors
    /// Returns the full [`DraftErrors`] report if any field is invalid.
    pub fn parse(&self) -> Result<DraftFields, DraftErrors> {
        match (
            ProductName::parse(&self.name),
            ProductPrice::parse(&self.price),
            ImageRef::parse(&self.image_ref),
        ) {
            (Ok(name), Ok(price), Ok(image_ref)) => Ok((name, price, image_ref)),
            (name, price, image_ref) => Err(DraftErrors {
                name: name.err(),
                price: price.err(),
                image_ref: image_ref.err(),
            }),
        }
    }
}

/// Per-field validation report for a draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftErrors {
    /// Name violation, if any
    pub name: Option<FieldViolation>,
    /// Price violation, if any
    pub price: Option<FieldViolation>,
    /// Image violation, if any
    pub image_ref: Option<FieldViolation>,
}

impl DraftErrors {
    /// True when every field passed
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.image_ref.is_none()
    }

    /// Iterate over the violations in form order
    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        [&self.name, &self.price, &self.image_ref].into_iter().flatten()
    }

    /// Violation for a given field
    pub fn get(&self, field: Field) -> Option<&FieldViolation> {
        match field {
            Field::Name => self.name.as_ref(),
            Field::Price => self.price.as_ref(),
            Field::ImageRef => self.image_ref.as_ref(),
        }
    }
}

impl fmt::Display for DraftErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = self.iter().map(|v| format!("{}: {}", v.field, v.message())).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for DraftErrors {}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn name_error(text: &str) -> Option<FieldError> {
        validate_name(text).err().map(|v| v.error)
    }

    fn price_error(text: &str) -> Option<FieldError> {
        validate_price(text).err().map(|v| v.error)
    }

    #[test]
    fn test_name_rules() {
        assert_eq!(name_error(""), Some(FieldError::Empty));
        assert_eq!(name_error("   "), Some(FieldError::Empty));
        assert_eq!(name_error("ab"), Some(FieldError::TooShort));
        assert_eq!(name_error(" ab "), Some(FieldError::TooShort));
        assert_eq!(name_error("abc"), None);
        assert_eq!(name_error("  Widget  "), None);
        assert_eq!(name_error(&"x".repeat(50)), None);
        assert_eq!(name_error(&"x".repeat(51)), Some(FieldError::TooLong));
    }

    #[test]
    fn test_name_length_counts_characters() {
        // 3 characters, 9 bytes
        assert_eq!(name_error("日本語"), None);
        assert_eq!(name_error(&"é".repeat(50)), None);
    }

    #[test]
    fn test_price_rules() {
        assert_eq!(price_error(""), Some(FieldError::Empty));
        assert_eq!(price_error("  "), Some(FieldError::Empty));
        assert_eq!(price_error("abc"), Some(FieldError::NotANumber));
        assert_eq!(price_error("12abc"), Some(FieldError::NotANumber));
        assert_eq!(price_error("0"), Some(FieldError::NotPositive));
        assert_eq!(price_error("-5"), Some(FieldError::NotPositive));
        assert_eq!(price_error("12.5"), None);
        assert_eq!(price_error(" 12.5 "), None);
        assert_eq!(price_error("1000000"), None);
        assert_eq!(price_error("1000000.01"), Some(FieldError::TooLarge));
        assert_eq!(price_error("1_000"), Some(FieldError::NotANumber));
        assert_eq!(price_error("inf"), Some(FieldError::NotANumber));
        assert_eq!(price_error("-NaN"), Some(FieldError::NotANumber));
    }

    #[test]
    fn test_price_beyond_decimal_range() {
        assert_eq!(price_error("100000000000000000000000000000"), Some(FieldError::TooLarge));
        assert_eq!(price_error("1e400"), Some(FieldError::TooLarge));
        assert_eq!(price_error("-1e400"), Some(FieldError::NotPositive));
        assert_eq!(price_error("-0.00000000000000000000000000001"), Some(FieldError::NotPositive));
        assert_eq!(price_error("-0"), Some(FieldError::NotPositive));

        let tiny = parse_price("0.00000000000000000000000000001").unwrap();
        assert!(tiny > Decimal::ZERO);
        assert!(parse_price("1e-40").unwrap() > Decimal::ZERO);
    }

    #[test]
    fn test_price_scientific_notation() {
        assert_eq!(parse_price("1e3").unwrap(), dec!(1000));
        assert_eq!(price_error("1e7"), Some(FieldError::TooLarge));
    }

    #[test]
    fn test_image_ref_rules() {
        assert_eq!(validate_image_ref("").unwrap_err().error, FieldError::Empty);
        assert_eq!(validate_image_ref(" \t").unwrap_err().error, FieldError::Empty);
        assert!(validate_image_ref("file:///photos/1.jpg").is_ok());
    }

    #[test]
    fn test_violation_messages() {
        let v = validate_name("ab").unwrap_err();
        assert_eq!(v.to_string(), "Product name must be at least 3 characters");
        assert_eq!(v.error.code(), "TOO_SHORT");

        let v = validate_price("abc").unwrap_err();
        assert_eq!(v.to_string(), "Please enter a valid number");

        let v = validate_image_ref("").unwrap_err();
        assert_eq!(v.to_string(), "Product image is required");
    }

    #[test]
    fn test_draft_reports_every_field() {
        let draft = ProductDraft::new("ab", "0", "");
        let errors = draft.validate();

        assert!(!errors.is_empty());
        assert_eq!(errors.iter().count(), 3);
        assert_eq!(errors.get(Field::Name).unwrap().error, FieldError::TooShort);
        assert_eq!(errors.get(Field::Price).unwrap().error, FieldError::NotPositive);
        assert_eq!(errors.get(Field::ImageRef).unwrap().error, FieldError::Empty);
    }

    #[test]
    fn test_draft_parse_matches_validate() {
        let draft = ProductDraft::new("Widget", "abc", "img.png");
        let errors = draft.parse().unwrap_err();
        assert_eq!(errors, draft.validate());
        assert!(errors.name.is_none());
        assert!(errors.image_ref.is_none());
        assert_eq!(errors.to_string(), "price: Please enter a valid number");
    }

    #[test]
    fn test_draft_parse_valid() {
        let draft = ProductDraft::new("  Widget  ", " 12.50 ", "img.png");
        assert!(draft.validate().is_empty());

        let (name, price, image_ref) = draft.parse().unwrap();
        assert_eq!(name.as_str(), "Widget");
        assert_eq!(price.as_str(), "12.50");
        assert_eq!(price.amount(), dec!(12.5));
        assert_eq!(image_ref.as_str(), "img.png");
    }
}
