//! Domain Entities for Stockroom
//!
//! A product has identity (`id`) and an audit timestamp (`created_at`), both
//! fixed at creation. The editable fields are validated value objects.

use crate::validation::{DraftErrors, ProductDraft};
use crate::value_objects::{DomainError, ImageRef, ProductId, ProductName, ProductPrice};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// Product in the inventory
///
/// Every field is valid by construction. `id` and `created_at` cannot change
/// after creation; edits go through [`Product::revise`], which keeps both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: ProductName,
    price: ProductPrice,
    image_ref: ImageRef,
    created_at: DateTime<Utc>,
}

impl Product {
    /// Create a new product with a fresh id, stamped now
    pub fn new(name: ProductName, price: ProductPrice, image_ref: ImageRef) -> Self {
        Self {
            id: ProductId::generate(),
            name,
            price,
            image_ref,
            created_at: now_millis(),
        }
    }

    /// Create a new product from a submitted form
    ///
    /// # Errors
    /// Returns every field violation in the draft
    pub fn from_draft(draft: &ProductDraft) -> Result<Self, DraftErrors> {
        let (name, price, image_ref) = draft.parse()?;
        Ok(Self::new(name, price, image_ref))
    }

    /// Rebuild a product from stored parts
    ///
    /// # Errors
    /// Returns `DomainError::InvalidTimestamp` if `created_at_ms` is out of range
    pub fn restore(
        id: ProductId,
        name: ProductName,
        price: ProductPrice,
        image_ref: ImageRef,
        created_at_ms: i64,
    ) -> Result<Self, DomainError> {
        let created_at = DateTime::from_timestamp_millis(created_at_ms)
            .ok_or(DomainError::InvalidTimestamp(created_at_ms))?;

        Ok(Self {
            id,
            name,
            price,
            image_ref,
            created_at,
        })
    }

    /// Apply an edit form, keeping identity and creation time
    ///
    /// # Errors
    /// Returns every field violation in the draft
    pub fn revise(&self, draft: &ProductDraft) -> Result<Self, DraftErrors> {
        let (name, price, image_ref) = draft.parse()?;
        Ok(Self {
            id: self.id.clone(),
            name,
            price,
            image_ref,
            created_at: self.created_at,
        })
    }

    /// Prefill an edit form with the current values
    pub fn to_draft(&self) -> ProductDraft {
        ProductDraft::new(self.name.as_str(), self.price.as_str(), self.image_ref.as_str())
    }

    /// Product id
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    /// Product name
    pub fn name(&self) -> &ProductName {
        &self.name
    }

    /// Product price
    pub fn price(&self) -> &ProductPrice {
        &self.price
    }

    /// Product image reference
    pub fn image_ref(&self) -> &ImageRef {
        &self.image_ref
    }

    /// Creation time
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Creation time in milliseconds since epoch
    pub fn created_at_millis(&self) -> i64 {
        self.created_at.timestamp_millis()
    }
}

/// Current time truncated to whole milliseconds, the resolution we persist.
fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

// =============================================================================
// Tests
// =============================================================================
