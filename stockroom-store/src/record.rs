//! Persisted product format.
//!
//! The whole collection is stored as one JSON array:
//!
//! ```text
//! [
//!   { "id": "<string>", "name": "<string>", "price": "<string-decimal>",
//!     "imageRef": "<string>", "createdAt": <integer-ms> },
//!   ...
//! ]
//! ```

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use stockroom_domain::{ImageRef, Product, ProductId, ProductName, ProductPrice};

// =============================================================================
// DTO (Data Transfer Object) for serialization
// =============================================================================

/// DTO for serializing Product to/from the stored blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Product id
    pub id: String,
    /// Trimmed display name
    pub name: String,
    /// Price text as entered
    pub price: String,
    /// Image reference (`imageRef` on disk)
    pub image_ref: String,
    /// Milliseconds since epoch
    pub created_at: i64,
}

impl ProductRecord {
    /// Convert from domain Product to DTO.
    pub fn from_domain(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.name().to_string(),
            price: product.price().to_string(),
            image_ref: product.image_ref().to_string(),
            created_at: product.created_at_millis(),
        }
    }

    /// Convert from DTO to domain Product.
    ///
    /// Every field is re-validated; a record that would not pass the form
    /// rules is rejected.
    pub fn to_domain(&self) -> Result<Product, StoreError> {
        let id = ProductId::new(self.id.clone())?;
        let invalid = |field: &str, e: &dyn std::fmt::Display| {
            StoreError::Deserialization(format!("Invalid {} for product {}: {}", field, self.id, e))
        };

        let name = ProductName::parse(&self.name).map_err(|e| invalid("name", &e))?;
        let price = ProductPrice::parse(&self.price).map_err(|e| invalid("price", &e))?;
        let image_ref = ImageRef::parse(&self.image_ref).map_err(|e| invalid("imageRef", &e))?;

        Ok(Product::restore(id, name, price, image_ref, self.created_at)?)
    }
}

/// Encode a product collection as the stored JSON array.
pub fn encode_products(products: &[Product]) -> Result<String, StoreError> {
    let records: Vec<ProductRecord> = products.iter().map(ProductRecord::from_domain).collect();
    serde_json::to_string(&records).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Decode a stored JSON array into products, preserving order.
pub fn decode_products(blob: &str) -> Result<Vec<Product>, StoreError> {
    let records: Vec<ProductRecord> = serde_json::from_str(blob)?;
    records.iter().map(ProductRecord::to_domain).collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stockroom_domain::ProductDraft;

    fn create_test_product(name: &str, price: &str) -> Product {
        Product::from_draft(&ProductDraft::new(name, price, format!("file:///{}.jpg", name))).unwrap()
    }

    #[test]
    fn test_record_field_names() {
        let product = create_test_product("Widget", "12.5");
        let value = serde_json::to_value(ProductRecord::from_domain(&product)).unwrap();

        assert_eq!(
            value,
            json!({
                "id": product.id().as_str(),
                "name": "Widget",
                "price": "12.5",
                "imageRef": "file:///Widget.jpg",
                "createdAt": product.created_at_millis(),
            })
        );
    }

    #[test]
    fn test_decode_original_blob() {
        let blob = r#"[
            {"id":"1712345678901","name":"Desk Lamp","price":"39.99",
             "imageRef":"file:///data/lamp.jpg","createdAt":1712345678901},
            {"id":"1712345678999","name":"Mug","price":"8","imageRef":"content://media/2",
             "createdAt":1712345678999}
        ]"#;

        let products = decode_products(blob).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name().as_str(), "Desk Lamp");
        assert_eq!(products[0].price().as_str(), "39.99");
        assert_eq!(products[1].id().as_str(), "1712345678999");
        assert_eq!(products[1].created_at_millis(), 1712345678999);
    }

    #[test]
    fn test_encode_preserves_order() {
        let products = vec![
            create_test_product("First", "1"),
            create_test_product("Second", "2"),
            create_test_product("Third", "3"),
        ];

        let decoded = decode_products(&encode_products(&products).unwrap()).unwrap();
        assert_eq!(decoded, products);
    }

    #[test]
    fn test_decode_empty_array() {
        assert!(decode_products("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        assert!(matches!(decode_products("not json"), Err(StoreError::Deserialization(_))));
        assert!(matches!(decode_products("{}"), Err(StoreError::Deserialization(_))));
        assert!(matches!(
            decode_products(r#"[{"id":"1","name":"Lamp"}]"#),
            Err(StoreError::Deserialization(_))
        ));
    }

    #[test]
    fn test_decode_rejects_invalid_fields() {
        let blob = json!([{
            "id": "1", "name": "ab", "price": "10", "imageRef": "x.jpg", "createdAt": 1
        }])
        .to_string();
        assert!(matches!(decode_products(&blob), Err(StoreError::Deserialization(_))));

        let blob = json!([{
            "id": "1", "name": "Lamp", "price": "-1", "imageRef": "x.jpg", "createdAt": 1
        }])
        .to_string();
        assert!(decode_products(&blob).is_err());

        let blob = json!([{
            "id": "", "name": "Lamp", "price": "1", "imageRef": "x.jpg", "createdAt": 1
        }])
        .to_string();
        assert!(matches!(decode_products(&blob), Err(StoreError::Domain(_))));
    }
}
