//! Catalog entities exposed by the content store.
//!
//! These types are read-only from the storefront's perspective: the content
//! store owns them and the catalog client deserializes them straight from
//! query projections, so the serde field names match the projection keys.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};

/// A product document from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Content-store document ID.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Current price.
    pub price: Decimal,
    /// Pre-discount price, when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Decimal>,
    /// Resolved image URL.
    pub image: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Merchandising badge ("New", "Sale"), when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Units in stock.
    #[serde(default)]
    pub inventory: i64,
    /// Free-form tags ("featured" marks home-page products).
    #[serde(default)]
    pub tags: Vec<String>,
    /// Resolved category reference, when assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
}

impl Product {
    /// Whether the product carries the `featured` tag.
    #[must_use]
    pub fn is_featured(&self) -> bool {
        self.tags.iter().any(|t| t == "featured")
    }
}

/// A category as dereferenced inside a product projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    /// Content-store document ID.
    #[serde(rename = "_id")]
    pub id: CategoryId,
    /// Display title.
    pub title: String,
}

/// A category document from the catalog.
///
/// `products` is the count of products referencing the category, computed
/// by the query projection rather than stored on the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Content-store document ID.
    #[serde(rename = "_id")]
    pub id: CategoryId,
    /// Display title.
    pub title: String,
    /// Resolved image URL.
    pub image: String,
    /// Number of products referencing this category.
    #[serde(default)]
    pub products: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product_json() -> &'static str {
        r#"{
            "_id": "prod-1",
            "title": "Library Stool Chair",
            "price": "20",
            "oldPrice": "30",
            "image": "https://cdn.example.com/chair.png",
            "description": "A sturdy stool chair.",
            "status": "New",
            "inventory": 12,
            "tags": ["featured"],
            "category": { "_id": "cat-1", "title": "Chairs" }
        }"#
    }

    #[test]
    fn test_product_deserializes_projection_keys() {
        let product: Product = serde_json::from_str(sample_product_json()).expect("deserialize");
        assert_eq!(product.id.as_str(), "prod-1");
        assert_eq!(product.old_price, Some(Decimal::from(30)));
        assert!(product.is_featured());
        assert_eq!(
            product.category.as_ref().map(|c| c.title.as_str()),
            Some("Chairs")
        );
    }

    #[test]
    fn test_product_optional_fields_default() {
        let json = r#"{
            "_id": "prod-2",
            "title": "Bare Product",
            "price": "5",
            "image": "https://cdn.example.com/bare.png"
        }"#;
        let product: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(product.old_price, None);
        assert_eq!(product.status, None);
        assert!(product.tags.is_empty());
        assert!(!product.is_featured());
        assert_eq!(product.inventory, 0);
    }
}
