//! Catalog products.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Category key that matches every product.
pub const ALL_CATEGORIES: &str = "all";

/// A catalog product.
///
/// Products are supplied by the catalog document and never mutated by the
/// storefront; carts and wishlists store copies of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Image URI.
    pub image: String,
    /// Category key, e.g. `"electronics"`.
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Whether this product belongs to the given category key.
    ///
    /// The [`ALL_CATEGORIES`] key matches every product.
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        category == ALL_CATEGORIES || self.category == category
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn backpack() -> Product {
        Product {
            id: ProductId::new(1),
            title: "Fjallraven Backpack".to_string(),
            price: Price::from_cents(10995).unwrap(),
            image: "https://example.com/backpack.jpg".to_string(),
            category: "men clothing".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_in_category() {
        let product = backpack();
        assert!(product.in_category("men clothing"));
        assert!(product.in_category(ALL_CATEGORIES));
        assert!(!product.in_category("electronics"));
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let json = r#"{
            "id": 3,
            "title": "Mens Cotton Jacket",
            "price": 55.99,
            "image": "https://example.com/jacket.jpg",
            "category": "men clothing",
            "rating": {"rate": 4.7, "count": 500}
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price, Price::from_cents(5599).unwrap());
        assert!(product.description.is_none());
    }

    #[test]
    fn test_serialize_omits_missing_description() {
        let json = serde_json::to_value(backpack()).unwrap();
        assert!(json.get("description").is_none());
        assert_eq!(json["price"], "109.95");
    }
}
