//! The product record and its request payloads.

use serde::{Deserialize, Serialize};

/// A sellable item in the catalog.
///
/// `id` is unique within the store at all times: seed records use fixed ids,
/// created records get a server-generated uuid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

/// Payload for `POST /api/products`. The store assigns the id.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

/// Payload for `PUT /api/products/{id}`.
///
/// Every field is optional: absent fields leave the stored value untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

impl Product {
    /// Applies a patch in place, field by field.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
    }

    /// The three records every fresh store starts with.
    pub fn seed() -> Vec<Product> {
        vec![
            Product {
                id: "1".into(),
                name: "Laptop".into(),
                description: "High-performance laptop with 16GB RAM".into(),
                price: 1200.0,
                category: "electronics".into(),
                in_stock: true,
            },
            Product {
                id: "2".into(),
                name: "Smartphone".into(),
                description: "Latest model with 128GB storage".into(),
                price: 800.0,
                category: "electronics".into(),
                in_stock: true,
            },
            Product {
                id: "3".into(),
                name: "Coffee Maker".into(),
                description: "Programmable coffee maker with timer".into(),
                price: 50.0,
                category: "kitchen".into(),
                in_stock: false,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_stock_serializes_camel_case() {
        let json = serde_json::to_value(&Product::seed()[0]).unwrap();
        assert_eq!(json["inStock"], true);
        assert!(json.get("in_stock").is_none());
    }

    #[test]
    fn new_product_defaults_in_stock() {
        let new: NewProduct = serde_json::from_str(
            r#"{"name":"Kettle","description":"Electric kettle","price":25,"category":"kitchen"}"#,
        )
        .unwrap();
        assert!(new.in_stock);
    }

    #[test]
    fn patch_preserves_absent_fields() {
        let mut product = Product::seed()[0].clone();
        let patch: ProductPatch = serde_json::from_str(r#"{"price":999}"#).unwrap();
        product.apply(patch);
        assert_eq!(product.price, 999.0);
        assert_eq!(product.name, "Laptop");
        assert_eq!(product.category, "electronics");
        assert!(product.in_stock);
    }
}
