//! The in-memory product store.
//!
//! An ordered sequence of products behind a `RwLock`. Every operation is a
//! linear scan; insertion order is preserved so listings are stable. Nothing
//! survives a restart. The lock exists for memory safety across connection
//! tasks, not to provide transactional behavior.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

use crate::product::{NewProduct, Product, ProductPatch};

/// One page of a (possibly filtered) listing.
#[derive(Debug, Serialize)]
pub struct Page {
    pub page: usize,
    pub limit: usize,
    /// Count of all records matching the filter, not just this page.
    pub total: usize,
    pub products: Vec<Product>,
}

/// Owned product collection, shared across handlers via [`AppState`](crate::AppState).
pub struct ProductStore {
    products: RwLock<Vec<Product>>,
}

impl ProductStore {
    /// A store pre-loaded with the three seed records.
    pub fn seeded() -> Self {
        Self { products: RwLock::new(Product::seed()) }
    }

    pub fn empty() -> Self {
        Self { products: RwLock::new(Vec::new()) }
    }

    /// One page of products, optionally filtered by category
    /// (case-insensitive exact match). `page` is 1-indexed.
    pub fn page(&self, category: Option<&str>, page: usize, limit: usize) -> Page {
        let products = self.products.read();
        let filtered: Vec<&Product> = match category {
            Some(cat) => products
                .iter()
                .filter(|p| p.category.eq_ignore_ascii_case(cat))
                .collect(),
            None => products.iter().collect(),
        };

        let total = filtered.len();
        let start = (page - 1).saturating_mul(limit).min(total);
        let end = start.saturating_add(limit).min(total);

        Page {
            page,
            limit,
            total,
            products: filtered[start..end].iter().map(|p| (*p).clone()).collect(),
        }
    }

    /// Case-insensitive substring match on product names.
    pub fn search(&self, needle: &str) -> Vec<Product> {
        let needle = needle.to_lowercase();
        self.products
            .read()
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Count of products per category across the whole collection.
    pub fn stats(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for product in self.products.read().iter() {
            *counts.entry(product.category.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn get(&self, id: &str) -> Option<Product> {
        self.products.read().iter().find(|p| p.id == id).cloned()
    }

    /// Appends a new record with a freshly generated id and returns it.
    pub fn insert(&self, new: NewProduct) -> Product {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            description: new.description,
            price: new.price,
            category: new.category,
            in_stock: new.in_stock,
        };
        self.products.write().push(product.clone());
        product
    }

    /// Overwrites the fields present in `patch`, preserving the rest.
    /// Returns the updated record, or `None` if the id is unknown.
    pub fn update(&self, id: &str, patch: ProductPatch) -> Option<Product> {
        let mut products = self.products.write();
        let product = products.iter_mut().find(|p| p.id == id)?;
        product.apply(patch);
        Some(product.clone())
    }

    /// Removes the record with `id`. Returns whether anything was removed.
    pub fn remove(&self, id: &str) -> bool {
        let mut products = self.products.write();
        let before = products.len();
        products.retain(|p| p.id != id);
        products.len() < before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str, category: &str) -> NewProduct {
        NewProduct {
            name: name.into(),
            description: format!("{name} description"),
            price: 10.0,
            category: category.into(),
            in_stock: true,
        }
    }

    #[test]
    fn seeded_store_has_three_records() {
        let store = ProductStore::seeded();
        assert_eq!(store.page(None, 1, 10).total, 3);
        assert_eq!(store.get("2").unwrap().name, "Smartphone");
    }

    #[test]
    fn insert_generates_unique_ids() {
        let store = ProductStore::seeded();
        let a = store.insert(new_product("Kettle", "kitchen"));
        let b = store.insert(new_product("Toaster", "kitchen"));
        assert_ne!(a.id, b.id);
        assert!(!["1", "2", "3"].contains(&a.id.as_str()));
        assert_eq!(store.page(None, 1, 10).total, 5);
    }

    #[test]
    fn category_filter_is_case_insensitive_exact() {
        let store = ProductStore::seeded();
        let page = store.page(Some("KITCHEN"), 1, 10);
        assert_eq!(page.total, 1);
        assert_eq!(page.products[0].name, "Coffee Maker");

        // substring of a category must not match
        assert_eq!(store.page(Some("kitch"), 1, 10).total, 0);
    }

    #[test]
    fn pagination_slices_and_clamps() {
        let store = ProductStore::seeded();

        let first = store.page(None, 1, 2);
        assert_eq!(first.products.len(), 2);
        assert_eq!(first.total, 3);
        assert_eq!(first.products[0].id, "1");

        let second = store.page(None, 2, 2);
        assert_eq!(second.products.len(), 1);
        assert_eq!(second.products[0].id, "3");

        // past the end: empty page, same total
        let far = store.page(None, 9, 2);
        assert!(far.products.is_empty());
        assert_eq!(far.total, 3);
    }

    #[test]
    fn search_matches_substring_case_insensitively() {
        let store = ProductStore::seeded();
        let hits = store.search("lap");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Laptop");

        assert!(store.search("COFFEE").iter().any(|p| p.id == "3"));
        assert!(store.search("nothing-here").is_empty());
    }

    #[test]
    fn stats_counts_per_category() {
        let store = ProductStore::seeded();
        let stats = store.stats();
        assert_eq!(stats["electronics"], 2);
        assert_eq!(stats["kitchen"], 1);
        assert_eq!(stats.len(), 2);
    }

    #[test]
    fn update_overwrites_only_patched_fields() {
        let store = ProductStore::seeded();
        let patch = ProductPatch { price: Some(999.0), ..Default::default() };
        let updated = store.update("1", patch).unwrap();
        assert_eq!(updated.price, 999.0);
        assert_eq!(updated.name, "Laptop");
        assert_eq!(updated.description, "High-performance laptop with 16GB RAM");

        assert!(store.update("missing", ProductPatch::default()).is_none());
    }

    #[test]
    fn remove_deletes_exactly_one_record() {
        let store = ProductStore::seeded();
        assert!(store.remove("2"));
        assert!(store.get("2").is_none());
        assert_eq!(store.page(None, 1, 10).total, 2);

        assert!(!store.remove("2"));
    }
}
