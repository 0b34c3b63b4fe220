//! Wishlist state container.
//!
//! An ordered set of products, unique by identifier. Every mutating call
//! persists the resulting list under [`WISHLIST_KEY`].

use std::collections::HashSet;

use boutique_core::{Product, ProductId};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::storage::{Storage, WISHLIST_KEY};

/// Result of [`Wishlist::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WishlistToggle {
    Added,
    Removed,
}

/// Wishlist state container.
#[derive(Debug)]
pub struct Wishlist {
    entries: watch::Sender<Vec<Product>>,
    storage: Storage,
}

impl Wishlist {
    /// Create a wishlist hydrated from `storage`.
    ///
    /// A missing, empty or unreadable stored list starts an empty wishlist.
    /// Duplicate identifiers in stored data keep their first occurrence.
    #[must_use]
    pub fn hydrate(storage: Storage) -> Self {
        let stored: Vec<Product> = storage.get(WISHLIST_KEY, Vec::new());
        let mut seen = HashSet::new();
        let entries: Vec<Product> = stored
            .into_iter()
            .filter(|product| seen.insert(product.id))
            .collect();
        tracing::debug!(entries = entries.len(), "Hydrated wishlist");

        let (entries, _) = watch::channel(entries);
        Self { entries, storage }
    }

    /// Append `product` unless its identifier is already present.
    pub fn add(&self, product: Product) {
        self.mutate(|entries| {
            if entries.iter().any(|entry| entry.id == product.id) {
                return false;
            }
            entries.push(product);
            true
        });
    }

    /// Remove the product with `product_id`, if present.
    pub fn remove(&self, product_id: ProductId) {
        self.mutate(|entries| {
            let before = entries.len();
            entries.retain(|entry| entry.id != product_id);
            entries.len() != before
        });
    }

    /// Remove `product` if present, otherwise append it.
    ///
    /// The membership check and the write happen under one lock, so the
    /// returned outcome always describes the change that was made.
    pub fn toggle(&self, product: Product) -> WishlistToggle {
        let mut outcome = WishlistToggle::Added;
        self.mutate(|entries| {
            if let Some(index) = entries.iter().position(|entry| entry.id == product.id) {
                entries.remove(index);
                outcome = WishlistToggle::Removed;
            } else {
                entries.push(product);
            }
            true
        });
        outcome
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.entries.borrow().iter().any(|entry| entry.id == product_id)
    }

    /// Remove every product.
    pub fn clear(&self) {
        self.mutate(|entries| {
            let changed = !entries.is_empty();
            entries.clear();
            changed
        });
    }

    /// Snapshot of the wishlist in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<Product> {
        self.entries.borrow().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Subscribe to wishlist changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.entries.subscribe()
    }

    /// Apply `change` and persist the result while still holding the lock,
    /// so stored snapshots follow mutation order.
    fn mutate(&self, change: impl FnOnce(&mut Vec<Product>) -> bool) {
        let storage = &self.storage;
        self.entries.send_if_modified(|entries| {
            let changed = change(entries);
            storage.set(WISHLIST_KEY, &*entries);
            changed
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use boutique_core::Price;

    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn product(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(1000).unwrap(),
            image: format!("https://example.com/{id}.jpg"),
            category: "jewelery".to_string(),
            description: None,
        }
    }

    fn ids(wishlist: &Wishlist) -> Vec<i32> {
        wishlist.entries().iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_add_preserves_order_and_ignores_duplicates() {
        let wishlist = Wishlist::hydrate(Storage::new(MemoryStore::new()));
        wishlist.add(product(2));
        wishlist.add(product(1));
        wishlist.add(product(2));
        assert_eq!(ids(&wishlist), vec![2, 1]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let wishlist = Wishlist::hydrate(Storage::new(MemoryStore::new()));
        wishlist.add(product(1));
        wishlist.remove(ProductId::new(99));
        assert_eq!(ids(&wishlist), vec![1]);

        wishlist.remove(ProductId::new(1));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_toggle_reports_outcome() {
        let wishlist = Wishlist::hydrate(Storage::new(MemoryStore::new()));
        assert_eq!(wishlist.toggle(product(5)), WishlistToggle::Added);
        assert!(wishlist.contains(ProductId::new(5)));
        assert_eq!(wishlist.toggle(product(5)), WishlistToggle::Removed);
        assert!(!wishlist.contains(ProductId::new(5)));
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let wishlist = Wishlist::hydrate(Storage::new(MemoryStore::new()));
        wishlist.add(product(1));
        wishlist.add(product(2));

        wishlist.toggle(product(3));
        wishlist.toggle(product(3));
        assert_eq!(ids(&wishlist), vec![1, 2]);

        wishlist.toggle(product(1));
        wishlist.toggle(product(1));
        assert!(wishlist.contains(ProductId::new(1)));
        assert_eq!(wishlist.len(), 2);
    }

    #[test]
    fn test_clear() {
        let wishlist = Wishlist::hydrate(Storage::new(MemoryStore::new()));
        wishlist.add(product(1));
        wishlist.add(product(2));
        wishlist.clear();
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_persists_and_rehydrates() {
        let storage = Storage::new(MemoryStore::new());
        {
            let wishlist = Wishlist::hydrate(storage.clone());
            wishlist.add(product(3));
            wishlist.add(product(1));
            wishlist.add(product(2));
            wishlist.remove(ProductId::new(1));
        }

        let rehydrated = Wishlist::hydrate(storage);
        assert_eq!(ids(&rehydrated), vec![3, 2]);
        assert_eq!(rehydrated.entries()[0], product(3));
    }

    #[test]
    fn test_clear_persists_empty_list() {
        let storage = Storage::new(MemoryStore::new());
        let wishlist = Wishlist::hydrate(storage.clone());
        wishlist.add(product(1));
        wishlist.clear();

        assert!(Wishlist::hydrate(storage).is_empty());
    }

    #[test]
    fn test_hydrate_drops_duplicate_ids() {
        let store = MemoryStore::new();
        let raw = serde_json::to_string(&vec![product(1), product(2), product(1)]).unwrap();
        store.set_item(WISHLIST_KEY, &raw).unwrap();

        let wishlist = Wishlist::hydrate(Storage::new(store));
        assert_eq!(ids(&wishlist), vec![1, 2]);
    }

    #[test]
    fn test_hydrate_from_corrupt_storage_starts_empty() {
        let store = MemoryStore::new();
        store.set_item(WISHLIST_KEY, "not json").unwrap();
        let wishlist = Wishlist::hydrate(Storage::new(store));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_works_without_storage() {
        let wishlist = Wishlist::hydrate(Storage::unavailable());
        assert_eq!(wishlist.toggle(product(1)), WishlistToggle::Added);
        assert_eq!(ids(&wishlist), vec![1]);
    }
}
