//! The saved-for-later state container.
//!
//! Wishlist entries are product snapshots captured at add time, not live
//! references: a later price change in the catalog does not retroactively
//! update an entry. Like the cart, the wishlist is device-local and is
//! snapshotted into the session after every mutation.

use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// An ordered set of saved products, deduplicated by product ID.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    entries: Vec<Product>,
}

impl Wishlist {
    /// Create an empty wishlist.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The saved snapshots in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    /// Whether the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of saved products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Save a product snapshot. Idempotent: a product that is already saved
    /// is left untouched, keeping the original snapshot.
    pub fn add(&mut self, product: Product) {
        if !self.contains(&product.id) {
            self.entries.push(product);
        }
    }

    /// Remove the entry for `id`. No-op if absent.
    pub fn remove(&mut self, id: &ProductId) {
        self.entries.retain(|entry| &entry.id != id);
    }

    /// Membership test by product ID.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.iter().any(|entry| &entry.id == id)
    }

    /// Empty the wishlist.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Decimal::from(price),
            old_price: None,
            image: format!("https://cdn.example.com/{id}.png"),
            description: String::new(),
            status: None,
            inventory: 5,
            tags: Vec::new(),
            category: None,
        }
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut wishlist = Wishlist::new();
        wishlist.add(product("a", 20));
        wishlist.add(product("a", 20));
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_add_keeps_original_snapshot() {
        let mut wishlist = Wishlist::new();
        wishlist.add(product("a", 20));
        // Re-adding with a different price must not replace the snapshot.
        wishlist.add(product("a", 99));
        assert_eq!(wishlist.entries()[0].price, Decimal::from(20));
    }

    #[test]
    fn test_contains_and_remove() {
        let mut wishlist = Wishlist::new();
        wishlist.add(product("a", 20));
        assert!(wishlist.contains(&ProductId::new("a")));

        wishlist.remove(&ProductId::new("a"));
        assert!(!wishlist.contains(&ProductId::new("a")));

        // Removing again is a no-op, not an error.
        wishlist.remove(&ProductId::new("a"));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut wishlist = Wishlist::new();
        wishlist.add(product("a", 20));
        wishlist.add(product("b", 10));
        wishlist.clear();
        assert!(wishlist.is_empty());
    }
}
