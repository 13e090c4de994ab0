//! The cart state container.
//!
//! The cart is device-local state: it is created empty on first use, mutated
//! by user actions, and snapshotted wholesale into the session after every
//! mutation (the snapshot write lives in the storefront crate - the
//! transitions here are pure and synchronous).
//!
//! # Invariants
//!
//! - One line per product ID; adding an existing product bumps its quantity.
//! - Quantity is never 0: an update to 0 removes the line.
//! - Lines keep insertion order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A single cart line: a product snapshot plus a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// The product this line refers to.
    pub id: ProductId,
    /// Title captured at add time.
    pub title: String,
    /// Unit price captured at add time.
    pub price: Decimal,
    /// Units in the cart. Always at least 1.
    pub quantity: u32,
    /// Image URL captured at add time.
    pub image: String,
}

/// An ordered collection of cart lines, unique by product ID.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines (the header badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Add an item to the cart.
    ///
    /// If a line with the same product ID already exists its quantity is
    /// incremented by 1 and the incoming snapshot is ignored; otherwise the
    /// item is appended as given (callers default `quantity` to 1).
    pub fn add(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|line| line.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(1);
        } else {
            self.items.push(item);
        }
    }

    /// Remove the line for `id`. No-op if absent.
    pub fn remove(&mut self, id: &ProductId) {
        self.items.retain(|line| &line.id != id);
    }

    /// Set the quantity for `id`. A quantity of 0 removes the line; an
    /// unknown ID is a no-op.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }
        if let Some(line) = self.items.iter_mut().find(|line| &line.id == id) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The exact sum of `price * quantity` over all lines, unrounded.
    ///
    /// Callers round to 2 decimals for display only.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|line| line.price * Decimal::from(line.quantity))
            .sum()
    }
}
