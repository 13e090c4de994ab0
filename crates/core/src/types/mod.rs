//! Core types for Comforty.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod order;
pub mod product;

pub use id::*;
pub use order::{Order, OrderItem, OrderStatus, ShippingAddress};
pub use product::{Category, CategoryRef, Product};
