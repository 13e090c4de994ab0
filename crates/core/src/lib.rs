//! Comforty Core - Shared domain library.
//!
//! This crate provides the domain types and state containers used by the
//! storefront service:
//!
//! - [`types`] - Newtype IDs, catalog entities, and order types
//! - [`cart`] - The cart state container
//! - [`wishlist`] - The saved-for-later state container
//! - [`reviews`] - Per-product review collection with aggregates
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no database access, no HTTP clients. Persistence (session snapshots) and
//! the content-store client live in the storefront crate; the containers
//! here can be instantiated in isolation, which is what the unit tests do.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod reviews;
pub mod types;
pub mod wishlist;

pub use cart::{Cart, CartItem};
pub use reviews::{RatingDistribution, Review, ReviewError, ReviewSet, ReviewUpdate};
pub use types::*;
pub use wishlist::Wishlist;
