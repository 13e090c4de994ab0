//! Integration tests for Comforty.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and the storefront
//! docker compose up -d postgres
//! cargo run -p comforty-storefront
//!
//! # Run integration tests
//! cargo test -p comforty-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_catalog` - Catalog read endpoints
//! - `storefront_cart` - Cart and wishlist session state
//! - `storefront_checkout` - Checkout flow

/// Base URL for the storefront API (configurable via environment).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("COMFORTY_TEST_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create a client with a cookie store, so session state persists across
/// requests the way a browser would carry it.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn session_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
