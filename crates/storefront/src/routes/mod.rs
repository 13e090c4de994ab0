//! HTTP route handlers for the storefront JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (database ping)
//!
//! # Catalog
//! GET  /products                      - Product listing
//! GET  /products/featured             - Featured products (capped at 4)
//! GET  /products/search?q=term        - Free-text search
//! GET  /products/{id}                 - Product detail
//! GET  /products/{id}/related         - Related products (capped at 4)
//! GET  /products/{id}/reviews         - Review bundle for a product
//! POST /products/{id}/reviews         - Submit a review
//! GET  /categories                    - Category listing with product counts
//! GET  /categories/{id}               - Category detail plus its products
//!
//! # Cart
//! GET  /cart                          - Current cart
//! GET  /cart/count                    - Item count badge
//! POST /cart/add                      - Add a product (server fetches the snapshot)
//! POST /cart/update                   - Set a line quantity (0 removes)
//! POST /cart/remove                   - Remove a line
//! POST /cart/clear                    - Empty the cart
//!
//! # Wishlist
//! GET  /wishlist                      - Current wishlist
//! POST /wishlist/add                  - Add a product (idempotent)
//! POST /wishlist/remove               - Remove a product
//! POST /wishlist/clear                - Empty the wishlist
//!
//! # Reviews
//! PATCH  /reviews/{id}                - Edit a review
//! DELETE /reviews/{id}                - Delete a review
//!
//! # Checkout
//! POST /checkout                      - Validate, assemble, and submit an order
//! GET  /orders/{id}                   - Order confirmation view
//! ```

pub mod cart;
pub mod categories;
pub mod checkout;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod wishlist;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::checkout_rate_limiter;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/featured", get(products::featured))
        .route("/search", get(products::search))
        .route("/{id}", get(products::show))
        .route("/{id}/related", get(products::related))
        .route(
            "/{id}/reviews",
            get(reviews::for_product).post(reviews::create),
        )
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index))
        .route("/{id}", get(categories::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the wishlist routes router.
pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(wishlist::show))
        .route("/add", post(wishlist::add))
        .route("/remove", post(wishlist::remove))
        .route("/clear", post(wishlist::clear))
}

/// Create the review routes router (edits and deletes by review ID).
pub fn review_routes() -> Router<AppState> {
    use axum::routing::patch;

    Router::new().route("/{id}", patch(reviews::edit).delete(reviews::delete))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .nest("/cart", cart_routes())
        .nest("/wishlist", wishlist_routes())
        .nest("/reviews", review_routes())
        .route("/orders/{id}", get(orders::show))
        // Order submission gets its own, stricter limiter
        .route(
            "/checkout",
            post(checkout::submit).layer(checkout_rate_limiter()),
        )
}
