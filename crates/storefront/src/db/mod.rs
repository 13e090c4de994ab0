//! Database operations for the storefront `PostgreSQL`.
//!
//! The content store is the source of truth for products, categories, and
//! orders; Postgres holds only the session table managed by
//! `tower-sessions-sqlx-store`. Carts, wishlists, and reviews live inside
//! those session rows as JSON snapshots.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
