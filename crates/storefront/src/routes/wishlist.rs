//! Wishlist route handlers.
//!
//! Same persistence shape as the cart: a session snapshot, rewritten
//! wholesale after each mutation. Adding is idempotent - the snapshot taken
//! at first add wins, so a later price change upstream does not rewrite an
//! entry already on the list.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use comforty_core::{Product, ProductId, Wishlist};

use crate::error::{AppError, Result};
use crate::models::session::{load_wishlist, save_wishlist};
use crate::state::AppState;

/// Wishlist response payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    pub items: Vec<Product>,
    pub count: usize,
}

impl From<&Wishlist> for WishlistView {
    fn from(wishlist: &Wishlist) -> Self {
        Self {
            items: wishlist.entries().to_vec(),
            count: wishlist.len(),
        }
    }
}

/// Add/remove request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistBody {
    pub product_id: ProductId,
}

/// Show the current wishlist.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Json<WishlistView> {
    let wishlist = load_wishlist(&session).await;
    Json(WishlistView::from(&wishlist))
}

/// Add a product to the wishlist. Idempotent: re-adding an entry leaves the
/// original snapshot untouched and still returns 201.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<WishlistBody>,
) -> Result<Response> {
    let product = state
        .content()
        .product_by_id(&body.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", body.product_id)))?;

    let mut wishlist = load_wishlist(&session).await;
    wishlist.add(product);
    save_wishlist(&session, &wishlist).await;

    Ok((StatusCode::CREATED, Json(WishlistView::from(&wishlist))).into_response())
}

/// Remove a product from the wishlist. Absent entries are a no-op.
#[instrument(skip(session))]
pub async fn remove(session: Session, Json(body): Json<WishlistBody>) -> Json<WishlistView> {
    let mut wishlist = load_wishlist(&session).await;
    wishlist.remove(&body.product_id);
    save_wishlist(&session, &wishlist).await;
    Json(WishlistView::from(&wishlist))
}

/// Empty the wishlist.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Json<WishlistView> {
    let mut wishlist = load_wishlist(&session).await;
    wishlist.clear();
    save_wishlist(&session, &wishlist).await;
    Json(WishlistView::from(&wishlist))
}
