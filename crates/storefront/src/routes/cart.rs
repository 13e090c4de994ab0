//! Cart route handlers.
//!
//! The cart lives in the session as a JSON snapshot. Every mutation loads
//! the snapshot, applies one pure transition, and writes the whole cart
//! back. Prices are never taken from the client: `add` fetches the product
//! from the content store and captures its price server-side.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use comforty_core::{Cart, CartItem, ProductId};

use crate::error::{AppError, Result};
use crate::models::session::{load_cart, save_cart};
use crate::state::AppState;

/// Cart response payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartBody {
    pub product_id: ProductId,
}

/// Update cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartBody {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFromCartBody {
    pub product_id: ProductId,
}

/// Cart count payload.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Show the current cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Json<CartView> {
    let cart = load_cart(&session).await;
    Json(CartView::from(&cart))
}

/// Cart item count (header badge).
#[instrument(skip(session))]
pub async fn count(session: Session) -> Json<CartCount> {
    let cart = load_cart(&session).await;
    Json(CartCount {
        count: cart.item_count(),
    })
}

/// Add a product to the cart.
///
/// The product snapshot (title, price, image) is fetched from the content
/// store; an unknown product ID is a 404. Adding an existing line bumps its
/// quantity by one.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<AddToCartBody>,
) -> Result<Response> {
    let product = state
        .content()
        .product_by_id(&body.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", body.product_id)))?;

    let mut cart = load_cart(&session).await;
    cart.add(CartItem {
        id: product.id,
        title: product.title,
        price: product.price,
        quantity: 1,
        image: product.image,
    });
    save_cart(&session, &cart).await;

    Ok((StatusCode::CREATED, Json(CartView::from(&cart))).into_response())
}

/// Set a line's quantity. Quantity 0 removes the line; an unknown product
/// ID is a no-op, both by design.
#[instrument(skip(session))]
pub async fn update(session: Session, Json(body): Json<UpdateCartBody>) -> Json<CartView> {
    let mut cart = load_cart(&session).await;
    cart.update_quantity(&body.product_id, body.quantity);
    save_cart(&session, &cart).await;
    Json(CartView::from(&cart))
}

/// Remove a line from the cart. Absent lines are a no-op.
#[instrument(skip(session))]
pub async fn remove(session: Session, Json(body): Json<RemoveFromCartBody>) -> Json<CartView> {
    let mut cart = load_cart(&session).await;
    cart.remove(&body.product_id);
    save_cart(&session, &cart).await;
    Json(CartView::from(&cart))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Json<CartView> {
    let mut cart = load_cart(&session).await;
    cart.clear();
    save_cart(&session, &cart).await;
    Json(CartView::from(&cart))
}
