//! Order route handlers.
//!
//! Orders are written once at checkout and read back for the confirmation
//! view. Status transitions happen on the back-office side; this surface
//! only reads them.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use comforty_core::{Order, OrderId};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Show a single order (confirmation view).
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<OrderId>) -> Result<Json<Order>> {
    let order = state
        .content()
        .order_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;
    Ok(Json(order))
}
