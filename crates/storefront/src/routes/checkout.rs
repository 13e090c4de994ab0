//! Checkout route handler.
//!
//! One POST drives the whole state machine: begin, validate, submit. The
//! session carries a timestamped pending marker for the duration of the
//! backend write, so a double-submit from the same session gets a 409
//! instead of a second order; markers past their timeout are ignored, so an
//! uncleared marker cannot block the session for its whole lifetime. The
//! cart is cleared only after the content store confirms.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use comforty_core::OrderId;

use crate::checkout::{CheckoutError, CheckoutSession, ShippingForm, assemble_order};
use crate::error::Result;
use crate::models::session::{
    checkout_pending, current_user, load_cart, save_cart, set_checkout_pending,
};
use crate::state::AppState;

/// Successful checkout payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub order_id: OrderId,
    pub order_number: String,
    pub total: Decimal,
}

/// Validate the shipping form, assemble the order, and submit it.
///
/// An empty cart redirects to the cart page rather than erroring: there is
/// nothing to check out, so the client belongs back where the cart is shown.
#[instrument(skip(state, session, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<ShippingForm>,
) -> Result<Response> {
    let cart = load_cart(&session).await;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let user_ref = current_user(&session).await.map(|user| user.id);

    // Everything between the marker read and the marker write is
    // synchronous, so the window where a concurrent submit from the same
    // session slips past the check is as small as the session store allows.
    if checkout_pending(&session).await {
        return Err(CheckoutError::AlreadySubmitting.into());
    }

    let mut checkout = CheckoutSession::new();
    checkout.begin(&cart)?;
    let address = checkout.validate(&form)?;
    let draft = assemble_order(&cart, address, user_ref);

    checkout.begin_submit();
    set_checkout_pending(&session, true).await;

    let outcome = state.content().create_order(&draft).await;
    set_checkout_pending(&session, false).await;

    match outcome {
        Ok(order_id) => {
            checkout.confirm(order_id.clone());

            let mut cart = cart;
            cart.clear();
            save_cart(&session, &cart).await;

            tracing::info!(
                order_number = %draft.order_number,
                total = %draft.total,
                "Order confirmed"
            );

            Ok((
                StatusCode::CREATED,
                Json(CheckoutReceipt {
                    order_id,
                    order_number: draft.order_number,
                    total: draft.total,
                }),
            )
                .into_response())
        }
        Err(err) => {
            // The cart stays intact so the client can retry.
            checkout.fail();
            Err(CheckoutError::Backend(err).into())
        }
    }
}
