//! Review route handlers.
//!
//! Reviews live in the session snapshot alongside the cart and wishlist.
//! The GET bundle ships the derived aggregates (average, total,
//! distribution) with the reviews so clients never recompute them.

use axum::{
    Json,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use comforty_core::{ProductId, RatingDistribution, Review, ReviewId, ReviewUpdate};

use crate::error::Result;
use crate::models::session::{load_reviews, save_reviews};

/// Review bundle for a product: the reviews newest first plus aggregates.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBundle {
    pub reviews: Vec<Review>,
    pub average_rating: f64,
    pub total_reviews: usize,
    pub distribution: RatingDistribution,
}

/// Review submission body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewBody {
    pub rating: u8,
    pub comment: String,
    pub user_name: String,
}

/// Review bundle for a product.
#[instrument(skip(session))]
pub async fn for_product(session: Session, Path(id): Path<ProductId>) -> Json<ReviewBundle> {
    let reviews = load_reviews(&session).await;
    Json(ReviewBundle {
        reviews: reviews.for_product(&id).into_iter().cloned().collect(),
        average_rating: reviews.average_rating(&id),
        total_reviews: reviews.total_for_product(&id),
        distribution: reviews.rating_distribution(&id),
    })
}

/// Submit a review. Validation failures come back as 422 with the message
/// list; nothing is persisted on the error path.
#[instrument(skip(session, body))]
pub async fn create(
    session: Session,
    Path(id): Path<ProductId>,
    Json(body): Json<CreateReviewBody>,
) -> Result<Response> {
    let mut reviews = load_reviews(&session).await;
    let review = reviews.add(id, body.rating, body.comment, body.user_name)?.clone();
    save_reviews(&session, &reviews).await;
    Ok((StatusCode::CREATED, Json(review)).into_response())
}

/// Edit a review. Provided fields are re-validated before anything is
/// applied; an unknown review ID is a no-op.
#[instrument(skip(session, update))]
pub async fn edit(
    session: Session,
    Path(id): Path<ReviewId>,
    Json(update): Json<ReviewUpdate>,
) -> Result<StatusCode> {
    let mut reviews = load_reviews(&session).await;
    reviews.update(&id, update)?;
    save_reviews(&session, &reviews).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a review. Absent IDs are a no-op.
#[instrument(skip(session))]
pub async fn delete(session: Session, Path(id): Path<ReviewId>) -> StatusCode {
    let mut reviews = load_reviews(&session).await;
    reviews.remove(&id);
    save_reviews(&session, &reviews).await;
    StatusCode::NO_CONTENT
}
