//! Per-product review collection with derived aggregates.
//!
//! Reviews are validated on the way in (`rating` in 1..=5, non-empty author
//! and comment) - an out-of-range value here is a caller contract violation,
//! not user input passed through unchecked, so it surfaces as a
//! [`ReviewError`] rather than being silently clamped. Average and
//! distribution are derived on read, never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::types::{ProductId, ReviewId};

/// Star ratings are 1 through 5 inclusive.
pub const MIN_RATING: u8 = 1;
/// Star ratings are 1 through 5 inclusive.
pub const MAX_RATING: u8 = 5;

/// Validation failures for review input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("rating must be between {MIN_RATING} and {MAX_RATING}, got {0}")]
    RatingOutOfRange(u8),
    #[error("reviewer name must not be empty")]
    EmptyUserName,
    #[error("comment must not be empty")]
    EmptyComment,
}

/// A single product review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Generated review ID.
    #[serde(rename = "_id")]
    pub id: ReviewId,
    /// The reviewed product.
    pub product_id: ProductId,
    /// Display name of the reviewer.
    pub user_name: String,
    /// Star rating, 1 through 5.
    pub rating: u8,
    /// Review body. Never empty.
    pub comment: String,
    /// When the review was submitted.
    pub created_at: DateTime<Utc>,
}

/// Partial update for an existing review. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewUpdate {
    pub rating: Option<u8>,
    pub comment: Option<String>,
    pub user_name: Option<String>,
}

/// Review counts per star value, index 0 holding 1-star counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RatingDistribution(pub [u32; 5]);

impl RatingDistribution {
    /// Count of reviews with the given star value (1..=5); 0 for anything else.
    #[must_use]
    pub fn count_for(&self, stars: u8) -> u32 {
        if (MIN_RATING..=MAX_RATING).contains(&stars) {
            self.0[usize::from(stars - 1)]
        } else {
            0
        }
    }
}

/// The review state container: all reviews on this device, across products.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSet {
    reviews: Vec<Review>,
}

fn validate_rating(rating: u8) -> Result<(), ReviewError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(ReviewError::RatingOutOfRange(rating))
    }
}

impl ReviewSet {
    /// Create an empty review set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reviews: Vec::new(),
        }
    }

    /// All reviews, most recent first.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Add a review for `product_id`, generating its ID and timestamp.
    ///
    /// The new review is prepended so per-product listings come out newest
    /// first without re-sorting.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError`] if the rating is out of range or the name or
    /// comment is empty (after trimming).
    pub fn add(
        &mut self,
        product_id: ProductId,
        rating: u8,
        comment: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Result<&Review, ReviewError> {
        validate_rating(rating)?;
        let user_name = user_name.into();
        if user_name.trim().is_empty() {
            return Err(ReviewError::EmptyUserName);
        }
        let comment = comment.into();
        if comment.trim().is_empty() {
            return Err(ReviewError::EmptyComment);
        }

        let review = Review {
            id: ReviewId::new(Uuid::new_v4().to_string()),
            product_id,
            user_name,
            rating,
            comment,
            created_at: Utc::now(),
        };
        self.reviews.insert(0, review);
        Ok(&self.reviews[0])
    }

    /// Apply a partial update to the review with `id`. Unknown IDs are a
    /// no-op. Provided fields are re-validated before anything is written.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError`] if an included field fails validation.
    pub fn update(&mut self, id: &ReviewId, update: ReviewUpdate) -> Result<(), ReviewError> {
        if let Some(rating) = update.rating {
            validate_rating(rating)?;
        }
        if let Some(ref user_name) = update.user_name
            && user_name.trim().is_empty()
        {
            return Err(ReviewError::EmptyUserName);
        }
        if let Some(ref comment) = update.comment
            && comment.trim().is_empty()
        {
            return Err(ReviewError::EmptyComment);
        }

        if let Some(review) = self.reviews.iter_mut().find(|r| &r.id == id) {
            if let Some(rating) = update.rating {
                review.rating = rating;
            }
            if let Some(comment) = update.comment {
                review.comment = comment;
            }
            if let Some(user_name) = update.user_name {
                review.user_name = user_name;
            }
        }
        Ok(())
    }

    /// Delete the review with `id`. No-op if absent.
    pub fn remove(&mut self, id: &ReviewId) {
        self.reviews.retain(|review| &review.id != id);
    }

    /// Reviews for a product, newest first.
    #[must_use]
    pub fn for_product(&self, product_id: &ProductId) -> Vec<&Review> {
        let mut reviews: Vec<&Review> = self
            .reviews
            .iter()
            .filter(|review| &review.product_id == product_id)
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews
    }

    /// Number of reviews for a product.
    #[must_use]
    pub fn total_for_product(&self, product_id: &ProductId) -> usize {
        self.reviews
            .iter()
            .filter(|review| &review.product_id == product_id)
            .count()
    }

    /// Mean rating for a product, rounded to 1 decimal; 0 with no reviews.
    #[must_use]
    pub fn average_rating(&self, product_id: &ProductId) -> f64 {
        let ratings: Vec<u8> = self
            .reviews
            .iter()
            .filter(|review| &review.product_id == product_id)
            .map(|review| review.rating)
            .collect();
        if ratings.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)] // Review counts are tiny
        let mean = ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / ratings.len() as f64;
        (mean * 10.0).round() / 10.0
    }

    /// Counts per star value for a product.
    #[must_use]
    pub fn rating_distribution(&self, product_id: &ProductId) -> RatingDistribution {
        let mut distribution = RatingDistribution::default();
        for review in &self.reviews {
            if &review.product_id == product_id
                && (MIN_RATING..=MAX_RATING).contains(&review.rating)
            {
                distribution.0[usize::from(review.rating - 1)] += 1;
            }
        }
        distribution
    }
}
