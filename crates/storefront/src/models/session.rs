//! Session-stored state.
//!
//! The cart, wishlist, and review book live in the session as JSON snapshots
//! keyed by fixed names. Every mutation writes the whole container back -
//! there is no per-operation delta. A snapshot that fails to decode is
//! treated as absent and replaced by a fresh default on the next write.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use comforty_core::{Cart, ReviewSet, UserId, Wishlist};

/// How long a checkout-pending marker blocks further submissions.
///
/// Long enough to cover a slow content store write, short enough that a
/// crash between mark and clear does not lock the session out of checkout
/// for its whole lifetime.
const CHECKOUT_PENDING_TIMEOUT_SECS: i64 = 30;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's content store document ID.
    pub id: UserId,
    /// User's email address.
    pub email: String,
}

/// Session keys for snapshot data.
pub mod keys {
    /// Key for the cart snapshot.
    pub const CART: &str = "cart";

    /// Key for the wishlist snapshot.
    pub const WISHLIST: &str = "wishlist";

    /// Key for the review book snapshot.
    pub const REVIEWS: &str = "reviews";

    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key marking an in-flight checkout submission.
    pub const CHECKOUT_PENDING: &str = "checkout_pending";
}

/// Load the cart snapshot, falling back to an empty cart.
///
/// Load failures are swallowed on purpose: a corrupt or missing snapshot
/// must never take the storefront down.
pub async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the cart snapshot back. Best-effort: failures are logged, not fatal.
pub async fn save_cart(session: &Session, cart: &Cart) {
    if let Err(err) = session.insert(keys::CART, cart).await {
        tracing::error!(error = %err, "Failed to persist cart snapshot");
    }
}

/// Load the wishlist snapshot, falling back to an empty wishlist.
pub async fn load_wishlist(session: &Session) -> Wishlist {
    session
        .get::<Wishlist>(keys::WISHLIST)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the wishlist snapshot back. Best-effort.
pub async fn save_wishlist(session: &Session, wishlist: &Wishlist) {
    if let Err(err) = session.insert(keys::WISHLIST, wishlist).await {
        tracing::error!(error = %err, "Failed to persist wishlist snapshot");
    }
}

/// Load the review book snapshot, falling back to an empty one.
pub async fn load_reviews(session: &Session) -> ReviewSet {
    session
        .get::<ReviewSet>(keys::REVIEWS)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the review book snapshot back. Best-effort.
pub async fn save_reviews(session: &Session, reviews: &ReviewSet) {
    if let Err(err) = session.insert(keys::REVIEWS, reviews).await {
        tracing::error!(error = %err, "Failed to persist review snapshot");
    }
}

/// The logged-in user, if any.
pub async fn current_user(session: &Session) -> Option<CurrentUser> {
    session
        .get::<CurrentUser>(keys::CURRENT_USER)
        .await
        .ok()
        .flatten()
}

/// Whether a checkout submission is already in flight for this session.
///
/// The marker is the time the submission started. Markers older than
/// [`CHECKOUT_PENDING_TIMEOUT_SECS`] are stale - the submission either
/// finished without clearing (crash) or never will - and are ignored, so
/// the session can check out again without waiting for session expiry.
pub async fn checkout_pending(session: &Session) -> bool {
    session
        .get::<DateTime<Utc>>(keys::CHECKOUT_PENDING)
        .await
        .ok()
        .flatten()
        .is_some_and(|started_at| marker_is_active(started_at, Utc::now()))
}

/// Mark a checkout submission as in flight, stamped with the current time.
pub async fn set_checkout_pending(session: &Session, pending: bool) {
    if pending {
        if let Err(err) = session.insert(keys::CHECKOUT_PENDING, Utc::now()).await {
            tracing::error!(error = %err, "Failed to mark checkout pending");
        }
    } else if let Err(err) = session
        .remove::<DateTime<Utc>>(keys::CHECKOUT_PENDING)
        .await
    {
        tracing::error!(error = %err, "Failed to clear checkout pending marker");
    }
}

fn marker_is_active(started_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(started_at) < Duration::seconds(CHECKOUT_PENDING_TIMEOUT_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_marker_blocks_resubmission() {
        let now = Utc::now();
        assert!(marker_is_active(now, now));
        assert!(marker_is_active(now - Duration::seconds(5), now));
    }

    #[test]
    fn test_stale_marker_allows_checkout_again() {
        // A submission that never cleared its marker (crash between mark
        // and clear) must not block the session until session expiry.
        let now = Utc::now();
        assert!(!marker_is_active(
            now - Duration::seconds(CHECKOUT_PENDING_TIMEOUT_SECS),
            now
        ));
        assert!(!marker_is_active(now - Duration::days(7), now));
    }
}
