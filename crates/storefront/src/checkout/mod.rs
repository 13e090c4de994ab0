//! Checkout assembly.
//!
//! A checkout run is a small state machine:
//!
//! ```text
//! Idle -> Validating -> Submitting -> Confirmed
//!              |             |
//!              v             v
//!            Idle          Failed
//! ```
//!
//! Validation failures return to `Idle` with the cart untouched; a backend
//! failure lands in `Failed`, from which a fresh attempt may begin. The cart
//! is only cleared by the caller after `Confirmed`.

pub mod form;

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use comforty_core::{Cart, OrderId, OrderItem, OrderStatus, ShippingAddress, UserId};

use crate::content::ContentError;

pub use form::ShippingForm;

const ORDER_NUMBER_PREFIX: &str = "CMF-";
const ORDER_NUMBER_LEN: usize = 8;
const ORDER_NUMBER_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Errors from a checkout attempt.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout began with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The shipping form failed validation.
    #[error("shipping details are invalid")]
    Validation(Vec<String>),

    /// A submission for this session is already in flight.
    #[error("an order submission is already in progress")]
    AlreadySubmitting,

    /// The content store rejected or failed the order write.
    #[error("order submission failed: {0}")]
    Backend(#[from] ContentError),
}

/// Where a checkout run currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    Validating,
    Submitting,
    Confirmed(OrderId),
    Failed,
}

/// Drives one checkout attempt through its states.
///
/// The transitions are pure; the caller performs the actual backend write
/// between [`CheckoutSession::begin_submit`] and the terminal transition.
#[derive(Debug)]
pub struct CheckoutSession {
    state: CheckoutState,
}

impl CheckoutSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: CheckoutState::Idle,
        }
    }

    #[must_use]
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Enter `Validating`. Refused when the cart is empty or a submission is
    /// already in flight. A `Failed` run may begin again.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] or [`CheckoutError::AlreadySubmitting`].
    pub fn begin(&mut self, cart: &Cart) -> Result<(), CheckoutError> {
        match self.state {
            CheckoutState::Submitting => return Err(CheckoutError::AlreadySubmitting),
            CheckoutState::Idle | CheckoutState::Failed => {}
            CheckoutState::Validating | CheckoutState::Confirmed(_) => {
                return Err(CheckoutError::AlreadySubmitting);
            }
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.state = CheckoutState::Validating;
        Ok(())
    }

    /// Validate the shipping form. On failure the machine returns to `Idle`
    /// so the client can correct and resubmit.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Validation`] with every field message.
    pub fn validate(&mut self, form: &ShippingForm) -> Result<ShippingAddress, CheckoutError> {
        debug_assert_eq!(self.state, CheckoutState::Validating);
        match form.validate() {
            Ok(address) => Ok(address),
            Err(errors) => {
                self.state = CheckoutState::Idle;
                Err(CheckoutError::Validation(errors))
            }
        }
    }

    /// Enter `Submitting`. Only legal from `Validating`.
    pub fn begin_submit(&mut self) {
        debug_assert_eq!(self.state, CheckoutState::Validating);
        self.state = CheckoutState::Submitting;
    }

    /// The backend accepted the order.
    pub fn confirm(&mut self, order_id: OrderId) {
        debug_assert_eq!(self.state, CheckoutState::Submitting);
        self.state = CheckoutState::Confirmed(order_id);
    }

    /// The backend write failed; the cart stays intact for a retry.
    pub fn fail(&mut self) {
        debug_assert_eq!(self.state, CheckoutState::Submitting);
        self.state = CheckoutState::Failed;
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully assembled order, ready to persist.
///
/// The total is recomputed from the cart lines here; a client-supplied total
/// is never trusted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub order_number: String,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,
    pub created_at: DateTime<Utc>,
    pub user_ref: Option<UserId>,
}

/// Assemble an order draft from a validated cart and shipping address.
#[must_use]
pub fn assemble_order(
    cart: &Cart,
    shipping_address: ShippingAddress,
    user_ref: Option<UserId>,
) -> OrderDraft {
    let items: Vec<OrderItem> = cart
        .items()
        .iter()
        .map(|item| OrderItem {
            product_id: item.id.clone(),
            quantity: item.quantity,
            price: item.price,
        })
        .collect();

    let total = items.iter().map(OrderItem::line_total).sum();

    OrderDraft {
        order_number: generate_order_number(),
        items,
        total,
        status: OrderStatus::Processing,
        shipping_address,
        created_at: Utc::now(),
        user_ref,
    }
}

/// Human-readable order number: `CMF-` plus 8 random uppercase alphanumerics.
fn generate_order_number() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ORDER_NUMBER_LEN)
        .map(|_| {
            let idx = rng.random_range(0..ORDER_NUMBER_ALPHABET.len());
            ORDER_NUMBER_ALPHABET[idx] as char
        })
        .collect();
    format!("{ORDER_NUMBER_PREFIX}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use comforty_core::CartItem;

    fn cart_with_items() -> Cart {
        let mut cart = Cart::new();
        cart.add(CartItem {
            id: "prod-1".into(),
            title: "Library Stool Chair".to_string(),
            price: Decimal::from(20),
            quantity: 1,
            image: "https://cdn.example.com/stool.png".to_string(),
        });
        cart.add(CartItem {
            id: "prod-2".into(),
            title: "Sleek Lounge Chair".to_string(),
            price: Decimal::new(9950, 2),
            quantity: 1,
            image: "https://cdn.example.com/lounge.png".to_string(),
        });
        cart.update_quantity(&"prod-2".into(), 3);
        cart
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "03001234567".to_string(),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            postal_code: "54000".to_string(),
            country: "UK".to_string(),
        }
    }

    #[test]
    fn test_begin_rejects_empty_cart() {
        let mut session = CheckoutSession::new();
        assert!(matches!(
            session.begin(&Cart::new()),
            Err(CheckoutError::EmptyCart)
        ));
        assert_eq!(*session.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_validation_failure_returns_to_idle() {
        let mut session = CheckoutSession::new();
        session.begin(&cart_with_items()).expect("begin");

        let err = session
            .validate(&ShippingForm::default())
            .expect_err("invalid form");
        assert!(matches!(err, CheckoutError::Validation(ref errors) if !errors.is_empty()));
        assert_eq!(*session.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_happy_path_reaches_confirmed() {
        let mut session = CheckoutSession::new();
        let cart = cart_with_items();
        session.begin(&cart).expect("begin");

        let form = ShippingForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "03001234567".to_string(),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            postal_code: "54000".to_string(),
            country: "UK".to_string(),
        };
        session.validate(&form).expect("valid form");
        session.begin_submit();
        assert_eq!(*session.state(), CheckoutState::Submitting);

        session.confirm(OrderId::new("order-1"));
        assert_eq!(
            *session.state(),
            CheckoutState::Confirmed(OrderId::new("order-1"))
        );
    }

    #[test]
    fn test_submitting_blocks_a_second_begin() {
        let mut session = CheckoutSession::new();
        let cart = cart_with_items();
        session.begin(&cart).expect("begin");
        session.validate(&form_ok()).expect("valid");
        session.begin_submit();

        assert!(matches!(
            session.begin(&cart),
            Err(CheckoutError::AlreadySubmitting)
        ));
    }

    #[test]
    fn test_failed_run_can_begin_again() {
        let mut session = CheckoutSession::new();
        let cart = cart_with_items();
        session.begin(&cart).expect("begin");
        session.validate(&form_ok()).expect("valid");
        session.begin_submit();
        session.fail();
        assert_eq!(*session.state(), CheckoutState::Failed);

        session.begin(&cart).expect("retry after failure");
        assert_eq!(*session.state(), CheckoutState::Validating);
    }

    #[test]
    fn test_assembled_total_matches_cart_total() {
        let cart = cart_with_items();
        let draft = assemble_order(&cart, address(), None);
        assert_eq!(draft.total, cart.total());
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.status, OrderStatus::Processing);
    }

    #[test]
    fn test_order_number_format() {
        let number = generate_order_number();
        assert!(number.starts_with("CMF-"));
        let suffix = &number["CMF-".len()..];
        assert_eq!(suffix.len(), 8);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }

    fn form_ok() -> ShippingForm {
        ShippingForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "03001234567".to_string(),
            address: "12 Analytical Way".to_string(),
            city: "London".to_string(),
            state: "LDN".to_string(),
            postal_code: "54000".to_string(),
            country: "UK".to_string(),
        }
    }
}
