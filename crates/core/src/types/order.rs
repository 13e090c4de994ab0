//! Order types.
//!
//! An order is assembled once at checkout submission and is immutable from
//! the storefront's perspective afterwards; status transitions happen on the
//! back-office side and are only ever read here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{OrderId, ProductId, UserId};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Processing => write!(f, "processing"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// A single line of an order: a product reference frozen with the quantity
/// and unit price it was purchased at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// The purchased product.
    pub product_id: ProductId,
    /// Units purchased. Always at least 1.
    pub quantity: u32,
    /// Unit price at purchase time.
    pub price: Decimal,
}

impl OrderItem {
    /// Line total (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The shipping address captured by the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// A completed checkout submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Content-store document ID, assigned on creation.
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// Human-readable order number (e.g. `CMF-4K7TQ2XB`).
    pub order_number: String,
    /// Purchased lines. Never empty.
    pub items: Vec<OrderItem>,
    /// Total recomputed from the lines at assembly time.
    pub total: Decimal,
    /// Lifecycle status; `processing` at creation.
    pub status: OrderStatus,
    /// Where the order ships to.
    pub shipping_address: ShippingAddress,
    /// When the order was assembled.
    pub created_at: DateTime<Utc>,
    /// The signed-in user, when checkout happened with a known identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ref: Option<UserId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_order_status_roundtrip() {
        for status in [
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            let parsed = OrderStatus::from_str(&status.to_string()).expect("parse");
            assert_eq!(parsed, status);
        }
        assert!(OrderStatus::from_str("refunded").is_err());
    }

    #[test]
    fn test_order_status_serde_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Processing).expect("serialize");
        assert_eq!(json, "\"processing\"");
    }

    #[test]
    fn test_line_total() {
        let item = OrderItem {
            product_id: ProductId::new("prod-1"),
            quantity: 3,
            price: Decimal::new(1950, 2), // 19.50
        };
        assert_eq!(item.line_total(), Decimal::new(5850, 2));
    }
}
