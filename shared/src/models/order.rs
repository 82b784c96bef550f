//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Order status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a status string; returns None for anything outside the state machine
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Order entity
///
/// Book title and price are snapshotted at creation so historical orders are
/// immune to later price changes. Total price is derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    /// Derived from the id after insert ("BK-...")
    pub order_number: String,
    pub book_id: i64,
    pub book_title: String,
    /// Unit price snapshot in cents
    pub price_cents_at_order: i64,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub quantity: i64,
    pub status: OrderStatus,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

impl Order {
    /// Unit price snapshot as a decimal currency amount
    pub fn price_at_order(&self) -> Decimal {
        Decimal::new(self.price_cents_at_order, 2)
    }

    /// Total price: quantity * snapshotted unit price (derived, never stored)
    ///
    /// Saturating multiply; the quantity cap on intake keeps real orders far
    /// below the overflow range.
    pub fn total_price(&self) -> Decimal {
        Decimal::new(self.quantity.saturating_mul(self.price_cents_at_order), 2)
    }
}

/// API view of an order with the derived amounts included
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: i64,
    pub order_number: String,
    pub book_title: String,
    pub price_at_order: Decimal,
    pub total_price: Decimal,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub quantity: i64,
    pub status: OrderStatus,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            price_at_order: order.price_at_order(),
            total_price: order.total_price(),
            id: order.id,
            order_number: order.order_number,
            book_title: order.book_title,
            customer_name: order.customer_name,
            email: order.email,
            phone: order.phone,
            address: order.address,
            city: order.city,
            quantity: order.quantity,
            status: order.status,
            created_at: order.created_at,
            completed_at: order.completed_at,
        }
    }
}

/// Create order payload (public endpoint)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderCreate {
    #[validate(length(min = 1, max = 128))]
    pub book_title: String,
    #[validate(length(min = 1, max = 128))]
    pub customer_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 32))]
    pub phone: String,
    #[validate(length(min = 1, max = 256))]
    pub address: String,
    #[validate(length(min = 1, max = 128))]
    pub city: String,
    #[validate(range(min = 1, max = 10_000))]
    pub quantity: i64,
}

/// Update status payload
///
/// Kept as a plain string so an unknown status produces a domain validation
/// error instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: String,
}

/// Listing filters for the admin order table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderListQuery {
    pub search: Option<String>,
    pub status: Option<OrderStatus>,
    /// Inclusive lower bound on created_at (ms)
    pub date_from: Option<i64>,
    /// Inclusive upper bound on created_at (ms)
    pub date_to: Option<i64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        Order {
            id: 42,
            order_number: "BK-000042".to_string(),
            book_id: 1,
            book_title: "The Book".to_string(),
            price_cents_at_order: 2500,
            customer_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: "600000000".to_string(),
            address: "Calle Mayor 1".to_string(),
            city: "Madrid".to_string(),
            quantity: 2,
            status: OrderStatus::Pending,
            created_at: 0,
            completed_at: None,
        }
    }

    #[test]
    fn test_total_price_is_derived() {
        let order = sample_order();
        assert_eq!(order.total_price().to_string(), "50.00");
        assert_eq!(order.price_at_order().to_string(), "25.00");
    }

    #[test]
    fn test_total_price_saturates_instead_of_overflowing() {
        let mut order = sample_order();
        order.quantity = i64::MAX / 1000;
        // Must not panic; the product clamps at i64::MAX cents
        assert_eq!(order.total_price(), Decimal::new(i64::MAX, 2));
    }

    #[test]
    fn test_money_serializes_as_json_numbers() {
        let response = OrderResponse::from(sample_order());
        let json = serde_json::to_value(&response).unwrap();
        assert!(json["price_at_order"].is_number());
        assert_eq!(json["price_at_order"].as_f64(), Some(25.0));
        assert_eq!(json["total_price"].as_f64(), Some(50.0));
    }

    #[test]
    fn test_quantity_upper_bound() {
        use validator::Validate;

        let mut oversized = OrderCreate {
            book_title: "The Book".to_string(),
            customer_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: "600000000".to_string(),
            address: "Calle Mayor 1".to_string(),
            city: "Madrid".to_string(),
            quantity: 10_000,
        };
        assert!(oversized.validate().is_ok());

        oversized.quantity = 10_001;
        assert!(oversized.validate().is_err());

        oversized.quantity = i64::MAX / 1000;
        assert!(oversized.validate().is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(OrderStatus::parse("pending"), Some(OrderStatus::Pending));
        assert_eq!(OrderStatus::parse("completed"), Some(OrderStatus::Completed));
        assert_eq!(OrderStatus::parse("cancelled"), Some(OrderStatus::Cancelled));
        assert_eq!(OrderStatus::parse("shipped"), None);
        assert_eq!(OrderStatus::parse("COMPLETED"), None);
    }

    #[test]
    fn test_status_serialize_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
    }

    #[test]
    fn test_create_payload_validation() {
        use validator::Validate;

        let valid = OrderCreate {
            book_title: "The Book".to_string(),
            customer_name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: "600000000".to_string(),
            address: "Calle Mayor 1".to_string(),
            city: "Madrid".to_string(),
            quantity: 1,
        };
        assert!(valid.validate().is_ok());

        let mut bad_email = valid.clone();
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate().is_err());

        let mut zero_quantity = valid.clone();
        zero_quantity.quantity = 0;
        assert!(zero_quantity.validate().is_err());
    }
}
