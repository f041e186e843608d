//! Order Model

use crate::order::OrderStatus;
use serde::{Deserialize, Serialize};

/// Maximum drift tolerated between a submitted total and the recomputed
/// item sum before the order is rejected.
pub const TOTAL_TOLERANCE: f64 = 0.01;

/// A single line item on an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub name: String,
    /// Unit price
    pub price: f64,
    pub quantity: i32,
    /// Line subtotal as submitted; recomputed server-side, never trusted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<f64>,
}

impl OrderItem {
    /// Recomputed line subtotal (`price * quantity`)
    pub fn line_subtotal(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// Recomputed order total: the sum of line subtotals
pub fn order_total(items: &[OrderItem]) -> f64 {
    items.iter().map(OrderItem::line_subtotal).sum()
}

/// Order entity — the authoritative record held by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub restaurant_id: i64,
    pub driver_id: Option<i64>,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub customer_name: Option<String>,
    pub restaurant_name: Option<String>,
    pub driver_name: Option<String>,
    pub delivery_address: Option<String>,
    /// Latitude/longitude pair
    pub delivery_coordinates: Option<[f64; 2]>,
    pub created_at: i64,
    pub confirmed_at: Option<i64>,
    pub in_transit_at: Option<i64>,
    pub delivered_at: Option<i64>,
    pub cancelled_at: Option<i64>,
}

/// Create order payload
///
/// `total_amount` is verified against the recomputed item sum; a
/// submitted `status` other than `new` is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_id: i64,
    pub restaurant_id: i64,
    pub driver_id: Option<i64>,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub status: Option<OrderStatus>,
    pub customer_name: Option<String>,
    pub restaurant_name: Option<String>,
    pub driver_name: Option<String>,
    pub delivery_address: Option<String>,
    pub delivery_coordinates: Option<[f64; 2]>,
}

/// Status transition payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Driver assignment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDriverAssign {
    pub driver_id: i64,
    pub driver_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, price: f64, quantity: i32) -> OrderItem {
        OrderItem {
            name: name.to_string(),
            price,
            quantity,
            subtotal: None,
        }
    }

    #[test]
    fn test_line_subtotal() {
        assert_eq!(item("Pizza", 10.0, 2).line_subtotal(), 20.0);
        assert_eq!(item("Cola", 2.5, 3).line_subtotal(), 7.5);
    }

    #[test]
    fn test_order_total() {
        let items = vec![item("Pizza", 10.0, 2), item("Cola", 2.5, 3)];
        assert_eq!(order_total(&items), 27.5);
        assert_eq!(order_total(&[]), 0.0);
    }

    #[test]
    fn test_order_total_ignores_submitted_subtotals() {
        let mut burger = item("Burger", 8.0, 1);
        burger.subtotal = Some(999.0);
        assert_eq!(order_total(&[burger]), 8.0);
    }

    #[test]
    fn test_assign_payload_wire_names() {
        let json = r#"{"driverId": 7, "driverName": "Alex"}"#;
        let assign: OrderDriverAssign = serde_json::from_str(json).unwrap();
        assert_eq!(assign.driver_id, 7);
        assert_eq!(assign.driver_name, "Alex");
    }

    #[test]
    fn test_order_status_wire_format() {
        let json = r#"{"status": "in-transit"}"#;
        let update: OrderStatusUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.status, OrderStatus::InTransit);
    }
}
