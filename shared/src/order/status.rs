//! Order status state machine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status
///
/// Transition graph:
///
/// ```text
/// new ──────┬──> assigned ──┬──> preparing ──> in-transit ──> delivered
///           │               │        │
///           └───────────────┴────────┴──> cancelled
/// ```
///
/// `delivered` and `cancelled` are terminal. Every server-side mutation
/// validates against [`OrderStatus::can_transition_to`]; an order is
/// never hard-deleted, cancellation is the only way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Just created, no driver, restaurant not yet confirmed
    #[default]
    New,
    /// Driver assigned, waiting for the restaurant
    Assigned,
    /// Restaurant confirmed and is preparing the order
    Preparing,
    /// Driver picked up, on the way to the customer
    InTransit,
    /// Delivered to the customer (terminal)
    Delivered,
    /// Cancelled (terminal)
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::New,
        OrderStatus::Assigned,
        OrderStatus::Preparing,
        OrderStatus::InTransit,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Wire/database string for this status
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Assigned => "assigned",
            OrderStatus::Preparing => "preparing",
            OrderStatus::InTransit => "in-transit",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a wire/database string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(OrderStatus::New),
            "assigned" => Some(OrderStatus::Assigned),
            "preparing" => Some(OrderStatus::Preparing),
            "in-transit" => Some(OrderStatus::InTransit),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Statuses reachable from this one
    pub const fn next_statuses(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::New => &[
                OrderStatus::Assigned,
                OrderStatus::Preparing,
                OrderStatus::Cancelled,
            ],
            OrderStatus::Assigned => &[OrderStatus::Preparing, OrderStatus::Cancelled],
            OrderStatus::Preparing => &[OrderStatus::InTransit, OrderStatus::Cancelled],
            OrderStatus::InTransit => &[OrderStatus::Delivered],
            OrderStatus::Delivered | OrderStatus::Cancelled => &[],
        }
    }

    /// Whether `target` is reachable from this status in one step
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        self.next_statuses().contains(&target)
    }

    /// Terminal statuses have no outgoing transitions
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether a driver may be assigned while the order is in this status
    ///
    /// Assignment forces the status to `assigned`, so it is only valid
    /// before preparation starts.
    pub const fn allows_driver_assignment(&self) -> bool {
        matches!(self, OrderStatus::New | OrderStatus::Assigned)
    }

    /// Whether a driver is expected to be attached in this status
    pub const fn carries_driver(&self) -> bool {
        matches!(
            self,
            OrderStatus::Assigned
                | OrderStatus::Preparing
                | OrderStatus::InTransit
                | OrderStatus::Delivered
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_edge_set() {
        // Every allowed edge, and nothing else
        let edges = [
            (OrderStatus::New, OrderStatus::Assigned),
            (OrderStatus::New, OrderStatus::Preparing),
            (OrderStatus::New, OrderStatus::Cancelled),
            (OrderStatus::Assigned, OrderStatus::Preparing),
            (OrderStatus::Assigned, OrderStatus::Cancelled),
            (OrderStatus::Preparing, OrderStatus::InTransit),
            (OrderStatus::Preparing, OrderStatus::Cancelled),
            (OrderStatus::InTransit, OrderStatus::Delivered),
        ];

        for from in OrderStatus::ALL {
            for to in OrderStatus::ALL {
                let allowed = edges.contains(&(from, to));
                assert_eq!(
                    from.can_transition_to(to),
                    allowed,
                    "edge {} -> {} expected allowed={}",
                    from,
                    to,
                    allowed
                );
            }
        }
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Delivered.next_statuses().is_empty());
        assert!(OrderStatus::Cancelled.next_statuses().is_empty());

        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Preparing));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::New));
    }

    #[test]
    fn test_self_transition_rejected() {
        for status in OrderStatus::ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn test_driver_assignment_window() {
        assert!(OrderStatus::New.allows_driver_assignment());
        assert!(OrderStatus::Assigned.allows_driver_assignment());
        assert!(!OrderStatus::Preparing.allows_driver_assignment());
        assert!(!OrderStatus::InTransit.allows_driver_assignment());
        assert!(!OrderStatus::Delivered.allows_driver_assignment());
        assert!(!OrderStatus::Cancelled.allows_driver_assignment());
    }

    #[test]
    fn test_carries_driver() {
        assert!(!OrderStatus::New.carries_driver());
        assert!(!OrderStatus::Cancelled.carries_driver());
        assert!(OrderStatus::Assigned.carries_driver());
        assert!(OrderStatus::Preparing.carries_driver());
        assert!(OrderStatus::InTransit.carries_driver());
        assert!(OrderStatus::Delivered.carries_driver());
    }

    #[test]
    fn test_string_roundtrip() {
        for status in OrderStatus::ALL {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("in-transit"), Some(OrderStatus::InTransit));
        assert_eq!(OrderStatus::parse("voided"), None);
        assert_eq!(OrderStatus::parse(""), None);
    }

    #[test]
    fn test_serde_wire_format() {
        let json = serde_json::to_string(&OrderStatus::InTransit).unwrap();
        assert_eq!(json, "\"in-transit\"");

        let status: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
    }
}
