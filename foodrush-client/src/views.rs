//! Pure view derivations over the store
//!
//! Everything here is recomputed from the in-memory collections on every
//! render; none of it mutates state or talks to the network.

use chrono::{DateTime, Local};
use serde::Serialize;
use shared::OrderStatus;
use shared::analytics::{self, AnalyticsSummary, TimeWindow};
use shared::models::{Driver, DriverStatus, Order};

/// Order-list filter: status, free text, and time window combined
#[derive(Debug, Clone, Default)]
pub struct OrderSearch {
    pub status: Option<OrderStatus>,
    /// Case-insensitive match over id/customer/restaurant/driver/address
    pub query: Option<String>,
    pub window: TimeWindow,
}

impl OrderSearch {
    pub fn apply<'a>(&self, orders: &'a [Order], now: DateTime<Local>) -> Vec<&'a Order> {
        let needle = self
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        orders
            .iter()
            .filter(|order| self.status.is_none_or(|status| order.status == status))
            .filter(|order| self.window.contains(order.created_at, now))
            .filter(|order| match &needle {
                Some(needle) => matches_text(order, needle),
                None => true,
            })
            .collect()
    }
}

fn matches_text(order: &Order, needle: &str) -> bool {
    let field_matches = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|v| v.to_lowercase().contains(needle))
    };

    order.id.to_string().contains(needle)
        || field_matches(&order.customer_name)
        || field_matches(&order.restaurant_name)
        || field_matches(&order.driver_name)
        || field_matches(&order.delivery_address)
}

/// Headline numbers for the dashboard tiles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardTiles {
    pub total_orders: i64,
    /// Orders not yet delivered or cancelled
    pub active_orders: i64,
    pub todays_orders: i64,
    pub todays_sales: f64,
    pub available_drivers: i64,
    /// Whole minutes over the full collection
    pub avg_delivery_time: i64,
}

/// Derive the dashboard tiles from the fetched collections
pub fn dashboard_tiles(orders: &[Order], drivers: &[Driver], now: DateTime<Local>) -> DashboardTiles {
    let all: Vec<&Order> = orders.iter().collect();
    let today = TimeWindow::Today.filter(orders, now);

    DashboardTiles {
        total_orders: all.len() as i64,
        active_orders: all.iter().filter(|o| !o.status.is_terminal()).count() as i64,
        todays_orders: today.len() as i64,
        todays_sales: analytics::total_sales(&today),
        available_drivers: drivers
            .iter()
            .filter(|d| d.status == DriverStatus::Available)
            .count() as i64,
        avg_delivery_time: analytics::avg_delivery_minutes(&all),
    }
}

/// Full analytics panel over a windowed view of the collection
pub fn analytics_panel(
    orders: &[Order],
    window: TimeWindow,
    now: DateTime<Local>,
    top_n: usize,
) -> AnalyticsSummary {
    let windowed = window.filter(orders, now);
    analytics::summarize(&windowed, top_n)
}
