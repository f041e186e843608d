//! Aggregate metrics over an order collection

use crate::models::Order;
use crate::order::OrderStatus;
use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Order counts per lifecycle status
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub new: i64,
    pub assigned: i64,
    pub preparing: i64,
    pub in_transit: i64,
    pub delivered: i64,
    pub cancelled: i64,
}

impl StatusBreakdown {
    /// Count orders per status
    pub fn count(orders: &[&Order]) -> Self {
        let mut breakdown = Self::default();
        for order in orders {
            match order.status {
                OrderStatus::New => breakdown.new += 1,
                OrderStatus::Assigned => breakdown.assigned += 1,
                OrderStatus::Preparing => breakdown.preparing += 1,
                OrderStatus::InTransit => breakdown.in_transit += 1,
                OrderStatus::Delivered => breakdown.delivered += 1,
                OrderStatus::Cancelled => breakdown.cancelled += 1,
            }
        }
        breakdown
    }

    /// Count for one status
    pub fn get(&self, status: OrderStatus) -> i64 {
        match status {
            OrderStatus::New => self.new,
            OrderStatus::Assigned => self.assigned,
            OrderStatus::Preparing => self.preparing,
            OrderStatus::InTransit => self.in_transit,
            OrderStatus::Delivered => self.delivered,
            OrderStatus::Cancelled => self.cancelled,
        }
    }

    /// Total across all statuses
    pub fn total(&self) -> i64 {
        self.new + self.assigned + self.preparing + self.in_transit + self.delivered
            + self.cancelled
    }

    /// Share of the total for one status, rounded to a whole percent
    pub fn percent(&self, status: OrderStatus) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.get(status) as f64 / total as f64 * 100.0).round()
    }
}

/// Driver ranked by delivered-order count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverPerformanceItem {
    pub id: i64,
    pub name: String,
    pub deliveries: i64,
    /// Mean confirmed-to-delivered time in whole minutes
    pub avg_delivery_time: Option<i64>,
}

/// Restaurant ranked by summed order value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantPerformanceItem {
    pub id: i64,
    pub name: String,
    pub sales: f64,
    pub orders: i64,
}

/// One day of the daily time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesItem {
    /// Local calendar date, `YYYY-MM-DD`
    pub date: String,
    pub orders: i64,
    pub sales: f64,
}

/// Full analytics summary for a (possibly windowed) order set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_orders: i64,
    pub total_sales: f64,
    pub avg_order_value: f64,
    /// Whole minutes
    pub avg_delivery_time: i64,
    /// Percent of non-new orders that were delivered
    pub completion_rate: f64,
    pub order_statuses: StatusBreakdown,
    pub top_drivers: Vec<DriverPerformanceItem>,
    pub top_restaurants: Vec<RestaurantPerformanceItem>,
}

/// Summary plus the daily series, as served by the sales endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesAnalytics {
    pub summary: AnalyticsSummary,
    pub time_series: Vec<TimeSeriesItem>,
}

/// Sum of order totals
pub fn total_sales(orders: &[&Order]) -> f64 {
    orders.iter().map(|o| o.total_amount).sum()
}

/// Mean order value, rounded to two decimals
pub fn avg_order_value(orders: &[&Order]) -> f64 {
    if orders.is_empty() {
        return 0.0;
    }
    let mean = total_sales(orders) / orders.len() as f64;
    (mean * 100.0).round() / 100.0
}

/// Mean confirmed-to-delivered time in whole minutes, over delivered
/// orders carrying both timestamps
pub fn avg_delivery_minutes(orders: &[&Order]) -> i64 {
    let mut total_ms = 0i64;
    let mut count = 0i64;
    for order in orders {
        if order.status != OrderStatus::Delivered {
            continue;
        }
        if let (Some(confirmed), Some(delivered)) = (order.confirmed_at, order.delivered_at) {
            total_ms += delivered - confirmed;
            count += 1;
        }
    }
    if count == 0 {
        return 0;
    }
    (total_ms as f64 / count as f64 / 60_000.0).round() as i64
}

/// Percent of non-new orders that reached `delivered`
pub fn completion_rate(breakdown: &StatusBreakdown) -> f64 {
    let denominator = breakdown.total() - breakdown.new;
    if denominator <= 0 {
        return 0.0;
    }
    breakdown.delivered as f64 / denominator as f64 * 100.0
}

/// Top drivers by delivered-order count, descending
///
/// Ties keep first-appearance order (stable sort), so the ranking is
/// reproducible over the same input.
pub fn top_drivers(orders: &[&Order], limit: usize) -> Vec<DriverPerformanceItem> {
    struct Acc {
        id: i64,
        name: String,
        deliveries: i64,
        total_ms: i64,
        timed: i64,
    }

    let mut accs: Vec<Acc> = Vec::new();
    for order in orders {
        if order.status != OrderStatus::Delivered {
            continue;
        }
        let Some(driver_id) = order.driver_id else {
            continue;
        };
        let timed = match (order.confirmed_at, order.delivered_at) {
            (Some(confirmed), Some(delivered)) => Some(delivered - confirmed),
            _ => None,
        };
        match accs.iter_mut().find(|a| a.id == driver_id) {
            Some(acc) => {
                acc.deliveries += 1;
                if let Some(ms) = timed {
                    acc.total_ms += ms;
                    acc.timed += 1;
                }
            }
            None => accs.push(Acc {
                id: driver_id,
                name: order
                    .driver_name
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                deliveries: 1,
                total_ms: timed.unwrap_or(0),
                timed: i64::from(timed.is_some()),
            }),
        }
    }

    accs.sort_by(|a, b| b.deliveries.cmp(&a.deliveries));
    accs.truncate(limit);
    accs.into_iter()
        .map(|acc| DriverPerformanceItem {
            id: acc.id,
            name: acc.name,
            deliveries: acc.deliveries,
            avg_delivery_time: (acc.timed > 0)
                .then(|| (acc.total_ms as f64 / acc.timed as f64 / 60_000.0).round() as i64),
        })
        .collect()
}

/// Top restaurants by summed order value, descending
pub fn top_restaurants(orders: &[&Order], limit: usize) -> Vec<RestaurantPerformanceItem> {
    struct Acc {
        id: i64,
        name: String,
        sales: f64,
        orders: i64,
    }

    let mut accs: Vec<Acc> = Vec::new();
    for order in orders {
        match accs.iter_mut().find(|a| a.id == order.restaurant_id) {
            Some(acc) => {
                acc.sales += order.total_amount;
                acc.orders += 1;
            }
            None => accs.push(Acc {
                id: order.restaurant_id,
                name: order
                    .restaurant_name
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_string()),
                sales: order.total_amount,
                orders: 1,
            }),
        }
    }

    accs.sort_by(|a, b| b.sales.partial_cmp(&a.sales).unwrap_or(std::cmp::Ordering::Equal));
    accs.truncate(limit);
    accs.into_iter()
        .map(|acc| RestaurantPerformanceItem {
            id: acc.id,
            name: acc.name,
            sales: acc.sales,
            orders: acc.orders,
        })
        .collect()
}

/// Orders and sales per local calendar day, ascending by date
pub fn daily_time_series(orders: &[&Order]) -> Vec<TimeSeriesItem> {
    let mut days: BTreeMap<chrono::NaiveDate, (i64, f64)> = BTreeMap::new();
    for order in orders {
        let Some(created) = Local.timestamp_millis_opt(order.created_at).single() else {
            continue;
        };
        let entry = days.entry(created.date_naive()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += order.total_amount;
    }
    days.into_iter()
        .map(|(date, (orders, sales))| TimeSeriesItem {
            date: date.format("%Y-%m-%d").to_string(),
            orders,
            sales,
        })
        .collect()
}

/// Combine all metrics for a (windowed) order set
pub fn summarize(orders: &[&Order], top_n: usize) -> AnalyticsSummary {
    let order_statuses = StatusBreakdown::count(orders);
    AnalyticsSummary {
        total_orders: orders.len() as i64,
        total_sales: total_sales(orders),
        avg_order_value: avg_order_value(orders),
        avg_delivery_time: avg_delivery_minutes(orders),
        completion_rate: completion_rate(&order_statuses),
        top_drivers: top_drivers(orders, top_n),
        top_restaurants: top_restaurants(orders, top_n),
        order_statuses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderItem;

    const MINUTE: i64 = 60_000;

    fn order(id: i64, status: OrderStatus, total: f64) -> Order {
        Order {
            id,
            customer_id: 1,
            restaurant_id: 1,
            driver_id: None,
            items: vec![OrderItem {
                name: "Pizza".to_string(),
                price: total,
                quantity: 1,
                subtotal: None,
            }],
            total_amount: total,
            status,
            customer_name: None,
            restaurant_name: Some("Mario's".to_string()),
            driver_name: None,
            delivery_address: None,
            delivery_coordinates: None,
            created_at: 1_700_000_000_000 + id * MINUTE,
            confirmed_at: None,
            in_transit_at: None,
            delivered_at: None,
            cancelled_at: None,
        }
    }

    fn delivered(id: i64, driver_id: i64, driver: &str, minutes: i64) -> Order {
        let mut o = order(id, OrderStatus::Delivered, 20.0);
        o.driver_id = Some(driver_id);
        o.driver_name = Some(driver.to_string());
        o.confirmed_at = Some(o.created_at);
        o.delivered_at = Some(o.created_at + minutes * MINUTE);
        o
    }

    fn refs(orders: &[Order]) -> Vec<&Order> {
        orders.iter().collect()
    }

    #[test]
    fn test_status_breakdown() {
        let orders = vec![
            order(1, OrderStatus::New, 10.0),
            order(2, OrderStatus::New, 10.0),
            order(3, OrderStatus::Preparing, 10.0),
            order(4, OrderStatus::Delivered, 10.0),
            order(5, OrderStatus::Cancelled, 10.0),
        ];
        let breakdown = StatusBreakdown::count(&refs(&orders));

        assert_eq!(breakdown.new, 2);
        assert_eq!(breakdown.preparing, 1);
        assert_eq!(breakdown.delivered, 1);
        assert_eq!(breakdown.cancelled, 1);
        assert_eq!(breakdown.assigned, 0);
        assert_eq!(breakdown.total(), 5);
    }

    #[test]
    fn test_status_percent_rounds_to_whole() {
        let orders = vec![
            order(1, OrderStatus::New, 10.0),
            order(2, OrderStatus::New, 10.0),
            order(3, OrderStatus::Delivered, 10.0),
        ];
        let breakdown = StatusBreakdown::count(&refs(&orders));

        // 2/3 -> 67, 1/3 -> 33
        assert_eq!(breakdown.percent(OrderStatus::New), 67.0);
        assert_eq!(breakdown.percent(OrderStatus::Delivered), 33.0);
        assert_eq!(breakdown.percent(OrderStatus::Cancelled), 0.0);
    }

    #[test]
    fn test_avg_order_value_two_decimal_rounding() {
        let orders = vec![
            order(1, OrderStatus::New, 10.0),
            order(2, OrderStatus::New, 10.0),
            order(3, OrderStatus::New, 10.01),
        ];
        // mean = 10.003333... -> 10.0
        assert_eq!(avg_order_value(&refs(&orders)), 10.0);

        let orders = vec![order(1, OrderStatus::New, 10.0), order(2, OrderStatus::New, 10.05)];
        // mean = 10.025 -> 10.03 (round half away from zero)
        assert_eq!(avg_order_value(&refs(&orders)), 10.03);

        assert_eq!(avg_order_value(&[]), 0.0);
    }

    #[test]
    fn test_avg_delivery_minutes() {
        let orders = vec![
            delivered(1, 1, "Alex", 30),
            delivered(2, 1, "Alex", 45),
            // In transit with timestamps set does not count
            {
                let mut o = delivered(3, 2, "Kim", 10);
                o.status = OrderStatus::InTransit;
                o
            },
            // Delivered without a confirmation timestamp does not count
            {
                let mut o = delivered(4, 2, "Kim", 10);
                o.confirmed_at = None;
                o
            },
        ];
        // (30 + 45) / 2 = 37.5 -> 38
        assert_eq!(avg_delivery_minutes(&refs(&orders)), 38);
        assert_eq!(avg_delivery_minutes(&[]), 0);
    }

    #[test]
    fn test_completion_rate_excludes_new() {
        let orders = vec![
            order(1, OrderStatus::New, 10.0),
            order(2, OrderStatus::Delivered, 10.0),
            order(3, OrderStatus::Delivered, 10.0),
            order(4, OrderStatus::Cancelled, 10.0),
        ];
        let breakdown = StatusBreakdown::count(&refs(&orders));
        // 2 delivered out of 3 non-new
        let rate = completion_rate(&breakdown);
        assert!((rate - 66.6666).abs() < 0.01);

        let all_new = StatusBreakdown::count(&refs(&[order(1, OrderStatus::New, 10.0)]));
        assert_eq!(completion_rate(&all_new), 0.0);
    }

    #[test]
    fn test_top_drivers_ranking_and_stable_ties() {
        let orders = vec![
            delivered(1, 10, "Alex", 30),
            delivered(2, 20, "Kim", 30),
            delivered(3, 20, "Kim", 60),
            delivered(4, 30, "Sam", 30),
            // Ties between Alex (1) and Sam (1) keep first-seen order
        ];
        let top = top_drivers(&refs(&orders), 5);

        assert_eq!(top.len(), 3);
        assert_eq!(top[0].id, 20);
        assert_eq!(top[0].deliveries, 2);
        assert_eq!(top[0].avg_delivery_time, Some(45));
        assert_eq!(top[1].id, 10);
        assert_eq!(top[2].id, 30);

        let top1 = top_drivers(&refs(&orders), 1);
        assert_eq!(top1.len(), 1);
        assert_eq!(top1[0].name, "Kim");
    }

    #[test]
    fn test_top_drivers_skips_undelivered_and_unassigned() {
        let mut no_driver = order(1, OrderStatus::Delivered, 10.0);
        no_driver.confirmed_at = Some(no_driver.created_at);
        no_driver.delivered_at = Some(no_driver.created_at + MINUTE);

        let orders = vec![no_driver, order(2, OrderStatus::InTransit, 10.0)];
        assert!(top_drivers(&refs(&orders), 5).is_empty());
    }

    #[test]
    fn test_top_restaurants_by_sales() {
        let mut a = order(1, OrderStatus::Delivered, 30.0);
        a.restaurant_id = 1;
        a.restaurant_name = Some("Mario's".to_string());
        let mut b = order(2, OrderStatus::New, 25.0);
        b.restaurant_id = 2;
        b.restaurant_name = Some("Sakura".to_string());
        let mut c = order(3, OrderStatus::Cancelled, 10.0);
        c.restaurant_id = 2;
        c.restaurant_name = Some("Sakura".to_string());

        let orders = vec![a, b, c];
        let top = top_restaurants(&refs(&orders), 5);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].id, 2);
        assert_eq!(top[0].sales, 35.0);
        assert_eq!(top[0].orders, 2);
        assert_eq!(top[1].id, 1);
        assert_eq!(top[1].sales, 30.0);
    }

    #[test]
    fn test_daily_time_series_sorted_ascending() {
        let day = 24 * 60 * MINUTE;
        let mut a = order(1, OrderStatus::New, 10.0);
        a.created_at = 1_700_000_000_000 + 2 * day;
        let mut b = order(2, OrderStatus::New, 15.0);
        b.created_at = 1_700_000_000_000;
        let mut c = order(3, OrderStatus::New, 5.0);
        c.created_at = 1_700_000_000_000 + 2 * day + MINUTE;

        let orders = vec![a, b, c];
        let series = daily_time_series(&refs(&orders));

        assert_eq!(series.len(), 2);
        assert!(series[0].date < series[1].date);
        assert_eq!(series[0].orders, 1);
        assert_eq!(series[0].sales, 15.0);
        assert_eq!(series[1].orders, 2);
        assert_eq!(series[1].sales, 15.0);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let orders = vec![
            order(1, OrderStatus::New, 12.34),
            delivered(2, 10, "Alex", 30),
            delivered(3, 20, "Kim", 45),
            order(4, OrderStatus::Cancelled, 8.0),
        ];
        let orders = refs(&orders);

        let first = summarize(&orders, 5);
        let second = summarize(&orders, 5);

        assert_eq!(first, second);
        assert_eq!(first.total_orders, 4);
        assert_eq!(first.order_statuses.delivered, 2);
    }
}
