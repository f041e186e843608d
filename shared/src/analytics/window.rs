//! Time-window filtering over order creation timestamps
//!
//! Windows operate on `created_at` in local time. "Today" is a calendar
//! date match, not a rolling 24h window: an order created at 23:59:59
//! yesterday is excluded, one created at 00:00:01 today is included.

use crate::models::Order;
use chrono::{DateTime, Duration, Local, Months, TimeZone};
use serde::{Deserialize, Serialize};

/// Time window over `created_at`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", tag = "period")]
pub enum TimeWindow {
    /// No filtering
    #[default]
    All,
    /// Same local calendar date as `now`
    Today,
    /// `created_at >= now - 7 days`
    Week,
    /// `created_at >= one calendar month before now`
    Month,
    /// Inclusive millis range
    Custom { start: i64, end: i64 },
}

impl TimeWindow {
    /// Build a window from the wire `period` string plus optional custom
    /// bounds. Unknown periods and incomplete custom ranges fall back to
    /// `All`.
    pub fn from_period(period: &str, start: Option<i64>, end: Option<i64>) -> Self {
        match period {
            "today" => TimeWindow::Today,
            "week" => TimeWindow::Week,
            "month" => TimeWindow::Month,
            "custom" => match (start, end) {
                (Some(start), Some(end)) => TimeWindow::Custom { start, end },
                _ => TimeWindow::All,
            },
            _ => TimeWindow::All,
        }
    }

    /// Whether a creation timestamp falls inside this window
    pub fn contains(&self, created_at: i64, now: DateTime<Local>) -> bool {
        match self {
            TimeWindow::All => true,
            TimeWindow::Today => match Local.timestamp_millis_opt(created_at).single() {
                Some(created) => created.date_naive() == now.date_naive(),
                None => false,
            },
            TimeWindow::Week => created_at >= (now - Duration::days(7)).timestamp_millis(),
            TimeWindow::Month => {
                let cutoff = now
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(now)
                    .timestamp_millis();
                created_at >= cutoff
            }
            TimeWindow::Custom { start, end } => created_at >= *start && created_at <= *end,
        }
    }

    /// Filter an order slice down to this window
    pub fn filter<'a>(&self, orders: &'a [Order], now: DateTime<Local>) -> Vec<&'a Order> {
        orders
            .iter()
            .filter(|o| self.contains(o.created_at, now))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderItem;
    use crate::order::OrderStatus;
    use chrono::NaiveDate;

    fn order_created_at(created_at: i64) -> Order {
        Order {
            id: 1,
            customer_id: 1,
            restaurant_id: 1,
            driver_id: None,
            items: vec![OrderItem {
                name: "Pizza".to_string(),
                price: 10.0,
                quantity: 1,
                subtotal: None,
            }],
            total_amount: 10.0,
            status: OrderStatus::New,
            customer_name: None,
            restaurant_name: None,
            driver_name: None,
            delivery_address: None,
            delivery_coordinates: None,
            created_at,
            confirmed_at: None,
            in_transit_at: None,
            delivered_at: None,
            cancelled_at: None,
        }
    }

    fn local_millis(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> i64 {
        Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap()
                    .and_hms_opt(h, min, s)
                    .unwrap(),
            )
            .single()
            .unwrap()
            .timestamp_millis()
    }

    fn local_now(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Local> {
        Local
            .timestamp_millis_opt(local_millis(y, m, d, h, min, s))
            .single()
            .unwrap()
    }

    #[test]
    fn test_today_is_a_calendar_date_not_a_rolling_window() {
        let now = local_now(2025, 6, 15, 12, 0, 0);

        // 00:00:01 today is in
        assert!(TimeWindow::Today.contains(local_millis(2025, 6, 15, 0, 0, 1), now));
        // 23:59:59 yesterday is out, even though it is within 24 hours
        assert!(!TimeWindow::Today.contains(local_millis(2025, 6, 14, 23, 59, 59), now));
        // Late tonight still counts
        assert!(TimeWindow::Today.contains(local_millis(2025, 6, 15, 23, 59, 59), now));
    }

    #[test]
    fn test_week_window() {
        let now = local_now(2025, 6, 15, 12, 0, 0);

        assert!(TimeWindow::Week.contains(local_millis(2025, 6, 10, 0, 0, 0), now));
        assert!(TimeWindow::Week.contains(local_millis(2025, 6, 8, 12, 0, 0), now));
        assert!(!TimeWindow::Week.contains(local_millis(2025, 6, 8, 11, 59, 59), now));
    }

    #[test]
    fn test_month_is_a_calendar_month_back() {
        let now = local_now(2025, 3, 30, 12, 0, 0);

        // Feb 28 12:00 is the clamped cutoff for "one month before Mar 30"
        assert!(TimeWindow::Month.contains(local_millis(2025, 3, 1, 0, 0, 0), now));
        assert!(!TimeWindow::Month.contains(local_millis(2025, 2, 27, 0, 0, 0), now));
    }

    #[test]
    fn test_custom_window_is_inclusive() {
        let start = local_millis(2025, 6, 1, 0, 0, 0);
        let end = local_millis(2025, 6, 7, 23, 59, 59);
        let now = local_now(2025, 6, 15, 12, 0, 0);
        let window = TimeWindow::Custom { start, end };

        assert!(window.contains(start, now));
        assert!(window.contains(end, now));
        assert!(!window.contains(end + 1, now));
        assert!(!window.contains(start - 1, now));
    }

    #[test]
    fn test_from_period() {
        assert_eq!(TimeWindow::from_period("today", None, None), TimeWindow::Today);
        assert_eq!(TimeWindow::from_period("week", None, None), TimeWindow::Week);
        assert_eq!(TimeWindow::from_period("month", None, None), TimeWindow::Month);
        assert_eq!(
            TimeWindow::from_period("custom", Some(1), Some(2)),
            TimeWindow::Custom { start: 1, end: 2 }
        );
        // Incomplete custom range and unknown periods fall back to All
        assert_eq!(TimeWindow::from_period("custom", Some(1), None), TimeWindow::All);
        assert_eq!(TimeWindow::from_period("all", None, None), TimeWindow::All);
        assert_eq!(TimeWindow::from_period("quarter", None, None), TimeWindow::All);
    }

    #[test]
    fn test_filter() {
        let now = local_now(2025, 6, 15, 12, 0, 0);
        let orders = vec![
            order_created_at(local_millis(2025, 6, 15, 8, 0, 0)),
            order_created_at(local_millis(2025, 6, 14, 8, 0, 0)),
            order_created_at(local_millis(2025, 6, 1, 8, 0, 0)),
        ];

        assert_eq!(TimeWindow::Today.filter(&orders, now).len(), 1);
        assert_eq!(TimeWindow::Week.filter(&orders, now).len(), 2);
        assert_eq!(TimeWindow::All.filter(&orders, now).len(), 3);
    }
}
