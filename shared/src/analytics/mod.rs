//! Pure analytics over fetched collections
//!
//! Every function here is a pure derivation over an order slice: same
//! input, same output, including rounding. The current time is always
//! passed in explicitly so time-window filtering stays deterministic and
//! testable. Both the server's analytics endpoints and the console
//! client's dashboard tiles run through this module.

mod summary;
mod window;

pub use summary::{
    AnalyticsSummary, DriverPerformanceItem, RestaurantPerformanceItem, SalesAnalytics,
    StatusBreakdown, TimeSeriesItem, avg_delivery_minutes, avg_order_value, completion_rate,
    daily_time_series, summarize, top_drivers, top_restaurants, total_sales,
};
pub use window::TimeWindow;
