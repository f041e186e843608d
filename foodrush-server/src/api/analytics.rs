//! Analytics endpoints: sales breakdown and dashboard summary
//!
//! Both endpoints fetch the order set and delegate to the pure
//! aggregation in `shared::analytics`, so the numbers the console
//! derives locally and the numbers served here always agree.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Local;
use serde::Deserialize;
use shared::analytics::{AnalyticsSummary, SalesAnalytics, TimeWindow, daily_time_series, summarize};
use shared::error::{AppError, ErrorCode};

use crate::db;
use crate::db::orders::OrderFilter;
use crate::state::AppState;

use super::ApiResult;

const TOP_N: usize = 5;

/// POST /api/analytics/sales
#[derive(Deserialize)]
pub struct TimeFilterParams {
    /// all | today | week | month | custom
    #[serde(default = "default_period")]
    pub period: String,
    /// Custom range start (millis, inclusive)
    pub start_date: Option<i64>,
    /// Custom range end (millis, inclusive)
    pub end_date: Option<i64>,
}

fn default_period() -> String {
    "all".to_string()
}

pub async fn sales(
    State(state): State<AppState>,
    Json(params): Json<TimeFilterParams>,
) -> ApiResult<SalesAnalytics> {
    let orders = db::orders::list(&state.pool, &OrderFilter::default())
        .await
        .map_err(|e| {
            tracing::error!("Analytics query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    let window = TimeWindow::from_period(&params.period, params.start_date, params.end_date);
    let windowed = window.filter(&orders, Local::now());

    Ok(Json(SalesAnalytics {
        summary: summarize(&windowed, TOP_N),
        time_series: daily_time_series(&windowed),
    }))
}

/// GET /api/analytics/dashboard?period=week
#[derive(Deserialize)]
pub struct DashboardQuery {
    #[serde(default = "default_dashboard_period")]
    pub period: String,
}

fn default_dashboard_period() -> String {
    "week".to_string()
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<AnalyticsSummary> {
    let orders = db::orders::list(&state.pool, &OrderFilter::default())
        .await
        .map_err(|e| {
            tracing::error!("Dashboard query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    let window = TimeWindow::from_period(&query.period, None, None);
    let windowed = window.filter(&orders, Local::now());

    Ok(Json(summarize(&windowed, TOP_N)))
}
