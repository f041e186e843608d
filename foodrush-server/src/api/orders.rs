//! Order endpoints: listing, creation, and the guarded lifecycle mutations

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::OrderStatus;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    Order, OrderCreate, OrderDriverAssign, OrderStatusUpdate, TOTAL_TOLERANCE, order_total,
};
use shared::util::now_millis;

use crate::db;
use crate::db::orders::OrderFilter;
use crate::state::AppState;

use super::ApiResult;

/// GET /api/orders
#[derive(Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
    /// Inclusive `created_at` lower bound (millis)
    pub from: Option<i64>,
    /// Inclusive `created_at` upper bound (millis)
    pub to: Option<i64>,
    /// Free-text match over id/customer/restaurant/driver/address
    pub q: Option<String>,
    /// `desc` (default) or `asc`
    pub order: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn parse_status_filter(status: Option<&str>) -> Result<Option<OrderStatus>, AppError> {
    match status {
        None | Some("all") => Ok(None),
        Some(s) => OrderStatus::parse(s)
            .map(Some)
            .ok_or_else(|| AppError::validation(format!("Unknown order status '{s}'"))),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> ApiResult<Vec<Order>> {
    let ascending = match query.order.as_deref() {
        None | Some("desc") => false,
        Some("asc") => true,
        Some(other) => {
            return Err(AppError::validation(format!(
                "Unknown sort order '{other}', expected 'asc' or 'desc'"
            )));
        }
    };

    let filter = OrderFilter {
        status: parse_status_filter(query.status.as_deref())?,
        from: query.from,
        to: query.to,
        q: query.q.filter(|q| !q.trim().is_empty()),
        ascending,
        limit: query.limit,
        offset: query.offset,
    };

    let orders = db::orders::list(&state.pool, &filter).await.map_err(|e| {
        tracing::error!("Orders query error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(orders))
}

/// POST /api/orders
///
/// The submitted `total_amount` is never trusted: the total is recomputed
/// from the items server-side and the request is rejected when the two
/// drift apart by more than the tolerance.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<OrderCreate>,
) -> ApiResult<Order> {
    if req.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    if req
        .items
        .iter()
        .any(|item| item.quantity <= 0 || item.price < 0.0)
    {
        return Err(AppError::validation(
            "Item quantities must be positive and prices non-negative",
        ));
    }

    if let Some(status) = req.status
        && status != OrderStatus::New
    {
        return Err(AppError::validation(format!(
            "Orders are created as 'new', not '{status}'"
        )));
    }

    let total = order_total(&req.items);
    if total <= 0.0 {
        return Err(AppError::validation("Order total must be positive"));
    }
    if (req.total_amount - total).abs() > TOTAL_TOLERANCE {
        return Err(AppError::new(ErrorCode::TotalMismatch)
            .with_detail("submitted", req.total_amount)
            .with_detail("computed", total));
    }

    let order = db::orders::create(&state.pool, &req, total, now_millis())
        .await
        .map_err(AppError::from)?;

    Ok(Json(order))
}

/// GET /api/orders/{id}
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Order> {
    let order = db::orders::find_by_id(&state.pool, id)
        .await
        .map_err(|e| {
            tracing::error!("Order query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    Ok(Json(order))
}

/// PUT /api/orders/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<OrderStatusUpdate>,
) -> ApiResult<Order> {
    let order = db::orders::update_status(&state.pool, id, req.status, now_millis())
        .await
        .map_err(AppError::from)?;

    Ok(Json(order))
}

/// PUT /api/orders/{id}/assign-driver
pub async fn assign_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<OrderDriverAssign>,
) -> ApiResult<Order> {
    if req.driver_name.trim().is_empty() {
        return Err(AppError::validation("Driver name is required"));
    }

    let order = db::orders::assign_driver(&state.pool, id, req.driver_id, &req.driver_name)
        .await
        .map_err(AppError::from)?;

    Ok(Json(order))
}
