//! Customer endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use http::StatusCode;
use shared::error::{AppError, ErrorCode};
use shared::models::{Customer, CustomerCreate, CustomerUpdate};
use shared::util::now_millis;

use crate::auth::Identity;
use crate::db;
use crate::state::AppState;

use super::ApiResult;

/// GET /api/customers
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Customer>> {
    let customers = db::customers::list(&state.pool).await.map_err(|e| {
        tracing::error!("Customers query error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(customers))
}

/// POST /api/customers
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CustomerCreate>,
) -> ApiResult<Customer> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Customer name is required"));
    }

    let customer = db::customers::create(&state.pool, name, &req.addresses, now_millis())
        .await
        .map_err(|e| {
            tracing::error!("Failed to create customer: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(customer))
}

/// GET /api/customers/{id}
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Customer> {
    let customer = db::customers::find_by_id(&state.pool, id)
        .await
        .map_err(|e| {
            tracing::error!("Customer query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;

    Ok(Json(customer))
}

/// PUT /api/customers/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<CustomerUpdate>,
) -> ApiResult<Customer> {
    let customer = db::customers::update(&state.pool, id, &req)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update customer: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;

    Ok(Json(customer))
}

/// DELETE /api/customers/{id} (admin)
pub async fn delete(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    identity.require_admin()?;

    let deleted = db::customers::delete(&state.pool, id).await.map_err(|e| {
        tracing::error!("Failed to delete customer: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    if !deleted {
        return Err(AppError::new(ErrorCode::CustomerNotFound));
    }

    Ok(StatusCode::NO_CONTENT)
}
