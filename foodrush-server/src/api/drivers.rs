//! Driver endpoints

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{Driver, DriverCreate, DriverStatus, DriverUpdate};
use shared::util::now_millis;

use crate::auth::Identity;
use crate::db;
use crate::state::AppState;

use super::ApiResult;

/// GET /api/drivers
#[derive(Deserialize)]
pub struct DriversQuery {
    pub status: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<DriversQuery>,
) -> ApiResult<Vec<Driver>> {
    let status = match query.status.as_deref() {
        None | Some("all") => None,
        Some(s) => Some(
            DriverStatus::parse(s).ok_or_else(|| AppError::new(ErrorCode::InvalidDriverStatus))?,
        ),
    };

    let drivers = db::drivers::list(&state.pool, status).await.map_err(|e| {
        tracing::error!("Drivers query error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(drivers))
}

/// POST /api/drivers
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<DriverCreate>,
) -> ApiResult<Driver> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Driver name is required"));
    }

    let driver = db::drivers::create(&state.pool, name, req.status, now_millis())
        .await
        .map_err(|e| {
            tracing::error!("Failed to create driver: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(driver))
}

/// GET /api/drivers/{id}
pub async fn get_by_id(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Driver> {
    let driver = db::drivers::find_by_id(&state.pool, id)
        .await
        .map_err(|e| {
            tracing::error!("Driver query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::DriverNotFound))?;

    Ok(Json(driver))
}

/// PUT /api/drivers/{id}
///
/// Offlining a driver leaves orders already assigned to them untouched.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<DriverUpdate>,
) -> ApiResult<Driver> {
    let driver = db::drivers::update(&state.pool, id, req.name.as_deref(), req.status)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update driver: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::DriverNotFound))?;

    Ok(Json(driver))
}

/// DELETE /api/drivers/{id} (admin)
pub async fn delete(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    identity.require_admin()?;

    let deleted = db::drivers::delete(&state.pool, id).await.map_err(|e| {
        tracing::error!("Failed to delete driver: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    if !deleted {
        return Err(AppError::new(ErrorCode::DriverNotFound));
    }

    Ok(StatusCode::NO_CONTENT)
}
