//! Restaurant endpoints

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use http::StatusCode;
use shared::error::{AppError, ErrorCode};
use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};
use shared::util::now_millis;

use crate::auth::Identity;
use crate::db;
use crate::state::AppState;

use super::ApiResult;

/// GET /api/restaurants
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Restaurant>> {
    let restaurants = db::restaurants::list(&state.pool).await.map_err(|e| {
        tracing::error!("Restaurants query error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(restaurants))
}

/// POST /api/restaurants
///
/// Name + address pairs are unique; duplicates are rejected.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<RestaurantCreate>,
) -> ApiResult<Restaurant> {
    let name = req.name.trim();
    let address = req.address.trim();
    if name.is_empty() || address.is_empty() {
        return Err(AppError::validation("Name and address are required"));
    }

    let duplicate = db::restaurants::exists_by_name_address(&state.pool, name, address)
        .await
        .map_err(|e| {
            tracing::error!("Restaurant duplicate check error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    if duplicate {
        return Err(AppError::new(ErrorCode::RestaurantExists));
    }

    let restaurant = db::restaurants::create(
        &state.pool,
        name,
        address,
        req.cuisine_type.as_deref(),
        req.coordinates,
        now_millis(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to create restaurant: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(restaurant))
}

/// GET /api/restaurants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Restaurant> {
    let restaurant = db::restaurants::find_by_id(&state.pool, id)
        .await
        .map_err(|e| {
            tracing::error!("Restaurant query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    Ok(Json(restaurant))
}

/// PUT /api/restaurants/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RestaurantUpdate>,
) -> ApiResult<Restaurant> {
    let restaurant = db::restaurants::update(&state.pool, id, &req)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update restaurant: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound))?;

    Ok(Json(restaurant))
}

/// DELETE /api/restaurants/{id} (admin)
pub async fn delete(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    identity.require_admin()?;

    let deleted = db::restaurants::delete(&state.pool, id).await.map_err(|e| {
        tracing::error!("Failed to delete restaurant: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    if !deleted {
        return Err(AppError::new(ErrorCode::RestaurantNotFound));
    }

    Ok(StatusCode::NO_CONTENT)
}
