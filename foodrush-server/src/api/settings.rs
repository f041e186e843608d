//! Platform settings endpoints

use axum::{Extension, Json, extract::State};
use shared::error::{AppError, ErrorCode};
use shared::models::{Settings, SettingsUpdate};
use shared::util::now_millis;

use crate::auth::Identity;
use crate::db;
use crate::state::AppState;

use super::ApiResult;

/// GET /api/settings
///
/// The singleton row is created with defaults on first read.
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<Settings> {
    let settings = db::settings::get_or_create(&state.pool, now_millis())
        .await
        .map_err(|e| {
            tracing::error!("Settings query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(settings))
}

/// POST /api/settings (admin)
///
/// Upsert on the singleton row; the last writer wins.
pub async fn update_settings(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<SettingsUpdate>,
) -> ApiResult<Settings> {
    identity.require_admin()?;

    let settings = db::settings::upsert(&state.pool, &req, now_millis())
        .await
        .map_err(|e| {
            tracing::error!("Failed to update settings: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(settings))
}
