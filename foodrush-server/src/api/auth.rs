//! Authentication endpoints: token issuance, registration, session check

use axum::{Extension, Form, Json, extract::State};
use shared::error::{AppError, ErrorCode};
use shared::models::{LoginForm, TokenResponse, UserCreate, UserInfo};
use shared::util::now_millis;

use crate::auth::{Identity, create_token};
use crate::db;
use crate::state::AppState;
use crate::util::{hash_password, verify_password};

use super::ApiResult;

/// POST /api/auth/token (form-encoded, OAuth2 password style)
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> ApiResult<TokenResponse> {
    let user = db::users::find_by_username(&state.pool, form.username.trim())
        .await
        .map_err(|e| {
            tracing::error!("DB error during login: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&form.password, &user.hashed_password) {
        return Err(AppError::invalid_credentials());
    }

    if !user.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let token =
        create_token(user.id, &user.username, &user.role, &state.jwt_secret).map_err(|e| {
            tracing::error!("JWT creation failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(TokenResponse {
        access_token: token,
        token_type: "bearer".to_string(),
        user_id: user.id,
        username: user.username,
        role: user.role,
    }))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<UserCreate>,
) -> ApiResult<UserInfo> {
    let username = req.username.trim();
    let email = req.email.trim().to_lowercase();

    if username.is_empty() || email.is_empty() {
        return Err(AppError::validation("Username and email are required"));
    }
    if req.password.len() < 8 {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }

    if db::users::find_by_username(&state.pool, username)
        .await
        .map_err(|e| {
            tracing::error!("DB error during registration: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::UsernameExists));
    }

    if db::users::find_by_email(&state.pool, &email)
        .await
        .map_err(|e| {
            tracing::error!("DB error during registration: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::EmailExists));
    }

    let hashed =
        hash_password(&req.password).map_err(|_| AppError::new(ErrorCode::InternalError))?;
    let role = req.role.as_deref().unwrap_or("user");

    let user = db::users::create(&state.pool, username, &email, &hashed, role, now_millis())
        .await
        .map_err(|e| {
            tracing::error!("Failed to create user: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(user.info()))
}

/// GET /api/auth/users/me
///
/// The console validates its persisted session against this endpoint on
/// load; a 401/404 clears the stored token.
pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<UserInfo> {
    let user = db::users::find_by_id(&state.pool, identity.user_id)
        .await
        .map_err(|e| {
            tracing::error!("DB error during session check: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    Ok(Json(user.info()))
}

/// GET /api/auth/users (admin)
pub async fn list_users(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Vec<UserInfo>> {
    identity.require_admin()?;

    let users = db::users::list(&state.pool).await.map_err(|e| {
        tracing::error!("Users query error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    Ok(Json(users.iter().map(db::users::User::info).collect()))
}
