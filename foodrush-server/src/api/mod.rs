//! API routes for foodrush-server
//!
//! Success responses are plain JSON payloads; failures go through
//! [`shared::error::AppError`] and carry the `{code, message, details?}`
//! envelope. A 401 from any protected route signals the console to drop
//! its session.

pub mod analytics;
pub mod auth;
pub mod customers;
pub mod drivers;
pub mod health;
pub mod orders;
pub mod restaurants;
pub mod settings;

use axum::routing::{get, post, put};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::auth_middleware;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, shared::error::AppError>;

/// Create the combined router
pub fn router(state: AppState) -> Router {
    // Token issuance and registration (no auth)
    let public = Router::new()
        .route("/api/auth/token", post(auth::login))
        .route("/api/auth/register", post(auth::register));

    // Everything else requires a bearer token
    let protected = Router::new()
        .route("/api/auth/users/me", get(auth::me))
        .route("/api/auth/users", get(auth::list_users))
        .route("/api/orders", get(orders::list).post(orders::create))
        .route("/api/orders/{id}", get(orders::get_by_id))
        .route("/api/orders/{id}/status", put(orders::update_status))
        .route("/api/orders/{id}/assign-driver", put(orders::assign_driver))
        .route("/api/drivers", get(drivers::list).post(drivers::create))
        .route(
            "/api/drivers/{id}",
            get(drivers::get_by_id)
                .put(drivers::update)
                .delete(drivers::delete),
        )
        .route(
            "/api/restaurants",
            get(restaurants::list).post(restaurants::create),
        )
        .route(
            "/api/restaurants/{id}",
            get(restaurants::get_by_id)
                .put(restaurants::update)
                .delete(restaurants::delete),
        )
        .route("/api/customers", get(customers::list).post(customers::create))
        .route(
            "/api/customers/{id}",
            get(customers::get_by_id)
                .put(customers::update)
                .delete(customers::delete),
        )
        .route(
            "/api/settings",
            get(settings::get_settings).post(settings::update_settings),
        )
        .route("/api/analytics/sales", post(analytics::sales))
        .route("/api/analytics/dashboard", get(analytics::dashboard))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
