//! FoodRush Client — HTTP client for the operations API
//!
//! Provides the pieces the operations console is built from:
//! - [`ApiClient`]: typed calls for every API endpoint, bearer-token aware
//! - [`SessionStore`]: persisted `{user, token}` session cache with a
//!   validate-on-load contract
//! - [`Store`]: fetched collections plus optimistic patches after
//!   mutations
//! - [`views`]: pure client-side derivations (search, dashboard tiles,
//!   analytics panel)

pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod store;
pub mod views;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use session::{Session, SessionStore};
pub use store::Store;

// Re-export shared types for convenience
pub use shared::OrderStatus;
pub use shared::analytics::{AnalyticsSummary, SalesAnalytics, TimeWindow};
pub use shared::models::{
    Customer, Driver, DriverStatus, Order, Restaurant, Settings, TokenResponse, UserInfo,
};
