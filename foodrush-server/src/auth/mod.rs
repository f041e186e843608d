//! Authentication: JWT session tokens and the bearer middleware

pub mod user_auth;

pub use user_auth::{Identity, auth_middleware, create_token};
