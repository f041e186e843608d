//! User JWT authentication for the operations API

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};

use crate::state::AppState;

/// JWT claims for an operations-console session
#[derive(Debug, Serialize, Deserialize)]
pub struct UserClaims {
    /// Username
    pub sub: String,
    /// User id
    pub uid: i64,
    /// Role (user | admin)
    pub role: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated identity extracted from JWT
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
    pub role: String,
}

impl Identity {
    /// Deletes and settings writes are admin-only
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == "admin" {
            Ok(())
        } else {
            Err(AppError::new(ErrorCode::AdminRequired))
        }
    }
}

const JWT_EXPIRY_HOURS: i64 = 24;

/// Create a JWT token for a user
pub fn create_token(
    user_id: i64,
    username: &str,
    role: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = UserClaims {
        sub: username.to_string(),
        uid: user_id,
        role: role.to_string(),
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Middleware that extracts and verifies the bearer JWT from the
/// Authorization header
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::NotAuthenticated, "Missing Authorization header")
                .into_response()
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::with_message(ErrorCode::TokenInvalid, "Invalid Authorization format")
            .into_response()
    })?;

    let validation = Validation::default();
    let token_data = jsonwebtoken::decode::<UserClaims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        AppError::invalid_token("Invalid or expired token").into_response()
    })?;

    let identity = Identity {
        user_id: token_data.claims.uid,
        username: token_data.claims.sub,
        role: token_data.claims.role,
    };

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let token = create_token(42, "dispatcher", "admin", "test-secret").unwrap();

        let data = jsonwebtoken::decode::<UserClaims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(data.claims.sub, "dispatcher");
        assert_eq!(data.claims.uid, 42);
        assert_eq!(data.claims.role, "admin");
        assert!(data.claims.exp > data.claims.iat);
    }

    #[test]
    fn test_token_rejects_wrong_secret() {
        let token = create_token(1, "user", "user", "secret-a").unwrap();

        let result = jsonwebtoken::decode::<UserClaims>(
            &token,
            &DecodingKey::from_secret(b"secret-b"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_require_admin() {
        let admin = Identity {
            user_id: 1,
            username: "root".to_string(),
            role: "admin".to_string(),
        };
        let user = Identity {
            user_id: 2,
            username: "viewer".to_string(),
            role: "user".to_string(),
        };

        assert!(admin.require_admin().is_ok());
        let err = user.require_admin().unwrap_err();
        assert_eq!(err.code, ErrorCode::AdminRequired);
    }
}
