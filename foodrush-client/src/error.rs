//! Client error types

use shared::error::ErrorCode;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Structured API error response
    #[error("API error {code}: {message}")]
    Api {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Authentication required (session is invalid or expired)
    #[error("Authentication required")]
    Unauthorized,

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session storage error
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Structured error code, when the server sent one
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api { code, .. } => ErrorCode::try_from(*code).ok(),
            _ => None,
        }
    }

    /// Whether this failure means the stored session is no longer valid
    /// and must be cleared (the 401 contract)
    pub fn invalidates_session(&self) -> bool {
        match self {
            ClientError::Unauthorized => true,
            ClientError::Api { .. } => matches!(
                self.error_code(),
                Some(
                    ErrorCode::NotAuthenticated
                        | ErrorCode::InvalidCredentials
                        | ErrorCode::TokenExpired
                        | ErrorCode::TokenInvalid
                        | ErrorCode::AccountDisabled
                        | ErrorCode::UserNotFound
                )
            ),
            _ => false,
        }
    }

    /// Whether the server rejected a lifecycle mutation
    pub fn is_invalid_transition(&self) -> bool {
        self.error_code() == Some(ErrorCode::InvalidTransition)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let err = ClientError::Api {
            code: 4002,
            message: "Status transition not allowed".to_string(),
            details: None,
        };
        assert_eq!(err.error_code(), Some(ErrorCode::InvalidTransition));
        assert!(err.is_invalid_transition());
        assert!(!err.invalidates_session());
    }

    #[test]
    fn test_session_invalidation() {
        assert!(ClientError::Unauthorized.invalidates_session());

        let expired = ClientError::Api {
            code: 1003,
            message: "Authentication token has expired".to_string(),
            details: None,
        };
        assert!(expired.invalidates_session());

        let not_found = ClientError::Api {
            code: 4001,
            message: "Order not found".to_string(),
            details: None,
        };
        assert!(!not_found.invalidates_session());
    }
}
