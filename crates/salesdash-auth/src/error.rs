//! Authentication error types
//!
//! Errors are designed to be:
//! - Informative for logging/debugging
//! - Safe for external exposure (no sensitive data leakage)
//! - Convertible to HTTP status codes
//!
//! Unknown-username and wrong-password both collapse into the single
//! `AuthenticationFailed` variant so responses never reveal whether an
//! account exists.

use thiserror::Error;

/// Result type alias for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication error types
#[derive(Debug, Error)]
pub enum AuthError {
    // =========================================================================
    // Credential Errors
    // =========================================================================
    /// Username is already taken
    #[error("Username already exists")]
    DuplicateUsername,

    /// Unknown username or wrong password (deliberately indistinguishable)
    #[error("Wrong username or password")]
    AuthenticationFailed,

    // =========================================================================
    // Refresh Token Errors
    // =========================================================================
    /// No refresh token cookie was presented
    #[error("No refresh token")]
    MissingRefreshToken,

    /// Refresh token failed signature or expiry verification
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Refresh token does not match the registered session (rotated,
    /// superseded by a newer login, or the registry entry expired)
    #[error("Expired or invalid refresh token")]
    SessionMismatch,

    // =========================================================================
    // Access Token Errors
    // =========================================================================
    /// No bearer token in the authorization header
    #[error("Access denied, no token provided")]
    NoAccessToken,

    /// Access token failed signature or expiry verification
    #[error("Invalid token")]
    InvalidAccessToken,

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Password hashing failed
    #[error("Password hashing failed")]
    PasswordHashingFailed,

    /// Credential store or session registry unreachable
    #[error("Store error: {0}")]
    Store(String),

    /// Internal error (never exposed to clients)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::DuplicateUsername => 400,

            // The login and dashboard endpoints answer 404 on auth failure
            Self::AuthenticationFailed | Self::NoAccessToken | Self::InvalidAccessToken => 404,

            Self::MissingRefreshToken => 401,

            Self::InvalidRefreshToken | Self::SessionMismatch => 403,

            Self::PasswordHashingFailed | Self::Store(_) | Self::Internal(_) => 500,
        }
    }

    /// Get an error code for the client (safe to expose)
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateUsername => "DUPLICATE_USERNAME",
            Self::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Self::MissingRefreshToken => "MISSING_REFRESH_TOKEN",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::SessionMismatch => "SESSION_MISMATCH",
            Self::NoAccessToken => "NO_ACCESS_TOKEN",
            Self::InvalidAccessToken => "INVALID_ACCESS_TOKEN",
            Self::PasswordHashingFailed | Self::Store(_) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Get safe message for client (doesn't leak internal details)
    pub fn client_message(&self) -> String {
        match self {
            Self::Store(_) | Self::Internal(_) | Self::PasswordHashingFailed => {
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Error response for API clients
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    /// Error code (machine-readable)
    pub code: String,
    /// Error message (human-readable)
    pub message: String,
}

impl From<&AuthError> for ErrorResponse {
    fn from(error: &AuthError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.client_message(),
        }
    }
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(_: argon2::password_hash::Error) -> Self {
        Self::PasswordHashingFailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::DuplicateUsername.status_code(), 400);
        assert_eq!(AuthError::AuthenticationFailed.status_code(), 404);
        assert_eq!(AuthError::MissingRefreshToken.status_code(), 401);
        assert_eq!(AuthError::InvalidRefreshToken.status_code(), 403);
        assert_eq!(AuthError::SessionMismatch.status_code(), 403);
        assert_eq!(AuthError::NoAccessToken.status_code(), 404);
        assert_eq!(AuthError::Store("down".to_string()).status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AuthError::AuthenticationFailed.error_code(),
            "AUTHENTICATION_FAILED"
        );
        assert_eq!(
            AuthError::Store("secret info".to_string()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_client_message_hides_internal_details() {
        let err = AuthError::Store("connection string with password".to_string());
        assert!(!err.client_message().contains("password"));
        assert_eq!(err.client_message(), "An internal error occurred");
    }

    #[test]
    fn test_auth_failure_message_is_generic() {
        // The same message regardless of which check failed
        assert_eq!(
            AuthError::AuthenticationFailed.client_message(),
            "Wrong username or password"
        );
    }

    #[test]
    fn test_error_response() {
        let err = AuthError::SessionMismatch;
        let response = ErrorResponse::from(&err);
        assert_eq!(response.code, "SESSION_MISMATCH");
    }
}
