//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
///
/// The `Display` text of every client-facing variant is exactly the
/// message rendered in the `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed or invalid input
    #[error("{0}")]
    Validation(String),

    // ------------------------------------------------------------------
    // Authentication Gate
    // ------------------------------------------------------------------
    #[error("Authorization header required")]
    MissingAuthorizationHeader,

    #[error("Bearer token required")]
    MissingBearerToken,

    /// Bad signature, wrong algorithm, wrong issuer or expired
    #[error("Invalid token")]
    InvalidToken,

    /// Token kind does not match the one required here
    #[error("Invalid token type")]
    InvalidTokenType,

    // ------------------------------------------------------------------
    // Login / refresh
    // ------------------------------------------------------------------
    /// Unknown user or wrong password (indistinguishable on purpose)
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is inactive")]
    AccountInactive,

    #[error("Account is locked. Please try again later.")]
    AccountLocked,

    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Handler reached without an identity in the request context
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Current password is incorrect")]
    IncorrectCurrentPassword,

    // ------------------------------------------------------------------
    // Authorization Gate
    // ------------------------------------------------------------------
    #[error("Insufficient permissions")]
    Forbidden,

    // ------------------------------------------------------------------
    // Lookup / uniqueness
    // ------------------------------------------------------------------
    #[error("User not found")]
    UserNotFound,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Username or email already exists")]
    UsernameOrEmailTaken,

    // ------------------------------------------------------------------
    // Internal
    // ------------------------------------------------------------------
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        use AuthError::*;
        match self {
            Validation(_) => ErrorKind::BadRequest,
            MissingAuthorizationHeader
            | MissingBearerToken
            | InvalidToken
            | InvalidTokenType
            | InvalidCredentials
            | AccountInactive
            | AccountLocked
            | InvalidRefreshToken
            | Unauthenticated
            | IncorrectCurrentPassword => ErrorKind::Unauthorized,
            Forbidden => ErrorKind::Forbidden,
            UserNotFound | SessionNotFound => ErrorKind::NotFound,
            UsernameOrEmailTaken => ErrorKind::Conflict,
            Database(_) | Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Convert to AppError
    ///
    /// Internal details never reach the client.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            AuthError::AccountLocked => AppError::new(self.kind(), self.to_string())
                .with_action("Wait 15 minutes before trying again"),
            AuthError::UsernameOrEmailTaken => AppError::new(self.kind(), self.to_string())
                .with_action("Choose a different username or email"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Forbidden => {
                tracing::warn!("Request rejected by role check");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<PasswordPolicyError> for AuthError {
    fn from(err: PasswordPolicyError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<kernel::id::IdParseError> for AuthError {
    fn from(_: kernel::id::IdParseError) -> Self {
        AuthError::Validation("Invalid user ID".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::Validation("x".into()).status_code(), 400);
        assert_eq!(AuthError::MissingAuthorizationHeader.status_code(), 401);
        assert_eq!(AuthError::InvalidTokenType.status_code(), 401);
        assert_eq!(AuthError::AccountLocked.status_code(), 401);
        assert_eq!(AuthError::Forbidden.status_code(), 403);
        assert_eq!(AuthError::SessionNotFound.status_code(), 404);
        assert_eq!(AuthError::UsernameOrEmailTaken.status_code(), 409);
        assert_eq!(AuthError::Internal("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_gate_messages() {
        assert_eq!(
            AuthError::MissingAuthorizationHeader.to_string(),
            "Authorization header required"
        );
        assert_eq!(AuthError::MissingBearerToken.to_string(), "Bearer token required");
        assert_eq!(AuthError::InvalidToken.to_string(), "Invalid token");
        assert_eq!(AuthError::InvalidTokenType.to_string(), "Invalid token type");
        assert_eq!(AuthError::Forbidden.to_string(), "Insufficient permissions");
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let app = AuthError::Internal("signing key exploded".into()).to_app_error();
        assert_eq!(app.message(), "Internal server error");
        assert_eq!(app.status_code(), 500);
    }

    #[test]
    fn test_policy_error_is_validation() {
        let err: AuthError = PasswordPolicyError::MissingDigit.into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "Password must contain at least one digit");
    }
}
