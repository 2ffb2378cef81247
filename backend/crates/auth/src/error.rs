//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credentials supplied where a session is required
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Token past its expiry. Distinct from `TokenInvalid` so clients can
    /// refresh instead of forcing a re-login.
    #[error("Expired token")]
    TokenExpired,

    /// Malformed, unsigned, or tampered token; or a subject that no
    /// longer resolves to a user
    #[error("Could not validate credentials")]
    TokenInvalid,

    /// Wrong account or password at login
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Authenticated but not allowed by the permission rules
    #[error("You don't have enough permission")]
    PermissionDenied,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// User name already registered
    #[error("Username already exists")]
    NameTaken,

    /// Email already bound to another account
    #[error("User email already exists")]
    EmailTaken,

    /// Endpoint requires an account with a bound email
    #[error("You should bind an email first")]
    EmailNotBound,

    /// A live confirmation already exists for this (email, purpose)
    #[error("Such an email was already sent, please wait")]
    ConfirmationPending,

    /// Missing or mismatched confirmation code on a sensitive update
    #[error("Wrong email token")]
    InvalidConfirmation,

    /// Invalid user-supplied field (name, email, password policy)
    #[error("{0}")]
    Validation(String),

    /// Confirmation email could not be delivered
    #[error("Can't send email: {0}")]
    MailDelivery(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NotAuthenticated
            | AuthError::TokenInvalid
            | AuthError::InvalidCredentials
            | AuthError::EmailNotBound => StatusCode::UNAUTHORIZED,
            AuthError::TokenExpired | AuthError::PermissionDenied => StatusCode::FORBIDDEN,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::NameTaken | AuthError::EmailTaken | AuthError::ConfirmationPending => {
                StatusCode::CONFLICT
            }
            AuthError::InvalidConfirmation | AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::MailDelivery(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::NotAuthenticated
            | AuthError::TokenInvalid
            | AuthError::InvalidCredentials
            | AuthError::EmailNotBound => ErrorKind::Unauthorized,
            AuthError::TokenExpired | AuthError::PermissionDenied => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::NameTaken | AuthError::EmailTaken | AuthError::ConfirmationPending => {
                ErrorKind::Conflict
            }
            AuthError::InvalidConfirmation | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::MailDelivery(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
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
            AuthError::MailDelivery(msg) => {
                tracing::error!(message = %msg, "Confirmation email delivery failed");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidConfirmation => {
                tracing::warn!("Sensitive update with bad confirmation code");
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

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AuthError::NotAuthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::TokenExpired.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::TokenInvalid.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::PermissionDenied.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AuthError::NameTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::ConfirmationPending.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::InvalidConfirmation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::EmailNotBound.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::MailDelivery("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_expired_is_distinct_from_invalid() {
        // Clients refresh on Expired but re-login on Invalid
        assert_ne!(
            AuthError::TokenExpired.status_code(),
            AuthError::TokenInvalid.status_code()
        );
    }

    #[test]
    fn test_kind_matches_status() {
        let errors = [
            AuthError::NotAuthenticated,
            AuthError::TokenExpired,
            AuthError::UserNotFound,
            AuthError::NameTaken,
            AuthError::InvalidConfirmation,
            AuthError::Internal("x".into()),
        ];
        for err in errors {
            assert_eq!(u16::from(err.status_code()), err.kind().status_code());
        }
    }
}
