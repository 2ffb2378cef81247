//! Contest Error Types
//!
//! This module provides contest-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use auth::error::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Contest-specific result type alias
pub type ContestResult<T> = Result<T, ContestError>;

/// Contest-specific error variants
#[derive(Debug, Error)]
pub enum ContestError {
    /// Problem not found
    #[error("Problem not found")]
    ProblemNotFound,

    /// Problem name already registered
    #[error("Problem name already registered")]
    NameTaken,

    /// Tier/ownership rules forbid this action
    #[error("You don't have enough permission")]
    PermissionDenied,

    /// Invalid user-supplied field (name, score constraints)
    #[error("{0}")]
    Validation(String),

    /// Session resolution or other auth failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ContestError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContestError::ProblemNotFound => StatusCode::NOT_FOUND,
            ContestError::NameTaken => StatusCode::CONFLICT,
            ContestError::PermissionDenied => StatusCode::FORBIDDEN,
            ContestError::Validation(_) => StatusCode::BAD_REQUEST,
            ContestError::Auth(e) => e.status_code(),
            ContestError::Database(_) | ContestError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContestError::ProblemNotFound => ErrorKind::NotFound,
            ContestError::NameTaken => ErrorKind::Conflict,
            ContestError::PermissionDenied => ErrorKind::Forbidden,
            ContestError::Validation(_) => ErrorKind::BadRequest,
            ContestError::Auth(e) => e.kind(),
            ContestError::Database(_) | ContestError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ContestError::Database(e) => {
                tracing::error!(error = %e, "Contest database error");
            }
            ContestError::Internal(msg) => {
                tracing::error!(message = %msg, "Contest internal error");
            }
            ContestError::Auth(_) => {
                // The auth crate logs its own errors on conversion
            }
            _ => {
                tracing::debug!(error = %self, "Contest error");
            }
        }
    }
}

impl From<ContestError> for AppError {
    fn from(err: ContestError) -> Self {
        AppError::new(err.kind(), err.to_string())
    }
}

impl IntoResponse for ContestError {
    fn into_response(self) -> Response {
        self.log();
        match self {
            ContestError::Auth(e) => e.into_response(),
            other => AppError::from(other).into_response(),
        }
    }
}
