//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::{AppError, SourceText},
    kind::ErrorKind,
    validation::ValidationErrors,
};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Every 401 renders this one message so callers cannot tell the causes apart
const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request fields failed validation
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// confirmPassword differs from password
    #[error("Passwords must match")]
    PasswordMismatch,

    /// Email already belongs to another account
    #[error("Email already in use")]
    EmailTaken,

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No usable bearer credential on the request
    #[error("Missing bearer token")]
    MissingAuth,

    /// Bad signature, expired, malformed claims, or subject no longer exists
    #[error("Invalid token")]
    InvalidToken,

    /// Authenticated, but the role is not allowed here
    #[error("Forbidden")]
    Forbidden,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Reset token unknown, already used, or expired
    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::PasswordMismatch
            | AuthError::EmailTaken
            | AuthError::InvalidOrExpiredToken => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::MissingAuth | AuthError::InvalidToken => {
                ErrorKind::Unauthorized
            }
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Client-facing messages come from here, not from `Display`: the 401
    /// family collapses to one message and 5xx details stay in the source.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(errors) => AppError::validation(errors.clone()),
            AuthError::PasswordMismatch => AppError::bad_request("Passwords must match")
                .with_details(ValidationErrors::single(
                    "confirmPassword",
                    "Passwords must match",
                )),
            AuthError::InvalidCredentials | AuthError::MissingAuth | AuthError::InvalidToken => {
                AppError::unauthorized(UNAUTHORIZED_MESSAGE)
            }
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error").with_source(SourceText::new(self.to_string()))
            }
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
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Rejected bearer token");
            }
            AuthError::Forbidden => {
                tracing::warn!("Role check denied access");
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

impl From<ValidationErrors> for AuthError {
    fn from(errors: ValidationErrors) -> Self {
        AuthError::Validation(errors)
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
