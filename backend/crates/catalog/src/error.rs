//! Catalog Error Types
//!
//! Product-specific variants on top of `kernel::error::AppError`. Gate
//! failures (401/403) never reach here; they render as `auth::AuthError`.

use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::{AppError, SourceText},
    kind::ErrorKind,
    validation::ValidationErrors,
};
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Product not found")]
    ProductNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::BadRequest,
            CatalogError::ProductNotFound => ErrorKind::NotFound,
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            CatalogError::Validation(errors) => AppError::validation(errors.clone()),
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                AppError::internal("Internal server error").with_source(SourceText::new(self.to_string()))
            }
            CatalogError::ProductNotFound => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        CatalogError::Validation(errors)
    }
}
