//! HTTP boundary helpers (axum)

use axum::extract::{FromRequest, Request, rejection::JsonRejection};

use crate::error::app_error::AppError;

/// `axum::Json` whose rejection renders as a 400 validation error
///
/// Malformed JSON, a wrong content type or a mistyped field all produce the
/// same `{message, details}` body as field validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
