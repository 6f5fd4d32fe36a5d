//! HTTP rendering of [`AppError`] and body-rejection conversion (axum)

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use super::app_error::AppError;
use super::validation::ValidationErrors;

/// Malformed JSON, wrong content type and mistyped fields all become a
/// 400 validation error on `body`
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(ValidationErrors::single("body", rejection.body_text()))
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a ValidationErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    debug: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Source chains stay out of release builds
        let debug = if cfg!(debug_assertions) && self.is_server_error() {
            self.source_chain()
        } else {
            None
        };

        let body = ErrorBody {
            message: self.message(),
            details: self.details(),
            debug,
        };

        (status, Json(body)).into_response()
    }
}
