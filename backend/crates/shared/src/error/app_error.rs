//! Unified application error
//!
//! `AuthError` and `CatalogError` both render through [`AppError`], so every
//! failing request answers with the same `{message, details?}` body.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;
use super::validation::ValidationErrors;

/// Client-facing error plus an optional private cause
///
/// `message` and `details` are rendered; `source` is only rendered for 5xx in
/// debug builds and is otherwise for logs.
///
/// ## Examples
/// ```rust
/// use kernel::error::app_error::AppError;
///
/// let err = AppError::not_found("Product not found");
/// assert_eq!(err.status_code(), 404);
/// assert_eq!(err.message(), "Product not found");
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    details: Option<ValidationErrors>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// "Validation failed" with one entry per failing field
    pub fn validation(errors: ValidationErrors) -> Self {
        Self::bad_request("Validation failed").with_details(errors)
    }

    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    pub fn with_details(mut self, details: ValidationErrors) -> Self {
        self.details = Some(details);
        self
    }

    /// Keep the underlying cause for logs and debug responses
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&ValidationErrors> {
        self.details.as_ref()
    }

    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    /// Causes joined as `a: b: c`
    pub fn source_chain(&self) -> Option<String> {
        let mut parts = Vec::new();
        let mut current = self.source();
        while let Some(err) = current {
            parts.push(err.to_string());
            current = err.source();
        }
        (!parts.is_empty()).then(|| parts.join(": "))
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("details", &self.details)
            .field("source", &self.source_chain())
            .finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({details})")?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn Error + 'static))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::validation(errors)
    }
}

/// Owned copy of an error's text, for causes that cannot be moved into
/// [`AppError::with_source`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText(String);

impl SourceText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl fmt::Display for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Error for SourceText {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_pick_kind() {
        assert_eq!(AppError::bad_request("x").status_code(), 400);
        assert_eq!(AppError::unauthorized("x").status_code(), 401);
        assert_eq!(AppError::forbidden("x").status_code(), 403);
        assert_eq!(AppError::not_found("x").status_code(), 404);
        assert_eq!(AppError::internal("x").status_code(), 500);
    }

    #[test]
    fn test_validation_carries_details() {
        let err = AppError::validation(ValidationErrors::single("email", "Valid email required"));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Validation failed");
        assert_eq!(err.details().unwrap().fields(), vec!["email"]);
        assert!(err.to_string().contains("email: Valid email required"));
    }

    #[test]
    fn test_source_chain() {
        let io_err = std::io::Error::other("connection reset");
        let err = AppError::internal("Internal server error").with_source(io_err);
        assert_eq!(err.source_chain().as_deref(), Some("connection reset"));
        assert!(AppError::internal("bare").source_chain().is_none());
    }

    #[test]
    fn test_source_text_keeps_message() {
        let err = AppError::internal("Internal server error")
            .with_source(SourceText::new("Database error: pool timed out"));
        assert_eq!(err.message(), "Internal server error");
        assert_eq!(
            err.source_chain().as_deref(),
            Some("Database error: pool timed out")
        );
    }

    #[test]
    fn test_display() {
        let err = AppError::not_found("User not found");
        assert_eq!(err.to_string(), "[not_found] User not found");
    }
}
