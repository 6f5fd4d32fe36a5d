//! Error classification
//!
//! The service answers with a small set of statuses; every error a bounded
//! context raises lands in one of these.

use serde::Serialize;

/// Status class of an [`AppError`](super::app_error::AppError)
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Forbidden.status_code(), 403);
/// assert!(ErrorKind::InternalServerError.is_server_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Failed validation, malformed body, business-rule rejection
    BadRequest,
    /// Missing or unusable credentials
    Unauthorized,
    /// Authenticated, wrong role
    Forbidden,
    NotFound,
    /// Store failures and anything unexpected
    InternalServerError,
}

impl ErrorKind {
    pub const fn status_code(self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::InternalServerError => 500,
        }
    }

    /// Details of these never reach clients
    pub const fn is_server_error(self) -> bool {
        matches!(self, ErrorKind::InternalServerError)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InternalServerError => "internal",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_internal_is_server_side() {
        let client = [
            ErrorKind::BadRequest,
            ErrorKind::Unauthorized,
            ErrorKind::Forbidden,
            ErrorKind::NotFound,
        ];
        for kind in client {
            assert!((400..500).contains(&kind.status_code()), "{kind}");
            assert!(!kind.is_server_error());
        }
        assert_eq!(ErrorKind::InternalServerError.status_code(), 500);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
        assert_eq!(ErrorKind::InternalServerError.to_string(), "internal");
    }
}
