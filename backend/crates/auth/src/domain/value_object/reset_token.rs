//! Password Reset Token Value
//!
//! Opaque single-use secret handed to the client by forgot-password.

use std::fmt;

/// Opaque reset token string
///
/// Debug output is redacted; the raw value only leaves through
/// [`ResetToken::as_str`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ResetToken(String);

impl ResetToken {
    /// Generate a fresh token (256 random bits, URL-safe base64)
    pub fn generate() -> Self {
        Self(platform::crypto::random_token())
    }

    /// Accept a client-supplied token; blank input is rejected
    pub fn parse(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResetToken").field(&"[REDACTED]").finish()
    }
}
