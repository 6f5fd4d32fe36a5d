//! Profile Text Value Object
//!
//! Free-form profile strings (first/last name, user name, gender, phone).
//! Stored trimmed; blank input is rejected.

use std::fmt;
use thiserror::Error;

/// Default upper bound in characters
pub const PROFILE_TEXT_MAX_LENGTH: usize = 100;

/// Upper bound for phone numbers
pub const PHONE_MAX_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileTextError {
    #[error("must not be empty")]
    Empty,

    #[error("must be at most {max} characters")]
    TooLong { max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileText(String);

impl ProfileText {
    /// Trim and validate with the default bound
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ProfileTextError> {
        Self::with_max(raw, PROFILE_TEXT_MAX_LENGTH)
    }

    /// Trim and validate with a custom bound
    pub fn with_max(raw: impl AsRef<str>, max: usize) -> Result<Self, ProfileTextError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ProfileTextError::Empty);
        }
        if trimmed.chars().count() > max {
            return Err(ProfileTextError::TooLong { max });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
