//! Product Name Value Object

use std::fmt;
use thiserror::Error;

/// Column width of `products.name`
pub const PRODUCT_NAME_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductNameError {
    #[error("must not be empty")]
    Empty,

    #[error("must be at most 255 characters")]
    TooLong,
}

/// Trimmed, non-empty product name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ProductNameError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ProductNameError::Empty);
        }
        if trimmed.chars().count() > PRODUCT_NAME_MAX_LENGTH {
            return Err(ProductNameError::TooLong);
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

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
