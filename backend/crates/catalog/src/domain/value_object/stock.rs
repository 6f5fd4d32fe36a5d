//! Stock Value Object

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    #[error("must be a non-negative integer")]
    Invalid,
}

/// Units on hand; fits the `INTEGER` column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Stock(i32);

impl Stock {
    pub fn new(units: i64) -> Result<Self, StockError> {
        i32::try_from(units)
            .ok()
            .filter(|u| *u >= 0)
            .map(Self)
            .ok_or(StockError::Invalid)
    }

    pub fn parse(raw: &str) -> Result<Self, StockError> {
        let units = raw.trim().parse::<i64>().map_err(|_| StockError::Invalid)?;
        Self::new(units)
    }

    pub fn from_db(units: i32) -> Self {
        Self(units)
    }

    pub fn units(&self) -> i32 {
        self.0
    }
}
