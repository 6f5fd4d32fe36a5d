//! Price Value Object
//!
//! Non-negative amount with two decimal places, matching `NUMERIC(10,2)`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Digits after the decimal point
pub const PRICE_SCALE: u32 = 2;

/// Largest value `NUMERIC(10,2)` holds: 9_999_999_999 at scale 2
const PRICE_MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, PRICE_SCALE);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("not a number")]
    NotANumber,

    #[error("must not be negative")]
    Negative,

    #[error("must be at most 99999999.99")]
    TooLarge,
}

/// Serialized as a JSON number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Round half away from zero to two places, then range check
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        let rounded = amount
            .round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            return Err(PriceError::Negative);
        }
        if rounded > PRICE_MAX {
            return Err(PriceError::TooLarge);
        }
        Ok(Self(rounded.abs()))
    }

    /// Plain decimal or scientific notation
    pub fn parse(raw: &str) -> Result<Self, PriceError> {
        let raw = raw.trim();
        let amount = Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map_err(|_| PriceError::NotANumber)?;
        Self::new(amount)
    }

    pub fn from_db(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
