//! Discount percentage value object (whole percent, 0-100).

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ValidationError;

const FIELD: &str = "descuento";

/// A whole-number discount between 0 and 100 inclusive.
///
/// Fractional percentages are rejected rather than floored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Discount(u8);

impl Discount {
    /// No discount.
    pub const ZERO: Self = Self(0);

    /// Full discount.
    pub const HUNDRED: Self = Self(100);

    /// Creates a Discount, returning error if out of range.
    pub fn try_new(value: i64) -> Result<Self, ValidationError> {
        if !(0..=100).contains(&value) {
            return Err(ValidationError::out_of_range(FIELD, 0, 100, value));
        }
        Ok(Self(value as u8))
    }

    /// Converts a JSON number; fractional values are a validation error.
    pub fn from_f64(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value.fract() != 0.0 {
            return Err(ValidationError::invalid_format(
                FIELD,
                "discount must be a whole percentage",
            ));
        }
        if !(0.0..=100.0).contains(&value) {
            return Err(ValidationError::out_of_range(FIELD, 0, 100, value as i64));
        }
        Ok(Self(value as u8))
    }

    /// Parses a form value. A blank value means no discount.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(Self::ZERO);
        }
        if let Ok(value) = raw.parse::<i64>() {
            return Self::try_new(value);
        }
        match raw.parse::<f64>() {
            Ok(value) => Self::from_f64(value),
            Err(_) => Err(ValidationError::invalid_format(
                FIELD,
                format!("'{}' is not a number", raw),
            )),
        }
    }

    /// Returns the value as u8.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Percentage of the price that remains payable.
    pub fn remaining_percent(&self) -> u8 {
        100 - self.0
    }
}

impl Default for Discount {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl<'de> Deserialize<'de> for Discount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Integer(i64),
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Integer(n) => Discount::try_new(n),
            Raw::Number(n) => Discount::from_f64(n),
            Raw::Text(s) => Discount::parse(&s),
        }
        .map_err(D::Error::custom)
    }
}
