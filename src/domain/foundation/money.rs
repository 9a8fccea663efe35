//! Money value object.
//!
//! Amounts are held as whole centavos in an `i64` and are never negative.
//! On the wire they travel as strings with exactly two decimals (`"450.00"`)
//! and are accepted either as JSON numbers or as decimal strings.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::ValidationError;

/// Largest accepted amount, in centavos (one trillion pesos, exclusive).
pub const MAX_CENTS: i64 = 100_000_000_000_000 - 1;

/// A non-negative amount of pesos with centavo precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Zero pesos.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from centavos, rejecting negatives.
    pub fn from_cents(cents: i64) -> Result<Self, ValidationError> {
        if !(0..=MAX_CENTS).contains(&cents) {
            return Err(ValidationError::out_of_range("monto", 0, MAX_CENTS, cents));
        }
        Ok(Self(cents))
    }

    /// Creates an amount from whole pesos.
    pub fn from_pesos(pesos: i64) -> Result<Self, ValidationError> {
        pesos
            .checked_mul(100)
            .ok_or_else(|| ValidationError::out_of_range("monto", 0, MAX_CENTS / 100, pesos))
            .and_then(Self::from_cents)
    }

    /// Parses a decimal string such as `"121.50"` or `"500"`.
    pub fn parse(field: &str, raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        let invalid = || {
            ValidationError::invalid_format(
                field,
                format!("'{}' is not a non-negative amount with up to two decimals", raw),
            )
        };

        let (whole, fraction) = match raw.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (raw, ""),
        };
        if whole.is_empty()
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || fraction.len() > 2
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let pesos: i64 = whole.parse().map_err(|_| invalid())?;
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };
        pesos
            .checked_mul(100)
            .and_then(|p| p.checked_add(cents))
            .ok_or_else(invalid)
            .and_then(|total| Self::from_cents(total).map_err(|_| invalid()))
    }

    /// Converts a JSON number, rejecting negatives and sub-centavo precision.
    pub fn from_f64(field: &str, value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::invalid_format(
                field,
                "amount must be a non-negative number",
            ));
        }
        let scaled = value * 100.0;
        let cents = scaled.round();
        if (scaled - cents).abs() > 1e-6 {
            return Err(ValidationError::invalid_format(
                field,
                "amount must have at most two decimals",
            ));
        }
        if cents > MAX_CENTS as f64 {
            return Err(ValidationError::out_of_range(field, 0, MAX_CENTS, i64::MAX));
        }
        Ok(Self(cents as i64))
    }

    /// Amount in centavos.
    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Whole pesos part.
    pub fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Centavos part (0..=99).
    pub fn centavos(&self) -> i64 {
        self.0 % 100
    }

    /// Sum of two amounts; `None` on overflow past [`MAX_CENTS`].
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.0
            .checked_add(other.0)
            .filter(|total| *total <= MAX_CENTS)
            .map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.pesos(), self.centavos())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Money::from_f64("monto", n),
            Raw::Text(s) => Money::parse("monto", &s),
        }
        .map_err(D::Error::custom)
    }
}
