//! Membership durations and end date calculation.
//!
//! Months and years use calendar arithmetic: the day of month is kept when
//! it exists in the target month and otherwise clamps to the month's last
//! day (2024-01-31 + 1 month = 2024-02-29).

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{parse_date, ValidationError};

const FIELD: &str = "duracion";

/// Calendar unit of a membership duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    Day,
    Week,
    Month,
    Year,
}

impl DurationUnit {
    /// Storage/wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationUnit::Day => "day",
            DurationUnit::Week => "week",
            DurationUnit::Month => "month",
            DurationUnit::Year => "year",
        }
    }
}

impl FromStr for DurationUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "days" | "dia" | "día" | "dias" | "días" => Ok(DurationUnit::Day),
            "week" | "weeks" | "semana" | "semanas" => Ok(DurationUnit::Week),
            "month" | "months" | "mes" | "meses" => Ok(DurationUnit::Month),
            "year" | "years" | "año" | "años" | "anio" | "anios" => Ok(DurationUnit::Year),
            other => Err(ValidationError::invalid_format(
                FIELD,
                format!("unknown duration unit '{}'", other),
            )),
        }
    }
}

/// How long a membership period lasts, e.g. "1 month" or "1 año".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MembershipDuration {
    pub unit: DurationUnit,
    pub value: u32,
}

impl MembershipDuration {
    /// Creates a duration; the value must be at least 1.
    pub fn new(unit: DurationUnit, value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::out_of_range(FIELD, 1, i64::from(u32::MAX), 0));
        }
        Ok(Self { unit, value })
    }

    pub fn months(value: u32) -> Result<Self, ValidationError> {
        Self::new(DurationUnit::Month, value)
    }

    pub fn years(value: u32) -> Result<Self, ValidationError> {
        Self::new(DurationUnit::Year, value)
    }

    /// Last covered date for a period starting on `start`.
    ///
    /// The end date is `start + duration`; a membership starting 2024-01-15
    /// for one month is valid through 2024-02-15 inclusive.
    pub fn end_date(&self, start: NaiveDate) -> Result<NaiveDate, ValidationError> {
        let end = match self.unit {
            DurationUnit::Day => start.checked_add_days(Days::new(u64::from(self.value))),
            DurationUnit::Week => start.checked_add_days(Days::new(u64::from(self.value) * 7)),
            DurationUnit::Month => start.checked_add_months(Months::new(self.value)),
            DurationUnit::Year => self
                .value
                .checked_mul(12)
                .and_then(|months| start.checked_add_months(Months::new(months))),
        };
        end.ok_or_else(|| ValidationError::invalid_format(FIELD, "end date is out of range"))
    }
}

impl fmt::Display for MembershipDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.value == 1 { "" } else { "s" };
        write!(f, "{} {}{}", self.value, self.unit.as_str(), plural)
    }
}

impl FromStr for MembershipDuration {
    type Err = ValidationError;

    /// Parses `"<n> <unit>"`; a bare unit means one of it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (value, unit) = match (parts.next(), parts.next(), parts.next()) {
            (Some(value), Some(unit), None) => {
                let value = value.parse::<u32>().map_err(|_| {
                    ValidationError::invalid_format(FIELD, format!("'{}' is not a count", value))
                })?;
                (value, unit)
            }
            (Some(unit), None, None) => (1, unit),
            _ => return Err(ValidationError::empty_field(FIELD)),
        };
        Self::new(unit.parse()?, value)
    }
}

/// Date calculator entry point: parses the raw start date and applies the
/// duration. A missing or malformed start date is a validation error on
/// `fecha_inicio`.
pub fn calculate_end_date(
    duration: &MembershipDuration,
    start_date: Option<&str>,
) -> Result<(NaiveDate, NaiveDate), ValidationError> {
    let start = parse_date("fecha_inicio", start_date)?;
    let end = duration.end_date(start)?;
    Ok((start, end))
}
