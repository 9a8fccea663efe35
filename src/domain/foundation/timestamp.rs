//! Timestamp value object and calendar date parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Calendar date of this instant.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Creates a new timestamp by adding the specified number of hours.
    pub fn plus_hours(&self, hours: i64) -> Self {
        Self(self.0 + chrono::Duration::hours(hours))
    }

    /// Parses a check-in/check-out value.
    ///
    /// Accepts RFC 3339 (`2024-03-01T12:00:00Z`) as well as the
    /// `datetime-local` form value (`2024-03-01T12:00`, seconds optional),
    /// which is taken as UTC.
    pub fn parse(field: &str, raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }
        ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| Self(naive.and_utc()))
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    field,
                    format!("'{}' is not a valid date and time", raw),
                )
            })
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

/// Parses a required `YYYY-MM-DD` calendar date.
pub fn parse_date(field: &str, raw: Option<&str>) -> Result<NaiveDate, ValidationError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        ValidationError::invalid_format(field, format!("'{}' is not a YYYY-MM-DD date", raw))
    })
}

/// Today's calendar date (UTC).
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn parses_rfc3339() {
        let ts = Timestamp::parse("check_in", "2024-03-01T12:00:00Z").unwrap();
        assert_eq!(ts.as_datetime().hour(), 12);
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn parses_datetime_local_form_value() {
        let ts = Timestamp::parse("check_in", "2024-03-01T15:30").unwrap();
        assert_eq!(ts.as_datetime().hour(), 15);
        assert_eq!(ts.as_datetime().minute(), 30);
    }

    #[test]
    fn rejects_garbage_timestamp() {
        let err = Timestamp::parse("check_out", "mañana").unwrap_err();
        assert_eq!(err.field(), "check_out");
    }

    #[test]
    fn empty_timestamp_is_empty_field() {
        let err = Timestamp::parse("check_in", "  ").unwrap_err();
        assert!(matches!(err, ValidationError::EmptyField { .. }));
    }

    #[test]
    fn ordering_helpers_agree_with_ord() {
        let a = Timestamp::parse("t", "2024-03-01T10:00").unwrap();
        let b = a.plus_hours(2);
        assert!(a.is_before(&b));
        assert!(b.is_after(&a));
        assert!(a < b);
    }

    #[test]
    fn parse_date_accepts_iso_dates() {
        let date = parse_date("fecha_inicio", Some("2024-01-15")).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 15));
    }

    #[test]
    fn parse_date_missing_is_empty_field() {
        assert!(matches!(
            parse_date("fecha_inicio", None),
            Err(ValidationError::EmptyField { .. })
        ));
    }

    #[test]
    fn parse_date_rejects_impossible_dates() {
        assert!(parse_date("fecha_inicio", Some("2023-02-29")).is_err());
        assert!(parse_date("fecha_inicio", Some("15/01/2024")).is_err());
    }
}
