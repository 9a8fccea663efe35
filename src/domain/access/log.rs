//! Append-only access log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{parse_date, AccessLogId, MembershipId, Timestamp, ValidationError};

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

/// Outcome recorded for one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessResult {
    Allowed,
    Denied,
}

impl AccessResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessResult::Allowed => "allowed",
            AccessResult::Denied => "denied",
        }
    }

    pub fn from_db(raw: &str) -> Option<Self> {
        match raw {
            "allowed" => Some(AccessResult::Allowed),
            "denied" => Some(AccessResult::Denied),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessLogEntry {
    pub id: AccessLogId,
    pub membership_id: MembershipId,
    pub scanned_at: Timestamp,
    pub result: AccessResult,
}

/// Page and date selection for listing the log, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessLogFilter {
    pub page: u32,
    pub per_page: u32,
    pub date: Option<NaiveDate>,
}

impl Default for AccessLogFilter {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            date: None,
        }
    }
}

impl AccessLogFilter {
    /// Builds a filter from raw query values. Blank values take defaults.
    pub fn parse(
        page: Option<&str>,
        per_page: Option<&str>,
        date: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let page = parse_count("page", page, 1, u32::MAX)?.unwrap_or(1);
        let per_page =
            parse_count("per_page", per_page, 1, MAX_PER_PAGE)?.unwrap_or(DEFAULT_PER_PAGE);
        let date = match date.map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => Some(parse_date("date", Some(raw))?),
            None => None,
        };
        Ok(Self { page, per_page, date })
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    pub fn matches(&self, entry: &AccessLogEntry) -> bool {
        self.date.map_or(true, |d| entry.scanned_at.date() == d)
    }
}

fn parse_count(
    field: &str,
    raw: Option<&str>,
    min: u32,
    max: u32,
) -> Result<Option<u32>, ValidationError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    let value: i64 = raw
        .parse()
        .map_err(|_| ValidationError::invalid_format(field, format!("'{}' is not a number", raw)))?;
    if value < i64::from(min) || value > i64::from(max) {
        return Err(ValidationError::out_of_range(field, i64::from(min), i64::from(max), value));
    }
    Ok(Some(value as u32))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessLogPage {
    pub entries: Vec<AccessLogEntry>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl AccessLogPage {
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.per_page.max(1)))
    }
}
