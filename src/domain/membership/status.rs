//! Membership validity status.
//!
//! Status is never stored: it is derived from the end date and the current
//! day every time it is read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days before the end date during which an active membership is flagged
/// as expiring.
pub const EXPIRING_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Valid with more than a week left.
    Active,

    /// Valid, ending within [`EXPIRING_WINDOW_DAYS`].
    Expiring,

    /// End date has passed. No entry.
    Expired,
}

impl MembershipStatus {
    /// Status of a membership ending on `end_date`, as seen on `today`.
    ///
    /// The end date itself is still a valid day.
    pub fn on(end_date: NaiveDate, today: NaiveDate) -> Self {
        let remaining = (end_date - today).num_days();
        if remaining < 0 {
            MembershipStatus::Expired
        } else if remaining <= EXPIRING_WINDOW_DAYS {
            MembershipStatus::Expiring
        } else {
            MembershipStatus::Active
        }
    }

    /// Returns true if this status lets the holder in.
    pub fn has_access(&self) -> bool {
        matches!(self, MembershipStatus::Active | MembershipStatus::Expiring)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Active => "active",
            MembershipStatus::Expiring => "expiring",
            MembershipStatus::Expired => "expired",
        }
    }
}
