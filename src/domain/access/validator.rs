//! Entrance decision for a scanned membership.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::foundation::{Discount, MembershipId, Money};
use crate::domain::membership::{ActiveMembership, MembershipStatus};

use super::AccessResult;

/// What the front desk sees after a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipCard {
    pub id: MembershipId,
    pub holder_name: String,
    pub type_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: MembershipStatus,
    pub days_remaining: i64,
    pub discount: Discount,
    pub final_price: Money,
    pub members: Vec<String>,
    pub qr_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    pub result: AccessResult,
    pub card: MembershipCard,
}

/// Allowed while today is on or before the end date.
pub fn evaluate(membership: &ActiveMembership, today: NaiveDate) -> ScanOutcome {
    let status = membership.status(today);
    let result = if status.has_access() {
        AccessResult::Allowed
    } else {
        AccessResult::Denied
    };

    ScanOutcome {
        result,
        card: MembershipCard {
            id: membership.id,
            holder_name: membership.holder_name.clone(),
            type_name: membership.type_name.clone(),
            start_date: membership.start_date,
            end_date: membership.end_date,
            status,
            days_remaining: (membership.end_date - today).num_days().max(0),
            discount: membership.discount,
            final_price: membership.final_price,
            members: membership.members.iter().map(|m| m.name.clone()).collect(),
            qr_path: membership.qr_path.clone(),
        },
    }
}
