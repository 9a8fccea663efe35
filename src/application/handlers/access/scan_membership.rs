//! ScanMembershipHandler - Entrance check for a scanned QR code.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::access::{evaluate, AccessError, AccessResult, ScanOutcome};
use crate::domain::foundation::{today, MembershipId, Timestamp};
use crate::ports::{AccessLogRepository, MembershipRepository};

#[derive(Debug, Clone)]
pub struct ScanMembershipCommand {
    pub membership_id: MembershipId,
}

/// Decides entry for a scanned membership and appends one log row.
///
/// Unknown ids are rejected before anything is logged.
pub struct ScanMembershipHandler {
    memberships: Arc<dyn MembershipRepository>,
    access_log: Arc<dyn AccessLogRepository>,
}

impl ScanMembershipHandler {
    pub fn new(
        memberships: Arc<dyn MembershipRepository>,
        access_log: Arc<dyn AccessLogRepository>,
    ) -> Self {
        Self {
            memberships,
            access_log,
        }
    }

    pub async fn handle(&self, cmd: ScanMembershipCommand) -> Result<ScanOutcome, AccessError> {
        self.handle_on(cmd, today()).await
    }

    pub async fn handle_on(
        &self,
        cmd: ScanMembershipCommand,
        today: NaiveDate,
    ) -> Result<ScanOutcome, AccessError> {
        let membership = self
            .memberships
            .get_active_membership(&cmd.membership_id)
            .await?
            .ok_or(AccessError::NotFound(cmd.membership_id))?;

        let outcome = evaluate(&membership, today);
        self.access_log
            .record_access(&membership.id, outcome.result, Timestamp::now())
            .await?;

        match outcome.result {
            AccessResult::Allowed => tracing::info!(
                membership_id = %membership.id,
                status = outcome.card.status.as_str(),
                "access allowed"
            ),
            AccessResult::Denied => tracing::warn!(
                membership_id = %membership.id,
                end_date = %membership.end_date,
                "access denied, membership expired"
            ),
        }
        Ok(outcome)
    }
}
