//! Access log port. Append only: there is no update or delete.

use async_trait::async_trait;

use crate::domain::access::{AccessLogEntry, AccessLogFilter, AccessLogPage, AccessResult};
use crate::domain::foundation::{DomainError, MembershipId, Timestamp};

#[async_trait]
pub trait AccessLogRepository: Send + Sync {
    /// Appends one row for a scan.
    async fn record_access(
        &self,
        membership_id: &MembershipId,
        result: AccessResult,
        scanned_at: Timestamp,
    ) -> Result<AccessLogEntry, DomainError>;

    /// One page of entries, newest first, plus the total matching `filter`.
    async fn list(&self, filter: &AccessLogFilter) -> Result<AccessLogPage, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_log_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AccessLogRepository) {}
    }
}
