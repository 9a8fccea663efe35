//! In-memory access log.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::access::{AccessLogEntry, AccessLogFilter, AccessLogPage, AccessResult};
use crate::domain::foundation::{AccessLogId, DomainError, MembershipId, Timestamp};
use crate::ports::AccessLogRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAccessLog {
    entries: Arc<RwLock<Vec<AccessLogEntry>>>,
    fail: bool,
}

impl InMemoryAccessLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            entries: Arc::default(),
            fail: true,
        }
    }

    /// Every row in insertion order.
    pub async fn entries(&self) -> Vec<AccessLogEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl AccessLogRepository for InMemoryAccessLog {
    async fn record_access(
        &self,
        membership_id: &MembershipId,
        result: AccessResult,
        scanned_at: Timestamp,
    ) -> Result<AccessLogEntry, DomainError> {
        if self.fail {
            return Err(DomainError::database("access log unavailable"));
        }
        let mut entries = self.entries.write().await;
        let entry = AccessLogEntry {
            id: AccessLogId::new(entries.len() as i64 + 1),
            membership_id: *membership_id,
            scanned_at,
            result,
        };
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn list(&self, filter: &AccessLogFilter) -> Result<AccessLogPage, DomainError> {
        if self.fail {
            return Err(DomainError::database("access log unavailable"));
        }
        let entries = self.entries.read().await;
        let mut matching: Vec<&AccessLogEntry> =
            entries.iter().filter(|e| filter.matches(e)).collect();
        matching.sort_by(|a, b| b.scanned_at.cmp(&a.scanned_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(filter.offset() as usize)
            .take(filter.per_page as usize)
            .cloned()
            .collect();
        Ok(AccessLogPage {
            entries: page,
            page: filter.page,
            per_page: filter.per_page,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_newest_first_with_pagination() {
        let log = InMemoryAccessLog::new();
        let base = Timestamp::parse("t", "2024-05-10T08:00:00Z").unwrap();
        for hour in 0..5 {
            log.record_access(&MembershipId::new(1), AccessResult::Allowed, base.plus_hours(hour))
                .await
                .unwrap();
        }

        let filter = AccessLogFilter::parse(Some("2"), Some("2"), None).unwrap();
        let page = log.list(&filter).await.unwrap();

        assert_eq!(page.total, 5);
        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.entries[0].id, AccessLogId::new(3));
        assert_eq!(page.entries[1].id, AccessLogId::new(2));
    }

    #[tokio::test]
    async fn failing_log_reports_database_error() {
        let log = InMemoryAccessLog::failing();
        let err = log
            .record_access(&MembershipId::new(1), AccessResult::Denied, Timestamp::now())
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::domain::foundation::ErrorCode::DatabaseError);
    }
}
