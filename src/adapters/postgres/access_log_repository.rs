//! PostgreSQL implementation of AccessLogRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::access::{AccessLogEntry, AccessLogFilter, AccessLogPage, AccessResult};
use crate::domain::foundation::{AccessLogId, DomainError, MembershipId, Timestamp};
use crate::ports::AccessLogRepository;

use super::{corrupt_row, database_error};

pub struct PostgresAccessLogRepository {
    pool: PgPool,
}

impl PostgresAccessLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AccessLogRow {
    id: i64,
    membership_id: i64,
    scanned_at: DateTime<Utc>,
    result: String,
}

impl TryFrom<AccessLogRow> for AccessLogEntry {
    type Error = DomainError;

    fn try_from(row: AccessLogRow) -> Result<Self, Self::Error> {
        Ok(AccessLogEntry {
            id: AccessLogId::new(row.id),
            membership_id: MembershipId::new(row.membership_id),
            scanned_at: Timestamp::from_datetime(row.scanned_at),
            result: AccessResult::from_db(&row.result)
                .ok_or_else(|| corrupt_row("access result", &row.result))?,
        })
    }
}

#[async_trait]
impl AccessLogRepository for PostgresAccessLogRepository {
    async fn record_access(
        &self,
        membership_id: &MembershipId,
        result: AccessResult,
        scanned_at: Timestamp,
    ) -> Result<AccessLogEntry, DomainError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO access_log (membership_id, scanned_at, result)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(membership_id.value())
        .bind(scanned_at.as_datetime())
        .bind(result.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error("Failed to record access"))?;

        Ok(AccessLogEntry {
            id: AccessLogId::new(id),
            membership_id: *membership_id,
            scanned_at,
            result,
        })
    }

    async fn list(&self, filter: &AccessLogFilter) -> Result<AccessLogPage, DomainError> {
        let (total,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM access_log
            WHERE ($1::DATE IS NULL OR (scanned_at AT TIME ZONE 'UTC')::DATE = $1)
            "#,
        )
        .bind(filter.date)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error("Failed to count access log"))?;

        let rows: Vec<AccessLogRow> = sqlx::query_as(
            r#"
            SELECT id, membership_id, scanned_at, result
            FROM access_log
            WHERE ($1::DATE IS NULL OR (scanned_at AT TIME ZONE 'UTC')::DATE = $1)
            ORDER BY scanned_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.date)
        .bind(i64::from(filter.per_page))
        .bind(i64::try_from(filter.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to list access log"))?;

        Ok(AccessLogPage {
            entries: rows
                .into_iter()
                .map(AccessLogEntry::try_from)
                .collect::<Result<_, _>>()?,
            page: filter.page,
            per_page: filter.per_page,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_map_to_entries() {
        let entry = AccessLogEntry::try_from(AccessLogRow {
            id: 3,
            membership_id: 9,
            scanned_at: Utc::now(),
            result: "denied".to_string(),
        })
        .unwrap();
        assert_eq!(entry.result, AccessResult::Denied);
        assert_eq!(entry.membership_id, MembershipId::new(9));
    }

    #[test]
    fn unknown_result_is_rejected() {
        let row = AccessLogRow {
            id: 3,
            membership_id: 9,
            scanned_at: Utc::now(),
            result: "maybe".to_string(),
        };
        assert!(AccessLogEntry::try_from(row).is_err());
    }
}
