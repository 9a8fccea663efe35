//! PostgreSQL implementation of MembershipRepository.
//!
//! A purchase writes the membership, its members and the first payment
//! in one transaction. Renewals (a changed end date) add a payment row.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{
    ClientId, Discount, DomainError, ErrorCode, MemberId, MembershipId, MembershipTypeId,
    Timestamp,
};
use crate::domain::membership::{
    ActiveMembership, DurationUnit, Member, MembershipDuration, MembershipType, NewMembership,
};
use crate::ports::MembershipRepository;

use super::{corrupt_row, database_error, money_from_db};

pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn members_of(
        &self,
        ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Member>>, DomainError> {
        let rows: Vec<MemberRow> = sqlx::query_as(
            r#"
            SELECT id, membership_id, name
            FROM members
            WHERE membership_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("Failed to load members"))?;

        let mut grouped: HashMap<i64, Vec<Member>> = HashMap::new();
        for row in rows {
            grouped.entry(row.membership_id).or_default().push(Member {
                id: MemberId::new(row.id),
                name: row.name,
            });
        }
        Ok(grouped)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MembershipTypeRow {
    id: i64,
    name: String,
    duration_unit: String,
    duration_value: i32,
    max_members: i32,
    base_price_cents: i64,
}

impl TryFrom<MembershipTypeRow> for MembershipType {
    type Error = DomainError;

    fn try_from(row: MembershipTypeRow) -> Result<Self, Self::Error> {
        let unit: DurationUnit = row
            .duration_unit
            .parse()
            .map_err(|e| corrupt_row("duration unit", e))?;
        let value = u32::try_from(row.duration_value)
            .map_err(|e| corrupt_row("duration value", e))?;
        Ok(MembershipType {
            id: MembershipTypeId::new(row.id),
            name: row.name,
            duration: MembershipDuration::new(unit, value)
                .map_err(|e| corrupt_row("duration", e))?,
            max_members: u32::try_from(row.max_members)
                .map_err(|e| corrupt_row("max members", e))?,
            base_price: money_from_db("base price", row.base_price_cents)?,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: i64,
    client_id: i64,
    holder_name: String,
    membership_type_id: i64,
    type_name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    discount: i16,
    final_price_cents: i64,
    qr_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl MembershipRow {
    fn into_membership(self, members: Vec<Member>) -> Result<ActiveMembership, DomainError> {
        Ok(ActiveMembership {
            id: MembershipId::new(self.id),
            client_id: ClientId::new(self.client_id),
            holder_name: self.holder_name,
            membership_type_id: MembershipTypeId::new(self.membership_type_id),
            type_name: self.type_name,
            start_date: self.start_date,
            end_date: self.end_date,
            discount: Discount::try_new(i64::from(self.discount))
                .map_err(|e| corrupt_row("discount", e))?,
            final_price: money_from_db("final price", self.final_price_cents)?,
            qr_path: self.qr_path,
            members,
            created_at: Timestamp::from_datetime(self.created_at),
            updated_at: Timestamp::from_datetime(self.updated_at),
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: i64,
    membership_id: i64,
    name: String,
}

const SELECT_MEMBERSHIP: &str = r#"
    SELECT m.id, m.client_id, m.holder_name, m.membership_type_id, t.name AS type_name,
           m.start_date, m.end_date, m.discount, m.final_price_cents, m.qr_path,
           m.created_at, m.updated_at
    FROM active_memberships m
    JOIN membership_types t ON t.id = m.membership_type_id
"#;

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn find_membership_type(
        &self,
        id: &MembershipTypeId,
    ) -> Result<Option<MembershipType>, DomainError> {
        let row: Option<MembershipTypeRow> = sqlx::query_as(
            r#"
            SELECT id, name, duration_unit, duration_value, max_members, base_price_cents
            FROM membership_types
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("Failed to fetch membership type"))?;

        row.map(MembershipType::try_from).transpose()
    }

    async fn get_active_membership(
        &self,
        id: &MembershipId,
    ) -> Result<Option<ActiveMembership>, DomainError> {
        let row: Option<MembershipRow> =
            sqlx::query_as(&format!("{} WHERE m.id = $1", SELECT_MEMBERSHIP))
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(database_error("Failed to fetch membership"))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let members = self
            .members_of(&[row.id])
            .await?
            .remove(&row.id)
            .unwrap_or_default();
        row.into_membership(members).map(Some)
    }

    async fn list_memberships(&self) -> Result<Vec<ActiveMembership>, DomainError> {
        let rows: Vec<MembershipRow> =
            sqlx::query_as(&format!("{} ORDER BY m.id DESC", SELECT_MEMBERSHIP))
                .fetch_all(&self.pool)
                .await
                .map_err(database_error("Failed to list memberships"))?;

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let mut members = self.members_of(&ids).await?;
        rows.into_iter()
            .map(|row| {
                let own = members.remove(&row.id).unwrap_or_default();
                row.into_membership(own)
            })
            .collect()
    }

    async fn save(&self, membership: &NewMembership) -> Result<ActiveMembership, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("Failed to start transaction"))?;

        let (id, created_at, updated_at): (i64, DateTime<Utc>, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO active_memberships (
                client_id, holder_name, membership_type_id, start_date, end_date,
                discount, final_price_cents
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, created_at, updated_at
            "#,
        )
        .bind(membership.client_id.value())
        .bind(&membership.holder_name)
        .bind(membership.membership_type_id.value())
        .bind(membership.start_date)
        .bind(membership.end_date)
        .bind(i16::from(membership.discount.value()))
        .bind(membership.final_price.cents())
        .fetch_one(&mut *tx)
        .await
        .map_err(database_error("Failed to save membership"))?;

        let mut members = Vec::with_capacity(membership.members.len());
        for name in &membership.members {
            let (member_id,): (i64,) = sqlx::query_as(
                "INSERT INTO members (membership_id, name) VALUES ($1, $2) RETURNING id",
            )
            .bind(id)
            .bind(name)
            .fetch_one(&mut *tx)
            .await
            .map_err(database_error("Failed to save member"))?;
            members.push(Member {
                id: MemberId::new(member_id),
                name: name.clone(),
            });
        }

        sqlx::query(
            r#"
            INSERT INTO membership_payments (membership_id, period_start, period_end, amount_cents)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(membership.start_date)
        .bind(membership.end_date)
        .bind(membership.final_price.cents())
        .execute(&mut *tx)
        .await
        .map_err(database_error("Failed to record membership payment"))?;

        tx.commit()
            .await
            .map_err(database_error("Failed to commit membership"))?;

        Ok(ActiveMembership {
            id: MembershipId::new(id),
            client_id: membership.client_id,
            holder_name: membership.holder_name.clone(),
            membership_type_id: membership.membership_type_id,
            type_name: membership.type_name.clone(),
            start_date: membership.start_date,
            end_date: membership.end_date,
            discount: membership.discount,
            final_price: membership.final_price,
            qr_path: None,
            members,
            created_at: Timestamp::from_datetime(created_at),
            updated_at: Timestamp::from_datetime(updated_at),
        })
    }

    async fn update(&self, membership: &ActiveMembership) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(database_error("Failed to start transaction"))?;

        let previous_end: Option<(NaiveDate,)> =
            sqlx::query_as("SELECT end_date FROM active_memberships WHERE id = $1 FOR UPDATE")
                .bind(membership.id.value())
                .fetch_optional(&mut *tx)
                .await
                .map_err(database_error("Failed to lock membership"))?;
        let Some((previous_end,)) = previous_end else {
            return Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                format!("Membership {} not found", membership.id),
            ));
        };

        sqlx::query(
            r#"
            UPDATE active_memberships SET
                membership_type_id = $2,
                start_date = $3,
                end_date = $4,
                discount = $5,
                final_price_cents = $6,
                qr_path = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(membership.id.value())
        .bind(membership.membership_type_id.value())
        .bind(membership.start_date)
        .bind(membership.end_date)
        .bind(i16::from(membership.discount.value()))
        .bind(membership.final_price.cents())
        .bind(&membership.qr_path)
        .bind(membership.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(database_error("Failed to update membership"))?;

        if previous_end != membership.end_date {
            sqlx::query(
                r#"
                INSERT INTO membership_payments (
                    membership_id, period_start, period_end, amount_cents
                )
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(membership.id.value())
            .bind(membership.start_date)
            .bind(membership.end_date)
            .bind(membership.final_price.cents())
            .execute(&mut *tx)
            .await
            .map_err(database_error("Failed to record renewal payment"))?;
        }

        tx.commit()
            .await
            .map_err(database_error("Failed to commit membership update"))
    }

    async fn delete(&self, id: &MembershipId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM active_memberships WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(database_error("Failed to delete membership"))?;
        Ok(result.rows_affected() > 0)
    }
}
