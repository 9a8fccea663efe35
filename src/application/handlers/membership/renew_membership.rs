//! RenewMembershipHandler - Command handler for starting a new period.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::foundation::{today, Discount, MembershipId};
use crate::domain::membership::{ActiveMembership, MembershipError};
use crate::ports::{MembershipRepository, ReceiptGenerator};

use super::qr::attach_qr;

#[derive(Debug, Clone)]
pub struct RenewMembershipCommand {
    pub membership_id: MembershipId,
    /// Defaults to the day after the current end date, or today if expired.
    pub start_date: Option<NaiveDate>,
    /// Defaults to the discount already on the membership.
    pub discount: Option<Discount>,
}

/// Handler for renewals. A membership still missing its entrance QR (the
/// code failed to generate at purchase) gets one here.
pub struct RenewMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
    receipts: Arc<dyn ReceiptGenerator>,
}

impl RenewMembershipHandler {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        receipts: Arc<dyn ReceiptGenerator>,
    ) -> Self {
        Self {
            repository,
            receipts,
        }
    }

    pub async fn handle(
        &self,
        cmd: RenewMembershipCommand,
    ) -> Result<ActiveMembership, MembershipError> {
        self.handle_on(cmd, today()).await
    }

    /// Renews as seen on `today`.
    pub async fn handle_on(
        &self,
        cmd: RenewMembershipCommand,
        today: NaiveDate,
    ) -> Result<ActiveMembership, MembershipError> {
        let mut membership = self
            .repository
            .get_active_membership(&cmd.membership_id)
            .await?
            .ok_or(MembershipError::NotFound(cmd.membership_id))?;

        let membership_type = self
            .repository
            .find_membership_type(&membership.membership_type_id)
            .await?
            .ok_or(MembershipError::TypeNotFound(membership.membership_type_id))?;

        membership.renew(&membership_type, cmd.start_date, cmd.discount, today)?;
        if membership.qr_path.is_none() {
            attach_qr(self.receipts.as_ref(), &mut membership).await;
        }
        self.repository.update(&membership).await?;

        tracing::info!(
            membership_id = %membership.id,
            start_date = %membership.start_date,
            end_date = %membership.end_date,
            "membership renewed"
        );
        Ok(membership)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMembershipStore;
    use crate::adapters::receipts::LocalReceiptGenerator;
    use crate::application::handlers::fixtures::{date, membership_store, stored_membership};
    use tempfile::TempDir;

    fn handler(store: &InMemoryMembershipStore, dir: &TempDir) -> RenewMembershipHandler {
        RenewMembershipHandler::new(
            Arc::new(store.clone()),
            Arc::new(LocalReceiptGenerator::new(dir.path(), "")),
        )
    }

    fn command(id: i64) -> RenewMembershipCommand {
        RenewMembershipCommand {
            membership_id: MembershipId::new(id),
            start_date: None,
            discount: None,
        }
    }

    #[tokio::test]
    async fn active_membership_continues_after_end_date() {
        let store = membership_store().await;
        store.insert_membership(stored_membership(3, date(2024, 2, 15))).await;
        let dir = TempDir::new().unwrap();
        let handler = handler(&store, &dir);

        let renewed = handler.handle_on(command(3), date(2024, 2, 10)).await.unwrap();

        assert_eq!(renewed.start_date, date(2024, 2, 16));
        assert_eq!(renewed.end_date, date(2024, 3, 16));
        let stored = store.get_active_membership(&MembershipId::new(3)).await.unwrap().unwrap();
        assert_eq!(stored.end_date, date(2024, 3, 16));
    }

    #[tokio::test]
    async fn explicit_start_and_discount_win() {
        let store = membership_store().await;
        store.insert_membership(stored_membership(3, date(2024, 2, 15))).await;
        let dir = TempDir::new().unwrap();
        let handler = handler(&store, &dir);

        let cmd = RenewMembershipCommand {
            start_date: Some(date(2024, 1, 31)),
            discount: Some(Discount::try_new(20).unwrap()),
            ..command(3)
        };
        let renewed = handler.handle_on(cmd, date(2024, 5, 1)).await.unwrap();

        assert_eq!(renewed.end_date, date(2024, 2, 29));
        assert_eq!(renewed.final_price.to_string(), "400.00");
    }

    #[tokio::test]
    async fn unknown_membership_is_not_found() {
        let dir = TempDir::new().unwrap();
        let handler = handler(&membership_store().await, &dir);
        let err = handler.handle(command(404)).await.unwrap_err();
        assert_eq!(err, MembershipError::NotFound(MembershipId::new(404)));
    }

    #[tokio::test]
    async fn missing_qr_is_issued_on_renewal() {
        let store = membership_store().await;
        store.insert_membership(stored_membership(3, date(2024, 2, 15))).await;
        let dir = TempDir::new().unwrap();

        let renewed = handler(&store, &dir)
            .handle_on(command(3), date(2024, 2, 10))
            .await
            .unwrap();

        let qr = renewed.qr_path.clone().unwrap();
        assert!(qr.starts_with("qr/membresia_3_"));
        let stored = store.get_active_membership(&MembershipId::new(3)).await.unwrap().unwrap();
        assert_eq!(stored.qr_path, Some(qr));
    }

    #[tokio::test]
    async fn existing_qr_is_kept() {
        let store = membership_store().await;
        let mut membership = stored_membership(3, date(2024, 2, 15));
        membership.qr_path = Some("qr/membresia_3_original.txt".to_string());
        store.insert_membership(membership).await;
        let dir = TempDir::new().unwrap();

        let renewed = handler(&store, &dir)
            .handle_on(command(3), date(2024, 2, 10))
            .await
            .unwrap();

        assert_eq!(renewed.qr_path.as_deref(), Some("qr/membresia_3_original.txt"));
    }
}
