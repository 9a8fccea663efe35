//! CreateMembershipHandler - Command handler for selling a membership.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::foundation::{ClientId, Discount, MembershipTypeId};
use crate::domain::membership::{ActiveMembership, MembershipError, NewMembership};
use crate::ports::{MembershipRepository, ReceiptGenerator};

use super::qr::attach_qr;

#[derive(Debug, Clone)]
pub struct CreateMembershipCommand {
    pub client_id: ClientId,
    pub holder_name: String,
    pub membership_type_id: MembershipTypeId,
    pub start_date: NaiveDate,
    pub discount: Discount,
    pub members: Vec<String>,
}

/// Handler for purchases: prices the period, stores the membership and its
/// members, then issues the entrance QR code.
pub struct CreateMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
    receipts: Arc<dyn ReceiptGenerator>,
}

impl CreateMembershipHandler {
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
        cmd: CreateMembershipCommand,
    ) -> Result<ActiveMembership, MembershipError> {
        // 1. Load the plan
        let membership_type = self
            .repository
            .find_membership_type(&cmd.membership_type_id)
            .await?
            .ok_or(MembershipError::TypeNotFound(cmd.membership_type_id))?;

        // 2. Validate and price
        let purchase = NewMembership::purchase(
            cmd.client_id,
            &cmd.holder_name,
            &membership_type,
            cmd.start_date,
            cmd.discount,
            &cmd.members,
        )?;

        // 3. Persist
        let mut membership = self.repository.save(&purchase).await?;
        tracing::info!(
            membership_id = %membership.id,
            type_name = %membership.type_name,
            end_date = %membership.end_date,
            final_price = %membership.final_price,
            "membership created"
        );

        // 4. Entrance QR. The sale stands without it; renewal retries.
        if attach_qr(self.receipts.as_ref(), &mut membership).await {
            self.repository.update(&membership).await?;
        }

        Ok(membership)
    }
}
