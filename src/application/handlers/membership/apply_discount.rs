//! ApplyDiscountHandler - Command handler for re-pricing a membership.

use std::sync::Arc;

use crate::domain::foundation::{Discount, MembershipId};
use crate::domain::membership::{ActiveMembership, MembershipError};
use crate::ports::MembershipRepository;

#[derive(Debug, Clone)]
pub struct ApplyDiscountCommand {
    pub membership_id: MembershipId,
    pub discount: Discount,
}

/// Replaces the discount and recomputes the final price from the type's
/// base price, so discounts never compound.
pub struct ApplyDiscountHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl ApplyDiscountHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: ApplyDiscountCommand,
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

        membership.apply_discount(&membership_type, cmd.discount);
        self.repository.update(&membership).await?;

        tracing::info!(
            membership_id = %membership.id,
            discount = %membership.discount,
            final_price = %membership.final_price,
            "discount applied"
        );
        Ok(membership)
    }
}
