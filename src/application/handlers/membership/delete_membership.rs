//! DeleteMembershipHandler - Admin command removing a membership.

use std::sync::Arc;

use crate::domain::foundation::MembershipId;
use crate::domain::membership::MembershipError;
use crate::ports::MembershipRepository;

#[derive(Debug, Clone)]
pub struct DeleteMembershipCommand {
    pub membership_id: MembershipId,
}

/// Deletes a membership together with its members and payments.
pub struct DeleteMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl DeleteMembershipHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteMembershipCommand) -> Result<(), MembershipError> {
        if !self.repository.delete(&cmd.membership_id).await? {
            return Err(MembershipError::NotFound(cmd.membership_id));
        }
        tracing::info!(membership_id = %cmd.membership_id, "membership deleted");
        Ok(())
    }
}
