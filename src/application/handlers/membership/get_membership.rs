//! GetMembershipHandler / ListMembershipsHandler - Membership queries.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::foundation::{today, MembershipId};
use crate::domain::membership::{ActiveMembership, MembershipError, MembershipStatus};
use crate::ports::MembershipRepository;

/// A membership with its status as of the query date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipView {
    pub membership: ActiveMembership,
    pub status: MembershipStatus,
}

impl MembershipView {
    pub fn on(membership: ActiveMembership, today: NaiveDate) -> Self {
        let status = membership.status(today);
        Self { membership, status }
    }
}

#[derive(Debug, Clone)]
pub struct GetMembershipQuery {
    pub membership_id: MembershipId,
}

pub struct GetMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl GetMembershipHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetMembershipQuery,
    ) -> Result<MembershipView, MembershipError> {
        let membership = self
            .repository
            .get_active_membership(&query.membership_id)
            .await?
            .ok_or(MembershipError::NotFound(query.membership_id))?;
        Ok(MembershipView::on(membership, today()))
    }
}

pub struct ListMembershipsHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl ListMembershipsHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<Vec<MembershipView>, MembershipError> {
        let today = today();
        let memberships = self.repository.list_memberships().await?;
        Ok(memberships
            .into_iter()
            .map(|m| MembershipView::on(m, today))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMembershipStore;
    use crate::application::handlers::fixtures::{membership_store, stored_membership};
    use chrono::Days;

    #[tokio::test]
    async fn status_is_derived_from_end_date() {
        let store = membership_store().await;
        let today = today();
        store
            .insert_membership(stored_membership(1, today - Days::new(1)))
            .await;
        store
            .insert_membership(stored_membership(2, today + Days::new(30)))
            .await;
        let handler = GetMembershipHandler::new(Arc::new(store));

        let expired = handler
            .handle(GetMembershipQuery { membership_id: MembershipId::new(1) })
            .await
            .unwrap();
        let active = handler
            .handle(GetMembershipQuery { membership_id: MembershipId::new(2) })
            .await
            .unwrap();

        assert_eq!(expired.status, MembershipStatus::Expired);
        assert_eq!(active.status, MembershipStatus::Active);
    }

    #[tokio::test]
    async fn missing_membership_is_not_found() {
        let handler = GetMembershipHandler::new(Arc::new(membership_store().await));
        let err = handler
            .handle(GetMembershipQuery { membership_id: MembershipId::new(5) })
            .await
            .unwrap_err();
        assert_eq!(err, MembershipError::NotFound(MembershipId::new(5)));
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let store = membership_store().await;
        let end = today() + Days::new(3);
        store.insert_membership(stored_membership(1, end)).await;
        store.insert_membership(stored_membership(2, end)).await;
        let handler = ListMembershipsHandler::new(Arc::new(store));

        let list = handler.handle().await.unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].membership.id, MembershipId::new(2));
        assert_eq!(list[0].status, MembershipStatus::Expiring);
    }

    #[tokio::test]
    async fn list_failure_is_infrastructure() {
        let handler = ListMembershipsHandler::new(Arc::new(InMemoryMembershipStore::failing()));
        assert!(matches!(
            handler.handle().await,
            Err(MembershipError::Infrastructure(_))
        ));
    }
}
