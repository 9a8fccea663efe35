//! In-memory membership store.
//!
//! Backs the membership and access handlers in tests and in local runs
//! without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, MemberId, MembershipId, MembershipTypeId, Timestamp,
};
use crate::domain::membership::{ActiveMembership, Member, MembershipType, NewMembership};
use crate::ports::MembershipRepository;

#[derive(Debug, Default)]
struct State {
    types: HashMap<MembershipTypeId, MembershipType>,
    memberships: HashMap<MembershipId, ActiveMembership>,
    next_membership_id: i64,
    next_member_id: i64,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipStore {
    state: Arc<RwLock<State>>,
    fail: bool,
}

impl InMemoryMembershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails as if the database were down.
    pub fn failing() -> Self {
        Self {
            state: Arc::default(),
            fail: true,
        }
    }

    /// Adds a plan to the catalog.
    pub async fn insert_type(&self, membership_type: MembershipType) {
        self.state
            .write()
            .await
            .types
            .insert(membership_type.id, membership_type);
    }

    /// Stores a membership as-is, keeping its id.
    pub async fn insert_membership(&self, membership: ActiveMembership) {
        let mut state = self.state.write().await;
        state.next_membership_id = state.next_membership_id.max(membership.id.value());
        state.memberships.insert(membership.id, membership);
    }

    pub async fn membership_count(&self) -> usize {
        self.state.read().await.memberships.len()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::database("membership store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipStore {
    async fn find_membership_type(
        &self,
        id: &MembershipTypeId,
    ) -> Result<Option<MembershipType>, DomainError> {
        self.check()?;
        Ok(self.state.read().await.types.get(id).cloned())
    }

    async fn get_active_membership(
        &self,
        id: &MembershipId,
    ) -> Result<Option<ActiveMembership>, DomainError> {
        self.check()?;
        Ok(self.state.read().await.memberships.get(id).cloned())
    }

    async fn list_memberships(&self) -> Result<Vec<ActiveMembership>, DomainError> {
        self.check()?;
        let mut all: Vec<ActiveMembership> =
            self.state.read().await.memberships.values().cloned().collect();
        all.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(all)
    }

    async fn save(&self, membership: &NewMembership) -> Result<ActiveMembership, DomainError> {
        self.check()?;
        let mut state = self.state.write().await;
        state.next_membership_id += 1;
        let id = MembershipId::new(state.next_membership_id);

        let mut members = Vec::with_capacity(membership.members.len());
        for name in &membership.members {
            state.next_member_id += 1;
            members.push(Member {
                id: MemberId::new(state.next_member_id),
                name: name.clone(),
            });
        }

        let now = Timestamp::now();
        let stored = ActiveMembership {
            id,
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
            created_at: now,
            updated_at: now,
        };
        state.memberships.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, membership: &ActiveMembership) -> Result<(), DomainError> {
        self.check()?;
        let mut state = self.state.write().await;
        match state.memberships.get_mut(&membership.id) {
            Some(existing) => {
                *existing = membership.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                format!("Membership {} not found", membership.id),
            )),
        }
    }

    async fn delete(&self, id: &MembershipId) -> Result<bool, DomainError> {
        self.check()?;
        Ok(self.state.write().await.memberships.remove(id).is_some())
    }
}
