//! Membership repository port.
//!
//! Defines the contract for persisting memberships and reading the plan
//! catalog. Implementations handle the actual database operations.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MembershipId, MembershipTypeId};
use crate::domain::membership::{ActiveMembership, MembershipType, NewMembership};

/// Repository port for memberships and membership types.
///
/// Deleting a membership removes its members and payments with it.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Find a membership type by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_membership_type(
        &self,
        id: &MembershipTypeId,
    ) -> Result<Option<MembershipType>, DomainError>;

    /// Find a membership with its type name and members.
    ///
    /// Returns `None` if not found.
    async fn get_active_membership(
        &self,
        id: &MembershipId,
    ) -> Result<Option<ActiveMembership>, DomainError>;

    /// All memberships, newest first.
    async fn list_memberships(&self) -> Result<Vec<ActiveMembership>, DomainError>;

    /// Persist a new purchase and its members, returning the stored record.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, membership: &NewMembership) -> Result<ActiveMembership, DomainError>;

    /// Update period, price, discount and QR path of an existing membership.
    ///
    /// # Errors
    ///
    /// - `MembershipNotFound` if membership doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, membership: &ActiveMembership) -> Result<(), DomainError>;

    /// Delete a membership with everything attached to it.
    ///
    /// Returns `false` if there was nothing to delete.
    async fn delete(&self, id: &MembershipId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MembershipRepository) {}
    }
}
