//! Membership repository port (write side).
//!
//! Defines the contract for persisting Membership aggregates.
//!
//! # Design
//!
//! - **Write-focused**: reads here exist only to support command handlers
//! - **One reference per user**: a fresh purchase overwrites the owning
//!   user's membership reference
//! - **Atomic ownership**: `create` and `remove` update both the membership
//!   row and the owning user's reference inside a single transaction, so a
//!   crash can never leave the two out of sync

use crate::domain::foundation::{DomainError, MembershipId, UserId};
use crate::domain::membership::Membership;
use async_trait::async_trait;

/// Repository port for Membership aggregate persistence.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Persist a new membership and point the owning user's membership
    /// reference at it, atomically.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the owning user row has vanished
    /// - `DatabaseError` on persistence failure
    async fn create(&self, membership: &Membership) -> Result<(), DomainError>;

    /// Write all mutable fields of an existing membership.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` when the write affects no rows or otherwise fails
    async fn update(&self, membership: &Membership) -> Result<(), DomainError>;

    /// Find a membership by its ID.
    ///
    /// Returns `None` if not found. Blocked memberships are returned; the
    /// caller decides how to surface them.
    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError>;

    /// Find the membership a user currently references.
    ///
    /// Returns `None` if the user has no membership.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Membership>, DomainError>;

    /// Delete a membership row and clear the owning user's reference to
    /// it, atomically.
    ///
    /// # Errors
    ///
    /// - `MembershipNotFound` if the row does not exist
    /// - `DatabaseError` on any other persistence failure
    async fn remove(&self, id: &MembershipId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn membership_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn MembershipRepository) {}
    }
}
