//! User directory port.
//!
//! The user store belongs to another part of the platform; this port is
//! the narrow, read-only window the memberships core looks through. Only
//! identity and the current membership reference cross the boundary;
//! credentials, addresses, and contact details stay on the other side.
//!
//! Writes to the user's membership reference happen inside the
//! transactional `MembershipRepository::create`/`remove` operations, so
//! this port carries no `save`.

use crate::domain::foundation::{DomainError, MembershipId, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Lookup port into the externally-owned user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by email address.
    ///
    /// Returns `None` if no user is registered under that email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRef>, DomainError>;

    /// Find the user currently referencing a membership.
    ///
    /// Returns `None` if no user points at it.
    async fn find_by_membership(
        &self,
        membership_id: &MembershipId,
    ) -> Result<Option<UserRef>, DomainError>;
}

/// Projection of a user record carrying identity only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// The user's id, used to link memberships.
    pub id: UserId,

    /// Email address the user registered with.
    pub email: String,

    /// The membership this user currently holds, if any.
    pub membership: Option<MembershipId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn user_directory_is_object_safe() {
        fn _accepts_dyn(_directory: &dyn UserDirectory) {}
    }
}
