//! Membership reader port (read side / CQRS queries).
//!
//! Defines the contract for membership queries used by listings and
//! lookups.
//!
//! # Design
//!
//! - **Read-optimized**: implementations may denormalize or cache
//! - **Owner identity only**: views carry the owning user's id and nothing
//!   else from the user record, so credential and contact fields cannot
//!   leak through this surface
//! - **Filter in the store**: `list_active` excludes blocked rows in the
//!   query itself, keeping cost proportional to the matching set

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, MembershipId, UserId};
use crate::domain::membership::{Membership, MembershipPlan, MembershipState};
use async_trait::async_trait;

/// Reader port for membership queries.
#[async_trait]
pub trait MembershipReader: Send + Sync {
    /// List all non-blocked memberships, ordered by purchase date.
    async fn list_active(&self) -> Result<Vec<MembershipView>, DomainError>;

    /// Get a membership view by id, blocked or not.
    ///
    /// Returns `None` if no row matches.
    async fn get_by_id(&self, id: &MembershipId) -> Result<Option<MembershipView>, DomainError>;

    /// Get the membership owned by a user.
    ///
    /// Returns `None` when the user has none; that is an ordinary outcome,
    /// not an error.
    async fn get_by_user(&self, user_id: &UserId) -> Result<Option<MembershipView>, DomainError>;
}

/// View of a membership joined with its owner's identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipView {
    /// Membership ID.
    pub id: MembershipId,

    /// Owning user's id. No other user fields cross this boundary.
    pub user_id: UserId,

    /// Subscription plan.
    pub plan: MembershipPlan,

    /// Purchase/activation date.
    pub created_at: NaiveDate,

    /// Date the payment was recorded.
    pub payment_date: NaiveDate,

    /// Price paid, in integer cents.
    pub price_cents: i64,

    /// Derived expiration date.
    pub expiration_date: NaiveDate,

    /// Active or blocked.
    pub state: MembershipState,
}

impl From<Membership> for MembershipView {
    fn from(m: Membership) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            plan: m.plan,
            created_at: m.created_at,
            payment_date: m.payment_date,
            price_cents: m.price_cents,
            expiration_date: m.expiration_date,
            state: m.state,
        }
    }
}
