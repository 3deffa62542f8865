//! Membership aggregate entity.
//!
//! A Membership links one user to a plan, a price, and a derived expiration
//! date. Each user has at most one membership at a time.
//!
//! # Design Decisions
//!
//! - **One per user**: the user record references at most one membership;
//!   a new purchase overwrites the reference
//! - **Money in cents**: All monetary values stored as i64 cents (not floats)
//! - **Derived expiration**: `expiration_date` is computed from `(plan,
//!   created_at)` on construction and on every update; callers cannot set it

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, MembershipId, UserId};

use super::{MembershipPlan, MembershipState};

/// Membership aggregate - a user's subscription to the platform.
///
/// # Invariants
///
/// - `id` is globally unique
/// - the owning user references at most one membership at a time
/// - `expiration_date` equals `plan.expiration_from(created_at)`
/// - `price_cents >= 0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Unique identifier for this membership.
    pub id: MembershipId,

    /// User who owns this membership. Identity only; credential, address,
    /// and contact fields never enter this aggregate.
    pub user_id: UserId,

    /// Plan determining the billing period.
    pub plan: MembershipPlan,

    /// Date the membership was purchased or activated.
    pub created_at: NaiveDate,

    /// Date the corresponding payment was recorded.
    pub payment_date: NaiveDate,

    /// Price paid, in integer cents.
    pub price_cents: i64,

    /// Derived date at which benefits lapse.
    pub expiration_date: NaiveDate,

    /// Active or administratively blocked.
    pub state: MembershipState,
}

impl Membership {
    /// Create a new active membership, deriving its expiration date.
    ///
    /// # Errors
    ///
    /// - Validation error if `price_cents` is negative
    /// - Validation error if the expiration date is unrepresentable
    pub fn new(
        id: MembershipId,
        user_id: UserId,
        plan: MembershipPlan,
        created_at: NaiveDate,
        payment_date: NaiveDate,
        price_cents: i64,
    ) -> Result<Self, DomainError> {
        validate_price(price_cents)?;
        let expiration_date = plan.expiration_from(created_at)?;

        Ok(Self {
            id,
            user_id,
            plan,
            created_at,
            payment_date,
            price_cents,
            expiration_date,
            state: MembershipState::Active,
        })
    }

    /// Check if this membership is administratively blocked.
    pub fn is_blocked(&self) -> bool {
        self.state.is_blocked()
    }

    /// Flip between Active and Blocked, returning the new state.
    ///
    /// Applying the toggle twice restores the original state.
    pub fn toggle_block(&mut self) -> MembershipState {
        self.state = self.state.toggled();
        self.state
    }

    /// Replace the mutable fields and re-derive the expiration date.
    ///
    /// The previous expiration value is always discarded; only the new
    /// `(plan, created_at)` pair determines the result. The block state is
    /// left unchanged.
    ///
    /// # Errors
    ///
    /// Validation errors leave the aggregate untouched.
    pub fn apply_update(
        &mut self,
        plan: MembershipPlan,
        created_at: NaiveDate,
        payment_date: NaiveDate,
        price_cents: i64,
    ) -> Result<(), DomainError> {
        validate_price(price_cents)?;
        let expiration_date = plan.expiration_from(created_at)?;

        self.plan = plan;
        self.created_at = created_at;
        self.payment_date = payment_date;
        self.price_cents = price_cents;
        self.expiration_date = expiration_date;
        Ok(())
    }
}

fn validate_price(price_cents: i64) -> Result<(), DomainError> {
    if price_cents < 0 {
        return Err(DomainError::validation(
            "price_cents",
            format!("Price must not be negative, got {}", price_cents),
        ));
    }
    Ok(())
}
