//! Membership domain module.
//!
//! Handles the membership lifecycle: plan selection, expiration-date
//! derivation, and the reversible block/unblock status.
//!
//! # Module Structure
//!
//! - `aggregate` - Membership aggregate entity
//! - `plan` - MembershipPlan enum and the calendar expiration rule
//! - `state` - Active/Blocked status
//! - `errors` - Membership-specific error taxonomy

mod aggregate;
mod errors;
mod plan;
mod state;

pub use aggregate::Membership;
pub use errors::MembershipError;
pub use plan::MembershipPlan;
pub use state::MembershipState;
