//! Membership handlers.
//!
//! Command and query handlers for membership lifecycle operations.
//!
//! ## Commands
//! - Adding a membership for a registered user
//! - Updating plan, dates, and price (expiration re-derived)
//! - Toggling the block status
//! - Removing a membership permanently
//!
//! ## Queries
//! - List non-blocked memberships
//! - Get a membership by id (blocked ids yield a notice, not the record)
//! - Get the membership owned by a user

mod add_membership;
mod get_membership;
mod get_user_membership;
mod list_memberships;
mod remove_membership;
mod toggle_block;
mod update_membership;

// Commands
pub use add_membership::{AddMembershipCommand, AddMembershipHandler, AddMembershipResult};
pub use remove_membership::{
    RemoveMembershipCommand, RemoveMembershipHandler, RemoveMembershipResult,
};
pub use toggle_block::{
    ToggleMembershipBlockCommand, ToggleMembershipBlockHandler, ToggleMembershipBlockResult,
};
pub use update_membership::{
    UpdateMembershipCommand, UpdateMembershipHandler, UpdateMembershipResult,
};

// Queries
pub use get_membership::{GetMembershipHandler, GetMembershipQuery, MembershipAccess};
pub use get_user_membership::{GetUserMembershipHandler, GetUserMembershipQuery};
pub use list_memberships::{ListMembershipsHandler, ListMembershipsQuery};
