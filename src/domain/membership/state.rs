//! Membership block status.
//!
//! A membership is either `Active` or administratively `Blocked`. Blocking
//! is reversible; the destructive path is removal, which deletes the row
//! outright and lives in the repository, not here.

use serde::{Deserialize, Serialize};

/// Membership status.
///
/// The two states form a toggle: blocking an active membership and
/// unblocking a blocked one are both valid transitions, so applying the
/// toggle twice restores the starting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipState {
    /// Membership is in good standing and visible in listings.
    Active,

    /// Membership is administratively blocked. The row is retained but
    /// lookups report a blocked notice instead of the record.
    Blocked,
}

impl MembershipState {
    /// Returns true if this state denies access to the membership record.
    pub fn is_blocked(&self) -> bool {
        matches!(self, MembershipState::Blocked)
    }

    /// Returns the opposite state.
    pub fn toggled(&self) -> Self {
        match self {
            MembershipState::Active => MembershipState::Blocked,
            MembershipState::Blocked => MembershipState::Active,
        }
    }

    /// Maps the storage-level deleted flag into a state.
    pub fn from_deleted_flag(is_deleted: bool) -> Self {
        if is_deleted {
            MembershipState::Blocked
        } else {
            MembershipState::Active
        }
    }

    /// Maps this state onto the storage-level deleted flag.
    pub fn as_deleted_flag(&self) -> bool {
        self.is_blocked()
    }

    /// Returns the display name for this state.
    pub fn display_name(&self) -> &'static str {
        match self {
            MembershipState::Active => "active",
            MembershipState::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for MembershipState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
