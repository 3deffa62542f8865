//! Membership plan definitions and the expiration rule.
//!
//! The plan determines how long a membership lasts. Expiration is always
//! derived from the purchase date by calendar arithmetic; callers never set
//! it directly.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

/// Membership plan offered by the platform.
///
/// Wire values match the public API contract (`MonthlyMember`,
/// `AnnualMember`, `Creator`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipPlan {
    /// Reader plan billed month to month.
    MonthlyMember,

    /// Reader plan billed once a year.
    AnnualMember,

    /// Publishing plan for comic creators. Two-month billing period.
    Creator,
}

impl MembershipPlan {
    /// Parses a plan from its wire name.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidPlan` error for any unrecognized value. This is
    /// the only place an unknown plan can enter the domain, so the check
    /// happens before anything is persisted.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "MonthlyMember" => Ok(MembershipPlan::MonthlyMember),
            "AnnualMember" => Ok(MembershipPlan::AnnualMember),
            "Creator" => Ok(MembershipPlan::Creator),
            other => Err(DomainError::new(
                ErrorCode::InvalidPlan,
                format!("Unknown membership plan: {}", other),
            )),
        }
    }

    /// Billing period length in calendar months.
    pub fn period_months(&self) -> u32 {
        match self {
            MembershipPlan::MonthlyMember => 1,
            MembershipPlan::AnnualMember => 12,
            MembershipPlan::Creator => 2,
        }
    }

    /// Derives the expiration date for a membership purchased on `created_at`.
    ///
    /// Calendar arithmetic clamps to the end of the month: Jan 31 plus one
    /// month is Feb 29 in a leap year and Feb 28 otherwise.
    ///
    /// # Errors
    ///
    /// Fails with a validation error when the result would fall outside the
    /// representable date range.
    pub fn expiration_from(&self, created_at: NaiveDate) -> Result<NaiveDate, DomainError> {
        created_at
            .checked_add_months(Months::new(self.period_months()))
            .ok_or_else(|| {
                DomainError::validation("created_at", "Expiration date out of range")
            })
    }

    /// Returns the display name for this plan.
    pub fn display_name(&self) -> &'static str {
        match self {
            MembershipPlan::MonthlyMember => "MonthlyMember",
            MembershipPlan::AnnualMember => "AnnualMember",
            MembershipPlan::Creator => "Creator",
        }
    }
}

impl std::fmt::Display for MembershipPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for MembershipPlan {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
