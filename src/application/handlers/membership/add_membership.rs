//! AddMembershipHandler - Command handler for purchasing a membership.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::MembershipId;
use crate::domain::membership::{Membership, MembershipError, MembershipPlan};
use crate::ports::{MembershipRepository, UserDirectory};

/// Command to add a membership for a registered user.
///
/// The plan arrives as its wire name and is parsed here, so an unrecognized
/// value fails before anything is persisted.
#[derive(Debug, Clone)]
pub struct AddMembershipCommand {
    pub email: String,
    pub plan: String,
    pub created_at: NaiveDate,
    pub payment_date: NaiveDate,
    pub price_cents: i64,
}

/// Result of successful membership creation.
#[derive(Debug, Clone)]
pub struct AddMembershipResult {
    pub membership_id: MembershipId,
}

/// Handler for adding memberships.
pub struct AddMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
    directory: Arc<dyn UserDirectory>,
}

impl AddMembershipHandler {
    pub fn new(
        repository: Arc<dyn MembershipRepository>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            repository,
            directory,
        }
    }

    pub async fn handle(
        &self,
        cmd: AddMembershipCommand,
    ) -> Result<AddMembershipResult, MembershipError> {
        // 1. The purchaser must already be registered
        let user = self
            .directory
            .find_by_email(&cmd.email)
            .await?
            .ok_or_else(|| MembershipError::user_not_found(&cmd.email))?;

        // 2. Parse the plan; unknown values fail with nothing written
        let plan = MembershipPlan::parse(&cmd.plan)
            .map_err(|_| MembershipError::invalid_plan(&cmd.plan))?;

        // 3. Build the aggregate; expiration is derived here
        let membership = Membership::new(
            MembershipId::new(),
            user.id,
            plan,
            cmd.created_at,
            cmd.payment_date,
            cmd.price_cents,
        )?;

        // 4. Insert the row and repoint the user's reference in one
        //    transaction
        self.repository.create(&membership).await?;

        tracing::info!(
            membership_id = %membership.id,
            user_id = %membership.user_id,
            plan = %membership.plan,
            "membership created"
        );

        Ok(AddMembershipResult {
            membership_id: membership.id,
        })
    }
}
