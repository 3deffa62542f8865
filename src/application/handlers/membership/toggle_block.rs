//! ToggleMembershipBlockHandler - Command handler for the block toggle.

use std::sync::Arc;

use crate::domain::foundation::MembershipId;
use crate::domain::membership::{MembershipError, MembershipState};
use crate::ports::MembershipRepository;

/// Command to flip a membership between Active and Blocked.
#[derive(Debug, Clone)]
pub struct ToggleMembershipBlockCommand {
    pub id: MembershipId,
}

/// Result carrying the state after the toggle.
#[derive(Debug, Clone)]
pub struct ToggleMembershipBlockResult {
    pub id: MembershipId,
    pub state: MembershipState,
}

/// Handler for blocking and unblocking memberships.
///
/// The toggle is intentionally symmetric: applying it to a blocked
/// membership reactivates it, so two calls restore the original state. The
/// row itself is always retained; removal is a separate, destructive
/// command.
pub struct ToggleMembershipBlockHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl ToggleMembershipBlockHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: ToggleMembershipBlockCommand,
    ) -> Result<ToggleMembershipBlockResult, MembershipError> {
        let mut membership = self
            .repository
            .find_by_id(&cmd.id)
            .await?
            .ok_or_else(|| MembershipError::not_found(cmd.id))?;

        let state = membership.toggle_block();
        self.repository.update(&membership).await?;

        tracing::info!(membership_id = %cmd.id, state = %state, "membership block toggled");

        Ok(ToggleMembershipBlockResult { id: cmd.id, state })
    }
}
