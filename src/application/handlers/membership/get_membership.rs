//! GetMembershipHandler - Query handler for a single membership by id.

use std::sync::Arc;

use crate::domain::foundation::MembershipId;
use crate::domain::membership::MembershipError;
use crate::ports::{MembershipReader, MembershipView};

/// Query to get a membership by its id.
#[derive(Debug, Clone)]
pub struct GetMembershipQuery {
    pub id: MembershipId,
}

/// Outcome of a lookup on an existing id.
///
/// A blocked membership is deliberately distinct from both `NotFound` (the
/// id exists) and a granted record (access is denied).
#[derive(Debug, Clone, PartialEq)]
pub enum MembershipAccess {
    /// The membership record, joined with its owner's id.
    Granted(MembershipView),

    /// The id exists but the membership is administratively blocked.
    Blocked(MembershipId),
}

/// Handler for retrieving a membership by id.
pub struct GetMembershipHandler {
    reader: Arc<dyn MembershipReader>,
}

impl GetMembershipHandler {
    pub fn new(reader: Arc<dyn MembershipReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetMembershipQuery,
    ) -> Result<MembershipAccess, MembershipError> {
        let view = self
            .reader
            .get_by_id(&query.id)
            .await?
            .ok_or_else(|| MembershipError::not_found(query.id))?;

        if view.state.is_blocked() {
            tracing::debug!(membership_id = %query.id, "blocked membership lookup");
            return Ok(MembershipAccess::Blocked(query.id));
        }

        Ok(MembershipAccess::Granted(view))
    }
}
