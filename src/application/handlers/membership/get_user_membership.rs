//! GetUserMembershipHandler - Query handler keyed by the owning user.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::membership::MembershipError;
use crate::ports::{MembershipReader, MembershipView};

/// Query to get the membership owned by a user.
#[derive(Debug, Clone)]
pub struct GetUserMembershipQuery {
    pub user_id: UserId,
}

/// Handler for retrieving a user's membership.
///
/// A user without a membership is an ordinary outcome: the result is
/// `None`, not an error.
pub struct GetUserMembershipHandler {
    reader: Arc<dyn MembershipReader>,
}

impl GetUserMembershipHandler {
    pub fn new(reader: Arc<dyn MembershipReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetUserMembershipQuery,
    ) -> Result<Option<MembershipView>, MembershipError> {
        let view = self.reader.get_by_user(&query.user_id).await?;
        if view.is_none() {
            tracing::debug!(user_id = %query.user_id, "user has no membership");
        }
        Ok(view)
    }
}
