//! ListMembershipsHandler - Query handler for the membership listing.

use std::sync::Arc;

use crate::domain::membership::MembershipError;
use crate::ports::{MembershipReader, MembershipView};

/// Query for all non-blocked memberships.
#[derive(Debug, Clone, Default)]
pub struct ListMembershipsQuery {}

/// Handler for listing memberships.
///
/// Blocked rows never appear: the reader excludes them in the store query
/// rather than filtering after the fetch.
pub struct ListMembershipsHandler {
    reader: Arc<dyn MembershipReader>,
}

impl ListMembershipsHandler {
    pub fn new(reader: Arc<dyn MembershipReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        _query: ListMembershipsQuery,
    ) -> Result<Vec<MembershipView>, MembershipError> {
        let views = self.reader.list_active().await?;
        tracing::debug!(count = views.len(), "listed active memberships");
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, MembershipId, UserId};
    use crate::domain::membership::{Membership, MembershipPlan};
    use async_trait::async_trait;
    use chrono::NaiveDate;

    struct MockMembershipReader {
        views: Vec<MembershipView>,
    }

    #[async_trait]
    impl MembershipReader for MockMembershipReader {
        async fn list_active(&self) -> Result<Vec<MembershipView>, DomainError> {
            // Mirrors the store-side predicate of real readers
            Ok(self
                .views
                .iter()
                .filter(|v| !v.state.is_blocked())
                .cloned()
                .collect())
        }

        async fn get_by_id(
            &self,
            id: &MembershipId,
        ) -> Result<Option<MembershipView>, DomainError> {
            Ok(self.views.iter().find(|v| &v.id == id).cloned())
        }

        async fn get_by_user(
            &self,
            user_id: &UserId,
        ) -> Result<Option<MembershipView>, DomainError> {
            Ok(self.views.iter().find(|v| &v.user_id == user_id).cloned())
        }
    }

    fn test_view(blocked: bool) -> MembershipView {
        let mut membership = Membership::new(
            MembershipId::new(),
            UserId::new(),
            MembershipPlan::MonthlyMember,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            1999,
        )
        .unwrap();
        if blocked {
            membership.toggle_block();
        }
        MembershipView::from(membership)
    }

    #[tokio::test]
    async fn lists_only_non_blocked_memberships() {
        let active = test_view(false);
        let blocked = test_view(true);
        let handler = ListMembershipsHandler::new(Arc::new(MockMembershipReader {
            views: vec![active.clone(), blocked],
        }));

        let result = handler.handle(ListMembershipsQuery::default()).await.unwrap();

        assert_eq!(result, vec![active]);
    }

    #[tokio::test]
    async fn empty_store_yields_empty_list() {
        let handler = ListMembershipsHandler::new(Arc::new(MockMembershipReader {
            views: vec![],
        }));

        let result = handler.handle(ListMembershipsQuery::default()).await.unwrap();
        assert!(result.is_empty());
    }
}
