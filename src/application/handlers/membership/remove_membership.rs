//! RemoveMembershipHandler - Command handler for permanent removal.

use std::sync::Arc;

use crate::domain::foundation::{ErrorCode, MembershipId};
use crate::domain::membership::MembershipError;
use crate::ports::MembershipRepository;

/// Command to permanently remove a membership.
#[derive(Debug, Clone)]
pub struct RemoveMembershipCommand {
    pub id: MembershipId,
}

/// Result confirming the removal.
#[derive(Debug, Clone)]
pub struct RemoveMembershipResult {
    pub id: MembershipId,
}

/// Handler for removing memberships.
///
/// Removal deletes the row and clears the owning user's reference in one
/// repository transaction. Unlike the block toggle, this is terminal.
pub struct RemoveMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl RemoveMembershipHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RemoveMembershipCommand,
    ) -> Result<RemoveMembershipResult, MembershipError> {
        if self.repository.find_by_id(&cmd.id).await?.is_none() {
            return Err(MembershipError::not_found(cmd.id));
        }

        // A concurrent removal between the check and the delete still
        // surfaces as NotFound rather than a generic failure.
        self.repository.remove(&cmd.id).await.map_err(|e| {
            if e.code == ErrorCode::MembershipNotFound {
                MembershipError::not_found(cmd.id)
            } else {
                MembershipError::operation_failed(e)
            }
        })?;

        tracing::info!(membership_id = %cmd.id, "membership removed");

        Ok(RemoveMembershipResult { id: cmd.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, UserId};
    use crate::domain::membership::{Membership, MembershipPlan};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    struct MockMembershipRepository {
        memberships: Mutex<Vec<Membership>>,
        fail_remove: bool,
    }

    impl MockMembershipRepository {
        fn with_membership(membership: Membership) -> Self {
            Self {
                memberships: Mutex::new(vec![membership]),
                fail_remove: false,
            }
        }

        fn empty() -> Self {
            Self {
                memberships: Mutex::new(Vec::new()),
                fail_remove: false,
            }
        }

        fn failing_remove(membership: Membership) -> Self {
            Self {
                memberships: Mutex::new(vec![membership]),
                fail_remove: true,
            }
        }

        fn contains(&self, id: &MembershipId) -> bool {
            self.memberships
                .lock()
                .unwrap()
                .iter()
                .any(|m| &m.id == id)
        }
    }

    #[async_trait]
    impl MembershipRepository for MockMembershipRepository {
        async fn create(&self, membership: &Membership) -> Result<(), DomainError> {
            self.memberships.lock().unwrap().push(membership.clone());
            Ok(())
        }

        async fn update(&self, _membership: &Membership) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(
            &self,
            id: &MembershipId,
        ) -> Result<Option<Membership>, DomainError> {
            Ok(self
                .memberships
                .lock()
                .unwrap()
                .iter()
                .find(|m| &m.id == id)
                .cloned())
        }

        async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Membership>, DomainError> {
            Ok(self
                .memberships
                .lock()
                .unwrap()
                .iter()
                .find(|m| &m.user_id == user_id)
                .cloned())
        }

        async fn remove(&self, id: &MembershipId) -> Result<(), DomainError> {
            if self.fail_remove {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated delete failure",
                ));
            }
            let mut memberships = self.memberships.lock().unwrap();
            let before = memberships.len();
            memberships.retain(|m| &m.id != id);
            if memberships.len() == before {
                return Err(DomainError::new(
                    ErrorCode::MembershipNotFound,
                    "Membership not found",
                ));
            }
            Ok(())
        }
    }

    fn test_membership() -> Membership {
        Membership::new(
            MembershipId::new(),
            UserId::new(),
            MembershipPlan::AnnualMember,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            19999,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn removes_an_existing_membership() {
        let membership = test_membership();
        let id = membership.id;
        let repo = Arc::new(MockMembershipRepository::with_membership(membership));

        let handler = RemoveMembershipHandler::new(repo.clone());
        let result = handler
            .handle(RemoveMembershipCommand { id })
            .await
            .unwrap();

        assert_eq!(result.id, id);
        assert!(!repo.contains(&id));
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let repo = Arc::new(MockMembershipRepository::empty());
        let handler = RemoveMembershipHandler::new(repo);

        let id = MembershipId::new();
        let result = handler.handle(RemoveMembershipCommand { id }).await;

        assert!(matches!(result, Err(MembershipError::NotFound(found)) if found == id));
    }

    #[tokio::test]
    async fn delete_failures_become_operation_failed() {
        let membership = test_membership();
        let id = membership.id;
        let repo = Arc::new(MockMembershipRepository::failing_remove(membership));

        let handler = RemoveMembershipHandler::new(repo.clone());
        let result = handler.handle(RemoveMembershipCommand { id }).await;

        assert!(matches!(result, Err(MembershipError::OperationFailed(_))));
        // The row survives a failed delete
        assert!(repo.contains(&id));
    }
}
