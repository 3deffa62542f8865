//! UpdateMembershipHandler - Command handler for replacing membership fields.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::MembershipId;
use crate::domain::membership::{MembershipError, MembershipPlan};
use crate::ports::MembershipRepository;

/// Command to update a membership's plan, dates, and price.
///
/// The expiration date cannot be supplied: it is re-derived from the new
/// `(plan, created_at)` pair on every update.
#[derive(Debug, Clone)]
pub struct UpdateMembershipCommand {
    pub id: MembershipId,
    pub plan: String,
    pub created_at: NaiveDate,
    pub payment_date: NaiveDate,
    pub price_cents: i64,
}

/// Result confirming the update.
#[derive(Debug, Clone)]
pub struct UpdateMembershipResult {
    pub id: MembershipId,
    pub expiration_date: NaiveDate,
}

/// Handler for updating memberships.
pub struct UpdateMembershipHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl UpdateMembershipHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateMembershipCommand,
    ) -> Result<UpdateMembershipResult, MembershipError> {
        let mut membership = self
            .repository
            .find_by_id(&cmd.id)
            .await?
            .ok_or_else(|| MembershipError::not_found(cmd.id))?;

        let plan = MembershipPlan::parse(&cmd.plan)
            .map_err(|_| MembershipError::invalid_plan(&cmd.plan))?;

        membership.apply_update(plan, cmd.created_at, cmd.payment_date, cmd.price_cents)?;

        // A write that affects no rows surfaces as OperationFailed through
        // the repository error.
        self.repository
            .update(&membership)
            .await
            .map_err(MembershipError::operation_failed)?;

        tracing::info!(
            membership_id = %cmd.id,
            plan = %membership.plan,
            expiration_date = %membership.expiration_date,
            "membership updated"
        );

        Ok(UpdateMembershipResult {
            id: cmd.id,
            expiration_date: membership.expiration_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode, UserId};
    use crate::domain::membership::Membership;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockMembershipRepository {
        memberships: Mutex<Vec<Membership>>,
        fail_update: bool,
    }

    impl MockMembershipRepository {
        fn with_membership(membership: Membership) -> Self {
            Self {
                memberships: Mutex::new(vec![membership]),
                fail_update: false,
            }
        }

        fn empty() -> Self {
            Self {
                memberships: Mutex::new(Vec::new()),
                fail_update: false,
            }
        }

        fn failing_update(membership: Membership) -> Self {
            Self {
                memberships: Mutex::new(vec![membership]),
                fail_update: true,
            }
        }

        fn stored(&self, id: &MembershipId) -> Option<Membership> {
            self.memberships
                .lock()
                .unwrap()
                .iter()
                .find(|m| &m.id == id)
                .cloned()
        }
    }

    #[async_trait]
    impl MembershipRepository for MockMembershipRepository {
        async fn create(&self, membership: &Membership) -> Result<(), DomainError> {
            self.memberships.lock().unwrap().push(membership.clone());
            Ok(())
        }

        async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
            if self.fail_update {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "update affected no rows",
                ));
            }
            let mut memberships = self.memberships.lock().unwrap();
            if let Some(slot) = memberships.iter_mut().find(|m| m.id == membership.id) {
                *slot = membership.clone();
            }
            Ok(())
        }

        async fn find_by_id(
            &self,
            id: &MembershipId,
        ) -> Result<Option<Membership>, DomainError> {
            Ok(self.stored(id))
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
            self.memberships.lock().unwrap().retain(|m| &m.id != id);
            Ok(())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monthly_membership() -> Membership {
        Membership::new(
            MembershipId::new(),
            UserId::new(),
            MembershipPlan::MonthlyMember,
            date(2024, 1, 15),
            date(2024, 1, 15),
            1999,
        )
        .unwrap()
    }

    fn annual_update(id: MembershipId) -> UpdateMembershipCommand {
        UpdateMembershipCommand {
            id,
            plan: "AnnualMember".to_string(),
            created_at: date(2023, 5, 10),
            payment_date: date(2023, 5, 10),
            price_cents: 19999,
        }
    }

    #[tokio::test]
    async fn update_replaces_fields_and_rederives_expiration() {
        let membership = monthly_membership();
        let id = membership.id;
        let repo = Arc::new(MockMembershipRepository::with_membership(membership));

        let handler = UpdateMembershipHandler::new(repo.clone());
        let result = handler.handle(annual_update(id)).await.unwrap();

        // Monthly expiration from 2024-01-15 is gone; the annual plan from
        // 2023-05-10 fully determines the new date.
        assert_eq!(result.expiration_date, date(2024, 5, 10));

        let stored = repo.stored(&id).unwrap();
        assert_eq!(stored.plan, MembershipPlan::AnnualMember);
        assert_eq!(stored.created_at, date(2023, 5, 10));
        assert_eq!(stored.price_cents, 19999);
        assert_eq!(stored.expiration_date, date(2024, 5, 10));
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let repo = Arc::new(MockMembershipRepository::empty());
        let handler = UpdateMembershipHandler::new(repo);

        let id = MembershipId::new();
        let result = handler.handle(annual_update(id)).await;

        assert!(matches!(result, Err(MembershipError::NotFound(found)) if found == id));
    }

    #[tokio::test]
    async fn unknown_plan_fails_and_persists_nothing() {
        let membership = monthly_membership();
        let id = membership.id;
        let before = membership.clone();
        let repo = Arc::new(MockMembershipRepository::with_membership(membership));

        let handler = UpdateMembershipHandler::new(repo.clone());
        let cmd = UpdateMembershipCommand {
            plan: "GoldMember".to_string(),
            ..annual_update(id)
        };

        let result = handler.handle(cmd).await;
        assert!(matches!(result, Err(MembershipError::InvalidPlan(_))));
        assert_eq!(repo.stored(&id).unwrap(), before);
    }

    #[tokio::test]
    async fn zero_row_writes_become_operation_failed() {
        let membership = monthly_membership();
        let id = membership.id;
        let repo = Arc::new(MockMembershipRepository::failing_update(membership));

        let handler = UpdateMembershipHandler::new(repo);
        let result = handler.handle(annual_update(id)).await;

        assert!(matches!(result, Err(MembershipError::OperationFailed(_))));
    }
}
