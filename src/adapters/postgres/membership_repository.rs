//! PostgreSQL implementation of MembershipRepository.
//!
//! The create and remove operations span two tables (memberships and the
//! users table's membership reference) and therefore run inside a single
//! transaction each: either both writes land or neither does.

use crate::domain::foundation::{DomainError, ErrorCode, MembershipId, UserId};
use crate::domain::membership::{Membership, MembershipPlan, MembershipState};
use crate::ports::MembershipRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the MembershipRepository port.
///
/// Uses sqlx for type-safe database operations with connection pooling.
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    /// Creates a new PostgresMembershipRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a membership.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: Uuid,
    user_id: Uuid,
    plan: String,
    created_at: NaiveDate,
    payment_date: NaiveDate,
    price_cents: i64,
    expiration_date: NaiveDate,
    is_deleted: bool,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = DomainError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        Ok(Membership {
            id: MembershipId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            plan: parse_plan(&row.plan)?,
            created_at: row.created_at,
            payment_date: row.payment_date,
            price_cents: row.price_cents,
            expiration_date: row.expiration_date,
            state: MembershipState::from_deleted_flag(row.is_deleted),
        })
    }
}

pub(super) fn parse_plan(s: &str) -> Result<MembershipPlan, DomainError> {
    match s {
        "monthly_member" => Ok(MembershipPlan::MonthlyMember),
        "annual_member" => Ok(MembershipPlan::AnnualMember),
        "creator" => Ok(MembershipPlan::Creator),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid plan value: {}", s),
        )),
    }
}

pub(super) fn plan_to_string(plan: &MembershipPlan) -> &'static str {
    match plan {
        MembershipPlan::MonthlyMember => "monthly_member",
        MembershipPlan::AnnualMember => "annual_member",
        MembershipPlan::Creator => "creator",
    }
}

const SELECT_COLUMNS: &str = "id, user_id, plan, created_at, payment_date, price_cents, \
                              expiration_date, is_deleted";

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn create(&self, membership: &Membership) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO memberships (
                id, user_id, plan, created_at, payment_date, price_cents,
                expiration_date, is_deleted
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(membership.id.as_uuid())
        .bind(membership.user_id.as_uuid())
        .bind(plan_to_string(&membership.plan))
        .bind(membership.created_at)
        .bind(membership.payment_date)
        .bind(membership.price_cents)
        .bind(membership.expiration_date)
        .bind(membership.state.as_deleted_flag())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to insert membership", e))?;

        // Repoint the owner's reference; a fresh purchase overwrites any
        // previous one.
        let updated = sqlx::query("UPDATE users SET membership_id = $2 WHERE id = $1")
            .bind(membership.user_id.as_uuid())
            .bind(membership.id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to update user reference", e))?;

        if updated.rows_affected() == 0 {
            // Dropping the transaction rolls the insert back
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("No user row for id {}", membership.user_id),
            ));
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit membership creation", e))?;

        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE memberships SET
                plan = $2,
                created_at = $3,
                payment_date = $4,
                price_cents = $5,
                expiration_date = $6,
                is_deleted = $7
            WHERE id = $1
            "#,
        )
        .bind(membership.id.as_uuid())
        .bind(plan_to_string(&membership.plan))
        .bind(membership.created_at)
        .bind(membership.payment_date)
        .bind(membership.price_cents)
        .bind(membership.expiration_date)
        .bind(membership.state.as_deleted_flag())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update membership", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "Membership update affected no rows",
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        let row: Option<MembershipRow> = sqlx::query_as(&format!(
            "SELECT {} FROM memberships WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find membership", e))?;

        row.map(Membership::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Membership>, DomainError> {
        // The user's current membership is whatever their reference points
        // at, not whichever rows carry their id.
        let row: Option<MembershipRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}
            FROM memberships m
            JOIN users u ON u.membership_id = m.id
            WHERE u.id = $1
            "#,
            SELECT_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find membership for user", e))?;

        row.map(Membership::try_from).transpose()
    }

    async fn remove(&self, id: &MembershipId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        // Detach first; no referencing user is fine.
        sqlx::query("UPDATE users SET membership_id = NULL WHERE membership_id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to clear user reference", e))?;

        let result = sqlx::query("DELETE FROM memberships WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete membership", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                "Membership not found",
            ));
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit membership removal", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plan_works_for_all_values() {
        assert_eq!(
            parse_plan("monthly_member").unwrap(),
            MembershipPlan::MonthlyMember
        );
        assert_eq!(
            parse_plan("annual_member").unwrap(),
            MembershipPlan::AnnualMember
        );
        assert_eq!(parse_plan("creator").unwrap(), MembershipPlan::Creator);
    }

    #[test]
    fn parse_plan_rejects_invalid_values() {
        assert!(parse_plan("invalid").is_err());
        assert!(parse_plan("").is_err());
        assert!(parse_plan("MonthlyMember").is_err());
    }

    #[test]
    fn roundtrip_plan_conversion() {
        for plan in [
            MembershipPlan::MonthlyMember,
            MembershipPlan::AnnualMember,
            MembershipPlan::Creator,
        ] {
            let s = plan_to_string(&plan);
            let parsed = parse_plan(s).unwrap();
            assert_eq!(plan, parsed);
        }
    }

    #[test]
    fn row_conversion_maps_deleted_flag_to_state() {
        let row = MembershipRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan: "creator".to_string(),
            created_at: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            payment_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            price_cents: 4999,
            expiration_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            is_deleted: true,
        };

        let membership = Membership::try_from(row).unwrap();
        assert_eq!(membership.state, MembershipState::Blocked);
        assert_eq!(membership.plan, MembershipPlan::Creator);
    }

    #[test]
    fn row_conversion_rejects_unknown_plan() {
        let row = MembershipRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan: "gold".to_string(),
            created_at: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            payment_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            price_cents: 4999,
            expiration_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            is_deleted: false,
        };

        assert!(Membership::try_from(row).is_err());
    }
}
