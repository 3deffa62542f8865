//! PostgreSQL implementation of MembershipReader.
//!
//! Read-side queries. The listing excludes blocked rows in the WHERE
//! clause, so its cost tracks the matching set rather than the whole table.

use crate::domain::foundation::{DomainError, ErrorCode, MembershipId, UserId};
use crate::domain::membership::MembershipState;
use crate::ports::{MembershipReader, MembershipView};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use super::membership_repository::parse_plan;

/// PostgreSQL implementation of the MembershipReader port.
pub struct PostgresMembershipReader {
    pool: PgPool,
}

impl PostgresMembershipReader {
    /// Creates a new PostgresMembershipReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row backing a membership view.
#[derive(Debug, sqlx::FromRow)]
struct ViewRow {
    id: Uuid,
    user_id: Uuid,
    plan: String,
    created_at: NaiveDate,
    payment_date: NaiveDate,
    price_cents: i64,
    expiration_date: NaiveDate,
    is_deleted: bool,
}

impl TryFrom<ViewRow> for MembershipView {
    type Error = DomainError;

    fn try_from(row: ViewRow) -> Result<Self, Self::Error> {
        Ok(MembershipView {
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

const VIEW_COLUMNS: &str = "id, user_id, plan, created_at, payment_date, price_cents, \
                            expiration_date, is_deleted";

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

#[async_trait]
impl MembershipReader for PostgresMembershipReader {
    async fn list_active(&self) -> Result<Vec<MembershipView>, DomainError> {
        let rows: Vec<ViewRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}
            FROM memberships
            WHERE is_deleted = FALSE
            ORDER BY created_at, id
            "#,
            VIEW_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list memberships", e))?;

        rows.into_iter().map(MembershipView::try_from).collect()
    }

    async fn get_by_id(&self, id: &MembershipId) -> Result<Option<MembershipView>, DomainError> {
        let row: Option<ViewRow> = sqlx::query_as(&format!(
            "SELECT {} FROM memberships WHERE id = $1",
            VIEW_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get membership", e))?;

        row.map(MembershipView::try_from).transpose()
    }

    async fn get_by_user(&self, user_id: &UserId) -> Result<Option<MembershipView>, DomainError> {
        let row: Option<ViewRow> = sqlx::query_as(&format!(
            r#"
            SELECT {}
            FROM memberships m
            JOIN users u ON u.membership_id = m.id
            WHERE u.id = $1
            "#,
            VIEW_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get membership for user", e))?;

        row.map(MembershipView::try_from).transpose()
    }
}
