//! PostgreSQL implementation of UserDirectory.
//!
//! The users table is owned elsewhere in the platform; this adapter reads
//! only the identity columns the memberships core is allowed to see.

use crate::domain::foundation::{DomainError, ErrorCode, MembershipId, UserId};
use crate::ports::{UserDirectory, UserRef};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the UserDirectory port.
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a new PostgresUserDirectory with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Identity-only projection of a user row. Credential and contact columns
/// are never selected.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    membership_id: Option<Uuid>,
}

impl From<UserRow> for UserRef {
    fn from(row: UserRow) -> Self {
        UserRef {
            id: UserId::from_uuid(row.id),
            email: row.email,
            membership: row.membership_id.map(MembershipId::from_uuid),
        }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRef>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, email, membership_id FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to find user by email", e))?;

        Ok(row.map(UserRef::from))
    }

    async fn find_by_membership(
        &self,
        membership_id: &MembershipId,
    ) -> Result<Option<UserRef>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as("SELECT id, email, membership_id FROM users WHERE membership_id = $1")
                .bind(membership_id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to find user by membership", e))?;

        Ok(row.map(UserRef::from))
    }
}
