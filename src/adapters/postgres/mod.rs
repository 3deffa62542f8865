//! PostgreSQL adapters - Database implementations for the membership ports.
//!
//! - `PostgresMembershipRepository` - Write side, with transactional
//!   create/remove spanning the memberships and users tables
//! - `PostgresMembershipReader` - Read side with the blocked filter pushed
//!   into the query
//! - `PostgresUserDirectory` - Identity-only lookups into the users table

mod membership_reader;
mod membership_repository;
mod user_directory;

pub use membership_reader::PostgresMembershipReader;
pub use membership_repository::PostgresMembershipRepository;
pub use user_directory::PostgresUserDirectory;

use crate::config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Build a connection pool from the database configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
}
