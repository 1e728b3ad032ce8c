//! PostgreSQL implementation of the askup repository.
//!
//! ## Database Tables
//!
//! - `users`: Accounts with their password hash; username and email are unique
//! - `questions`: Questions with their net `votes` and `voted_by` JSONB record
//! - `answers`: Answers with their net `votes` and `voted_by` JSONB record
//!
//! Keeping `voted_by` in a JSONB column next to `votes` makes a vote a single
//! row update.
mod forum_repository;
mod item_store;
mod rows;

pub use forum_repository::PostgresForumRepository;
pub use item_store::PostgresItemStore;

use crate::ItemStoreError;

/// Migrations for the forum schema, embedded at compile time.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("src/postgres/migrations");

/// Applies any pending migrations to the database behind `pool`.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), ItemStoreError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| ItemStoreError::Database(e.into()))
}
