//! Embedded schema migrations for the record store.
//!
//! The harness records applied versions in `__diesel_schema_migrations`, and
//! every DDL statement is `IF NOT EXISTS`, so applying twice is a no-op.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::RecordStoreError;

/// Migrations from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply pending migrations over a blocking connection.
///
/// Returns the versions applied by this call; empty when the store is
/// already up to date.
///
/// # Errors
///
/// [`RecordStoreError::Connection`] when the database cannot be reached and
/// [`RecordStoreError::Query`] when a migration fails.
pub fn run_migrations(database_url: &str) -> Result<Vec<String>, RecordStoreError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| RecordStoreError::connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| RecordStoreError::query(format!("migration: {err}")))?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();
    info!(count = applied.len(), versions = ?applied, "schema migrations applied");
    Ok(applied)
}

/// Run [`run_migrations`] on the blocking thread pool.
///
/// # Errors
///
/// As [`run_migrations`]; a panicked worker is reported as a query error.
pub async fn run_migrations_blocking(database_url: String) -> Result<Vec<String>, RecordStoreError> {
    tokio::task::spawn_blocking(move || run_migrations(&database_url))
        .await
        .map_err(|err| RecordStoreError::query(format!("migration task: {err}")))?
}
