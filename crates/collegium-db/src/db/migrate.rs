//! Embedded schema migrations.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{DbError, DbResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// ## Summary
/// Applies every pending migration to the database at `database_url`.
///
/// Migrations run on a blocking thread over a synchronous connection.
///
/// ## Errors
/// Returns `DbError::MigrationError` if connecting or applying a migration fails.
#[tracing::instrument(skip(database_url))]
pub async fn run_pending_migrations(database_url: &str) -> DbResult<()> {
    let url = database_url.to_string();

    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url)
            .map_err(|err| DbError::MigrationError(err.to_string()))?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| DbError::MigrationError(err.to_string()))?;
        tracing::info!(applied = applied.len(), "Pending migrations applied");
        Ok::<(), DbError>(())
    })
    .await
    .map_err(|err| DbError::MigrationError(err.to_string()))?
}
