//! Embedded schema migrations, one set per service database.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const USER_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/users");
const TASK_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/tasks");

/// Which service database to migrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    Users,
    Tasks,
}

/// Errors raised while applying migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {message}")]
    Connect { message: String },
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

fn apply(database_url: &str, schema: Schema) -> Result<usize, MigrationError> {
    let mut conn = PgConnection::establish(database_url).map_err(|err| MigrationError::Connect {
        message: err.to_string(),
    })?;
    let migrations = match schema {
        Schema::Users => USER_MIGRATIONS,
        Schema::Tasks => TASK_MIGRATIONS,
    };
    conn.run_pending_migrations(migrations)
        .map(|applied| applied.len())
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })
}

/// Apply every pending migration for `schema`.
///
/// Diesel's migration harness is synchronous, so the work runs on the
/// blocking thread pool.
pub async fn run_migrations(database_url: &str, schema: Schema) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || apply(&url, schema))
        .await
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })??;
    info!(?schema, applied, "database migrations applied");
    Ok(())
}
