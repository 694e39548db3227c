//! Embedded schema migrations.
//!
//! Migrations run over a synchronous Diesel connection on a blocking thread
//! before the server starts accepting requests.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::BookingRepositoryError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply every pending migration to the database at `database_url`.
pub async fn run_migrations(database_url: String) -> Result<(), BookingRepositoryError> {
    tokio::task::spawn_blocking(move || apply_pending(&database_url))
        .await
        .map_err(|err| BookingRepositoryError::connection(format!("migration task: {err}")))?
}

fn apply_pending(database_url: &str) -> Result<(), BookingRepositoryError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| BookingRepositoryError::connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| BookingRepositoryError::query(format!("migration: {err}")))?;
    info!(count = applied.len(), "database migrations applied");
    Ok(())
}
