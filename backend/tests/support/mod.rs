//! Shared helpers for the database-backed integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the embedded cluster bootstrap and database reset live here rather than in
//! each suite.

mod cluster_skip;
mod pg_embed;

use postgres::{Client, NoTls};

pub use cluster_skip::handle_cluster_setup_failure;
pub use pg_embed::test_cluster;

/// Render a `postgres` error with the SQLSTATE and detail when available.
///
/// The `Display` form collapses server errors to `db error`, which hides the
/// message CI logs need.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Drop and recreate `name` through the cluster's maintenance database.
///
/// Uses `postgres` rather than Diesel so `DROP DATABASE` runs outside a
/// transaction. The two statements are sent separately because a
/// multi-statement string runs as one implicit transaction.
pub fn reset_database(maintenance_url: &str, name: &str) -> Result<(), String> {
    let mut client =
        Client::connect(maintenance_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)"))
        .map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))
}
