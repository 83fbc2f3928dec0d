//! Shared fixture helpers.

use fitclub_report::db::{QueryResult, SqliteClient};
use fitclub_report::QueryRunner;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Schema and seed rows used by every catalog test.
pub const FIXTURE: &str = include_str!("../fixtures/fitness_club.sql");

/// Opens a seeded in-memory database.
///
/// The returned pool shares its only connection with the runner, so
/// statements run on the pool are visible to the runner's queries.
pub async fn seeded_sqlite() -> (SqlitePool, QueryRunner) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::raw_sql(FIXTURE).execute(&pool).await.unwrap();

    let runner = QueryRunner::with_client(Box::new(SqliteClient::from_pool(pool.clone())));
    (pool, runner)
}

/// Flattens a result into display strings, sorted so row order does not matter.
pub fn sorted_rows(result: &QueryResult) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_display_string()).collect())
        .collect();
    rows.sort();
    rows
}

/// Builds expected rows from string literals, sorted like `sorted_rows`.
pub fn expected_rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();
    rows.sort();
    rows
}
