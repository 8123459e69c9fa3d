// storage/schema.rs
// Results table setup

use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

const CREATE_RESULTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS results (
    domain TEXT PRIMARY KEY,
    status_code INTEGER,
    redirect_chain TEXT,
    snippet TEXT,
    error_message TEXT,
    last_checked TIMESTAMP,
    scan_duration_ms INTEGER
)";

const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_status_code ON results(status_code)",
    "CREATE INDEX IF NOT EXISTS idx_last_checked ON results(last_checked)",
];

/// Creates the `results` table and its indexes if they are missing.
///
/// Safe to call on every start; existing rows are left untouched.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), DatabaseError> {
    sqlx::query(CREATE_RESULTS_TABLE).execute(pool).await?;
    for statement in CREATE_INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
