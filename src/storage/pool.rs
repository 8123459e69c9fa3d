//! Database connection pool management.
//!
//! This module initializes and configures the SQLite connection pool with:
//! - WAL mode enabled for concurrent access
//! - Connection limits and timeouts
//! - Automatic database file creation

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::config::{DB_ACQUIRE_TIMEOUT_SECS, DB_BUSY_TIMEOUT_SECS, DB_POOL_MAX_CONNECTIONS};
use crate::error_handling::DatabaseError;

/// Shared handle to the SQLite pool.
pub type DbPool = Arc<Pool<Sqlite>>;

/// Number of pool connections for a given scan concurrency.
pub fn pool_size_for(max_concurrency: usize) -> u32 {
    let wanted = u32::try_from(max_concurrency).unwrap_or(DB_POOL_MAX_CONNECTIONS);
    wanted.clamp(1, DB_POOL_MAX_CONNECTIONS)
}

/// Initializes and returns a database connection pool for `db_path`.
///
/// Creates the database file if it doesn't exist. Every connection runs in
/// WAL mode with a busy timeout, so concurrent writers wait instead of
/// failing with `SQLITE_BUSY`.
pub async fn init_db_pool_with_path(
    db_path: &Path,
    max_connections: u32,
) -> Result<DbPool, DatabaseError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            error!("Failed to create database directory: {e}");
            DatabaseError::FileCreationError(e.to_string())
        })?;
    }

    let db_path_str = db_path.to_string_lossy().to_string();
    match OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .open(&db_path_str)
    {
        Ok(_) => debug!("Database file {db_path_str} created."),
        Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("Database file {db_path_str} already exists.")
        }
        Err(e) => {
            error!("Failed to create database file: {e}");
            return Err(DatabaseError::FileCreationError(e.to_string()));
        }
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path_str}"))?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(DB_BUSY_TIMEOUT_SECS));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(DB_ACQUIRE_TIMEOUT_SECS))
        .connect_with(options)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            DatabaseError::SqlError(e)
        })?;

    Ok(Arc::new(pool))
}
