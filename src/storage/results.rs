//! The domain-keyed result store.
//!
//! One row per domain. Writes overwrite the whole row; rows are never deleted.

use std::collections::HashSet;
use std::path::Path;

use futures::TryStreamExt;
use log::debug;
use sqlx::Row;

use crate::error_handling::DatabaseError;
use crate::models::ScanResult;

use super::models::{classify_row, CacheSnapshot, StoredResult};
use super::pool::{init_db_pool_with_path, DbPool};
use super::schema::init_schema;

/// Timestamp format of the `last_checked` column.
pub const LAST_CHECKED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const UPSERT_RESULT: &str = "INSERT INTO results
    (domain, status_code, redirect_chain, snippet, error_message, last_checked, scan_duration_ms)
    VALUES (?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT(domain) DO UPDATE SET
        status_code = excluded.status_code,
        redirect_chain = excluded.redirect_chain,
        snippet = excluded.snippet,
        error_message = excluded.error_message,
        last_checked = excluded.last_checked,
        scan_duration_ms = excluded.scan_duration_ms";

/// Durable store of scan outcomes.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Clone)]
pub struct ResultStore {
    pool: DbPool,
}

impl ResultStore {
    /// Opens (creating if needed) the database at `db_path` and ensures the
    /// schema exists.
    pub async fn open(db_path: &Path, max_connections: u32) -> Result<Self, DatabaseError> {
        let pool = init_db_pool_with_path(db_path, max_connections).await?;
        let store = ResultStore { pool };
        store.init().await?;
        Ok(store)
    }

    /// Wraps an existing pool. Call [`ResultStore::init`] before use.
    pub fn from_pool(pool: DbPool) -> Self {
        ResultStore { pool }
    }

    /// Idempotent schema setup.
    pub async fn init(&self) -> Result<(), DatabaseError> {
        init_schema(&self.pool).await
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Writes `result`, replacing any earlier row for the same domain.
    ///
    /// The write is a single statement in its own transaction, so a reader
    /// never sees a partially updated row.
    pub async fn upsert(&self, result: &ScanResult) -> Result<(), DatabaseError> {
        let redirect_chain = serde_json::to_string(&result.redirect_chain)?;
        let last_checked = result.last_checked.format(LAST_CHECKED_FORMAT).to_string();

        let mut tx = self.pool.begin().await?;
        sqlx::query(UPSERT_RESULT)
            .bind(&result.domain)
            .bind(result.status_code.map(i64::from))
            .bind(redirect_chain)
            .bind(&result.snippet)
            .bind(result.error_message.as_deref())
            .bind(last_checked)
            .bind(result.scan_duration_ms)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        debug!("Stored result for {}", result.domain);
        Ok(())
    }

    /// Classifies every stored row once and partitions the domains.
    pub async fn snapshot(&self) -> Result<CacheSnapshot, DatabaseError> {
        let mut snapshot = CacheSnapshot::default();
        let mut rows = sqlx::query(
            "SELECT domain, status_code, redirect_chain, error_message FROM results",
        )
        .fetch(self.pool.as_ref());

        while let Some(row) = rows.try_next().await? {
            let domain: String = row.try_get("domain")?;
            let status_code: Option<i64> = row.try_get("status_code")?;
            let redirect_chain: Option<String> = row.try_get("redirect_chain")?;
            let error_message: Option<String> = row.try_get("error_message")?;
            let state = classify_row(
                status_code,
                redirect_chain.as_deref(),
                error_message.as_deref(),
            );
            snapshot.insert(domain, state);
        }
        Ok(snapshot)
    }

    /// Domains whose stored outcome is meaningful.
    pub async fn cached_domains(&self) -> Result<HashSet<String>, DatabaseError> {
        Ok(self.snapshot().await?.cached)
    }

    /// Domains whose stored outcome is a failure with no usable result.
    pub async fn failed_domains(&self) -> Result<HashSet<String>, DatabaseError> {
        Ok(self.snapshot().await?.failed)
    }

    /// Stored error messages of the given domains.
    pub async fn error_messages_for(
        &self,
        domains: &HashSet<String>,
    ) -> Result<Vec<String>, DatabaseError> {
        let mut messages = Vec::new();
        let mut rows = sqlx::query(
            "SELECT domain, error_message FROM results WHERE error_message IS NOT NULL",
        )
        .fetch(self.pool.as_ref());

        while let Some(row) = rows.try_next().await? {
            let domain: String = row.try_get("domain")?;
            if domains.contains(&domain) {
                messages.push(row.try_get("error_message")?);
            }
        }
        Ok(messages)
    }

    /// Loads the stored row for `domain`, if any.
    pub async fn get(&self, domain: &str) -> Result<Option<StoredResult>, DatabaseError> {
        let row = sqlx::query(
            "SELECT domain, status_code, redirect_chain, snippet, error_message,
                    last_checked, scan_duration_ms
             FROM results WHERE domain = ?",
        )
        .bind(domain)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(|row| stored_result_from_row(&row)).transpose()
    }

    /// Number of stored rows.
    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM results")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(count)
    }
}

pub(super) fn stored_result_from_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<StoredResult, DatabaseError> {
    let status_code: Option<i64> = row.try_get("status_code")?;
    Ok(StoredResult {
        domain: row.try_get("domain")?,
        status_code: status_code.and_then(|s| u16::try_from(s).ok()),
        redirect_chain: row.try_get("redirect_chain")?,
        snippet: row.try_get("snippet")?,
        error_message: row.try_get("error_message")?,
        last_checked: row.try_get("last_checked")?,
        scan_duration_ms: row.try_get("scan_duration_ms")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::{create_test_store, failed_result, result_with_status};

    #[tokio::test]
    async fn test_upsert_overwrites_row() {
        let (store, _dir) = create_test_store().await;

        store
            .upsert(&failed_result("www.example.com", "ConnectError: refused"))
            .await
            .unwrap();
        store
            .upsert(&result_with_status("www.example.com", 200))
            .await
            .unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        let row = store.get("www.example.com").await.unwrap().unwrap();
        assert_eq!(row.status_code, Some(200));
        assert_eq!(row.error_message, None);
        assert_eq!(row.snippet.as_deref(), Some("<html>ok</html>"));
    }

    #[tokio::test]
    async fn test_chain_is_stored_as_json() {
        let (store, _dir) = create_test_store().await;
        let result = result_with_status("shop.example.com", 200);
        store.upsert(&result).await.unwrap();

        let row = store.get("shop.example.com").await.unwrap().unwrap();
        let chain: Vec<crate::models::Hop> =
            serde_json::from_str(row.redirect_chain.as_deref().unwrap()).unwrap();
        assert_eq!(chain, result.redirect_chain);
    }

    #[tokio::test]
    async fn test_last_checked_format() {
        let (store, _dir) = create_test_store().await;
        store
            .upsert(&result_with_status("a.example.com", 200))
            .await
            .unwrap();

        let row = store.get("a.example.com").await.unwrap().unwrap();
        let stamp = row.last_checked.unwrap();
        assert!(chrono::NaiveDateTime::parse_from_str(&stamp, LAST_CHECKED_FORMAT).is_ok());
    }

    #[tokio::test]
    async fn test_snapshot_sets() {
        let (store, _dir) = create_test_store().await;
        store.upsert(&result_with_status("ok.example.com", 200)).await.unwrap();
        store.upsert(&result_with_status("moved.example.com", 301)).await.unwrap();
        store
            .upsert(&failed_result("down.example.com", "DnsError: no such host"))
            .await
            .unwrap();

        let cached = store.cached_domains().await.unwrap();
        let failed = store.failed_domains().await.unwrap();
        assert!(cached.contains("ok.example.com"));
        assert!(cached.contains("moved.example.com"));
        assert!(!cached.contains("down.example.com"));
        assert_eq!(failed.len(), 1);
        assert!(failed.contains("down.example.com"));
    }

    #[tokio::test]
    async fn test_error_messages_for_subset() {
        let (store, _dir) = create_test_store().await;
        store
            .upsert(&failed_result("a.example.com", "ConnectTimeout: timed out"))
            .await
            .unwrap();
        store
            .upsert(&failed_result("b.example.com", "DnsError: no such host"))
            .await
            .unwrap();
        store.upsert(&result_with_status("c.example.com", 200)).await.unwrap();

        let wanted: HashSet<String> = ["a.example.com", "c.example.com"]
            .into_iter()
            .map(String::from)
            .collect();
        let messages = store.error_messages_for(&wanted).await.unwrap();
        assert_eq!(messages, vec!["ConnectTimeout: timed out".to_string()]);
    }

    #[tokio::test]
    async fn test_reopen_keeps_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let db_path = dir.path().join("scan.db");
        {
            let store = ResultStore::open(&db_path, 2).await.unwrap();
            store.upsert(&result_with_status("a.example.com", 200)).await.unwrap();
            store.pool().close().await;
        }
        let store = ResultStore::open(&db_path, 2).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.cached_domains().await.unwrap().contains("a.example.com"));
    }
}
