//! Read-side queries used by export and reporting.

use futures::TryStreamExt;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::config::TOO_MANY_REDIRECTS_STATUS;
use crate::error_handling::DatabaseError;

use super::models::StoredResult;
use super::results::{stored_result_from_row, ResultStore};

impl ResultStore {
    /// Loads rows for export.
    ///
    /// With `status_codes`, only rows whose status is in the set are returned.
    /// Rows are ordered 2xx, 3xx, 999, everything else (including no status),
    /// then by domain.
    pub async fn export_rows(
        &self,
        status_codes: Option<&[u16]>,
    ) -> Result<Vec<StoredResult>, DatabaseError> {
        let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT domain, status_code, redirect_chain, snippet, error_message,
                    last_checked, scan_duration_ms
             FROM results",
        );

        if let Some(codes) = status_codes {
            if codes.is_empty() {
                return Ok(Vec::new());
            }
            query_builder.push(" WHERE status_code IN (");
            let mut separated = query_builder.separated(", ");
            for code in codes {
                separated.push_bind(i64::from(*code));
            }
            separated.push_unseparated(")");
        }

        query_builder.push(
            " ORDER BY CASE
                WHEN status_code BETWEEN 200 AND 299 THEN 1
                WHEN status_code BETWEEN 300 AND 399 THEN 2
                WHEN status_code = ",
        );
        query_builder.push_bind(i64::from(TOO_MANY_REDIRECTS_STATUS));
        query_builder.push(" THEN 3 ELSE 4 END, domain");

        let query = query_builder.build();
        let mut rows = query.fetch(self.pool().as_ref());
        let mut results = Vec::new();
        while let Some(row) = rows.try_next().await? {
            results.push(stored_result_from_row(&row)?);
        }
        Ok(results)
    }

    /// Row counts per stored status code, `None` standing for failures with
    /// no status. Ordered by status, `None` first.
    pub async fn status_code_counts(&self) -> Result<Vec<(Option<u16>, i64)>, DatabaseError> {
        let rows = sqlx::query(
            "SELECT status_code, COUNT(*) AS count FROM results
             GROUP BY status_code ORDER BY status_code",
        )
        .fetch_all(self.pool().as_ref())
        .await?;

        rows.iter()
            .map(|row| -> Result<(Option<u16>, i64), DatabaseError> {
                let status: Option<i64> = row.try_get("status_code")?;
                let count: i64 = row.try_get("count")?;
                Ok((status.and_then(|s| u16::try_from(s).ok()), count))
            })
            .collect()
    }
}
