//! CSV export functionality.
//!
//! Exports stored scan results to CSV, one row per domain.

use std::io::{self, ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::storage::ResultStore;

use super::row::{export_record, EXPORT_COLUMNS};

/// Wrapper around a Write that ignores broken pipe errors (EPIPE).
/// This allows graceful handling when stdout is piped to a command that exits early.
struct IgnoreBrokenPipe<W: Write> {
    inner: W,
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(buf.len())
            } else {
                Err(e)
            }
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(())
            } else {
                Err(e)
            }
        })
    }
}

/// Exports stored results to CSV.
///
/// # Arguments
///
/// * `db_path` - Path to the SQLite database
/// * `output` - Output file path (or stdout if None)
/// * `status_codes` - Optional filter on stored status codes
///
/// # Returns
///
/// Returns the number of records exported, or an error if export fails.
pub async fn export_csv(
    db_path: &Path,
    output: Option<&Path>,
    status_codes: Option<&[u16]>,
) -> Result<usize> {
    let store = ResultStore::open(db_path, 1)
        .await
        .context("Failed to initialize database pool")?;
    let count = export_store_csv(&store, output, status_codes).await?;
    store.pool().close().await;
    Ok(count)
}

/// Exports the rows of an open store to CSV.
pub async fn export_store_csv(
    store: &ResultStore,
    output: Option<&Path>,
    status_codes: Option<&[u16]>,
) -> Result<usize> {
    let rows = store
        .export_rows(status_codes)
        .await
        .context("Failed to query results for export")?;

    let mut writer: Writer<Box<dyn Write>> = if let Some(output_path) = output {
        let file = std::fs::File::create(output_path).with_context(|| {
            format!("Failed to create output file: {}", output_path.display())
        })?;
        Writer::from_writer(Box::new(file) as Box<dyn Write>)
    } else {
        Writer::from_writer(Box::new(IgnoreBrokenPipe {
            inner: io::stdout(),
        }) as Box<dyn Write>)
    };

    writer.write_record(EXPORT_COLUMNS)?;
    for row in &rows {
        writer.write_record(export_record(row))?;
    }
    writer.flush()?;

    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::{create_test_store, failed_result, result_with_status};

    #[tokio::test]
    async fn test_export_store_csv_writes_header_and_rows() {
        let (store, dir) = create_test_store().await;
        store.upsert(&result_with_status("a.example.com", 200)).await.unwrap();
        store
            .upsert(&failed_result("b.example.com", "ConnectError: refused"))
            .await
            .unwrap();

        let output = dir.path().join("out.csv");
        let count = export_store_csv(&store, Some(output.as_path()), None).await.unwrap();
        assert_eq!(count, 2);

        let mut reader = csv::Reader::from_path(&output).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), EXPORT_COLUMNS.to_vec());

        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(&records[0][0], "a.example.com");
        assert_eq!(&records[0][1], "200");
        assert_eq!(&records[0][2], "https://a.example.com/ (200)");
        assert_eq!(&records[0][3], "<html>ok</html>");
        assert_eq!(&records[1][0], "b.example.com");
        assert_eq!(&records[1][1], "");
        assert_eq!(&records[1][4], "ConnectError: refused");
    }
}
