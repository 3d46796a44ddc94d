use std::path::Path;

use rusqlite::{Connection, named_params, types::Value};
use tracing::{debug, error, info};

use crate::error::ReportError;
use crate::models::{DateRange, QueryOutcome};

const BYTES_PER_GB: f64 = 1_000_000_000.0;

/// Read-only access to the usage database.
///
/// The connection is owned for the process lifetime and closed on drop.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the SQLite database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to open database");
            ReportError::OpenDatabase {
                path: path.display().to_string(),
                source: e,
            }
        })?;
        info!(path = %path.display(), "Connected to database");

        Ok(Self { conn })
    }

    /// Run one section query, binding the day count to `:days` when the
    /// section filters by recency.
    ///
    /// Zero rows is reported as [`QueryOutcome::Empty`], never as an empty
    /// row list. Errors are logged here and propagated unchanged.
    pub fn run_section_query(
        &self,
        query: &str,
        date_range: DateRange,
    ) -> Result<QueryOutcome, ReportError> {
        self.fetch_rows(query, date_range).map_err(|e| {
            error!(error = %e, "Error executing query");
            e
        })
    }

    fn fetch_rows(
        &self,
        query: &str,
        date_range: DateRange,
    ) -> Result<QueryOutcome, ReportError> {
        let mut stmt = self.conn.prepare(query)?;
        let column_count = stmt.column_count();

        let mut rows = match date_range.days() {
            Some(days) => stmt.query(named_params! { ":days": days })?,
            None => stmt.query([])?,
        };

        let mut data = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                cells.push(display_value(row.get::<_, Value>(idx)?));
            }
            data.push(cells);
        }

        if data.is_empty() {
            debug!("Query returned no rows");
            return Ok(QueryOutcome::Empty);
        }

        debug!(rows = data.len(), "Query returned rows");
        Ok(QueryOutcome::Rows(data))
    }

    /// Total size of all stored attachments in gigabytes, formatted with
    /// two decimal places. `None` when the attachment table holds no rows.
    pub fn total_storage_gb(&self) -> Result<Option<String>, ReportError> {
        let total: Option<f64> = self
            .conn
            .query_row("SELECT SUM(file_size) FROM attachment", [], |row| {
                row.get(0)
            })
            .map_err(|e| {
                error!(error = %e, "Error executing query");
                e
            })?;

        Ok(total.map(|bytes| format!("{:.2}", bytes / BYTES_PER_GB)))
    }
}

/// String form of a column value as it appears in the report.
fn display_value(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(b) => format!("[{} bytes]", b.len()),
    }
}

#[cfg(test)]
impl Store {
    pub fn open_in_memory() -> Result<Self, ReportError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    pub fn execute_batch(&self, sql: &str) -> Result<(), ReportError> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }
}
