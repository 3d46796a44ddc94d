//! Error types for the report pipeline.

use thiserror::Error;

/// Errors raised while producing the usage report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to open database {path}: {source}")]
    OpenDatabase {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Section '{section}' has {headers} column headers but rows carry {columns} values")]
    ColumnMismatch {
        section: String,
        headers: usize,
        columns: usize,
    },

    #[error("Failed to write report file: {0}")]
    Io(#[from] std::io::Error),
}
