//! Error types for CSV row sources.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading CSV rows.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to open the CSV file.
    #[error("failed to open CSV file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read or parse a record.
    #[error("failed to read CSV: {0}")]
    Read(#[from] csv::Error),

    /// The input has no header line.
    #[error("CSV input has no header line")]
    MissingHeader,
}

impl From<CsvError> for rowbind_core::Error {
    fn from(err: CsvError) -> Self {
        Self::from_source(err)
    }
}

/// Result type for CSV operations.
pub type Result<T> = std::result::Result<T, CsvError>;
