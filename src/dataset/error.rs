//! Dataset error types
//!
//! Defines all errors that can occur while loading the sales table and the
//! geographic reference.

use thiserror::Error;

/// Errors that can occur in the data layer
#[derive(Error, Debug)]
pub enum DatasetError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Connection or query against the data source failed
    #[error("Source error: {0}")]
    Source(String),

    /// Connection string names a backend we cannot read
    #[error("Unsupported data source: {0}")]
    UnsupportedSource(String),

    /// Table name is not a plain SQL identifier
    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    /// A required column is absent from the result set
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// CSV file could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Geographic reference could not be loaded
    #[error("Geo reference error: {0}")]
    Geo(String),
}

impl From<rusqlite::Error> for DatasetError {
    fn from(err: rusqlite::Error) -> Self {
        DatasetError::Source(err.to_string())
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        DatasetError::Geo(err.to_string())
    }
}

/// Result type alias for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;
