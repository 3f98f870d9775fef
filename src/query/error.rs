//! Query error types
//!
//! Error conditions raised while turning request inputs into query pieces.

use thiserror::Error;

/// Errors that can occur during query operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A filter date could not be parsed
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Unknown grouping dimension name
    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),

    /// Unknown measure name
    #[error("Unknown measure: {0}")]
    UnknownMeasure(String),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
