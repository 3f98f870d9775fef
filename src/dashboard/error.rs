//! Render error types

use thiserror::Error;

/// Errors that can occur while rendering a tab
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The requested tab id is not in the registry
    #[error("Unknown tab: {0}")]
    UnknownTab(String),
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;
