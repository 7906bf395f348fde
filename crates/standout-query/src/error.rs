//! Error types for the query crate.

use thiserror::Error;

/// Errors that can occur when building queries or converting records.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A count argument was negative.
    #[error("invalid argument: {name} must be non-negative, got {value}")]
    InvalidArgument { name: &'static str, value: i64 },

    /// Operator symbol is not one of `=`, `!=`, `>`, `<`, `>=`, `<=`, `IN`.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// Sort direction is neither `ASC` nor `DESC`.
    #[error("unknown sort direction '{0}'")]
    UnknownDirection(String),

    /// Record or query JSON could not be converted.
    #[error("json conversion failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
