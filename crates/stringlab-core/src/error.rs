//! Domain error types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by a [`StringRepository`](crate::store::StringRepository)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The exact string is already stored
    #[error("String already exists in the system")]
    Conflict(String),

    /// The exact string is not stored
    #[error("String does not exist in the system")]
    NotFound(String),
}

/// Errors raised while turning raw filter parameters into predicates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Invalid value for '{field}': expected {expected}, got '{value}'")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Errors raised by the natural-language query interpreter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// No query text was supplied
    #[error("Missing query parameter 'q'")]
    Missing,

    /// None of the known phrase templates matched
    #[error("Unable to parse natural language query: {0}")]
    Uninterpretable(String),

    /// A template matched but its numeric token is not a finite number
    #[error("Invalid number in natural language query: {0}")]
    InvalidNumber(String),
}
