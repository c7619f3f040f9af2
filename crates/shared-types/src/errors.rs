//! # Error Types
//!
//! Errors raised while building a caller context.

use thiserror::Error;

/// Errors that can occur when a caller context is assembled from raw input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// A required identifier was not supplied.
    #[error("Missing context field: {field}")]
    Missing { field: &'static str },

    /// An identifier could not be parsed.
    #[error("Invalid context field {field}: {value:?}")]
    Invalid { field: &'static str, value: String },

    /// Identifiers are database keys and must be positive.
    #[error("Context field {field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: i64 },
}
