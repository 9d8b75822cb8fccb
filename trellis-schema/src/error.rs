//! Error types for the schema registry.

use thiserror::Error;

/// Result type for registry lookups.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors from the string-facing registry surface.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The typename does not match any registered entity type.
    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),
}
