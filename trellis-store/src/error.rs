//! Error types for the storage driver.

use thiserror::Error;
use trellis_schema::EntityType;
use trellis_types::RowId;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while executing plans or fetching rows.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No row with the given id exists (also raised for connect targets).
    #[error("row not found: {0}")]
    NotFound(RowId),

    /// The row exists but is not of the type the relation targets.
    #[error("row {id} is a {actual}, expected {expected}")]
    WrongEntityType {
        id: RowId,
        expected: EntityType,
        actual: String,
    },

    /// A shaping error surfaced through the store's save path. Nothing was
    /// written.
    #[error(transparent)]
    Shape(#[from] trellis_shape::ShapeError),
}
