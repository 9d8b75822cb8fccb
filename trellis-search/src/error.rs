//! Error types for search composition.

use thiserror::Error;
use trellis_schema::EntityType;

/// Result type for search composition.
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors from composing a search request.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The filter key is not declared for this entity type.
    #[error("unknown search filter key {key:?} for {entity_type}")]
    UnknownFilterKey {
        entity_type: EntityType,
        key: String,
    },

    /// The sort key is not declared for this entity type.
    #[error("unknown sort key {key:?} for {entity_type}")]
    UnknownSortKey {
        entity_type: EntityType,
        key: String,
    },

    /// A filter value does not match its key's expected shape.
    #[error("invalid value for filter {key:?}: {reason}")]
    InvalidFilterValue { key: String, reason: String },
}
