//! Error types for shaping and plan construction.

use thiserror::Error;
use trellis_schema::{EntityType, RelationOp};

/// Result type for shaping operations.
pub type ShapeResult<T> = Result<T, ShapeError>;

/// Errors detected during plan construction, before any storage write.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// The payload carried an operation the relation does not allow.
    #[error("relation {relation:?} on {entity_type} does not allow {op}")]
    InvalidRelationOperation {
        entity_type: EntityType,
        relation: String,
        op: RelationOp,
    },

    /// A one-to-one relation was given more than one target.
    #[error("relation {relation:?} on {entity_type} resolves to more than one target")]
    AmbiguousRelationTarget {
        entity_type: EntityType,
        relation: String,
    },

    /// A required relation resolved to neither an id nor a nested create.
    #[error("required relation {relation:?} on {entity_type} has no target")]
    RequiredRelationMissing {
        entity_type: EntityType,
        relation: String,
    },

    /// Two translation entries in one payload carry the same language tag.
    #[error("duplicate translation language {language:?} on {entity_type}")]
    DuplicateTranslationLanguage {
        entity_type: EntityType,
        language: String,
    },

    /// The payload carried a field the entity type does not declare.
    #[error("unknown field {field:?} on {entity_type}")]
    UnknownField {
        entity_type: EntityType,
        field: String,
    },

    /// The payload's structure does not match the expected shape.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}
