//! Error types for the access layer.

use thiserror::Error;
use trellis_schema::EntityType;

/// Result type for access checks.
pub type AccessResult<T> = Result<T, AccessError>;

/// Authorization failures, surfaced distinctly from validation failures so
/// callers can tell "not allowed" from "malformed request".
#[derive(Debug, Error)]
pub enum AccessError {
    /// The caller is not the owning principal of the row.
    #[error("permission denied on {entity_type}")]
    PermissionDenied { entity_type: EntityType },

    /// The per-type object quota would be exceeded (a quota of 0 means the
    /// type is never creatable directly).
    #[error("quota exceeded for {entity_type}: at most {max} objects")]
    MaxObjectsExceeded { entity_type: EntityType, max: u32 },
}
