//! Error types for the weight calculator.

use thiserror::Error;
use trellis_types::RowId;

/// Result type for weight computation.
pub type WeightResult<T> = Result<T, WeightError>;

/// Errors from the batch weight pre-pass.
#[derive(Debug, Error)]
pub enum WeightError {
    /// A version in the batch references a version that is being deleted in
    /// the same save call. The whole call must abort.
    #[error("version {referenced_by:?} references version {id} which is being deleted")]
    DeletedEntityReferenced {
        /// The id of the deleting version.
        id: RowId,
        /// Display name of the referencing version, in the caller's
        /// preferred language where available.
        referenced_by: String,
    },
}
