//! Version weight calculator for Trellis.
//!
//! A batch pre-pass over every versioned entity being created or updated in
//! one save call. Runs exactly once, before any shaping, and produces the
//! immutable weight map that the shape compiler reads while filling each
//! version's `simplicity`/`complexity` scalars.
//!
//! Cross-references between versions in the batch are resolved against the
//! batch first, then against the weights of already-stored versions supplied
//! by the storage collaborator. A reference to a version that is being
//! deleted in the same call is fatal: the save aborts rather than silently
//! dropping the reference.

mod calculator;
mod draft;
mod error;

pub use calculator::compute_weights;
pub use draft::{StepDraft, TranslationDraft, VersionDraft};
pub use error::{WeightError, WeightResult};
