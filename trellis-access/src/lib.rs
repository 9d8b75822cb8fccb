//! Visibility and ownership resolution for Trellis.
//!
//! Maps stored rows to their owning principal and produces composable
//! boolean predicate fragments for private / public / owned-by queries.
//!
//! The structural rule enforced throughout: an entity type that does not
//! carry an owner of its own (a run step, a translation) delegates verbatim
//! to its parent type's resolver via the `delegates_to` declaration on its
//! descriptor. No call site re-derives ownership.

mod error;
mod owner;
mod predicate;
mod quota;
mod visibility;

pub use error::{AccessError, AccessResult};
pub use owner::{resolve_owner, ParentRows};
pub use predicate::Predicate;
pub use quota::check_quota;
pub use visibility::{ensure_owner, is_deleted, is_public, visibility, Scope};
