//! Read-side projection tables for Trellis.
//!
//! One declarative table per entity type: how API-facing relation names map
//! to storage relations (including polymorphic fan-out for union-typed
//! relations), which relations surface only as counts, which are reached
//! through a join record, and which fields are always stripped. Projections
//! are never involved in writes.

mod format;
mod tables;

pub use format::format_row;
pub use tables::{projection, ApiRelation, Projection};
