//! Relation shape compiler for Trellis.
//!
//! Turns a nested, polymorphic create/update request into a validated nested
//! write plan ready for the storage driver to execute as one atomic
//! transaction. All validation happens here, synchronously, before any write
//! is attempted: a failure at any recursion depth aborts the whole call.
//!
//! The compiler consults the schema registry for each relation it descends
//! into and never re-shapes the parent it was reached from (the relation's
//! `parent_back_reference` is excluded on recursion, which is what breaks
//! cycles in the entity graph).

mod compiler;
mod context;
mod error;
mod payload;
mod plan;
mod translations;

pub use compiler::{shape_create, shape_relation, shape_update};
pub use context::ShapeContext;
pub use error::{ShapeError, ShapeResult};
pub use payload::ShapePayload;
pub use plan::{PlanOp, RelationWrite, WritePlan};
pub use translations::shape_translations;
