//! Entity schema registry for Trellis.
//!
//! One descriptor per entity type, naming its relations, their targets,
//! cardinalities, and supported operations. The catalogue is closed: entity
//! types are variants of [`EntityType`], so a misspelled or missing type is
//! a compile error, not a runtime lookup failure. The registry is built once
//! at process start via [`Registry::bootstrap`] and never mutated afterwards.

mod descriptor;
mod entity_type;
mod error;
mod registry;

pub use descriptor::{
    Cardinality, Delegation, EntityDescriptor, RelationOp, RelationOps, RelationSpec, ScalarField,
};
pub use entity_type::EntityType;
pub use error::{SchemaError, SchemaResult};
pub use registry::Registry;
