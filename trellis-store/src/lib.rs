//! SQLite storage driver for Trellis.
//!
//! Executes a validated [`trellis_shape::WritePlan`] as one transaction:
//! either the whole nested tree commits or none of it does. Rows live in a
//! single `entities` table as typed JSON; relation edges live in a `links`
//! table keyed by `(parent, relation, child)`.

mod entity_store;
mod error;

pub use entity_store::EntityStore;
pub use error::{StoreError, StoreResult};
