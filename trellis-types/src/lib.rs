//! Core value types for the Trellis entity engine.
//!
//! Defines the universal types that every Trellis subsystem depends on:
//! - [`RowId`], [`UserId`], [`OrgId`] — time-ordered identifiers
//! - [`LanguageTag`] — normalized language tag for translation sub-records
//! - [`Caller`] — the already-authenticated principal driving one save call
//! - [`OwnerRef`] — discriminated reference to the principal owning a row
//! - [`Row`] — a stored entity row as fetched from the storage layer
//! - [`Weights`] / [`WeightMap`] — derived numeric fields for versioned types
//!
//! These types are consumed by the schema registry, the shape compiler, the
//! access resolver, and the storage driver. None of them performs I/O.

mod caller;
mod ids;
mod language;
mod owner;
mod row;
mod weights;

pub use caller::Caller;
pub use ids::{OrgId, RowId, UserId};
pub use language::LanguageTag;
pub use owner::OwnerRef;
pub use row::Row;
pub use weights::{WeightMap, Weights};
