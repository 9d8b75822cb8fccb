//! Search predicate composition for Trellis.
//!
//! Per entity type: a default sort, the valid sort keys, the supported
//! structured filter keys (each with a named semantic effect), and the
//! free-text targets a search term is OR-combined over. The composer never
//! honours a filter key outside the declared set — an unrecognized key is a
//! contract error, not a silently ignored no-op.
//!
//! Free-text targets read the row's denormalized search document (the
//! `search_text` and `tags` fields maintained by the indexing collaborator
//! whenever a plan carries the refresh marker), plus, where declared, the
//! root entity's tags through a parent fragment.

mod compose;
mod error;
mod spec;

pub use compose::{compose, search_string};
pub use error::{SearchError, SearchResult};
pub use spec::{search_spec, FilterKey, SearchSpec, SortKey};
