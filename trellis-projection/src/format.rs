use crate::Projection;
use serde_json::{Map, Value};
use trellis_types::Row;

/// Formats a stored row into its API shape: id and timestamps first, then
/// every scalar field except the projection's hidden ones. Scalar values
/// pass through unchanged, so a shaped-then-stored payload formats back to
/// exactly what the caller supplied (modulo documented normalization).
#[must_use]
pub fn format_row(projection: &Projection, row: &Row) -> Value {
    let mut out = Map::new();
    out.insert("id".into(), Value::String(row.id.to_string()));
    out.insert("created_at".into(), row.created_at.into());
    out.insert("updated_at".into(), row.updated_at.into());

    if let Some(data) = row.data.as_object() {
        for (key, value) in data {
            if projection.hides(key) {
                continue;
            }
            out.insert(key.clone(), value.clone());
        }
    }
    Value::Object(out)
}
