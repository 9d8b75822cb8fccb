use crate::{ShapeError, ShapeResult};
use serde_json::{Map, Value};
use trellis_types::RowId;

/// The caller-supplied nested object for one relation.
///
/// At most five operation keys, mirroring [`trellis_schema::RelationOp`].
/// Which of them may be non-empty is decided by the relation's allowed
/// operation set, checked by the compiler — a violating key is a contract
/// error, never silently ignored.
#[derive(Debug, Clone, Default)]
pub struct ShapePayload {
    /// Existing row ids to connect.
    pub connect: Vec<RowId>,
    /// Nested full payloads to create, in caller order.
    pub create: Vec<Map<String, Value>>,
    /// `(id, partial payload)` pairs to update.
    pub update: Vec<(RowId, Map<String, Value>)>,
    /// Row ids to delete.
    pub delete: Vec<RowId>,
    /// Row ids to disconnect without deleting.
    pub disconnect: Vec<RowId>,
}

impl ShapePayload {
    /// True when no operation key carries any entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connect.is_empty()
            && self.create.is_empty()
            && self.update.is_empty()
            && self.delete.is_empty()
            && self.disconnect.is_empty()
    }

    /// Parses a relation payload from its JSON form.
    ///
    /// `connect`/`delete`/`disconnect` accept a single id or an id array;
    /// `create` accepts a single object or an object array; `update` accepts
    /// `{ "id": ..., "data": {...} }` or an array of such pairs.
    pub fn from_value(value: &Value) -> ShapeResult<Self> {
        let obj = value.as_object().ok_or_else(|| {
            ShapeError::MalformedPayload("relation payload must be an object".into())
        })?;

        let mut payload = ShapePayload::default();
        for (key, entry) in obj {
            match key.as_str() {
                "connect" => payload.connect = parse_ids(entry, "connect")?,
                "create" => payload.create = parse_objects(entry, "create")?,
                "update" => payload.update = parse_updates(entry)?,
                "delete" => payload.delete = parse_ids(entry, "delete")?,
                "disconnect" => payload.disconnect = parse_ids(entry, "disconnect")?,
                other => {
                    return Err(ShapeError::MalformedPayload(format!(
                        "unexpected relation payload key {other:?}"
                    )));
                }
            }
        }
        Ok(payload)
    }
}

fn parse_id(value: &Value, key: &str) -> ShapeResult<RowId> {
    value
        .as_str()
        .and_then(|s| RowId::parse(s).ok())
        .ok_or_else(|| ShapeError::MalformedPayload(format!("{key} entries must be row ids")))
}

fn parse_ids(value: &Value, key: &str) -> ShapeResult<Vec<RowId>> {
    match value {
        Value::Array(items) => items.iter().map(|v| parse_id(v, key)).collect(),
        Value::Null => Ok(Vec::new()),
        single => Ok(vec![parse_id(single, key)?]),
    }
}

fn parse_object(value: &Value, key: &str) -> ShapeResult<Map<String, Value>> {
    value
        .as_object()
        .cloned()
        .ok_or_else(|| ShapeError::MalformedPayload(format!("{key} entries must be objects")))
}

fn parse_objects(value: &Value, key: &str) -> ShapeResult<Vec<Map<String, Value>>> {
    match value {
        Value::Array(items) => items.iter().map(|v| parse_object(v, key)).collect(),
        Value::Null => Ok(Vec::new()),
        single => Ok(vec![parse_object(single, key)?]),
    }
}

fn parse_update_entry(value: &Value) -> ShapeResult<(RowId, Map<String, Value>)> {
    let obj = value.as_object().ok_or_else(|| {
        ShapeError::MalformedPayload("update entries must be { id, data } objects".into())
    })?;
    let id = obj
        .get("id")
        .ok_or_else(|| ShapeError::MalformedPayload("update entry missing id".into()))
        .and_then(|v| parse_id(v, "update"))?;
    let data = obj
        .get("data")
        .map(|v| parse_object(v, "update"))
        .transpose()?
        .unwrap_or_default();
    Ok((id, data))
}

fn parse_updates(value: &Value) -> ShapeResult<Vec<(RowId, Map<String, Value>)>> {
    match value {
        Value::Array(items) => items.iter().map(parse_update_entry).collect(),
        Value::Null => Ok(Vec::new()),
        single => Ok(vec![parse_update_entry(single)?]),
    }
}
