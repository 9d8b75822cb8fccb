use crate::RowId;
use serde::{Deserialize, Serialize};

/// A stored entity row as fetched from the storage layer.
///
/// The `data` field holds the row's scalar fields as JSON whose structure is
/// defined by the entity type's descriptor. Relation edges are not part of
/// `data`; they live in the link table and are surfaced through projections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub entity_type: String,
    pub data: serde_json::Value,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Row {
    /// Extract a string value from `data` using a JSON pointer (e.g. "/name").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.data.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value from `data` using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.data.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value from `data` using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.data.pointer(pointer).and_then(|v| v.as_f64())
    }

    /// Extract a row-id reference from `data` using a JSON pointer.
    pub fn get_id(&self, pointer: &str) -> Option<RowId> {
        self.get_str(pointer).and_then(|s| RowId::parse(s).ok())
    }
}
