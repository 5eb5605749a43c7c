//! Identifier and document types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A persisted document: a JSON object of field name to value.
pub type Document = Map<String, Value>;

/// Opaque document identifier.
///
/// Assigned by the store on insert. Callers never build one from scratch
/// except to look a document up again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    /// Wrap a store-issued identifier.
    pub fn new(id: impl Into<String>) -> Self {
        DocId(id.into())
    }

    /// Read an identifier out of a document field.
    ///
    /// Only non-empty strings are identifiers; `null` and anything else is
    /// "no identifier".
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.is_empty() => Some(DocId(s.clone())),
            _ => None,
        }
    }

    /// Get the string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The document representation of this identifier.
    pub fn to_value(&self) -> Value {
        Value::String(self.0.clone())
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocId {
    fn from(s: &str) -> Self {
        DocId(s.to_string())
    }
}

impl From<String> for DocId {
    fn from(s: String) -> Self {
        DocId(s)
    }
}

impl From<DocId> for Value {
    fn from(id: DocId) -> Self {
        Value::String(id.0)
    }
}

impl From<&DocId> for Value {
    fn from(id: &DocId) -> Self {
        id.to_value()
    }
}

/// Identifier of an optional node, as stored in `parent_id`/`type_id`:
/// `None` is JSON `null`.
pub fn optional_id_value(id: Option<&DocId>) -> Value {
    id.map_or(Value::Null, DocId::to_value)
}
