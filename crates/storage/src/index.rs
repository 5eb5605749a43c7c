//! Secondary indexes over a single top-level document field
//!
//! A `FieldIndex` maps each distinct value of its field to the set of
//! documents holding that value. Values are keyed by their canonical JSON
//! text, so `"a"` and `1` never collide and nested objects compare by content.
//! Documents that lack the field are simply not indexed.

use rustc_hash::FxHashMap;
use serde_json::Value;
use std::collections::BTreeSet;
use warehaus_core::{DocId, Document};

/// Secondary index: field value → document ids
#[derive(Debug, Clone)]
pub struct FieldIndex {
    field: String,
    entries: FxHashMap<String, BTreeSet<DocId>>,
}

fn index_key(value: &Value) -> String {
    value.to_string()
}

impl FieldIndex {
    /// Create an empty index over `field`
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            entries: FxHashMap::default(),
        }
    }

    /// The indexed field name
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Index `doc` under `id`.
    pub fn insert(&mut self, id: &DocId, doc: &Document) {
        if let Some(value) = doc.get(&self.field) {
            self.entries
                .entry(index_key(value))
                .or_default()
                .insert(id.clone());
        }
    }

    /// Drop `doc` (as previously indexed under `id`) from the index.
    ///
    /// Empty value buckets are removed so the map does not accumulate them.
    pub fn remove(&mut self, id: &DocId, doc: &Document) {
        if let Some(value) = doc.get(&self.field) {
            let key = index_key(value);
            if let Some(ids) = self.entries.get_mut(&key) {
                ids.remove(id);
                if ids.is_empty() {
                    self.entries.remove(&key);
                }
            }
        }
    }

    /// Ids of documents whose field equals `value`
    pub fn lookup(&self, value: &Value) -> impl Iterator<Item = &DocId> {
        self.entries.get(&index_key(value)).into_iter().flatten()
    }

    /// Number of distinct indexed values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
