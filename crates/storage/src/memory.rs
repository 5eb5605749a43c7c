//! In-process document store
//!
//! # Design
//!
//! - DashMap of tables: table lookup never blocks other tables
//! - One `RwLock` per table: reads share, writes lock only their table
//! - FxHashMap for documents: O(1) lookup by identifier
//! - Secondary indexes are maintained on every write, under the table lock
//!
//! Each call is atomic for the single document it touches. There are no
//! multi-document transactions, so check-then-act sequences built on top of
//! this store (slug uniqueness, for one) can race.
//!
//! Read calls snapshot the matching documents while holding the read lock
//! and hand back an owning cursor, so a caller iterating a result never
//! holds a lock.

use dashmap::DashMap;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use warehaus_core::{
    DeleteResult, DocId, Document, DocumentCursor, DocumentStore, Error, InsertResult,
    ReplaceResult, Result,
};

use crate::index::FieldIndex;
use crate::pattern;

/// Name of the primary identifier field.
const ID_FIELD: &str = "id";

#[derive(Debug, Default)]
struct Table {
    docs: FxHashMap<DocId, Document>,
    indexes: FxHashMap<String, FieldIndex>,
}

impl Table {
    fn index_doc(&mut self, id: &DocId, doc: &Document) {
        for index in self.indexes.values_mut() {
            index.insert(id, doc);
        }
    }

    fn unindex_doc(&mut self, id: &DocId, doc: &Document) {
        for index in self.indexes.values_mut() {
            index.remove(id, doc);
        }
    }
}

/// In-memory implementation of [`DocumentStore`].
///
/// `MemoryStore` is `Send + Sync` and is meant to be shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: DashMap<String, Arc<RwLock<Table>>>,
}

impl MemoryStore {
    /// Create an empty store with no tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all tables, sorted
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.iter().map(|t| t.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of documents in `table`
    pub fn len(&self, table: &str) -> Result<usize> {
        Ok(self.table(table)?.read().docs.len())
    }

    fn table(&self, name: &str) -> Result<Arc<RwLock<Table>>> {
        self.tables
            .get(name)
            .map(|t| Arc::clone(t.value()))
            .ok_or_else(|| Error::store(format!("table '{}' does not exist", name)))
    }

    fn cursor(docs: Vec<Document>) -> DocumentCursor {
        Box::new(docs.into_iter())
    }
}

impl DocumentStore for MemoryStore {
    fn ensure_table(&self, table: &str) -> Result<()> {
        self.tables
            .entry(table.to_string())
            .or_insert_with(|| {
                debug!(target: "warehaus::storage", table, "Created table");
                Arc::new(RwLock::new(Table::default()))
            });
        Ok(())
    }

    fn ensure_index(&self, table: &str, index: &str, field: &str) -> Result<()> {
        let table_ref = self.table(table)?;
        let mut guard = table_ref.write();
        if let Some(existing) = guard.indexes.get(index) {
            if existing.field() != field {
                return Err(Error::store(format!(
                    "index '{}' on '{}' already covers field '{}', not '{}'",
                    index,
                    table,
                    existing.field(),
                    field
                )));
            }
            return Ok(());
        }
        let mut built = FieldIndex::new(field);
        for (id, doc) in &guard.docs {
            built.insert(id, doc);
        }
        guard.indexes.insert(index.to_string(), built);
        debug!(target: "warehaus::storage", table, index, field, "Created index");
        Ok(())
    }

    fn get(&self, table: &str, id: &DocId) -> Result<Option<Document>> {
        Ok(self.table(table)?.read().docs.get(id).cloned())
    }

    fn insert(&self, table: &str, mut doc: Document) -> Result<InsertResult> {
        let table_ref = self.table(table)?;
        let mut guard = table_ref.write();

        let (id, generated) = match doc.get(ID_FIELD).and_then(DocId::from_value) {
            Some(id) => (id, false),
            None => (DocId::new(Uuid::new_v4().to_string()), true),
        };
        if guard.docs.contains_key(&id) {
            return Ok(InsertResult {
                inserted: 0,
                errors: 1,
                generated_keys: Vec::new(),
                first_error: Some(format!("Duplicate primary key `id`: {}", id)),
            });
        }

        doc.insert(ID_FIELD.to_string(), id.to_value());
        guard.index_doc(&id, &doc);
        guard.docs.insert(id.clone(), doc);

        Ok(InsertResult {
            inserted: 1,
            errors: 0,
            generated_keys: if generated { vec![id] } else { Vec::new() },
            first_error: None,
        })
    }

    fn replace(&self, table: &str, id: &DocId, mut doc: Document) -> Result<ReplaceResult> {
        let table_ref = self.table(table)?;
        let mut guard = table_ref.write();

        doc.insert(ID_FIELD.to_string(), id.to_value());
        let old = match guard.docs.get(id) {
            None => {
                return Ok(ReplaceResult {
                    skipped: 1,
                    ..ReplaceResult::default()
                })
            }
            Some(old) if *old == doc => {
                return Ok(ReplaceResult {
                    unchanged: 1,
                    ..ReplaceResult::default()
                })
            }
            Some(old) => old.clone(),
        };

        guard.unindex_doc(id, &old);
        guard.index_doc(id, &doc);
        guard.docs.insert(id.clone(), doc);
        Ok(ReplaceResult {
            replaced: 1,
            ..ReplaceResult::default()
        })
    }

    fn delete(&self, table: &str, id: &DocId) -> Result<DeleteResult> {
        let table_ref = self.table(table)?;
        let mut guard = table_ref.write();
        match guard.docs.remove(id) {
            Some(old) => {
                guard.unindex_doc(id, &old);
                Ok(DeleteResult { deleted: 1, skipped: 0 })
            }
            None => Ok(DeleteResult { deleted: 0, skipped: 1 }),
        }
    }

    fn scan(&self, table: &str) -> Result<DocumentCursor> {
        let table_ref = self.table(table)?;
        let guard = table_ref.read();
        Ok(Self::cursor(guard.docs.values().cloned().collect()))
    }

    fn get_all(&self, table: &str, keys: &[Value], index: Option<&str>) -> Result<DocumentCursor> {
        let table_ref = self.table(table)?;
        let guard = table_ref.read();

        let mut ids: Vec<&DocId> = Vec::new();
        match index {
            None => {
                for key in keys {
                    if let Some((id, _)) = DocId::from_value(key)
                        .and_then(|id| guard.docs.get_key_value(&id))
                    {
                        ids.push(id);
                    }
                }
            }
            Some(name) => {
                let idx = guard.indexes.get(name).ok_or_else(|| {
                    Error::store(format!("index '{}' does not exist on table '{}'", name, table))
                })?;
                for key in keys {
                    ids.extend(idx.lookup(key));
                }
            }
        }

        let mut seen = std::collections::HashSet::new();
        let docs = ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| guard.docs.get(id).cloned())
            .collect();
        Ok(Self::cursor(docs))
    }

    fn filter(&self, table: &str, pattern: &Document) -> Result<DocumentCursor> {
        let table_ref = self.table(table)?;
        let guard = table_ref.read();
        let docs = guard
            .docs
            .values()
            .filter(|doc| pattern::matches(doc, pattern))
            .cloned()
            .collect();
        Ok(Self::cursor(docs))
    }
}
