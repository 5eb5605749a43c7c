//! Shared fixtures for unit tests

use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use warehaus_core::{
    DeleteResult, DocId, Document, DocumentCursor, DocumentStore, Error, InsertResult, ReplaceResult,
    Result,
};
use warehaus_storage::MemoryStore;

use crate::auth::{Identity, Role};
use crate::database::Database;
use crate::events::RecordingSink;

pub fn store() -> MemoryStore {
    MemoryStore::new()
}

pub fn ensure_models(store: &dyn DocumentStore) {
    crate::database::ensure_models(store).unwrap();
}

pub fn db() -> Database {
    Database::open(Arc::new(store())).unwrap()
}

pub fn db_with_sink() -> (Database, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let db = Database::builder(Arc::new(store()))
        .events(sink.clone())
        .open()
        .unwrap();
    (db, sink)
}

pub fn admin() -> Identity {
    Identity::new("admin-1", Role::Admin)
}

pub fn user() -> Identity {
    Identity::new("user-1", Role::User)
}

/// A store that accepts every call and affects nothing.
pub struct BrokenStore;

impl DocumentStore for BrokenStore {
    fn ensure_table(&self, _table: &str) -> Result<()> {
        Ok(())
    }

    fn ensure_index(&self, _table: &str, _index: &str, _field: &str) -> Result<()> {
        Ok(())
    }

    fn get(&self, _table: &str, _id: &DocId) -> Result<Option<Document>> {
        Ok(None)
    }

    fn insert(&self, _table: &str, _doc: Document) -> Result<InsertResult> {
        Ok(InsertResult::default())
    }

    fn replace(&self, _table: &str, _id: &DocId, _doc: Document) -> Result<ReplaceResult> {
        Ok(ReplaceResult::default())
    }

    fn delete(&self, _table: &str, _id: &DocId) -> Result<DeleteResult> {
        Ok(DeleteResult::default())
    }

    fn scan(&self, _table: &str) -> Result<DocumentCursor> {
        Ok(Box::new(std::iter::empty()))
    }

    fn get_all(&self, _table: &str, _keys: &[Value], _index: Option<&str>) -> Result<DocumentCursor> {
        Ok(Box::new(std::iter::empty()))
    }

    fn filter(&self, _table: &str, _pattern: &Document) -> Result<DocumentCursor> {
        Ok(Box::new(std::iter::empty()))
    }
}

/// A `MemoryStore` that counts lookups by identifier and by pattern.
pub struct CountingStore {
    inner: MemoryStore,
    gets: AtomicUsize,
    filters: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: MemoryStore) -> Self {
        CountingStore {
            inner,
            gets: AtomicUsize::new(0),
            filters: AtomicUsize::new(0),
        }
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn filters(&self) -> usize {
        self.filters.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.gets.store(0, Ordering::SeqCst);
        self.filters.store(0, Ordering::SeqCst);
    }
}

impl DocumentStore for CountingStore {
    fn ensure_table(&self, table: &str) -> Result<()> {
        self.inner.ensure_table(table)
    }

    fn ensure_index(&self, table: &str, index: &str, field: &str) -> Result<()> {
        self.inner.ensure_index(table, index, field)
    }

    fn get(&self, table: &str, id: &DocId) -> Result<Option<Document>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(table, id)
    }

    fn insert(&self, table: &str, doc: Document) -> Result<InsertResult> {
        self.inner.insert(table, doc)
    }

    fn replace(&self, table: &str, id: &DocId, doc: Document) -> Result<ReplaceResult> {
        self.inner.replace(table, id, doc)
    }

    fn delete(&self, table: &str, id: &DocId) -> Result<DeleteResult> {
        self.inner.delete(table, id)
    }

    fn scan(&self, table: &str) -> Result<DocumentCursor> {
        self.inner.scan(table)
    }

    fn get_all(&self, table: &str, keys: &[Value], index: Option<&str>) -> Result<DocumentCursor> {
        self.inner.get_all(table, keys, index)
    }

    fn filter(&self, table: &str, pattern: &Document) -> Result<DocumentCursor> {
        self.filters.fetch_add(1, Ordering::SeqCst);
        self.inner.filter(table, pattern)
    }
}

/// A `MemoryStore` whose inserts start failing once an allowance runs out.
pub struct FlakyStore {
    inner: MemoryStore,
    inserts_left: AtomicUsize,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore) -> Self {
        FlakyStore {
            inner,
            inserts_left: AtomicUsize::new(usize::MAX),
        }
    }

    /// Allow `n` more inserts, then fail every one after.
    pub fn fail_inserts_after(&self, n: usize) {
        self.inserts_left.store(n, Ordering::SeqCst);
    }

    pub fn heal(&self) {
        self.inserts_left.store(usize::MAX, Ordering::SeqCst);
    }
}

impl DocumentStore for FlakyStore {
    fn ensure_table(&self, table: &str) -> Result<()> {
        self.inner.ensure_table(table)
    }

    fn ensure_index(&self, table: &str, index: &str, field: &str) -> Result<()> {
        self.inner.ensure_index(table, index, field)
    }

    fn get(&self, table: &str, id: &DocId) -> Result<Option<Document>> {
        self.inner.get(table, id)
    }

    fn insert(&self, table: &str, doc: Document) -> Result<InsertResult> {
        let allowed = self
            .inserts_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if !allowed {
            return Err(Error::store(format!("insert into {} refused", table)));
        }
        self.inner.insert(table, doc)
    }

    fn replace(&self, table: &str, id: &DocId, doc: Document) -> Result<ReplaceResult> {
        self.inner.replace(table, id, doc)
    }

    fn delete(&self, table: &str, id: &DocId) -> Result<DeleteResult> {
        self.inner.delete(table, id)
    }

    fn scan(&self, table: &str) -> Result<DocumentCursor> {
        self.inner.scan(table)
    }

    fn get_all(&self, table: &str, keys: &[Value], index: Option<&str>) -> Result<DocumentCursor> {
        self.inner.get_all(table, keys, index)
    }

    fn filter(&self, table: &str, pattern: &Document) -> Result<DocumentCursor> {
        self.inner.filter(table, pattern)
    }
}
