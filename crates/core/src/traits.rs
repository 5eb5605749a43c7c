//! The document store contract
//!
//! The record layer talks to persistence only through [`DocumentStore`].
//! Every call is synchronous and blocks until the backend answers.
//!
//! Write calls never fail just because they affected the "wrong" number of
//! documents: they report counts, and the record layer decides whether the
//! counts satisfy its exactly-one contract. This keeps the store dumb and
//! the consistency checks in one place.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::types::{DocId, Document};

/// Lazy sequence of documents returned by read calls.
pub type DocumentCursor = Box<dyn Iterator<Item = Document> + Send>;

/// Outcome of an insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertResult {
    /// Number of documents inserted
    pub inserted: u64,
    /// Number of documents rejected
    pub errors: u64,
    /// Identifiers generated for documents that arrived without one
    pub generated_keys: Vec<DocId>,
    /// Message of the first rejection, if any
    pub first_error: Option<String>,
}

/// Outcome of a replace-by-identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceResult {
    /// Documents whose content changed
    pub replaced: u64,
    /// Documents that already held identical content
    pub unchanged: u64,
    /// Identifiers with no document to replace
    pub skipped: u64,
}

/// Outcome of a delete-by-identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    /// Documents removed
    pub deleted: u64,
    /// Identifiers with no document to remove
    pub skipped: u64,
}

/// Storage abstraction for document tables
///
/// Thread safety: All methods must be safe to call concurrently from
/// multiple threads. Consistency is per single document only; there are no
/// multi-document transactions.
pub trait DocumentStore: Send + Sync {
    /// Create `table` if it does not exist yet.
    fn ensure_table(&self, table: &str) -> Result<()>;

    /// Create secondary index `index` over top-level `field` of `table` if it
    /// does not exist yet. Existing documents are indexed immediately.
    fn ensure_index(&self, table: &str, index: &str, field: &str) -> Result<()>;

    /// Fetch one document by identifier.
    fn get(&self, table: &str, id: &DocId) -> Result<Option<Document>>;

    /// Insert one document. A document without an `id` gets a generated one.
    fn insert(&self, table: &str, doc: Document) -> Result<InsertResult>;

    /// Replace the whole document stored under `id`.
    fn replace(&self, table: &str, id: &DocId, doc: Document) -> Result<ReplaceResult>;

    /// Delete the document stored under `id`.
    fn delete(&self, table: &str, id: &DocId) -> Result<DeleteResult>;

    /// Every document in `table`, in no particular order.
    fn scan(&self, table: &str) -> Result<DocumentCursor>;

    /// Documents whose `index` field (primary identifier when `None`) equals
    /// any of `keys`.
    fn get_all(&self, table: &str, keys: &[Value], index: Option<&str>) -> Result<DocumentCursor>;

    /// Documents that contain `pattern` as a sub-document.
    fn filter(&self, table: &str, pattern: &Document) -> Result<DocumentCursor>;
}
