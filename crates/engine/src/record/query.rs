//! Query accessor bound to one record variant's table
//!
//! Sequences are lazy: documents are wrapped into records one at a time as
//! the caller iterates, so a schema violation in a stored document surfaces
//! on the item that carries it.
//!
//! Callers that rely on a uniqueness invariant (slug per parent, one lab per
//! lab type-object) use [`Query::get_one_or_none`] or
//! [`Query::get_exactly_one`], which turn a violated invariant into a loud
//! `Cardinality` error carrying the caller's message instead of silently
//! picking the first match.

use serde_json::Value;
use std::marker::PhantomData;
use tracing::warn;
use warehaus_core::{DocId, Document, DocumentCursor, DocumentStore, Error, Result};

use super::{Model, Record};

/// How to select documents from a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Equality on the primary identifier
    Ids(Vec<Value>),
    /// Equality on a named secondary index
    Index {
        /// Index name
        name: String,
        /// Values to look up
        keys: Vec<Value>,
    },
    /// Sub-document match
    Pattern(Document),
}

impl Selector {
    /// Select by primary identifiers
    pub fn ids<I: IntoIterator<Item = DocId>>(ids: I) -> Self {
        Selector::Ids(ids.into_iter().map(Value::from).collect())
    }

    /// Select by one or more keys of a secondary index
    pub fn index(name: impl Into<String>, keys: Vec<Value>) -> Self {
        Selector::Index {
            name: name.into(),
            keys,
        }
    }

    /// Select documents containing all of the given field values
    pub fn by<'k, I, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'k str, V)>,
        V: Into<Value>,
    {
        Selector::Pattern(
            fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        )
    }
}

/// Lazy sequence of records.
pub struct Records<M: Model> {
    cursor: DocumentCursor,
    model: PhantomData<fn() -> M>,
}

impl<M: Model> Records<M> {
    fn new(cursor: DocumentCursor) -> Self {
        Records {
            cursor,
            model: PhantomData,
        }
    }
}

impl<M: Model> Iterator for Records<M> {
    type Item = Result<Record<M>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next().map(Record::new)
    }
}

/// Per-variant accessor; stateless apart from the store it reads.
pub struct Query<'s, M: Model> {
    store: &'s dyn DocumentStore,
    model: PhantomData<fn() -> M>,
}

impl<'s, M: Model> Query<'s, M> {
    /// Bind a query accessor to `store`
    pub fn new(store: &'s dyn DocumentStore) -> Self {
        Query {
            store,
            model: PhantomData,
        }
    }

    /// The record with identifier `id`, or `None`.
    pub fn get(&self, id: &DocId) -> Result<Option<Record<M>>> {
        self.store
            .get(M::TABLE, id)?
            .map(Record::new)
            .transpose()
    }

    /// Every record of the variant, unordered.
    pub fn all(&self) -> Result<Records<M>> {
        Ok(Records::new(self.store.scan(M::TABLE)?))
    }

    /// Records whose `index` (primary identifier when `None`) equals any key.
    pub fn get_all(&self, keys: &[Value], index: Option<&str>) -> Result<Records<M>> {
        Ok(Records::new(self.store.get_all(M::TABLE, keys, index)?))
    }

    /// Records containing `pattern` as a sub-document.
    pub fn filter(&self, pattern: &Document) -> Result<Records<M>> {
        Ok(Records::new(self.store.filter(M::TABLE, pattern)?))
    }

    /// Records matched by `selector`.
    pub fn select(&self, selector: &Selector) -> Result<Records<M>> {
        match selector {
            Selector::Ids(keys) => self.get_all(keys, None),
            Selector::Index { name, keys } => self.get_all(keys, Some(name)),
            Selector::Pattern(pattern) => self.filter(pattern),
        }
    }

    /// Zero or one match; two or more is a `Cardinality` error carrying `error`.
    pub fn get_one_or_none(&self, selector: &Selector, error: &str) -> Result<Option<Record<M>>> {
        let mut found = self.select(selector)?;
        let first = match found.next() {
            None => return Ok(None),
            Some(record) => record?,
        };
        if found.next().is_some() {
            warn!(target: "warehaus::record", table = M::TABLE, ?selector, "Uniqueness-assumed query matched several records");
            return Err(Error::cardinality(error));
        }
        Ok(Some(first))
    }

    /// Exactly one match; zero or several is a `Cardinality` error carrying `error`.
    pub fn get_exactly_one(&self, selector: &Selector, error: &str) -> Result<Record<M>> {
        self.get_one_or_none(selector, error)?
            .ok_or_else(|| Error::cardinality(error))
    }
}
