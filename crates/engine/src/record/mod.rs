//! Record layer: statically declared schemas over dynamic documents
//!
//! A record variant is a zero-sized type implementing [`Model`]. Its field
//! table is plain data (`&'static [Field]`), checked once at startup by
//! [`Schema::validate`]. A [`Record<M>`] is a document plus that schema:
//!
//! - Construction and bulk updates reject undeclared fields with
//!   `SchemaViolation`, unless the variant is `OPEN`
//! - Single-field access to an undeclared field is `UnknownField`
//! - Every variant implicitly carries `id`, `created_at` and `modified_at`
//! - Declared defaults are filled at construction and again, lazily, when an
//!   unset field is read; once materialized a value only changes by an
//!   explicit write
//!
//! `save` and `delete` hold the store to an exactly-one contract: any other
//! affected-document count is a `StoreConsistency` error and is never
//! retried.

pub mod query;

use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use tracing::{debug, warn};
use warehaus_core::{DocId, Document, DocumentStore, Error, Result, Timestamp};

pub use query::{Query, Records, Selector};

/// Identifier field, assigned by the store on insert.
pub const ID: &str = "id";
/// Creation time, stamped at construction.
pub const CREATED_AT: &str = "created_at";
/// Last modification time, stamped at construction and on every update.
pub const MODIFIED_AT: &str = "modified_at";

/// Default supplier producing the current time.
pub fn now() -> Value {
    Timestamp::now().to_value()
}

/// A named slot in a record schema with an optional default supplier.
#[derive(Clone, Copy)]
pub struct Field {
    name: &'static str,
    default: Option<fn() -> Value>,
}

impl Field {
    /// A field with no default.
    pub const fn new(name: &'static str) -> Self {
        Field { name, default: None }
    }

    /// A field whose omitted value is produced by `default`.
    pub const fn with_default(name: &'static str, default: fn() -> Value) -> Self {
        Field {
            name,
            default: Some(default),
        }
    }

    /// Field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the field has a default supplier
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// A fresh default value, if the field has a supplier
    pub fn default_value(&self) -> Option<Value> {
        self.default.map(|supply| supply())
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("has_default", &self.has_default())
            .finish()
    }
}

/// A secondary index declaration: index `name` over top-level `field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index {
    /// Index name used in queries
    pub name: &'static str,
    /// Indexed field
    pub field: &'static str,
}

/// Fields every record variant carries without declaring them.
pub const IMPLICIT_FIELDS: &[Field] = &[
    Field::new(ID),
    Field::with_default(CREATED_AT, now),
    Field::with_default(MODIFIED_AT, now),
];

/// A record variant: its name, table and field table.
pub trait Model: 'static {
    /// Record type name used in messages
    const NAME: &'static str;
    /// Backing table
    const TABLE: &'static str;
    /// Declared fields, excluding the implicit ones
    const FIELDS: &'static [Field];
    /// Secondary indexes to ensure at startup
    const INDEXES: &'static [Index] = &[];
    /// Whether fields beyond the declared ones are accepted
    const OPEN: bool = false;
}

/// Startup validation of record schemas.
pub struct Schema;

impl Schema {
    /// Check that `M`'s field table is well formed.
    ///
    /// Fails with `Internal` when a name is empty, starts with `_`, repeats,
    /// or redeclares an implicit field, or when an index names an undeclared
    /// field.
    pub fn validate<M: Model>() -> Result<()> {
        let mut seen: Vec<&'static str> = Vec::with_capacity(M::FIELDS.len());
        for field in M::FIELDS {
            let name = field.name();
            if name.is_empty() || name.starts_with('_') {
                return Err(Error::internal(format!(
                    "{} declares invalid field name {:?}",
                    M::NAME,
                    name
                )));
            }
            if IMPLICIT_FIELDS.iter().any(|f| f.name() == name) {
                return Err(Error::internal(format!(
                    "'{}' is created automatically in {} records, don't declare it",
                    name,
                    M::NAME
                )));
            }
            if seen.contains(&name) {
                return Err(Error::internal(format!(
                    "{} declares field '{}' twice",
                    M::NAME,
                    name
                )));
            }
            seen.push(name);
        }
        for index in M::INDEXES {
            if field_def::<M>(index.field).is_none() {
                return Err(Error::internal(format!(
                    "index '{}' of {} covers undeclared field '{}'",
                    index.name,
                    M::NAME,
                    index.field
                )));
            }
        }
        Ok(())
    }

    /// Validate `M` and create its table and indexes in `store`.
    pub fn ensure<M: Model>(store: &dyn DocumentStore) -> Result<()> {
        Self::validate::<M>()?;
        store.ensure_table(M::TABLE)?;
        for index in M::INDEXES {
            store.ensure_index(M::TABLE, index.name, index.field)?;
        }
        debug!(target: "warehaus::record", model = M::NAME, table = M::TABLE, "Ensured model");
        Ok(())
    }
}

fn field_def<M: Model>(name: &str) -> Option<&'static Field> {
    IMPLICIT_FIELDS
        .iter()
        .chain(M::FIELDS.iter())
        .find(|f| f.name() == name)
}

fn field_allowed<M: Model>(name: &str) -> bool {
    field_def::<M>(name).is_some() || (M::OPEN && !name.is_empty() && !name.starts_with('_'))
}

/// A persisted entity of variant `M`.
pub struct Record<M: Model> {
    data: Document,
    model: PhantomData<fn() -> M>,
}

impl<M: Model> Record<M> {
    /// Construct a record from `fields`, filling declared defaults.
    pub fn new(fields: Document) -> Result<Self> {
        Self::check_extraneous(&fields)?;
        let mut data = fields;
        for field in IMPLICIT_FIELDS.iter().chain(M::FIELDS.iter()) {
            if !data.contains_key(field.name()) {
                if let Some(value) = field.default_value() {
                    data.insert(field.name().to_string(), value);
                }
            }
        }
        Ok(Record {
            data,
            model: PhantomData,
        })
    }

    /// Construct a record from `(name, value)` pairs.
    pub fn with_fields<'k, I, V>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'k str, V)>,
        V: Into<Value>,
    {
        Self::new(
            fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        )
    }

    /// Query accessor for this variant's table.
    pub fn query(store: &dyn DocumentStore) -> Query<'_, M> {
        Query::new(store)
    }

    fn check_extraneous(fields: &Document) -> Result<()> {
        if M::OPEN {
            let reserved: Vec<String> = fields
                .keys()
                .filter(|k| !field_allowed::<M>(k))
                .cloned()
                .collect();
            if reserved.is_empty() {
                return Ok(());
            }
            return Err(Error::SchemaViolation {
                record: M::NAME.to_string(),
                fields: reserved,
            });
        }
        let mut extraneous: Vec<String> = fields
            .keys()
            .filter(|k| field_def::<M>(k).is_none())
            .cloned()
            .collect();
        if extraneous.is_empty() {
            Ok(())
        } else {
            extraneous.sort();
            Err(Error::SchemaViolation {
                record: M::NAME.to_string(),
                fields: extraneous,
            })
        }
    }

    fn check_access(name: &str) -> Result<()> {
        if field_allowed::<M>(name) {
            Ok(())
        } else {
            Err(Error::UnknownField {
                record: M::NAME.to_string(),
                field: name.to_string(),
            })
        }
    }

    /// Read a field, materializing its default if it is unset.
    ///
    /// Returns `None` for an unset field without a default.
    pub fn get(&mut self, name: &str) -> Result<Option<&Value>> {
        Self::check_access(name)?;
        if !self.data.contains_key(name) {
            if let Some(value) = field_def::<M>(name).and_then(Field::default_value) {
                self.data.insert(name.to_string(), value);
            }
        }
        Ok(self.data.get(name))
    }

    /// Read a field as stored, without materializing defaults.
    pub fn peek(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Write a field.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        Self::check_access(name)?;
        self.data.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Unset a field, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Result<Option<Value>> {
        Self::check_access(name)?;
        Ok(self.data.remove(name))
    }

    /// Whether the field currently holds a value.
    pub fn contains(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    /// Assign several fields at once, rejecting undeclared ones up front.
    pub fn update(&mut self, fields: Document) -> Result<()> {
        Self::check_extraneous(&fields)?;
        self.data.extend(fields);
        Ok(())
    }

    /// The store-assigned identifier, `None` while detached.
    pub fn id(&self) -> Option<DocId> {
        self.data.get(ID).and_then(DocId::from_value)
    }

    /// The identifier, or `Internal` if the record was never saved.
    pub fn require_id(&self) -> Result<DocId> {
        self.id().ok_or_else(|| {
            Error::internal(format!("{} record has not been saved", M::NAME))
        })
    }

    /// Creation time, when present.
    pub fn created_at(&self) -> Option<Timestamp> {
        self.data.get(CREATED_AT).and_then(Timestamp::from_value)
    }

    /// Last modification time, when present.
    pub fn modified_at(&self) -> Option<Timestamp> {
        self.data.get(MODIFIED_AT).and_then(Timestamp::from_value)
    }

    /// Persist the record.
    ///
    /// With an identifier: stamps `modified_at` and replaces the stored
    /// document, which must be reported replaced or unchanged exactly once.
    /// Without one: inserts, which must report exactly one insertion and one
    /// generated identifier; the identifier becomes part of the record.
    pub fn save(&mut self, store: &dyn DocumentStore) -> Result<()> {
        match self.id() {
            Some(id) => {
                let stamp = now();
                let mut doc = self.data.clone();
                doc.insert(MODIFIED_AT.to_string(), stamp.clone());
                let result = store.replace(M::TABLE, &id, doc)?;
                if result.replaced + result.unchanged != 1 {
                    warn!(target: "warehaus::record", table = M::TABLE, id = %id, ?result, "Update did not touch exactly one document");
                    return Err(Error::store_consistency(format!(
                        "expected 1 replacement or unchanged for {} {}, instead: {:?}",
                        M::NAME,
                        id,
                        result
                    )));
                }
                self.data.insert(MODIFIED_AT.to_string(), stamp);
                debug!(target: "warehaus::record", table = M::TABLE, id = %id, "Updated");
            }
            None => {
                self.data.remove(ID);
                let result = store.insert(M::TABLE, self.data.clone())?;
                if result.inserted != 1 {
                    warn!(target: "warehaus::record", table = M::TABLE, ?result, "Insert did not create exactly one document");
                    return Err(Error::store_consistency(format!(
                        "expected 1 insertion of {}, instead: {:?}",
                        M::NAME,
                        result
                    )));
                }
                let id = match result.generated_keys.as_slice() {
                    [id] => id.clone(),
                    keys => {
                        return Err(Error::store_consistency(format!(
                            "expected 1 generated key for {}, instead: {:?}",
                            M::NAME,
                            keys
                        )))
                    }
                };
                debug!(target: "warehaus::record", table = M::TABLE, id = %id, "Inserted");
                self.data.insert(ID.to_string(), id.to_value());
            }
        }
        Ok(())
    }

    /// Delete the stored document and detach the record.
    ///
    /// Fails when the record has no identifier or the store does not report
    /// exactly one deletion.
    pub fn delete(&mut self, store: &dyn DocumentStore) -> Result<()> {
        let id = self.id().ok_or_else(|| {
            Error::store_consistency(format!(
                "attempt to delete a {} that is not in the database",
                M::NAME
            ))
        })?;
        let result = store.delete(M::TABLE, &id)?;
        if result.deleted != 1 {
            warn!(target: "warehaus::record", table = M::TABLE, id = %id, ?result, "Delete did not remove exactly one document");
            return Err(Error::store_consistency(format!(
                "expected 1 deletion of {} {}, instead: {:?}",
                M::NAME,
                id,
                result
            )));
        }
        debug!(target: "warehaus::record", table = M::TABLE, id = %id, "Deleted");
        self.data.remove(ID);
        Ok(())
    }

    /// Deep, independent copy of the field map.
    pub fn as_document(&self) -> Document {
        self.data.clone()
    }

    /// The field map as a JSON value, for response payloads.
    pub fn as_value(&self) -> Value {
        Value::Object(self.data.clone())
    }

    /// Consume the record, yielding its field map.
    pub fn into_document(self) -> Document {
        self.data
    }
}

impl<M: Model> Clone for Record<M> {
    fn clone(&self) -> Self {
        Record {
            data: self.data.clone(),
            model: PhantomData,
        }
    }
}

impl<M: Model> PartialEq for Record<M> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<M: Model> fmt::Debug for Record<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(M::NAME).field("data", &self.data).finish()
    }
}
