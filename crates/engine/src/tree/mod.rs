//! The object tree
//!
//! Labs, servers and everything else are `Object` records linked into a
//! forest by `parent_id`. An object with a null `type_id` is a
//! *type-object*: it carries a `type_key` selecting the type class that
//! governs it, and its `attrs` are attribute definitions. Every other object
//! points at its type-object through `type_id` and stores attribute values.
//!
//! Slugs must be non-empty, may not be `~` and may not contain `/`.
//! Uniqueness of a slug among siblings is checked with a query before the
//! insert; two concurrent creations can both pass that check. A lab whose
//! insert fails removes the type-object stored for it. Deleting a node
//! leaves its children in place.

pub mod attrs;
pub mod path;
pub mod slug;

use serde_json::{json, Value};
use tracing::info;
use warehaus_core::{optional_id_value, DocId, Document, DocumentStore, Error, Result};

use crate::record::{Field, Index, Model, Record, Records, Selector};

pub use attrs::{AttrDefinition, Attrs};
pub use path::{object_path_parts, resolve, Resolved, TYPE_SEGMENT};
pub use slug::{slugify, validate_slug};

/// Object record variant.
///
/// Open: type classes keep their own state (`status`, `hw_info`, ...) on
/// the objects they govern.
pub struct ObjectModel;

impl Model for ObjectModel {
    const NAME: &'static str = "Object";
    const TABLE: &'static str = "objects";
    const FIELDS: &'static [Field] = &[
        Field::new("parent_id"),
        Field::new("slug"),
        Field::new("display_name"),
        Field::new("type_id"),
        Field::new("type_key"),
        Field::new("attrs"),
    ];
    const INDEXES: &'static [Index] = &[
        Index {
            name: "parent_id",
            field: "parent_id",
        },
        Index {
            name: "type_id",
            field: "type_id",
        },
    ];
    const OPEN: bool = true;
}

/// A node of the object tree.
pub type Object = Record<ObjectModel>;

impl Record<ObjectModel> {
    fn str_field(&self, name: &str) -> Option<&str> {
        self.peek(name).and_then(Value::as_str)
    }

    /// Parent identifier; `None` at the root
    pub fn parent_id(&self) -> Option<DocId> {
        self.peek("parent_id").and_then(DocId::from_value)
    }

    /// Path segment
    pub fn slug(&self) -> Option<&str> {
        self.str_field("slug")
    }

    /// Human-readable name
    pub fn display_name(&self) -> Option<&str> {
        self.str_field("display_name")
    }

    /// Governing type-object; `None` for type-objects
    pub fn type_id(&self) -> Option<DocId> {
        self.peek("type_id").and_then(DocId::from_value)
    }

    /// Type class key (type-objects only)
    pub fn type_key(&self) -> Option<&str> {
        self.str_field("type_key")
    }

    /// Whether this is a type-object
    pub fn is_type_object(&self) -> bool {
        self.type_id().is_none()
    }

    /// The interpreted `attrs` field.
    pub fn attrs(&self) -> Result<Attrs> {
        Attrs::from_stored(self.is_type_object(), self.peek("attrs"))
    }

    /// Replace the `attrs` field.
    pub fn set_attrs(&mut self, attrs: &Attrs) -> Result<()> {
        self.set("attrs", attrs.to_value())
    }
}

fn child_pattern(parent: Option<&DocId>, slug: &str) -> Selector {
    let mut pattern = Document::new();
    pattern.insert("parent_id".to_string(), optional_id_value(parent));
    pattern.insert("slug".to_string(), Value::String(slug.to_string()));
    Selector::Pattern(pattern)
}

/// Direct children of `parent` (the root when `None`).
pub fn children(store: &dyn DocumentStore, parent: Option<&DocId>) -> Result<Records<ObjectModel>> {
    Object::query(store).get_all(&[optional_id_value(parent)], Some("parent_id"))
}

/// The child of `parent` with `slug`, if any.
pub fn child(store: &dyn DocumentStore, parent: Option<&DocId>, slug: &str) -> Result<Option<Object>> {
    Object::query(store).get_one_or_none(
        &child_pattern(parent, slug),
        &format!(
            "Found more than one object with slug '{}' under {}",
            slug,
            parent.map_or("the root".to_string(), |p| format!("'{}'", p))
        ),
    )
}

/// Every object governed by the type-object `type_id`.
pub fn instances_of(store: &dyn DocumentStore, type_id: &DocId) -> Result<Records<ObjectModel>> {
    Object::query(store).get_all(&[type_id.to_value()], Some("type_id"))
}

/// The type-object governing `obj`.
///
/// `NotFound` when `obj` is itself a type-object; `Internal` when its
/// `type_id` points nowhere.
pub fn type_object_of(store: &dyn DocumentStore, obj: &Object) -> Result<Object> {
    let type_id = obj.type_id().ok_or_else(|| {
        Error::not_found(format!(
            "'{}' is a type-object and has no type",
            obj.slug().unwrap_or_default()
        ))
    })?;
    Object::query(store).get(&type_id)?.ok_or_else(|| {
        Error::internal(format!(
            "'{}' references missing type-object {}",
            obj.slug().unwrap_or_default(),
            type_id
        ))
    })
}

/// Fail with `Conflict` if `parent` already has a child named `slug`.
pub fn ensure_unique_slug(store: &dyn DocumentStore, parent: Option<&DocId>, slug: &str) -> Result<()> {
    if Object::query(store).select(&child_pattern(parent, slug))?.next().is_some() {
        return Err(Error::conflict(format!(
            "Slug '{}' already in use in {}",
            slug,
            parent.map_or("the root".to_string(), |p| format!("'{}'", p))
        )));
    }
    Ok(())
}

/// Create and persist a type-object governed by `type_key`.
pub fn create_type_object(
    store: &dyn DocumentStore,
    parent: Option<&DocId>,
    slug: &str,
    display_name: &str,
    type_key: &str,
) -> Result<Object> {
    validate_slug(slug)?;
    ensure_unique_slug(store, parent, slug)?;
    let mut obj = Object::with_fields([
        ("type_id", Value::Null),
        ("parent_id", optional_id_value(parent)),
        ("slug", json!(slug)),
        ("type_key", json!(type_key)),
        ("display_name", json!(display_name)),
        ("attrs", json!([])),
    ])?;
    obj.save(store)?;
    info!(target: "warehaus::tree", slug, type_key, id = ?obj.id(), "Created type-object");
    Ok(obj)
}

/// Create and persist an ordinary object of type `type_id`.
pub fn create_object(
    store: &dyn DocumentStore,
    parent: Option<&DocId>,
    slug: &str,
    display_name: &str,
    type_id: &DocId,
) -> Result<Object> {
    validate_slug(slug)?;
    ensure_unique_slug(store, parent, slug)?;
    let mut obj = Object::with_fields([
        ("type_id", type_id.to_value()),
        ("parent_id", optional_id_value(parent)),
        ("slug", json!(slug)),
        ("display_name", json!(display_name)),
        ("attrs", json!({})),
    ])?;
    obj.save(store)?;
    info!(target: "warehaus::tree", slug, type_id = %type_id, id = ?obj.id(), "Created object");
    Ok(obj)
}

/// Each attribute defined by `obj`'s type-object, paired with `obj`'s value
/// for it (`null` when unset).
pub fn user_attributes(store: &dyn DocumentStore, obj: &Object) -> Result<Vec<(AttrDefinition, Value)>> {
    let schema = type_object_of(store, obj)?.attrs()?;
    let values = obj.attrs()?;
    let values = values.values();
    Ok(schema
        .definitions()
        .unwrap_or_default()
        .iter()
        .map(|def| {
            let value = values
                .and_then(|v| v.get(&def.slug))
                .cloned()
                .unwrap_or(Value::Null);
            (def.clone(), value)
        })
        .collect())
}
