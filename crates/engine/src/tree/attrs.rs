//! User-defined attributes
//!
//! The same `attrs` field means two different things depending on the
//! owner. On a type-object it is the schema: an ordered list of attribute
//! definitions, each `{slug, ...metadata}`. On an ordinary object it is the
//! data: a map from attribute slug to an opaque value. [`Attrs`] is that
//! distinction made explicit.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use warehaus_core::{Document, Error, Result};

/// One attribute definition on a type-object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttrDefinition {
    /// Slug under which instances store the value
    pub slug: String,
    /// Free-form metadata (display name, value type, ...)
    #[serde(flatten)]
    pub meta: Document,
}

impl AttrDefinition {
    /// Parse a definition from a request payload.
    ///
    /// The payload must be an object with a string `slug`.
    pub fn from_value(value: &Value) -> Result<Self> {
        let fields = value
            .as_object()
            .ok_or_else(|| Error::bad_request("Attribute must be an object"))?;
        match fields.get("slug") {
            Some(Value::String(slug)) if !slug.is_empty() => {}
            _ => return Err(Error::bad_request("Attribute must have a \"slug\" property")),
        }
        Ok(serde_json::from_value(value.clone())?)
    }

    /// The definition as stored
    pub fn to_value(&self) -> Value {
        let mut fields = self.meta.clone();
        fields.insert("slug".to_string(), Value::String(self.slug.clone()));
        Value::Object(fields)
    }
}

/// The `attrs` field of an object, interpreted by owner kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Attrs {
    /// Type-object: ordered attribute schema
    Definitions(Vec<AttrDefinition>),
    /// Ordinary object: attribute values by slug
    Values(Document),
}

impl Attrs {
    /// Interpret a stored `attrs` value.
    ///
    /// A missing or null value reads as empty.
    pub fn from_stored(type_object: bool, stored: Option<&Value>) -> Result<Self> {
        match (type_object, stored) {
            (true, None | Some(Value::Null)) => Ok(Attrs::Definitions(Vec::new())),
            (false, None | Some(Value::Null)) => Ok(Attrs::Values(Document::new())),
            (true, Some(Value::Array(items))) => Ok(Attrs::Definitions(
                items
                    .iter()
                    .map(|item| serde_json::from_value(item.clone()))
                    .collect::<std::result::Result<_, _>>()?,
            )),
            (false, Some(Value::Object(values))) => Ok(Attrs::Values(values.clone())),
            (true, Some(other)) => Err(Error::internal(format!(
                "attrs of a type-object must be a list, found {}",
                other
            ))),
            (false, Some(other)) => Err(Error::internal(format!(
                "attrs of an object must be a map, found {}",
                other
            ))),
        }
    }

    /// The value to store
    pub fn to_value(&self) -> Value {
        match self {
            Attrs::Definitions(defs) => {
                Value::Array(defs.iter().map(AttrDefinition::to_value).collect())
            }
            Attrs::Values(values) => Value::Object(values.clone()),
        }
    }

    /// Definitions, when this is a schema
    pub fn definitions(&self) -> Option<&[AttrDefinition]> {
        match self {
            Attrs::Definitions(defs) => Some(defs),
            Attrs::Values(_) => None,
        }
    }

    /// Values, when this is data
    pub fn values(&self) -> Option<&Document> {
        match self {
            Attrs::Values(values) => Some(values),
            Attrs::Definitions(_) => None,
        }
    }

    /// Whether a definition with `slug` exists.
    pub fn defines(&self, slug: &str) -> bool {
        self.definitions()
            .is_some_and(|defs| defs.iter().any(|d| d.slug == slug))
    }

    fn definitions_mut(&mut self) -> Result<&mut Vec<AttrDefinition>> {
        match self {
            Attrs::Definitions(defs) => Ok(defs),
            Attrs::Values(_) => Err(Error::internal(
                "attribute definitions only exist on type-objects",
            )),
        }
    }

    fn values_mut(&mut self) -> Result<&mut Document> {
        match self {
            Attrs::Values(values) => Ok(values),
            Attrs::Definitions(_) => Err(Error::internal(
                "attribute values only exist on ordinary objects",
            )),
        }
    }

    /// Append `def`; a slug already defined is a `Conflict`.
    pub fn define(&mut self, def: AttrDefinition) -> Result<()> {
        let defs = self.definitions_mut()?;
        if defs.iter().any(|d| d.slug == def.slug) {
            return Err(Error::conflict(format!(
                "Attribute slug '{}' already exists",
                def.slug
            )));
        }
        defs.push(def);
        Ok(())
    }

    /// Replace the definition sharing `def`'s slug, keeping its position.
    ///
    /// An undefined slug is a `Conflict`.
    pub fn redefine(&mut self, def: AttrDefinition) -> Result<()> {
        let defs = self.definitions_mut()?;
        match defs.iter_mut().find(|d| d.slug == def.slug) {
            Some(slot) => {
                *slot = def;
                Ok(())
            }
            None => Err(Error::conflict(format!("No such attribute '{}'", def.slug))),
        }
    }

    /// Drop the definition for `slug` if present.
    pub fn undefine(&mut self, slug: &str) -> Result<bool> {
        let defs = self.definitions_mut()?;
        let before = defs.len();
        defs.retain(|d| d.slug != slug);
        Ok(defs.len() != before)
    }

    /// Set the value of `slug`.
    pub fn set_value(&mut self, slug: &str, value: Value) -> Result<()> {
        self.values_mut()?.insert(slug.to_string(), value);
        Ok(())
    }

    /// Remove the value of `slug`, returning it if it was set.
    pub fn unset_value(&mut self, slug: &str) -> Result<Option<Value>> {
        Ok(self.values_mut()?.remove(slug))
    }
}
