//! Type classes and the type registry
//!
//! A type class is a stateless behaviour bundle identified by its
//! `type_key`. At startup each class is turned into a
//! [`TypeClassDescriptor`]: the standard actions first, then the class's own,
//! so a class can replace a standard action by registering the same verb and
//! name. The [`TypeRegistry`] built from the descriptors never changes
//! afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use warehaus_core::{DocId, DocumentStore, Error, Result};

use crate::tree::{create_type_object, Object};

use super::{standard, ActionTable};

/// A behaviour bundle governing one kind of object.
pub trait TypeClass: Send + Sync {
    /// Vendor part of the type key
    fn vendor(&self) -> &'static str;

    /// Name part of the type key
    fn name(&self) -> &'static str;

    /// `vendor-name`
    fn type_key(&self) -> String {
        format!("{}-{}", self.vendor(), self.name())
    }

    /// Human-readable name, also the default display name of new type-objects
    fn display_name(&self) -> &'static str;

    /// One-line description
    fn description(&self) -> &'static str {
        ""
    }

    /// Whether users may create type-objects of this class inside a lab
    fn user_controllable(&self) -> bool {
        false
    }

    /// Register actions on instances
    fn register_object_actions(&self, _actions: &mut ActionTable) {}

    /// Register actions on type-objects
    fn register_type_actions(&self, _actions: &mut ActionTable) {}
}

/// Listing entry for a type class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeClassInfo {
    /// `vendor-name`
    pub type_key: String,
    /// Human-readable name
    pub display_name: String,
    /// One-line description
    pub description: String,
    /// Whether users may create type-objects of this class
    pub user_controllable: bool,
}

/// A registered type class: its listing entry and both action tables.
#[derive(Debug, Clone)]
pub struct TypeClassDescriptor {
    info: TypeClassInfo,
    object_actions: ActionTable,
    type_actions: ActionTable,
}

impl TypeClassDescriptor {
    /// Build the descriptor for `class`
    pub fn new(class: &dyn TypeClass) -> Self {
        let mut object_actions = ActionTable::new();
        standard::install_object_actions(&mut object_actions);
        class.register_object_actions(&mut object_actions);

        let mut type_actions = ActionTable::new();
        standard::install_type_actions(&mut type_actions);
        class.register_type_actions(&mut type_actions);

        TypeClassDescriptor {
            info: TypeClassInfo {
                type_key: class.type_key(),
                display_name: class.display_name().to_string(),
                description: class.description().to_string(),
                user_controllable: class.user_controllable(),
            },
            object_actions,
            type_actions,
        }
    }

    /// Listing entry
    pub fn info(&self) -> &TypeClassInfo {
        &self.info
    }

    /// Type key
    pub fn type_key(&self) -> &str {
        &self.info.type_key
    }

    /// Actions on instances
    pub fn object_actions(&self) -> &ActionTable {
        &self.object_actions
    }

    /// Actions on type-objects
    pub fn type_actions(&self) -> &ActionTable {
        &self.type_actions
    }

    /// Create and persist a type-object of this class under `parent`.
    ///
    /// The display name defaults to the class's.
    pub fn create_type_object(
        &self,
        store: &dyn DocumentStore,
        parent: Option<&DocId>,
        slug: &str,
        display_name: Option<&str>,
    ) -> Result<Object> {
        create_type_object(
            store,
            parent,
            slug,
            display_name.unwrap_or(&self.info.display_name),
            &self.info.type_key,
        )
    }
}

/// Type key → descriptor, read-only after startup.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    classes: BTreeMap<String, TypeClassDescriptor>,
}

impl TypeRegistry {
    /// Builder for a registry
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// Registry of the built-in type classes
    pub fn builtin() -> Result<Self> {
        crate::builtin::registry()
    }

    /// The descriptor for `type_key`.
    ///
    /// An unregistered key means stored data references a type class that
    /// does not exist: `UnknownTypeKey`.
    pub fn get(&self, type_key: &str) -> Result<&TypeClassDescriptor> {
        self.classes.get(type_key).ok_or_else(|| Error::UnknownTypeKey {
            type_key: type_key.to_string(),
        })
    }

    /// Descriptors in type-key order
    pub fn iter(&self) -> impl Iterator<Item = &TypeClassDescriptor> {
        self.classes.values()
    }

    /// Number of registered classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no class is registered
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Collects type classes; duplicate keys are reported by [`build`](Self::build).
#[derive(Default)]
pub struct TypeRegistryBuilder {
    classes: BTreeMap<String, TypeClassDescriptor>,
    duplicates: Vec<String>,
}

impl TypeRegistryBuilder {
    /// Register `class`
    pub fn register(mut self, class: impl TypeClass) -> Self {
        let descriptor = TypeClassDescriptor::new(&class);
        let key = descriptor.type_key().to_string();
        if self.classes.contains_key(&key) {
            self.duplicates.push(key);
        } else {
            debug!(
                target: "warehaus::dispatch",
                type_key = %key,
                object_actions = descriptor.object_actions().len(),
                type_actions = descriptor.type_actions().len(),
                "Registered type class"
            );
            self.classes.insert(key, descriptor);
        }
        self
    }

    /// Finish the registry.
    pub fn build(self) -> Result<TypeRegistry> {
        if !self.duplicates.is_empty() {
            return Err(Error::internal(format!(
                "type key registered twice: {}",
                self.duplicates.join(", ")
            )));
        }
        Ok(TypeRegistry {
            classes: self.classes,
        })
    }
}
