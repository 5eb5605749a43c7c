//! Object tree engine for Warehaus
//!
//! This crate holds everything between the command boundary and the store:
//! - Record layer: statically declared schemas, save/delete contracts, queries
//! - Object tree: typed nodes, path resolution, `~` type indirection
//! - Actions: per-type-class action tables, registry, dispatch
//! - Attributes: definitions on type-objects, values on objects
//! - Built-in type classes: lab, generic object, server
//! - Events and the auth contract
//!
//! The engine never talks to a concrete store; it only sees
//! `warehaus_core::DocumentStore`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod actions;
pub mod auth;
pub mod builtin;
pub mod database;
pub mod events;
pub mod record;
pub mod tree;

#[cfg(test)]
mod test_support;

pub use actions::{
    dispatch, invoke_path, ActionContext, ActionHandler, ActionOutput, ActionTable, Outcome,
    TypeClass, TypeClassDescriptor, TypeClassInfo, TypeRegistry, Verb,
};
pub use auth::{Anonymous, AuthContext, Identity, Role};
pub use builtin::{create_lab, list_labs};
pub use database::{Database, DatabaseBuilder, Settings};
pub use events::{Event, EventSink, NewEvent, NullSink, RecordingSink};
pub use record::{Field, Index, Model, Query, Record, Schema, Selector};
pub use tree::{resolve, Object, Resolved};
