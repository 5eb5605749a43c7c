//! # Warehaus Executor
//!
//! The public API for Warehaus - an inventory tree for labs and their
//! hardware.
//!
//! This is the only crate users need to import. It provides:
//! - [`Warehaus`] - The typed interface over the object tree
//! - [`Command`]/[`Output`] - The command boundary (for HTTP front ends and SDKs)
//! - [`WarehausConfig`] - Settings loaded from `warehaus.toml`
//!
//! ## Quick Start
//!
//! ```text
//! use warehaus_executor::{Identity, Role, Verb, Warehaus};
//! use serde_json::json;
//!
//! let wh = Warehaus::ephemeral()?;
//! let admin = Identity::new("admin-1", Role::Admin);
//!
//! wh.create_lab(&admin, "lab1", "Lab One")?;
//! wh.invoke(&admin, Verb::Post, "lab1/~/types", json!({
//!     "type_key": "builtin-generic-object",
//!     "slug": "shelves",
//! }))?;
//! let shelf = wh.invoke(&admin, Verb::Post, "lab1/~/shelves/", json!({"display_name": "Shelf A"}))?;
//! ```
//!
//! ## Paths
//!
//! | Path | Addresses |
//! |------|-----------|
//! | `lab1/` | the lab object itself |
//! | `lab1/~/` | the lab's type-object |
//! | `lab1/~/shelves/` | a type-object inside the lab |
//! | `lab1/shelf-a/config.json` | action `config.json` of an instance |
//!
//! The last segment is always the action name; empty means the object.

#![warn(missing_docs)]

mod api;
mod command;
mod config;
mod executor;
mod logging;
mod output;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

// Core types
pub use api::Warehaus;
pub use command::Command;
pub use config::{WarehausConfig, CONFIG_FILE_NAME};
pub use executor::Executor;
pub use logging::init_logging;
pub use output::{Output, Status};

// Re-export core types so users don't need warehaus-core directly
pub use warehaus_core::{Error, Result, Value};

// Re-export the auth contract and event sinks
pub use warehaus_engine::{
    Anonymous, AuthContext, EventSink, Identity, NullSink, RecordingSink, Role, TypeClass,
    TypeClassInfo, TypeRegistry, Verb,
};

// Re-export the in-memory store
pub use warehaus_storage::MemoryStore;
