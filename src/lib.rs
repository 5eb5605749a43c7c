//! Warehaus - inventory of lab hardware as a typed object tree
//!
//! Every piece of equipment is an object in a tree rooted at its lab. Each
//! object is governed by a type-object whose type class decides which
//! actions the object answers and which attributes it may carry.
//!
//! # Quick Start
//!
//! ```ignore
//! use warehaus::{Identity, Role, Verb, Warehaus};
//! use serde_json::json;
//!
//! let wh = Warehaus::ephemeral()?;
//! let admin = Identity::new("admin-1", Role::Admin);
//!
//! wh.create_lab(&admin, "lab1", "Lab One")?;
//! wh.invoke(&admin, Verb::Post, "lab1/~/types", json!({
//!     "type_key": "builtin-server",
//!     "slug": "servers",
//! }))?;
//! let status = wh.invoke(&admin, Verb::Get, "lab1/node01/status", json!(null))?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`] which provides a command-based API.
//! The [`Warehaus`] struct provides a convenient high-level interface.
//!
//! Internal implementation details (record layer, tree, dispatch, storage)
//! are not exposed - only the executor API is public.

// Re-export the public API from warehaus-executor
pub use warehaus_executor::*;
