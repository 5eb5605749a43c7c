//! Core types and traits for Warehaus
//!
//! This crate defines the foundational types used throughout the system:
//! - DocId: Opaque document identifier assigned by the store
//! - Document: A JSON object, the unit of persistence
//! - Timestamp: Monotonic microsecond timestamps for `created_at`/`modified_at`
//! - Error: Error type hierarchy shared by every layer
//! - Traits: The `DocumentStore` contract and its write-result types

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contract;
pub mod error;
pub mod traits;
pub mod types;

pub use contract::Timestamp;
pub use error::{Error, Result};
pub use traits::{DeleteResult, DocumentCursor, DocumentStore, InsertResult, ReplaceResult};
pub use types::{optional_id_value, DocId, Document};

/// JSON value, the dynamically-typed payload of every document field.
pub use serde_json::Value;
