//! Error types for Warehaus
//!
//! Every failure in the record layer, the object tree and the action
//! dispatcher is one of these variants. Errors are:
//! - **Structured**: each variant carries the slug, path segment, action or
//!   record name needed to diagnose it without server-side logs
//! - **Serializable**: they cross the command boundary as JSON
//! - **Terminal**: nothing in the core retries on any of them
//!
//! # Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Schema | `SchemaViolation`, `UnknownField` |
//! | Lookup | `NotFound`, `MethodNotAllowed` |
//! | Input | `Conflict`, `BadRequest` |
//! | Access | `Unauthorized`, `Forbidden` |
//! | Invariant | `StoreConsistency`, `Cardinality`, `UnknownTypeKey` |
//! | System | `Store`, `Serialization`, `Config`, `Internal` |

use serde::{Deserialize, Serialize};

/// Result type alias for Warehaus operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Warehaus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Schema ====================
    /// Construction or update named fields a closed record type does not declare
    #[error("schema violation: {record} doesn't have the following fields: {}", fields.join(", "))]
    SchemaViolation {
        /// Record type name
        record: String,
        /// The undeclared field names
        fields: Vec<String>,
    },

    /// Accessing an undeclared field on a closed record type (a programming error)
    #[error("unknown field '{field}' on {record}")]
    UnknownField {
        /// Record type name
        record: String,
        /// The field that was accessed
        field: String,
    },

    // ==================== Lookup ====================
    /// No object for a path segment, no action of that name, or an id miss
    #[error("not found: {reason}")]
    NotFound {
        /// What was looked up
        reason: String,
    },

    /// The action exists but not under the requested verb
    #[error("method {verb} not allowed for action '{action}'")]
    MethodNotAllowed {
        /// Action name
        action: String,
        /// The verb that was requested
        verb: String,
    },

    // ==================== Input ====================
    /// Duplicate slug under a parent or duplicate attribute slug
    #[error("conflict: {reason}")]
    Conflict {
        /// Description of the clash
        reason: String,
    },

    /// Malformed request payload
    #[error("bad request: {reason}")]
    BadRequest {
        /// What is wrong with the payload
        reason: String,
    },

    // ==================== Access ====================
    /// No authenticated caller
    #[error("unauthorized: {reason}")]
    Unauthorized {
        /// Why access was refused
        reason: String,
    },

    /// Caller lacks the required role
    #[error("forbidden: {reason}")]
    Forbidden {
        /// Why access was refused
        reason: String,
    },

    // ==================== Invariant ====================
    /// A mutation did not affect exactly one document
    #[error("store consistency error: {reason}")]
    StoreConsistency {
        /// The store's report
        reason: String,
    },

    /// A uniqueness-assumed query returned the wrong number of results
    #[error("cardinality error: {reason}")]
    Cardinality {
        /// The caller-supplied message
        reason: String,
    },

    /// Data references a type class that is not registered
    #[error("no type class registered for type key '{type_key}'")]
    UnknownTypeKey {
        /// The unregistered key
        type_key: String,
    },

    // ==================== System ====================
    /// Backend failure (missing table, unknown index)
    #[error("store error: {reason}")]
    Store {
        /// Backend message
        reason: String,
    },

    /// JSON (de)serialization failure
    #[error("serialization error: {reason}")]
    Serialization {
        /// Underlying message
        reason: String,
    },

    /// Invalid or unreadable configuration
    #[error("config error: {reason}")]
    Config {
        /// Underlying message
        reason: String,
    },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal {
        /// Description
        reason: String,
    },
}

impl Error {
    /// Create a NotFound error
    pub fn not_found(reason: impl Into<String>) -> Self {
        Error::NotFound { reason: reason.into() }
    }

    /// Create a Conflict error
    pub fn conflict(reason: impl Into<String>) -> Self {
        Error::Conflict { reason: reason.into() }
    }

    /// Create a BadRequest error
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Error::BadRequest { reason: reason.into() }
    }

    /// Create a StoreConsistency error
    pub fn store_consistency(reason: impl Into<String>) -> Self {
        Error::StoreConsistency { reason: reason.into() }
    }

    /// Create a Cardinality error
    pub fn cardinality(reason: impl Into<String>) -> Self {
        Error::Cardinality { reason: reason.into() }
    }

    /// Create a Store error
    pub fn store(reason: impl Into<String>) -> Self {
        Error::Store { reason: reason.into() }
    }

    /// Create an Internal error
    pub fn internal(reason: impl Into<String>) -> Self {
        Error::Internal { reason: reason.into() }
    }

    /// True for errors that indicate a broken invariant rather than bad input.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Error::StoreConsistency { .. }
                | Error::Cardinality { .. }
                | Error::UnknownTypeKey { .. }
                | Error::Internal { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization { reason: e.to_string() }
    }
}
