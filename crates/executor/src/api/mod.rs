//! High-level typed wrapper for the Executor.
//!
//! The [`Warehaus`] struct provides a convenient Rust API that wraps the
//! [`Executor`] and [`Command`]/[`Output`] types with typed method calls.
//!
//! Unlike the command boundary, helpers here return `Err` for every failed
//! request instead of an error response, so they compose with `?`.
//!
//! # Example
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
//!     "type_key": "builtin-server",
//!     "slug": "servers",
//! }))?;
//! wh.invoke(&admin, Verb::Post, "lab1/~/servers/", json!({"display_name": "Node 01"}))?;
//! ```

mod labs;
mod tree;

use std::sync::Arc;

use tracing::info;
use warehaus_core::{DocumentStore, Error, Result};
use warehaus_engine::{AuthContext, Database, EventSink, NullSink};
use warehaus_storage::MemoryStore;

use crate::{Command, Executor, Output, WarehausConfig};

/// High-level typed wrapper for object tree operations.
///
/// `Warehaus` is cheap to clone; clones share the same database.
#[derive(Debug, Clone)]
pub struct Warehaus {
    executor: Executor,
}

impl Warehaus {
    /// Open over `store` with `config`.
    ///
    /// Validates the config, the record schemas, and ensures every table
    /// and index before returning.
    pub fn open(store: Arc<dyn DocumentStore>, config: &WarehausConfig) -> Result<Self> {
        Self::open_with_events(store, config, Arc::new(NullSink))
    }

    /// Open over `store`, publishing recorded events to `sink`.
    pub fn open_with_events(
        store: Arc<dyn DocumentStore>,
        config: &WarehausConfig,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self> {
        config.validate()?;
        let db = Database::builder(store)
            .settings(config.settings())
            .events(sink)
            .open()?;
        info!(
            target: "warehaus::executor",
            types = db.registry().len(),
            record_events = config.record_events,
            "Warehaus ready"
        );
        Ok(Self::from_database(Arc::new(db)))
    }

    /// Create an ephemeral in-memory instance.
    ///
    /// Useful for testing. Data lives only as long as the instance.
    pub fn ephemeral() -> Result<Self> {
        Self::open(Arc::new(MemoryStore::new()), &WarehausConfig::default())
    }

    /// Create a new instance from an existing database.
    pub fn from_database(db: Arc<Database>) -> Self {
        Self {
            executor: Executor::new(db),
        }
    }

    /// Get the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Get the underlying database.
    pub fn database(&self) -> &Database {
        self.executor.database()
    }

    /// Run `cmd` with `auth` through the executor.
    fn run(&self, auth: &dyn AuthContext, cmd: Command) -> Result<Output> {
        self.executor.execute(auth, cmd)
    }
}

/// The body of `output`, or an Internal error naming `command`.
fn body_of(output: Output, command: &str) -> Result<serde_json::Value> {
    output.body.ok_or_else(|| Error::Internal {
        reason: format!("Unexpected output for {}", command),
    })
}
