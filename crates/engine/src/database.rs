//! Database handle and startup
//!
//! A [`Database`] bundles everything an action needs at run time:
//! - The document store
//! - The type registry (read-only once built)
//! - The event sink notified of recorded events
//! - Runtime settings
//!
//! Opening a database validates every record schema and ensures the tables
//! and indexes they declare. Nothing is cached between requests; each
//! resolution and dispatch reads the store afresh.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use warehaus_core::{DocumentStore, Result, Value};

use crate::actions::{ActionContext, TypeRegistry};
use crate::auth::AuthContext;
use crate::events::{create_event, EventModel, EventSink, NewEvent, NullSink};
use crate::record::Schema;
use crate::tree::ObjectModel;

/// Runtime settings, usually read from the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// A server without a heartbeat for longer than this is stale
    pub heartbeat_timeout: Duration,
    /// Whether activity events are persisted and sent to the sink
    pub record_events: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            heartbeat_timeout: Duration::from_secs(90),
            record_events: true,
        }
    }
}

/// Validate every record schema and ensure its table and indexes.
pub fn ensure_models(store: &dyn DocumentStore) -> Result<()> {
    Schema::ensure::<ObjectModel>(store)?;
    Schema::ensure::<EventModel>(store)?;
    Ok(())
}

/// Store, registry, event sink and settings, ready to serve requests.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use warehaus_engine::Database;
/// use warehaus_storage::MemoryStore;
///
/// let db = Database::builder(Arc::new(MemoryStore::new()))
///     .events(Arc::new(RecordingSink::new()))
///     .open()?;
/// ```
pub struct Database {
    store: Arc<dyn DocumentStore>,
    registry: TypeRegistry,
    events: Arc<dyn EventSink>,
    settings: Settings,
}

impl Database {
    /// Open over `store` with the built-in type classes and default settings.
    pub fn open(store: Arc<dyn DocumentStore>) -> Result<Self> {
        Self::builder(store).open()
    }

    /// Builder for a database over `store`
    pub fn builder(store: Arc<dyn DocumentStore>) -> DatabaseBuilder {
        DatabaseBuilder::new(store)
    }

    /// The document store
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// Shared handle to the document store
    pub fn store_handle(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.store)
    }

    /// The type registry
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// The event sink
    pub fn events(&self) -> &dyn EventSink {
        self.events.as_ref()
    }

    /// Runtime settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Context for running one action on behalf of `auth` with request `body`.
    pub fn context<'a>(&'a self, auth: &'a dyn AuthContext, body: &'a Value) -> ActionContext<'a> {
        ActionContext::new(self, auth, body)
    }

    /// Persist `event` and notify the sink, unless event recording is off.
    pub fn record_event(&self, auth: &dyn AuthContext, event: NewEvent) -> Result<()> {
        if !self.settings.record_events {
            debug!(target: "warehaus::events", title = %event.title, "Event recording disabled");
            return Ok(());
        }
        create_event(self.store(), self.events(), auth, event)?;
        Ok(())
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("registry", &self.registry)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Database Builder
// ============================================================================

/// Builder for [`Database`].
///
/// Defaults: the built-in type registry, a sink that drops notifications,
/// and [`Settings::default`].
pub struct DatabaseBuilder {
    store: Arc<dyn DocumentStore>,
    registry: Option<TypeRegistry>,
    events: Arc<dyn EventSink>,
    settings: Settings,
}

impl DatabaseBuilder {
    /// Create a builder with defaults
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            registry: None,
            events: Arc::new(NullSink),
            settings: Settings::default(),
        }
    }

    /// Use `registry` instead of the built-in one
    pub fn registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Send recorded events to `sink`
    pub fn events(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.events = sink;
        self
    }

    /// Use `settings`
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Ensure models and return the ready database.
    pub fn open(self) -> Result<Database> {
        let registry = match self.registry {
            Some(registry) => registry,
            None => TypeRegistry::builtin()?,
        };
        ensure_models(self.store.as_ref())?;
        info!(
            target: "warehaus::engine",
            type_classes = registry.len(),
            heartbeat_timeout_secs = self.settings.heartbeat_timeout.as_secs(),
            record_events = self.settings.record_events,
            "Opened database"
        );
        Ok(Database {
            store: self.store,
            registry,
            events: self.events,
            settings: self.settings,
        })
    }
}
