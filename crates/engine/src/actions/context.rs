//! Per-invocation action context

use serde_json::Value;
use warehaus_core::{DocumentStore, Error, Result};

use crate::auth::AuthContext;
use crate::database::{Database, Settings};
use crate::events::NewEvent;

use super::TypeRegistry;

/// What an action can see: the database, the caller and the request body.
#[derive(Clone, Copy)]
pub struct ActionContext<'a> {
    db: &'a Database,
    auth: &'a dyn AuthContext,
    body: &'a Value,
}

impl<'a> ActionContext<'a> {
    /// Create a context; usually through [`Database::context`]
    pub fn new(db: &'a Database, auth: &'a dyn AuthContext, body: &'a Value) -> Self {
        ActionContext { db, auth, body }
    }

    /// The database
    pub fn db(&self) -> &'a Database {
        self.db
    }

    /// The document store
    pub fn store(&self) -> &'a dyn DocumentStore {
        self.db.store()
    }

    /// The type registry
    pub fn registry(&self) -> &'a TypeRegistry {
        self.db.registry()
    }

    /// Runtime settings
    pub fn settings(&self) -> &'a Settings {
        self.db.settings()
    }

    /// The caller
    pub fn auth(&self) -> &'a dyn AuthContext {
        self.auth
    }

    /// Require a user, bot or admin caller
    pub fn require_user(&self) -> Result<()> {
        self.auth.require_user()
    }

    /// Require an admin caller
    pub fn require_admin(&self) -> Result<()> {
        self.auth.require_admin()
    }

    /// The raw request body (`null` when none was sent)
    pub fn body(&self) -> &'a Value {
        self.body
    }

    /// A required top-level body field.
    pub fn body_value(&self, name: &str) -> Result<&'a Value> {
        self.body
            .get(name)
            .ok_or_else(|| Error::bad_request(format!("Missing '{}' in request body", name)))
    }

    /// A required top-level string body field.
    pub fn body_str(&self, name: &str) -> Result<&'a str> {
        self.body_value(name)?
            .as_str()
            .ok_or_else(|| Error::bad_request(format!("'{}' must be a string", name)))
    }

    /// An optional top-level string body field; `null` counts as absent.
    pub fn body_opt_str(&self, name: &str) -> Result<Option<&'a str>> {
        match self.body.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(Error::bad_request(format!("'{}' must be a string", name))),
        }
    }

    /// Record an activity event on behalf of the caller.
    pub fn record_event(&self, event: NewEvent) -> Result<()> {
        self.db.record_event(self.auth, event)
    }
}
