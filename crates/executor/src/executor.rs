//! The Executor - single entry point to the Warehaus engine.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! appropriate handlers and converts results to outputs.

use std::sync::Arc;

use tracing::{debug, warn};
use warehaus_engine::{AuthContext, Database};

use crate::handlers;
use crate::{Command, Output, Result};

/// The command executor - single entry point to the Warehaus engine.
///
/// The Executor is **stateless**: it holds a shared handle to the database
/// but maintains no state of its own. All state lives in the store.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads.
///
/// # Example
///
/// ```ignore
/// use warehaus_executor::{Command, Executor, Identity, Role, Verb};
///
/// let executor = Executor::new(db);
/// let admin = Identity::new("admin-1", Role::Admin);
///
/// // Single command execution
/// let lab = executor.execute(&admin, Command::CreateLab {
///     slug: "lab1".into(),
///     display_name: "Lab One".into(),
/// })?;
///
/// // Batch execution
/// let results = executor.execute_many(&admin, vec![
///     Command::ListLabs,
///     Command::ListTypeClasses,
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct Executor {
    db: Arc<Database>,
}

impl Executor {
    /// Create a new executor wrapping a database.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// The database commands run against.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error.
    pub fn execute(&self, auth: &dyn AuthContext, cmd: Command) -> Result<Output> {
        match cmd {
            Command::ListLabs => handlers::lab::labs(&self.db, auth),
            Command::CreateLab { slug, display_name } => {
                handlers::lab::new_lab(&self.db, auth, &slug, &display_name)
            }
            Command::ListTypeClasses => handlers::lab::type_classes(&self.db, auth),
            Command::Invoke { verb, path, body } => {
                handlers::tree::invoke(&self.db, auth, verb, &path, &body)
            }
        }
    }

    /// Execute a command and fold any error into an error response.
    ///
    /// Invariant violations are logged at `warn`; every other failure is an
    /// ordinary client error and only logged at `debug`.
    pub fn respond(&self, auth: &dyn AuthContext, cmd: Command) -> Output {
        let name = cmd.name();
        match self.execute(auth, cmd) {
            Ok(output) => output,
            Err(err) => {
                if err.is_invariant_violation() {
                    warn!(target: "warehaus::executor", command = name, error = %err, "Command failed");
                } else {
                    debug!(target: "warehaus::executor", command = name, error = %err, "Command rejected");
                }
                Output::from_error(&err)
            }
        }
    }

    /// Execute multiple commands sequentially.
    ///
    /// Each command runs on its own; a failure does not stop the batch.
    ///
    /// ```ignore
    /// let results = executor.execute_many(&auth, vec![cmd1, cmd2, cmd3]);
    /// // results[0] corresponds to cmd1, etc.
    /// ```
    pub fn execute_many(&self, auth: &dyn AuthContext, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(auth, cmd)).collect()
    }
}
