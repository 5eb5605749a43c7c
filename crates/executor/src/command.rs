//! Command enum defining every Warehaus request.
//!
//! Commands are:
//! - **Self-contained**: all parameters needed for execution are in the variant
//! - **Serializable**: they round-trip through JSON for HTTP or SDK front ends
//! - **Pure data**: no closures, no handles

use serde::{Deserialize, Serialize};
use warehaus_core::Value;
use warehaus_engine::Verb;

/// A self-contained, serializable request against the object tree.
///
/// | Command | Result |
/// |---------|--------|
/// | `ListLabs` | `200 {"labs": [...]}` |
/// | `CreateLab` | `201` with the new lab |
/// | `ListTypeClasses` | `200 {"types": [...]}` |
/// | `Invoke` | whatever the addressed action returns |
///
/// # Example
///
/// ```ignore
/// use warehaus_executor::{Command, Verb};
///
/// let cmd = Command::Invoke {
///     verb: Verb::Get,
///     path: "/lab1/~/shelf-a/".into(),
///     body: Value::Null,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Every lab at the root of the tree
    ListLabs,

    /// Create a lab and its type-object (admin)
    CreateLab {
        /// Slug of the lab
        slug: String,
        /// Human-readable name
        display_name: String,
    },

    /// Every registered type class
    ListTypeClasses,

    /// Resolve `path` and run its trailing action with `verb`
    Invoke {
        /// Request verb
        verb: Verb,
        /// Object path with trailing action, e.g. `lab1/node01/heartbeat`
        path: String,
        /// Request body; `null` when there is none
        #[serde(default)]
        body: Value,
    },
}

impl Command {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::ListLabs => "ListLabs",
            Command::CreateLab { .. } => "CreateLab",
            Command::ListTypeClasses => "ListTypeClasses",
            Command::Invoke { .. } => "Invoke",
        }
    }
}
