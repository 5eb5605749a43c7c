//! Path-addressed actions.

use serde_json::Value;
use warehaus_core::Result;
use warehaus_engine::{AuthContext, Verb};

use super::Warehaus;
use crate::{Command, Output};

impl Warehaus {
    /// Resolve `path` and run its trailing action.
    ///
    /// Paths end in the action name; an empty action addresses the object
    /// itself, so `"lab1/shelf-a/"` is the shelf and `"lab1/shelf-a/attrs"`
    /// its attribute action.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let out = wh.invoke(&user, Verb::Get, "/lab1/node01/status", Value::Null)?;
    /// assert_eq!(out.status, Status::Ok);
    /// ```
    pub fn invoke(&self, auth: &dyn AuthContext, verb: Verb, path: &str, body: Value) -> Result<Output> {
        self.run(
            auth,
            Command::Invoke {
                verb,
                path: path.to_string(),
                body,
            },
        )
    }
}
