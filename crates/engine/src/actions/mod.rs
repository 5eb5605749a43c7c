//! Actions: verb-tagged operations addressed by name
//!
//! Every type class owns two [`ActionTable`]s, one for its instances and
//! one for its type-objects. A table maps an action name to the verbs it
//! answers; lookup distinguishes "no such action" (`NotFound`) from "the
//! action exists but not for this verb" (`MethodNotAllowed`).

pub mod context;
pub mod dispatch;
pub mod registry;
pub mod standard;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use warehaus_core::{Error, Result};

use crate::tree::Object;

pub use context::ActionContext;
pub use dispatch::{dispatch, invoke_object_action, invoke_path, invoke_type_action};
pub use registry::{TypeClass, TypeClassDescriptor, TypeClassInfo, TypeRegistry, TypeRegistryBuilder};

/// HTTP-style request verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    /// Read
    Get,
    /// Create or trigger
    Post,
    /// Replace or set
    Put,
    /// Remove
    Delete,
}

impl Verb {
    /// Uppercase verb name
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Verb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Verb::Get),
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            "DELETE" => Ok(Verb::Delete),
            _ => Err(Error::bad_request(format!("unsupported verb '{}'", s))),
        }
    }
}

/// How an action completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Plain success
    Ok,
    /// Something new was persisted
    Created,
    /// Something was removed; no body
    NoContent,
}

/// Result of a successful action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutput {
    /// Completion kind
    pub outcome: Outcome,
    /// Response payload
    pub body: Option<Value>,
}

impl ActionOutput {
    /// Success with a payload
    pub fn ok(body: Value) -> Self {
        ActionOutput {
            outcome: Outcome::Ok,
            body: Some(body),
        }
    }

    /// Creation with the created entity as payload
    pub fn created(body: Value) -> Self {
        ActionOutput {
            outcome: Outcome::Created,
            body: Some(body),
        }
    }

    /// Removal, no payload
    pub fn no_content() -> Self {
        ActionOutput {
            outcome: Outcome::NoContent,
            body: None,
        }
    }
}

/// An action implementation. Receives the resolved object by value; it is
/// the handler's to mutate and save.
pub type ActionHandler = fn(&ActionContext<'_>, Object) -> Result<ActionOutput>;

/// Action name → verbs → handler.
///
/// Verbs under one name keep registration order; registering an existing
/// `(verb, name)` pair replaces its handler in place.
#[derive(Clone, Default)]
pub struct ActionTable {
    actions: BTreeMap<String, Vec<(Verb, ActionHandler)>>,
}

impl ActionTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `verb` on `name`.
    pub fn register(&mut self, verb: Verb, name: &str, handler: ActionHandler) -> &mut Self {
        let verbs = self.actions.entry(name.to_string()).or_default();
        match verbs.iter_mut().find(|(v, _)| *v == verb) {
            Some(slot) => slot.1 = handler,
            None => verbs.push((verb, handler)),
        }
        self
    }

    /// Find the handler for `(verb, name)`.
    pub fn lookup(&self, verb: Verb, name: &str) -> Result<ActionHandler> {
        let verbs = self.actions.get(name).ok_or_else(|| {
            Error::not_found(format!("No such action '{}'", name))
        })?;
        verbs
            .iter()
            .find(|(v, _)| *v == verb)
            .map(|(_, handler)| *handler)
            .ok_or_else(|| Error::MethodNotAllowed {
                action: name.to_string(),
                verb: verb.to_string(),
            })
    }

    /// Registered `(verb, name)` pairs in name order
    pub fn entries(&self) -> impl Iterator<Item = (Verb, &str)> + '_ {
        self.actions
            .iter()
            .flat_map(|(name, verbs)| verbs.iter().map(move |(v, _)| (*v, name.as_str())))
    }

    /// Number of `(verb, name)` pairs
    pub fn len(&self) -> usize {
        self.actions.values().map(Vec::len).sum()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Debug for ActionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries().map(|(verb, name)| format!("{} {:?}", verb, name)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn first(_: &ActionContext<'_>, _: Object) -> Result<ActionOutput> {
        Ok(ActionOutput::ok(json!(1)))
    }

    fn second(_: &ActionContext<'_>, _: Object) -> Result<ActionOutput> {
        Ok(ActionOutput::ok(json!(2)))
    }

    #[test]
    fn test_verb_parsing() {
        assert_eq!("get".parse::<Verb>().unwrap(), Verb::Get);
        assert_eq!("DELETE".parse::<Verb>().unwrap(), Verb::Delete);
        assert!("PATCH".parse::<Verb>().is_err());
        assert_eq!(serde_json::to_value(Verb::Put).unwrap(), json!("PUT"));
    }

    #[test]
    fn test_lookup_distinguishes_missing_action_from_wrong_verb() {
        let mut table = ActionTable::new();
        table.register(Verb::Get, "status", first);

        assert!(table.lookup(Verb::Get, "status").is_ok());
        assert_eq!(
            table.lookup(Verb::Post, "status").err(),
            Some(Error::MethodNotAllowed {
                action: "status".into(),
                verb: "POST".into()
            })
        );
        assert!(matches!(table.lookup(Verb::Get, "nope"), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_register_replaces_same_verb_and_name() {
        let mut table = ActionTable::new();
        table.register(Verb::Get, "", first).register(Verb::Delete, "", first);
        table.register(Verb::Get, "", second);

        assert_eq!(table.len(), 2);
        let listed: Vec<_> = table.entries().collect();
        assert_eq!(listed, vec![(Verb::Get, ""), (Verb::Delete, "")]);
    }
}
