//! Path resolution
//!
//! A path is `/`-delimited. Every component but the last is a traversal
//! step; the last (possibly empty) is the action name. A step equal to
//! [`TYPE_SEGMENT`] replaces the current node with its type-object instead
//! of descending into a child.
//!
//! ```text
//! lab1/rack-3/~/shelf-a/
//! root -> "lab1" -> "rack-3" -> type of rack-3 -> "shelf-a", action ""
//! ```
//!
//! Each slug step costs one child lookup and each `~` one identifier
//! lookup; nothing else touches the store.

use tracing::debug;
use warehaus_core::{DocumentStore, Error, Result};

use super::{child, type_object_of, Object};

/// Reserved path segment: "the type-object of the current node".
pub const TYPE_SEGMENT: &str = "~";

/// Split `path` into traversal steps and the trailing action name.
///
/// A path without any `/` is `NotFound`.
pub fn object_path_parts(path: &str) -> Result<(Vec<&str>, &str)> {
    let mut parts: Vec<&str> = path.split('/').collect();
    if parts.len() < 2 {
        return Err(Error::not_found(format!(
            "Path '{}' does not name an object and an action",
            path
        )));
    }
    let action = parts.pop().unwrap_or_default();
    Ok((parts, action))
}

/// A resolved path: the target object and the action to run on it.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// Object (or type-object) the path arrived at
    pub object: Object,
    /// Trailing action name
    pub action: String,
}

/// Walk `path` from the root of the tree.
pub fn resolve(store: &dyn DocumentStore, path: &str) -> Result<Resolved> {
    let (steps, action) = object_path_parts(path)?;
    let mut current: Option<Object> = None;
    let mut walked = String::new();

    for step in steps {
        let next = if step == TYPE_SEGMENT {
            match &current {
                Some(obj) => type_object_of(store, obj)?,
                None => {
                    return Err(Error::not_found("The root of the tree has no type"));
                }
            }
        } else {
            let parent = current.as_ref().map(Object::require_id).transpose()?;
            child(store, parent.as_ref(), step)?.ok_or_else(|| {
                Error::not_found(if walked.is_empty() {
                    format!("No object '{}' at the root", step)
                } else {
                    format!("No object '{}' under '{}'", step, walked)
                })
            })?
        };
        if !walked.is_empty() {
            walked.push('/');
        }
        walked.push_str(step);
        current = Some(next);
    }

    let object = current.ok_or_else(|| Error::not_found(format!("Path '{}' is empty", path)))?;
    debug!(target: "warehaus::tree", path, id = ?object.id(), action, "Resolved path");
    Ok(Resolved {
        object,
        action: action.to_string(),
    })
}
