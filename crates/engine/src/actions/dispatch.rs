//! Action dispatch
//!
//! The type class of an object comes from its type-object's `type_key`
//! (for a type-object, its own). Instances are dispatched against the
//! class's object-actions, type-objects against its type-actions.

use tracing::debug;
use warehaus_core::{Error, Result};

use crate::tree::{resolve, type_object_of, Object};

use super::{ActionContext, ActionOutput, TypeClassDescriptor, TypeRegistry, Verb};

fn class_of<'r>(registry: &'r TypeRegistry, typeobj: &Object) -> Result<&'r TypeClassDescriptor> {
    let type_key = typeobj.type_key().ok_or_else(|| Error::UnknownTypeKey {
        type_key: "null".to_string(),
    })?;
    registry.get(type_key)
}

/// Run `verb action` on the ordinary object `obj`.
pub fn invoke_object_action(
    ctx: &ActionContext<'_>,
    obj: Object,
    verb: Verb,
    action: &str,
) -> Result<ActionOutput> {
    let typeobj = type_object_of(ctx.store(), &obj)?;
    let class = class_of(ctx.registry(), &typeobj)?;
    let handler = class.object_actions().lookup(verb, action)?;
    debug!(target: "warehaus::dispatch", type_key = class.type_key(), %verb, action, id = ?obj.id(), "Object action");
    handler(ctx, obj)
}

/// Run `verb action` on the type-object `typeobj`.
pub fn invoke_type_action(
    ctx: &ActionContext<'_>,
    typeobj: Object,
    verb: Verb,
    action: &str,
) -> Result<ActionOutput> {
    let class = class_of(ctx.registry(), &typeobj)?;
    let handler = class.type_actions().lookup(verb, action)?;
    debug!(target: "warehaus::dispatch", type_key = class.type_key(), %verb, action, id = ?typeobj.id(), "Type action");
    handler(ctx, typeobj)
}

/// Run `verb action` on `obj`, as a type-action if it is a type-object.
pub fn dispatch(ctx: &ActionContext<'_>, obj: Object, verb: Verb, action: &str) -> Result<ActionOutput> {
    if obj.is_type_object() {
        invoke_type_action(ctx, obj, verb, action)
    } else {
        invoke_object_action(ctx, obj, verb, action)
    }
}

/// Resolve `path` and dispatch its trailing action.
pub fn invoke_path(ctx: &ActionContext<'_>, verb: Verb, path: &str) -> Result<ActionOutput> {
    let resolved = resolve(ctx.store(), path)?;
    dispatch(ctx, resolved.object, verb, &resolved.action)
}
