//! Actions every type class exposes
//!
//! Objects: `GET ""`, `DELETE ""`, `PUT attrs`, `DELETE attrs`.
//! Type-objects: `GET ""`, `GET objects`, `GET children`, `DELETE ""`,
//! `POST attrs`, `PUT attrs`, `DELETE attrs`.
//!
//! Type classes register their own actions after these and may replace any
//! of them.

use serde_json::{json, Value};
use tracing::info;
use warehaus_core::{Error, Result};

use crate::events::NewEvent;
use crate::tree::{children, instances_of, type_object_of, AttrDefinition, Object};

use super::{ActionContext, ActionOutput, ActionTable, Verb};

/// Install the standard object-actions into `table`.
pub fn install_object_actions(table: &mut ActionTable) {
    table
        .register(Verb::Get, "", get_object)
        .register(Verb::Delete, "", delete_object)
        .register(Verb::Put, "attrs", set_attr)
        .register(Verb::Delete, "attrs", delete_attr);
}

/// Install the standard type-actions into `table`.
pub fn install_type_actions(table: &mut ActionTable) {
    table
        .register(Verb::Get, "", get_type)
        .register(Verb::Get, "objects", get_objects_of_type)
        .register(Verb::Get, "children", get_type_children)
        .register(Verb::Delete, "", delete_type)
        .register(Verb::Post, "attrs", add_attribute)
        .register(Verb::Put, "attrs", update_attribute)
        .register(Verb::Delete, "attrs", delete_attribute);
}

fn list(records: impl Iterator<Item = Result<Object>>) -> Result<Vec<Value>> {
    records.map(|r| r.map(|obj| obj.as_value())).collect()
}

/// The object as stored
pub fn get_object(ctx: &ActionContext<'_>, obj: Object) -> Result<ActionOutput> {
    ctx.require_user()?;
    Ok(ActionOutput::ok(obj.as_value()))
}

/// The type-object as stored
pub fn get_type(ctx: &ActionContext<'_>, typeobj: Object) -> Result<ActionOutput> {
    ctx.require_user()?;
    Ok(ActionOutput::ok(typeobj.as_value()))
}

/// `{"objects": [...]}`: every instance of the type-object
pub fn get_objects_of_type(ctx: &ActionContext<'_>, typeobj: Object) -> Result<ActionOutput> {
    ctx.require_user()?;
    let id = typeobj.require_id()?;
    let objects = list(instances_of(ctx.store(), &id)?)?;
    Ok(ActionOutput::ok(json!({ "objects": objects })))
}

/// `{"children": [...]}`: every object whose parent is the type-object
pub fn get_type_children(ctx: &ActionContext<'_>, typeobj: Object) -> Result<ActionOutput> {
    ctx.require_user()?;
    let id = typeobj.require_id()?;
    let kids = list(children(ctx.store(), Some(&id))?)?;
    Ok(ActionOutput::ok(json!({ "children": kids })))
}

fn removed(ctx: &ActionContext<'_>, mut obj: Object) -> Result<ActionOutput> {
    let id = obj.require_id()?;
    let name = obj.display_name().or(obj.slug()).unwrap_or_default().to_string();
    let parent = obj.parent_id();
    obj.delete(ctx.store())?;
    info!(target: "warehaus::tree", id = %id, name = %name, "Deleted object");

    let mut event = NewEvent::about(id, format!("Deleted **{}**", name));
    if let Some(parent) = parent {
        event = event.interesting_to(parent);
    }
    ctx.record_event(event)?;
    Ok(ActionOutput::no_content())
}

/// Remove the object; its children stay where they are
pub fn delete_object(ctx: &ActionContext<'_>, obj: Object) -> Result<ActionOutput> {
    ctx.require_user()?;
    removed(ctx, obj)
}

/// Remove the type-object (admin only); instances and children stay
pub fn delete_type(ctx: &ActionContext<'_>, typeobj: Object) -> Result<ActionOutput> {
    ctx.require_admin()?;
    removed(ctx, typeobj)
}

// ----------------------------------------------------------------------------
// Attribute definitions (type-objects)
// ----------------------------------------------------------------------------

/// Append the definition in `{"attr": {...}}`; duplicate slugs conflict
pub fn add_attribute(ctx: &ActionContext<'_>, mut typeobj: Object) -> Result<ActionOutput> {
    ctx.require_admin()?;
    let def = AttrDefinition::from_value(ctx.body_value("attr")?)?;
    let mut attrs = typeobj.attrs()?;
    attrs.define(def)?;
    typeobj.set_attrs(&attrs)?;
    typeobj.save(ctx.store())?;
    Ok(ActionOutput::ok(typeobj.as_value()))
}

/// Replace the definition sharing the slug in `{"attr": {...}}`
pub fn update_attribute(ctx: &ActionContext<'_>, mut typeobj: Object) -> Result<ActionOutput> {
    ctx.require_admin()?;
    let def = AttrDefinition::from_value(ctx.body_value("attr")?)?;
    let mut attrs = typeobj.attrs()?;
    attrs.redefine(def)?;
    typeobj.set_attrs(&attrs)?;
    typeobj.save(ctx.store())?;
    Ok(ActionOutput::ok(typeobj.as_value()))
}

/// Drop the definition named by `{"slug": ...}`, if there is one
pub fn delete_attribute(ctx: &ActionContext<'_>, mut typeobj: Object) -> Result<ActionOutput> {
    ctx.require_admin()?;
    let slug = ctx.body_str("slug")?;
    let mut attrs = typeobj.attrs()?;
    if attrs.undefine(slug)? {
        typeobj.set_attrs(&attrs)?;
        typeobj.save(ctx.store())?;
    }
    Ok(ActionOutput::ok(typeobj.as_value()))
}

// ----------------------------------------------------------------------------
// Attribute values (objects)
// ----------------------------------------------------------------------------

/// Set `{"slug": ..., "value": ...}`; the slug must be defined by the type
pub fn set_attr(ctx: &ActionContext<'_>, mut obj: Object) -> Result<ActionOutput> {
    ctx.require_user()?;
    let slug = ctx.body_str("slug")?;
    let value = ctx.body_value("value")?.clone();
    if !type_object_of(ctx.store(), &obj)?.attrs()?.defines(slug) {
        return Err(Error::bad_request(format!(
            "Attribute '{}' is not defined for objects of this type",
            slug
        )));
    }
    let mut attrs = obj.attrs()?;
    attrs.set_value(slug, value)?;
    obj.set_attrs(&attrs)?;
    obj.save(ctx.store())?;
    Ok(ActionOutput::ok(obj.as_value()))
}

/// Unset the value named by `{"slug": ...}`; unset values are a no-op
pub fn delete_attr(ctx: &ActionContext<'_>, mut obj: Object) -> Result<ActionOutput> {
    ctx.require_user()?;
    let slug = ctx.body_str("slug")?;
    let mut attrs = obj.attrs()?;
    if attrs.unset_value(slug)?.is_some() {
        obj.set_attrs(&attrs)?;
        obj.save(ctx.store())?;
    }
    Ok(ActionOutput::ok(obj.as_value()))
}
