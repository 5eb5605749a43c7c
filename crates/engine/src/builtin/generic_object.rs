//! Generic objects: plain equipment with nothing but attributes

use serde_json::{json, Value};
use warehaus_core::Result;

use crate::actions::{ActionContext, ActionOutput, ActionTable, TypeClass, Verb};
use crate::events::NewEvent;
use crate::tree::{create_object, slugify, user_attributes, Object};

use super::lab::lab_of_type_object;

/// The generic-object type class.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericObject;

impl TypeClass for GenericObject {
    fn vendor(&self) -> &'static str {
        "builtin"
    }

    fn name(&self) -> &'static str {
        "generic-object"
    }

    fn display_name(&self) -> &'static str {
        "Generic Object"
    }

    fn description(&self) -> &'static str {
        "Shelves, cables, boxes and anything else without a behaviour of its own"
    }

    fn user_controllable(&self) -> bool {
        true
    }

    fn register_object_actions(&self, actions: &mut ActionTable) {
        actions.register(Verb::Get, "config.json", config_json);
    }

    fn register_type_actions(&self, actions: &mut ActionTable) {
        actions.register(Verb::Post, "", create_generic_object);
    }
}

/// `POST "" {display_name}`: a new instance in the enclosing lab
fn create_generic_object(ctx: &ActionContext<'_>, typeobj: Object) -> Result<ActionOutput> {
    ctx.require_user()?;
    let display_name = ctx.body_str("display_name")?;
    let slug = slugify(display_name)?;
    let lab = lab_of_type_object(ctx.store(), &typeobj)?;
    let lab_id = lab.require_id()?;
    let obj = create_object(ctx.store(), Some(&lab_id), &slug, display_name, &typeobj.require_id()?)?;
    ctx.record_event(
        NewEvent::about(obj.require_id()?, format!(
            "Added **{}** to the **{}** lab",
            display_name,
            lab.display_name().unwrap_or_default()
        ))
        .interesting_to(lab_id),
    )?;
    Ok(ActionOutput::created(obj.as_value()))
}

/// `GET config.json`: identity plus every defined attribute with its value
fn config_json(ctx: &ActionContext<'_>, obj: Object) -> Result<ActionOutput> {
    ctx.require_user()?;
    let user_attrs: Vec<Value> = user_attributes(ctx.store(), &obj)?
        .into_iter()
        .map(|(def, value)| {
            let mut entry = def.to_value();
            if let Value::Object(fields) = &mut entry {
                fields.insert("value".to_string(), value);
            }
            entry
        })
        .collect();
    Ok(ActionOutput::ok(json!({
        "id": obj.peek("id"),
        "type_id": obj.peek("type_id"),
        "slug": obj.slug(),
        "display_name": obj.display_name(),
        "user_attrs": user_attrs,
    })))
}
