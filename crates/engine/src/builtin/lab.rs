//! Labs
//!
//! A lab is a root object governed by its own private type-object, which
//! also lives at the root under a random slug so it can never collide with
//! a lab's slug. Everything a lab contains hangs below one of the two: the
//! equipment below the lab, the equipment's type-objects below the lab's
//! type-object.

use tracing::{info, warn};
use uuid::Uuid;
use warehaus_core::{DocumentStore, Error, Result};

use crate::actions::{ActionContext, ActionOutput, ActionTable, TypeClass, Verb};
use crate::auth::AuthContext;
use crate::database::Database;
use crate::events::NewEvent;
use crate::record::Selector;
use crate::tree::{
    children, create_object, create_type_object, ensure_unique_slug, validate_slug, Object,
};

/// Type key of lab type-objects.
pub const LAB_TYPE_KEY: &str = "builtin-lab";

/// Upper bound on type-object nesting when looking for the enclosing lab.
const MAX_TYPE_DEPTH: usize = 64;

/// The lab type class.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lab;

impl TypeClass for Lab {
    fn vendor(&self) -> &'static str {
        "builtin"
    }

    fn name(&self) -> &'static str {
        "lab"
    }

    fn display_name(&self) -> &'static str {
        "Lab"
    }

    fn description(&self) -> &'static str {
        "A place where hardware lives"
    }

    fn register_object_actions(&self, actions: &mut ActionTable) {
        actions.register(Verb::Delete, "", delete_lab);
    }

    fn register_type_actions(&self, actions: &mut ActionTable) {
        actions.register(Verb::Post, "types", create_type);
    }
}

/// All labs, in no particular order.
pub fn list_labs(db: &Database, auth: &dyn AuthContext) -> Result<Vec<Object>> {
    auth.require_user()?;
    let mut labs = Vec::new();
    for obj in children(db.store(), None)? {
        let obj = obj?;
        if !obj.is_type_object() {
            labs.push(obj);
        }
    }
    Ok(labs)
}

/// Create a lab together with its type-object.
///
/// The type-object is stored first; if the lab itself then cannot be
/// stored, the type-object is deleted again.
pub fn create_lab(db: &Database, auth: &dyn AuthContext, slug: &str, display_name: &str) -> Result<Object> {
    auth.require_admin()?;
    let store = db.store();
    validate_slug(slug)?;
    ensure_unique_slug(store, None, slug)?;
    let mut lab_type = create_type_object(
        store,
        None,
        &Uuid::new_v4().to_string(),
        display_name,
        LAB_TYPE_KEY,
    )?;
    let lab = match create_object(store, None, slug, display_name, &lab_type.require_id()?) {
        Ok(lab) => lab,
        Err(err) => {
            if let Err(cleanup) = lab_type.delete(store) {
                warn!(target: "warehaus::tree", slug, error = %cleanup, "Could not remove type-object of a lab that failed to be created");
            }
            return Err(err);
        }
    };
    let lab_id = lab.require_id()?;
    info!(target: "warehaus::tree", slug, id = %lab_id, "Created lab");
    db.record_event(
        auth,
        NewEvent::about(lab_id, format!("Created the **{}** lab", display_name)),
    )?;
    Ok(lab)
}

/// The lab enclosing `typeobj`.
///
/// Walks up from `typeobj` to the nearest lab type-object and returns the
/// one lab it governs. Outside any lab: `NotFound`.
pub fn lab_of_type_object(store: &dyn DocumentStore, typeobj: &Object) -> Result<Object> {
    let mut current = typeobj.clone();
    for _ in 0..MAX_TYPE_DEPTH {
        if current.type_key() == Some(LAB_TYPE_KEY) {
            let id = current.require_id()?;
            return Object::query(store).get_exactly_one(
                &Selector::index("type_id", vec![id.to_value()]),
                &format!("Expected exactly one lab of type-object {}", id),
            );
        }
        let parent = current.parent_id().ok_or_else(|| {
            Error::not_found(format!(
                "'{}' is not inside a lab",
                typeobj.slug().unwrap_or_default()
            ))
        })?;
        current = Object::query(store).get(&parent)?.ok_or_else(|| {
            Error::not_found(format!("Parent {} of a type-object no longer exists", parent))
        })?;
    }
    Err(Error::internal(format!(
        "type-object '{}' is nested deeper than {} levels",
        typeobj.slug().unwrap_or_default(),
        MAX_TYPE_DEPTH
    )))
}

/// Delete the lab object; its contents and type-object are left in place
fn delete_lab(ctx: &ActionContext<'_>, mut lab: Object) -> Result<ActionOutput> {
    ctx.require_admin()?;
    let id = lab.require_id()?;
    let name = lab.display_name().unwrap_or_default().to_string();
    lab.delete(ctx.store())?;
    info!(target: "warehaus::tree", id = %id, "Deleted lab");
    ctx.record_event(NewEvent::about(id, format!("Deleted the **{}** lab", name)))?;
    Ok(ActionOutput::no_content())
}

/// `POST types {type_key, slug, display_name?}`: a new type-object in the lab
fn create_type(ctx: &ActionContext<'_>, labtype: Object) -> Result<ActionOutput> {
    ctx.require_admin()?;
    let type_key = ctx.body_str("type_key")?;
    let slug = ctx.body_str("slug")?;
    let display_name = ctx.body_opt_str("display_name")?;

    let class = ctx.registry().get(type_key).map_err(|_| {
        Error::bad_request(format!("Unknown type key '{}'", type_key))
    })?;
    if !class.info().user_controllable {
        return Err(Error::bad_request(format!(
            "Objects of type '{}' cannot be created by users",
            type_key
        )));
    }

    let parent = labtype.require_id()?;
    let lab = lab_of_type_object(ctx.store(), &labtype)?;
    let typeobj = class.create_type_object(ctx.store(), Some(&parent), slug, display_name)?;
    ctx.record_event(
        NewEvent::about(typeobj.require_id()?, format!(
            "Created type **{}** in the **{}** lab",
            typeobj.display_name().unwrap_or(slug),
            lab.display_name().unwrap_or_default()
        ))
        .interesting_to(lab.require_id()?),
    )?;
    Ok(ActionOutput::created(typeobj.as_value()))
}
