//! Servers
//!
//! A server reports to the tree itself: an agent on the machine posts a
//! heartbeat carrying host facts (CPU, memory, NICs ...), which are merged
//! into `hw_info`. A server that stays silent for longer than the
//! configured heartbeat timeout is reported stale.

use serde_json::{json, Value};
use tracing::{debug, info};
use warehaus_core::{Document, Error, Result, Timestamp};

use crate::actions::{ActionContext, ActionOutput, ActionTable, TypeClass, Verb};
use crate::events::NewEvent;
use crate::tree::{create_object, slugify, Object};

use super::lab::lab_of_type_object;

/// Fields a heartbeat may not overwrite.
pub const RESERVED_HEARTBEAT_FIELDS: &[&str] = &[
    "id",
    "type_id",
    "type_key",
    "parent_id",
    "slug",
    "status",
    "last_heartbeat",
    "created_at",
    "modified_at",
];

/// Status of a server that has never sent a heartbeat
pub const STATUS_UNKNOWN: &str = "unknown";
/// Status after a successful heartbeat
pub const STATUS_SUCCESS: &str = "success";

/// The server type class.
#[derive(Debug, Clone, Copy, Default)]
pub struct Server;

impl TypeClass for Server {
    fn vendor(&self) -> &'static str {
        "builtin"
    }

    fn name(&self) -> &'static str {
        "server"
    }

    fn display_name(&self) -> &'static str {
        "Server"
    }

    fn description(&self) -> &'static str {
        "A machine that reports its own hardware through heartbeats"
    }

    fn user_controllable(&self) -> bool {
        true
    }

    fn register_object_actions(&self, actions: &mut ActionTable) {
        actions
            .register(Verb::Post, "heartbeat", heartbeat)
            .register(Verb::Get, "status", status);
    }

    fn register_type_actions(&self, actions: &mut ActionTable) {
        actions.register(Verb::Post, "", create_server);
    }
}

/// `POST "" {display_name, slug?}`: a new server in the enclosing lab
fn create_server(ctx: &ActionContext<'_>, typeobj: Object) -> Result<ActionOutput> {
    ctx.require_user()?;
    let display_name = ctx.body_str("display_name")?;
    let slug = match ctx.body_opt_str("slug")? {
        Some(slug) => slug.to_string(),
        None => slugify(display_name)?,
    };
    let lab = lab_of_type_object(ctx.store(), &typeobj)?;
    let lab_id = lab.require_id()?;
    let mut server = create_object(ctx.store(), Some(&lab_id), &slug, display_name, &typeobj.require_id()?)?;
    server.set("status", STATUS_UNKNOWN)?;
    server.save(ctx.store())?;
    info!(target: "warehaus::tree", slug = %slug, "Created server");
    ctx.record_event(
        NewEvent::about(server.require_id()?, format!(
            "Added server **{}** to the **{}** lab",
            display_name,
            lab.display_name().unwrap_or_default()
        ))
        .interesting_to(lab_id),
    )?;
    Ok(ActionOutput::created(server.as_value()))
}

/// `POST heartbeat {..facts}`: merge facts into `hw_info`, mark alive
fn heartbeat(ctx: &ActionContext<'_>, mut server: Object) -> Result<ActionOutput> {
    ctx.require_user()?;
    let facts = ctx
        .body()
        .as_object()
        .ok_or_else(|| Error::bad_request("Heartbeat must be a JSON object"))?;
    let mut reserved: Vec<&str> = facts
        .keys()
        .map(String::as_str)
        .filter(|k| RESERVED_HEARTBEAT_FIELDS.contains(k))
        .collect();
    if !reserved.is_empty() {
        reserved.sort_unstable();
        return Err(Error::bad_request(format!(
            "Heartbeat may not set reserved fields: {}",
            reserved.join(", ")
        )));
    }

    let mut hw_info = match server.peek("hw_info") {
        Some(Value::Object(existing)) => existing.clone(),
        _ => Document::new(),
    };
    hw_info.extend(facts.iter().map(|(k, v)| (k.clone(), v.clone())));
    server.set("hw_info", Value::Object(hw_info))?;
    server.set("last_heartbeat", Timestamp::now().to_value())?;
    server.set("status", STATUS_SUCCESS)?;
    server.save(ctx.store())?;
    debug!(target: "warehaus::tree", id = ?server.id(), facts = facts.len(), "Heartbeat");
    Ok(ActionOutput::ok(server.as_value()))
}

/// Whether a heartbeat at `last` is older than `timeout` at `now`.
fn is_stale(last: Option<Timestamp>, now: Timestamp, timeout: std::time::Duration) -> bool {
    match last {
        None => true,
        Some(last) => now.duration_since(last).is_some_and(|age| age > timeout),
    }
}

/// `GET status`: `{status, last_heartbeat, stale}`
fn status(ctx: &ActionContext<'_>, server: Object) -> Result<ActionOutput> {
    ctx.require_user()?;
    let last = server.peek("last_heartbeat").and_then(Timestamp::from_value);
    let stale = is_stale(last, Timestamp::now(), ctx.settings().heartbeat_timeout);
    Ok(ActionOutput::ok(json!({
        "status": server.peek("status").cloned().unwrap_or_else(|| json!(STATUS_UNKNOWN)),
        "last_heartbeat": last.map(Timestamp::to_value),
        "stale": stale,
    })))
}
