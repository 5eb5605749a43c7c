//! Shared helpers for the tree suite.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use warehaus::{
    Command, Identity, MemoryStore, Output, RecordingSink, Role, Status, Verb, Warehaus,
    WarehausConfig,
};

pub fn admin() -> Identity {
    Identity::new("admin-1", Role::Admin)
}

pub fn user() -> Identity {
    Identity::new("user-1", Role::User)
}

pub fn bot() -> Identity {
    Identity::new("agent-1", Role::Bot)
}

/// An instance over a fresh `MemoryStore`, with its event sink.
pub fn open() -> (Warehaus, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let wh = Warehaus::open_with_events(
        Arc::new(MemoryStore::new()),
        &WarehausConfig::default(),
        sink.clone(),
    )
    .unwrap();
    (wh, sink)
}

/// Run one request through the command boundary as `who`.
pub fn call(wh: &Warehaus, who: &Identity, verb: Verb, path: &str, body: Value) -> Output {
    wh.executor().respond(
        who,
        Command::Invoke {
            verb,
            path: path.to_string(),
            body,
        },
    )
}

/// Like [`call`], asserting the status and returning the body.
pub fn expect(wh: &Warehaus, who: &Identity, verb: Verb, path: &str, body: Value, status: Status) -> Value {
    let out = call(wh, who, verb, path, body);
    assert_eq!(out.status, status, "{} {}: {:?}", verb, path, out.body);
    out.body.unwrap_or(Value::Null)
}

/// `lab1` with a generic-object type `shelves` and a server type `servers`.
pub fn stocked() -> (Warehaus, Arc<RecordingSink>) {
    let (wh, sink) = open();
    wh.create_lab(&admin(), "lab1", "Lab One").unwrap();
    expect(
        &wh,
        &admin(),
        Verb::Post,
        "lab1/~/types",
        json!({"type_key": "builtin-generic-object", "slug": "shelves", "display_name": "Shelf"}),
        Status::Created,
    );
    expect(
        &wh,
        &admin(),
        Verb::Post,
        "lab1/~/types",
        json!({"type_key": "builtin-server", "slug": "servers"}),
        Status::Created,
    );
    (wh, sink)
}
