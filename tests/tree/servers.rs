//! Server creation, heartbeats and status.

use std::sync::Arc;

use serde_json::{json, Value};
use warehaus::{MemoryStore, Status, Verb, Warehaus, WarehausConfig, CONFIG_FILE_NAME};

use crate::common::*;

fn with_node(wh: &Warehaus) -> Value {
    expect(
        wh,
        &user(),
        Verb::Post,
        "lab1/~/servers/",
        json!({"display_name": "Node 01", "slug": "node01"}),
        Status::Created,
    )
}

#[test]
fn new_server_reports_unknown() {
    let (wh, _) = stocked();
    let server = with_node(&wh);
    assert_eq!(server["status"], json!("unknown"));

    let status = expect(&wh, &user(), Verb::Get, "lab1/node01/status", Value::Null, Status::Ok);
    assert_eq!(
        status,
        json!({"status": "unknown", "last_heartbeat": null, "stale": true})
    );
}

#[test]
fn heartbeat_marks_server_alive() {
    let (wh, _) = stocked();
    with_node(&wh);

    let server = expect(
        &wh,
        &bot(),
        Verb::Post,
        "lab1/node01/heartbeat",
        json!({"cpu": {"model": "EPYC", "cores": 64}, "nics": ["eth0"]}),
        Status::Ok,
    );
    assert_eq!(server["status"], json!("success"));
    assert_eq!(server["hw_info"]["cpu"]["cores"], json!(64));

    let status = expect(&wh, &bot(), Verb::Get, "lab1/node01/status", Value::Null, Status::Ok);
    assert_eq!(status["status"], json!("success"));
    assert_eq!(status["stale"], json!(false));
    assert_eq!(status["last_heartbeat"], server["last_heartbeat"]);

    // the stored document carries the merged facts too
    let stored = expect(&wh, &user(), Verb::Get, "lab1/node01/", Value::Null, Status::Ok);
    assert_eq!(stored["hw_info"]["nics"], json!(["eth0"]));
}

#[test]
fn heartbeat_rejects_reserved_fields() {
    let (wh, _) = stocked();
    with_node(&wh);
    let out = call(
        &wh,
        &bot(),
        Verb::Post,
        "lab1/node01/heartbeat",
        json!({"type_id": "x", "cpu": {}}),
    );
    assert_eq!(out.status, Status::BadRequest);
    assert_eq!(
        out.body.unwrap()["message"],
        json!("bad request: Heartbeat may not set reserved fields: type_id")
    );
}

#[test]
fn status_is_get_only() {
    let (wh, _) = stocked();
    with_node(&wh);
    let out = call(&wh, &user(), Verb::Post, "lab1/node01/status", Value::Null);
    assert_eq!(out.status, Status::MethodNotAllowed);
    let out = call(&wh, &user(), Verb::Get, "lab1/node01/heartbeat", Value::Null);
    assert_eq!(out.status, Status::MethodNotAllowed);
}

#[test]
fn short_timeout_from_config_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "heartbeat_timeout_secs = 1\n").unwrap();
    let config = WarehausConfig::from_file(&path).unwrap();
    let wh = Warehaus::open(Arc::new(MemoryStore::new()), &config).unwrap();
    assert_eq!(
        wh.database().settings().heartbeat_timeout,
        std::time::Duration::from_secs(1)
    );
}
