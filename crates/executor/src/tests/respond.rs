//! Error folding at the command boundary.

use serde_json::json;

use super::{admin, user, with_lab};
use crate::{Anonymous, Command, Status, Value, Verb};

fn get(path: &str) -> Command {
    Command::Invoke {
        verb: Verb::Get,
        path: path.into(),
        body: Value::Null,
    }
}

#[test]
fn test_not_found_message() {
    let wh = with_lab();
    let out = wh.executor().respond(&user(), get("lab1/zz/"));
    assert_eq!(out.status, Status::NotFound);
    assert_eq!(out.status.code(), 404);
    assert_eq!(
        out.body.unwrap()["message"],
        json!("not found: No object 'zz' under 'lab1'")
    );
}

#[test]
fn test_method_not_allowed_vs_not_found() {
    let wh = with_lab();
    let out = wh.executor().respond(
        &admin(),
        Command::Invoke {
            verb: Verb::Put,
            path: "lab1/~/types".into(),
            body: Value::Null,
        },
    );
    assert_eq!(out.status, Status::MethodNotAllowed);

    let out = wh.executor().respond(&admin(), get("lab1/~/nothing-here"));
    assert_eq!(out.status, Status::NotFound);
}

#[test]
fn test_auth_statuses() {
    let wh = with_lab();
    assert_eq!(
        wh.executor().respond(&Anonymous, Command::ListLabs).status,
        Status::Unauthorized
    );
    let out = wh.executor().respond(
        &user(),
        Command::CreateLab {
            slug: "lab2".into(),
            display_name: "Lab Two".into(),
        },
    );
    assert_eq!(out.status, Status::Forbidden);
}

#[test]
fn test_duplicate_lab_is_conflict() {
    let wh = with_lab();
    let out = wh.executor().respond(
        &admin(),
        Command::CreateLab {
            slug: "lab1".into(),
            display_name: "Again".into(),
        },
    );
    assert_eq!(out.status, Status::Conflict);
    assert_eq!(wh.list_labs(&admin()).unwrap().len(), 1);
}

#[test]
fn test_leading_slash_is_accepted() {
    let wh = with_lab();
    let with_slash = wh.executor().respond(&user(), get("/lab1/"));
    let without = wh.executor().respond(&user(), get("lab1/"));
    assert_eq!(with_slash.status, Status::Ok);
    assert_eq!(with_slash, without);
}

#[test]
fn test_success_passes_body_through() {
    let wh = with_lab();
    let out = wh.executor().respond(&user(), get("lab1/"));
    let lab = out.body.unwrap();
    assert_eq!(lab["slug"], json!("lab1"));
    assert_eq!(lab["display_name"], json!("Lab One"));
}
