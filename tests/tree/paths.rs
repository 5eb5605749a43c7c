//! Path resolution and dispatch status codes.

use serde_json::{json, Value};
use warehaus::{Anonymous, Status, Verb};

use crate::common::*;

#[test]
fn leading_slash_is_optional() {
    let (wh, _) = stocked();
    let a = call(&wh, &user(), Verb::Get, "/lab1/~/shelves/", Value::Null);
    let b = call(&wh, &user(), Verb::Get, "lab1/~/shelves/", Value::Null);
    assert_eq!(a.status, Status::Ok);
    assert_eq!(a, b);
}

#[test]
fn tilde_walks_to_the_type_object() {
    let (wh, _) = stocked();
    let lab = expect(&wh, &user(), Verb::Get, "lab1/", Value::Null, Status::Ok);
    let labtype = expect(&wh, &user(), Verb::Get, "lab1/~/", Value::Null, Status::Ok);
    assert_eq!(labtype["id"], lab["type_id"]);
    assert_eq!(labtype["type_key"], json!("builtin-lab"));

    let children = expect(&wh, &user(), Verb::Get, "lab1/~/children", Value::Null, Status::Ok);
    let mut slugs: Vec<String> = children["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["slug"].as_str().unwrap().to_string())
        .collect();
    slugs.sort();
    assert_eq!(slugs, vec!["servers", "shelves"]);
}

#[test]
fn tilde_on_a_type_object_is_not_found() {
    let (wh, _) = stocked();
    let out = call(&wh, &user(), Verb::Get, "lab1/~/~/", Value::Null);
    assert_eq!(out.status, Status::NotFound);
    let out = call(&wh, &user(), Verb::Get, "~/", Value::Null);
    assert_eq!(out.status, Status::NotFound);
}

#[test]
fn missing_segments_are_not_found() {
    let (wh, _) = stocked();
    for path in ["", "lab1", "nolab/", "lab1/nothing/", "lab1/~/nothing/"] {
        let out = call(&wh, &user(), Verb::Get, path, Value::Null);
        assert_eq!(out.status, Status::NotFound, "path {:?}", path);
    }
}

#[test]
fn unknown_action_vs_wrong_verb() {
    let (wh, _) = stocked();
    // `types` exists on the lab type-object, but only for POST
    let out = call(&wh, &admin(), Verb::Get, "lab1/~/types", Value::Null);
    assert_eq!(out.status, Status::MethodNotAllowed);
    assert_eq!(out.status.code(), 405);

    let out = call(&wh, &admin(), Verb::Get, "lab1/~/bogus", Value::Null);
    assert_eq!(out.status, Status::NotFound);
    assert_eq!(
        out.body.unwrap()["message"],
        json!("not found: No such action 'bogus'")
    );

    // type actions are not object actions
    let out = call(&wh, &admin(), Verb::Post, "lab1/types", Value::Null);
    assert_eq!(out.status, Status::NotFound);
}

#[test]
fn anonymous_callers_are_unauthorized() {
    let (wh, _) = stocked();
    let out = wh.executor().respond(
        &Anonymous,
        warehaus::Command::Invoke {
            verb: Verb::Get,
            path: "lab1/".into(),
            body: Value::Null,
        },
    );
    assert_eq!(out.status, Status::Unauthorized);
}

#[test]
fn unreachable_slugs_are_rejected() {
    let (wh, _) = stocked();
    for slug in ["~", "a/b"] {
        let out = call(
            &wh,
            &user(),
            Verb::Post,
            "lab1/~/servers/",
            json!({"display_name": "X", "slug": slug}),
        );
        assert_eq!(out.status, Status::BadRequest, "slug {:?}", slug);

        let out = call(
            &wh,
            &admin(),
            Verb::Post,
            "lab1/~/types",
            json!({"type_key": "builtin-generic-object", "slug": slug}),
        );
        assert_eq!(out.status, Status::BadRequest, "slug {:?}", slug);
    }

    let listed = expect(&wh, &user(), Verb::Get, "lab1/~/servers/objects", Value::Null, Status::Ok);
    assert_eq!(listed, json!({"objects": []}));
    assert!(wh.create_lab(&admin(), "~", "Tilde").is_err());
    assert_eq!(wh.list_labs(&admin()).unwrap().len(), 1);
}
