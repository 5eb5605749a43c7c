//! Lab creation, listing and type-object creation inside a lab.

use serde_json::{json, Value};
use warehaus::{Command, Status, Verb};

use crate::common::*;

#[test]
fn create_lab_then_get_it_by_path() {
    let (wh, sink) = open();
    let out = wh.executor().respond(
        &admin(),
        Command::CreateLab {
            slug: "lab1".into(),
            display_name: "Lab One".into(),
        },
    );
    assert_eq!(out.status, Status::Created);
    let lab = out.body.unwrap();

    let got = expect(&wh, &user(), Verb::Get, "lab1/", Value::Null, Status::Ok);
    assert_eq!(got, lab);
    assert_eq!(got["attrs"], json!({}));
    assert_eq!(sink.titles(), vec!["Created the **Lab One** lab".to_string()]);
}

#[test]
fn duplicate_lab_slug_is_conflict() {
    let (wh, _) = open();
    wh.create_lab(&admin(), "lab1", "Lab One").unwrap();
    let out = wh.executor().respond(
        &admin(),
        Command::CreateLab {
            slug: "lab1".into(),
            display_name: "Other".into(),
        },
    );
    assert_eq!(out.status, Status::Conflict);
    assert_eq!(out.status.code(), 409);
    assert_eq!(wh.list_labs(&user()).unwrap().len(), 1);
}

#[test]
fn list_labs_hides_lab_type_objects() {
    let (wh, _) = open();
    wh.create_lab(&admin(), "lab1", "Lab One").unwrap();
    wh.create_lab(&admin(), "lab2", "Lab Two").unwrap();

    let out = wh.executor().respond(&user(), Command::ListLabs);
    assert_eq!(out.status, Status::Ok);
    let labs = out.body.unwrap()["labs"].as_array().unwrap().clone();
    assert_eq!(labs.len(), 2);
    assert!(labs.iter().all(|lab| lab["type_key"].is_null()));
}

#[test]
fn new_type_object_inside_lab() {
    let (wh, sink) = open();
    wh.create_lab(&admin(), "lab1", "Lab One").unwrap();
    let created = expect(
        &wh,
        &admin(),
        Verb::Post,
        "lab1/~/types",
        json!({"type_key": "builtin-generic-object", "slug": "shelf-a"}),
        Status::Created,
    );

    let got = expect(&wh, &user(), Verb::Get, "lab1/~/shelf-a/", Value::Null, Status::Ok);
    assert_eq!(got, created);
    assert_eq!(got["slug"], json!("shelf-a"));
    assert_eq!(got["type_key"], json!("builtin-generic-object"));
    assert_eq!(got["attrs"], json!([]));
    assert!(got["type_id"].is_null());
    assert!(got["created_at"].is_u64());
    assert_eq!(
        sink.titles().last().unwrap(),
        "Created type **Generic Object** in the **Lab One** lab"
    );
}

#[test]
fn type_creation_validates_key_and_role() {
    let (wh, _) = open();
    wh.create_lab(&admin(), "lab1", "Lab One").unwrap();

    let body = json!({"type_key": "builtin-generic-object", "slug": "shelves"});
    let out = call(&wh, &user(), Verb::Post, "lab1/~/types", body);
    assert_eq!(out.status, Status::Forbidden);

    let body = json!({"type_key": "builtin-lab", "slug": "nested"});
    let out = call(&wh, &admin(), Verb::Post, "lab1/~/types", body);
    assert_eq!(out.status, Status::BadRequest);

    let out = call(&wh, &admin(), Verb::Post, "lab1/~/types", json!({"slug": "x"}));
    assert_eq!(out.status, Status::BadRequest);
    assert_eq!(
        out.body.unwrap()["message"],
        json!("bad request: Missing 'type_key' in request body")
    );
}

#[test]
fn generic_object_lifecycle() {
    let (wh, sink) = stocked();
    let shelf = expect(
        &wh,
        &user(),
        Verb::Post,
        "lab1/~/shelves/",
        json!({"display_name": "Shelf A"}),
        Status::Created,
    );
    assert_eq!(shelf["slug"], json!("shelf-a"));
    assert_eq!(sink.titles().last().unwrap(), "Added **Shelf A** to the **Lab One** lab");

    let listed = expect(&wh, &user(), Verb::Get, "lab1/~/shelves/objects", Value::Null, Status::Ok);
    assert_eq!(listed, json!({"objects": [shelf.clone()]}));

    let config = expect(&wh, &user(), Verb::Get, "lab1/shelf-a/config.json", Value::Null, Status::Ok);
    assert_eq!(config["id"], shelf["id"]);
    assert_eq!(config["user_attrs"], json!([]));
}

#[test]
fn type_classes_are_listed() {
    let (wh, _) = open();
    let out = wh.executor().respond(&user(), Command::ListTypeClasses);
    let types = out.body.unwrap()["types"].clone();
    assert_eq!(types[1]["type_key"], json!("builtin-lab"));
    assert_eq!(types[1]["user_controllable"], json!(false));
    assert_eq!(types[2]["type_key"], json!("builtin-server"));
    assert_eq!(types[2]["user_controllable"], json!(true));
}
