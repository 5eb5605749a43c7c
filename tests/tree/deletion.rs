//! Deletion never cascades.

use serde_json::{json, Value};
use warehaus::{Status, Verb};

use crate::common::*;

#[test]
fn deleting_an_instance() {
    let (wh, sink) = stocked();
    expect(
        &wh,
        &user(),
        Verb::Post,
        "lab1/~/shelves/",
        json!({"display_name": "Shelf A"}),
        Status::Created,
    );

    let out = call(&wh, &user(), Verb::Delete, "lab1/shelf-a/", Value::Null);
    assert_eq!(out.status, Status::NoContent);
    assert_eq!(out.body, None);
    assert_eq!(sink.titles().last().unwrap(), "Deleted **Shelf A**");

    let out = call(&wh, &user(), Verb::Get, "lab1/shelf-a/", Value::Null);
    assert_eq!(out.status, Status::NotFound);
}

#[test]
fn deleting_a_type_leaves_its_instances() {
    let (wh, _) = stocked();
    expect(
        &wh,
        &user(),
        Verb::Post,
        "lab1/~/shelves/",
        json!({"display_name": "Shelf A"}),
        Status::Created,
    );

    let out = call(&wh, &user(), Verb::Delete, "lab1/~/shelves/", Value::Null);
    assert_eq!(out.status, Status::Forbidden);
    let out = call(&wh, &admin(), Verb::Delete, "lab1/~/shelves/", Value::Null);
    assert_eq!(out.status, Status::NoContent);

    // the instance still resolves, but nothing can dispatch on it
    let out = call(&wh, &user(), Verb::Get, "lab1/shelf-a/", Value::Null);
    assert_eq!(out.status, Status::InternalError);
    assert!(out.body.unwrap()["message"]
        .as_str()
        .unwrap()
        .contains("references missing type-object"));
    let out = call(&wh, &user(), Verb::Get, "lab1/shelf-a/~/", Value::Null);
    assert_eq!(out.status, Status::InternalError);
}

#[test]
fn deleting_a_lab_orphans_its_contents() {
    let (wh, _) = stocked();
    expect(
        &wh,
        &user(),
        Verb::Post,
        "lab1/~/shelves/",
        json!({"display_name": "Shelf A"}),
        Status::Created,
    );

    let out = call(&wh, &user(), Verb::Delete, "lab1/", Value::Null);
    assert_eq!(out.status, Status::Forbidden);
    let out = call(&wh, &admin(), Verb::Delete, "lab1/", Value::Null);
    assert_eq!(out.status, Status::NoContent);

    assert!(wh.list_labs(&admin()).unwrap().is_empty());
    let out = call(&wh, &user(), Verb::Get, "lab1/shelf-a/", Value::Null);
    assert_eq!(out.status, Status::NotFound);

    // a new lab with the same slug starts empty
    wh.create_lab(&admin(), "lab1", "Lab One Again").unwrap();
    let out = call(&wh, &user(), Verb::Get, "lab1/shelf-a/", Value::Null);
    assert_eq!(out.status, Status::NotFound);
}
