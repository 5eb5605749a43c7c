//! Attribute definitions on type-objects and values on instances.

use serde_json::{json, Value};
use warehaus::{Status, Verb};

use crate::common::*;

fn with_shelf() -> warehaus::Warehaus {
    let (wh, _) = stocked();
    expect(
        &wh,
        &user(),
        Verb::Post,
        "lab1/~/shelves/",
        json!({"display_name": "Shelf A"}),
        Status::Created,
    );
    wh
}

fn define(wh: &warehaus::Warehaus, attr: Value) -> Value {
    expect(wh, &admin(), Verb::Post, "lab1/~/shelves/attrs", json!({ "attr": attr }), Status::Ok)
}

#[test]
fn definitions_keep_order_and_reject_duplicates() {
    let wh = with_shelf();
    define(&wh, json!({"slug": "height", "display_name": "Height"}));
    let typeobj = define(&wh, json!({"slug": "color", "type": "str"}));
    assert_eq!(
        typeobj["attrs"],
        json!([
            {"slug": "height", "display_name": "Height"},
            {"slug": "color", "type": "str"}
        ])
    );

    let out = call(
        &wh,
        &admin(),
        Verb::Post,
        "lab1/~/shelves/attrs",
        json!({"attr": {"slug": "height"}}),
    );
    assert_eq!(out.status, Status::Conflict);
}

#[test]
fn update_replaces_in_place() {
    let wh = with_shelf();
    define(&wh, json!({"slug": "height"}));
    define(&wh, json!({"slug": "color"}));

    let typeobj = expect(
        &wh,
        &admin(),
        Verb::Put,
        "lab1/~/shelves/attrs",
        json!({"attr": {"slug": "height", "display_name": "Height (cm)"}}),
        Status::Ok,
    );
    assert_eq!(
        typeobj["attrs"],
        json!([{"slug": "height", "display_name": "Height (cm)"}, {"slug": "color"}])
    );

    let out = call(
        &wh,
        &admin(),
        Verb::Put,
        "lab1/~/shelves/attrs",
        json!({"attr": {"slug": "weight"}}),
    );
    assert_eq!(out.status, Status::Conflict);
}

#[test]
fn definitions_are_admin_only() {
    let wh = with_shelf();
    let out = call(
        &wh,
        &user(),
        Verb::Post,
        "lab1/~/shelves/attrs",
        json!({"attr": {"slug": "height"}}),
    );
    assert_eq!(out.status, Status::Forbidden);
}

#[test]
fn values_require_a_definition() {
    let wh = with_shelf();
    let out = call(
        &wh,
        &user(),
        Verb::Put,
        "lab1/shelf-a/attrs",
        json!({"slug": "height", "value": 180}),
    );
    assert_eq!(out.status, Status::BadRequest);

    define(&wh, json!({"slug": "height"}));
    let shelf = expect(
        &wh,
        &user(),
        Verb::Put,
        "lab1/shelf-a/attrs",
        json!({"slug": "height", "value": 180}),
        Status::Ok,
    );
    assert_eq!(shelf["attrs"], json!({"height": 180}));

    let out = call(&wh, &user(), Verb::Put, "lab1/shelf-a/attrs", json!({"slug": "height"}));
    assert_eq!(out.status, Status::BadRequest);
}

#[test]
fn values_show_up_in_config_json() {
    let wh = with_shelf();
    define(&wh, json!({"slug": "height"}));
    define(&wh, json!({"slug": "color"}));
    expect(
        &wh,
        &user(),
        Verb::Put,
        "lab1/shelf-a/attrs",
        json!({"slug": "color", "value": "red"}),
        Status::Ok,
    );

    let config = expect(&wh, &user(), Verb::Get, "lab1/shelf-a/config.json", Value::Null, Status::Ok);
    assert_eq!(
        config["user_attrs"],
        json!([
            {"slug": "height", "value": null},
            {"slug": "color", "value": "red"}
        ])
    );
}

#[test]
fn undefining_leaves_instance_values() {
    let wh = with_shelf();
    define(&wh, json!({"slug": "height"}));
    expect(
        &wh,
        &user(),
        Verb::Put,
        "lab1/shelf-a/attrs",
        json!({"slug": "height", "value": 180}),
        Status::Ok,
    );

    let typeobj = expect(
        &wh,
        &admin(),
        Verb::Delete,
        "lab1/~/shelves/attrs",
        json!({"slug": "height"}),
        Status::Ok,
    );
    assert_eq!(typeobj["attrs"], json!([]));

    let shelf = expect(&wh, &user(), Verb::Get, "lab1/shelf-a/", Value::Null, Status::Ok);
    assert_eq!(shelf["attrs"], json!({"height": 180}));

    let shelf = expect(
        &wh,
        &user(),
        Verb::Delete,
        "lab1/shelf-a/attrs",
        json!({"slug": "height"}),
        Status::Ok,
    );
    assert_eq!(shelf["attrs"], json!({}));
}
