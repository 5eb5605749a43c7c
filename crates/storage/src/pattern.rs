//! Sub-document pattern matching
//!
//! A document matches a pattern when every field of the pattern is present
//! in the document with an equal value. Nested objects in the pattern match
//! recursively as subsets; arrays and scalars compare by plain equality.

use serde_json::Value;
use warehaus_core::Document;

/// True when `doc` contains `pattern` as a sub-document.
pub fn matches(doc: &Document, pattern: &Document) -> bool {
    pattern.iter().all(|(field, expected)| match doc.get(field) {
        Some(actual) => value_matches(actual, expected),
        None => false,
    })
}

fn value_matches(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Object(actual), Value::Object(expected)) => matches(actual, expected),
        _ => actual == expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(v: Value) -> Document {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        assert!(matches(&doc(json!({"a": 1})), &Document::new()));
    }

    #[test]
    fn test_all_fields_must_match() {
        let d = doc(json!({"parent_id": null, "slug": "lab1", "display_name": "Lab"}));
        assert!(matches(&d, &doc(json!({"parent_id": null, "slug": "lab1"}))));
        assert!(!matches(&d, &doc(json!({"parent_id": null, "slug": "lab2"}))));
    }

    #[test]
    fn test_absent_field_never_matches_null() {
        let d = doc(json!({"slug": "x"}));
        assert!(!matches(&d, &doc(json!({"parent_id": null}))));
    }

    #[test]
    fn test_nested_objects_match_as_subsets() {
        let d = doc(json!({"attrs": {"color": "red", "size": 3}}));
        assert!(matches(&d, &doc(json!({"attrs": {"color": "red"}}))));
        assert!(!matches(&d, &doc(json!({"attrs": {"color": "blue"}}))));
    }

    #[test]
    fn test_arrays_compare_exactly() {
        let d = doc(json!({"tags": ["a", "b"]}));
        assert!(matches(&d, &doc(json!({"tags": ["a", "b"]}))));
        assert!(!matches(&d, &doc(json!({"tags": ["a"]}))));
    }
}
