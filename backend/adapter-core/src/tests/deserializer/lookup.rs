// Unit tests for nested field lookup

use crate::deserializer::lookup;
use serde_json::json;

/// **VALUE**: Verifies nested lookups return exactly the stored value.
///
/// **BUG THIS CATCHES**: Would catch lookups that only descend one level.
#[test]
fn given_nested_object_when_lookup_then_returns_leaf() {
    let raw = json!({"images": {"standard_resolution": {"url": "https://cdn/1.jpg"}}});

    let found = lookup(&raw, &["images", "standard_resolution", "url"]);

    assert_eq!(found, Some(&json!("https://cdn/1.jpg")));
}

/// **VALUE**: Verifies that a missing key anywhere on the path yields `None`.
///
/// **WHY THIS MATTERS**: Third-party responses routinely omit optional blocks.
/// Accessors built on `lookup` must read "absent" instead of panicking.
///
/// **BUG THIS CATCHES**: Would catch indexing (`raw["a"]["b"]`) creeping back in
/// where a missing parent should short-circuit.
#[test]
fn given_missing_segment_when_lookup_then_returns_none() {
    let raw = json!({"images": {}});

    assert_eq!(lookup(&raw, &["images", "standard_resolution", "url"]), None);
    assert_eq!(lookup(&raw, &["caption", "text"]), None);
}

/// **VALUE**: Verifies null leaves and non-object parents read as absent.
#[test]
fn given_null_or_scalar_parent_when_lookup_then_returns_none() {
    let raw = json!({"location": null, "caption": "plain string"});

    assert_eq!(lookup(&raw, &["location"]), None);
    assert_eq!(lookup(&raw, &["caption", "text"]), None);
}

#[test]
fn given_empty_path_when_lookup_then_returns_root() {
    let raw = json!({"a": 1});

    assert_eq!(lookup(&raw, &[]), Some(&raw));
}
