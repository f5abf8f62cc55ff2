// Unit tests for status classification

use crate::adapters::{InvoiceDeserializer, MediaFeed};
use crate::deserializer::{StatusDeserializer, SuccessSentinel};
use serde_json::json;

/// **VALUE**: Verifies a body carrying the success sentinel classifies as success.
///
/// **WHY THIS MATTERS**: Callers branch on `is_success()`; a wrong answer means
/// treating an error page as data.
///
/// **BUG THIS CATCHES**: Would catch comparing the code as a string when the
/// service sends a number (or the reverse).
#[test]
fn given_success_code_when_classified_then_success_and_not_failed() {
    let feed = MediaFeed::new(json!({"meta": {"code": 200}, "data": []}));
    let invoice = InvoiceDeserializer::new(json!({"status": {"code": "OK", "message": "found"}}));

    assert!(feed.is_success());
    assert!(!feed.is_failed());
    assert!(invoice.is_success());
    assert!(!invoice.is_failed());
}

/// **VALUE**: Verifies any other code classifies as failed.
#[test]
fn given_other_code_when_classified_then_failed_and_not_success() {
    let bodies = [
        json!({"meta": {"code": 400}}),
        json!({"meta": {"code": "200"}}),
        json!({"meta": {"code": 500, "error_message": "boom"}}),
    ];

    for body in bodies {
        let feed = MediaFeed::new(body.clone());
        assert!(feed.is_failed(), "should fail for {body}");
        assert_ne!(feed.is_success(), feed.is_failed());
    }
}

/// **VALUE**: Verifies accessors return the nested values unmodified.
///
/// **BUG THIS CATCHES**: Would catch stringifying or trimming the service values.
#[test]
fn given_status_block_when_accessed_then_returns_values_unmodified() {
    let invoice = InvoiceDeserializer::new(json!({
        "status": {"code": "NOT_FOUND", "message": "  no such invoice  "}
    }));

    assert_eq!(invoice.status_code(), Some(&json!("NOT_FOUND")));
    assert_eq!(invoice.status_message(), Some("  no such invoice  "));
}

/// **VALUE**: Verifies a body without a status block is failed and has no code.
///
/// **WHY THIS MATTERS**: Malformed or unexpected bodies must not crash the caller
/// nor be mistaken for success.
///
/// **BUG THIS CATCHES**: Would catch a panic on a missing `meta` key.
#[test]
fn given_missing_status_when_classified_then_failed_without_code() {
    let feed = MediaFeed::new(json!({"data": []}));

    assert!(feed.is_failed());
    assert_eq!(feed.status_code(), None);
    assert_eq!(feed.status_message(), None);
}

#[test]
fn given_sentinels_when_matching_then_compare_by_type() {
    assert!(SuccessSentinel::Code(200).matches(&json!(200)));
    assert!(!SuccessSentinel::Code(200).matches(&json!("200")));
    assert!(SuccessSentinel::Text("OK").matches(&json!("OK")));
    assert!(!SuccessSentinel::Text("OK").matches(&json!("ok")));
}
