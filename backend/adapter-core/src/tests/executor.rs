// Unit tests for request descriptors and the recording executor

use crate::error::ExecutorError;
use crate::executor::{RecordingExecutor, RequestDescriptor, RequestExecutor};
use common::HttpStatusCode;
use reqwest::Method;

#[test]
fn given_builder_calls_when_descriptor_built_then_parts_preserved_in_order() {
    let request = RequestDescriptor::post("items")
        .with_payload("{}")
        .with_header("x-a", "1")
        .with_header("x-b", "2")
        .with_query("page", "3");

    assert_eq!(request.method(), &Method::POST);
    assert_eq!(request.endpoint(), "items");
    assert_eq!(request.payload(), Some("{}"));
    assert_eq!(
        request.headers(),
        &[("x-a".to_string(), "1".to_string()), ("x-b".to_string(), "2".to_string())]
    );
    assert_eq!(request.query_value("page"), Some("3"));
    assert_eq!(request.query_value("missing"), None);
}

/// **VALUE**: Verifies the fake records each request and replays bodies FIFO.
///
/// **WHY THIS MATTERS**: Adapter tests assert on what was sent through this fake;
/// a lost or reordered record gives false passes.
#[tokio::test]
async fn given_queued_bodies_when_executed_then_replayed_in_order_and_recorded() {
    let executor = RecordingExecutor::new();
    executor.push_body("first");
    executor.push_body("second");

    let a = executor.execute(RequestDescriptor::get("a")).await.unwrap();
    let b = executor.execute(RequestDescriptor::get("b")).await.unwrap();

    assert_eq!((a.as_str(), b.as_str()), ("first", "second"));
    let endpoints: Vec<_> = executor
        .requests()
        .iter()
        .map(|r| r.endpoint().to_string())
        .collect();
    assert_eq!(endpoints, vec!["a", "b"]);
}

/// **VALUE**: Verifies queued statuses surface as server errors and an empty
/// queue as `Exhausted`.
#[tokio::test]
async fn given_status_reply_and_empty_queue_when_executed_then_errors() {
    let executor = RecordingExecutor::new();
    executor.push_status(503, "down");

    let server = executor.execute(RequestDescriptor::get("a")).await;
    let exhausted = executor.execute(RequestDescriptor::get("b")).await;

    match server {
        Err(ExecutorError::Server { status, body, .. }) => {
            assert_eq!(status, HttpStatusCode(503));
            assert_eq!(body, "down");
        }
        other => panic!("expected server error, got {other:?}"),
    }
    assert!(matches!(exhausted, Err(ExecutorError::Exhausted { .. })));
    assert_eq!(executor.request_count(), 2);
}
