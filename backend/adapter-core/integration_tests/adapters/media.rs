use adapter_core::adapters::MediaAdapter;
use adapter_core::deserializer::{FeedDeserializer, StatusDeserializer};
use adapter_core::error::{AdapterError, ExecutorError};
use adapter_core::executor::{HttpExecutor, RecordingExecutor};
use adapter_core::{ServiceConfig, ServicesConfig};
use common::RedactedApiKey;

use std::sync::Arc;

use serde_json::json;
use serial_test::serial;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_ENV: &str = "ADAPTER_TEST_MEDIA_TOKEN";

fn recent_media_body() -> String {
    json!({
        "meta": {"code": 200},
        "data": [
            {"id": "1", "caption": {"text": "Pier"}, "location": {"name": "Brighton"}},
            {"id": "2", "caption": {"text": "Desk"}},
            {"id": "3", "caption": {"text": "Bridge"}, "location": {"name": "Bristol"}}
        ]
    })
    .to_string()
}

fn adapter_with(executor: &Arc<RecordingExecutor>) -> MediaAdapter<Arc<RecordingExecutor>> {
    MediaAdapter::new(Arc::clone(executor), RedactedApiKey::new("token-xyz"))
}

/// **VALUE**: Verifies the headline scenario end to end through the fake
/// executor: three items, the middle one without a location, two returned.
///
/// **WHY THIS MATTERS**: This is what application code calls. It proves the
/// adapter, executor seam and deserializers compose.
///
/// **BUG THIS CATCHES**: Would catch the adapter returning unfiltered items or
/// sending the wrong endpoint / credential.
#[tokio::test]
async fn given_feed_with_unlocated_item_when_recent_media_with_location_then_returns_two() {
    // GIVEN: A fake service answering with three items
    let executor = Arc::new(RecordingExecutor::replying(recent_media_body()));
    let adapter = adapter_with(&executor);

    // WHEN: Asking for located media
    let located = adapter.recent_media_with_location().await.unwrap();

    // THEN: Items 1 and 3, in order, from one GET with the token
    let ids: Vec<_> = located.iter().map(|item| item.id()).collect();
    assert_eq!(ids, vec![Some("1"), Some("3")]);

    let requests = executor.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method().as_str(), "GET");
    assert_eq!(requests[0].endpoint(), "users/self/media/recent");
    assert_eq!(requests[0].query_value("access_token"), Some("token-xyz"));
}

/// **VALUE**: Verifies the recent-media call is memoized per instance and
/// re-issued only after `invalidate`.
///
/// **WHY THIS MATTERS**: Views call this several times per render; without the
/// memo each call would hit the rate-limited API.
///
/// **BUG THIS CATCHES**: Would catch the memo being bypassed, or `invalidate`
/// not clearing it.
#[tokio::test]
async fn given_memoized_feed_when_called_repeatedly_then_one_request_until_invalidated() {
    let executor = Arc::new(RecordingExecutor::new());
    executor.push_body(recent_media_body());
    executor.push_body(json!({"meta": {"code": 200}, "data": []}).to_string());
    let mut adapter = adapter_with(&executor);

    assert_eq!(adapter.recent_media().await.unwrap().items().len(), 3);
    assert_eq!(adapter.recent_media_with_location().await.unwrap().len(), 2);
    assert_eq!(executor.request_count(), 1);

    adapter.invalidate();

    assert!(adapter.recent_media().await.unwrap().items().is_empty());
    assert_eq!(executor.request_count(), 2);
}

/// **VALUE**: Verifies a failed call is not memoized, so the next call retries.
#[tokio::test]
async fn given_transport_failure_when_recent_media_then_error_and_next_call_retries() {
    let executor = Arc::new(RecordingExecutor::new());
    executor.push_status(500, "oops");
    executor.push_body(recent_media_body());
    let adapter = adapter_with(&executor);

    let first = adapter.recent_media().await;
    assert!(matches!(
        first,
        Err(AdapterError::Executor(ExecutorError::Server { .. }))
    ));

    assert!(adapter.recent_media().await.unwrap().is_success());
    assert_eq!(executor.request_count(), 2);
}

/// **VALUE**: Verifies an application-level failure is classified, not raised.
#[tokio::test]
async fn given_error_meta_when_user_media_then_feed_is_failed_with_message() {
    let body = json!({"meta": {"code": 400, "error_message": "you cannot view this resource"}});
    let executor = Arc::new(RecordingExecutor::replying(body.to_string()));
    let adapter = adapter_with(&executor);

    let feed = adapter.user_media("99").await.unwrap();

    assert!(feed.is_failed());
    assert_eq!(feed.status_code(), Some(&json!(400)));
    assert_eq!(feed.status_message(), Some("you cannot view this resource"));
    assert_eq!(executor.requests()[0].endpoint(), "users/99/media/recent");
}

/// **VALUE**: Verifies a user id with path or query syntax stays one encoded
/// path segment under `users/`.
///
/// **WHY THIS MATTERS**: User ids come from callers. Unencoded, `../../admin`
/// climbs out of the API path and `7?x=1#` rewrites the query, both with the
/// access token attached.
///
/// **BUG THIS CATCHES**: Would catch the id being formatted into the endpoint raw.
#[tokio::test]
async fn given_user_id_with_url_syntax_when_user_media_then_id_is_one_encoded_segment() {
    // GIVEN: A fake service answering every call
    let executor = Arc::new(RecordingExecutor::new());
    executor.push_body(recent_media_body());
    executor.push_body(recent_media_body());
    let adapter = adapter_with(&executor);

    // WHEN: Asking for media of hostile-looking ids
    adapter.user_media("../../admin").await.unwrap();
    adapter.user_media("7?x=1#").await.unwrap();

    // THEN: Each id is encoded in place; the token is the only query pair
    let requests = executor.requests();
    assert_eq!(requests[0].endpoint(), "users/..%2F..%2Fadmin/media/recent");
    assert_eq!(requests[1].endpoint(), "users/7%3Fx%3D1%23/media/recent");
    for request in &requests {
        assert_eq!(request.query().len(), 1);
        assert_eq!(request.query_value("access_token"), Some("token-xyz"));
    }
}

/// **VALUE**: Verifies ids that are themselves dot segments are refused.
///
/// **BUG THIS CATCHES**: Would catch `..` reaching the URL parser, where even the
/// encoded form `%2e%2e` is resolved as a parent directory.
#[tokio::test]
async fn given_dot_segment_user_id_when_user_media_then_refused_without_request() {
    let executor = Arc::new(RecordingExecutor::replying(recent_media_body()));
    let adapter = adapter_with(&executor);

    for user_id in ["..", ".", ""] {
        assert!(
            matches!(
                adapter.user_media(user_id).await,
                Err(AdapterError::InvalidArgument { .. })
            ),
            "'{user_id}' should be refused"
        );
    }
    assert_eq!(executor.request_count(), 0);
}

/// **VALUE**: Verifies concurrent first calls on one adapter share a single
/// request.
///
/// **WHY THIS MATTERS**: Several views may ask for recent media at the same time
/// on startup; the memo must hold for them too, not only for sequential calls.
///
/// **BUG THIS CATCHES**: Would catch a check-then-set memo that lets both callers
/// fetch before either stores the result.
#[tokio::test]
async fn given_concurrent_first_calls_when_recent_media_then_one_request() {
    // GIVEN: Exactly one queued body, so a second fetch would be exhausted
    let executor = Arc::new(RecordingExecutor::replying(recent_media_body()));
    let adapter = adapter_with(&executor);

    // WHEN: Two callers race on the empty memo
    let (first, second) = tokio::join!(adapter.recent_media(), adapter.recent_media());

    // THEN: Both see the same feed from one request
    let first = first.unwrap();
    let second = second.unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(first.items().len(), 3);
    assert_eq!(executor.request_count(), 1);
}

#[tokio::test]
async fn given_non_json_body_when_recent_media_then_returns_json_error() {
    let executor = Arc::new(RecordingExecutor::replying("<html>oops</html>"));
    let adapter = adapter_with(&executor);

    assert!(matches!(
        adapter.recent_media().await,
        Err(AdapterError::Json { .. })
    ));
}

/// **VALUE**: Verifies `from_config` wires the real HTTP executor and the
/// credential from the environment.
///
/// **BUG THIS CATCHES**: Would catch the token being read from the wrong variable
/// or the base URL from the wrong service entry.
#[tokio::test]
#[serial]
async fn given_services_config_when_from_config_then_calls_configured_service() {
    // GIVEN: A mock media service and a config pointing at it
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/users/self/media/recent"))
        .and(query_param("access_token", "env-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(recent_media_body()))
        .expect(1)
        .mount(&server)
        .await;

    // SAFETY: serialized with every other test touching the environment.
    unsafe { std::env::set_var(TOKEN_ENV, "env-token") };
    let config = ServicesConfig {
        services: vec![
            ServiceConfig::new("media", format!("{}/v1", server.uri())).with_api_key_env(TOKEN_ENV),
        ],
    };

    // WHEN: Building and calling the adapter
    let adapter: MediaAdapter<HttpExecutor> = MediaAdapter::from_config(&config).unwrap();
    let located = adapter.recent_media_with_location().await.unwrap();

    // THEN: The mock was hit once and filtering applied
    assert_eq!(located.len(), 2);
    unsafe { std::env::remove_var(TOKEN_ENV) };
}

#[test]
fn given_config_without_media_service_when_from_config_then_unknown_service_error() {
    let config = ServicesConfig::default();

    let result = MediaAdapter::from_config(&config);

    assert!(matches!(
        result,
        Err(AdapterError::Config(
            adapter_core::error::ConfigError::UnknownService { .. }
        ))
    ));
}
