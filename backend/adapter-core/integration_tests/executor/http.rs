use adapter_core::error::ExecutorError;
use adapter_core::executor::{HttpExecutor, RequestDescriptor, RequestExecutor};
use common::HttpStatusCode;

use std::time::Duration;

use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const XML_CONTENT_TYPE: &str = "text/xml";

async fn executor_for(server: &MockServer, base_path: &str) -> HttpExecutor {
    HttpExecutor::new(
        &format!("{}{}", server.uri(), base_path),
        XML_CONTENT_TYPE,
        Duration::from_secs(5),
    )
    .expect("executor should build for a mock server URL")
}

/// **VALUE**: Verifies one request goes out with the descriptor's method, URL,
/// payload and headers, plus the executor's fixed content type.
///
/// **WHY THIS MATTERS**: Every adapter funnels through this function. If it drops
/// a header or the payload, every service integration breaks at once.
///
/// **BUG THIS CATCHES**: Would catch the content type not being applied, custom
/// headers being ignored, or the base path being replaced instead of extended.
#[tokio::test]
async fn given_post_descriptor_when_executed_then_sends_exact_request_once() {
    // GIVEN: A mock expecting exactly one fully specified request
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/xmlrpc"))
        .and(header("content-type", XML_CONTENT_TYPE))
        .and(header("x-request-source", "adapter-tests"))
        .and(body_string("<methodCall/>"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<methodResponse/>"))
        .expect(1)
        .mount(&server)
        .await;

    let executor = executor_for(&server, "/api/v2").await;
    let request = RequestDescriptor::post("xmlrpc")
        .with_payload("<methodCall/>")
        .with_header("x-request-source", "adapter-tests");

    // WHEN: Executing it
    let body = executor.execute(request).await.unwrap();

    // THEN: Raw body returned unmodified; `expect(1)` verified on drop
    assert_eq!(body, "<methodResponse/>");
}

/// **VALUE**: Verifies query pairs are appended and a leading slash on the
/// endpoint does not escape the base path.
#[tokio::test]
async fn given_get_with_query_when_executed_then_query_and_base_path_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/users/self/media/recent"))
        .and(query_param("access_token", "tok en"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":[]}"#))
        .expect(1)
        .mount(&server)
        .await;

    let executor = executor_for(&server, "/v1/").await;
    let request =
        RequestDescriptor::get("/users/self/media/recent").with_query("access_token", "tok en");

    let body = executor.execute(request).await.unwrap();

    assert_eq!(body, r#"{"data":[]}"#);
}

/// **VALUE**: Verifies non-2xx responses become `ExecutorError::Server` with the
/// status and body preserved.
///
/// **WHY THIS MATTERS**: Transport failures must not be handed to deserializers
/// as if they were data.
///
/// **BUG THIS CATCHES**: Would catch the status check being skipped.
#[tokio::test]
async fn given_error_status_when_executed_then_returns_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let executor = executor_for(&server, "").await;

    let err = executor
        .execute(RequestDescriptor::get("anything"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(HttpStatusCode(503)));
    match err {
        ExecutorError::Server { body, .. } => assert_eq!(body, "maintenance"),
        other => panic!("expected server error, got {other:?}"),
    }
}

/// **VALUE**: Verifies connection failures surface as `ExecutorError::Http`.
#[tokio::test]
async fn given_unreachable_server_when_executed_then_returns_http_error() {
    // GIVEN: A port nothing is listening on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let executor = HttpExecutor::new(
        &format!("http://127.0.0.1:{port}"),
        XML_CONTENT_TYPE,
        Duration::from_secs(5),
    )
    .unwrap();

    let result = executor.execute(RequestDescriptor::get("ping")).await;

    assert!(matches!(result, Err(ExecutorError::Http { .. })));
}

#[test]
fn given_invalid_base_url_when_executor_built_then_returns_url_parse_error() {
    let result = HttpExecutor::new("not a url", XML_CONTENT_TYPE, Duration::from_secs(1));

    assert!(matches!(result, Err(ExecutorError::UrlParse { .. })));
}

#[test]
fn given_base_url_without_trailing_slash_when_built_then_slash_added() {
    let executor =
        HttpExecutor::new("https://api.example.com/v1", XML_CONTENT_TYPE, Duration::from_secs(1))
            .unwrap();

    assert_eq!(executor.base_url().as_str(), "https://api.example.com/v1/");
    assert_eq!(executor.content_type(), XML_CONTENT_TYPE);
}

/// **VALUE**: Verifies an absolute endpoint is refused before anything is sent.
///
/// **WHY THIS MATTERS**: Requests carry the service credential in their query. An
/// endpoint that swaps the host would hand that credential to another server.
///
/// **BUG THIS CATCHES**: Would catch `Url::join` being trusted with absolute input,
/// which silently replaces the configured base URL.
#[tokio::test]
async fn given_absolute_endpoint_when_executed_then_refused_without_request() {
    // GIVEN: A configured service and a second server that must never be hit
    let server = MockServer::start().await;
    let other = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("from-other"))
        .expect(0)
        .mount(&other)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let executor = executor_for(&server, "/v1/").await;
    let request = RequestDescriptor::get(format!("{}/steal", other.uri()))
        .with_query("access_token", "tok");

    // WHEN: Executing it
    let result = executor.execute(request).await;

    // THEN: Refused; `expect(0)` on both servers verified on drop
    match result {
        Err(ExecutorError::InvalidEndpoint { endpoint, .. }) => {
            assert_eq!(endpoint, format!("{}/steal", other.uri()));
        }
        unexpected => panic!("expected invalid endpoint, got {unexpected:?}"),
    }
}

/// **VALUE**: Verifies dot segments cannot climb above the base path.
///
/// **WHY THIS MATTERS**: The base path scopes every request to one service API.
/// Leaving it reaches unrelated resources on the same host with the credential.
///
/// **BUG THIS CATCHES**: Would catch only the host being checked after the join,
/// or percent-encoded dot segments slipping past.
#[tokio::test]
async fn given_dot_segment_endpoint_when_executed_then_refused_without_request() {
    // GIVEN: A base path of /v1/ and an admin route just above it
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let executor = executor_for(&server, "/v1/").await;

    for endpoint in ["../admin", "users/../../admin", "%2e%2e/admin"] {
        // WHEN: Executing an endpoint that normalizes to /admin
        let request = RequestDescriptor::get(endpoint).with_query("access_token", "tok");
        let result = executor.execute(request).await;

        // THEN: Refused before sending
        assert!(
            matches!(result, Err(ExecutorError::InvalidEndpoint { .. })),
            "{endpoint} should be refused, got {result:?}"
        );
    }
}

/// **VALUE**: Verifies dot segments that stay inside the base path still work.
#[tokio::test]
async fn given_dot_segment_inside_base_when_executed_then_request_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/media/recent"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let executor = executor_for(&server, "/v1/").await;

    let body = executor
        .execute(RequestDescriptor::get("users/../media/recent"))
        .await
        .unwrap();

    assert_eq!(body, "ok");
}
