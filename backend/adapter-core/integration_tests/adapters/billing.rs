use adapter_core::adapters::BillingAdapter;
use adapter_core::deserializer::StatusDeserializer;
use adapter_core::error::{AdapterError, XmlRpcError};
use adapter_core::executor::RecordingExecutor;
use adapter_core::{ServiceConfig, ServicesConfig};
use common::RedactedApiKey;

use std::sync::Arc;

use serde_json::json;
use serial_test::serial;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY_ENV: &str = "ADAPTER_TEST_BILLING_KEY";

fn invoice_response(code: &str, message: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<methodResponse><params><param><value><struct>
  <member><name>status</name><value><struct>
    <member><name>code</name><value><string>{code}</string></value></member>
    <member><name>message</name><value><string>{message}</string></value></member>
  </struct></value></member>
  <member><name>invoice</name><value><struct>
    <member><name>id</name><value><int>1001</int></value></member>
    <member><name>amount_due</name><value><double>250.75</double></value></member>
    <member><name>paid</name><value><boolean>1</boolean></value></member>
    <member><name>customer</name><value><struct>
      <member><name>name</name><value><string>Ada Lovelace</string></value></member>
    </struct></value></member>
  </struct></value></member>
</struct></value></param></params></methodResponse>"#
    )
}

fn adapter_with(executor: &Arc<RecordingExecutor>) -> BillingAdapter<Arc<RecordingExecutor>> {
    BillingAdapter::new(Arc::clone(executor), RedactedApiKey::new("billing-key"))
}

/// **VALUE**: Verifies the invoice flow: serializer body out, decoded XML-RPC in,
/// accessors and status read from the decoded tree.
///
/// **WHY THIS MATTERS**: This is the serializer → executor → deserializer chain
/// for a non-JSON service in one call.
///
/// **BUG THIS CATCHES**: Would catch the adapter posting to the wrong endpoint,
/// dropping the API key param, or wrapping the undecoded body.
#[tokio::test]
async fn given_ok_response_when_invoice_then_returns_successful_deserializer() {
    // GIVEN: A fake billing service
    let executor = Arc::new(RecordingExecutor::replying(invoice_response("OK", "found")));
    let adapter = adapter_with(&executor);

    // WHEN: Fetching invoice 1001
    let invoice = adapter.invoice(1001).await.unwrap();

    // THEN: Decoded fields and status
    assert!(invoice.is_success());
    assert_eq!(invoice.status_message(), Some("found"));
    assert_eq!(invoice.invoice_id(), Some(1001));
    assert_eq!(invoice.customer_name(), Some("Ada Lovelace"));
    assert_eq!(invoice.amount_due(), Some(250.75));
    assert!(invoice.is_paid());

    // THEN: One POST carrying the rendered methodCall
    let requests = executor.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method().as_str(), "POST");
    assert_eq!(requests[0].endpoint(), "xmlrpc");
    let payload = requests[0].payload().unwrap();
    assert!(payload.contains("<methodName>invoice.get</methodName>"));
    assert!(payload.contains("<string>billing-key</string>"));
    assert!(payload.contains("<int>1001</int>"));
}

/// **VALUE**: Verifies a non-OK status is returned as a failed classification by
/// `invoice` and as `AdapterError::Rejected` by `invoice_or_fail`.
#[tokio::test]
async fn given_not_found_status_when_invoice_then_failed_and_or_fail_rejects() {
    let executor = Arc::new(RecordingExecutor::new());
    executor.push_body(invoice_response("NOT_FOUND", "no such invoice"));
    executor.push_body(invoice_response("NOT_FOUND", "no such invoice"));
    let adapter = adapter_with(&executor);

    let invoice = adapter.invoice(5).await.unwrap();
    assert!(invoice.is_failed());
    assert_eq!(invoice.status_code(), Some(&json!("NOT_FOUND")));

    match adapter.invoice_or_fail(5).await {
        Err(AdapterError::Rejected { code, message, .. }) => {
            assert_eq!(code, "NOT_FOUND");
            assert_eq!(message, "no such invoice");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn given_fault_response_when_invoice_then_returns_xml_rpc_fault() {
    let fault = r#"<methodResponse><fault><value><struct>
        <member><name>faultCode</name><value><int>401</int></value></member>
        <member><name>faultString</name><value><string>bad api key</string></value></member>
    </struct></value></fault></methodResponse>"#;
    let executor = Arc::new(RecordingExecutor::replying(fault));
    let adapter = adapter_with(&executor);

    match adapter.invoice(1).await {
        Err(AdapterError::XmlRpc(XmlRpcError::Fault { code, message, .. })) => {
            assert_eq!(code, 401);
            assert_eq!(message, "bad api key");
        }
        other => panic!("expected fault, got {other:?}"),
    }
}

/// **VALUE**: Verifies the configured XML content type and body reach the wire.
#[tokio::test]
#[serial]
async fn given_services_config_when_from_config_then_posts_xml_to_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/xmlrpc"))
        .and(header("content-type", "text/xml"))
        .and(body_string_contains("<int>77</int>"))
        .respond_with(ResponseTemplate::new(200).set_body_string(invoice_response("OK", "found")))
        .expect(1)
        .mount(&server)
        .await;

    // SAFETY: serialized with every other test touching the environment.
    unsafe { std::env::set_var(KEY_ENV, "from-env") };
    let config = ServicesConfig {
        services: vec![
            ServiceConfig::new("billing", server.uri())
                .with_content_type("text/xml")
                .with_api_key_env(KEY_ENV),
        ],
    };

    let adapter = BillingAdapter::from_config(&config).unwrap();
    let invoice = adapter.invoice_or_fail(77).await.unwrap();

    assert_eq!(invoice.customer_name(), Some("Ada Lovelace"));
    unsafe { std::env::remove_var(KEY_ENV) };
}
