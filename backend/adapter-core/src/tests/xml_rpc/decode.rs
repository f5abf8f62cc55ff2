// Unit tests for methodResponse decoding

use crate::error::XmlRpcError;
use crate::xml_rpc::decode_method_response;
use serde_json::json;

/// **VALUE**: Verifies a nested struct/array response decodes to the same tree
/// the JSON services produce.
///
/// **WHY THIS MATTERS**: Deserializers are shared between JSON and XML-RPC
/// services; the decoded shape is their only contract.
///
/// **BUG THIS CATCHES**: Would catch members landing at the wrong depth or type
/// tags being ignored.
#[test]
fn given_struct_response_when_decoded_then_returns_object_tree() {
    let xml = r#"<?xml version="1.0"?>
<methodResponse>
  <params>
    <param>
      <value>
        <struct>
          <member><name>status</name><value><struct>
            <member><name>code</name><value><string>OK</string></value></member>
            <member><name>message</name><value>found</value></member>
          </struct></value></member>
          <member><name>invoice</name><value><struct>
            <member><name>id</name><value><i4>42</i4></value></member>
            <member><name>amount_due</name><value><double>19.5</double></value></member>
            <member><name>paid</name><value><boolean>0</boolean></value></member>
            <member><name>notes</name><value><nil/></value></member>
            <member><name>lines</name><value><array><data>
              <value><int>1</int></value>
              <value><string>two</string></value>
            </data></array></value></member>
          </struct></value></member>
        </struct>
      </value>
    </param>
  </params>
</methodResponse>"#;

    let decoded = decode_method_response(xml).unwrap();

    assert_eq!(
        decoded,
        json!({
            "status": {"code": "OK", "message": "found"},
            "invoice": {
                "id": 42,
                "amount_due": 19.5,
                "paid": false,
                "notes": null,
                "lines": [1, "two"]
            }
        })
    );
}

/// **VALUE**: Verifies escaped text is unescaped.
#[test]
fn given_escaped_string_when_decoded_then_unescaped() {
    let xml = "<methodResponse><params><param><value><string>Tom &amp; Jerry</string></value></param></params></methodResponse>";

    assert_eq!(decode_method_response(xml).unwrap(), json!("Tom & Jerry"));
}

/// **VALUE**: Verifies a fault response becomes `XmlRpcError::Fault` with its code
/// and message.
///
/// **BUG THIS CATCHES**: Would catch faults being returned as ordinary data.
#[test]
fn given_fault_response_when_decoded_then_returns_fault_error() {
    let xml = r#"<methodResponse><fault><value><struct>
        <member><name>faultCode</name><value><int>4</int></value></member>
        <member><name>faultString</name><value><string>Too many parameters</string></value></member>
    </struct></value></fault></methodResponse>"#;

    match decode_method_response(xml) {
        Err(XmlRpcError::Fault { code, message, .. }) => {
            assert_eq!(code, 4);
            assert_eq!(message, "Too many parameters");
        }
        other => panic!("expected fault, got {other:?}"),
    }
}

/// **VALUE**: Verifies broken XML is reported as malformed, not as a panic.
#[test]
fn given_unclosed_document_when_decoded_then_returns_malformed() {
    let xml = "<methodResponse><params><param><value><int>1</int></value>";

    assert!(matches!(
        decode_method_response(xml),
        Err(XmlRpcError::Malformed { .. })
    ));
}

/// **VALUE**: Verifies well-formed XML of the wrong shape is a shape error.
#[test]
fn given_non_response_root_when_decoded_then_returns_shape_error() {
    let cases = [
        "<html><body>502 Bad Gateway</body></html>",
        "<methodResponse><params></params></methodResponse>",
        "<methodResponse><params><param><value><int>abc</int></value></param></params></methodResponse>",
    ];

    for xml in cases {
        assert!(
            matches!(decode_method_response(xml), Err(XmlRpcError::Shape { .. })),
            "expected shape error for {xml}"
        );
    }
}
