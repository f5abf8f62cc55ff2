// Unit tests for methodCall rendering

use crate::error::XmlRpcError;
use crate::xml_rpc::{XmlRpcParam, encode_method_call};

/// **VALUE**: Verifies the exact document produced for typical params.
///
/// **WHY THIS MATTERS**: XML-RPC servers are strict about element names; a
/// typo here fails every billing call.
///
/// **BUG THIS CATCHES**: Would catch wrong type tags or param reordering.
#[test]
fn given_mixed_params_when_encoded_then_renders_typed_values_in_order() {
    let params = vec![
        XmlRpcParam::from("key-123"),
        XmlRpcParam::from(42_i64),
        XmlRpcParam::from(true),
        XmlRpcParam::try_from(1.5).unwrap(),
    ];

    let body = encode_method_call("invoice.get", &params);

    assert_eq!(
        body,
        concat!(
            r#"<?xml version="1.0"?>"#,
            "<methodCall><methodName>invoice.get</methodName><params>",
            "<param><value><string>key-123</string></value></param>",
            "<param><value><int>42</int></value></param>",
            "<param><value><boolean>1</boolean></value></param>",
            "<param><value><double>1.5</double></value></param>",
            "</params></methodCall>"
        )
    );
}

/// **VALUE**: Verifies string params are XML-escaped.
///
/// **BUG THIS CATCHES**: Would catch raw `<` or `&` in user-supplied text breaking
/// the document (or injecting elements).
#[test]
fn given_markup_in_string_when_encoded_then_escaped() {
    let body = encode_method_call("note.add", &[XmlRpcParam::from("<b>Tom & Jerry</b>")]);

    assert!(body.contains("<string>&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;</string>"));
}

#[test]
fn given_no_params_when_encoded_then_renders_empty_params() {
    let body = encode_method_call("system.listMethods", &[]);

    assert!(body.ends_with("<methodName>system.listMethods</methodName><params></params></methodCall>"));
}

/// **VALUE**: Verifies encoding is deterministic.
#[test]
fn given_same_inputs_when_encoded_twice_then_identical_bytes() {
    let params = vec![XmlRpcParam::Int(7), XmlRpcParam::Str("x".into())];

    assert_eq!(
        encode_method_call("m", &params).as_bytes(),
        encode_method_call("m", &params).as_bytes()
    );
}

/// **VALUE**: Verifies non-finite doubles are refused when the param is built.
///
/// **WHY THIS MATTERS**: `<double>NaN</double>` is not valid XML-RPC; servers
/// reject it and our own decoder cannot read it back.
///
/// **BUG THIS CATCHES**: Would catch an infallible `From<f64>` coming back and
/// letting NaN or infinity reach the encoder.
#[test]
fn given_non_finite_double_when_param_built_then_invalid_param_error() {
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let result = XmlRpcParam::try_from(value);

        assert!(
            matches!(result, Err(XmlRpcError::InvalidParam { .. })),
            "{value} should be refused"
        );
    }

    assert_eq!(XmlRpcParam::try_from(-0.25).unwrap(), XmlRpcParam::Double(-0.25));
}
