use crate::xml_rpc::XmlRpcParam;

use std::fmt::Write;

use quick_xml::escape::escape;

const XML_DECLARATION: &str = r#"<?xml version="1.0"?>"#;

/// Render a complete `methodCall` document.
///
/// Output depends only on the inputs; params keep their order.
pub fn encode_method_call(method_name: &str, params: &[XmlRpcParam]) -> String {
    let mut body = String::from(XML_DECLARATION);
    body.push_str("<methodCall><methodName>");
    body.push_str(&escape(method_name));
    body.push_str("</methodName><params>");

    for param in params {
        body.push_str("<param><value>");
        write_param(&mut body, param);
        body.push_str("</value></param>");
    }

    body.push_str("</params></methodCall>");
    body
}

fn write_param(body: &mut String, param: &XmlRpcParam) {
    // Writing into a String cannot fail.
    let _ = match param {
        XmlRpcParam::Int(value) => write!(body, "<int>{value}</int>"),
        XmlRpcParam::Bool(value) => write!(body, "<boolean>{}</boolean>", u8::from(*value)),
        XmlRpcParam::Double(value) => write!(body, "<double>{value}</double>"),
        XmlRpcParam::Str(value) => write!(body, "<string>{}</string>", escape(value.as_str())),
    };
}
