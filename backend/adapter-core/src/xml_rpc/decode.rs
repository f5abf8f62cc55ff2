use crate::error::XmlRpcError;

use common::ErrorLocation;

use std::panic::Location;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Number, Value};

/// Minimal element tree; attributes are irrelevant to XML-RPC.
#[derive(Debug)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(start: &BytesStart<'_>) -> Self {
        Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }
}

/// Decode a `methodResponse` into a JSON-shaped tree.
///
/// A `<fault>` response becomes [`XmlRpcError::Fault`].
#[track_caller]
pub fn decode_method_response(xml: &str) -> Result<Value, XmlRpcError> {
    let root = parse_tree(xml)?;

    if root.name != "methodResponse" {
        return Err(XmlRpcError::shape(format!(
            "expected <methodResponse>, found <{}>",
            root.name
        )));
    }

    if let Some(fault) = root.child("fault") {
        let value = fault
            .child("value")
            .ok_or_else(|| XmlRpcError::shape("<fault> without <value>"))?;
        let fault = decode_value(value)?;

        return Err(XmlRpcError::Fault {
            code: fault.get("faultCode").and_then(Value::as_i64).unwrap_or_default(),
            message: fault
                .get("faultString")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let value = root
        .child("params")
        .and_then(|params| params.child("param"))
        .and_then(|param| param.child("value"))
        .ok_or_else(|| XmlRpcError::shape("<methodResponse> without params/param/value"))?;

    decode_value(value)
}

fn parse_tree(xml: &str) -> Result<Element, XmlRpcError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::new(&start)),
            Event::Empty(start) => attach(&mut stack, &mut root, Element::new(&start))?,
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed("closing tag without opening tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(&format!("unclosed <{}>", open.name)));
    }

    root.ok_or_else(|| malformed("empty document"))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlRpcError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(malformed("more than one root element")),
    }
    Ok(())
}

fn decode_value(value: &Element) -> Result<Value, XmlRpcError> {
    // Untyped <value> content is a string.
    let Some(typed) = value.children.first() else {
        return Ok(Value::String(value.text.clone()));
    };

    let text = typed.text.trim();

    match typed.name.as_str() {
        "int" | "i4" | "i8" => text
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| XmlRpcError::shape(format!("bad <{}> '{text}': {e}", typed.name))),
        "boolean" => match text {
            "1" => Ok(Value::Bool(true)),
            "0" => Ok(Value::Bool(false)),
            other => Err(XmlRpcError::shape(format!("bad <boolean> '{other}'"))),
        },
        "double" => text
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| XmlRpcError::shape(format!("bad <double> '{text}'"))),
        "string" => Ok(Value::String(typed.text.clone())),
        "dateTime.iso8601" | "base64" => Ok(Value::String(text.to_string())),
        "nil" => Ok(Value::Null),
        "struct" => decode_struct(typed),
        "array" => decode_array(typed),
        other => Err(XmlRpcError::shape(format!("unsupported value type <{other}>"))),
    }
}

fn decode_struct(element: &Element) -> Result<Value, XmlRpcError> {
    let mut members = Map::new();

    for member in element.children_named("member") {
        let name = member
            .child("name")
            .ok_or_else(|| XmlRpcError::shape("<member> without <name>"))?;
        let value = member
            .child("value")
            .ok_or_else(|| XmlRpcError::shape("<member> without <value>"))?;
        members.insert(name.text.clone(), decode_value(value)?);
    }

    Ok(Value::Object(members))
}

fn decode_array(element: &Element) -> Result<Value, XmlRpcError> {
    let Some(data) = element.child("data") else {
        return Ok(Value::Array(Vec::new()));
    };

    data.children_named("value")
        .map(decode_value)
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

#[track_caller]
fn malformed(message: &str) -> XmlRpcError {
    XmlRpcError::Malformed {
        message: message.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
