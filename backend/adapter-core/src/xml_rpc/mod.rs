//! XML-RPC request encoding and response decoding.
//!
//! Responses are decoded into `serde_json::Value` so XML-RPC services and
//! JSON services share the same deserializer types.

mod decode;
mod encode;

pub use decode::decode_method_response;
pub use encode::encode_method_call;

use crate::error::XmlRpcError;

use common::ErrorLocation;

use std::panic::Location;

/// Scalar parameter of a `methodCall`.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlRpcParam {
    Int(i64),
    Bool(bool),
    /// Must be finite: `<double>` has no NaN or infinity. Build it through
    /// `TryFrom<f64>` to have that checked.
    Double(f64),
    Str(String),
}

impl From<i64> for XmlRpcParam {
    fn from(value: i64) -> Self {
        XmlRpcParam::Int(value)
    }
}

impl From<i32> for XmlRpcParam {
    fn from(value: i32) -> Self {
        XmlRpcParam::Int(i64::from(value))
    }
}

impl From<bool> for XmlRpcParam {
    fn from(value: bool) -> Self {
        XmlRpcParam::Bool(value)
    }
}

impl TryFrom<f64> for XmlRpcParam {
    type Error = XmlRpcError;

    #[track_caller]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(XmlRpcError::InvalidParam {
                message: format!("{value} cannot be sent as <double>"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(XmlRpcParam::Double(value))
    }
}

impl From<&str> for XmlRpcParam {
    fn from(value: &str) -> Self {
        XmlRpcParam::Str(value.to_string())
    }
}

impl From<String> for XmlRpcParam {
    fn from(value: String) -> Self {
        XmlRpcParam::Str(value)
    }
}
