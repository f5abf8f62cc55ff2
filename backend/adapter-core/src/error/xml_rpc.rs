use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum XmlRpcError {
    #[error("Malformed XML Error: {message} {location}")]
    Malformed {
        message: String,
        location: ErrorLocation,
    },

    /// Body was well-formed XML but not a `methodResponse` we understand.
    #[error("Shape Error: {message} {location}")]
    Shape {
        message: String,
        location: ErrorLocation,
    },

    /// A value XML-RPC has no encoding for.
    #[error("Invalid Param Error: {message} {location}")]
    InvalidParam {
        message: String,
        location: ErrorLocation,
    },

    #[error("Fault Error: {code} {message} {location}")]
    Fault {
        code: i64,
        message: String,
        location: ErrorLocation,
    },
}

impl XmlRpcError {
    #[track_caller]
    pub(crate) fn shape(message: impl Into<String>) -> Self {
        XmlRpcError::Shape {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<quick_xml::Error> for XmlRpcError {
    #[track_caller]
    fn from(error: quick_xml::Error) -> Self {
        XmlRpcError::Malformed {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
