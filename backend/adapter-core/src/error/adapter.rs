use crate::error::config::ConfigError;
use crate::error::executor::ExecutorError;
use crate::error::xml_rpc::XmlRpcError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Everything a domain adapter method can fail with.
#[derive(Debug, ThisError)]
pub enum AdapterError {
    #[error(transparent)]
    Executor(#[from] ExecutorError),

    #[error(transparent)]
    XmlRpc(#[from] XmlRpcError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    /// A caller-supplied value cannot be sent to the service.
    #[error("Invalid Argument Error: {message} {location}")]
    InvalidArgument {
        message: String,
        location: ErrorLocation,
    },

    /// The service answered, but classified the call as failed.
    #[error("Rejected Error: {code} {message} {location}")]
    Rejected {
        code: String,
        message: String,
        location: ErrorLocation,
    },
}

impl From<serde_json::Error> for AdapterError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        AdapterError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
