use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ExecutorError {
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    /// The endpoint would leave the executor's base URL.
    #[error("Invalid Endpoint Error: {endpoint} {location}")]
    InvalidEndpoint {
        endpoint: String,
        location: ErrorLocation,
    },

    #[error("Server Error: HTTP {status} - {body} {location}")]
    Server {
        status: HttpStatusCode,
        body: String,
        location: ErrorLocation,
    },

    #[error("Exhausted Error: {message} {location}")]
    Exhausted {
        message: String,
        location: ErrorLocation,
    },
}

impl ExecutorError {
    /// Status code for `Server` errors.
    pub fn status(&self) -> Option<HttpStatusCode> {
        match self {
            ExecutorError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<url::ParseError> for ExecutorError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ExecutorError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ExecutorError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        ExecutorError::Http {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
