use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Read Error: {path}: {source} {location}")]
    ReadError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config Parse Error: {path}: {reason} {location}")]
    ParseError {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Config Validation Error: {reason} {location}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Missing Credential Error: service '{service}' expects ${env_var} {location}")]
    MissingCredential {
        location: ErrorLocation,
        service: String,
        env_var: String,
    },

    #[error("Unknown Service Error: '{service}' {location}")]
    UnknownService {
        location: ErrorLocation,
        service: String,
    },
}
