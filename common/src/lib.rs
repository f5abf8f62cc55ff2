//! Shared leaf types for the service adapters.
//!
//! This crate holds the small value types every other crate in the
//! workspace leans on. It has no I/O and no knowledge of any third-party
//! service.
//!
//! ## Architecture
//!
//! - **common** (this crate): error locations, HTTP status codes, credentials
//! - **adapter-core**: executors, serializers, deserializers and the concrete adapters
//!
//! Application code depends on `adapter-core`; it only reaches into this
//! crate to name error locations or to hand credentials around.

pub mod error;
pub mod http_status;
pub mod redacted_key;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_key::RedactedApiKey;
