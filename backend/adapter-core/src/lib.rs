//! Adapters that isolate application code from third-party HTTP APIs.
//!
//! Call flow: an adapter method builds a request (directly or through a
//! [`serializer`]), hands it to a [`executor::RequestExecutor`], and wraps the
//! raw body in a [`deserializer`] before returning it.

pub mod adapters;
pub mod config;
pub mod deserializer;
pub mod error;
pub mod executor;
pub mod logger;
pub mod serializer;
pub mod xml_rpc;

#[cfg(test)]
mod tests;

pub use adapters::{BillingAdapter, MediaAdapter};
pub use config::{ServiceConfig, ServicesConfig};
pub use error::AdapterError;
pub use executor::{HttpExecutor, RecordingExecutor, RequestDescriptor, RequestExecutor};
