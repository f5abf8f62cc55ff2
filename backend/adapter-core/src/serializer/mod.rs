//! Outbound request builders.
//!
//! A serializer turns a few domain inputs into a complete request body and
//! declares the HTTP method that carries it. Rendering is pure; bodies are
//! rendered once and reused.

pub mod xml_rpc_call;

pub use xml_rpc_call::XmlRpcCall;

use crate::executor::RequestDescriptor;

use reqwest::Method;

pub trait RequestSerializer {
    fn method(&self) -> Method;

    /// Endpoint relative to the service base URL.
    fn endpoint(&self) -> &str;

    /// Fully rendered payload.
    fn request_body(&self) -> &str;

    fn headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn to_request(&self) -> RequestDescriptor {
        self.headers().into_iter().fold(
            RequestDescriptor::new(self.method(), self.endpoint()).with_payload(self.request_body()),
            |request, (name, value)| request.with_header(name, value),
        )
    }
}
