use crate::serializer::RequestSerializer;
use crate::xml_rpc::{XmlRpcParam, encode_method_call};

use once_cell::sync::OnceCell;
use reqwest::Method;

/// A `methodCall` POSTed to a fixed XML-RPC endpoint.
#[derive(Debug, Clone)]
pub struct XmlRpcCall {
    endpoint: String,
    method_name: String,
    params: Vec<XmlRpcParam>,
    body: OnceCell<String>,
}

impl XmlRpcCall {
    pub fn new(endpoint: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method_name: method_name.into(),
            params: Vec::new(),
            body: OnceCell::new(),
        }
    }

    pub fn param(mut self, param: impl Into<XmlRpcParam>) -> Self {
        self.params.push(param.into());
        // Params changed, so any rendered body is stale.
        self.body = OnceCell::new();
        self
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn params(&self) -> &[XmlRpcParam] {
        &self.params
    }
}

impl RequestSerializer for XmlRpcCall {
    fn method(&self) -> Method {
        Method::POST
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body(&self) -> &str {
        self.body
            .get_or_init(|| encode_method_call(&self.method_name, &self.params))
    }
}
