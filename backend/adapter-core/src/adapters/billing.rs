//! Billing service (XML-RPC over POST).

use crate::config::ServicesConfig;
use crate::deserializer::{Deserializer, StatusDeserializer, StatusLayout, SuccessSentinel};
use crate::error::AdapterError;
use crate::executor::{HttpExecutor, RequestExecutor};
use crate::serializer::{RequestSerializer, XmlRpcCall};
use crate::xml_rpc::decode_method_response;

use common::{ErrorLocation, RedactedApiKey};

use std::fmt;
use std::panic::Location;

use log::{debug, warn};
use reqwest::Method;
use serde_json::Value;

pub const BILLING_SERVICE: &str = "billing";

const XML_RPC_ENDPOINT: &str = "xmlrpc";
const INVOICE_METHOD: &str = "invoice.get";

// ============================================
// SERIALIZER
// ============================================

/// `invoice.get(api_key, invoice_id)`.
pub struct InvoiceRequestSerializer {
    invoice_id: i64,
    call: XmlRpcCall,
}

impl InvoiceRequestSerializer {
    pub fn new(api_key: &RedactedApiKey, invoice_id: i64) -> Self {
        Self {
            invoice_id,
            call: XmlRpcCall::new(XML_RPC_ENDPOINT, INVOICE_METHOD)
                .param(api_key.as_str())
                .param(invoice_id),
        }
    }
}

// The call's params and rendered body hold the plain API key.
impl fmt::Debug for InvoiceRequestSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvoiceRequestSerializer")
            .field("endpoint", &self.call.endpoint())
            .field("method_name", &self.call.method_name())
            .field("invoice_id", &self.invoice_id)
            .finish_non_exhaustive()
    }
}

impl RequestSerializer for InvoiceRequestSerializer {
    fn method(&self) -> Method {
        self.call.method()
    }

    fn endpoint(&self) -> &str {
        self.call.endpoint()
    }

    fn request_body(&self) -> &str {
        self.call.request_body()
    }
}

// ============================================
// DESERIALIZER
// ============================================

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDeserializer {
    raw: Value,
}

impl InvoiceDeserializer {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn invoice_id(&self) -> Option<i64> {
        self.i64_field(&["invoice", "id"])
    }

    pub fn customer_name(&self) -> Option<&str> {
        self.str_field(&["invoice", "customer", "name"])
    }

    pub fn amount_due(&self) -> Option<f64> {
        self.f64_field(&["invoice", "amount_due"])
    }

    pub fn is_paid(&self) -> bool {
        self.field(&["invoice", "paid"])
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

impl Deserializer for InvoiceDeserializer {
    fn raw(&self) -> &Value {
        &self.raw
    }
}

impl StatusDeserializer for InvoiceDeserializer {
    const STATUS: StatusLayout = StatusLayout {
        container: "status",
        code: "code",
        message: "message",
        success: SuccessSentinel::Text("OK"),
    };
}

// ============================================
// ADAPTER
// ============================================

pub struct BillingAdapter<E> {
    executor: E,
    api_key: RedactedApiKey,
}

impl BillingAdapter<HttpExecutor> {
    /// Build from the `billing` entry of `config`.
    pub fn from_config(config: &ServicesConfig) -> Result<Self, AdapterError> {
        let service = config.service(BILLING_SERVICE)?;
        let api_key = service.credential()?;
        let executor = HttpExecutor::from_config(service)?;

        Ok(Self::new(executor, api_key))
    }
}

impl<E: RequestExecutor> BillingAdapter<E> {
    pub fn new(executor: E, api_key: RedactedApiKey) -> Self {
        Self { executor, api_key }
    }

    /// Fetch one invoice. A `failed` status is returned, not raised.
    pub async fn invoice(&self, invoice_id: i64) -> Result<InvoiceDeserializer, AdapterError> {
        let serializer = InvoiceRequestSerializer::new(&self.api_key, invoice_id);
        debug!("Requesting invoice {invoice_id}");

        let body = self.executor.execute(serializer.to_request()).await?;
        let invoice = InvoiceDeserializer::new(decode_method_response(&body)?);

        if invoice.is_failed() {
            warn!(
                "Billing service rejected invoice {}: {}",
                invoice_id,
                invoice.status_message().unwrap_or_default()
            );
        }

        Ok(invoice)
    }

    /// Like [`BillingAdapter::invoice`], but a `failed` status becomes
    /// [`AdapterError::Rejected`].
    pub async fn invoice_or_fail(
        &self,
        invoice_id: i64,
    ) -> Result<InvoiceDeserializer, AdapterError> {
        let invoice = self.invoice(invoice_id).await?;

        if invoice.is_failed() {
            let code = match invoice.status_code() {
                Some(Value::String(code)) => code.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            };

            return Err(AdapterError::Rejected {
                code,
                message: invoice.status_message().unwrap_or_default().to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(invoice)
    }
}
