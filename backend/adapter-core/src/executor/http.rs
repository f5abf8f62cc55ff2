use crate::config::ServiceConfig;
use crate::error::ExecutorError;
use crate::executor::{RequestDescriptor, RequestExecutor};

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;
use std::time::Duration;

use log::{debug, error, warn};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

/// reqwest-backed executor bound to one service's base URL and content type.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    base_url: Url,
    content_type: String,
    client: Client,
}

impl HttpExecutor {
    pub fn new(
        base_url_str: &str,
        content_type: &str,
        timeout: Duration,
    ) -> Result<Self, ExecutorError> {
        let mut base_url = Url::parse(base_url_str)?;

        // Without a trailing slash `Url::join` would replace the last segment.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            content_type: content_type.to_string(),
            client,
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, ExecutorError> {
        Self::new(&config.base_url, &config.content_type, config.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Join `request`'s endpoint onto the base URL, refusing anything that
    /// lands outside it.
    fn resolve(&self, request: &RequestDescriptor) -> Result<Url, ExecutorError> {
        let endpoint = request.endpoint().trim_start_matches('/');

        // An absolute endpoint would replace the base entirely on join.
        if Url::parse(endpoint).is_ok() {
            return Err(invalid_endpoint(request.endpoint()));
        }

        let mut url = self.base_url.join(endpoint)?;

        let same_origin = url.scheme() == self.base_url.scheme()
            && url.host_str() == self.base_url.host_str()
            && url.port_or_known_default() == self.base_url.port_or_known_default();

        if !same_origin || !url.path().starts_with(self.base_url.path()) {
            return Err(invalid_endpoint(request.endpoint()));
        }

        if !request.query().is_empty() {
            url.query_pairs_mut().extend_pairs(request.query());
        }

        Ok(url)
    }
}

#[track_caller]
fn invalid_endpoint(endpoint: &str) -> ExecutorError {
    warn!("Refusing endpoint outside the base URL: {endpoint}");
    ExecutorError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

impl RequestExecutor for HttpExecutor {
    async fn execute(&self, request: RequestDescriptor) -> Result<String, ExecutorError> {
        let url = self.resolve(&request)?;

        debug!(
            "{} {}{}",
            request.method(),
            self.base_url,
            request.endpoint().trim_start_matches('/')
        );

        let mut builder = self
            .client
            .request(request.method().clone(), url)
            .header(CONTENT_TYPE, self.content_type.as_str());

        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(payload) = request.payload() {
            builder = builder.body(payload.to_string());
        }

        let response = builder.send().await?;
        let status = HttpStatusCode(response.status().as_u16());
        let body = response.text().await?;

        if !status.is_success() {
            let (method, endpoint) = (request.method(), request.endpoint());
            if status.is_server_error() {
                error!("{method} {endpoint} failed server-side: HTTP {status}");
            } else if status.is_client_error() {
                warn!("{method} {endpoint} was rejected: HTTP {status}");
            } else {
                warn!("{method} {endpoint} returned unexpected HTTP {status}");
            }

            return Err(ExecutorError::Server {
                status,
                body,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(body)
    }
}
