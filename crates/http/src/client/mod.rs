//! Portal HTTP client

pub mod auth;
pub mod customer;
pub mod error;
pub mod interceptor;
pub mod profile;
pub mod typed;

pub use error::ClientError;
pub use interceptor::{ErrorInterceptor, RequestFailure};
pub use typed::{AuthenticatedPortalClient, PublicPortalClient, TypedClientBuilder};

use reqwest::{Client, ClientBuilder, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default user agent when none is configured
pub const DEFAULT_USER_AGENT: &str = concat!("portal-client/", env!("CARGO_PKG_VERSION"));

/// Connection, base URL and failure hooks shared by the typed clients
#[derive(Clone)]
pub(crate) struct Transport {
    client: Client,
    base_url: String,
    interceptors: Arc<[Arc<dyn ErrorInterceptor>]>,
}

impl Transport {
    pub(crate) fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
        user_agent: Option<String>,
        interceptors: Vec<Arc<dyn ErrorInterceptor>>,
    ) -> Result<Self, ClientError> {
        // Ensure base_url ends without a trailing slash
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let mut builder = ClientBuilder::new()
            .user_agent(user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            interceptors: interceptors.into(),
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Send a request and decode a JSON body, running every interceptor on failure
    pub(crate) async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let request = match request.build() {
            Ok(request) => request,
            Err(e) => {
                let error = ClientError::from(e);
                self.notify(None, None, &error);
                return Err(error);
            }
        };

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, path = url.path(), "Sending request");

        match self.send(request).await {
            Ok(value) => Ok(value),
            Err(error) => {
                self.notify(Some(&method), Some(&url), &error);
                Err(error)
            }
        }
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<T, ClientError> {
        let response = self.client.execute(request).await?;
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }

    fn notify(
        &self,
        method: Option<&reqwest::Method>,
        url: Option<&reqwest::Url>,
        error: &ClientError,
    ) {
        let failure = RequestFailure { method, url, error };
        debug!(path = failure.path(), %error, "Request failed");
        for interceptor in self.interceptors.iter() {
            interceptor.on_error(&failure);
        }
    }
}
