//! Type-safe API clients that enforce authentication requirements at compile time

use super::{ClientError, ErrorInterceptor, Transport};
use reqwest::header;
use std::sync::Arc;
use std::time::Duration;

/// Client for public endpoints that don't require authentication
#[derive(Clone)]
pub struct PublicPortalClient {
    transport: Transport,
}

/// Client for endpoints that require a bearer access token
#[derive(Clone)]
pub struct AuthenticatedPortalClient {
    transport: Transport,
    access_token: String,
}

impl PublicPortalClient {
    /// Create a new public client
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        TypedClientBuilder::new().base_url(base_url).build_public()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Create a request builder without authentication
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.transport.request(method, path)
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        self.transport.execute(request).await
    }

    /// Attach an access token to get an authenticated client
    pub fn authenticate(self, access_token: impl Into<String>) -> AuthenticatedPortalClient {
        AuthenticatedPortalClient {
            transport: self.transport,
            access_token: access_token.into(),
        }
    }
}

impl AuthenticatedPortalClient {
    /// Create a new authenticated client
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, ClientError> {
        TypedClientBuilder::new()
            .base_url(base_url)
            .build_authenticated(access_token)
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Create a request builder carrying the bearer token
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.transport.request(method, path).header(
            header::AUTHORIZATION,
            format!("Bearer {}", self.access_token),
        )
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        self.transport.execute(request).await
    }

    /// Create a public client (useful for calling public endpoints)
    pub fn to_public(&self) -> PublicPortalClient {
        PublicPortalClient {
            transport: self.transport.clone(),
        }
    }
}

/// Type-safe builder that creates the appropriate client type
#[derive(Clone, Default)]
pub struct TypedClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    interceptors: Vec<Arc<dyn ErrorInterceptor>>,
}

impl TypedClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Register a hook that runs for every failed request
    pub fn interceptor(mut self, interceptor: Arc<dyn ErrorInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Build a public client
    pub fn build_public(self) -> Result<PublicPortalClient, ClientError> {
        Ok(PublicPortalClient {
            transport: self.transport()?,
        })
    }

    /// Build an authenticated client
    pub fn build_authenticated(
        self,
        access_token: impl Into<String>,
    ) -> Result<AuthenticatedPortalClient, ClientError> {
        Ok(AuthenticatedPortalClient {
            transport: self.transport()?,
            access_token: access_token.into(),
        })
    }

    fn transport(self) -> Result<Transport, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        Transport::new(base_url, self.timeout, self.user_agent, self.interceptors)
    }
}
