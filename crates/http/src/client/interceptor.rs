//! Hook invoked for every failed request
//!
//! Interceptors observe failures; they cannot change them. The error is still
//! returned to the caller after every interceptor has run.

use super::ClientError;
use reqwest::{Method, Url};

/// A request that did not produce a usable response
#[derive(Debug)]
pub struct RequestFailure<'a> {
    /// Missing when the request could not even be built
    pub method: Option<&'a Method>,
    pub url: Option<&'a Url>,
    pub error: &'a ClientError,
}

impl RequestFailure<'_> {
    /// URL path of the failed request, or an empty string
    pub fn path(&self) -> &str {
        self.url.map(Url::path).unwrap_or_default()
    }
}

pub trait ErrorInterceptor: Send + Sync {
    fn on_error(&self, failure: &RequestFailure<'_>);
}

impl<F> ErrorInterceptor for F
where
    F: Fn(&RequestFailure<'_>) + Send + Sync,
{
    fn on_error(&self, failure: &RequestFailure<'_>) {
        self(failure);
    }
}
