//! Portal HTTP client
//!
//! Typed clients for the voucher portal API. Public endpoints (logins, token refresh)
//! go through [`client::PublicPortalClient`]; endpoints that need a bearer token go
//! through [`client::AuthenticatedPortalClient`].

pub mod client;

pub use client::{
    AuthenticatedPortalClient, ClientError, ErrorInterceptor, PublicPortalClient,
    RequestFailure, TypedClientBuilder,
};
