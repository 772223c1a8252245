//! Customer voucher authentication service

use crate::error::AuthError;
use crate::session::SessionManager;
use portal_core::{CustomerAuthResponse, CustomerPin};
use portal_http::PublicPortalClient;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct CustomerAuthService {
    client: PublicPortalClient,
    session: Arc<SessionManager>,
}

impl CustomerAuthService {
    pub fn new(client: PublicPortalClient, session: Arc<SessionManager>) -> Self {
        Self { client, session }
    }

    /// Log in with a checked PIN and store the access token and its lifetime
    #[instrument(skip_all)]
    pub async fn login(&self, pin: &CustomerPin) -> Result<CustomerAuthResponse, AuthError> {
        let response = self.client.customer_login(pin).await?;
        self.session.store_customer_tokens(&response)?;
        info!(expires_in = response.expires_in, "Customer login succeeded");
        Ok(response)
    }
}
