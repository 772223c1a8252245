//! Admin authentication service

use crate::error::AuthError;
use crate::session::SessionManager;
use portal_core::credentials::validate_admin_credentials;
use portal_core::{AuthResponse, LoginCredentials, RefreshResult};
use portal_http::PublicPortalClient;
use std::sync::Arc;
use tracing::{info, instrument};

/// Admin login, token refresh and logout
#[derive(Clone)]
pub struct AuthService {
    client: PublicPortalClient,
    session: Arc<SessionManager>,
}

impl AuthService {
    pub fn new(client: PublicPortalClient, session: Arc<SessionManager>) -> Self {
        Self { client, session }
    }

    /// Log in and store the returned token pair
    ///
    /// Storage is only touched after a successful response.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, AuthError> {
        validate_admin_credentials(credentials)?;
        let tokens = self.client.obtain_token(credentials).await?;
        self.session.store_admin_tokens(&tokens)?;
        info!("Admin login succeeded");
        Ok(tokens)
    }

    /// Exchange `refresh` for a new access token; nothing is stored
    pub async fn refresh_token(&self, refresh: &str) -> Result<RefreshResult, AuthError> {
        Ok(self.client.refresh_token(refresh).await?)
    }

    /// Refresh with the stored refresh token and store the new access token
    pub async fn refresh_session(&self) -> Result<RefreshResult, AuthError> {
        let refresh = self
            .session
            .refresh_token()
            .ok_or(AuthError::NotAuthenticated)?;
        let result = self.refresh_token(&refresh).await?;
        self.session.store_access_token(&result.access)?;
        info!("Access token refreshed");
        Ok(result)
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        Ok(self.session.logout()?)
    }

    /// Current access token, if any
    pub fn token(&self) -> Option<String> {
        self.session.access_token()
    }
}
