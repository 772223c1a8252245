//! Admin profile service

use crate::error::AuthError;
use crate::session::SessionManager;
use portal_core::AdminProfile;
use portal_http::PublicPortalClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProfileService {
    client: PublicPortalClient,
    session: Arc<SessionManager>,
}

impl ProfileService {
    pub fn new(client: PublicPortalClient, session: Arc<SessionManager>) -> Self {
        Self { client, session }
    }

    /// Fetch the profile using the stored access token
    pub async fn get_profile(&self) -> Result<AdminProfile, AuthError> {
        let token = self
            .session
            .access_token()
            .ok_or(AuthError::NotAuthenticated)?;
        let client = self.client.clone().authenticate(token);
        Ok(client.get_profile().await?)
    }
}
