//! Admin token endpoints

use super::{ClientError, PublicPortalClient};
use portal_core::{AuthResponse, LoginCredentials, RefreshBody, RefreshResult};
use reqwest::Method;

impl PublicPortalClient {
    /// Exchange admin credentials for an access/refresh token pair
    pub async fn obtain_token(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthResponse, ClientError> {
        let request = self.request(Method::POST, "/users/token").json(credentials);
        self.execute(request).await
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh_token(&self, refresh: &str) -> Result<RefreshResult, ClientError> {
        let request = self
            .request(Method::POST, "/users/token/refresh")
            .json(&RefreshBody {
                refresh: refresh.to_string(),
            });
        self.execute(request).await
    }
}
