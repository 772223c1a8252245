//! Admin profile endpoint

use super::{AuthenticatedPortalClient, ClientError};
use portal_core::AdminProfile;
use reqwest::Method;

impl AuthenticatedPortalClient {
    /// Fetch the profile of the admin owning the access token
    pub async fn get_profile(&self) -> Result<AdminProfile, ClientError> {
        let request = self.request(Method::GET, "/users/profile");
        self.execute(request).await
    }
}
