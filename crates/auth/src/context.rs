//! Services wired together once at start-up

use crate::error::AuthError;
use crate::relay::ErrorToastRelay;
use crate::services::{AuthService, CustomerAuthService, ProfileService};
use crate::session::SessionManager;
use crate::toast::ToastService;
use portal_core::{ApiConfig, FileStore, PortalConfig, SessionStore};
use portal_http::TypedClientBuilder;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Every shared service, constructed once and passed by reference
#[derive(Clone)]
pub struct PortalContext {
    pub session: Arc<SessionManager>,
    pub toasts: ToastService,
    pub auth: AuthService,
    pub customer_auth: CustomerAuthService,
    pub profile: ProfileService,
}

impl PortalContext {
    /// Build the context with the file-backed session store from `config`
    pub fn from_config(config: &PortalConfig) -> Result<Self, AuthError> {
        let path = config.session.resolved_path();
        debug!(path = %path.display(), "Using session file");
        let store = FileStore::open(path)?;
        Self::with_store(&config.api, Arc::new(store))
    }

    /// Build the context over any session store
    pub fn with_store(api: &ApiConfig, store: Arc<dyn SessionStore>) -> Result<Self, AuthError> {
        let session = Arc::new(SessionManager::load(store)?);
        let toasts = ToastService::new();

        let mut builder = TypedClientBuilder::new()
            .base_url(api.base_url.clone())
            .user_agent(api.user_agent.clone())
            .interceptor(Arc::new(ErrorToastRelay::new(toasts.clone())));
        if let Some(secs) = api.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build_public()?;

        Ok(Self {
            auth: AuthService::new(client.clone(), session.clone()),
            customer_auth: CustomerAuthService::new(client.clone(), session.clone()),
            profile: ProfileService::new(client, session.clone()),
            session,
            toasts,
        })
    }
}
