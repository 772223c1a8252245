//! Portal client configuration

use crate::error::CoreResult;
use crate::validation::{ValidateConfig, validators};
use config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `PORTAL__API__BASE_URL`
pub const ENV_PREFIX: &str = "PORTAL";

/// Main client configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortalConfig {
    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Session storage configuration
    #[serde(default)]
    pub session: SessionConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,

    /// Request timeout in seconds; the transport default applies when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User agent sent with every request
    pub user_agent: String,
}

/// Session storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    /// Path of the session file; defaults to `<data dir>/portal/session.json`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: None,
            user_agent: concat!("portal-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl SessionConfig {
    /// Session file location with the platform default applied
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_session_path)
    }
}

/// Default session file location
pub fn default_session_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("portal")
        .join("session.json")
}

impl PortalConfig {
    /// Load configuration from defaults, an optional file and `PORTAL__*` environment
    /// variables, in increasing order of precedence
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a value has the wrong type, or
    /// the merged configuration fails validation
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let defaults = ApiConfig::default();

        let mut builder = config::Config::builder()
            .set_default("api.base_url", defaults.base_url)?
            .set_default("api.user_agent", defaults.user_agent)?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl ValidateConfig for PortalConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        validators::validate_url(&self.api.base_url, "api.base_url")?;
        validators::validate_not_empty(&self.api.user_agent, "api.user_agent")?;
        if let Some(timeout) = self.api.timeout_secs {
            validators::validate_range(timeout, 1, 600, "api.timeout_secs")?;
        }
        Ok(())
    }
}
