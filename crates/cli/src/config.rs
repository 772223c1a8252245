//! CLI configuration utilities

use anyhow::{Context, Result};
use portal_core::PortalConfig;
use portal_core::validation::ValidateConfig;
use std::path::{Path, PathBuf};

/// Load the configuration, applying a command-line timeout on top
pub fn load_config(path: Option<&Path>, timeout: Option<u64>) -> Result<PortalConfig> {
    let mut config = PortalConfig::load(path).context("Failed to load configuration")?;
    if timeout.is_some() {
        config.api.timeout_secs = timeout;
        config.validate().context("Invalid --timeout")?;
    }
    Ok(config)
}

/// Save configuration to a JSON file
pub fn save_config<P: AsRef<Path>>(config: &PortalConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Generate a default configuration file
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    save_config(&PortalConfig::default(), path)
}

/// Where `config generate` writes when no output is given
pub fn default_config_path() -> PathBuf {
    PortalConfig::default()
        .session
        .resolved_path()
        .with_file_name("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn generated_config_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        generate_default_config(&path).unwrap();
        let loaded = load_config(Some(&path), None).unwrap();

        assert_eq!(loaded, PortalConfig::default());
    }

    #[test]
    fn timeout_flag_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = PortalConfig::default();
        config.api.timeout_secs = Some(30);
        save_config(&config, &path).unwrap();

        assert_eq!(
            load_config(Some(&path), Some(5)).unwrap().api.timeout_secs,
            Some(5)
        );
        assert_eq!(
            load_config(Some(&path), None).unwrap().api.timeout_secs,
            Some(30)
        );
    }

    #[test]
    fn timeout_flag_is_range_checked() {
        assert!(load_config(None, Some(0)).is_err());
        assert!(load_config(None, Some(601)).is_err());
        assert_eq!(
            load_config(None, Some(600)).unwrap().api.timeout_secs,
            Some(600)
        );
    }
}
