//! Configuration management for ClientDesk.
//!
//! Settings are read from a TOML file in the platform config directory.
//! The backend base URL may also come from the `API_BASE_URL` environment
//! variable or the command line.

mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use settings::Settings;

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Name of the application's config directory.
const APP_DIR: &str = "clientdesk";

/// Name of the config file.
const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    ReadError(std::io::Error),

    /// The config file is not valid TOML for our schema.
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A value failed validation.
    #[error("invalid configuration: {0}")]
    ValidationError(String),

    /// No base URL was supplied anywhere.
    #[error("no API base URL configured (set API_BASE_URL, pass --api-base-url, or add api_base_url to the config file)")]
    MissingBaseUrl,
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The full configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Application settings.
    pub settings: Settings,
}

impl Config {
    /// The default config file path.
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the configuration from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load the configuration from a file.
    ///
    /// A missing file yields the default configuration.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;

        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.settings.api_base_url {
            validate_base_url(url)?;
        }

        if self.settings.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve the backend base URL.
    ///
    /// The command-line value wins, then `API_BASE_URL`, then the config
    /// file.
    pub fn resolve_base_url(&self, cli_value: Option<&str>) -> Result<String> {
        let env_value = std::env::var(BASE_URL_ENV).ok();

        let url = cli_value
            .map(str::to_string)
            .or(env_value)
            .or_else(|| self.settings.api_base_url.clone())
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;

        validate_base_url(&url)?;
        Ok(url)
    }
}

fn validate_base_url(url: &str) -> Result<()> {
    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(ConfigError::ValidationError(format!(
            "API base URL '{}' must start with http:// or https://",
            url
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Section;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_gives_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_settings_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[settings]\napi_base_url = \"https://api.example.com\"\ndefault_section = \"info\"\n",
        )
        .unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(
            loaded.settings.api_base_url.as_deref(),
            Some("https://api.example.com")
        );
        assert_eq!(loaded.settings.default_section, Section::Info);
        assert_eq!(loaded.settings.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "settings = [not valid").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_rejects_bad_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[settings]\napi_base_url = \"ftp://x\"\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.settings.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_resolve_prefers_cli() {
        std::env::set_var(BASE_URL_ENV, "https://env.example.com");
        let mut config = Config::default();
        config.settings.api_base_url = Some("https://file.example.com".to_string());

        let url = config.resolve_base_url(Some("https://cli.example.com")).unwrap();
        assert_eq!(url, "https://cli.example.com");
        std::env::remove_var(BASE_URL_ENV);
    }

    #[test]
    #[serial]
    fn test_resolve_env_over_file() {
        std::env::set_var(BASE_URL_ENV, "https://env.example.com");
        let mut config = Config::default();
        config.settings.api_base_url = Some("https://file.example.com".to_string());

        let url = config.resolve_base_url(None).unwrap();
        assert_eq!(url, "https://env.example.com");
        std::env::remove_var(BASE_URL_ENV);
    }

    #[test]
    #[serial]
    fn test_resolve_falls_back_to_file() {
        std::env::remove_var(BASE_URL_ENV);
        let mut config = Config::default();
        config.settings.api_base_url = Some("http://localhost:3000".to_string());

        let url = config.resolve_base_url(None).unwrap();
        assert_eq!(url, "http://localhost:3000");
    }

    #[test]
    #[serial]
    fn test_resolve_missing() {
        std::env::remove_var(BASE_URL_ENV);
        let config = Config::default();
        assert!(matches!(
            config.resolve_base_url(None),
            Err(ConfigError::MissingBaseUrl)
        ));
    }
}
