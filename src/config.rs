//! Application configuration
//!
//! Loaded from a YAML file with environment-variable fallback for the API
//! key. Every field has a sensible default so a config file is optional.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted when the config carries no API key
pub const API_KEY_ENV: &str = "TUBEFEED_API_KEY";

/// Upstream cap on results per page
pub const MAX_PAGE_SIZE: u32 = 50;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the upstream video platform
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL for API requests
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Region code for popular listings
    #[serde(default = "default_region")]
    pub region: String,

    /// Results per page (upstream caps this at 50)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Directory for locally persisted data (watch history)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_region() -> String {
    "US".to_string()
}

fn default_page_size() -> u32 {
    12
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".tubefeed")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            region: default_region(),
            page_size: default_page_size(),
            data_dir: default_data_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file if given, otherwise defaults; the API key
    /// environment variable overrides either way
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde defaults cannot express
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)?;
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::config(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        Ok(())
    }

    /// The API key, or an error naming the missing field
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::missing_field("api_key"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "https://www.googleapis.com/youtube/v3");
        assert_eq!(config.region, "US");
        assert_eq!(config.page_size, 12);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_parse_yaml_with_defaults() {
        let config: AppConfig = serde_yaml::from_str("api_key: abc123\nregion: GB\n").unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.region, "GB");
        assert_eq!(config.page_size, 12);
    }

    #[test]
    fn test_require_api_key_missing() {
        let config = AppConfig::default();
        let err = config.require_api_key().unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }

    #[test]
    fn test_validate_page_size() {
        let config = AppConfig {
            page_size: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            page_size: 51,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            page_size: 50,
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_base_url() {
        let config = AppConfig {
            base_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
