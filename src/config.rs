use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::NewsClient;
use crate::ui::theme::ThemePreset;

/// Environment variable that overrides the configured backend origin
pub const BACKEND_URL_ENV: &str = "AFFAIRS_BACKEND_URL";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub appearance: AppearanceConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Origin of the news backend; API paths are appended as `/api/...`
    #[serde(default = "default_backend_url")]
    pub url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Window appearance settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppearanceConfig {
    /// Color theme preset
    #[serde(default)]
    pub theme: ThemePreset,
    /// Most card columns the feed grid may use
    #[serde(default = "default_max_columns")]
    pub max_columns: u8,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: ThemePreset::default(),
            max_columns: default_max_columns(),
        }
    }
}

fn default_max_columns() -> u8 {
    3
}

/// Pick the backend origin: flag, then environment, then config file
pub fn resolve_backend_url(flag: Option<&str>, env: Option<&str>, configured: &str) -> String {
    [flag, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(configured)
        .to_string()
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "affairs", "Affairs")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Backend origin after applying the flag and `AFFAIRS_BACKEND_URL`
    pub fn backend_url(&self, flag: Option<&str>) -> String {
        let env = std::env::var(BACKEND_URL_ENV).ok();
        resolve_backend_url(flag, env.as_deref(), &self.backend.url)
    }

    /// Build an API client for the resolved backend
    pub fn client(&self, flag: Option<&str>) -> Result<NewsClient> {
        let origin = self.backend_url(flag);
        let timeout = Duration::from_secs(self.backend.timeout_secs.max(1));
        let client = NewsClient::new(&origin, timeout)?;
        tracing::debug!("Using backend {}", client.origin());
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config: Config = toml::from_str("[backend]\nurl = \"http://news.local\"\n").unwrap();
        assert_eq!(config.backend.url, "http://news.local");
        assert_eq!(config.backend.timeout_secs, 30);
        assert_eq!(config.appearance.theme, ThemePreset::Indigo);
        assert_eq!(config.appearance.max_columns, 3);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.appearance.theme = ThemePreset::Slate;
        config.backend.timeout_secs = 5;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.appearance.theme, ThemePreset::Slate);
        assert_eq!(loaded.backend.timeout_secs, 5);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.backend.url, "http://localhost:8001");
    }

    #[test]
    fn test_backend_url_precedence() {
        let configured = "http://localhost:8001";
        assert_eq!(
            resolve_backend_url(Some("http://flag"), Some("http://env"), configured),
            "http://flag"
        );
        assert_eq!(resolve_backend_url(None, Some("http://env"), configured), "http://env");
        assert_eq!(resolve_backend_url(None, Some("  "), configured), configured);
        assert_eq!(resolve_backend_url(None, None, configured), configured);
    }
}
