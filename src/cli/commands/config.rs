//! Configuration management commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::api::NewsClient;
use crate::cli::output::{OutputFormat, print_formatted, print_success};
use crate::config::Config;
use crate::ui::theme::ThemePreset;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a specific config value
    Get {
        /// Config key (e.g., "backend.url", "appearance.theme")
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., "backend.url", "appearance.theme")
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub async fn run(command: ConfigCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format),
        ConfigCommands::Get { key } => get(&key, format),
        ConfigCommands::Set { key, value } => set(&key, &value, quiet),
        ConfigCommands::Path => path(format),
    }
}

fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => println!("{}", toml::to_string_pretty(&config)?),
    }

    Ok(())
}

fn get(key: &str, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let value = get_config_value(&config, key)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&value)?),
        OutputFormat::Text => println!("{}", value),
    }

    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["backend", "url"] => Ok(config.backend.url.clone()),
        ["backend", "timeout_secs"] => Ok(config.backend.timeout_secs.to_string()),
        ["appearance", "theme"] => Ok(theme_key(config.appearance.theme).to_string()),
        ["appearance", "max_columns"] => Ok(config.appearance.max_columns.to_string()),
        _ => anyhow::bail!("Unknown config key: {}", key),
    }
}

fn theme_key(preset: ThemePreset) -> &'static str {
    match preset {
        ThemePreset::Indigo => "indigo",
        ThemePreset::Slate => "slate",
        ThemePreset::Saffron => "saffron",
    }
}

fn set(key: &str, value: &str, quiet: bool) -> Result<()> {
    let mut config = Config::load()?;

    set_config_value(&mut config, key, value)?;
    config.save()?;

    print_success(&format!("Set {} = {}", key, value), quiet);
    Ok(())
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["backend", "url"] => {
            // Reject origins the client would refuse at startup
            NewsClient::new(value, std::time::Duration::from_secs(1))?;
            config.backend.url = value.trim().to_string();
        }
        ["backend", "timeout_secs"] => {
            let secs: u64 = value.parse()?;
            if secs == 0 {
                anyhow::bail!("backend.timeout_secs must be at least 1");
            }
            config.backend.timeout_secs = secs;
        }
        ["appearance", "theme"] => {
            config.appearance.theme = ThemePreset::from_key(value).ok_or_else(|| {
                anyhow::anyhow!("Unknown theme: {} (expected indigo, slate or saffron)", value)
            })?;
        }
        ["appearance", "max_columns"] => {
            let columns: u8 = value.parse()?;
            if !(1..=6).contains(&columns) {
                anyhow::bail!("appearance.max_columns must be between 1 and 6");
            }
            config.appearance.max_columns = columns;
        }
        _ => anyhow::bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;
    let exists = path.exists();

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists,
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_known_keys() {
        let config = Config::default();
        assert_eq!(get_config_value(&config, "backend.url").unwrap(), "http://localhost:8001");
        assert_eq!(get_config_value(&config, "backend.timeout_secs").unwrap(), "30");
        assert_eq!(get_config_value(&config, "appearance.theme").unwrap(), "indigo");
        assert_eq!(get_config_value(&config, "appearance.max_columns").unwrap(), "3");
        assert!(get_config_value(&config, "backend").is_err());
    }

    #[test]
    fn test_set_validates_values() {
        let mut config = Config::default();

        set_config_value(&mut config, "appearance.theme", "Slate").unwrap();
        assert_eq!(config.appearance.theme, ThemePreset::Slate);

        set_config_value(&mut config, "backend.url", " https://news.example.org ").unwrap();
        assert_eq!(config.backend.url, "https://news.example.org");

        assert!(set_config_value(&mut config, "backend.url", "ftp://news.example.org").is_err());
        assert!(set_config_value(&mut config, "backend.timeout_secs", "0").is_err());
        assert!(set_config_value(&mut config, "appearance.max_columns", "9").is_err());
        assert!(set_config_value(&mut config, "appearance.theme", "neon").is_err());
        assert!(set_config_value(&mut config, "window.width", "10").is_err());

        assert_eq!(config.backend.url, "https://news.example.org");
        assert_eq!(config.backend.timeout_secs, 30);
    }
}
