//! CLI command implementations

pub mod config;
pub mod diag;
pub mod news;
pub mod states;

use anyhow::Result;

use crate::api::NewsClient;
use crate::config::Config;

/// Client for the backend picked by `--backend`, the environment or the config file
fn client(backend: Option<&str>) -> Result<NewsClient> {
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    config.client(backend)
}

/// Resolve a state name typed on the command line to its selector entry
fn resolve_state(name: &str) -> Result<&'static str> {
    crate::app_data::find_state(name).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown state: {}. Run `affairs states list` to see the supported names.",
            name.trim()
        )
    })
}
