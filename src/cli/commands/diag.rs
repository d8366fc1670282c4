//! Diagnostic and debugging commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use super::client;
use crate::api::NewsClient;
use crate::cli::output::{OutputFormat, print_formatted, status_line};
use crate::cli::shell::history_path;
use crate::config::{BACKEND_URL_ENV, Config};

#[derive(Subcommand, Debug)]
pub enum DiagCommands {
    /// Show config and shell history paths
    Paths,

    /// Check that the backend answers
    Check,
}

#[derive(Serialize)]
struct PathsResult {
    config_file: String,
    shell_history: String,
    backend: String,
    backend_from_env: bool,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    backend: String,
    config_exists: bool,
    api_reachable: bool,
    api_version: Option<String>,
    states_loaded: usize,
    global_articles: Option<usize>,
}

pub async fn run(command: DiagCommands, format: OutputFormat, backend: Option<&str>) -> Result<()> {
    match command {
        DiagCommands::Paths => paths(format, backend),
        DiagCommands::Check => check(format, backend).await,
    }
}

fn paths(format: OutputFormat, backend: Option<&str>) -> Result<()> {
    let config = Config::load().unwrap_or_default();

    let result = PathsResult {
        config_file: Config::config_path()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|_| "<error>".to_string()),
        shell_history: history_path()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| "<error>".to_string()),
        backend: config.backend_url(backend),
        backend_from_env: backend.is_none() && std::env::var_os(BACKEND_URL_ENV).is_some(),
    };

    print_formatted(&result, format, |r| {
        let source = if r.backend_from_env {
            format!(" (from {})", BACKEND_URL_ENV)
        } else {
            String::new()
        };
        [
            format!("Config file:    {}", r.config_file),
            format!("Shell history:  {}", r.shell_history),
            format!("Backend:        {}{}", r.backend, source),
        ]
        .join("\n")
    });

    Ok(())
}

async fn check(format: OutputFormat, backend: Option<&str>) -> Result<()> {
    let config_exists = Config::config_path().is_ok_and(|p| p.exists());
    let client = client(backend)?;
    let result = probe(&client, config_exists).await;

    print_formatted(&result, format, |r| {
        let version = r
            .api_version
            .as_deref()
            .map(|v| format!(" (version {})", v))
            .unwrap_or_default();
        let articles = match r.global_articles {
            Some(count) => format!("Global feed readable ({} articles)", count),
            None => "Global feed readable".to_string(),
        };

        [
            format!("Backend: {}", r.backend),
            status_line(r.config_exists, "Config file exists"),
            status_line(r.api_reachable, &format!("API reachable{}", version)),
            status_line(
                r.states_loaded > 0,
                &format!("State directory loaded ({} states)", r.states_loaded),
            ),
            status_line(r.global_articles.is_some(), &articles),
        ]
        .join("\n")
    });

    Ok(())
}

async fn probe(client: &NewsClient, config_exists: bool) -> CheckResult {
    let (status, states, global) =
        tokio::join!(client.status(), client.states(), client.global_news());

    let api_version = match &status {
        Ok(status) => status.version.clone(),
        Err(e) => {
            tracing::warn!("API status check failed: {}", e);
            None
        }
    };

    CheckResult {
        backend: client.origin().to_string(),
        config_exists,
        api_reachable: status.is_ok(),
        api_version,
        states_loaded: states.map(|s| s.len()).unwrap_or(0),
        global_articles: global.ok().map(|news| news.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::serve;
    use axum::Json;
    use axum::Router;
    use axum::routing::get;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_probe_reports_backend_health() {
        let router = Router::new()
            .route(
                "/api/",
                get(|| async { Json(json!({ "message": "Current Affairs API", "version": "1.0.0" })) }),
            )
            .route(
                "/api/states",
                get(|| async { Json(json!({ "states": { "Goa": ["Panaji"], "Kerala": [] } })) }),
            )
            .route("/api/news/global", get(|| async { Json(json!({ "news": [] })) }));
        let origin = serve(router).await;
        let client = NewsClient::new(&origin, Duration::from_secs(5)).unwrap();

        let result = probe(&client, false).await;
        assert!(result.api_reachable);
        assert_eq!(result.api_version.as_deref(), Some("1.0.0"));
        assert_eq!(result.states_loaded, 2);
        assert_eq!(result.global_articles, Some(0));
    }

    #[tokio::test]
    async fn test_probe_against_dead_backend() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let origin = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);
        let client = NewsClient::new(&origin, Duration::from_secs(2)).unwrap();

        let result = probe(&client, true).await;
        assert!(!result.api_reachable);
        assert_eq!(result.states_loaded, 0);
        assert_eq!(result.global_articles, None);
    }
}
