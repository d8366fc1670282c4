//! News feed commands

use anyhow::Result;
use chrono::Local;
use clap::Subcommand;
use serde::Serialize;

use super::{client, resolve_state};
use crate::api::{NewsClient, RefreshSummary, SearchParams};
use crate::app_data;
use crate::cli::output::{OutputFormat, print_formatted, wrap};
use crate::controller::{Completion, Edition, FetchRequest, Operation, Tab, ViewState};
use crate::state::perform;
use crate::view::{ArticleCard, Body, PageView, format_published};

#[derive(Subcommand, Debug)]
pub enum NewsCommands {
    /// Show global news
    Global,

    /// Show news about India
    India,

    /// Show news for one state
    State {
        /// State name (e.g., "Tamil Nadu")
        name: String,
    },

    /// Search all news by keyword
    Search {
        /// Search keywords
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Only articles about this state
        #[arg(long)]
        state: Option<String>,

        /// Only articles in this category (e.g., "economy")
        #[arg(long)]
        category: Option<String>,

        /// Most results to return
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Ask the backend to re-fetch its sources, then show global news
    Refresh,
}

/// What a news command prints
#[derive(Debug, Serialize)]
struct NewsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh: Option<RefreshSummary>,
    #[serde(flatten)]
    page: PageView,
}

pub async fn run(
    command: NewsCommands,
    format: OutputFormat,
    quiet: bool,
    backend: Option<&str>,
) -> Result<()> {
    let client = client(backend)?;
    let report = load(&client, command).await?;

    print_formatted(&report, format, |r| render(r, quiet));
    Ok(())
}

/// Run a command through the controller and build the resulting page
async fn load(client: &NewsClient, command: NewsCommands) -> Result<NewsReport> {
    let mut view = ViewState::new();
    let mut refresh = None;

    let request = match command {
        NewsCommands::Global => view.select_feed(Edition::Global),
        NewsCommands::India => view.select_feed(Edition::India),
        NewsCommands::State { name } => {
            let state = resolve_state(&name)?;
            view.select_state(state)
                .ok_or_else(|| anyhow::anyhow!("State name cannot be empty"))?
        }
        NewsCommands::Search {
            query,
            state,
            category,
            limit,
        } => {
            let params = search_params(query.join(" "), state, category, limit)?;
            view.search_with(params)
                .ok_or_else(|| anyhow::anyhow!("Search query cannot be empty"))?
        }
        NewsCommands::Refresh => {
            let summary = client.refresh().await.map_err(|e| {
                tracing::error!("Backend refresh failed: {}", e);
                anyhow::anyhow!(Operation::Refresh.failure_message())
            })?;
            refresh = Some(summary);
            view.initialize()
        }
    };

    run_request(client, &mut view, request).await?;

    Ok(NewsReport {
        refresh,
        page: PageView::build(&view),
    })
}

async fn run_request(client: &NewsClient, view: &mut ViewState, request: FetchRequest) -> Result<()> {
    let outcome = if view.tab == Tab::State {
        let (outcome, directory) = tokio::join!(perform(client, &request.kind), client.states());
        view.set_directory(directory);
        outcome
    } else {
        perform(client, &request.kind).await
    };

    match view.complete(request.generation, outcome) {
        Completion::Failed(message) => anyhow::bail!("{}", message),
        Completion::Loaded(count) => {
            tracing::debug!("Loaded {} articles", count);
            Ok(())
        }
        Completion::Stale => Ok(()),
    }
}

fn search_params(
    query: String,
    state: Option<String>,
    category: Option<String>,
    limit: Option<u32>,
) -> Result<SearchParams> {
    let state = state
        .as_deref()
        .map(resolve_state)
        .transpose()?
        .map(str::to_string);

    if let Some(category) = &category {
        if !app_data::is_known_category(category) {
            anyhow::bail!(
                "Unknown category: {}. Known categories: {}",
                category,
                app_data::region_data().categories.names.join(", ")
            );
        }
    }

    Ok(SearchParams {
        query,
        state,
        category,
        limit,
    })
}

fn render(report: &NewsReport, quiet: bool) -> String {
    let page = &report.page;
    let mut lines = Vec::new();

    if !quiet {
        if let Some(summary) = &report.refresh {
            lines.push(refresh_line(summary));
            lines.push(String::new());
        }
        lines.push(page.header.clone());
        lines.push(page.count_line.clone());
        if let Some(hint) = &page.district_hint {
            lines.push(format!("Districts: {}", hint));
        }
        lines.push(String::new());
    }

    match &page.body {
        Body::Cards(cards) => {
            for (index, card) in cards.iter().enumerate() {
                lines.push(render_card(index + 1, card));
            }
        }
        Body::Empty(notice) => {
            lines.push(notice.title.to_string());
            lines.push(notice.message.clone());
        }
        Body::Loading | Body::Blank => {}
    }

    lines.join("\n").trim_end().to_string()
}

fn refresh_line(summary: &RefreshSummary) -> String {
    let mut line = summary
        .message
        .clone()
        .unwrap_or_else(|| "News refreshed".to_string());
    if let (Some(global), Some(india)) = (summary.global_count, summary.india_count) {
        line.push_str(&format!(" ({} global, {} India)", global, india));
    }
    if let Some(updated) = &summary.last_updated {
        line.push_str(&format!(", last updated {}", format_published(updated, &Local)));
    }
    line
}

fn render_card(number: usize, card: &ArticleCard) -> String {
    let mut tags: Vec<&str> = Vec::new();
    if let Some(category) = &card.category {
        tags.push(&category.label);
    }
    tags.extend(card.state.as_deref());
    tags.extend(card.district.as_deref());

    let mut title = format!("{:>3}. ", number);
    for tag in &tags {
        title.push_str(&format!("[{}] ", tag));
    }
    title.push_str(&card.title);

    let mut lines = vec![title];
    if let Some(summary) = &card.summary {
        lines.push(wrap(summary, 76, 5));
    }

    let mut meta = format!("     {} · {}", card.source, card.published);
    if card.global {
        meta.push_str(" · Global");
    }
    lines.push(meta);

    if let Some(url) = &card.url {
        lines.push(format!("     {}", url));
    }
    lines.push(String::new());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::serve;
    use axum::Json;
    use axum::Router;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::time::Duration;

    fn article(title: &str, state: Option<&str>) -> Value {
        json!({
            "title": title,
            "summary": format!("About {}", title),
            "category": "economy",
            "state": state,
            "source": "The Hindu",
            "published_at": "2024-03-05T10:30:00Z",
            "url": "https://example.com/a"
        })
    }

    fn backend() -> Router {
        Router::new()
            .route(
                "/api/news/global",
                get(|| async { Json(json!({ "news": [article("World", None)] })) }),
            )
            .route(
                "/api/news/india",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            )
            .route(
                "/api/news/state/{slug}",
                get(|Path(slug): Path<String>| async move {
                    let name = if slug == "tamil-nadu" { "Tamil Nadu" } else { "Other" };
                    Json(json!({ "news": [article("Harbour", Some(name))] }))
                }),
            )
            .route(
                "/api/news/search",
                get(|Query(query): Query<HashMap<String, String>>| async move {
                    let hits = if query.get("q").map(String::as_str) == Some("NEET exam")
                        && query.get("category").map(String::as_str) == Some("education")
                    {
                        vec![article("NEET results", None)]
                    } else {
                        vec![]
                    };
                    Json(json!({ "news": hits }))
                }),
            )
            .route(
                "/api/states",
                get(|| async { Json(json!({ "states": { "Tamil Nadu": ["Chennai", "Madurai"] } })) }),
            )
            .route(
                "/api/news/refresh",
                post(|| async {
                    Json(json!({ "message": "News refreshed", "global_count": 4, "india_count": 7 }))
                }),
            )
    }

    async fn client() -> NewsClient {
        let origin = serve(backend()).await;
        NewsClient::new(&origin, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_state_page_includes_districts() {
        let client = client().await;
        let report = load(&client, NewsCommands::State { name: "tamil nadu".to_string() })
            .await
            .unwrap();

        assert_eq!(report.page.header, "Tamil Nadu News");
        assert_eq!(report.page.district_hint.as_deref(), Some("Chennai, Madurai"));
        match &report.page.body {
            Body::Cards(cards) => assert_eq!(cards[0].state.as_deref(), Some("Tamil Nadu")),
            other => panic!("expected cards, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_state_is_rejected() {
        let client = client().await;
        let err = load(&client, NewsCommands::State { name: "Atlantis".to_string() })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unknown state: Atlantis"));
    }

    #[tokio::test]
    async fn test_failed_feed_reports_fetch_message() {
        let client = client().await;
        let err = load(&client, NewsCommands::India).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch news. Please try again.");
    }

    #[tokio::test]
    async fn test_search_sends_filters() {
        let client = client().await;
        let command = NewsCommands::Search {
            query: vec!["NEET".to_string(), "exam".to_string()],
            state: None,
            category: Some("Education".to_string()),
            limit: Some(5),
        };
        let report = load(&client, command).await.unwrap();

        assert_eq!(report.page.header, "Search Results for \"NEET exam\"");
        assert_eq!(report.page.count_line, "1 articles found");
    }

    #[tokio::test]
    async fn test_empty_search_shows_notice() {
        let client = client().await;
        let command = NewsCommands::Search {
            query: vec!["nothing".to_string()],
            state: None,
            category: None,
            limit: None,
        };
        let report = load(&client, command).await.unwrap();
        let text = render(&report, false);

        assert!(text.contains("No news articles found"));
        assert!(text.contains("No articles found for \"nothing\". Try different keywords."));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = search_params("x".to_string(), None, Some("gossip".to_string()), None)
            .unwrap_err();
        assert!(err.to_string().starts_with("Unknown category: gossip"));
    }

    #[tokio::test]
    async fn test_refresh_prints_summary_then_global_feed() {
        let client = client().await;
        let report = load(&client, NewsCommands::Refresh).await.unwrap();
        let text = render(&report, false);

        assert!(text.starts_with("News refreshed (4 global, 7 India)"));
        assert!(text.contains("Global News"));
        assert!(text.contains("  1. [Economy] World"));
        assert!(text.contains("     The Hindu · "));

        let quiet = render(&report, true);
        assert!(quiet.starts_with("  1. [Economy] World"));
    }
}
