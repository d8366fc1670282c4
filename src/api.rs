//! REST client for the Current Affairs backend.
//!
//! This module provides:
//!
//! - `NewsClient`: HTTP client wrapper bound to one backend origin
//! - `Article` and `StateDirectory`: Deserialized API responses
//! - `state_slug`: The state name to URL slug transform the backend expects
//!
//! Every endpoint lives under `{origin}/api/`. Feed endpoints answer with
//! `{ "news": [...] }`; a missing or null `news` field is an empty feed.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// User agent for API requests
const USER_AGENT: &str = concat!("Affairs/", env!("CARGO_PKG_VERSION"));

/// Errors from talking to the backend
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid backend origin '{origin}': {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A news article as served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    pub source: String,
    #[serde(default)]
    pub is_global: bool,
    pub published_at: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Reference mapping of Indian states to their districts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateDirectory(BTreeMap<String, Vec<String>>);

impl StateDirectory {
    /// Districts listed for a state, if the state is known
    pub fn districts(&self, state: &str) -> Option<&[String]> {
        self.0.get(state).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for StateDirectory {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Keyword search with the backend's optional filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    /// State display name; sent as a slug
    pub state: Option<String>,
    pub category: Option<String>,
    pub limit: Option<u32>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("q", self.query.clone())];
        if let Some(state) = &self.state {
            pairs.push(("state", state_slug(state)));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.to_lowercase()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// Summary returned by `POST /api/news/refresh`.
///
/// Every field is optional: the body is informational only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshSummary {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub global_count: Option<u64>,
    #[serde(default)]
    pub india_count: Option<u64>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Response of `GET /api/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<String>,
}

#[derive(Deserialize)]
struct NewsEnvelope {
    #[serde(default)]
    news: Option<Vec<Article>>,
}

#[derive(Deserialize)]
struct StatesEnvelope {
    #[serde(default)]
    states: StateDirectory,
}

/// Turn a state display name into the backend's path slug.
///
/// Lowercases and replaces each space with a hyphen: `Tamil Nadu` becomes
/// `tamil-nadu`. The backend reverses this with `replace("-", " ")` and title
/// casing, so nothing else is touched.
pub fn state_slug(state: &str) -> String {
    state.to_lowercase().replace(' ', "-")
}

/// Client for the Current Affairs REST API
#[derive(Clone)]
pub struct NewsClient {
    client: reqwest::Client,
    origin: Url,
}

impl NewsClient {
    /// Create a client for the backend at `origin` (e.g. `http://localhost:8001`)
    pub fn new(origin: &str, timeout: Duration) -> Result<Self, ApiError> {
        let invalid = |reason: String| ApiError::InvalidOrigin {
            origin: origin.to_string(),
            reason,
        };

        let parsed = Url::parse(origin.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }
        if parsed.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            origin: parsed,
        })
    }

    /// The origin all API paths are resolved against
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Build `{origin}/api/{segments...}`, percent-encoding each segment
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.origin.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Checked in new(): the origin can be a base
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("api").extend(segments);
        }
        url
    }

    async fn read_body(&self, request: reqwest::RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        tracing::debug!("GET {}", url);
        let body = self.read_body(self.client.get(url).query(query)).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get_news(&self, url: Url, query: &[(&str, String)]) -> Result<Vec<Article>, ApiError> {
        let start = std::time::Instant::now();
        let envelope: NewsEnvelope = self.get_json(url.clone(), query).await?;
        let news = envelope.news.unwrap_or_default();
        tracing::info!(
            "Fetched {} articles from {} in {:.1}s",
            news.len(),
            url.path(),
            start.elapsed().as_secs_f32()
        );
        Ok(news)
    }

    /// `GET /api/news/global`
    pub async fn global_news(&self) -> Result<Vec<Article>, ApiError> {
        self.get_news(self.endpoint(&["news", "global"]), &[]).await
    }

    /// `GET /api/news/india`
    pub async fn india_news(&self) -> Result<Vec<Article>, ApiError> {
        self.get_news(self.endpoint(&["news", "india"]), &[]).await
    }

    /// `GET /api/news/state/{slug}`
    pub async fn state_news(&self, state: &str) -> Result<Vec<Article>, ApiError> {
        let slug = state_slug(state);
        self.get_news(self.endpoint(&["news", "state", &slug]), &[]).await
    }

    /// `GET /api/news/search?q=...`
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Article>, ApiError> {
        self.get_news(self.endpoint(&["news", "search"]), &params.to_pairs())
            .await
    }

    /// `GET /api/states`
    pub async fn states(&self) -> Result<StateDirectory, ApiError> {
        let envelope: StatesEnvelope = self.get_json(self.endpoint(&["states"]), &[]).await?;
        tracing::info!("Loaded {} states from directory", envelope.states.len());
        Ok(envelope.states)
    }

    /// `POST /api/news/refresh`
    ///
    /// Only the status decides success. A body that does not decode yields an
    /// empty summary.
    pub async fn refresh(&self) -> Result<RefreshSummary, ApiError> {
        let url = self.endpoint(&["news", "refresh"]);
        tracing::debug!("POST {}", url);
        let start = std::time::Instant::now();
        let body = self.read_body(self.client.post(url)).await?;
        tracing::info!(
            "Backend refresh finished in {:.1}s",
            start.elapsed().as_secs_f32()
        );
        Ok(serde_json::from_slice(&body).unwrap_or_default())
    }

    /// `GET /api/`
    pub async fn status(&self) -> Result<ApiStatus, ApiError> {
        self.get_json(self.endpoint(&[""]), &[]).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::Router;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    /// Serve `router` on an ephemeral local port and return its origin
    pub(crate) async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(origin: &str) -> NewsClient {
        NewsClient::new(origin, Duration::from_secs(5)).unwrap()
    }

    fn article_json(title: &str) -> serde_json::Value {
        serde_json::json!({
            "id": title.to_lowercase(),
            "title": title,
            "source": "NDTV",
            "published_at": "2024-01-01T00:00:00",
            "scraped_at": "2024-01-01T00:00:00",
            "content": null
        })
    }

    #[test]
    fn test_state_slug() {
        assert_eq!(state_slug("Tamil Nadu"), "tamil-nadu");
        assert_eq!(state_slug("Jammu and Kashmir"), "jammu-and-kashmir");
        assert_eq!(state_slug("Kerala"), "kerala");
    }

    #[test]
    fn test_endpoint_joins_under_api() {
        let client = client("http://localhost:8001");
        assert_eq!(
            client.endpoint(&["news", "state", "tamil-nadu"]).as_str(),
            "http://localhost:8001/api/news/state/tamil-nadu"
        );

        let prefixed = self::client("https://example.com/hub/");
        assert_eq!(
            prefixed.endpoint(&["states"]).as_str(),
            "https://example.com/hub/api/states"
        );
        assert_eq!(prefixed.endpoint(&[""]).as_str(), "https://example.com/hub/api/");
    }

    #[test]
    fn test_rejects_bad_origin() {
        assert!(matches!(
            NewsClient::new("not a url", Duration::from_secs(1)),
            Err(ApiError::InvalidOrigin { .. })
        ));
        assert!(matches!(
            NewsClient::new("ftp://example.com", Duration::from_secs(1)),
            Err(ApiError::InvalidOrigin { .. })
        ));
    }

    #[test]
    fn test_article_optional_fields() {
        let article: Article = serde_json::from_str(
            r#"{"title": "A", "source": "X", "published_at": "2024-01-01T00:00:00Z", "summary": null}"#,
        )
        .unwrap();
        assert_eq!(article.title, "A");
        assert!(article.id.is_none());
        assert!(article.summary.is_none());
        assert!(!article.is_global);
    }

    #[tokio::test]
    async fn test_state_news_uses_slug_path() {
        let router = Router::new().route(
            "/api/news/state/{slug}",
            get(|Path(slug): Path<String>| async move {
                if slug == "tamil-nadu" {
                    axum::Json(serde_json::json!({ "news": [article_json("Chennai rains")] }))
                } else {
                    axum::Json(serde_json::json!({ "news": [] }))
                }
            }),
        );
        let origin = serve(router).await;

        let news = client(&origin).state_news("Tamil Nadu").await.unwrap();
        assert_eq!(news.len(), 1);
        assert_eq!(news[0].title, "Chennai rains");
    }

    #[tokio::test]
    async fn test_missing_news_field_is_empty() {
        let router = Router::new()
            .route("/api/news/global", get(|| async { axum::Json(serde_json::json!({})) }))
            .route(
                "/api/news/india",
                get(|| async { axum::Json(serde_json::json!({ "news": null })) }),
            );
        let origin = serve(router).await;
        let client = client(&origin);

        assert!(client.global_news().await.unwrap().is_empty());
        assert!(client.india_news().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_sends_query_and_filters() {
        let router = Router::new().route(
            "/api/news/search",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let title = format!(
                    "{}|{}|{}",
                    params.get("q").cloned().unwrap_or_default(),
                    params.get("state").cloned().unwrap_or_default(),
                    params.get("category").cloned().unwrap_or_default()
                );
                axum::Json(serde_json::json!({ "news": [article_json(&title)] }))
            }),
        );
        let origin = serve(router).await;

        let params = SearchParams {
            query: "NEET exam".to_string(),
            state: Some("Tamil Nadu".to_string()),
            category: Some("Education".to_string()),
            limit: Some(5),
        };
        let news = client(&origin).search(&params).await.unwrap();
        assert_eq!(news[0].title, "NEET exam|tamil-nadu|education");
    }

    #[tokio::test]
    async fn test_error_status_and_bad_body() {
        let router = Router::new()
            .route(
                "/api/news/india",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route("/api/news/global", get(|| async { "not json" }));
        let origin = serve(router).await;
        let client = client(&origin);

        match client.india_news().await {
            Err(ApiError::Status { status, body }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {:?}", other),
        }
        assert!(matches!(client.global_news().await, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_states_and_refresh() {
        let router = Router::new()
            .route(
                "/api/states",
                get(|| async {
                    axum::Json(serde_json::json!({
                        "states": { "Kerala": ["Kochi", "Thrissur"], "Goa": ["Panaji"] }
                    }))
                }),
            )
            .route(
                "/api/news/refresh",
                post(|| async {
                    axum::Json(serde_json::json!({
                        "message": "News cache refreshed successfully",
                        "global_count": 12,
                        "india_count": 30
                    }))
                }),
            );
        let origin = serve(router).await;
        let client = client(&origin);

        let directory = client.states().await.unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(
            directory.districts("Kerala").unwrap(),
            &["Kochi".to_string(), "Thrissur".to_string()]
        );

        let summary = client.refresh().await.unwrap();
        assert_eq!(summary.global_count, Some(12));
        assert_eq!(summary.india_count, Some(30));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client(&format!("http://{}", addr));
        assert!(matches!(client.global_news().await, Err(ApiError::Transport(_))));
    }
}
