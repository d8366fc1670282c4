//! Render model derived from [`ViewState`].
//!
//! Both the window and the CLI draw from a [`PageView`], so every wording and
//! visibility rule lives here rather than in the drawing code.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;

use crate::api::Article;
use crate::controller::{Tab, ViewState};

/// Badge styles keyed by article category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryStyle {
    Politics,
    Economy,
    Education,
    Science,
    Environment,
    Sports,
    Health,
    Defense,
    General,
}

impl CategoryStyle {
    /// Unknown or missing categories use the general style
    pub fn for_category(category: Option<&str>) -> Self {
        match category {
            Some("politics") => CategoryStyle::Politics,
            Some("economy") => CategoryStyle::Economy,
            Some("education") => CategoryStyle::Education,
            Some("science") => CategoryStyle::Science,
            Some("environment") => CategoryStyle::Environment,
            Some("sports") => CategoryStyle::Sports,
            Some("health") => CategoryStyle::Health,
            Some("defense") => CategoryStyle::Defense,
            _ => CategoryStyle::General,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBadge {
    pub label: String,
    pub style: CategoryStyle,
}

/// One article, ready to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleCard {
    pub key: String,
    pub category: Option<CategoryBadge>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub title: String,
    pub summary: Option<String>,
    pub source: String,
    pub global: bool,
    pub published: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyNotice {
    pub title: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "lowercase")]
pub enum Body {
    Loading,
    Cards(Vec<ArticleCard>),
    Empty(EmptyNotice),
    /// Failed fetch with nothing to show besides the error
    Blank,
}

/// Everything the page shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub tab: Tab,
    pub header: String,
    pub count_line: String,
    pub district_hint: Option<String>,
    pub error: Option<String>,
    pub body: Body,
}

impl PageView {
    /// Build the page with timestamps in the local time zone
    pub fn build(state: &ViewState) -> Self {
        Self::build_in(state, &Local)
    }

    pub fn build_in<Tz>(state: &ViewState, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let body = if state.loading {
            Body::Loading
        } else if !state.articles.is_empty() {
            Body::Cards(
                state
                    .articles
                    .iter()
                    .enumerate()
                    .map(|(index, article)| ArticleCard::build(index, article, tz))
                    .collect(),
            )
        } else if state.error.is_none() {
            Body::Empty(empty_notice(state))
        } else {
            Body::Blank
        };

        Self {
            tab: state.tab,
            header: header_label(state),
            count_line: count_line(state),
            district_hint: district_hint(state),
            error: state.error.clone(),
            body,
        }
    }
}

pub fn header_label(state: &ViewState) -> String {
    match state.tab {
        Tab::Global => "Global News".to_string(),
        Tab::India => "India News".to_string(),
        Tab::State => format!("{} News", state.selected_state),
        Tab::Search => format!("Search Results for \"{}\"", state.search_query),
    }
}

pub fn count_line(state: &ViewState) -> String {
    let mut line = format!("{} articles found", state.articles.len());
    if state.loading {
        line.push_str(" • Loading...");
    }
    line
}

/// Districts of the selected state, when the directory knows it
pub fn district_hint(state: &ViewState) -> Option<String> {
    if state.selected_state.is_empty() {
        return None;
    }
    state
        .directory
        .districts(&state.selected_state)
        .map(|districts| districts.join(", "))
}

fn empty_notice(state: &ViewState) -> EmptyNotice {
    let message = if state.tab == Tab::Search {
        format!(
            "No articles found for \"{}\". Try different keywords.",
            state.search_query
        )
    } else {
        "No articles available at the moment. Try refreshing or check back later.".to_string()
    };

    EmptyNotice {
        title: "No news articles found",
        message,
    }
}

impl ArticleCard {
    fn build<Tz>(index: usize, article: &Article, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let category = article.category.as_deref().map(|category| CategoryBadge {
            label: capitalize(category),
            style: CategoryStyle::for_category(Some(category)),
        });

        let summary = article
            .summary
            .as_ref()
            .filter(|summary| !summary.is_empty() && **summary != article.title)
            .cloned();

        Self {
            key: article.id.clone().unwrap_or_else(|| index.to_string()),
            category,
            state: article.state.clone(),
            district: article.district.clone(),
            title: article.title.clone(),
            summary,
            source: article.source.clone(),
            global: article.is_global,
            published: format_published(&article.published_at, tz),
            url: article.url.clone().filter(|url| !url.is_empty()),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parse a backend timestamp. Naive datetimes are UTC.
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// `1 Jan 2024, 05:30 AM` in `tz`; the raw text when it does not parse
pub fn format_published<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match parse_published(raw) {
        Some(dt) => dt
            .with_timezone(tz)
            .format("%-d %b %Y, %I:%M %p")
            .to_string(),
        None => raw.to_string(),
    }
}
