//! View-state controller
//!
//! Owns the client-side state of the news hub and translates commands into
//! backend requests. The controller never performs I/O itself: each command
//! returns the `FetchRequest` the owner has to run, and the owner reports the
//! outcome back through [`ViewState::complete`].
//!
//! Every request is tagged with a generation. Only the completion carrying the
//! latest generation is applied; older ones are dropped so a slow response
//! cannot overwrite the feed the user switched to afterwards.

use serde::Serialize;

use crate::api::{Article, SearchParams, StateDirectory};

/// Which logical feed is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Global,
    India,
    State,
    Search,
}

/// The national feeds that can be picked directly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edition {
    Global,
    India,
}

impl Edition {
    pub fn label(&self) -> &'static str {
        match self {
            Edition::Global => "Global News",
            Edition::India => "India News",
        }
    }
}

impl From<Edition> for Tab {
    fn from(edition: Edition) -> Self {
        match edition {
            Edition::Global => Tab::Global,
            Edition::India => Tab::India,
        }
    }
}

/// User intents the controller understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectFeed(Edition),
    SelectState(String),
    Search(String),
    Refresh,
}

/// The backend read a request resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
    Global,
    India,
    State(String),
    Search(SearchParams),
}

impl FetchTarget {
    pub fn describe(&self) -> String {
        match self {
            FetchTarget::Global => "global news".to_string(),
            FetchTarget::India => "India news".to_string(),
            FetchTarget::State(state) => format!("{} news", state),
            FetchTarget::Search(params) => format!("results for \"{}\"", params.query),
        }
    }
}

/// What the owner has to perform for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    /// A single read
    Fetch(FetchTarget),
    /// `POST /api/news/refresh`, then the read
    Refresh { then: FetchTarget },
}

impl RequestKind {
    /// The operation whose failure message applies if the request panics
    pub fn operation(&self) -> Operation {
        match self {
            RequestKind::Fetch(FetchTarget::Search(_)) => Operation::Search,
            RequestKind::Fetch(_) => Operation::Fetch,
            RequestKind::Refresh { .. } => Operation::Refresh,
        }
    }
}

/// A request stamped with its generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub kind: RequestKind,
}

/// Step of a request that can fail, each with its own user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Search,
    Refresh,
}

impl Operation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Fetch => "Failed to fetch news. Please try again.",
            Operation::Search => "Failed to search news. Please try again.",
            Operation::Refresh => "Failed to refresh news. Please try again.",
        }
    }
}

/// A failed request: which step failed and why (the reason is only logged)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub operation: Operation,
    pub reason: String,
}

impl FetchFailure {
    pub fn new(operation: Operation, reason: impl ToString) -> Self {
        Self {
            operation,
            reason: reason.to_string(),
        }
    }
}

/// How a completion was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Articles replaced with this many entries
    Loaded(usize),
    /// Articles cleared and the message shown
    Failed(&'static str),
    /// A newer request was issued; nothing changed
    Stale,
}

/// Complete client-side state
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub tab: Tab,
    pub selected_state: String,
    pub search_query: String,
    pub articles: Vec<Article>,
    pub loading: bool,
    pub error: Option<String>,
    pub directory: StateDirectory,
    generation: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request for the feed shown on mount. The directory is loaded separately.
    pub fn initialize(&mut self) -> FetchRequest {
        self.tab = Tab::Global;
        self.begin(RequestKind::Fetch(FetchTarget::Global))
    }

    /// Generation of the most recently issued request
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn dispatch(&mut self, command: Command) -> Option<FetchRequest> {
        match command {
            Command::SelectFeed(edition) => Some(self.select_feed(edition)),
            Command::SelectState(state) => self.select_state(&state),
            Command::Search(query) => self.search(&query),
            Command::Refresh => Some(self.refresh()),
        }
    }

    pub fn select_feed(&mut self, edition: Edition) -> FetchRequest {
        self.tab = edition.into();
        self.selected_state.clear();
        let target = match edition {
            Edition::Global => FetchTarget::Global,
            Edition::India => FetchTarget::India,
        };
        self.begin(RequestKind::Fetch(target))
    }

    /// Blank names come from the selector placeholder and are ignored
    pub fn select_state(&mut self, state: &str) -> Option<FetchRequest> {
        let state = state.trim();
        if state.is_empty() {
            return None;
        }

        self.selected_state = state.to_string();
        self.tab = Tab::State;
        Some(self.begin(RequestKind::Fetch(FetchTarget::State(state.to_string()))))
    }

    pub fn search(&mut self, query: &str) -> Option<FetchRequest> {
        self.search_with(SearchParams::new(query))
    }

    /// Search with backend filters. Blank queries leave the state untouched.
    pub fn search_with(&mut self, params: SearchParams) -> Option<FetchRequest> {
        if params.query.trim().is_empty() {
            return None;
        }

        self.search_query = params.query.clone();
        self.tab = Tab::Search;
        Some(self.begin(RequestKind::Fetch(FetchTarget::Search(params))))
    }

    pub fn refresh(&mut self) -> FetchRequest {
        let then = self.refresh_target();
        self.begin(RequestKind::Refresh { then })
    }

    /// Feed re-read after a refresh. Searches are not re-run.
    fn refresh_target(&self) -> FetchTarget {
        match self.tab {
            Tab::Global => FetchTarget::Global,
            Tab::India => FetchTarget::India,
            Tab::State => FetchTarget::State(self.selected_state.clone()),
            Tab::Search => {
                let target = if self.selected_state.is_empty() {
                    FetchTarget::Global
                } else {
                    FetchTarget::State(self.selected_state.clone())
                };
                tracing::warn!(
                    "Refresh while showing search results re-reads {} instead of \"{}\"",
                    target.describe(),
                    self.search_query
                );
                target
            }
        }
    }

    fn begin(&mut self, kind: RequestKind) -> FetchRequest {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        FetchRequest {
            generation: self.generation,
            kind,
        }
    }

    /// Apply the outcome of the request issued as `generation`
    pub fn complete(
        &mut self,
        generation: u64,
        outcome: Result<Vec<Article>, FetchFailure>,
    ) -> Completion {
        if generation != self.generation {
            tracing::debug!(
                "Dropping response for request {} (latest is {})",
                generation,
                self.generation
            );
            return Completion::Stale;
        }

        self.loading = false;
        match outcome {
            Ok(articles) => {
                let count = articles.len();
                self.articles = articles;
                Completion::Loaded(count)
            }
            Err(failure) => {
                let message = failure.operation.failure_message();
                tracing::error!("{}: {}", message, failure.reason);
                self.articles.clear();
                self.error = Some(message.to_string());
                Completion::Failed(message)
            }
        }
    }

    /// Install the state directory. Failures are logged and otherwise ignored.
    pub fn set_directory<E: std::fmt::Display>(&mut self, result: Result<StateDirectory, E>) {
        match result {
            Ok(directory) => self.directory = directory,
            Err(e) => tracing::warn!("Could not load state directory: {}", e),
        }
    }
}
