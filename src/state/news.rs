//! News feed state: the controller plus the requests it has in flight

use tokio::task::JoinHandle;

use crate::api::{ApiError, Article, NewsClient, StateDirectory};
use crate::controller::{
    Command, Completion, FetchFailure, FetchRequest, FetchTarget, Operation, RequestKind,
    ViewState,
};
use crate::state::StateEvent::{self, LogError, LogInfo, StatusMessage};
use crate::task::{PollResult, drain_finished, poll_task};

type FetchTask = JoinHandle<Result<Vec<Article>, FetchFailure>>;

/// Run one controller request against the backend
pub async fn perform(client: &NewsClient, kind: &RequestKind) -> Result<Vec<Article>, FetchFailure> {
    match kind {
        RequestKind::Fetch(target) => read(client, target).await,
        RequestKind::Refresh { then } => {
            match client.refresh().await {
                Ok(summary) => {
                    if let Some(message) = summary.message {
                        tracing::info!("{}", message);
                    }
                }
                Err(e) => return Err(FetchFailure::new(Operation::Refresh, e)),
            }
            read(client, then).await
        }
    }
}

async fn read(client: &NewsClient, target: &FetchTarget) -> Result<Vec<Article>, FetchFailure> {
    let (operation, result) = match target {
        FetchTarget::Global => (Operation::Fetch, client.global_news().await),
        FetchTarget::India => (Operation::Fetch, client.india_news().await),
        FetchTarget::State(state) => (Operation::Fetch, client.state_news(state).await),
        FetchTarget::Search(params) => (Operation::Search, client.search(params).await),
    };
    result.map_err(|e| FetchFailure::new(operation, e))
}

/// News-related state
pub struct NewsState {
    client: NewsClient,
    /// Controller state the page is rendered from
    pub view: ViewState,
    /// Requests in flight, keyed by generation
    in_flight: Vec<((u64, Operation), FetchTask)>,
    /// One-shot state directory load
    directory_task: Option<JoinHandle<Result<StateDirectory, ApiError>>>,
}

impl NewsState {
    pub fn new(client: NewsClient) -> Self {
        Self {
            client,
            view: ViewState::new(),
            in_flight: Vec::new(),
            directory_task: None,
        }
    }

    pub fn client(&self) -> &NewsClient {
        &self.client
    }

    /// Whether any request (current or superseded) is still running
    pub fn is_busy(&self) -> bool {
        !self.in_flight.is_empty() || self.directory_task.is_some()
    }

    /// Load the global feed and the state directory side by side
    pub fn initialize(&mut self) -> Vec<StateEvent> {
        let client = self.client.clone();
        self.directory_task = Some(tokio::spawn(async move { client.states().await }));

        let request = self.view.initialize();
        self.spawn(request)
    }

    pub fn dispatch(&mut self, command: Command) -> Vec<StateEvent> {
        match self.view.dispatch(command) {
            Some(request) => self.spawn(request),
            None => Vec::new(),
        }
    }

    fn spawn(&mut self, request: FetchRequest) -> Vec<StateEvent> {
        let status = match &request.kind {
            RequestKind::Fetch(target) => format!("Fetching {}...", target.describe()),
            RequestKind::Refresh { .. } => "Refreshing news...".to_string(),
        };

        let client = self.client.clone();
        let operation = request.kind.operation();
        let kind = request.kind;
        let handle = tokio::spawn(async move { perform(&client, &kind).await });
        self.in_flight.push(((request.generation, operation), handle));

        vec![StatusMessage(status)]
    }

    /// Collect finished requests and apply them to the view
    pub fn poll(&mut self) -> Vec<StateEvent> {
        let mut events = Vec::new();

        match poll_task(&mut self.directory_task) {
            PollResult::Complete(Ok(result)) => {
                if let Ok(directory) = &result {
                    events.push(LogInfo(format!(
                        "Loaded districts for {} states",
                        directory.len()
                    )));
                }
                self.view.set_directory(result);
            }
            PollResult::Complete(Err(e)) => {
                self.view.set_directory::<String>(Err(e.to_string()));
            }
            PollResult::Pending | PollResult::NoTask => {}
        }

        for ((generation, operation), result) in drain_finished(&mut self.in_flight) {
            let outcome = result.unwrap_or_else(|e| {
                events.push(LogError(format!("Request task panicked: {}", e)));
                Err(FetchFailure::new(operation, e))
            });

            match self.view.complete(generation, outcome) {
                Completion::Loaded(count) => {
                    events.push(StatusMessage(format!("Loaded {} articles", count)));
                }
                Completion::Failed(message) => {
                    events.push(StatusMessage(message.to_string()));
                }
                Completion::Stale => {}
            }
        }

        events
    }
}
