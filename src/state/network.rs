use crate::state::app_state::RequestTag;
use crate::state::messages::{NetworkRequest, NetworkResponse};
use football_data_api::client::FootballDataApi;
use log::{debug, error, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Receives retrieval requests and answers each one from its own task, so a slow
/// answer for a day the user already left never holds up the current one.
pub struct NetworkWorker {
    client: FootballDataApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    in_flight: Arc<AtomicUsize>,
}

impl NetworkWorker {
    pub fn new(
        client: FootballDataApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            match request {
                NetworkRequest::LoadMatches { tag } => self.spawn_load_matches(tag).await,
            }
        }
    }

    async fn spawn_load_matches(&self, tag: RequestTag) {
        self.start_loading_animation().await;

        let client = self.client.clone();
        let responses = self.responses.clone();
        let in_flight = self.in_flight.clone();

        tokio::spawn(async move {
            debug!("loading matches for {} (#{})", tag.date, tag.generation);
            let result = client.fetch_matches(Some(tag.date)).await;

            let response = match result {
                Ok(matches) => {
                    debug!("{} matches for {} (#{})", matches.len(), tag.date, tag.generation);
                    NetworkResponse::MatchesLoaded { tag, matches }
                }
                Err(error) => {
                    warn!("loading matches for {} failed: {error}", tag.date);
                    NetworkResponse::MatchesFailed { tag, error }
                }
            };

            stop_loading_animation(&in_flight, &responses).await;
            if let Err(e) = responses.send(response).await {
                error!("Failed to send network response: {e}");
            }
        });
    }

    async fn start_loading_animation(&self) {
        // Only the first request in a burst starts a spinner.
        if self.in_flight.fetch_add(1, Ordering::SeqCst) > 0 {
            return;
        }

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let in_flight = self.in_flight.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if in_flight.load(Ordering::SeqCst) == 0 {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }
}

/// Failures are not flagged here: a failed stale request says nothing about the view.
async fn stop_loading_animation(in_flight: &AtomicUsize, responses: &mpsc::Sender<NetworkResponse>) {
    if in_flight.fetch_sub(1, Ordering::SeqCst) > 1 {
        return;
    }
    tokio::time::sleep(Duration::from_millis(15)).await;

    let _ = responses
        .send(NetworkResponse::LoadingStateChanged { loading_state: LoadingState::default() })
        .await;
}
