use crate::state::app_state::RequestTag;
use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use football_data_api::Match;
use football_data_api::client::ApiError;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadMatches { tag: RequestTag },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    MatchesLoaded { tag: RequestTag, matches: Vec<Match> },
    MatchesFailed { tag: RequestTag, error: ApiError },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    /// Periodic re-fetch of the day on screen.
    RefreshTick,
}
