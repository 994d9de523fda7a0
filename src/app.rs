use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, RequestTag};
use crate::state::day_cursor::DayCursor;
use football_data_api::Match;
use football_data_api::client::ApiError;
use log::info;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Matches,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings, cursor: DayCursor) -> Self {
        let state = AppState::new(cursor, settings.group_key);
        Self { settings, state }
    }

    // -----------------------------------------------------------------------
    // Day navigation — every move re-enters Loading and returns the request to send
    // -----------------------------------------------------------------------

    pub fn load_current_day(&mut self) -> RequestTag {
        self.state.fixtures.begin_load()
    }

    pub fn previous_day(&mut self) -> RequestTag {
        self.state.fixtures.step_backward()
    }

    pub fn next_day(&mut self) -> RequestTag {
        self.state.fixtures.step_forward()
    }

    pub fn today(&mut self) -> RequestTag {
        self.state.fixtures.reset_to_today()
    }

    pub fn refresh(&mut self) -> RequestTag {
        self.state.fixtures.refresh()
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    /// Returns false when the response was for a request that has since been superseded.
    pub fn on_matches_loaded(&mut self, tag: RequestTag, matches: Vec<Match>) -> bool {
        let count = matches.len();
        let committed = self.state.fixtures.commit_matches(tag, matches);
        if committed {
            info!("showing {count} matches for {}", tag.date);
        }
        committed
    }

    pub fn on_matches_failed(&mut self, tag: RequestTag, error: ApiError) -> bool {
        self.state.fixtures.commit_failure(tag, error.to_string())
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn scroll_down(&mut self) {
        self.state.fixtures.scroll_down();
    }

    pub fn scroll_up(&mut self) {
        self.state.fixtures.scroll_up();
    }
}
