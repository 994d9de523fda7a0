use crate::app::MenuItem;
use crate::state::day_cursor::DayCursor;
use chrono::{Local, NaiveDate};
use football_data_api::{CompetitionGroup, GroupKey, Match, group_matches};
use log::debug;

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Loading,
    Error(String),
    /// The provider answered with no matches for the day.
    Empty,
    Ready(Vec<CompetitionGroup>),
}

impl ViewState {
    pub fn groups(&self) -> &[CompetitionGroup] {
        match self {
            ViewState::Ready(groups) => groups,
            _ => &[],
        }
    }
}

/// Identifies one issued retrieval. Responses carry it back so stale ones can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTag {
    pub date: NaiveDate,
    pub generation: u64,
}

// ---------------------------------------------------------------------------
// Fixtures state — day cursor + the view derived from the latest retrieval
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FixturesState {
    pub cursor: DayCursor,
    pub view: ViewState,
    pub group_key: GroupKey,
    pub scroll_offset: u16,
    /// Largest useful scroll offset, recomputed on every draw.
    pub max_scroll: u16,
    /// Local "HH:MM" of the last committed retrieval.
    pub last_updated: Option<String>,
    latest: Option<RequestTag>,
    generation: u64,
}

impl FixturesState {
    pub fn new(cursor: DayCursor, group_key: GroupKey) -> Self {
        Self {
            cursor,
            group_key,
            ..Self::default()
        }
    }

    pub fn step_forward(&mut self) -> RequestTag {
        self.cursor.step_forward();
        self.begin_load()
    }

    pub fn step_backward(&mut self) -> RequestTag {
        self.cursor.step_backward();
        self.begin_load()
    }

    pub fn reset_to_today(&mut self) -> RequestTag {
        self.cursor.reset_to_today();
        self.begin_load()
    }

    /// Enter `Loading` for the cursor's day and issue a retrieval for it.
    pub fn begin_load(&mut self) -> RequestTag {
        self.view = ViewState::Loading;
        self.scroll_offset = 0;
        self.issue()
    }

    /// Re-fetch the current day but keep showing what we have until the answer lands.
    pub fn refresh(&mut self) -> RequestTag {
        self.issue()
    }

    fn issue(&mut self) -> RequestTag {
        self.generation = self.generation.wrapping_add(1);
        let tag = RequestTag {
            date: self.cursor.date(),
            generation: self.generation,
        };
        self.latest = Some(tag);
        tag
    }

    /// True while a retrieval is outstanding for the viewed day.
    pub fn is_waiting(&self) -> bool {
        self.latest.is_some()
    }

    /// Only the most recently issued request, for the day still on screen, may commit.
    pub fn is_current(&self, tag: RequestTag) -> bool {
        self.latest == Some(tag) && tag.date == self.cursor.date()
    }

    pub fn commit_matches(&mut self, tag: RequestTag, matches: Vec<Match>) -> bool {
        if !self.accept(tag) {
            return false;
        }
        self.view = if matches.is_empty() {
            ViewState::Empty
        } else {
            ViewState::Ready(group_matches(matches, self.group_key))
        };
        self.clamp_scroll();
        true
    }

    pub fn commit_failure(&mut self, tag: RequestTag, message: String) -> bool {
        if !self.accept(tag) {
            return false;
        }
        self.view = ViewState::Error(message);
        self.scroll_offset = 0;
        true
    }

    fn accept(&mut self, tag: RequestTag) -> bool {
        if !self.is_current(tag) {
            debug!(
                "discarding stale response for {} (#{}), viewing {}",
                tag.date,
                tag.generation,
                self.cursor.key()
            );
            return false;
        }
        self.latest = None;
        self.last_updated = Some(Local::now().format("%H:%M").to_string());
        true
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1).min(self.max_scroll);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll);
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub fixtures: FixturesState,
}

impl AppState {
    pub fn new(cursor: DayCursor, group_key: GroupKey) -> Self {
        Self {
            fixtures: FixturesState::new(cursor, group_key),
            ..Self::default()
        }
    }
}
