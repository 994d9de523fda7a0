use chrono::{Days, Local, NaiveDate};

/// The calendar day being viewed. Only the step/reset operations move it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCursor {
    date: NaiveDate,
}

impl Default for DayCursor {
    fn default() -> Self {
        Self::today()
    }
}

impl DayCursor {
    pub fn today() -> Self {
        Self { date: Local::now().date_naive() }
    }

    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_today(&self) -> bool {
        self.date == Local::now().date_naive()
    }

    /// Saturates at the end of chrono's supported range.
    pub fn step_forward(&mut self) {
        if let Some(next) = self.date.checked_add_days(Days::new(1)) {
            self.date = next;
        }
    }

    pub fn step_backward(&mut self) {
        if let Some(prev) = self.date.checked_sub_days(Days::new(1)) {
            self.date = prev;
        }
    }

    pub fn reset_to_today(&mut self) {
        self.date = Local::now().date_naive();
    }

    /// `YYYY-MM-DD`, as the provider expects in `dateFrom`/`dateTo`.
    pub fn key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Long form for the header, e.g. "Thursday, 7 Mar 2024".
    pub fn label(&self) -> String {
        self.date.format("%A, %-d %b %Y").to_string()
    }
}
