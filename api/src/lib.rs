pub mod client;
pub mod grouping;
pub mod wire;

pub use grouping::{CompetitionGroup, GroupKey, group_matches};

use chrono::{DateTime, Utc};
use std::fmt;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the football-data wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: u64,
    pub competition: Competition,
    pub home_team: Team,
    pub away_team: Team,
    pub status: MatchStatus,
    pub utc_date: DateTime<Utc>,
    pub score: Score,
}

impl Match {
    /// Full-time score pair to display, or `None` while the match has not kicked off.
    /// Missing goals on a started match read as 0.
    pub fn scoreline(&self) -> Option<(u32, u32)> {
        if self.status.is_pending() {
            return None;
        }
        Some((self.score.home.unwrap_or(0), self.score.away.unwrap_or(0)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Team {
    pub id: Option<u64>,
    pub name: String,
    pub short_name: Option<String>,
    pub crest: Option<String>,
}

impl Team {
    pub fn display_name(&self) -> &str {
        match self.short_name.as_deref() {
            Some(short) if !short.is_empty() => short,
            _ => &self.name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Competition {
    pub id: u64,
    pub name: String,
    pub emblem: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStatus {
    Scheduled,
    Timed,
    InProgress,
    Paused,
    Finished,
    Postponed,
    Suspended,
    Cancelled,
    /// Anything the provider sends that we don't know about, kept verbatim.
    Other(String),
}

impl MatchStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            "SCHEDULED" => MatchStatus::Scheduled,
            "TIMED" => MatchStatus::Timed,
            "IN_PLAY" => MatchStatus::InProgress,
            "PAUSED" => MatchStatus::Paused,
            "FINISHED" => MatchStatus::Finished,
            "POSTPONED" => MatchStatus::Postponed,
            "SUSPENDED" => MatchStatus::Suspended,
            "CANCELLED" => MatchStatus::Cancelled,
            other => MatchStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::Timed => "TIMED",
            MatchStatus::InProgress => "IN_PLAY",
            MatchStatus::Paused => "PAUSED",
            MatchStatus::Finished => "FINISHED",
            MatchStatus::Postponed => "POSTPONED",
            MatchStatus::Suspended => "SUSPENDED",
            MatchStatus::Cancelled => "CANCELLED",
            MatchStatus::Other(raw) => raw,
        }
    }

    /// Not started yet: no score is shown for these.
    pub fn is_pending(&self) -> bool {
        matches!(self, MatchStatus::Scheduled | MatchStatus::Timed)
    }

    pub fn is_live(&self) -> bool {
        matches!(self, MatchStatus::InProgress | MatchStatus::Paused)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
