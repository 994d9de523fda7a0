//! football-data.org raw wire types — serde shapes for deserializing `/matches` responses.
//! These map to our clean domain types in client.rs.
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct MatchesResponse {
    #[serde(default)]
    pub matches: Option<Vec<WireMatch>>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireMatch {
    pub id: u64,
    pub competition: WireCompetition,
    pub home_team: WireTeam,
    pub away_team: WireTeam,
    pub status: Option<String>,
    pub utc_date: DateTime<Utc>,
    pub score: Option<WireScore>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WireCompetition {
    pub id: u64,
    pub name: String,
    pub emblem: Option<String>,
}

/// Knockout fixtures list undecided teams with every field null.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireTeam {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub crest: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireScore {
    pub full_time: Option<WireGoals>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireGoals {
    pub home: Option<u32>,
    pub away: Option<u32>,
}
