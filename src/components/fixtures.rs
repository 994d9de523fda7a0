use chrono::{Local, TimeZone};
use football_data_api::{CompetitionGroup, Match, MatchStatus};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};

const TEAM_WIDTH: usize = 22;

/// Centre column: the score, or "VS" before kick-off.
pub fn score_text(m: &Match) -> String {
    match m.scoreline() {
        Some((home, away)) => format!("{home} : {away}"),
        None => "VS".to_string(),
    }
}

pub fn status_style(status: &MatchStatus) -> Style {
    match status {
        live if live.is_live() => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        MatchStatus::Finished => Style::default().fg(Color::Gray),
        MatchStatus::Postponed | MatchStatus::Suspended | MatchStatus::Cancelled => {
            Style::default().fg(Color::Red)
        }
        _ => Style::default().fg(Color::DarkGray),
    }
}

/// Kick-off as wall-clock time in `tz`.
pub fn kickoff_time<Tz: TimeZone>(m: &Match, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    m.utc_date.with_timezone(tz).format("%H:%M").to_string()
}

/// One plain-text row per match: home, score, away.
pub fn match_row(m: &Match) -> String {
    format!(
        "{:>width$}  {:^7}  {:<width$}",
        truncate_name(m.home_team.display_name(), TEAM_WIDTH),
        score_text(m),
        truncate_name(m.away_team.display_name(), TEAM_WIDTH),
        width = TEAM_WIDTH,
    )
}

/// Render competition groups as a header line per competition followed by its matches.
pub fn group_lines<'a>(groups: &'a [CompetitionGroup]) -> Vec<Line<'a>> {
    let mut lines = Vec::new();
    for (idx, group) in groups.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(vec![
            Span::styled(
                group.competition.name.as_str(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({})", group.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        for m in &group.matches {
            lines.push(Line::from(vec![
                Span::raw(format!("  {}  ", match_row(m))),
                Span::styled(format!("{:<10}", m.status.as_str()), status_style(&m.status)),
                Span::raw(" "),
                Span::styled(kickoff_time(m, &Local), Style::default().fg(Color::Cyan)),
            ]));
        }
    }
    lines
}

fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut out: String = name.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone, Utc};
    use football_data_api::{Competition, GroupKey, Score, Team, group_matches};

    fn fixture(id: u64, competition: &str, status: MatchStatus, score: Score) -> Match {
        Match {
            id,
            competition: Competition { id: 1, name: competition.into(), emblem: None },
            home_team: Team { name: "Borussia Dortmund".into(), short_name: Some("Dortmund".into()), ..Default::default() },
            away_team: Team { name: "FC Schalke 04".into(), ..Default::default() },
            status,
            utc_date: Utc.with_ymd_and_hms(2024, 3, 7, 17, 30, 0).unwrap(),
            score,
        }
    }

    #[test]
    fn pending_matches_show_vs_even_with_score_payload() {
        let m = fixture(1, "Bundesliga", MatchStatus::Timed, Score { home: Some(4), away: Some(4) });
        assert_eq!(score_text(&m), "VS");
        let m = fixture(1, "Bundesliga", MatchStatus::Scheduled, Score::default());
        assert_eq!(score_text(&m), "VS");
    }

    #[test]
    fn started_matches_show_score_with_zero_default() {
        let m = fixture(1, "Bundesliga", MatchStatus::Paused, Score { home: Some(1), away: None });
        assert_eq!(score_text(&m), "1 : 0");
        let m = fixture(1, "Bundesliga", MatchStatus::Cancelled, Score::default());
        assert_eq!(score_text(&m), "0 : 0");
    }

    #[test]
    fn rows_use_display_names() {
        let m = fixture(1, "Bundesliga", MatchStatus::Finished, Score { home: Some(2), away: Some(0) });
        let row = match_row(&m);
        assert!(row.contains("Dortmund"));
        assert!(!row.contains("Borussia"));
        assert!(row.contains("FC Schalke 04"));
        assert!(row.contains("2 : 0"));
    }

    #[test]
    fn kickoff_is_converted_to_the_given_zone() {
        let m = fixture(1, "Bundesliga", MatchStatus::Timed, Score::default());
        let cet = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(kickoff_time(&m, &cet), "18:30");
        assert_eq!(kickoff_time(&m, &Utc), "17:30");
    }

    #[test]
    fn live_matches_are_highlighted() {
        let live = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
        assert_eq!(status_style(&MatchStatus::InProgress), live);
        assert_eq!(status_style(&MatchStatus::Paused), live);
        assert_ne!(status_style(&MatchStatus::Finished), live);
        assert_eq!(status_style(&MatchStatus::Other(String::new())), Style::default().fg(Color::DarkGray));
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate_name("Wolverhampton Wanderers FC", 10), "Wolverham…");
        assert_eq!(truncate_name("Ajax", 10), "Ajax");
    }

    #[test]
    fn group_lines_have_header_per_competition_and_blank_separators() {
        let groups = group_matches(
            vec![
                fixture(1, "Bundesliga", MatchStatus::Finished, Score::default()),
                fixture(2, "Eredivisie", MatchStatus::Timed, Score::default()),
                fixture(3, "Bundesliga", MatchStatus::Timed, Score::default()),
            ],
            GroupKey::CompetitionName,
        );
        let lines = group_lines(&groups);
        // header + 2 matches, blank, header + 1 match
        assert_eq!(lines.len(), 6);
        assert!(lines[0].spans[0].content.contains("Bundesliga"));
        assert!(lines[4].spans[0].content.contains("Eredivisie"));
        assert!(lines[3].spans.is_empty());
    }
}
