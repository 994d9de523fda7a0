use crate::wire::{MatchesResponse, WireMatch, WireTeam};
use crate::{Competition, Match, MatchStatus, Score, Team};
use chrono::NaiveDate;
use reqwest::Client;
pub use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "https://api.football-data.org/v4";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything the client needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// football-data.org client.
#[derive(Debug, Clone)]
pub struct FootballDataApi {
    client: Client,
    base_url: String,
    token: String,
    timeout: Duration,
}

#[derive(Debug)]
pub enum ApiError {
    /// 403: bad or missing token.
    Unauthorized,
    /// 429: provider throttling.
    RateLimited,
    /// Any other non-2xx status. Shown with its canonical reason phrase.
    Http(StatusCode),
    /// No usable response: connect/DNS/timeout failures and unparseable bodies.
    Transport(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "Access denied. Check your API key."),
            ApiError::RateLimited => write!(f, "Too many requests. Please wait a moment."),
            ApiError::Http(status) => write!(
                f,
                "Failed to fetch matches: {}",
                status.canonical_reason().unwrap_or(status.as_str())
            ),
            ApiError::Transport(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::FORBIDDEN => ApiError::Unauthorized,
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
            other => ApiError::Http(other),
        }
    }

    fn network(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            ApiError::Transport(format!("Network error: request timed out after {}s", timeout.as_secs()))
        } else {
            ApiError::Transport(format!("Network error: {e}"))
        }
    }
}

impl FootballDataApi {
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("matchday/", env!("CARGO_PKG_VERSION"), " (terminal fixtures viewer)"))
            .build()
            .map_err(|e| ApiError::Transport(format!("Network error: cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
            timeout: config.timeout,
        })
    }

    /// Fetch all matches played or scheduled on `date`.
    /// `None` leaves the window to the provider, which defaults to the current day.
    pub async fn fetch_matches(&self, date: Option<NaiveDate>) -> ApiResult<Vec<Match>> {
        let url = matches_url(&self.base_url, date);
        let raw: MatchesResponse = self.get(&url).await?;
        Ok(raw.matches.unwrap_or_default().into_iter().map(map_match).collect())
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .header("X-Auth-Token", &self.token)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::network(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::from_status(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(e, self.timeout))?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Transport(format!("Invalid response: {e}")))
    }
}

fn matches_url(base_url: &str, date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => {
            let key = date.format("%Y-%m-%d");
            format!("{base_url}/matches?dateFrom={key}&dateTo={key}")
        }
        None => format!("{base_url}/matches"),
    }
}

// ---------------------------------------------------------------------------
// Mapping: football-data wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_match(raw: WireMatch) -> Match {
    let score = raw
        .score
        .and_then(|s| s.full_time)
        .map(|ft| Score { home: ft.home, away: ft.away })
        .unwrap_or_default();

    Match {
        id: raw.id,
        competition: Competition {
            id: raw.competition.id,
            name: raw.competition.name,
            emblem: raw.competition.emblem,
        },
        home_team: map_team(raw.home_team),
        away_team: map_team(raw.away_team),
        // A missing status reads as unknown, which still shows the score.
        status: MatchStatus::parse(raw.status.as_deref().unwrap_or_default()),
        utc_date: raw.utc_date,
        score,
    }
}

fn map_team(raw: WireTeam) -> Team {
    Team {
        id: raw.id,
        name: raw.name.filter(|n| !n.is_empty()).unwrap_or_else(|| "TBD".to_string()),
        short_name: raw.short_name,
        crest: raw.crest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const TOKEN: &str = "secret-token";

    const MATCHES_BODY: &str = r#"{
        "filters": { "dateFrom": "2024-03-07", "dateTo": "2024-03-07" },
        "resultSet": { "count": 3 },
        "matches": [
            {
                "id": 436001,
                "utcDate": "2024-03-07T17:45:00Z",
                "status": "FINISHED",
                "competition": { "id": 2001, "name": "UEFA Champions League", "emblem": "https://crests.football-data.org/CL.png" },
                "homeTeam": { "id": 86, "name": "Real Madrid CF", "shortName": "Real Madrid", "crest": "https://crests.football-data.org/86.png" },
                "awayTeam": { "id": 5, "name": "FC Bayern München", "shortName": "Bayern", "crest": "https://crests.football-data.org/5.svg" },
                "score": { "winner": "HOME_TEAM", "fullTime": { "home": 2, "away": 1 } }
            },
            {
                "id": 436002,
                "utcDate": "2024-03-07T20:00:00Z",
                "status": "TIMED",
                "competition": { "id": 2021, "name": "Premier League", "emblem": null },
                "homeTeam": { "id": 57, "name": "Arsenal FC", "shortName": null, "crest": null },
                "awayTeam": { "id": null, "name": null, "shortName": null, "crest": null },
                "score": { "fullTime": { "home": null, "away": null } }
            },
            {
                "id": 436003,
                "utcDate": "2024-03-07T21:00:00Z",
                "status": "AWARDED",
                "competition": { "id": 2021, "name": "Premier League" },
                "homeTeam": { "id": 61, "name": "Chelsea FC" },
                "awayTeam": { "id": 62, "name": "Everton FC" }
            }
        ]
    }"#;

    fn api_for(server: &Server) -> FootballDataApi {
        FootballDataApi::new(ApiConfig {
            base_url: server.url(),
            token: TOKEN.to_string(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn matches_url_scopes_request_to_single_day() {
        assert_eq!(
            matches_url("https://api.football-data.org/v4", Some(date())),
            "https://api.football-data.org/v4/matches?dateFrom=2024-03-07&dateTo=2024-03-07"
        );
        assert_eq!(matches_url("/api", None), "/api/matches");
    }

    #[test]
    fn trailing_slash_in_base_url_is_ignored() {
        let mut config = ApiConfig::new(TOKEN);
        config.base_url = "https://api.football-data.org/v4/".into();
        let api = FootballDataApi::new(config).unwrap();
        assert_eq!(api.base_url, "https://api.football-data.org/v4");
    }

    #[test]
    fn error_messages_are_user_facing() {
        assert_eq!(ApiError::Unauthorized.to_string(), "Access denied. Check your API key.");
        assert_eq!(ApiError::RateLimited.to_string(), "Too many requests. Please wait a moment.");
        assert_eq!(
            ApiError::Http(StatusCode::INTERNAL_SERVER_ERROR).to_string(),
            "Failed to fetch matches: Internal Server Error"
        );
    }

    #[tokio::test]
    async fn fetch_matches_sends_token_and_date_range() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/matches")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("dateFrom".into(), "2024-03-07".into()),
                Matcher::UrlEncoded("dateTo".into(), "2024-03-07".into()),
            ]))
            .match_header("x-auth-token", TOKEN)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(MATCHES_BODY)
            .create_async()
            .await;

        let matches = api_for(&server).fetch_matches(Some(date())).await.unwrap();
        mock.assert_async().await;

        assert_eq!(matches.len(), 3);
        let first = &matches[0];
        assert_eq!(first.id, 436001);
        assert_eq!(first.competition.name, "UEFA Champions League");
        assert_eq!(first.home_team.display_name(), "Real Madrid");
        assert_eq!(first.status, MatchStatus::Finished);
        assert_eq!(first.scoreline(), Some((2, 1)));
        assert_eq!(first.utc_date.to_rfc3339(), "2024-03-07T17:45:00+00:00");
    }

    #[tokio::test]
    async fn fetch_matches_tolerates_nulls_and_unknown_status() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/matches")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(MATCHES_BODY)
            .create_async()
            .await;

        let matches = api_for(&server).fetch_matches(Some(date())).await.unwrap();

        let timed = &matches[1];
        assert_eq!(timed.competition.emblem, None);
        assert_eq!(timed.home_team.display_name(), "Arsenal FC");
        assert_eq!(timed.away_team.name, "TBD");
        assert_eq!(timed.away_team.id, None);
        assert_eq!(timed.scoreline(), None);

        let awarded = &matches[2];
        assert_eq!(awarded.status, MatchStatus::Other("AWARDED".into()));
        assert_eq!(awarded.score, Score::default());
        assert_eq!(awarded.scoreline(), Some((0, 0)));
    }

    #[tokio::test]
    async fn fetch_matches_without_date_omits_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/matches")
            .match_query(Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"matches": []}"#)
            .create_async()
            .await;

        let matches = api_for(&server).fetch_matches(None).await.unwrap();
        mock.assert_async().await;
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn missing_matches_field_is_empty() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/matches")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"resultSet": {"count": 0}}"#)
            .create_async()
            .await;

        let matches = api_for(&server).fetch_matches(Some(date())).await.unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn forbidden_maps_to_unauthorized() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/matches")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body(r#"{"message": "The resource you are looking for is restricted.", "errorCode": 403}"#)
            .create_async()
            .await;

        let err = api_for(&server).fetch_matches(Some(date())).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
        assert_eq!(err.to_string(), "Access denied. Check your API key.");
    }

    #[tokio::test]
    async fn too_many_requests_maps_to_rate_limited() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/matches")
            .match_query(Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let err = api_for(&server).fetch_matches(Some(date())).await.unwrap_err();
        assert!(matches!(err, ApiError::RateLimited));
    }

    #[tokio::test]
    async fn other_statuses_carry_status_text() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/matches")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = api_for(&server).fetch_matches(Some(date())).await.unwrap_err();
        assert!(matches!(err, ApiError::Http(StatusCode::SERVICE_UNAVAILABLE)));
        assert_eq!(err.to_string(), "Failed to fetch matches: Service Unavailable");
    }

    #[tokio::test]
    async fn malformed_body_is_transport_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/matches")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create_async()
            .await;

        let err = api_for(&server).fetch_matches(Some(date())).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(err.to_string().starts_with("Invalid response:"));
    }

    #[tokio::test]
    async fn bad_kickoff_timestamp_is_transport_failure() {
        let mut server = Server::new_async().await;
        let body = MATCHES_BODY.replace("2024-03-07T17:45:00Z", "yesterday");
        server
            .mock("GET", "/matches")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let err = api_for(&server).fetch_matches(Some(date())).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(err.to_string().starts_with("Invalid response:"));
    }

    #[tokio::test]
    async fn missing_status_still_shows_score() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/matches")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"matches": [{
                    "id": 7,
                    "utcDate": "2024-03-07T19:00:00Z",
                    "competition": { "id": 2015, "name": "Ligue 1" },
                    "homeTeam": { "name": "Lille OSC" },
                    "awayTeam": { "name": "Stade Rennais FC" }
                }]}"#,
            )
            .create_async()
            .await;

        let matches = api_for(&server).fetch_matches(Some(date())).await.unwrap();
        assert_eq!(matches[0].status, MatchStatus::Other(String::new()));
        assert_eq!(matches[0].scoreline(), Some((0, 0)));
    }

    #[tokio::test]
    async fn slow_server_times_out_as_transport_failure() {
        // Accepts connections but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let api = FootballDataApi::new(ApiConfig {
            base_url: format!("http://{addr}"),
            token: TOKEN.to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();

        let err = api.fetch_matches(Some(date())).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.to_string(), "Network error: request timed out after 1s");
    }
}
