use anyhow::{Context, Result, bail};
use football_data_api::GroupKey;
use football_data_api::client::{ApiConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use log::LevelFilter;
use std::collections::HashMap;
use std::time::Duration;

pub const TOKEN_VAR: &str = "FOOTBALL_DATA_TOKEN";
pub const BASE_URL_VAR: &str = "FOOTBALL_DATA_BASE_URL";
pub const TIMEOUT_VAR: &str = "MATCHDAY_TIMEOUT_SECS";
pub const REFRESH_VAR: &str = "MATCHDAY_REFRESH_SECS";
pub const GROUP_BY_VAR: &str = "MATCHDAY_GROUP_BY";
pub const LOG_VAR: &str = "MATCHDAY_LOG";

const DEFAULT_REFRESH: Duration = Duration::from_secs(60);

/// Startup configuration. Built once in `main` and handed to whoever needs it.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: LevelFilter,
    pub api: ApiConfig,
    /// `None` disables the periodic refresh.
    pub refresh_interval: Option<Duration>,
    pub group_key: GroupKey,
}

impl AppSettings {
    /// Read settings from the process environment, seeded from `.env` when present.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| non_empty(&vars, key);

        let Some(token) = get(TOKEN_VAR) else {
            bail!("{TOKEN_VAR} is not set; get a free key at https://www.football-data.org/client/register");
        };

        let base_url = get(BASE_URL_VAR).unwrap_or(DEFAULT_BASE_URL).to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            bail!("{BASE_URL_VAR} must be an absolute http(s) URL, got '{base_url}'");
        }

        let timeout = match get(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw.parse().with_context(|| format!("{TIMEOUT_VAR}='{raw}' is not a number"))?;
                if secs == 0 {
                    bail!("{TIMEOUT_VAR} must be at least 1 second");
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        let refresh_interval = match get(REFRESH_VAR) {
            Some(raw) => {
                let secs: u64 = raw.parse().with_context(|| format!("{REFRESH_VAR}='{raw}' is not a number"))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => Some(DEFAULT_REFRESH),
        };

        let group_key = match get(GROUP_BY_VAR) {
            Some(raw) => raw.parse::<GroupKey>().map_err(anyhow::Error::msg)?,
            None => GroupKey::default(),
        };

        let log_level = match get(LOG_VAR) {
            Some(raw) => raw
                .parse::<LevelFilter>()
                .map_err(|_| anyhow::anyhow!("{LOG_VAR}='{raw}' is not a log level"))?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            full_screen: false,
            log_level,
            api: ApiConfig {
                base_url,
                token: token.to_string(),
                timeout,
            },
            refresh_interval,
            group_key,
        })
    }
}

fn non_empty<'a>(vars: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}
