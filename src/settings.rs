use mlb_api::client::{ESPN_MLB_SITE_V2, MlbApi};
use std::path::PathBuf;

const DEFAULT_OUTPUT: &str = "data.json";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub output_path: PathBuf,
    pub log_filter: String,
    pub api_base: String,
    /// Local ESPN-format standings JSON used instead of the live endpoint.
    pub standings_file: Option<PathBuf>,
    pub scoreboard_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            api_base: ESPN_MLB_SITE_V2.to_owned(),
            standings_file: None,
            scoreboard_file: None,
        }
    }
}

impl Settings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            output_path: var("MLBWC_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            log_filter: var("MLBWC_LOG").unwrap_or(defaults.log_filter),
            api_base: var("MLBWC_ESPN_BASE").unwrap_or(defaults.api_base),
            standings_file: var("MLBWC_STANDINGS_JSON").map(PathBuf::from),
            scoreboard_file: var("MLBWC_SCOREBOARD_JSON").map(PathBuf::from),
        }
    }

    pub fn api_client(&self) -> MlbApi {
        MlbApi::new()
            .with_base_url(self.api_base.as_str())
            .with_standings_file(self.standings_file.clone())
            .with_scoreboard_file(self.scoreboard_file.clone())
    }
}
