use crate::espn::{
    EspnCompetitor, EspnEvent, EspnStandingEntry, EspnStat, ScoreboardResponse, StandingsGroup,
    StandingsResponse,
};
use crate::{Game, League, LeagueTables, TeamRecord};
use chrono::NaiveDate;
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

pub type ApiResult<T> = Result<T, ApiError>;

pub const ESPN_MLB_SITE_V2: &str = "https://site.api.espn.com/apis/site/v2/sports/baseball/mlb";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// MLB API client backed by ESPN's public endpoints.
#[derive(Debug, Clone)]
pub struct MlbApi {
    client: Client,
    base_url: String,
    standings_file: Option<PathBuf>,
    scoreboard_file: Option<PathBuf>,
}

impl Default for MlbApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent(BROWSER_USER_AGENT)
                .build()
                .unwrap_or_default(),
            base_url: ESPN_MLB_SITE_V2.to_owned(),
            standings_file: None,
            scoreboard_file: None,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Json(serde_json::Error, String),
    NotFound(String),
    Malformed(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Json(e, what) => write!(f, "Unexpected JSON shape in {what}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Malformed(msg) => write!(f, "Malformed data: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl MlbApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another host serving the same paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Read standings from a local ESPN-format JSON file instead of the network.
    pub fn with_standings_file(mut self, path: Option<PathBuf>) -> Self {
        self.standings_file = path;
        self
    }

    /// Read the scoreboard from a local ESPN-format JSON file instead of the network.
    pub fn with_scoreboard_file(mut self, path: Option<PathBuf>) -> Self {
        self.scoreboard_file = path;
        self
    }

    /// Fetch the full MLB standings tree as raw JSON.
    pub async fn fetch_standings(&self) -> ApiResult<Value> {
        if let Some(path) = &self.standings_file {
            return read_json_file(path);
        }
        let url = format!("{}/standings", self.base_url);
        info!("Fetching standings from: {url}");
        let raw = self.get(&url).await?;
        if let Some(obj) = raw.as_object() {
            debug!("standings response keys: {:?}", obj.keys().collect::<Vec<_>>());
        }
        Ok(raw)
    }

    /// Fetch the scoreboard for a single calendar day as raw JSON.
    pub async fn fetch_scoreboard(&self, date: NaiveDate) -> ApiResult<Value> {
        if let Some(path) = &self.scoreboard_file {
            return read_json_file(path);
        }
        let url = format!("{}/scoreboard?dates={}", self.base_url, espn_date(date));
        info!("Fetching scoreboard from: {url}");
        self.get(&url).await
    }

    async fn get(&self, url: &str) -> ApiResult<Value> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        let response = response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

fn read_json_file(path: &Path) -> ApiResult<Value> {
    debug!("reading local snapshot {}", path.display());
    let content = std::fs::read_to_string(path)
        .map_err(|e| ApiError::NotFound(format!("could not read {}: {e}", path.display())))?;
    serde_json::from_str(&content).map_err(|e| ApiError::Json(e, path.display().to_string()))
}

/// The scoreboard of interest is always the previous calendar day.
pub fn scoreboard_date(today: NaiveDate) -> NaiveDate {
    today.pred_opt().unwrap_or(today)
}

/// ESPN's `dates` query parameter format.
pub fn espn_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

// ---------------------------------------------------------------------------
// Mapping: ESPN standings → league tables
// ---------------------------------------------------------------------------

/// Parse a standings payload into unranked AL/NL tables.
///
/// Groups and individual team entries that don't have the expected shape are
/// logged and skipped. Only a payload whose top level can't be read at all is
/// an error; an empty result is left to the caller to judge.
pub fn map_standings(raw: &Value) -> ApiResult<LeagueTables> {
    let response =
        StandingsResponse::deserialize(raw).map_err(|e| ApiError::Json(e, "standings".into()))?;

    let mut tables = LeagueTables::default();
    for conference in response.children.unwrap_or_default() {
        let name = group_name(&conference);
        info!("Processing league: {name}");
        collect_group(&conference, League::from_group_name(name), &mut tables);
    }

    info!(
        "Parsed {} AL teams, {} NL teams",
        tables.american.len(),
        tables.national.len()
    );
    Ok(tables)
}

fn collect_group(raw: &Value, league: League, tables: &mut LeagueTables) {
    let name = group_name(raw);
    let group = match StandingsGroup::deserialize(raw) {
        Ok(group) => group,
        Err(e) => {
            warn!("Skipping standings group {name}: {e}");
            return;
        }
    };
    let entries = group
        .standings
        .as_ref()
        .and_then(|s| s.entries.as_deref())
        .unwrap_or_default();

    if entries.is_empty() {
        let divisions = group.children.as_deref().unwrap_or_default();
        if divisions.is_empty() {
            warn!("No standings data found for {name}");
        }
        for division in divisions {
            collect_group(division, league, tables);
        }
        return;
    }

    debug!("Found {} entries for {name}", entries.len());
    for entry in entries {
        match map_standing_entry(entry) {
            Ok(record) => tables.push(league, record),
            Err(e) => warn!("Skipping {} standings entry: {e}", league.label()),
        }
    }
}

fn group_name(raw: &Value) -> &str {
    raw.get("name").and_then(Value::as_str).unwrap_or("Unknown")
}

fn map_standing_entry(raw: &Value) -> ApiResult<TeamRecord> {
    let entry = EspnStandingEntry::deserialize(raw)
        .map_err(|e| ApiError::Json(e, "standings entry".into()))?;

    let team = entry.team.unwrap_or_default();
    let name = team.display_name.unwrap_or_else(|| "Unknown".into());
    let stats = entry.stats.unwrap_or_default();

    if stats.len() < 3 {
        return Err(ApiError::Malformed(format!(
            "insufficient stats data for team: {name}"
        )));
    }

    let display = |stat: &EspnStat, default: &str| {
        stat.display_value
            .clone()
            .unwrap_or_else(|| default.to_owned())
    };

    let wcgb = stats.get(3).map(|s| display(s, "0")).unwrap_or_else(|| "0".into());
    let streak = match stats.last() {
        Some(last) if stats.len() > 5 => display(last, "N/A"),
        _ => "N/A".into(),
    };

    Ok(TeamRecord {
        team: name,
        abbrev: team.abbreviation.unwrap_or_else(|| "UNK".into()),
        wins: stat_count(&stats[0]),
        losses: stat_count(&stats[1]),
        pct: display(&stats[2], ".000"),
        wcgb,
        streak,
    })
}

fn stat_count(stat: &EspnStat) -> u32 {
    stat.value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u32)
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Mapping: ESPN scoreboard → games
// ---------------------------------------------------------------------------

/// Parse the scoreboard games that involve at least one of `teams`.
///
/// Events are matched on team abbreviations first; scores and status are
/// only read for the games that are kept. Unlike standings, a single
/// unreadable kept event fails the whole batch: the caller substitutes its
/// fallback list rather than showing a partial day.
pub fn map_scoreboard(raw: &Value, teams: &[&str]) -> ApiResult<Vec<Game>> {
    let response =
        ScoreboardResponse::deserialize(raw).map_err(|e| ApiError::Json(e, "scoreboard".into()))?;
    let events = response.events.unwrap_or_default();
    debug!("scoreboard carries {} events", events.len());

    let mut games = Vec::new();
    for event in &events {
        if let Some(game) = map_event_to_game(event, teams)? {
            games.push(game);
        }
    }
    Ok(games)
}

/// `Ok(None)` when neither side is one of `teams`.
fn map_event_to_game(event: &EspnEvent, teams: &[&str]) -> ApiResult<Option<Game>> {
    let label = event
        .name
        .clone()
        .or_else(|| event.id.clone())
        .unwrap_or_else(|| "unnamed event".into());

    let competitors = event
        .competitions
        .as_deref()
        .and_then(|c| c.first())
        .and_then(|c| c.competitors.as_deref())
        .unwrap_or_default();

    let (home, away) = split_competitors(competitors)
        .ok_or_else(|| ApiError::Malformed(format!("{label}: expected two competitors")))?;
    let home_team = competitor_abbrev(home, &label)?;
    let away_team = competitor_abbrev(away, &label)?;

    if !teams.iter().any(|t| *t == home_team || *t == away_team) {
        debug!("skipping {label}: no tracked team");
        return Ok(None);
    }

    let status = event
        .status
        .as_ref()
        .and_then(|s| s.status_type.as_ref())
        .and_then(|t| t.description.clone())
        .ok_or_else(|| ApiError::Malformed(format!("{label}: missing status description")))?;

    Ok(Some(Game {
        away_score: competitor_score(away, &label)?,
        home_score: competitor_score(home, &label)?,
        away_team,
        home_team,
        status,
    }))
}

/// Use "home"/"away" flags when present, falling back to index order
/// (ESPN lists the home side first).
fn split_competitors(competitors: &[EspnCompetitor]) -> Option<(&EspnCompetitor, &EspnCompetitor)> {
    let home = competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some("home"))
        .or_else(|| competitors.first())?;
    let away = competitors
        .iter()
        .find(|c| c.home_away.as_deref() == Some("away"))
        .or_else(|| competitors.get(1))?;
    Some((home, away))
}

fn competitor_abbrev(c: &EspnCompetitor, label: &str) -> ApiResult<String> {
    c.team
        .as_ref()
        .and_then(|t| t.abbreviation.clone())
        .ok_or_else(|| ApiError::Malformed(format!("{label}: competitor without abbreviation")))
}

fn competitor_score(c: &EspnCompetitor, label: &str) -> ApiResult<u16> {
    let score = match &c.score {
        Some(Value::String(s)) => s.trim().parse::<u16>().ok(),
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        _ => None,
    };
    score.ok_or_else(|| ApiError::Malformed(format!("{label}: unreadable score {:?}", c.score)))
}
