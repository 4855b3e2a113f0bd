/// ESPN API raw wire types — serde shapes for deserializing ESPN responses.
/// These map to our clean domain types via the mapping functions in client.rs.
use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Standings  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsResponse {
    /// Conference groups, read one at a time so a single odd group can be
    /// skipped without losing the other league.
    pub children: Option<Vec<Value>>,
}

/// A conference ("American League") or, one level down, a division.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsGroup {
    pub name: Option<String>,
    pub standings: Option<EspnStandings>,
    /// Divisions, when the conference doesn't carry its own entries.
    pub children: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStandings {
    /// Kept as raw values so one malformed team entry can be skipped
    /// without failing the rest of the table.
    pub entries: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStandingEntry {
    pub team: Option<EspnTeam>,
    pub stats: Option<Vec<EspnStat>>,
}

/// Stats arrive positionally: wins, losses, pct, games back, ..., streak.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStat {
    pub value: Option<f64>,
    #[serde(rename = "displayValue")]
    pub display_value: Option<String>,
}

// ---------------------------------------------------------------------------
// Scoreboard  (site v2 API)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreboardResponse {
    pub events: Option<Vec<EspnEvent>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<EspnStatus>,
    pub competitions: Option<Vec<EspnCompetition>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatus {
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnStatusType {
    pub description: Option<String>, // "Final", "Postponed"
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnCompetition {
    pub competitors: Option<Vec<EspnCompetitor>>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnCompetitor {
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    /// The scoreboard sends scores as strings; some feeds use bare numbers.
    pub score: Option<Value>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EspnTeam {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    pub abbreviation: Option<String>,
}
