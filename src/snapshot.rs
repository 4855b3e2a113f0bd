use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime, NaiveTime};
use log::debug;
use mlb_api::{Game, TeamStanding};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Local hour at which the next scheduled refresh is advertised.
const NEXT_UPDATE_HOUR: i64 = 7;

// ---------------------------------------------------------------------------
// Dashboard document — the sole contract with the display page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub standings: Standings,
    pub recent_games: Vec<GameResult>,
    pub playoff_odds: PlayoffOdds,
    pub storylines: Vec<String>,
    pub generated_at: NaiveDateTime,
    pub next_update: NaiveDateTime,
}

impl DashboardSnapshot {
    pub fn new(
        standings: Standings,
        recent_games: Vec<GameResult>,
        playoff_odds: PlayoffOdds,
        storylines: Vec<String>,
        generated_at: NaiveDateTime,
    ) -> Self {
        Self {
            standings,
            recent_games,
            playoff_odds,
            storylines,
            generated_at,
            next_update: next_update_after(generated_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    pub al_wildcard: Vec<TeamStanding>,
    pub nl_wildcard: Vec<TeamStanding>,
    pub last_updated: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub away_team: String,
    pub home_team: String,
    pub away_score: u16,
    pub home_score: u16,
    pub status: String,
    pub impact: String,
}

impl GameResult {
    pub fn new(game: Game, impact: String) -> Self {
        Self {
            away_team: game.away_team,
            home_team: game.home_team,
            away_score: game.away_score,
            home_score: game.home_score,
            status: game.status,
            impact,
        }
    }

    /// Same rule as the scoreboard: home must outscore away to win.
    pub fn winner(&self) -> &str {
        if self.home_score > self.away_score {
            &self.home_team
        } else {
            &self.away_team
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayoffOdds {
    pub al_odds: Vec<OddsEntry>,
    pub nl_odds: Vec<OddsEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OddsEntry {
    pub team: String,
    pub odds: String, // "78%"
}

impl OddsEntry {
    pub fn new(team: &str, odds: &str) -> Self {
        Self { team: team.to_owned(), odds: odds.to_owned() }
    }
}

/// Tomorrow at 07:00:00, whatever time today the run happens.
pub fn next_update_after(generated_at: NaiveDateTime) -> NaiveDateTime {
    let today = generated_at.date();
    let tomorrow = today.succ_opt().unwrap_or(today);
    tomorrow.and_time(NaiveTime::MIN) + Duration::hours(NEXT_UPDATE_HOUR)
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Serialize the snapshot as pretty JSON and replace `path` with it.
///
/// The document is written to a sibling `.tmp` file first and renamed into
/// place, so the display page never reads a half-written file.
pub fn write_snapshot(snapshot: &DashboardSnapshot, path: &Path) -> Result<()> {
    let mut json =
        serde_json::to_string_pretty(snapshot).context("failed to serialize dashboard snapshot")?;
    json.push('\n');

    let tmp = temp_path(path);
    debug!("writing {} bytes to {}", json.len(), tmp.display());
    fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| {
            format!("failed to move {} into place at {}", tmp.display(), path.display())
        });
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mlb_api::StandingStatus;
    use serde_json::Value;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn sample() -> DashboardSnapshot {
        let now = at(2025, 7, 28, 14, 30, 5);
        let standing = TeamStanding {
            team: "Seattle Mariners".into(),
            abbrev: "SEA".into(),
            wins: 53,
            losses: 47,
            pct: ".530".into(),
            wcgb: "-".into(),
            status: StandingStatus::DivisionLeader,
            streak: "L1".into(),
            record: "53-47".into(),
        };
        DashboardSnapshot::new(
            Standings {
                al_wildcard: vec![standing],
                nl_wildcard: vec![],
                last_updated: now,
            },
            vec![GameResult {
                away_team: "BOS".into(),
                home_team: "SEA".into(),
                away_score: 5,
                home_score: 4,
                status: "Final".into(),
                impact: "BOS gains ground in wild card race".into(),
            }],
            PlayoffOdds {
                al_odds: vec![OddsEntry::new("BOS", "78%")],
                nl_odds: vec![],
            },
            vec!["Trade deadline approaching".into()],
            now,
        )
    }

    #[test]
    fn next_update_is_next_morning() {
        assert_eq!(
            next_update_after(at(2025, 7, 28, 14, 30, 5)),
            at(2025, 7, 29, 7, 0, 0)
        );
        // just after midnight still means the following day
        assert_eq!(
            next_update_after(at(2025, 7, 28, 0, 0, 1)),
            at(2025, 7, 29, 7, 0, 0)
        );
        assert_eq!(
            next_update_after(at(2025, 7, 28, 23, 59, 59)),
            at(2025, 7, 29, 7, 0, 0)
        );
    }

    #[test]
    fn next_update_rolls_over_month_and_year() {
        assert_eq!(
            next_update_after(at(2025, 9, 30, 8, 0, 0)),
            at(2025, 10, 1, 7, 0, 0)
        );
        assert_eq!(
            next_update_after(at(2025, 12, 31, 6, 0, 0)),
            at(2026, 1, 1, 7, 0, 0)
        );
    }

    #[test]
    fn written_file_has_every_required_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let snapshot = sample();
        write_snapshot(&snapshot, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n  \"standings\""), "expected 2-space pretty output");

        let doc: Value = serde_json::from_str(&text).unwrap();
        for key in ["standings", "recent_games", "playoff_odds", "storylines", "generated_at", "next_update"] {
            assert!(doc.get(key).is_some(), "missing {key}");
        }
        for key in ["al_wildcard", "nl_wildcard", "last_updated"] {
            assert!(doc["standings"].get(key).is_some(), "missing standings.{key}");
        }
        assert_eq!(doc["standings"]["al_wildcard"][0]["status"], "Division Leader");
        assert_eq!(doc["generated_at"], "2025-07-28T14:30:05");
        assert_eq!(doc["next_update"], "2025-07-29T07:00:00");

        let back: DashboardSnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(back, snapshot);
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "stale").unwrap();
        write_snapshot(&sample(), &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with('{'));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("data.json");
        assert!(write_snapshot(&sample(), &path).is_err());
    }

    #[test]
    fn winner_prefers_away_on_tie() {
        let mut game = sample().recent_games.remove(0);
        assert_eq!(game.winner(), "BOS");
        game.home_score = 9;
        assert_eq!(game.winner(), "SEA");
        game.away_score = 9;
        assert_eq!(game.winner(), "BOS");
    }
}
