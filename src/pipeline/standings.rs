use crate::snapshot::Standings;
use chrono::NaiveDateTime;
use log::{error, info, warn};
use mlb_api::client::{MlbApi, map_standings};
use mlb_api::{LeagueTables, StandingStatus, TeamRecord, TeamStanding};
use serde::Deserialize;

/// Rows kept per league; the race rarely involves more than eight clubs.
pub const MAX_LEAGUE_ROWS: usize = 8;

const FALLBACK_STANDINGS_JSON: &str = include_str!("../../data/fallback_standings.json");

#[derive(Debug, Deserialize, Default)]
struct FallbackStandings {
    al_wildcard: Vec<TeamStanding>,
    nl_wildcard: Vec<TeamStanding>,
}

/// Fetch, parse and rank both leagues.
///
/// Bad team entries are dropped inside the parser; this stage only falls back
/// to the embedded table when the fetch fails outright or nothing usable
/// came back for either league.
pub async fn load(api: &MlbApi, now: NaiveDateTime) -> Standings {
    let tables = api
        .fetch_standings()
        .await
        .and_then(|raw| map_standings(&raw));

    match tables {
        Ok(tables) if !tables.is_empty() => rank_standings(tables, now),
        Ok(_) => {
            warn!("No teams parsed, using fallback standings");
            fallback_standings(now)
        }
        Err(e) => {
            warn!("Error fetching standings: {e}; using fallback standings");
            fallback_standings(now)
        }
    }
}

pub fn rank_standings(tables: LeagueTables, now: NaiveDateTime) -> Standings {
    Standings {
        al_wildcard: rank_league(tables.american),
        nl_wildcard: rank_league(tables.national),
        last_updated: now,
    }
}

/// Sort by winning percentage (best first), label by rank, keep the top rows.
pub fn rank_league(mut records: Vec<TeamRecord>) -> Vec<TeamStanding> {
    records.sort_by(|a, b| b.win_pct().total_cmp(&a.win_pct()));
    records
        .into_iter()
        .enumerate()
        .map(|(rank, record)| record.into_standing(StandingStatus::for_rank(rank)))
        .take(MAX_LEAGUE_ROWS)
        .collect()
}

/// Placeholder table shown when live standings are unavailable.
pub fn fallback_standings(now: NaiveDateTime) -> Standings {
    let fallback: FallbackStandings =
        serde_json::from_str(FALLBACK_STANDINGS_JSON).unwrap_or_else(|e| {
            error!("embedded fallback standings are invalid: {e}");
            FallbackStandings::default()
        });
    info!(
        "Using fallback standings ({} AL, {} NL)",
        fallback.al_wildcard.len(),
        fallback.nl_wildcard.len()
    );
    Standings {
        al_wildcard: fallback.al_wildcard,
        nl_wildcard: fallback.nl_wildcard,
        last_updated: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, 28)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap()
    }

    fn record(abbrev: &str, wins: u32, losses: u32) -> TeamRecord {
        let pct = f64::from(wins) / f64::from(wins + losses);
        TeamRecord {
            team: format!("{abbrev} Club"),
            abbrev: abbrev.into(),
            wins,
            losses,
            pct: format!("{pct:.3}").trim_start_matches('0').to_owned(),
            wcgb: "0".into(),
            streak: "N/A".into(),
        }
    }

    #[test]
    fn ten_team_league_gets_rank_based_status() {
        // deliberately shuffled input, strictly decreasing pct by index number
        let order = [4, 9, 0, 7, 2, 5, 8, 1, 6, 3];
        let records: Vec<TeamRecord> = order
            .iter()
            .map(|&i| record(&format!("T{i}"), 60 - i as u32, 40 + i as u32))
            .collect();

        let ranked = rank_league(records);
        assert_eq!(ranked.len(), MAX_LEAGUE_ROWS);

        let abbrevs: Vec<&str> = ranked.iter().map(|t| t.abbrev.as_str()).collect();
        assert_eq!(abbrevs, vec!["T0", "T1", "T2", "T3", "T4", "T5", "T6", "T7"]);

        let statuses: Vec<StandingStatus> = ranked.iter().map(|t| t.status).collect();
        assert_eq!(
            serde_json::to_value(statuses).unwrap(),
            json!([
                "Division Leader",
                "Division Leader",
                "Division Leader",
                "WC1",
                "WC2",
                "WC3",
                "Contender",
                "Contender"
            ])
        );
    }

    #[test]
    fn ranked_league_is_sorted_descending() {
        let ranked = rank_league(vec![
            record("LOW", 40, 60),
            record("TOP", 62, 38),
            record("MID", 50, 50),
        ]);
        let pcts: Vec<f64> = ranked
            .iter()
            .map(|t| t.pct.parse::<f64>().unwrap())
            .collect();
        assert!(pcts.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(ranked[0].abbrev, "TOP");
        assert_eq!(ranked[0].record, "62-38");
    }

    #[test]
    fn fallback_table_is_the_documented_literal() {
        let standings = fallback_standings(now());
        assert_eq!(standings.al_wildcard.len(), 7);
        assert_eq!(standings.nl_wildcard.len(), 7);
        assert_eq!(standings.al_wildcard[0].abbrev, "NYY");
        assert_eq!(standings.al_wildcard[0].status, StandingStatus::WildCard1);
        assert_eq!(standings.nl_wildcard[6].team, "Cincinnati Reds");
        assert_eq!(standings.nl_wildcard[6].wcgb, "10.5");
        assert_eq!(standings.last_updated, now());
    }

    #[tokio::test]
    async fn empty_tree_falls_back() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/standings")
            .with_status(200)
            .with_body(json!({ "children": [{ "name": "American League", "standings": { "entries": [] } }] }).to_string())
            .create_async()
            .await;

        let api = MlbApi::new().with_base_url(server.url());
        let standings = load(&api, now()).await;
        assert_eq!(standings, fallback_standings(now()));
    }

    #[tokio::test]
    async fn one_league_is_enough_to_skip_fallback() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({ "children": [{
            "name": "National League",
            "standings": { "entries": [{
                "team": { "displayName": "New York Mets", "abbreviation": "NYM" },
                "stats": [
                    { "value": 57, "displayValue": "57" },
                    { "value": 44, "displayValue": "44" },
                    { "value": 0.564, "displayValue": ".564" }
                ]
            }]}
        }]});
        server
            .mock("GET", "/standings")
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let api = MlbApi::new().with_base_url(server.url());
        let standings = load(&api, now()).await;
        assert!(standings.al_wildcard.is_empty());
        assert_eq!(standings.nl_wildcard.len(), 1);
        assert_eq!(standings.nl_wildcard[0].status, StandingStatus::DivisionLeader);
    }

    #[tokio::test]
    async fn malformed_league_keeps_the_good_one() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({ "children": [
            {
                "name": "American League",
                "standings": { "entries": [{
                    "team": { "displayName": "Seattle Mariners", "abbreviation": "SEA" },
                    "stats": [
                        { "value": 53, "displayValue": "53" },
                        { "value": 47, "displayValue": "47" },
                        { "value": 0.53, "displayValue": ".530" }
                    ]
                }]}
            },
            { "name": "National League", "standings": [] }
        ]});
        server
            .mock("GET", "/standings")
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let api = MlbApi::new().with_base_url(server.url());
        let standings = load(&api, now()).await;
        assert_eq!(standings.al_wildcard.len(), 1);
        assert_eq!(standings.al_wildcard[0].abbrev, "SEA");
        assert!(standings.nl_wildcard.is_empty());
    }
}
