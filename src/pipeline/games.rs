use crate::snapshot::GameResult;
use chrono::NaiveDate;
use log::{error, info, warn};
use mlb_api::Game;
use mlb_api::client::{MlbApi, map_scoreboard, scoreboard_date};

/// Clubs whose games are worth surfacing in the wild card view.
pub const WILD_CARD_CONTENDERS: [&str; 15] = [
    "BOS", "SEA", "HOU", "LAA", "MIN", "KC", "CLE", "NYM", "ATL", "PHI", "STL", "MIL", "SF", "CIN",
    "ARI",
];

pub const MAX_RECENT_GAMES: usize = 10;

const FALLBACK_GAMES_JSON: &str = include_str!("../../data/fallback_games.json");

/// Writes the one-line "what this result means" blurb for a game.
pub trait ImpactGenerator {
    fn impact(&self, game: &Game) -> String;
}

/// Always uses the first of the four canned sentences.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeadTemplateImpact;

impl ImpactGenerator for LeadTemplateImpact {
    fn impact(&self, game: &Game) -> String {
        let [lead, ..] = impact_templates(game);
        lead
    }
}

pub fn impact_templates(game: &Game) -> [String; 4] {
    let winner = game.winner();
    let loser = game.loser();
    [
        format!("{winner} gains ground in wild card race"),
        format!("{loser} falls further behind in playoff hunt"),
        format!("Crucial win for {winner} in tight wild card battle"),
        format!("{winner} keeps playoff hopes alive with victory"),
    ]
}

/// Yesterday's contender games, or the canned list if the scoreboard can't be read.
pub async fn load(api: &MlbApi, today: NaiveDate, impact: &dyn ImpactGenerator) -> Vec<GameResult> {
    let date = scoreboard_date(today);
    match api
        .fetch_scoreboard(date)
        .await
        .and_then(|raw| map_scoreboard(&raw, &WILD_CARD_CONTENDERS))
    {
        Ok(games) => {
            let total = games.len();
            let selected = select_recent(games, impact);
            info!("Kept {} of {total} contender games from {date}", selected.len());
            selected
        }
        Err(e) => {
            warn!("Error fetching recent games: {e}; using fallback games");
            fallback_games()
        }
    }
}

/// The first ten contender games in scoreboard order, each with its blurb.
pub fn select_recent(games: Vec<Game>, impact: &dyn ImpactGenerator) -> Vec<GameResult> {
    games
        .into_iter()
        .take(MAX_RECENT_GAMES)
        .map(|g| {
            let blurb = impact.impact(&g);
            GameResult::new(g, blurb)
        })
        .collect()
}

pub fn fallback_games() -> Vec<GameResult> {
    serde_json::from_str(FALLBACK_GAMES_JSON).unwrap_or_else(|e| {
        error!("embedded fallback games are invalid: {e}");
        Vec::new()
    })
}
