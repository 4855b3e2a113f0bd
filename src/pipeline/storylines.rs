use crate::snapshot::GameResult;
use anyhow::{Result, ensure};
use log::warn;
use mlb_api::TeamStanding;

pub const MAX_STORYLINES: usize = 5;
const MAX_HOT_TEAMS: usize = 3;
const HOT_TEAM_MIN_WINS: usize = 2;

const TRADE_DEADLINE: &str =
    "Trade deadline (July 31) approaching - several contenders may become buyers or sellers";
const GENERAL: [&str; 2] = [
    "Multiple teams within 5 games of final wild card spots in both leagues",
    "September schedule strength could determine final playoff spots",
];
const FALLBACK_STORYLINE: &str = "Wild card races heating up as season enters final stretch";

/// Headline sentences for the dashboard, most specific first.
pub fn generate(al: &[TeamStanding], nl: &[TeamStanding], games: &[GameResult]) -> Vec<String> {
    match build(al, nl, games) {
        Ok(mut lines) => {
            lines.truncate(MAX_STORYLINES);
            lines
        }
        Err(e) => {
            warn!("Error generating storylines: {e}");
            vec![FALLBACK_STORYLINE.to_owned()]
        }
    }
}

fn build(al: &[TeamStanding], nl: &[TeamStanding], games: &[GameResult]) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    if let [leader, _, _, chaser, ..] = al {
        require(leader, "AL leader")?;
        require(chaser, "AL fourth place")?;
        lines.push(format!(
            "{} leads AL Wild Card race at {}, but {} remains within striking distance",
            leader.team, leader.pct, chaser.team
        ));
    }

    if let [leader, _, _, _, ..] = nl {
        require(leader, "NL leader")?;
        lines.push(format!(
            "{} controls NL Wild Card with {} winning percentage",
            leader.team, leader.pct
        ));
    }

    lines.push(TRADE_DEADLINE.to_owned());

    let hot = hot_teams(games);
    if !hot.is_empty() {
        lines.push(format!(
            "Recent surge by {} shaking up wild card picture",
            hot.join(", ")
        ));
    }

    lines.extend(GENERAL.iter().map(|s| (*s).to_owned()));
    Ok(lines)
}

fn require(row: &TeamStanding, what: &str) -> Result<()> {
    ensure!(!row.team.trim().is_empty(), "{what} has no team name");
    ensure!(!row.pct.trim().is_empty(), "{what} ({}) has no winning percentage", row.team);
    Ok(())
}

/// Teams winning at least two of the given games, in order of first appearance.
pub fn hot_teams(games: &[GameResult]) -> Vec<String> {
    let mut wins: Vec<(&str, usize)> = Vec::new();
    for game in games {
        let winner = game.winner();
        match wins.iter_mut().find(|(team, _)| *team == winner) {
            Some((_, count)) => *count += 1,
            None => wins.push((winner, 1)),
        }
    }
    wins.into_iter()
        .filter(|(_, count)| *count >= HOT_TEAM_MIN_WINS)
        .map(|(team, _)| team.to_owned())
        .take(MAX_HOT_TEAMS)
        .collect()
}
