pub mod games;
pub mod odds;
pub mod standings;
pub mod storylines;

use crate::pipeline::games::{ImpactGenerator, LeadTemplateImpact};
use crate::pipeline::odds::{OddsProvider, StaticOdds};
use crate::snapshot::DashboardSnapshot;
use chrono::NaiveDateTime;
use log::info;
use mlb_api::client::MlbApi;

/// The swappable pieces of the pipeline.
pub struct Strategies {
    pub impact: Box<dyn ImpactGenerator>,
    pub odds: Box<dyn OddsProvider>,
}

impl Default for Strategies {
    fn default() -> Self {
        Self {
            impact: Box::new(LeadTemplateImpact),
            odds: Box::new(StaticOdds),
        }
    }
}

/// Run every stage in order and assemble the document.
///
/// Each stage recovers from its own failures, so this always yields a
/// complete snapshot; only writing it out can fail.
pub async fn build_snapshot(
    api: &MlbApi,
    now: NaiveDateTime,
    strategies: &Strategies,
) -> DashboardSnapshot {
    info!("Fetching MLB standings...");
    let standings = standings::load(api, now).await;

    info!("Fetching recent games...");
    let recent_games = games::load(api, now.date(), strategies.impact.as_ref()).await;

    info!("Fetching playoff odds...");
    let playoff_odds = odds::load(strategies.odds.as_ref(), &standings);

    info!("Generating storylines...");
    let storylines =
        storylines::generate(&standings.al_wildcard, &standings.nl_wildcard, &recent_games);

    DashboardSnapshot::new(standings, recent_games, playoff_odds, storylines, now)
}
