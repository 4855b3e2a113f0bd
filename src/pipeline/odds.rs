use crate::snapshot::{OddsEntry, PlayoffOdds, Standings};
use anyhow::Result;
use log::warn;

/// Produces per-league playoff odds for the dashboard.
pub trait OddsProvider {
    fn compute_odds(&self, standings: &Standings) -> Result<PlayoffOdds>;
}

/// Hand-maintained odds table. Ignores the live standings entirely.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticOdds;

const AL_ODDS: [(&str, &str); 6] = [
    ("BOS", "78%"),
    ("SEA", "65%"),
    ("HOU", "61%"),
    ("LAA", "35%"),
    ("MIN", "28%"),
    ("CLE", "22%"),
];

const NL_ODDS: [(&str, &str); 6] = [
    ("NYM", "82%"),
    ("ATL", "71%"),
    ("PHI", "69%"),
    ("STL", "45%"),
    ("MIL", "38%"),
    ("SF", "31%"),
];

impl OddsProvider for StaticOdds {
    fn compute_odds(&self, _standings: &Standings) -> Result<PlayoffOdds> {
        Ok(PlayoffOdds {
            al_odds: odds_table(&AL_ODDS),
            nl_odds: odds_table(&NL_ODDS),
        })
    }
}

fn odds_table(rows: &[(&str, &str)]) -> Vec<OddsEntry> {
    rows.iter()
        .map(|(team, odds)| OddsEntry::new(team, odds))
        .collect()
}

/// Empty tables if the provider fails; odds are never worth failing the run over.
pub fn load(provider: &dyn OddsProvider, standings: &Standings) -> PlayoffOdds {
    provider.compute_odds(standings).unwrap_or_else(|e| {
        warn!("Error computing playoff odds: {e:#}");
        PlayoffOdds::default()
    })
}
