pub mod client;
pub mod espn;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of ESPN wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum League {
    American,
    National,
}

impl League {
    /// ESPN names its conference groups "American League" / "National League".
    /// Anything that isn't recognisably American is bucketed as National.
    pub fn from_group_name(name: &str) -> Self {
        if name.contains("American") {
            League::American
        } else {
            League::National
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            League::American => "AL",
            League::National => "NL",
        }
    }
}

/// Raw per-team standings line as parsed from one API entry, before ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamRecord {
    pub team: String,
    pub abbrev: String,
    pub wins: u32,
    pub losses: u32,
    pub pct: String,    // ".563"
    pub wcgb: String,   // "-" for the leader
    pub streak: String, // "W2", "L1", or "N/A"
}

impl TeamRecord {
    /// Numeric winning percentage used for ranking.
    ///
    /// ESPN's display value drops the leading zero (".563"), which parses fine.
    /// When the display value is unusable the percentage is recomputed from
    /// the win/loss columns.
    pub fn win_pct(&self) -> f64 {
        if let Ok(pct) = self.pct.trim().parse::<f64>()
            && pct.is_finite()
        {
            return pct;
        }
        let played = self.wins + self.losses;
        if played == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(played)
        }
    }

    pub fn record(&self) -> String {
        format!("{}-{}", self.wins, self.losses)
    }

    /// Freeze the record into a ranked standing row.
    pub fn into_standing(self, status: StandingStatus) -> TeamStanding {
        let record = self.record();
        TeamStanding {
            team: self.team,
            abbrev: self.abbrev,
            wins: self.wins,
            losses: self.losses,
            pct: self.pct,
            wcgb: self.wcgb,
            status,
            streak: self.streak,
            record,
        }
    }
}

/// A ranked standings row as it appears in the dashboard document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team: String,
    pub abbrev: String,
    pub wins: u32,
    pub losses: u32,
    pub pct: String,
    pub wcgb: String,
    pub status: StandingStatus,
    pub streak: String,
    pub record: String,
}

/// Playoff position label, derived purely from rank within a league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StandingStatus {
    #[serde(rename = "Division Leader")]
    DivisionLeader,
    #[serde(rename = "WC1")]
    WildCard1,
    #[serde(rename = "WC2")]
    WildCard2,
    #[serde(rename = "WC3")]
    WildCard3,
    Contender,
}

impl StandingStatus {
    /// Ranks 0-2 are treated as division leaders (top three of the whole
    /// league, not of each division), 3-5 hold the wild card spots.
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            0..=2 => StandingStatus::DivisionLeader,
            3 => StandingStatus::WildCard1,
            4 => StandingStatus::WildCard2,
            5 => StandingStatus::WildCard3,
            _ => StandingStatus::Contender,
        }
    }
}

/// Unranked team records bucketed by league.
#[derive(Debug, Clone, Default)]
pub struct LeagueTables {
    pub american: Vec<TeamRecord>,
    pub national: Vec<TeamRecord>,
}

impl LeagueTables {
    pub fn push(&mut self, league: League, record: TeamRecord) {
        match league {
            League::American => self.american.push(record),
            League::National => self.national.push(record),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.american.is_empty() && self.national.is_empty()
    }
}

/// One scoreboard game reduced to the fields the dashboard needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    pub away_team: String,
    pub home_team: String,
    pub away_score: u16,
    pub home_score: u16,
    pub status: String, // "Final", "Postponed", ...
}

impl Game {
    /// Home wins only on a strictly higher score; ties go to the away side.
    pub fn winner(&self) -> &str {
        if self.home_score > self.away_score {
            &self.home_team
        } else {
            &self.away_team
        }
    }

    pub fn loser(&self) -> &str {
        if self.winner() == self.home_team {
            &self.away_team
        } else {
            &self.home_team
        }
    }
}
