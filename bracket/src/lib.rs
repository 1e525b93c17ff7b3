pub mod builder;
pub mod error;
pub mod predict;
pub mod schema;
pub mod score;
pub mod strategy;
pub mod tree;

#[cfg(test)]
pub(crate) mod fixtures;

pub use builder::{SeasonRankings, build_bracket};
pub use error::{BracketError, BracketResult};
pub use predict::{predict, predict_with};
pub use schema::{GameRecord, load_seasons};
pub use score::{MAX_SCORE, RoundScore, Scorecard, score};
pub use strategy::{Protection, Strategy};
pub use tree::Bracket;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Number of teams in the main draw.
pub const TOTAL_TEAMS: u32 = 64;

/// Minimum number of records needed to describe every game of a 64-team bracket.
pub const MIN_SEASON_GAMES: usize = 63;

// ---------------------------------------------------------------------------
// Round ordering table
// ---------------------------------------------------------------------------

/// Tournament stage. Ordered from earliest to latest; `index()` is the
/// position in that order and doubles as the scoring exponent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoundKind {
    #[default]
    OpeningRound, // Play-in games, never part of the tree
    RoundOf64,
    RoundOf32,
    SweetSixteen,
    EliteEight,
    NationalSemifinals,
    NationalChampionship,
}

impl RoundKind {
    pub const ALL: [RoundKind; 7] = [
        RoundKind::OpeningRound,
        RoundKind::RoundOf64,
        RoundKind::RoundOf32,
        RoundKind::SweetSixteen,
        RoundKind::EliteEight,
        RoundKind::NationalSemifinals,
        RoundKind::NationalChampionship,
    ];

    /// Rounds represented in the bracket tree, leaves first.
    pub const SCORED: [RoundKind; 6] = [
        RoundKind::RoundOf64,
        RoundKind::RoundOf32,
        RoundKind::SweetSixteen,
        RoundKind::EliteEight,
        RoundKind::NationalSemifinals,
        RoundKind::NationalChampionship,
    ];

    /// Label used by the historical data set.
    pub fn label(&self) -> &'static str {
        match self {
            RoundKind::OpeningRound => "Opening Round",
            RoundKind::RoundOf64 => "Round of 64",
            RoundKind::RoundOf32 => "Round of 32",
            RoundKind::SweetSixteen => "Sweet Sixteen",
            RoundKind::EliteEight => "Elite Eight",
            RoundKind::NationalSemifinals => "National Semifinals",
            RoundKind::NationalChampionship => "National Championship",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|round| round.label() == label)
    }

    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn is_tree_round(self) -> bool {
        self != RoundKind::OpeningRound
    }

    pub fn prev(self) -> Option<Self> {
        match self {
            RoundKind::OpeningRound => None,
            RoundKind::RoundOf64 => Some(RoundKind::OpeningRound),
            RoundKind::RoundOf32 => Some(RoundKind::RoundOf64),
            RoundKind::SweetSixteen => Some(RoundKind::RoundOf32),
            RoundKind::EliteEight => Some(RoundKind::SweetSixteen),
            RoundKind::NationalSemifinals => Some(RoundKind::EliteEight),
            RoundKind::NationalChampionship => Some(RoundKind::NationalSemifinals),
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            RoundKind::OpeningRound => Some(RoundKind::RoundOf64),
            RoundKind::RoundOf64 => Some(RoundKind::RoundOf32),
            RoundKind::RoundOf32 => Some(RoundKind::SweetSixteen),
            RoundKind::SweetSixteen => Some(RoundKind::EliteEight),
            RoundKind::EliteEight => Some(RoundKind::NationalSemifinals),
            RoundKind::NationalSemifinals => Some(RoundKind::NationalChampionship),
            RoundKind::NationalChampionship => None,
        }
    }
}

impl fmt::Display for RoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const REGIONS: [&str; 4] = ["East", "Midwest", "South", "West"];

/// Position of a region in the fixed region order. Combined labels such as
/// "East/West" (Final Four games) have no position.
pub fn region_order(region: &str) -> Option<usize> {
    REGIONS.iter().position(|r| *r == region)
}

// ---------------------------------------------------------------------------
// Game node
// ---------------------------------------------------------------------------

/// Handle of a game inside its owning [`Bracket`] arena.
pub type GameId = usize;

/// One side of a game. A wiped (not yet predicted) slot is `Default`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    pub seed: u8,
    pub region: String,
}

impl Participant {
    pub fn new(name: impl Into<String>, seed: u8, region: impl Into<String>) -> Self {
        Self { name: name.into(), seed, region: region.into() }
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    pub round: RoundKind,
    pub winner: Participant,
    pub loser: Participant,
    /// Game one round later that this game's winner plays in. `None` for the championship.
    pub next_game: Option<GameId>,
    /// Feeder game whose winner is recorded as this game's winner.
    pub winner_previous_game: Option<GameId>,
    /// Feeder game whose winner is recorded as this game's loser.
    pub loser_previous_game: Option<GameId>,
}

impl Game {
    pub fn new(round: RoundKind, winner: Participant, loser: Participant) -> Self {
        Self { round, winner, loser, ..Default::default() }
    }

    pub fn is_leaf(&self) -> bool {
        self.winner_previous_game.is_none() && self.loser_previous_game.is_none()
    }

    pub fn region(&self) -> Cow<'_, str> {
        if self.loser.region == self.winner.region {
            Cow::Borrowed(&self.loser.region)
        } else {
            Cow::Owned(format!("{}/{}", self.loser.region, self.winner.region))
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {} [{}] vs. {} [{}]",
            self.round,
            self.region(),
            self.winner.name,
            self.winner.seed,
            self.loser.name,
            self.loser.seed
        )
    }
}
