use crate::RoundKind;
use crate::error::{BracketError, BracketResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Seed shared by the default roster.
pub const LUCKY_SEED: u64 = 0x9272015;

/// Which seeds a strategy refuses to let lose in a given round. Seeds at or
/// below the returned threshold always advance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Protection {
    /// `base^(Sweet Sixteen - round)` through the Sweet Sixteen, nothing after.
    ExponentialBeforeSweetSixteen { base: u32 },
    /// Same threshold in every round.
    Fixed { seeds: u32 },
    #[serde(skip)]
    Custom(fn(RoundKind) -> u32),
}

impl Protection {
    pub fn protected_seeds(&self, round: RoundKind) -> u32 {
        match self {
            Protection::ExponentialBeforeSweetSixteen { base } => {
                if round > RoundKind::SweetSixteen {
                    0
                } else {
                    base.saturating_pow(RoundKind::SweetSixteen.index() - round.index())
                }
            }
            Protection::Fixed { seeds } => *seeds,
            Protection::Custom(f) => f(round),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strategy {
    pub name: String,
    /// Reseeds the random stream at the start of every season.
    pub seed: u64,
    /// Probability that the favorite wins an unprotected game.
    pub favorite_bias: f64,
    #[serde(default)]
    pub protection: Option<Protection>,
}

impl Strategy {
    pub fn new(name: impl Into<String>, seed: u64, favorite_bias: f64) -> Self {
        Self { name: name.into(), seed, favorite_bias, protection: None }
    }

    pub fn with_protection(mut self, protection: Protection) -> Self {
        self.protection = Some(protection);
        self
    }

    pub fn protected_seeds(&self, round: RoundKind) -> u32 {
        self.protection.map(|p| p.protected_seeds(round)).unwrap_or(0)
    }

    pub fn validate(&self) -> BracketResult<()> {
        if !(0.0..=1.0).contains(&self.favorite_bias) {
            return Err(BracketError::InvalidArgument(format!(
                "{}: favorite bias {} is outside [0, 1]",
                self.name, self.favorite_bias
            )));
        }
        Ok(())
    }

    /// The stock roster: three plain coin biases and four protected variants.
    pub fn defaults() -> Vec<Strategy> {
        let pow2 = Protection::ExponentialBeforeSweetSixteen { base: 2 };
        let pow3 = Protection::ExponentialBeforeSweetSixteen { base: 3 };
        vec![
            Strategy::new("All Favorites", LUCKY_SEED, 1.0),
            Strategy::new("All Underdogs", LUCKY_SEED, 0.0),
            Strategy::new("Coin Toss", LUCKY_SEED, 0.5),
            Strategy::new("50/50 w/POW(2) Protection", LUCKY_SEED, 0.5).with_protection(pow2),
            Strategy::new("75% w/POW(2) Protection", LUCKY_SEED, 0.75).with_protection(pow2),
            Strategy::new("50/50 w/POW(3) Protection", LUCKY_SEED, 0.5).with_protection(pow3),
            Strategy::new("75% w/POW(3) Protection", LUCKY_SEED, 0.75).with_protection(pow3),
        ]
    }
}

/// Parse a JSON array of strategies.
pub fn parse_roster(json: &str) -> BracketResult<Vec<Strategy>> {
    let roster: Vec<Strategy> =
        serde_json::from_str(json).map_err(|e| BracketError::Config(format!("invalid strategy json: {e}")))?;
    if roster.is_empty() {
        return Err(BracketError::Config("strategy roster is empty".into()));
    }
    let mut names = HashSet::new();
    for strategy in &roster {
        strategy.validate()?;
        if !names.insert(strategy.name.as_str()) {
            return Err(BracketError::Config(format!("duplicate strategy name {:?}", strategy.name)));
        }
    }
    Ok(roster)
}

pub fn load_roster(path: impl AsRef<Path>) -> BracketResult<Vec<Strategy>> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).map_err(|e| BracketError::Io(e, path.display().to_string()))?;
    parse_roster(&content)
}
