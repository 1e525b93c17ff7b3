//! Flat game records as published in the "Game By Game" tournament database
//! (http://www.hoopstournament.net/Database.html). One row per team per game,
//! written from the point of view of the team that lost it.
use crate::error::{BracketError, BracketResult};
use crate::RoundKind;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Column positions of the fixed-width CSV export. Only the columns the
/// simulator reads are listed.
pub mod column {
    pub const YEAR: usize = 0;
    pub const TEAM: usize = 1;
    pub const RANKING: usize = 7;
    pub const SEED: usize = 8;
    pub const OPPONENT: usize = 14;
    pub const ROUND: usize = 16;
    pub const REGION: usize = 17;
    pub const OPPONENT_RANKING: usize = 25;
    pub const OPPONENT_SEED: usize = 26;
    pub const OPPONENT_REGION: usize = 28;
    pub const WINS: usize = 34;
    pub const LOSSES: usize = 35;

    /// Total number of columns in a row.
    pub const COUNT: usize = 36;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub year: u16,
    pub round: RoundKind,
    pub team: String,
    pub seed: u8,
    pub region: String,
    /// Season ranking of `team`; 0 when unranked.
    pub ranking: u32,
    pub opponent: String,
    pub opponent_seed: u8,
    pub opponent_region: String,
    pub opponent_ranking: u32,
    pub wins: u32,
    pub losses: u32,
}

impl GameRecord {
    pub fn from_csv(row: &StringRecord) -> BracketResult<Self> {
        if row.len() < column::COUNT {
            return Err(BracketError::Parse {
                field: "row",
                value: format!("{} columns, expected {}", row.len(), column::COUNT),
            });
        }
        let text = |idx: usize| row.get(idx).unwrap_or_default().trim().to_owned();
        let round_label = text(column::ROUND);
        let round = RoundKind::from_label(&round_label)
            .ok_or(BracketError::UnknownRound(round_label))?;

        Ok(Self {
            year: parse_field("year", &text(column::YEAR))?,
            round,
            team: text(column::TEAM),
            seed: parse_field("seed", &text(column::SEED))?,
            region: text(column::REGION),
            ranking: parse_ranking(&text(column::RANKING))?,
            opponent: text(column::OPPONENT),
            opponent_seed: parse_field("opponent seed", &text(column::OPPONENT_SEED))?,
            opponent_region: text(column::OPPONENT_REGION),
            opponent_ranking: parse_ranking(&text(column::OPPONENT_RANKING))?,
            wins: parse_field("wins", &text(column::WINS))?,
            losses: parse_field("losses", &text(column::LOSSES))?,
        })
    }
}

fn parse_field<T: std::str::FromStr>(field: &'static str, value: &str) -> BracketResult<T> {
    value
        .parse()
        .map_err(|_| BracketError::Parse { field, value: value.to_owned() })
}

fn parse_ranking(value: &str) -> BracketResult<u32> {
    if value.is_empty() {
        return Ok(0);
    }
    parse_field("ranking", value)
}

/// Read every record in `path` and bucket them by season, keeping file order
/// within a season.
pub fn load_seasons(path: impl AsRef<Path>) -> BracketResult<BTreeMap<u16, Vec<GameRecord>>> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| BracketError::Io(e, display.clone()))?;
    read_seasons(file, &display)
}

pub fn read_seasons<R: std::io::Read>(
    reader: R,
    source: &str,
) -> BracketResult<BTreeMap<u16, Vec<GameRecord>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .quote(b'"')
        .delimiter(b',')
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut seasons: BTreeMap<u16, Vec<GameRecord>> = BTreeMap::new();
    for row in reader.records() {
        let row = row.map_err(|e| BracketError::Csv(e, source.to_owned()))?;
        let record = GameRecord::from_csv(&row)?;
        seasons.entry(record.year).or_default().push(record);
    }
    log::debug!("loaded {} seasons from {source}", seasons.len());
    Ok(seasons)
}
