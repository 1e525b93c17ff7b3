use crate::{GameId, RoundKind};
use std::fmt;

pub type BracketResult<T> = Result<T, BracketError>;

#[derive(Debug)]
pub enum BracketError {
    Io(std::io::Error, String),
    Csv(csv::Error, String),
    Parse { field: &'static str, value: String },
    UnknownRound(String),
    /// Tournament tally other than a single loss on a loser-perspective record.
    MalformedRecord(String),
    IncompleteSeason { usable: usize },
    RankingMismatch { team: String, first: u32, second: u32 },
    ChampionshipCount(usize),
    MissingFeeder { game: GameId, round: RoundKind },
    /// A game linked under more than one next-round game.
    SharedFeeder { game: GameId, round: RoundKind },
    MissingRanking(String),
    /// Feeder seeds tied and the rankings could not separate the two teams.
    UnresolvedTieBreak { winner_side: (String, u32), loser_side: (String, u32) },
    InvalidArgument(String),
    Config(String),
}

impl fmt::Display for BracketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketError::Io(e, path) => write!(f, "I/O error for {path}: {e}"),
            BracketError::Csv(e, path) => write!(f, "CSV error for {path}: {e}"),
            BracketError::Parse { field, value } => {
                write!(f, "could not parse {field} from {value:?}")
            }
            BracketError::UnknownRound(label) => write!(f, "unknown round {label:?}"),
            BracketError::MalformedRecord(msg) => {
                write!(f, "encountered unexpected win/loss entry: {msg}")
            }
            BracketError::IncompleteSeason { usable } => {
                write!(f, "incomplete season: {usable} usable games, need at least 63")
            }
            BracketError::RankingMismatch { team, first, second } => {
                write!(f, "ranking mismatch: {team} has {first} and {second}")
            }
            BracketError::ChampionshipCount(n) => {
                write!(f, "expected exactly one national championship game, found {n}")
            }
            BracketError::MissingFeeder { game, round } => {
                write!(f, "{round} game #{game} is missing a previous-round game")
            }
            BracketError::SharedFeeder { game, round } => {
                write!(f, "{round} game #{game} feeds more than one next-round game")
            }
            BracketError::MissingRanking(team) => write!(f, "no season ranking for {team}"),
            BracketError::UnresolvedTieBreak { winner_side, loser_side } => write!(
                f,
                "cannot break seed tie between {} (ranked {}) and {} (ranked {})",
                winner_side.0, winner_side.1, loser_side.0, loser_side.1
            ),
            BracketError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            BracketError::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for BracketError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BracketError::Io(e, _) => Some(e),
            BracketError::Csv(e, _) => Some(e),
            _ => None,
        }
    }
}
