use crate::error::BracketResult;
use crate::tree::Bracket;
use crate::{RoundKind, TOTAL_TEAMS};
use serde::{Deserialize, Serialize};

/// Upper bound on any scorecard total: every scored round is worth 32 points
/// when picked perfectly.
pub const MAX_SCORE: u32 = (TOTAL_TEAMS / 2) * RoundKind::SCORED.len() as u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScore {
    pub round: RoundKind,
    pub points: u32,
    pub predicted: Vec<String>,
    pub actual: Vec<String>,
    /// Predicted winners that really did win, in predicted order.
    pub intersection: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub total: u32,
    pub rounds: Vec<RoundScore>,
}

impl Scorecard {
    pub fn round(&self, round: RoundKind) -> Option<&RoundScore> {
        self.rounds.iter().find(|r| r.round == round)
    }
}

/// Score a predicted bracket against the real one. Each correct winner in
/// round `i` (Round of 64 = 1) is worth `2^(i-1)` points; only winners count.
pub fn score(predicted: &Bracket, actual: &Bracket) -> BracketResult<Scorecard> {
    predicted.validate_championship()?;
    actual.validate_championship()?;

    let mut card = Scorecard::default();
    for round in RoundKind::SCORED {
        let predicted_winners: Vec<String> =
            predicted.round_winners(round).into_iter().map(str::to_owned).collect();
        let actual_winners: Vec<String> =
            actual.round_winners(round).into_iter().map(str::to_owned).collect();
        let intersection: Vec<String> = predicted_winners
            .iter()
            .filter(|winner| actual_winners.contains(winner))
            .cloned()
            .collect();

        let points = 2u32.pow(round.index() - 1) * intersection.len() as u32;
        card.total += points;
        card.rounds.push(RoundScore {
            round,
            points,
            predicted: predicted_winners,
            actual: actual_winners,
            intersection,
        });
    }
    Ok(card)
}
