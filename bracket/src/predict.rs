//! Fills a wiped bracket from the leaves up with a biased, seeded coin toss.
//!
//! Every game draws exactly one value from the strategy's stream, in
//! post-order (winner-side feeder, loser-side feeder, then the game itself),
//! so the same seed, tree and strategy always yield the same bracket.
use crate::builder::SeasonRankings;
use crate::error::{BracketError, BracketResult};
use crate::strategy::Strategy;
use crate::tree::Bracket;
use crate::{GameId, Participant};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Which side of a game came out on top of the coin toss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Favorite,
    Protected,
    Upset,
}

/// Feeder slot of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Winner,
    Loser,
}

#[derive(Debug, Clone)]
struct Contender {
    team: Participant,
    feeder: Option<GameId>,
}

/// Predict every game of `bracket` in place with a fresh stream seeded from
/// `strategy.seed`.
pub fn predict(bracket: &mut Bracket, strategy: &Strategy, rankings: &SeasonRankings) -> BracketResult<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(strategy.seed);
    predict_with(bracket, strategy, rankings, &mut rng)
}

pub fn predict_with<R: Rng + ?Sized>(
    bracket: &mut Bracket,
    strategy: &Strategy,
    rankings: &SeasonRankings,
    rng: &mut R,
) -> BracketResult<()> {
    strategy.validate()?;
    let root = bracket.root();
    let mut predictor = Predictor { strategy, rankings, rng };
    predictor.fill(bracket, root)
}

/// Resolve one game once the favorite is known.
pub fn decide(favorite_seed: u8, protected_seeds: u32, draw: f64, favorite_bias: f64) -> Outcome {
    if u32::from(favorite_seed) <= protected_seeds {
        Outcome::Protected
    } else if draw > favorite_bias {
        Outcome::Upset
    } else {
        Outcome::Favorite
    }
}

/// Pick the favorite between two feeders whose winners share a seed, using
/// season rankings (0 = unranked). Two unranked teams go to the winner side.
pub fn break_tie(winner_side: (&str, u32), loser_side: (&str, u32)) -> BracketResult<Side> {
    let (w, l) = (winner_side.1, loser_side.1);
    if w == 0 && l == 0 {
        Ok(Side::Winner)
    } else if w != 0 && (l == 0 || w < l) {
        Ok(Side::Winner)
    } else if l != 0 && (w == 0 || l < w) {
        Ok(Side::Loser)
    } else {
        Err(BracketError::UnresolvedTieBreak {
            winner_side: (winner_side.0.to_owned(), w),
            loser_side: (loser_side.0.to_owned(), l),
        })
    }
}

struct Predictor<'a, R: ?Sized> {
    strategy: &'a Strategy,
    rankings: &'a SeasonRankings,
    rng: &'a mut R,
}

impl<R: Rng + ?Sized> Predictor<'_, R> {
    fn fill(&mut self, bracket: &mut Bracket, id: GameId) -> BracketResult<()> {
        let game = bracket.game(id);
        let (round, winner_prev, loser_prev) =
            (game.round, game.winner_previous_game, game.loser_previous_game);

        if let Some(prev) = winner_prev {
            self.fill(bracket, prev)?;
        }
        if let Some(prev) = loser_prev {
            self.fill(bracket, prev)?;
        }

        let (favorite, underdog) = match (winner_prev, loser_prev) {
            (Some(w), Some(l)) => self.order_feeders(bracket, w, l)?,
            (None, None) => order_leaf(bracket, id),
            _ => return Err(BracketError::MissingFeeder { game: id, round }),
        };

        let protected = self.strategy.protected_seeds(round);
        let draw: f64 = self.rng.r#gen();
        let (winner, loser) = match decide(favorite.team.seed, protected, draw, self.strategy.favorite_bias) {
            Outcome::Protected => {
                debug!(
                    "PROTECTED {round}: {} [{}] OVER {} [{}]",
                    favorite.team.name, favorite.team.seed, underdog.team.name, underdog.team.seed
                );
                (favorite, underdog)
            }
            Outcome::Upset => {
                debug!(
                    "UPSET {round}: {} [{}] OVER {} [{}]",
                    underdog.team.name, underdog.team.seed, favorite.team.name, favorite.team.seed
                );
                (underdog, favorite)
            }
            Outcome::Favorite => (favorite, underdog),
        };

        let game = bracket.game_mut(id);
        if game.winner_previous_game.is_some() {
            game.winner_previous_game = winner.feeder;
        }
        if game.loser_previous_game.is_some() {
            game.loser_previous_game = loser.feeder;
        }
        game.winner = winner.team;
        game.loser = loser.team;
        Ok(())
    }

    fn order_feeders(
        &self,
        bracket: &Bracket,
        winner_prev: GameId,
        loser_prev: GameId,
    ) -> BracketResult<(Contender, Contender)> {
        let winner_side = Contender {
            team: bracket.game(winner_prev).winner.clone(),
            feeder: Some(winner_prev),
        };
        let loser_side = Contender {
            team: bracket.game(loser_prev).winner.clone(),
            feeder: Some(loser_prev),
        };

        let side = if winner_side.team.seed < loser_side.team.seed {
            Side::Winner
        } else if winner_side.team.seed > loser_side.team.seed {
            Side::Loser
        } else {
            break_tie(
                (winner_side.team.name.as_str(), self.ranking(&winner_side.team.name)?),
                (loser_side.team.name.as_str(), self.ranking(&loser_side.team.name)?),
            )?
        };

        Ok(match side {
            Side::Winner => (winner_side, loser_side),
            Side::Loser => (loser_side, winner_side),
        })
    }

    fn ranking(&self, team: &str) -> BracketResult<u32> {
        self.rankings
            .get(team)
            .ok_or_else(|| BracketError::MissingRanking(team.to_owned()))
    }
}

/// A Round of 64 game seeds its own two teams; the better seed is the favorite.
fn order_leaf(bracket: &Bracket, id: GameId) -> (Contender, Contender) {
    let game = bracket.game(id);
    let first = Contender { team: game.winner.clone(), feeder: None };
    let second = Contender { team: game.loser.clone(), feeder: None };
    if second.team.seed < first.team.seed {
        (second, first)
    } else {
        (first, second)
    }
}
