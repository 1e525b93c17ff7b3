use crate::error::{BracketError, BracketResult};
use crate::{Game, GameId, Participant, RoundKind, region_order};

/// A single-elimination bracket stored as an arena of [`Game`] nodes.
///
/// Downward links (`winner_previous_game`, `loser_previous_game`) and the
/// upward `next_game` link are indices into this arena only, so two brackets
/// never share a node.
#[derive(Debug, PartialEq, Eq)]
pub struct Bracket {
    games: Vec<Game>,
    root: GameId,
}

impl Bracket {
    pub(crate) fn from_parts(games: Vec<Game>, root: GameId) -> Self {
        debug_assert!(root < games.len());
        Self { games, root }
    }

    pub fn root(&self) -> GameId {
        self.root
    }

    pub fn root_game(&self) -> &Game {
        &self.games[self.root]
    }

    pub fn game(&self, id: GameId) -> &Game {
        &self.games[id]
    }

    pub fn game_mut(&mut self, id: GameId) -> &mut Game {
        &mut self.games[id]
    }

    /// Number of nodes held by the arena (reachable or not).
    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn validate_championship(&self) -> BracketResult<()> {
        let round = self.root_game().round;
        if round != RoundKind::NationalChampionship {
            return Err(BracketError::InvalidArgument(format!(
                "expecting national championship game, but found {round}"
            )));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Collection
    // -----------------------------------------------------------------------

    /// Every game of `round` reachable from the root. Descent stops at the
    /// first match on each path; the order is unspecified.
    pub fn round_games(&self, round: RoundKind) -> Vec<GameId> {
        let mut to_search = vec![self.root];
        let mut collected = Vec::new();
        while let Some(id) = to_search.pop() {
            let game = &self.games[id];
            if game.round == round {
                collected.push(id);
                continue;
            }
            to_search.extend(game.winner_previous_game);
            to_search.extend(game.loser_previous_game);
        }
        collected
    }

    /// [`round_games`](Self::round_games) ordered by region, then seeds.
    pub fn sorted_round_games(&self, round: RoundKind) -> Vec<&Game> {
        let mut games: Vec<&Game> = self
            .round_games(round)
            .into_iter()
            .map(|id| &self.games[id])
            .collect();
        games.sort_by_cached_key(|g| {
            let region = g.region().into_owned();
            (
                region_order(&region).unwrap_or(usize::MAX),
                region,
                g.winner.seed,
                g.loser.seed,
            )
        });
        games
    }

    pub fn round_winners(&self, round: RoundKind) -> Vec<&str> {
        self.sorted_round_games(round)
            .into_iter()
            .map(|g| g.winner.name.as_str())
            .collect()
    }

    // -----------------------------------------------------------------------
    // Structural copies
    // -----------------------------------------------------------------------

    /// Copy the subtree rooted at `from` into a fresh arena, rebuilding both
    /// link directions inside the copy.
    pub fn copy_subtree(&self, from: Option<GameId>) -> Option<Bracket> {
        let from = from?;
        let mut games = Vec::new();
        let root = self.copy_into(from, &mut games);
        Some(Bracket { games, root })
    }

    pub fn deep_copy(&self) -> Bracket {
        let mut games = Vec::with_capacity(self.games.len());
        let root = self.copy_into(self.root, &mut games);
        Bracket { games, root }
    }

    fn copy_into(&self, id: GameId, out: &mut Vec<Game>) -> GameId {
        let source = &self.games[id];
        let clone_id = out.len();
        out.push(Game::new(source.round, source.winner.clone(), source.loser.clone()));

        if let Some(prev) = source.winner_previous_game {
            let child = self.copy_into(prev, out);
            out[child].next_game = Some(clone_id);
            out[clone_id].winner_previous_game = Some(child);
        }
        if let Some(prev) = source.loser_previous_game {
            let child = self.copy_into(prev, out);
            out[child].next_game = Some(clone_id);
            out[clone_id].loser_previous_game = Some(child);
        }
        clone_id
    }

    /// Blank every result above the Round of 64. Leaves keep their two teams,
    /// reoriented so the better (lower) seed sits in the winner slot.
    pub fn wipe(&mut self) {
        self.wipe_game(self.root);
    }

    fn wipe_game(&mut self, id: GameId) {
        let game = &mut self.games[id];
        if game.round == RoundKind::RoundOf64 {
            if game.loser.seed < game.winner.seed {
                std::mem::swap(&mut game.winner, &mut game.loser);
            }
            return;
        }

        let feeders = [game.winner_previous_game, game.loser_previous_game];
        for prev in feeders.into_iter().flatten() {
            self.wipe_game(prev);
        }
        let game = &mut self.games[id];
        game.winner = Participant::default();
        game.loser = Participant::default();
    }

    /// Check the tree below the root is strictly binary with leaves exactly at
    /// the Round of 64. Every node is reached once, and only from the game its
    /// `next_game` points at.
    pub(crate) fn validate_shape(&self) -> BracketResult<()> {
        let mut seen = vec![false; self.games.len()];
        let mut to_search = vec![(self.root, None)];
        while let Some((id, parent)) = to_search.pop() {
            let game = &self.games[id];
            if std::mem::replace(&mut seen[id], true) || game.next_game != parent {
                return Err(BracketError::SharedFeeder { game: id, round: game.round });
            }
            if game.round == RoundKind::RoundOf64 {
                continue;
            }
            match (game.winner_previous_game, game.loser_previous_game) {
                (Some(w), Some(l)) => to_search.extend([(w, Some(id)), (l, Some(id))]),
                _ => return Err(BracketError::MissingFeeder { game: id, round: game.round }),
            }
        }
        Ok(())
    }
}
