use crate::error::{BracketError, BracketResult};
use crate::schema::GameRecord;
use crate::tree::Bracket;
use crate::{Game, GameId, MIN_SEASON_GAMES, Participant, RoundKind};
use log::{debug, trace};
use std::collections::HashMap;

/// Team name → season ranking (0 = unranked) for one season.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonRankings(HashMap<String, u32>);

impl SeasonRankings {
    pub fn get(&self, team: &str) -> Option<u32> {
        self.0.get(team).copied()
    }

    /// Store a team's ranking. A team may only ever carry one ranking per season.
    pub fn record(&mut self, team: &str, ranking: u32) -> BracketResult<()> {
        match self.0.get(team) {
            Some(&first) if first != ranking => Err(BracketError::RankingMismatch {
                team: team.to_owned(),
                first,
                second: ranking,
            }),
            Some(_) => Ok(()),
            None => {
                self.0.insert(team.to_owned(), ranking);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build one season's bracket from its loser-perspective records.
///
/// Opening Round records are validated but skipped. The returned bracket is
/// rooted at the season's single National Championship game.
pub fn build_bracket(records: &[GameRecord]) -> BracketResult<(Bracket, SeasonRankings)> {
    if let Some(bad) = records.iter().find(|r| r.wins != 0 || r.losses != 1) {
        return Err(BracketError::MalformedRecord(format!(
            "{} {}: {} vs. {} (wins {}, losses {})",
            bad.year, bad.round, bad.team, bad.opponent, bad.wins, bad.losses
        )));
    }

    let usable: Vec<&GameRecord> = records.iter().filter(|r| r.round.is_tree_round()).collect();
    if usable.len() < MIN_SEASON_GAMES {
        return Err(BracketError::IncompleteSeason { usable: usable.len() });
    }

    let mut rankings = SeasonRankings::default();
    let mut games = Vec::with_capacity(usable.len());
    for record in usable {
        games.push(Game::new(
            record.round,
            Participant::new(&record.opponent, record.opponent_seed, &record.opponent_region),
            Participant::new(&record.team, record.seed, &record.region),
        ));
        rankings.record(&record.opponent, record.opponent_ranking)?;
        rankings.record(&record.team, record.ranking)?;
    }

    link_games(&mut games);
    let root = championship_game(&games)?;
    let bracket = Bracket::from_parts(games, root);
    bracket.validate_shape()?;

    debug!(
        "built bracket with {} games, {} ranked teams, champion {}",
        bracket.len(),
        rankings.len(),
        bracket.root_game().winner.name
    );
    Ok((bracket, rankings))
}

/// Join each game to the next-round game its winner played in.
fn link_games(games: &mut [Game]) {
    for id in 0..games.len() {
        for other in 0..games.len() {
            if games[other].round.index() != games[id].round.index() + 1 {
                continue;
            }
            if games[other].winner.name == games[id].winner.name {
                trace!("{} feeds winner side of {}", games[id], games[other]);
                games[id].next_game = Some(other);
                games[other].winner_previous_game = Some(id);
            }
            if games[other].loser.name == games[id].winner.name {
                trace!("{} feeds loser side of {}", games[id], games[other]);
                games[id].next_game = Some(other);
                games[other].loser_previous_game = Some(id);
            }
        }
    }
}

fn championship_game(games: &[Game]) -> BracketResult<GameId> {
    let championships: Vec<GameId> = games
        .iter()
        .enumerate()
        .filter(|(_, g)| g.round == RoundKind::NationalChampionship)
        .map(|(id, _)| id)
        .collect();
    match championships.as_slice() {
        [root] => Ok(*root),
        other => Err(BracketError::ChampionshipCount(other.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn builds_the_fixture_season() {
        let (bracket, rankings) = fixtures::season();
        let root = bracket.root_game();
        assert_eq!(root.round, RoundKind::NationalChampionship);
        assert_eq!(root.winner.name, "East 1");
        assert_eq!(root.loser.name, "Midwest 1");
        assert_eq!(root.next_game, None);
        assert_eq!(bracket.len(), 63);
        assert_eq!(rankings.len(), 64, "play-in team is never ranked");
        assert_eq!(rankings.get("West 1"), Some(4));
        assert_eq!(rankings.get("South 12"), Some(0));
        assert_eq!(rankings.get("Play-In 16"), None);
    }

    #[test]
    fn feeders_carry_the_participants_of_the_next_game() {
        let (bracket, _) = fixtures::season();
        for id in 0..bracket.len() {
            let game = bracket.game(id);
            if let Some(w) = game.winner_previous_game {
                assert_eq!(bracket.game(w).winner.name, game.winner.name);
                assert_eq!(bracket.game(w).next_game, Some(id));
            }
            if let Some(l) = game.loser_previous_game {
                assert_eq!(bracket.game(l).winner.name, game.loser.name);
                assert_eq!(bracket.game(l).next_game, Some(id));
            }
            assert_eq!(game.is_leaf(), game.round == RoundKind::RoundOf64);
        }
    }

    #[test]
    fn rejects_malformed_tally() {
        let mut records = fixtures::season_records();
        records[10].wins = 1;
        let err = build_bracket(&records).unwrap_err();
        assert!(matches!(err, BracketError::MalformedRecord(_)));

        let mut records = fixtures::season_records();
        records[0].losses = 0;
        let err = build_bracket(&records).unwrap_err();
        assert!(
            matches!(err, BracketError::MalformedRecord(_)),
            "opening round records are checked too"
        );
    }

    #[test]
    fn rejects_incomplete_season() {
        let mut records = fixtures::season_records();
        records.truncate(63); // 62 usable games plus the opening round record
        let err = build_bracket(&records).unwrap_err();
        assert!(matches!(err, BracketError::IncompleteSeason { usable: 62 }));
    }

    #[test]
    fn rejects_ranking_mismatch() {
        let mut records = fixtures::season_records();
        let record = records
            .iter_mut()
            .find(|r| r.round == RoundKind::RoundOf32 && r.opponent == "East 1")
            .unwrap();
        record.opponent_ranking = 17;
        let err = build_bracket(&records).unwrap_err();
        assert!(matches!(
            err,
            BracketError::RankingMismatch { ref team, first: 1, second: 17 } if team == "East 1"
        ));
    }

    #[test]
    fn rejects_missing_or_duplicate_championship() {
        let mut records = fixtures::season_records();
        let last = records.len() - 1;
        records[last].round = RoundKind::NationalSemifinals;
        records.push(fixtures::record(
            RoundKind::RoundOf64,
            &fixtures::team("East", 1),
            &fixtures::team("East", 16),
        ));
        let err = build_bracket(&records).unwrap_err();
        assert!(matches!(err, BracketError::ChampionshipCount(0)));

        let mut records = fixtures::season_records();
        let extra = records.last().unwrap().clone();
        records.push(extra);
        let err = build_bracket(&records).unwrap_err();
        assert!(matches!(err, BracketError::ChampionshipCount(2)));
    }

    #[test]
    fn rejects_a_tree_with_a_hole() {
        let mut records = fixtures::season_records();
        let hole = records
            .iter()
            .position(|r| r.round == RoundKind::EliteEight && r.region == "South")
            .unwrap();
        records.remove(hole);
        records.push(fixtures::record(
            RoundKind::RoundOf64,
            &fixtures::team("Nowhere", 1),
            &fixtures::team("Nowhere", 16),
        ));
        let err = build_bracket(&records).unwrap_err();
        assert!(matches!(
            err,
            BracketError::MissingFeeder { round: RoundKind::NationalSemifinals, .. }
        ));
    }

    #[test]
    fn rejects_a_winner_playing_two_next_round_games() {
        let mut records = fixtures::season_records();
        let record = records
            .iter_mut()
            .find(|r| r.round == RoundKind::RoundOf32 && r.opponent == "Midwest 1")
            .unwrap();
        let east_8 = fixtures::team("East", 8);
        record.team = east_8.name;
        record.seed = east_8.seed;
        record.region = east_8.region;
        record.ranking = 0;

        let err = build_bracket(&records).unwrap_err();
        assert!(
            matches!(err, BracketError::SharedFeeder { round: RoundKind::RoundOf64, .. }),
            "{err}"
        );
    }

    #[test]
    fn rankings_accept_repeats_of_the_same_value() {
        let mut rankings = SeasonRankings::default();
        rankings.record("Duke", 3).unwrap();
        rankings.record("Duke", 3).unwrap();
        assert_eq!(rankings.get("Duke"), Some(3));
        assert!(rankings.record("Duke", 4).is_err());
    }
}
