use crossterm::style::{Color, Stylize, style};
use ncaa_bracket::{Bracket, BracketResult, Participant, RoundKind};
use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Columns per bracket cell, decoration included.
pub const CELL_WIDTH: usize = 33;

const TEAM_HEADER: &str = "|_ ";

const EMPTY_CELL: &str = "                                 ";

/// Blank rows after each team in a column: `2^round - 1`, so a game's two
/// teams straddle the row of the game they feed.
fn spacing(round: RoundKind) -> usize {
    (1usize << round.index()) - 1
}

// ---------------------------------------------------------------------------
// Cell decoration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellColor {
    Neutral,
    Win,
    Loss,
}

/// Green when the team really won its previous-round game, red when it did not.
/// Neutral when there is nothing to compare against.
pub fn cell_color(team: &str, previous_round_winners: &[&str]) -> CellColor {
    if previous_round_winners.is_empty() {
        CellColor::Neutral
    } else if previous_round_winners.contains(&team) {
        CellColor::Win
    } else {
        CellColor::Loss
    }
}

fn decorate(team: &Participant, color: CellColor, colored: bool) -> String {
    let text = format!("{} [{}] ", team.name, team.seed);
    let padding = "_".repeat(CELL_WIDTH.saturating_sub(text.chars().count() + TEAM_HEADER.len()));
    let text = match (colored, color) {
        (true, CellColor::Win) => style(&text).with(Color::Green).to_string(),
        (true, CellColor::Loss) => style(&text).with(Color::Red).to_string(),
        _ => text,
    };
    format!("{TEAM_HEADER}{text}{padding}")
}

// ---------------------------------------------------------------------------
// BracketView — sideways ASCII bracket, champion on the left
// ---------------------------------------------------------------------------

/// Renders a bracket as one column per round, from the champion on the left
/// to the Round of 64 on the right. When the real bracket is supplied, every
/// team is coloured by whether it really reached that column.
pub struct BracketView<'a> {
    bracket: &'a Bracket,
    actual: Option<&'a Bracket>,
    colored: bool,
}

impl<'a> BracketView<'a> {
    pub fn new(bracket: &'a Bracket) -> Self {
        Self { bracket, actual: None, colored: true }
    }

    pub fn compared_to(mut self, actual: &'a Bracket) -> Self {
        self.actual = Some(actual);
        self
    }

    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn lines(&self) -> BracketResult<Vec<String>> {
        self.bracket.validate_championship()?;
        let root = self.bracket.root_game();

        let champion_winners: Vec<&str> = self
            .actual
            .map(|a| vec![a.root_game().winner.name.as_str()])
            .unwrap_or_default();
        let champion_pad = spacing(RoundKind::NationalChampionship);
        let mut champion = VecDeque::with_capacity(2 * champion_pad + 1);
        champion.extend(std::iter::repeat_n(EMPTY_CELL.to_owned(), champion_pad));
        champion.push_back(decorate(
            &root.winner,
            cell_color(&root.winner.name, &champion_winners),
            self.colored,
        ));
        champion.extend(std::iter::repeat_n(EMPTY_CELL.to_owned(), champion_pad));
        let mut columns = vec![champion];

        // Walk from the championship out to the Round of 64, one round per column.
        let mut current = vec![self.bracket.root()];
        while let Some(&first) = current.first() {
            let round = self.bracket.game(first).round;
            let previous_winners: Vec<&str> = match (self.actual, round.prev()) {
                (Some(actual), Some(prev)) if prev.is_tree_round() => actual.round_winners(prev),
                _ => Vec::new(),
            };

            let mut column = VecDeque::new();
            let mut next = Vec::with_capacity(current.len() * 2);
            for id in &current {
                let game = self.bracket.game(*id);
                for (team, feeder) in [
                    (&game.winner, game.winner_previous_game),
                    (&game.loser, game.loser_previous_game),
                ] {
                    let color = cell_color(&team.name, &previous_winners);
                    column.push_back(decorate(team, color, self.colored));
                    column.extend(std::iter::repeat_n(EMPTY_CELL.to_owned(), spacing(round)));
                    next.extend(feeder);
                }
            }

            // Shift so each column lines up against the next in a diamond.
            column.rotate_right(spacing(round) / 2);
            columns.push(column);
            current = next;
        }

        let height = columns[0].len();
        Ok((0..height)
            .map(|row| {
                columns
                    .iter()
                    .map(|column| column.get(row).map(String::as_str).unwrap_or(EMPTY_CELL))
                    .collect()
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
