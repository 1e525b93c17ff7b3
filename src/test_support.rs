//! CSV fixtures for the binary's tests: one synthetic season written in the
//! source database layout, chalk everywhere except four 12-over-5 upsets.
use ncaa_bracket::schema::{column, read_seasons};
use ncaa_bracket::{Bracket, REGIONS, RoundKind, SeasonRankings, build_bracket};
use std::fmt::Write;

const PAIRINGS: [(u8, u8); 8] = [(1, 16), (8, 9), (5, 12), (4, 13), (6, 11), (3, 14), (7, 10), (2, 15)];

#[derive(Clone)]
struct Team {
    region: &'static str,
    seed: u8,
}

impl Team {
    fn name(&self) -> String {
        format!("{} {}", self.region, self.seed)
    }

    fn ranking(&self) -> u32 {
        let region = REGIONS.iter().position(|r| *r == self.region).unwrap_or_default() as u32;
        match self.seed {
            1 => region + 1,
            2 => region + 5,
            _ => 0,
        }
    }
}

fn row(year: u16, round: RoundKind, winner: &Team, loser: &Team) -> String {
    let mut cells = vec![String::new(); column::COUNT];
    cells[column::YEAR] = year.to_string();
    cells[column::TEAM] = loser.name();
    cells[column::RANKING] = loser.ranking().to_string();
    cells[column::SEED] = loser.seed.to_string();
    cells[column::OPPONENT] = winner.name();
    cells[column::ROUND] = round.label().to_owned();
    cells[column::REGION] = loser.region.to_owned();
    cells[column::OPPONENT_RANKING] = winner.ranking().to_string();
    cells[column::OPPONENT_SEED] = winner.seed.to_string();
    cells[column::OPPONENT_REGION] = winner.region.to_owned();
    cells[column::WINS] = "0".into();
    cells[column::LOSSES] = "1".into();
    cells.iter().map(|c| format!("\"{c}\"")).collect::<Vec<_>>().join(",")
}

fn play(year: u16, round: RoundKind, field: Vec<Team>, out: &mut String) -> Vec<Team> {
    field
        .chunks(2)
        .map(|pair| {
            let (a, b) = (&pair[0], &pair[1]);
            let upset = round == RoundKind::RoundOf64 && a.seed == 5 && b.seed == 12;
            let (winner, loser) = if upset || b.seed < a.seed { (b, a) } else { (a, b) };
            let _ = writeln!(out, "{}", row(year, round, winner, loser));
            winner.clone()
        })
        .collect()
}

pub fn fixture_csv(years: &[u16]) -> String {
    let mut out = String::from("header\n");
    for &year in years {
        let mut finalists = Vec::new();
        for region in REGIONS {
            let mut field: Vec<Team> = PAIRINGS
                .iter()
                .flat_map(|(a, b)| [Team { region, seed: *a }, Team { region, seed: *b }])
                .collect();
            for round in &RoundKind::SCORED[..4] {
                field = play(year, *round, field, &mut out);
            }
            finalists.extend(field);
        }
        let semis = vec![finalists[0].clone(), finalists[3].clone(), finalists[1].clone(), finalists[2].clone()];
        let finals = play(year, RoundKind::NationalSemifinals, semis, &mut out);
        play(year, RoundKind::NationalChampionship, finals, &mut out);
    }
    out
}

pub fn fixture_season() -> (Bracket, SeasonRankings) {
    let seasons = read_seasons(fixture_csv(&[2024]).as_bytes(), "fixture").expect("fixture csv parses");
    build_bracket(&seasons[&2024]).expect("fixture season builds")
}
