//! Synthetic season used by the unit tests: four regions of sixteen seeds,
//! the better seed always advancing except for the four 12-over-5 upsets in the
//! Round of 64. Equal seeds go to the first-listed team. One Opening Round
//! record is included and must be ignored by the builder.
use crate::builder::{SeasonRankings, build_bracket};
use crate::schema::GameRecord;
use crate::tree::Bracket;
use crate::{Participant, REGIONS, RoundKind, region_order};

pub(crate) const YEAR: u16 = 2024;

/// Bracket-order Round of 64 pairings within a region.
const PAIRINGS: [(u8, u8); 8] = [(1, 16), (8, 9), (5, 12), (4, 13), (6, 11), (3, 14), (7, 10), (2, 15)];

pub(crate) fn team(region: &str, seed: u8) -> Participant {
    Participant::new(format!("{region} {seed}"), seed, region)
}

/// Ones are ranked 1..=4, twos 5..=8, everybody else is unranked.
pub(crate) fn ranking(team: &Participant) -> u32 {
    let region = region_order(&team.region).unwrap_or_default() as u32;
    match team.seed {
        1 => region + 1,
        2 => region + 5,
        _ => 0,
    }
}

pub(crate) fn record(round: RoundKind, winner: &Participant, loser: &Participant) -> GameRecord {
    GameRecord {
        year: YEAR,
        round,
        team: loser.name.clone(),
        seed: loser.seed,
        region: loser.region.clone(),
        ranking: ranking(loser),
        opponent: winner.name.clone(),
        opponent_seed: winner.seed,
        opponent_region: winner.region.clone(),
        opponent_ranking: ranking(winner),
        wins: 0,
        losses: 1,
    }
}

pub(crate) fn season_records() -> Vec<GameRecord> {
    let mut records = vec![record(
        RoundKind::OpeningRound,
        &team("East", 16),
        &Participant::new("Play-In 16", 16, "East"),
    )];

    let mut finalists = Vec::new();
    for region in REGIONS {
        let mut field: Vec<Participant> = PAIRINGS
            .iter()
            .flat_map(|(a, b)| [team(region, *a), team(region, *b)])
            .collect();
        for round in &RoundKind::SCORED[..4] {
            field = play_round(*round, &field, &mut records);
        }
        finalists.extend(field);
    }

    // East meets West, Midwest meets South.
    let semis = [&finalists[0], &finalists[3], &finalists[1], &finalists[2]].map(Clone::clone);
    let finals = play_round(RoundKind::NationalSemifinals, &semis, &mut records);
    play_round(RoundKind::NationalChampionship, &finals, &mut records);
    records
}

fn play_round(round: RoundKind, field: &[Participant], records: &mut Vec<GameRecord>) -> Vec<Participant> {
    field
        .chunks(2)
        .map(|pair| {
            let (winner, loser) = decide(round, &pair[0], &pair[1]);
            records.push(record(round, winner, loser));
            winner.clone()
        })
        .collect()
}

fn decide<'a>(round: RoundKind, a: &'a Participant, b: &'a Participant) -> (&'a Participant, &'a Participant) {
    let upset = round == RoundKind::RoundOf64 && a.seed == 5 && b.seed == 12;
    if upset || b.seed < a.seed { (b, a) } else { (a, b) }
}

pub(crate) fn season() -> (Bracket, SeasonRankings) {
    build_bracket(&season_records()).expect("fixture season should build")
}
