//! Single- and double-elimination bracket generation.

use crate::models::{BracketSide, Fixture, Participant, DUMMY_PREFIX};

/// Number of rounds needed for a single-elimination field of `n`:
/// the smallest r with 2^r >= n (at least 1).
pub fn round_count(n: usize) -> u32 {
    let mut rounds = 1u32;
    while (1usize << rounds) < n {
        rounds += 1;
    }
    rounds
}

/// Pad a seed-sorted field to exactly `slots` entries with sequential
/// placeholders, continuing numbering past any the roster already has.
fn pad_to(mut field: Vec<Participant>, slots: usize, category: &str) -> Vec<Participant> {
    let mut next_dummy = field
        .iter()
        .filter(|p| p.id.starts_with(DUMMY_PREFIX))
        .count()
        + 1;
    while field.len() < slots {
        field.push(Participant::dummy(next_dummy, category));
        next_dummy += 1;
    }
    field
}

/// Single-elimination bracket for a seed-sorted field.
///
/// Round 1 pairs by the standard fold: seed 1 vs last, seed 2 vs
/// second-last, and so on. Rounds 2..=r are pre-created with empty slots;
/// winner advancement fills them (winner of match k in round r feeds match
/// ceil(k/2) in round r+1).
pub fn single(sorted: &[Participant], category: &str) -> Vec<Fixture> {
    bracket_rounds(sorted, category, None)
}

/// Double elimination: a winners bracket (single elimination), a losers
/// bracket narrowing as `slots / 2^(floor((r+1)/2) + 1)` matches per round,
/// and one grand final with both slots empty. The losers bracket is
/// pre-created empty; dropping winners-bracket losers into it is the
/// organizer's pairing decision, like Swiss rounds after the first.
pub fn double(sorted: &[Participant], category: &str) -> Vec<Fixture> {
    let mut fixtures = bracket_rounds(sorted, category, Some(BracketSide::Winners));
    if fixtures.is_empty() {
        return fixtures;
    }

    let rounds = round_count(sorted.len().max(2));
    let slots = 1usize << rounds;
    let loser_rounds = 2 * (rounds - 1).max(1);
    // Match numbers stay unique across the whole category, so the losers
    // bracket continues where the winners bracket stopped.
    let mut match_number = fixtures.iter().map(|f| f.match_number).max().unwrap_or(0) + 1;
    for r in 1..=loser_rounds {
        let matches = (slots / (1usize << (((r + 1) / 2) + 1))).max(1);
        for _ in 0..matches {
            fixtures.push(Fixture::bracket(
                BracketSide::Losers,
                r,
                match_number,
                None,
                None,
                category,
            ));
            match_number += 1;
        }
    }

    fixtures.push(Fixture::bracket(
        BracketSide::Final,
        1,
        match_number,
        None,
        None,
        category,
    ));
    fixtures
}

/// Shared bracket construction: fold-seeded round 1 plus empty later rounds.
fn bracket_rounds(sorted: &[Participant], category: &str, side: Option<BracketSide>) -> Vec<Fixture> {
    if sorted.is_empty() {
        return Vec::new();
    }
    let rounds = round_count(sorted.len().max(2));
    let slots = 1usize << rounds;
    let field = pad_to(sorted.to_vec(), slots, category);

    let make = |round: u32, number: u32, p1, p2| match side {
        Some(s) => Fixture::bracket(s, round, number, p1, p2, category),
        None => {
            let mut f = Fixture::bracket(BracketSide::Winners, round, number, p1, p2, category);
            f.bracket = None;
            f
        }
    };

    let mut fixtures = Vec::new();
    let mut match_number = 1u32;
    for i in 0..slots / 2 {
        fixtures.push(make(
            1,
            match_number,
            Some(field[i].id.clone()),
            Some(field[slots - 1 - i].id.clone()),
        ));
        match_number += 1;
    }
    for round in 2..=rounds {
        let matches = slots >> round;
        for _ in 0..matches {
            fixtures.push(make(round, match_number, None, None));
            match_number += 1;
        }
    }
    fixtures
}
