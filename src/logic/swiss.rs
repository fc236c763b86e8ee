//! Swiss system: random first-round draw, later rounds allocated empty.
//!
//! Pairing rounds 2..K by record is the organizer's job once results are
//! known; the engine only reserves the slots.

use crate::models::{Fixture, Participant};
use rand::seq::SliceRandom;

/// Generate a Swiss schedule: round 1 pairs a shuffled roster in order,
/// rounds 2..=`rounds` are pre-created with empty slots (floor(N/2)
/// matches per round).
pub fn fixtures(participants: &[Participant], category: &str, rounds: u32) -> Vec<Fixture> {
    let mut field: Vec<&Participant> = participants.iter().collect();
    field.shuffle(&mut rand::thread_rng());

    let per_round = field.len() / 2;
    let mut out = Vec::new();
    let mut match_number = 1u32;

    for pair in field.chunks_exact(2) {
        out.push(Fixture::pool(
            1,
            match_number,
            pair[0].id.clone(),
            pair[1].id.clone(),
            category,
            None,
        ));
        match_number += 1;
    }
    for round in 2..=rounds {
        for _ in 0..per_round {
            out.push(Fixture::pool_empty(round, match_number, category));
            match_number += 1;
        }
    }
    out
}
