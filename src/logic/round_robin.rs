//! Round-robin scheduling via the circle method.

use crate::models::{Fixture, Participant, ParticipantId, BYE_ID};

/// Pair an id list into rounds with the circle method: fix the first
/// entry, pair index i with index P-1-i, rotate the rest by one after each
/// round. An odd field gets a bye slot; pairings touching the bye are
/// omitted, so that participant simply sits the round out.
///
/// For P entries (after bye padding) this yields P-1 rounds and, with no
/// byes, P/2 matches per round and P(P-1)/2 matches in total.
pub fn schedule(ids: &[ParticipantId]) -> Vec<Vec<(ParticipantId, ParticipantId)>> {
    let mut ring: Vec<ParticipantId> = ids.to_vec();
    if ring.len() % 2 != 0 {
        ring.push(BYE_ID.to_string());
    }
    let p = ring.len();
    if p < 2 {
        return Vec::new();
    }

    let mut rounds = Vec::with_capacity(p - 1);
    for _ in 0..p - 1 {
        let mut pairs = Vec::with_capacity(p / 2);
        for i in 0..p / 2 {
            let a = &ring[i];
            let b = &ring[p - 1 - i];
            if a != BYE_ID && b != BYE_ID {
                pairs.push((a.clone(), b.clone()));
            }
        }
        rounds.push(pairs);
        // Rotate everything except the fixed first entry.
        let last = ring.pop().unwrap_or_default();
        ring.insert(1, last);
    }
    rounds
}

/// Build round-robin fixtures for one field of participants, numbering
/// rounds from `first_round` and matches from `first_match_number`.
/// Returns the fixtures plus the next free match number.
pub fn fixtures(
    participants: &[Participant],
    category: &str,
    group_id: Option<&str>,
    first_round: u32,
    first_match_number: u32,
) -> (Vec<Fixture>, u32) {
    let ids: Vec<ParticipantId> = participants.iter().map(|p| p.id.clone()).collect();
    let mut out = Vec::new();
    let mut match_number = first_match_number;
    for (round_idx, pairs) in schedule(&ids).into_iter().enumerate() {
        for (a, b) in pairs {
            let round = first_round + round_idx as u32;
            out.push(Fixture::pool(round, match_number, a, b, category, group_id));
            match_number += 1;
        }
    }
    (out, match_number)
}
