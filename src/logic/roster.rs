//! Roster normalization: category filter, seed ordering, placeholder padding.

use crate::models::Participant;

/// Normalize a raw roster for one category to exactly
/// `max(required_count, min_count)` entries.
///
/// 1. Filter to the requested category.
/// 2. Stable sort ascending by seed; unseeded entrants sort last, keeping
///    their relative registration order.
/// 3. Pad with sequential `dummy_<n>` placeholders when short, truncate
///    when over. Callers needing "at least" rather than "exactly" pass
///    `required_count` accordingly.
pub fn normalize(
    participants: &[Participant],
    category: &str,
    min_count: usize,
    required_count: usize,
) -> Vec<Participant> {
    let target = required_count.max(min_count);

    let mut roster: Vec<Participant> = participants
        .iter()
        .filter(|p| p.category == category)
        .cloned()
        .collect();
    roster.sort_by_key(|p| seed_rank(p.seed));

    let mut next_dummy = 1;
    while roster.len() < target {
        roster.push(Participant::dummy(next_dummy, category));
        next_dummy += 1;
    }
    roster.truncate(target);
    roster
}

/// Sort key placing every numeric seed (ascending) before the unseeded.
fn seed_rank(seed: Option<u32>) -> (u8, u32) {
    match seed {
        Some(s) => (0, s),
        None => (1, 0),
    }
}
