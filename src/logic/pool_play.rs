//! Pool play: snake-allocated groups, round robin within each group.

use crate::logic::{allocation, round_robin};
use crate::models::{Fixture, Group, Participant};

/// Allocate `group_count` groups from a seed-sorted roster and schedule a
/// round robin inside each. Every fixture is tagged with its group id.
/// `match_frequency` repeats each group's schedule that many times, with
/// round numbers continuing so the schedule stays strictly increasing.
pub fn fixtures(
    sorted: &[Participant],
    category: &str,
    group_count: usize,
    match_frequency: u32,
) -> (Vec<Fixture>, Vec<Group>) {
    let groups = allocation::allocate(sorted, group_count, category);
    let mut out = Vec::new();
    let mut match_number = 1u32;

    for group in &groups {
        let members: Vec<Participant> = group
            .player_ids
            .iter()
            .filter_map(|id| sorted.iter().find(|p| &p.id == id))
            .cloned()
            .collect();
        // Circle-method round count: P-1 after bye padding to an even P.
        let padded = members.len() + members.len() % 2;
        let rounds_per_cycle = padded.saturating_sub(1) as u32;
        for cycle in 0..match_frequency.max(1) {
            let first_round = 1 + cycle * rounds_per_cycle;
            let (batch, next) = round_robin::fixtures(
                &members,
                category,
                Some(&group.id),
                first_round,
                match_number,
            );
            out.extend(batch);
            match_number = next;
        }
    }
    (out, groups)
}
