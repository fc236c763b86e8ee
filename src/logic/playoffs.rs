//! Knockout-stage construction from ranked pool groups, including the
//! parallel gold/silver cup variant.

use crate::logic::standings;
use crate::models::{Cup, Fixture, Group, ParticipantId, PlayoffRound, PlayoffStructure};
use log::warn;

/// One side of a quarterfinal pairing: (group index, standing index).
pub type SeedSlot = (usize, usize);

/// Cross-seeding table for the quarterfinal stage: for each quarterfinal,
/// the two (group, standing) slots that meet in it.
///
/// 2 and 4 groups use the classic cross pairings (winners meet the other
/// pool's runner-up). Any other count falls back to folding the flattened
/// top-2 list from both ends inward; that path is best-effort and makes no
/// balanced-seeding guarantee.
pub fn cross_seed_table(group_count: usize) -> Vec<[SeedSlot; 2]> {
    match group_count {
        2 => vec![[(0, 0), (1, 1)], [(1, 0), (0, 1)]],
        4 => vec![
            [(0, 0), (3, 1)],
            [(1, 0), (2, 1)],
            [(2, 0), (1, 1)],
            [(3, 0), (0, 1)],
        ],
        n => {
            let mut flat: Vec<SeedSlot> = (0..n).map(|g| (g, 0)).collect();
            flat.extend((0..n).map(|g| (g, 1)));
            (0..flat.len() / 2)
                .map(|i| [flat[i], flat[flat.len() - 1 - i]])
                .collect()
        }
    }
}

/// Reorder each group's membership into standing order (wins, then points
/// differential) computed from the completed pool fixtures.
pub fn ranked_groups(fixtures: &[Fixture], groups: &[Group]) -> Vec<Group> {
    groups
        .iter()
        .map(|g| {
            let mut ranked = g.clone();
            ranked.player_ids = standings::group_standings(fixtures, g);
            ranked
        })
        .collect()
}

/// Build the knockout stage for standing-ordered groups of one category.
///
/// Returns an empty list (with a logged warning) for fewer than 2 groups;
/// a group missing an expected finisher yields a partial bracket with that
/// slot left empty. Match numbers run continuously from
/// `first_match_number` across the whole batch, keeping them unique within
/// every (round, category, cup) partition and letting the silver cup (or a
/// pool stage) occupy a disjoint range.
pub fn build(
    groups: &[Group],
    structure: PlayoffStructure,
    category: &str,
    cup: Option<Cup>,
    first_match_number: u32,
) -> Vec<Fixture> {
    if groups.len() < 2 {
        warn!(
            "cannot build playoffs for '{category}': need at least 2 groups, got {}",
            groups.len()
        );
        return Vec::new();
    }

    let mut next = first_match_number;
    let mut number = || {
        let n = next;
        next += 1;
        n
    };
    let mut fixtures = Vec::new();
    let final_round;

    match structure {
        PlayoffStructure::QuarterFinals => {
            let table = cross_seed_table(groups.len());
            for [a, b] in &table {
                fixtures.push(Fixture::playoff(
                    PlayoffRound::QuarterFinal,
                    1,
                    number(),
                    finisher(groups, *a, category),
                    finisher(groups, *b, category),
                    category,
                    cup,
                ));
            }
            for _ in 0..table.len().div_ceil(2) {
                fixtures.push(Fixture::playoff(
                    PlayoffRound::SemiFinal,
                    2,
                    number(),
                    None,
                    None,
                    category,
                    cup,
                ));
            }
            final_round = 3;
        }
        PlayoffStructure::SemiFinals => {
            // Group winners fold directly into 1-2 semifinals.
            let firsts: Vec<SeedSlot> = (0..groups.len()).map(|g| (g, 0)).collect();
            let semi_count = firsts.len().div_ceil(2);
            for i in 0..semi_count {
                let a = finisher(groups, firsts[i], category);
                let b = firsts
                    .get(firsts.len() - 1 - i)
                    .filter(|_| firsts.len() - 1 - i > i)
                    .and_then(|&slot| finisher(groups, slot, category));
                fixtures.push(Fixture::playoff(
                    PlayoffRound::SemiFinal,
                    1,
                    number(),
                    a,
                    b,
                    category,
                    cup,
                ));
            }
            final_round = 2;
        }
        PlayoffStructure::FinalOnly => {
            final_round = 1;
        }
    }

    fixtures.push(Fixture::playoff(
        PlayoffRound::Final,
        final_round,
        number(),
        None,
        None,
        category,
        cup,
    ));
    fixtures.push(Fixture::playoff(
        PlayoffRound::ThirdPlace,
        final_round,
        number(),
        None,
        None,
        category,
        cup,
    ));
    fixtures
}

/// Build parallel gold and silver brackets of identical shape: gold from
/// each group's top finishers, silver from the next tier down. Gold match
/// numbers start at `first_match_number`; silver's continue past gold's so
/// the two ranges never collide.
pub fn build_cups(
    groups: &[Group],
    structure: PlayoffStructure,
    category: &str,
    first_match_number: u32,
) -> Vec<Fixture> {
    let depth = match structure {
        PlayoffStructure::QuarterFinals | PlayoffStructure::FinalOnly => 2,
        PlayoffStructure::SemiFinals => 1,
    };

    let tier = |from: usize| -> Vec<Group> {
        groups
            .iter()
            .map(|g| {
                let mut t = g.clone();
                t.player_ids = g
                    .player_ids
                    .iter()
                    .skip(from)
                    .take(depth)
                    .cloned()
                    .collect();
                t
            })
            .collect()
    };

    let mut fixtures = build(&tier(0), structure, category, Some(Cup::Gold), first_match_number);
    let silver_start = fixtures
        .iter()
        .map(|f| f.match_number)
        .max()
        .unwrap_or(first_match_number)
        + 1;
    fixtures.extend(build(
        &tier(depth),
        structure,
        category,
        Some(Cup::Silver),
        silver_start,
    ));
    fixtures
}

/// The participant at a (group, standing) slot, or `None` (logged) when
/// the group has no finisher at that standing.
fn finisher(groups: &[Group], (g, s): SeedSlot, category: &str) -> Option<ParticipantId> {
    let id = groups.get(g).and_then(|group| group.player_ids.get(s));
    if id.is_none() {
        warn!("no finisher at group {g} standing {s} for '{category}'; leaving slot empty");
    }
    id.cloned()
}
