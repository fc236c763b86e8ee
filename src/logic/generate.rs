//! Engine facade: format dispatch, playoff building, score entry.

use crate::logic::{advancement, elimination, playoffs, pool_play, round_robin, roster, swiss};
use crate::models::{
    id_is_placeholder, FixtureError, FixtureSet, Format, FormatParams, MatchId, Participant,
    PlayoffStructure,
};
use log::warn;

/// Generate the pool/bracket fixtures for one category of the roster.
///
/// Pool formats return groups alongside fixtures; playoff stages for
/// `poolPlayPlayoffs` / `poolPlayCups` are built separately once pool play
/// completes ([`build_playoffs`] / [`build_cup_playoffs`]). Errors abort
/// generation for this category only.
pub fn generate_fixtures(
    participants: &[Participant],
    category: &str,
    format: Format,
    params: &FormatParams,
) -> Result<FixtureSet, FixtureError> {
    let count = participants.iter().filter(|p| p.category == category).count();
    if count == 0 {
        return Err(FixtureError::NoParticipants {
            category: category.to_string(),
        });
    }
    let sorted = roster::normalize(participants, category, 0, count);

    let mut set = FixtureSet::new();
    match format {
        Format::RoundRobin => {
            let (fixtures, _) = round_robin::fixtures(&sorted, category, None, 1, 1);
            set.fixtures = fixtures;
        }
        Format::SingleElimination => {
            set.fixtures = elimination::single(&sorted, category);
        }
        Format::DoubleElimination => {
            set.fixtures = elimination::double(&sorted, category);
        }
        Format::Swiss => {
            if params.swiss_rounds == 0 {
                return Err(FixtureError::InvalidRoundCount);
            }
            set.fixtures = swiss::fixtures(&sorted, category, params.swiss_rounds);
        }
        Format::PoolPlayGroups | Format::PoolPlayPlayoffs | Format::PoolPlayCups => {
            if params.group_count == 0 {
                return Err(FixtureError::InvalidGroupCount);
            }
            let (fixtures, groups) =
                pool_play::fixtures(&sorted, category, params.group_count, params.match_frequency);
            set.fixtures = fixtures;
            set.groups = groups;
        }
    }
    Ok(set)
}

/// Append the knockout stage for a category whose pool play has finished:
/// groups are ranked by standing, cross-seeded per the structure, and the
/// new fixtures inserted under the duplicate-rejecting playoff key. Errors
/// if the category already has playoff fixtures.
pub fn build_playoffs(
    set: &mut FixtureSet,
    category: &str,
    structure: PlayoffStructure,
) -> Result<(), FixtureError> {
    let ranked = ranked(set, category);
    let first = next_match_number(set, category);
    let fixtures = playoffs::build(&ranked, structure, category, None, first);
    set.append_playoffs(fixtures)
}

/// As [`build_playoffs`], but with parallel gold and silver brackets.
pub fn build_cup_playoffs(
    set: &mut FixtureSet,
    category: &str,
    structure: PlayoffStructure,
) -> Result<(), FixtureError> {
    let ranked = ranked(set, category);
    let first = next_match_number(set, category);
    let fixtures = playoffs::build_cups(&ranked, structure, category, first);
    set.append_playoffs(fixtures)
}

/// First free match number in a category: playoff numbering continues
/// past the pool stage so numbers stay unique within every
/// (round, category, cup) partition.
fn next_match_number(set: &FixtureSet, category: &str) -> u32 {
    set.fixtures
        .iter()
        .filter(|f| f.category == category)
        .map(|f| f.match_number)
        .max()
        .unwrap_or(0)
        + 1
}

fn ranked(set: &FixtureSet, category: &str) -> Vec<crate::models::Group> {
    if !set.pool_complete(category) {
        warn!("pool play for '{category}' is not complete; standings may be partial");
    }
    let groups: Vec<_> = set
        .groups
        .iter()
        .filter(|g| g.category == category)
        .cloned()
        .collect();
    playoffs::ranked_groups(&set.fixtures, &groups)
}

/// Record an externally-decided result: stamp winner/score/completed, then
/// run advancement so downstream slots fill. The winner must be a
/// non-placeholder occupant of the match. Re-recording a match (a manual
/// score correction) is allowed; advancement never overwrites downstream
/// slots that are already filled.
pub fn record_result(
    set: &mut FixtureSet,
    match_id: MatchId,
    winner: &str,
    score: Option<String>,
) -> Result<(), FixtureError> {
    let fixture = set
        .fixture_mut(match_id)
        .ok_or(FixtureError::MatchNotFound(match_id))?;
    if !fixture.has_player(winner) || id_is_placeholder(winner) {
        return Err(FixtureError::InvalidWinner(match_id));
    }
    fixture.winner = Some(winner.to_string());
    fixture.score = score;
    fixture.completed = true;
    advancement::propagate(set, match_id);
    Ok(())
}

/// Total match count of a generated set; pure, used by the host UI to
/// preview the schedule size before committing.
pub fn calculate_total_matches(set: &FixtureSet) -> usize {
    set.total_matches()
}
