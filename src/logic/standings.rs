//! Group standings: matches won, then points differential.

use crate::models::{Fixture, Group, ParticipantId};

/// Per-player tallies over completed pool fixtures.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct Tally {
    wins: u32,
    pts_diff: i64,
}

/// Order a group's members by standing: matches won descending, then
/// points differential descending (sum scored minus sum conceded over
/// `"A-B"` score strings; missing or malformed scores count 0-0). Ties
/// beyond that keep the group's current order.
pub fn group_standings(fixtures: &[Fixture], group: &Group) -> Vec<ParticipantId> {
    let mut order: Vec<(ParticipantId, Tally)> = group
        .player_ids
        .iter()
        .map(|id| (id.clone(), tally(fixtures, group, id)))
        .collect();
    order.sort_by(|(_, a), (_, b)| b.wins.cmp(&a.wins).then(b.pts_diff.cmp(&a.pts_diff)));
    order.into_iter().map(|(id, _)| id).collect()
}

fn tally(fixtures: &[Fixture], group: &Group, id: &ParticipantId) -> Tally {
    let mut t = Tally::default();
    for f in fixtures {
        if f.group.as_deref() != Some(group.id.as_str()) || !f.completed || !f.has_player(id) {
            continue;
        }
        if f.winner.as_ref() == Some(id) {
            t.wins += 1;
        }
        if let Some((a, b)) = f.score.as_deref().and_then(parse_score) {
            let (scored, conceded) = if f.player1.as_ref() == Some(id) {
                (a, b)
            } else {
                (b, a)
            };
            t.pts_diff += scored - conceded;
        }
    }
    t
}

/// Parse an `"A-B"` score string into (player1 points, player2 points).
fn parse_score(score: &str) -> Option<(i64, i64)> {
    let (a, b) = score.split_once('-')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}
