//! Winner/loser advancement: completed matches feed the vacant slots of
//! downstream matches.
//!
//! The fixture collection is indexed once into forward edges ("this match
//! feeds slot X of match Y"); propagation is then a lookup, not a scan.
//! Slots are only ever written while null, so re-applying propagation is a
//! no-op and an organizer's hand-filled slot is never overwritten.

use crate::models::{BracketSide, Cup, Fixture, FixtureSet, MatchId, PlayoffRound, Stage};
use log::{debug, warn};
use std::collections::HashMap;

/// Which occupant of the completed match travels along an edge.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Carry {
    Winner,
    Loser,
}

/// Which slot of the downstream match the edge fills.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SlotRule {
    /// First currently-empty slot (quarterfinal and elimination feeds).
    NextEmpty,
    /// Identity-fixed slot (semifinal feeds into final / 3rd place).
    Player1,
    Player2,
}

#[derive(Clone, Debug)]
struct Edge {
    target: MatchId,
    slot: SlotRule,
    carry: Carry,
}

/// Forward-edge index over every bracket in a fixture set.
pub struct BracketIndex {
    edges: HashMap<MatchId, Vec<Edge>>,
}

impl BracketIndex {
    /// Build edges for all playoff and elimination brackets in the set.
    /// Partitions never mix: edges stay within one `(category, cup)` for
    /// playoff rounds and one `(category, bracket)` for elimination rounds.
    pub fn build(set: &FixtureSet) -> Self {
        let mut index = Self {
            edges: HashMap::new(),
        };
        for (category, cup) in partitions(set, |f| f.playoff_round.is_some()) {
            index.playoff_edges(set, &category, cup);
        }
        for (category, _) in partitions(set, |f| {
            f.stage == Stage::Playoff && f.playoff_round.is_none()
        }) {
            index.elimination_edges(set, &category);
        }
        index
    }

    fn add(&mut self, source: MatchId, target: MatchId, slot: SlotRule, carry: Carry) {
        self.edges
            .entry(source)
            .or_default()
            .push(Edge { target, slot, carry });
    }

    /// QF 2k-1 and 2k feed SF k (first empty slot); SF k feeds the
    /// identity-fixed slot k of both the final (winner) and the 3rd-place
    /// match (loser).
    fn playoff_edges(&mut self, set: &FixtureSet, category: &str, cup: Option<Cup>) {
        let round = |r: PlayoffRound| -> Vec<&Fixture> {
            let mut v: Vec<&Fixture> = set
                .fixtures
                .iter()
                .filter(|f| {
                    f.category == category && f.cup == cup && f.playoff_round == Some(r)
                })
                .collect();
            v.sort_by_key(|f| f.match_number);
            v
        };

        let quarters = round(PlayoffRound::QuarterFinal);
        let semis = round(PlayoffRound::SemiFinal);
        let finals = round(PlayoffRound::Final);
        let thirds = round(PlayoffRound::ThirdPlace);

        for (pos, qf) in quarters.iter().enumerate() {
            match semis.get(pos / 2) {
                Some(sf) => self.add(qf.id, sf.id, SlotRule::NextEmpty, Carry::Winner),
                None => warn!(
                    "no semifinal for quarterfinal {} in '{category}'; skipping advancement",
                    qf.match_number
                ),
            }
        }
        for (pos, sf) in semis.iter().enumerate() {
            let slot = match pos {
                0 => SlotRule::Player1,
                1 => SlotRule::Player2,
                _ => {
                    warn!(
                        "more than 2 semifinals in '{category}'; semifinal {} has no final slot",
                        sf.match_number
                    );
                    continue;
                }
            };
            match finals.first() {
                Some(f) => self.add(sf.id, f.id, slot, Carry::Winner),
                None => warn!("no final in '{category}'; skipping advancement"),
            }
            match thirds.first() {
                Some(t) => self.add(sf.id, t.id, slot, Carry::Loser),
                None => warn!("no 3rd-place match in '{category}'; skipping advancement"),
            }
        }
    }

    /// Winner of match k in round r feeds match ceil(k/2) in round r+1
    /// (slot by parity of k). The last winners/losers rounds feed the
    /// grand final instead, when one exists.
    fn elimination_edges(&mut self, set: &FixtureSet, category: &str) {
        let sides = [None, Some(BracketSide::Winners), Some(BracketSide::Losers)];
        let grand_final = set
            .fixtures
            .iter()
            .find(|f| f.category == category && f.bracket == Some(BracketSide::Final));

        for side in sides {
            let mut rounds: HashMap<u32, Vec<&Fixture>> = HashMap::new();
            for f in set.fixtures.iter().filter(|f| {
                f.category == category
                    && f.stage == Stage::Playoff
                    && f.playoff_round.is_none()
                    && f.bracket == side
            }) {
                rounds.entry(f.round).or_default().push(f);
            }
            if rounds.is_empty() {
                continue;
            }
            for list in rounds.values_mut() {
                list.sort_by_key(|f| f.match_number);
            }
            let last_round = rounds.keys().copied().max().unwrap_or(1);

            for (&round, list) in &rounds {
                for (pos, f) in list.iter().enumerate() {
                    if round < last_round {
                        let slot = if pos % 2 == 0 {
                            SlotRule::Player1
                        } else {
                            SlotRule::Player2
                        };
                        match rounds.get(&(round + 1)).and_then(|next| next.get(pos / 2)) {
                            Some(next) => self.add(f.id, next.id, slot, Carry::Winner),
                            None => warn!(
                                "no round {} match for bracket match {} in '{category}'",
                                round + 1,
                                f.match_number
                            ),
                        }
                    } else if let Some(gf) = grand_final {
                        // Bracket finals feed the grand final: winners side
                        // to player1, losers side to player2.
                        let slot = match side {
                            Some(BracketSide::Winners) => SlotRule::Player1,
                            Some(BracketSide::Losers) => SlotRule::Player2,
                            _ => continue,
                        };
                        self.add(f.id, gf.id, slot, Carry::Winner);
                    }
                }
            }
        }
    }
}

/// Apply the advancement edges of one completed match. Unknown ids,
/// incomplete matches, and already-filled downstream slots are all
/// no-ops; inconsistencies are logged, never fatal.
pub fn propagate(set: &mut FixtureSet, match_id: MatchId) {
    let index = BracketIndex::build(set);
    apply(set, &index, match_id);
}

/// Re-apply advancement for every completed match in the set. Safe to run
/// any number of times (slots are only written while null); used after
/// loading a set whose propagation may have been interrupted.
pub fn propagate_all(set: &mut FixtureSet) {
    let index = BracketIndex::build(set);
    let completed: Vec<MatchId> = set
        .fixtures
        .iter()
        .filter(|f| f.completed)
        .map(|f| f.id)
        .collect();
    for id in completed {
        apply(set, &index, id);
    }
}

fn apply(set: &mut FixtureSet, index: &BracketIndex, match_id: MatchId) {
    let Some(source) = set.fixture(match_id) else {
        warn!("cannot propagate unknown match {match_id}");
        return;
    };
    if !source.completed {
        debug!("match {match_id} not completed; nothing to propagate");
        return;
    }
    let winner = source.winner.clone();
    let loser = source.loser().cloned();

    let Some(edges) = index.edges.get(&match_id) else {
        return;
    };
    for edge in edges {
        let travelling = match edge.carry {
            Carry::Winner => winner.clone(),
            Carry::Loser => loser.clone(),
        };
        let Some(id) = travelling else {
            warn!("completed match {match_id} has no resolvable winner/loser");
            continue;
        };
        let Some(target) = set.fixture_mut(edge.target) else {
            warn!("downstream match {} missing; skipping advancement", edge.target);
            continue;
        };
        if target.has_player(&id) {
            continue; // already applied
        }
        match edge.slot {
            SlotRule::NextEmpty => {
                if !target.fill_next_slot(id) {
                    debug!("both slots of match {} already filled", edge.target);
                }
            }
            SlotRule::Player1 => {
                if target.player1.is_none() {
                    target.player1 = Some(id);
                }
            }
            SlotRule::Player2 => {
                if target.player2.is_none() {
                    target.player2 = Some(id);
                }
            }
        }
    }
}

/// Distinct `(category, cup)` partitions among fixtures matching `pred`.
fn partitions(set: &FixtureSet, pred: impl Fn(&Fixture) -> bool) -> Vec<(String, Option<Cup>)> {
    let mut out: Vec<(String, Option<Cup>)> = Vec::new();
    for f in set.fixtures.iter().filter(|f| pred(f)) {
        let key = (f.category.clone(), f.cup);
        if !out.contains(&key) {
            out.push(key);
        }
    }
    out
}
