//! Fixture (match) records and the enums that place them in the schedule.

use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a fixture.
pub type MatchId = Uuid;

/// Which phase of the tournament a fixture belongs to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Pool,
    Playoff,
}

/// Knockout round of a playoff fixture. Wire names match the host's store.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum PlayoffRound {
    #[serde(rename = "quarterFinal")]
    QuarterFinal,
    #[serde(rename = "semiFinal")]
    SemiFinal,
    #[serde(rename = "final")]
    Final,
    #[serde(rename = "3rdPlace")]
    ThirdPlace,
}

/// Parallel knockout bracket: gold for top group finishers, silver for the
/// next tier. Each cup resolves independently.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cup {
    Gold,
    Silver,
}

/// Bracket membership for double elimination.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BracketSide {
    Winners,
    Losers,
    Final,
}

/// One scheduled contest between two participant slots. Slots are `None`
/// until filled by generation or by winner/loser advancement.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    pub id: MatchId,
    pub round: u32,
    pub match_number: u32,
    pub player1: Option<ParticipantId>,
    pub player2: Option<ParticipantId>,
    pub winner: Option<ParticipantId>,
    pub score: Option<String>,
    pub completed: bool,
    pub category: String,
    pub stage: Stage,
    pub group: Option<String>,
    pub playoff_round: Option<PlayoffRound>,
    pub cup: Option<Cup>,
    pub bracket: Option<BracketSide>,
}

impl Fixture {
    /// A pool-stage fixture, both slots known up front. `group` is `None`
    /// for ungrouped formats (plain round robin, Swiss).
    pub fn pool(
        round: u32,
        match_number: u32,
        player1: ParticipantId,
        player2: ParticipantId,
        category: impl Into<String>,
        group: Option<&str>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            match_number,
            player1: Some(player1),
            player2: Some(player2),
            winner: None,
            score: None,
            completed: false,
            category: category.into(),
            stage: Stage::Pool,
            group: group.map(str::to_owned),
            playoff_round: None,
            cup: None,
            bracket: None,
        }
    }

    /// A pool-stage fixture reserved for a later external pairing (Swiss
    /// rounds after the first); both slots start empty.
    pub fn pool_empty(round: u32, match_number: u32, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            match_number,
            player1: None,
            player2: None,
            winner: None,
            score: None,
            completed: false,
            category: category.into(),
            stage: Stage::Pool,
            group: None,
            playoff_round: None,
            cup: None,
            bracket: None,
        }
    }

    /// A playoff fixture in a knockout round; slots may start empty.
    pub fn playoff(
        playoff_round: PlayoffRound,
        round: u32,
        match_number: u32,
        player1: Option<ParticipantId>,
        player2: Option<ParticipantId>,
        category: impl Into<String>,
        cup: Option<Cup>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            match_number,
            player1,
            player2,
            winner: None,
            score: None,
            completed: false,
            category: category.into(),
            stage: Stage::Playoff,
            group: None,
            playoff_round: Some(playoff_round),
            cup,
            bracket: None,
        }
    }

    /// A fixture inside an elimination bracket (single or double).
    pub fn bracket(
        side: BracketSide,
        round: u32,
        match_number: u32,
        player1: Option<ParticipantId>,
        player2: Option<ParticipantId>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            match_number,
            player1,
            player2,
            winner: None,
            score: None,
            completed: false,
            category: category.into(),
            stage: Stage::Playoff,
            group: None,
            playoff_round: None,
            cup: None,
            bracket: Some(side),
        }
    }

    /// Both slots filled but no result yet.
    pub fn is_ready(&self) -> bool {
        !self.completed && self.player1.is_some() && self.player2.is_some()
    }

    /// The non-winning occupant of a completed fixture.
    pub fn loser(&self) -> Option<&ParticipantId> {
        let winner = self.winner.as_ref()?;
        match (&self.player1, &self.player2) {
            (Some(p1), p2) if p1 == winner => p2.as_ref(),
            (p1, Some(p2)) if p2 == winner => p1.as_ref(),
            _ => None,
        }
    }

    /// Whether either slot currently holds the given participant.
    pub fn has_player(&self, id: &str) -> bool {
        self.player1.as_deref() == Some(id) || self.player2.as_deref() == Some(id)
    }

    /// Fill the first empty slot. Returns false (and leaves the fixture
    /// untouched) when both slots are already occupied.
    pub fn fill_next_slot(&mut self, id: ParticipantId) -> bool {
        if self.player1.is_none() {
            self.player1 = Some(id);
            true
        } else if self.player2.is_none() {
            self.player2 = Some(id);
            true
        } else {
            false
        }
    }

    /// True if this fixture carries any entered data (players, result, or
    /// score). Used when merging duplicates: the variant with data wins.
    pub fn has_data(&self) -> bool {
        self.player1.is_some()
            || self.player2.is_some()
            || self.winner.is_some()
            || self.score.is_some()
            || self.completed
    }
}
