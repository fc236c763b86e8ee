//! The per-tournament fixture collection and its errors.

use crate::models::fixture::{Cup, Fixture, MatchId, PlayoffRound, Stage};
use crate::models::group::Group;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Errors that can occur during fixture generation or result entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FixtureError {
    /// No participants registered for the requested category.
    NoParticipants { category: String },
    /// A pool format was requested with zero groups.
    InvalidGroupCount,
    /// Swiss was requested with zero rounds.
    InvalidRoundCount,
    /// Playoff fixtures already exist for this category (and cup, if any);
    /// they must be cleared explicitly before regenerating.
    PlayoffsAlreadyGenerated { category: String },
    /// Fixture not found in the set.
    MatchNotFound(MatchId),
    /// The recorded winner is not one of the fixture's occupants, or is a
    /// placeholder.
    InvalidWinner(MatchId),
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureError::NoParticipants { category } => {
                write!(f, "No participants registered for category '{category}'")
            }
            FixtureError::InvalidGroupCount => write!(f, "Group count must be at least 1"),
            FixtureError::InvalidRoundCount => write!(f, "Round count must be at least 1"),
            FixtureError::PlayoffsAlreadyGenerated { category } => {
                write!(f, "Playoff fixtures already exist for category '{category}'")
            }
            FixtureError::MatchNotFound(_) => write!(f, "Match not found"),
            FixtureError::InvalidWinner(_) => {
                write!(f, "Winner must be a non-placeholder occupant of the match")
            }
        }
    }
}

impl std::error::Error for FixtureError {}

/// Uniqueness key for a playoff fixture. Two fixtures sharing a key are
/// duplicates and must be merged.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct PlayoffKey {
    pub category: String,
    pub playoff_round: PlayoffRound,
    pub match_number: u32,
    pub cup: Option<Cup>,
}

impl PlayoffKey {
    /// The key of a fixture, if it is a playoff-round fixture.
    pub fn of(fixture: &Fixture) -> Option<Self> {
        fixture.playoff_round.map(|playoff_round| Self {
            category: fixture.category.clone(),
            playoff_round,
            match_number: fixture.match_number,
            cup: fixture.cup,
        })
    }
}

/// All fixtures and groups for one tournament, across categories.
///
/// Pool fixtures may be regenerated (playoffs are preserved); playoff
/// fixtures are appended at most once per category/cup; advancement fills
/// slots in place. Nothing else is ever deleted outside
/// [`FixtureSet::reconcile_duplicates`].
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FixtureSet {
    pub fixtures: Vec<Fixture>,
    pub groups: Vec<Group>,
}

impl FixtureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total generated match count. Pure; used by the host UI to preview
    /// the schedule size before committing.
    pub fn total_matches(&self) -> usize {
        self.fixtures.len()
    }

    pub fn fixture(&self, id: MatchId) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.id == id)
    }

    pub fn fixture_mut(&mut self, id: MatchId) -> Option<&mut Fixture> {
        self.fixtures.iter_mut().find(|f| f.id == id)
    }

    /// All pool fixtures for a category, in generation order.
    pub fn pool_fixtures<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a Fixture> + 'a {
        self.fixtures
            .iter()
            .filter(move |f| f.stage == Stage::Pool && f.category == category)
    }

    /// Whether every pool fixture in the category is completed (and at
    /// least one exists). The host must check this before building playoffs.
    pub fn pool_complete(&self, category: &str) -> bool {
        let mut any = false;
        for f in self.pool_fixtures(category) {
            any = true;
            if !f.completed {
                return false;
            }
        }
        any
    }

    /// Whether any playoff fixtures exist for the category (optionally
    /// restricted to one cup).
    pub fn has_playoffs(&self, category: &str, cup: Option<Cup>) -> bool {
        self.fixtures.iter().any(|f| {
            f.stage == Stage::Playoff
                && f.category == category
                && (cup.is_none() || f.cup == cup)
        })
    }

    /// Replace the pool fixtures (and groups) of one category, preserving
    /// any playoff fixtures already generated for it.
    pub fn replace_pool(&mut self, category: &str, fixtures: Vec<Fixture>, groups: Vec<Group>) {
        self.fixtures
            .retain(|f| !(f.stage == Stage::Pool && f.category == category));
        self.groups.retain(|g| g.category != category);
        self.fixtures.extend(fixtures);
        self.groups.extend(groups);
    }

    /// Append a generated playoff stage. Refused when the category already
    /// has playoff fixtures for any cup the batch touches; the organizer
    /// must clear those explicitly first.
    pub fn append_playoffs(&mut self, fixtures: Vec<Fixture>) -> Result<(), FixtureError> {
        for f in &fixtures {
            if f.stage == Stage::Playoff && self.has_playoffs(&f.category, f.cup) {
                return Err(FixtureError::PlayoffsAlreadyGenerated {
                    category: f.category.clone(),
                });
            }
        }
        for f in fixtures {
            self.insert_playoff(f);
        }
        Ok(())
    }

    /// Insert one playoff fixture, enforcing key uniqueness: a fixture
    /// whose `(category, playoffRound, matchNumber, cup)` key is already
    /// present is merged into the existing record instead of duplicated,
    /// preferring whichever variant carries player/score data.
    pub fn insert_playoff(&mut self, fixture: Fixture) {
        let Some(key) = PlayoffKey::of(&fixture) else {
            self.fixtures.push(fixture);
            return;
        };
        let existing = self
            .fixtures
            .iter_mut()
            .find(|f| PlayoffKey::of(f).as_ref() == Some(&key));
        match existing {
            Some(current) => {
                warn!(
                    "duplicate playoff fixture {:?} round {:?} match {} in '{}'; merging",
                    key.cup, key.playoff_round, key.match_number, key.category
                );
                if !current.has_data() && fixture.has_data() {
                    *current = fixture;
                }
            }
            None => self.fixtures.push(fixture),
        }
    }

    /// Corrective pass for sets loaded from storage: collapse playoff
    /// fixtures sharing a uniqueness key, keeping the variant that carries
    /// player/score data over an empty one. Returns how many were removed.
    pub fn reconcile_duplicates(&mut self) -> usize {
        let mut kept: HashMap<PlayoffKey, usize> = HashMap::new();
        let mut remove: Vec<MatchId> = Vec::new();
        for (idx, f) in self.fixtures.iter().enumerate() {
            let Some(key) = PlayoffKey::of(f) else { continue };
            match kept.get(&key) {
                None => {
                    kept.insert(key, idx);
                }
                Some(&first) => {
                    warn!(
                        "duplicate playoff fixture in '{}' ({:?} match {}); reconciling",
                        f.category, key.playoff_round, key.match_number
                    );
                    if f.has_data() && !self.fixtures[first].has_data() {
                        remove.push(self.fixtures[first].id);
                        kept.insert(key, idx);
                    } else {
                        remove.push(f.id);
                    }
                }
            }
        }
        let removed = remove.len();
        self.fixtures.retain(|f| !remove.contains(&f.id));
        removed
    }
}
