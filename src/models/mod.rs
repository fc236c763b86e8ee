//! Data structures for the fixture engine: participants, fixtures, groups.

mod fixture;
mod fixture_set;
mod format;
mod group;
mod participant;

pub use fixture::{BracketSide, Cup, Fixture, MatchId, PlayoffRound, Stage};
pub use fixture_set::{FixtureError, FixtureSet, PlayoffKey};
pub use format::{Format, FormatParams, PlayoffStructure};
pub use group::{group_letter, Group};
pub use participant::{id_is_placeholder, Participant, ParticipantId, BYE_ID, DUMMY_PREFIX};
