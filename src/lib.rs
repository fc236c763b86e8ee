//! Tournament fixture engine: deterministic match-schedule generation and
//! bracket advancement, invoked in-process by a host application that owns
//! persistence and UI.
//!
//! The host feeds in a roster of `{id, category, seed}` records and a
//! format selection; the engine returns the full fixture/group collection
//! for the touched category. On every score entry the host calls
//! [`record_result`], which cascades winners (and third-place losers) into
//! the vacant slots of downstream matches.

pub mod logic;
pub mod models;

pub use logic::{
    allocate, build_cup_playoffs, build_playoffs, calculate_total_matches, cross_seed_table,
    generate_fixtures, group_standings, normalize, propagate, propagate_all, record_result,
    BracketIndex,
};
pub use models::{
    BracketSide, Cup, Fixture, FixtureError, FixtureSet, Format, FormatParams, Group, MatchId,
    Participant, ParticipantId, PlayoffKey, PlayoffRound, PlayoffStructure, Stage,
};
