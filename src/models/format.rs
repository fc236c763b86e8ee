//! Format selectors handed in by the host alongside the roster.

use serde::{Deserialize, Serialize};

/// Tournament format for one category.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Format {
    RoundRobin,
    SingleElimination,
    DoubleElimination,
    Swiss,
    /// Pool play only; playoffs are never built.
    PoolPlayGroups,
    /// Pool play, then a single knockout bracket once pools complete.
    PoolPlayPlayoffs,
    /// Pool play, then parallel gold/silver knockout brackets.
    PoolPlayCups,
}

/// Shape of the knockout stage built after pool play.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayoffStructure {
    QuarterFinals,
    SemiFinals,
    FinalOnly,
}

/// Format-specific knobs accompanying a [`Format`] selection.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatParams {
    /// Number of pool-play groups (pool formats only).
    pub group_count: usize,
    /// How many times each pool pairing is played (1 = once).
    pub match_frequency: u32,
    /// Total Swiss rounds to allocate (round 1 paired, rest empty).
    pub swiss_rounds: u32,
    /// Knockout shape for pool-play-into-playoffs / cups.
    pub playoff_structure: PlayoffStructure,
}

impl Default for FormatParams {
    fn default() -> Self {
        Self {
            group_count: 2,
            match_frequency: 1,
            swiss_rounds: 3,
            playoff_structure: PlayoffStructure::QuarterFinals,
        }
    }
}
