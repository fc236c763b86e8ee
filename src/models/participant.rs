//! Participants: real registrants and the placeholders used to pad brackets.

use serde::{Deserialize, Serialize};

/// Opaque identifier handed to us by the host application. May denote a
/// single player or a pre-formed doubles team.
pub type ParticipantId = String;

/// Reserved id for the round-robin bye slot.
pub const BYE_ID: &str = "bye";

/// Prefix for generated placeholder ids (`dummy_1`, `dummy_2`, ...).
pub const DUMMY_PREFIX: &str = "dummy_";

/// A tournament entrant in one category. Lower seed means stronger;
/// unseeded participants sort after every seeded one.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub category: String,
    pub seed: Option<u32>,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, category: impl Into<String>, seed: Option<u32>) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            seed,
        }
    }

    /// Sequential placeholder used to pad a roster to a required size.
    pub fn dummy(n: usize, category: impl Into<String>) -> Self {
        Self::new(format!("{DUMMY_PREFIX}{n}"), category, None)
    }

    /// The bye slot used to make a round-robin field even.
    pub fn bye(category: impl Into<String>) -> Self {
        Self::new(BYE_ID, category, None)
    }

    /// Placeholders fill bracket slots but never play or win.
    pub fn is_placeholder(&self) -> bool {
        id_is_placeholder(&self.id)
    }
}

/// Whether an id denotes a placeholder rather than a real entrant.
pub fn id_is_placeholder(id: &str) -> bool {
    id == BYE_ID || id.starts_with(DUMMY_PREFIX)
}
