//! Pool-play groups. Membership order is meaningful: seed-balanced at
//! allocation time, standing order (1st..Nth) once pool play concludes.

use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pool-play group within one category.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    /// Sequential letter: "A", "B", "C", ...
    pub name: String,
    pub category: String,
    pub player_ids: Vec<ParticipantId>,
}

impl Group {
    pub fn new(index: usize, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: group_letter(index),
            category: category.into(),
            player_ids: Vec::new(),
        }
    }
}

/// Letter name for the group at `index`: A..Z, then AA, AB, ...
pub fn group_letter(index: usize) -> String {
    let mut n = index;
    let mut name = String::new();
    loop {
        name.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    name
}
