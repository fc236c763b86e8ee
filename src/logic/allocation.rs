//! Snake (serpentine) group allocation: balances aggregate seed strength
//! across groups by reversing the fill direction at every boundary.

use crate::models::{Group, Participant};

/// Split a seed-sorted roster into `group_count` groups by snake
/// distribution: seed 1 to group 0, seed 2 to group 1, ... seed N to group
/// N-1, then back down. Every participant lands in exactly one group and
/// group sizes differ by at most 1.
pub fn allocate(sorted: &[Participant], group_count: usize, category: &str) -> Vec<Group> {
    let mut groups: Vec<Group> = (0..group_count).map(|i| Group::new(i, category)).collect();
    if group_count == 0 {
        return groups;
    }

    let mut idx = 0usize;
    let mut forward = true;
    for p in sorted {
        groups[idx].player_ids.push(p.id.clone());
        if group_count == 1 {
            continue;
        }
        if forward {
            if idx + 1 == group_count {
                forward = false;
            } else {
                idx += 1;
            }
        } else if idx == 0 {
            forward = true;
        } else {
            idx -= 1;
        }
    }
    groups
}
