//! Fixture-engine logic: roster prep, pairing generators, playoff
//! construction, and advancement.

pub mod advancement;
pub mod allocation;
pub mod elimination;
pub mod generate;
pub mod playoffs;
pub mod pool_play;
pub mod round_robin;
pub mod roster;
pub mod standings;
pub mod swiss;

pub use advancement::{propagate, propagate_all, BracketIndex};
pub use allocation::allocate;
pub use generate::{
    build_cup_playoffs, build_playoffs, calculate_total_matches, generate_fixtures, record_result,
};
pub use playoffs::cross_seed_table;
pub use roster::normalize;
pub use standings::group_standings;
