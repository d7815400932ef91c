//! Statistics bookkeeping.
//!
//! - [`PlayerStats`]: counting stats per player per game
//! - [`StreakTracker`]: in-game heat feeding the durable `streak` status

mod player_stats;
mod streak;

pub use player_stats::PlayerStats;
pub use streak::{heat, StreakTracker};
