//! Game orchestration: setup, the pitch-by-pitch state machine, results
//! and rounds.

mod machine;
mod result;
mod round;
mod setup;

pub use machine::{GameOutcome, MatchEngine};
pub use result::{GameResult, InningData, RoundResult, TeamGameData};
pub use round::simulate_round;
pub use setup::prepare_game;
