//! Composite ratings and the attribute pipeline that produces them.

mod composite;
mod engine;

pub use composite::{BattingRatings, PitchingRatings};
pub use engine::{PlayerProfile, RatingsEngine};
