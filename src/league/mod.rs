//! League data: players, teams, items and the schedule.
//!
//! This is the roster of record. Games read it through
//! [`prepare_game`](crate::game::prepare_game) and write back only durable
//! per-player effects.

mod attributes;
pub mod fixtures;
mod player;
mod season;
mod team;

pub use attributes::{Attribute, Attributes, PlayerClass, Species};
pub use player::{Player, Position};
pub use season::{Item, League, LeagueRound, ScheduledGame};
pub use team::Team;
