//! Core engine types: identifiers, errors, RNG, configuration and game state.
//!
//! Everything the resolvers share lives here. League data (players, teams)
//! is in [`league`](crate::league); the per-game mutable state is
//! [`GameState`].

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod state;

pub use config::{RoleFatigue, SimConfig};
pub use error::{EffectKind, SimError, SimResult};
pub use ids::{BallparkId, GameId, ItemDefId, ItemId, PerkId, PlayerId, StatusId, TeamId, WeatherId};
pub use rng::GameRng;
pub use state::{Count, GameState, PitchersOfRecord, Side, TeamGameState};
