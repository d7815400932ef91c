//! Simulation errors.
//!
//! Every error here is a data-integrity or programmer error: a lookup that
//! should never miss, a lineup slot that should never be empty, a pitch
//! quality that left its valid range. The engine aborts the current
//! simulation instead of substituting a default, since a guessed value
//! would silently corrupt downstream statistics.
//!
//! Stochastic "failures" (strikeouts, caught stealing) are not errors;
//! they are simulation outcomes recorded in stats and the game log.

use thiserror::Error;

use super::ids::{ItemId, PlayerId, TeamId};
use crate::league::Position;

/// Kind of effect definition, used in lookup errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Weather,
    Ballpark,
    Perk,
    Status,
    Item,
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Weather => "weather",
            Self::Ballpark => "ballpark",
            Self::Perk => "perk",
            Self::Status => "status",
            Self::Item => "item",
        };
        f.write_str(name)
    }
}

/// Fatal simulation error.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimError {
    #[error("player {0} not found in league")]
    UnknownPlayer(PlayerId),

    #[error("team {0} not found in league")]
    UnknownTeam(TeamId),

    #[error("item {0} not found in league")]
    UnknownItem(ItemId),

    #[error("{kind} definition '{id}' not registered")]
    UnknownEffect { kind: EffectKind, id: String },

    #[error("team {team} has no player at {position:?}")]
    EmptyPositionSlot { team: TeamId, position: Position },

    #[error("team {0} has an empty batting order")]
    EmptyLineup(TeamId),

    #[error("team {0} has no starting pitcher available")]
    NoStartingPitcher(TeamId),

    #[error("pitch quality {0} is not positive")]
    InvalidPitchQuality(f64),

    #[error("no defender could be resolved for the batted ball")]
    UnresolvedDefender,

    #[error("game state invariant violated: {0}")]
    InvariantViolation(&'static str),
}

/// Result alias used throughout the engine.
pub type SimResult<T> = Result<T, SimError>;
