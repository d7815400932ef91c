//! # rust-ballgame
//!
//! A deterministic, pitch-by-pitch simulation engine for a fantasy
//! baseball league.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: One seed, one game. Every random draw goes through
//!    a per-game [`GameRng`] and all keyed data lives in ordered maps, so
//!    replaying a seed reproduces the result byte for byte.
//!
//! 2. **Content as Data**: Weather, ballparks, perks, statuses and items
//!    are registry entries built from one effect payload and a condition.
//!    The engine never special-cases a named perk.
//!
//! 3. **The Engine Does Not Own the League**: A game plays on working
//!    copies of its players and commits only durable effects back.
//!    Standings and career totals are merged by the caller.
//!
//! ## Modules
//!
//! - `core`: IDs, errors, RNG, configuration and per-game state
//! - `league`: players, teams, items, schedule, demo fixtures
//! - `effects`: effect payloads, conditions, registry, modifier resolution
//! - `ratings`: composite batting and pitching ratings per situation
//! - `play`: pitch, swing, batted ball, baserunning, fatigue, pitching changes
//! - `triggers`: reactive perk effects fired by play events
//! - `stats`: per-game stat lines and hot/cold streaks
//! - `gamelog`: the structured play-by-play record
//! - `game`: setup, the game state machine, rounds and results
//! - `content`: the standard content tables
//!
//! ## Example
//!
//! ```
//! use rust_ballgame::{GameRng, MatchEngine};
//! use rust_ballgame::league::fixtures;
//!
//! let engine = MatchEngine::default();
//! let mut league = fixtures::demo_league();
//! let round = fixtures::demo_round();
//!
//! let result = engine.simulate_round(&GameRng::new(7), &mut league, &round).unwrap();
//! league.apply_round_result(&result).unwrap();
//!
//! assert_eq!(league.game_results.len(), 2);
//! ```

pub mod content;
pub mod core;
pub mod effects;
pub mod game;
pub mod gamelog;
pub mod league;
pub mod play;
pub mod ratings;
pub mod stats;
pub mod triggers;

// Re-export commonly used types
pub use crate::core::{
    BallparkId, Count, GameId, GameRng, GameState, ItemDefId, ItemId, PerkId,
    PlayerId, SimConfig, SimError, SimResult, StatusId, TeamId, WeatherId,
};

pub use crate::league::{
    Attribute, Attributes, Item, League, LeagueRound, Player, PlayerClass, Position,
    ScheduledGame, Species, Team,
};

pub use crate::effects::{
    BallparkDef, EffectCondition, EffectRegistry, HitTableModifier, ItemDefinition, PerkDef,
    PerkEffect, StatusDef, WeatherDef,
};

pub use crate::game::{
    prepare_game, simulate_round, GameOutcome, GameResult, InningData, MatchEngine, RoundResult,
    TeamGameData,
};

pub use crate::gamelog::{GameLog, LogEvent};
pub use crate::stats::PlayerStats;
pub use crate::triggers::{Trigger, TriggerAction, TriggerEvent};
