//! Effect system: weather, ballparks, perks and statuses.
//!
//! - [`PerkEffect`]: the uniform modifier payload every source produces
//! - [`EffectSource`]: tagged origin of an active effect
//! - [`EffectCondition`]: data-driven predicate deciding when a source applies
//! - [`EffectRegistry`]: read-only definition tables, looked up by ID
//! - [`ModifierResolver`]: gathers the active effects for a player
//!
//! ## Design Philosophy
//!
//! The engine never interprets content. A perk is just a condition and a
//! payload; new perks, weathers or statuses are new table entries, not new
//! code paths.

mod condition;
mod effect;
mod registry;
mod resolver;

pub use condition::{ConditionContext, ConditionEvaluator, EffectCondition};
pub use effect::{
    combined_hit_table, total_attribute_bonus, total_quality_bonus, ActiveEffect, EffectSource,
    HitTableModifier, PerkEffect,
};
pub use registry::{
    BallparkDef, EffectRegistry, ItemDefinition, PerkDef, PerkKind, PerkRequirements, StatusDef,
    WeatherDef,
};
pub use resolver::ModifierResolver;
