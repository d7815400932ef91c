//! Effect definition tables.
//!
//! The `EffectRegistry` holds every weather, ballpark, perk, status and
//! item definition a league uses. It is built once, before any game, and
//! only read during simulation. Lookups that miss are data errors and
//! surface as [`SimError::UnknownEffect`].

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::condition::EffectCondition;
use super::effect::PerkEffect;
use crate::core::{
    BallparkId, EffectKind, ItemDefId, PerkId, SimError, SimResult, StatusId, WeatherId,
};
use crate::league::{Attribute, Player, Position};

/// A weather condition. Its effect applies to every player in the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherDef {
    pub id: WeatherId,
    pub name: String,
    pub effect: PerkEffect,
}

impl WeatherDef {
    pub fn new(id: impl Into<WeatherId>, name: impl Into<String>, effect: PerkEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            effect,
        }
    }
}

/// A ballpark, with separate effects for the home and visiting sides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BallparkDef {
    pub id: BallparkId,
    pub name: String,
    pub home: PerkEffect,
    pub away: PerkEffect,
}

impl BallparkDef {
    pub fn new(id: impl Into<BallparkId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            home: PerkEffect::default(),
            away: PerkEffect::default(),
        }
    }

    #[must_use]
    pub fn with_home(mut self, effect: PerkEffect) -> Self {
        self.home = effect;
        self
    }

    #[must_use]
    pub fn with_away(mut self, effect: PerkEffect) -> Self {
        self.away = effect;
        self
    }

    /// Effect for a player on the given side.
    #[must_use]
    pub fn effect_for(&self, home: bool) -> &PerkEffect {
        if home {
            &self.home
        } else {
            &self.away
        }
    }
}

/// Broad category of a perk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerkKind {
    Batting,
    Pitching,
    Fielding,
    Baserunning,
    #[default]
    General,
}

/// Who may benefit from a perk.
///
/// A perk held by a player who does not meet its requirements stays on
/// the roster but is inactive.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PerkRequirements {
    /// Player must be eligible at one of these positions (empty: any).
    pub positions: Vec<Position>,

    /// Minimum base attribute values.
    pub min_attributes: Vec<(Attribute, f64)>,
}

impl PerkRequirements {
    /// Does the player meet every requirement?
    #[must_use]
    pub fn is_met_by(&self, player: &Player) -> bool {
        let position_ok =
            self.positions.is_empty() || self.positions.iter().any(|&p| player.can_play(p));
        let base = player.base_attributes();
        position_ok
            && self
                .min_attributes
                .iter()
                .all(|&(attribute, min)| base.get(attribute) >= min)
    }
}

/// A perk definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerkDef {
    pub id: PerkId,
    pub name: String,
    pub kind: PerkKind,
    pub requirements: Option<PerkRequirements>,
    pub condition: EffectCondition,
    pub effect: PerkEffect,
}

impl PerkDef {
    /// Create a perk that applies to its owner only.
    pub fn new(id: impl Into<PerkId>, name: impl Into<String>, effect: PerkEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: PerkKind::default(),
            requirements: None,
            condition: EffectCondition::default(),
            effect,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: PerkKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_requirements(mut self, requirements: PerkRequirements) -> Self {
        self.requirements = Some(requirements);
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: EffectCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Can this player's copy of the perk be active?
    #[must_use]
    pub fn usable_by(&self, player: &Player) -> bool {
        self.requirements
            .as_ref()
            .map_or(true, |r| r.is_met_by(player))
    }
}

/// A status definition. The effect is per stack and scaled by the
/// holder's (signed) stack count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusDef {
    pub id: StatusId,
    pub name: String,
    pub condition: EffectCondition,
    pub per_stack: PerkEffect,
}

impl StatusDef {
    pub fn new(id: impl Into<StatusId>, name: impl Into<String>, per_stack: PerkEffect) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            condition: EffectCondition::default(),
            per_stack,
        }
    }

    #[must_use]
    pub fn with_condition(mut self, condition: EffectCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Effect of holding `stacks` stacks.
    #[must_use]
    pub fn effect(&self, stacks: i32) -> PerkEffect {
        self.per_stack.scaled(stacks)
    }
}

/// An item definition. Holding an item grants its perks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: ItemDefId,
    pub name: String,
    pub perks: Vec<PerkId>,
}

impl ItemDefinition {
    pub fn new(id: impl Into<ItemDefId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            perks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_perk(mut self, perk: impl Into<PerkId>) -> Self {
        self.perks.push(perk.into());
        self
    }
}

/// Read-only registry of effect definitions.
///
/// ## Example
///
/// ```
/// use rust_ballgame::core::PerkId;
/// use rust_ballgame::effects::{EffectRegistry, PerkDef, PerkEffect};
///
/// let mut registry = EffectRegistry::new();
/// registry.register_perk(PerkDef::new("ace", "Ace", PerkEffect::new().with_quality_bonus(0.1)));
///
/// let ace = registry.perk(&PerkId::new("ace")).unwrap();
/// assert_eq!(ace.name, "Ace");
/// assert!(registry.perk(&PerkId::new("nope")).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    weather: FxHashMap<WeatherId, WeatherDef>,
    ballparks: FxHashMap<BallparkId, BallparkDef>,
    perks: FxHashMap<PerkId, PerkDef>,
    statuses: FxHashMap<StatusId, StatusDef>,
    items: FxHashMap<ItemDefId, ItemDefinition>,
}

fn unknown(kind: EffectKind, id: &str) -> SimError {
    SimError::UnknownEffect {
        kind,
        id: id.to_string(),
    }
}

impl EffectRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a weather definition.
    ///
    /// Panics if the ID is already registered; the same holds for every
    /// `register_*` method.
    pub fn register_weather(&mut self, def: WeatherDef) {
        if self.weather.contains_key(&def.id) {
            panic!("Weather {} already registered", def.id);
        }
        self.weather.insert(def.id.clone(), def);
    }

    pub fn register_ballpark(&mut self, def: BallparkDef) {
        if self.ballparks.contains_key(&def.id) {
            panic!("Ballpark {} already registered", def.id);
        }
        self.ballparks.insert(def.id.clone(), def);
    }

    pub fn register_perk(&mut self, def: PerkDef) {
        if self.perks.contains_key(&def.id) {
            panic!("Perk {} already registered", def.id);
        }
        self.perks.insert(def.id.clone(), def);
    }

    pub fn register_status(&mut self, def: StatusDef) {
        if self.statuses.contains_key(&def.id) {
            panic!("Status {} already registered", def.id);
        }
        self.statuses.insert(def.id.clone(), def);
    }

    pub fn register_item(&mut self, def: ItemDefinition) {
        if self.items.contains_key(&def.id) {
            panic!("Item {} already registered", def.id);
        }
        self.items.insert(def.id.clone(), def);
    }

    pub fn weather(&self, id: &WeatherId) -> SimResult<&WeatherDef> {
        self.weather
            .get(id)
            .ok_or_else(|| unknown(EffectKind::Weather, id.as_str()))
    }

    pub fn ballpark(&self, id: &BallparkId) -> SimResult<&BallparkDef> {
        self.ballparks
            .get(id)
            .ok_or_else(|| unknown(EffectKind::Ballpark, id.as_str()))
    }

    pub fn perk(&self, id: &PerkId) -> SimResult<&PerkDef> {
        self.perks
            .get(id)
            .ok_or_else(|| unknown(EffectKind::Perk, id.as_str()))
    }

    pub fn status(&self, id: &StatusId) -> SimResult<&StatusDef> {
        self.statuses
            .get(id)
            .ok_or_else(|| unknown(EffectKind::Status, id.as_str()))
    }

    pub fn item(&self, id: &ItemDefId) -> SimResult<&ItemDefinition> {
        self.items
            .get(id)
            .ok_or_else(|| unknown(EffectKind::Item, id.as_str()))
    }

    /// Check if a perk ID is registered.
    #[must_use]
    pub fn contains_perk(&self, id: &PerkId) -> bool {
        self.perks.contains_key(id)
    }

    /// Total number of definitions across all tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weather.len()
            + self.ballparks.len()
            + self.perks.len()
            + self.statuses.len()
            + self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over perk definitions (unordered).
    pub fn perks(&self) -> impl Iterator<Item = &PerkDef> {
        self.perks.values()
    }
}
