//! The uniform effect payload and the sources that produce it.
//!
//! Weather, ballparks, perks and statuses are unrelated tables, but every
//! entry contributes the same shape of modifier: a [`PerkEffect`]. The
//! resolver wraps each contribution in an [`ActiveEffect`] tagged with its
//! [`EffectSource`] so downstream code can sum bonuses without caring where
//! they came from.
//!
//! ## Combination
//!
//! - Attribute and rating bonuses add.
//! - Hit-table modifiers multiply element-wise.
//! - Pitch-quality bonuses add (they are terms of a log-quality sum).
//!
//! All three are commutative, so the order of active effects never changes
//! a rating.

use serde::{Deserialize, Serialize};

use crate::core::{BallparkId, PerkId, PlayerId, StatusId, WeatherId};
use crate::league::Attributes;
use crate::ratings::{BattingRatings, PitchingRatings};
use crate::triggers::Trigger;

/// Multipliers applied to the batted-ball weighting tables.
///
/// Index order follows [`HitArea`](crate::play::HitArea),
/// [`HitPower`](crate::play::HitPower), [`HitType`](crate::play::HitType) and
/// [`HitOutcome`](crate::play::HitOutcome) (single, double, triple, home
/// run, out).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitTableModifier {
    pub area: [f64; 5],
    pub power: [f64; 3],
    pub hit_type: [f64; 4],
    pub outcome: [f64; 5],
}

impl Default for HitTableModifier {
    fn default() -> Self {
        Self::identity()
    }
}

impl HitTableModifier {
    /// All multipliers one.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            area: [1.0; 5],
            power: [1.0; 3],
            hit_type: [1.0; 4],
            outcome: [1.0; 5],
        }
    }

    #[must_use]
    pub fn with_area(mut self, area: [f64; 5]) -> Self {
        self.area = area;
        self
    }

    #[must_use]
    pub fn with_power(mut self, power: [f64; 3]) -> Self {
        self.power = power;
        self
    }

    #[must_use]
    pub fn with_hit_type(mut self, hit_type: [f64; 4]) -> Self {
        self.hit_type = hit_type;
        self
    }

    #[must_use]
    pub fn with_outcome(mut self, outcome: [f64; 5]) -> Self {
        self.outcome = outcome;
        self
    }

    /// Element-wise product of two modifiers.
    #[must_use]
    pub fn combine(&self, other: &HitTableModifier) -> Self {
        Self {
            area: mul_arrays(self.area, other.area),
            power: mul_arrays(self.power, other.power),
            hit_type: mul_arrays(self.hit_type, other.hit_type),
            outcome: mul_arrays(self.outcome, other.outcome),
        }
    }

    /// Raise every multiplier to an integer power. Negative stacks invert.
    #[must_use]
    pub fn powi(&self, n: i32) -> Self {
        Self {
            area: self.area.map(|v| v.powi(n)),
            power: self.power.map(|v| v.powi(n)),
            hit_type: self.hit_type.map(|v| v.powi(n)),
            outcome: self.outcome.map(|v| v.powi(n)),
        }
    }
}

fn mul_arrays<const N: usize>(a: [f64; N], b: [f64; N]) -> [f64; N] {
    let mut out = a;
    for (o, m) in out.iter_mut().zip(b) {
        *o *= m;
    }
    out
}

/// What an active effect contributes.
///
/// Every field is optional; an empty `PerkEffect` is a no-op.
///
/// ```
/// use rust_ballgame::effects::PerkEffect;
/// use rust_ballgame::league::{Attribute, Attributes};
///
/// let effect = PerkEffect::new()
///     .with_attribute_bonus(Attributes::zero().with(Attribute::Strength, 2.0))
///     .with_quality_bonus(0.1);
///
/// let doubled = effect.scaled(2);
/// assert_eq!(doubled.attribute_bonus.unwrap().strength, 4.0);
/// assert!((doubled.quality_bonus - 0.2).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PerkEffect {
    pub attribute_bonus: Option<Attributes>,
    pub batting_bonus: Option<BattingRatings>,
    pub pitching_bonus: Option<PitchingRatings>,
    pub hit_table: Option<HitTableModifier>,

    /// Added to the pitch's log-quality when the effect is active for the
    /// pitcher.
    pub quality_bonus: f64,

    pub trigger: Option<Trigger>,
}

impl PerkEffect {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_attribute_bonus(mut self, bonus: Attributes) -> Self {
        self.attribute_bonus = Some(bonus);
        self
    }

    #[must_use]
    pub fn with_batting_bonus(mut self, bonus: BattingRatings) -> Self {
        self.batting_bonus = Some(bonus);
        self
    }

    #[must_use]
    pub fn with_pitching_bonus(mut self, bonus: PitchingRatings) -> Self {
        self.pitching_bonus = Some(bonus);
        self
    }

    #[must_use]
    pub fn with_hit_table(mut self, table: HitTableModifier) -> Self {
        self.hit_table = Some(table);
        self
    }

    #[must_use]
    pub fn with_quality_bonus(mut self, bonus: f64) -> Self {
        self.quality_bonus = bonus;
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// The effect of `stacks` copies of this effect.
    ///
    /// Additive parts scale linearly, hit-table multipliers compound.
    /// Triggers are kept as-is; a status fires once regardless of stacks.
    #[must_use]
    pub fn scaled(&self, stacks: i32) -> Self {
        let k = f64::from(stacks);
        Self {
            attribute_bonus: self.attribute_bonus.map(|b| b * k),
            batting_bonus: self.batting_bonus.map(|b| b * k),
            pitching_bonus: self.pitching_bonus.map(|b| b * k),
            hit_table: self.hit_table.map(|t| t.powi(stacks)),
            quality_bonus: self.quality_bonus * k,
            trigger: self.trigger.clone(),
        }
    }
}

/// Where an active effect came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectSource {
    Weather(WeatherId),

    /// `home` is whether the target plays for the home team.
    Ballpark { id: BallparkId, home: bool },

    Perk { id: PerkId, owner: PlayerId },

    Status {
        id: StatusId,
        owner: PlayerId,
        stacks: i32,
    },
}

impl EffectSource {
    /// The player owning the source, if it is player-bound.
    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        match self {
            Self::Perk { owner, .. } | Self::Status { owner, .. } => Some(*owner),
            Self::Weather(_) | Self::Ballpark { .. } => None,
        }
    }

    /// Short name for the game log.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Weather(id) => id.as_str(),
            Self::Ballpark { id, .. } => id.as_str(),
            Self::Perk { id, .. } => id.as_str(),
            Self::Status { id, .. } => id.as_str(),
        }
    }
}

/// An effect whose condition holds for the current target and situation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub source: EffectSource,
    pub effect: PerkEffect,
}

impl ActiveEffect {
    #[must_use]
    pub fn new(source: EffectSource, effect: PerkEffect) -> Self {
        Self { source, effect }
    }
}

/// Sum of all attribute bonuses.
#[must_use]
pub fn total_attribute_bonus(effects: &[ActiveEffect]) -> Attributes {
    effects
        .iter()
        .filter_map(|e| e.effect.attribute_bonus)
        .fold(Attributes::zero(), |acc, b| acc + b)
}

/// Product of all hit-table modifiers.
#[must_use]
pub fn combined_hit_table(effects: &[ActiveEffect]) -> HitTableModifier {
    effects
        .iter()
        .filter_map(|e| e.effect.hit_table.as_ref())
        .fold(HitTableModifier::identity(), |acc, t| acc.combine(t))
}

/// Sum of all pitch-quality bonuses.
#[must_use]
pub fn total_quality_bonus(effects: &[ActiveEffect]) -> f64 {
    effects.iter().map(|e| e.effect.quality_bonus).sum()
}
