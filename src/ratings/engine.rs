//! The ratings pipeline.
//!
//! ```text
//! base attributes (× species × class)
//!   + attribute bonuses from active effects
//!   + clutch shift on wisdom and intelligence (scaled by charisma)
//!   × stamina reduction (all but charisma)
//!   → composite ratings + rating bonuses from active effects
//! ```
//!
//! This module is the only place attribute math happens. Every resolver
//! asks [`RatingsEngine::profile`] for a player's situational numbers.

use super::composite::{BattingRatings, PitchingRatings};
use crate::core::{GameState, PlayerId, SimResult};
use crate::effects::{
    combined_hit_table, total_attribute_bonus, total_quality_bonus, ActiveEffect,
    EffectRegistry, HitTableModifier, ModifierResolver,
};
use crate::league::{Attribute, Attributes, Player};
use crate::play::PitchKind;

/// Attribute points a 20-charisma player gains on wisdom and intelligence
/// at maximum pressure (a 0-charisma player loses as much).
const CLUTCH_SWING: f64 = 2.0;

/// Stamina below which attributes start to sag.
const FRESH_STAMINA: f64 = 0.8;

/// A player's situational numbers, resolved once and read many times.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerProfile {
    pub player: PlayerId,
    pub effects: Vec<ActiveEffect>,
    pub attributes: Attributes,
}

impl PlayerProfile {
    #[must_use]
    pub fn batting(&self) -> BattingRatings {
        RatingsEngine::composite_batting_ratings(&self.attributes, &self.effects)
    }

    #[must_use]
    pub fn pitching(&self) -> PitchingRatings {
        RatingsEngine::composite_pitching_ratings(&self.attributes, &self.effects)
    }

    /// Combined hit-table multipliers of the active effects.
    #[must_use]
    pub fn hit_table(&self) -> HitTableModifier {
        combined_hit_table(&self.effects)
    }

    /// Sum of pitch-quality bonuses of the active effects.
    #[must_use]
    pub fn quality_bonus(&self) -> f64 {
        total_quality_bonus(&self.effects)
    }
}

/// Computes modified attributes and composite ratings.
pub struct RatingsEngine<'a> {
    resolver: ModifierResolver<'a>,
}

impl<'a> RatingsEngine<'a> {
    #[must_use]
    pub fn new(registry: &'a EffectRegistry) -> Self {
        Self {
            resolver: ModifierResolver::new(registry),
        }
    }

    /// Resolve a player's active effects and modified attributes.
    pub fn profile(
        &self,
        state: &GameState,
        player: PlayerId,
        pitch_kind: Option<PitchKind>,
    ) -> SimResult<PlayerProfile> {
        let effects = self.resolver.active_effects(state, player, pitch_kind)?;
        let clutch = Self::clutch_factor(state);
        let attributes = Self::modified_attributes(state.player(player)?, &effects, clutch);
        Ok(PlayerProfile {
            player,
            effects,
            attributes,
        })
    }

    /// Situational pressure in `[0, 1]`.
    ///
    /// Weighted sum of count fullness, runners in scoring position, inning
    /// lateness and score closeness.
    #[must_use]
    pub fn clutch_factor(state: &GameState) -> f64 {
        let count = state.count.fullness();
        let risp = (state.runners_in_scoring_position() as f64 / 2.0).min(1.0);
        let lateness = (f64::from(state.game_inning()) / 9.0).min(1.0);
        let gap = state.lead(crate::core::Side::Home).unsigned_abs() as f64;
        let closeness = (1.0 - gap / 5.0).max(0.0);

        (0.2 * count + 0.3 * risp + 0.25 * lateness + 0.25 * closeness).clamp(0.0, 1.0)
    }

    /// Stamina multiplier applied to every attribute but charisma.
    #[must_use]
    pub fn stamina_reduction(stamina: f64) -> f64 {
        1.0 / (1.0 + (FRESH_STAMINA - stamina).max(0.0) * 2.0)
    }

    /// Base attributes after bonuses, clutch and stamina.
    #[must_use]
    pub fn modified_attributes(player: &Player, effects: &[ActiveEffect], clutch: f64) -> Attributes {
        let attributes = player.base_attributes() + total_attribute_bonus(effects);

        let shift = clutch * (attributes.charisma - 10.0) / 10.0 * CLUTCH_SWING;
        let reduction = Self::stamina_reduction(player.stamina);

        attributes.map(|attribute, value| {
            let value = if attribute.is_mental() { value + shift } else { value };
            let value = if attribute == Attribute::Charisma {
                value
            } else {
                value * reduction
            };
            value.max(0.0)
        })
    }

    /// Batting composites plus active batting bonuses.
    #[must_use]
    pub fn composite_batting_ratings(attributes: &Attributes, effects: &[ActiveEffect]) -> BattingRatings {
        effects
            .iter()
            .filter_map(|e| e.effect.batting_bonus)
            .fold(BattingRatings::from_attributes(attributes), |acc, b| acc + b)
    }

    /// Pitching composites plus active pitching bonuses.
    #[must_use]
    pub fn composite_pitching_ratings(
        attributes: &Attributes,
        effects: &[ActiveEffect],
    ) -> PitchingRatings {
        effects
            .iter()
            .filter_map(|e| e.effect.pitching_bonus)
            .fold(PitchingRatings::from_attributes(attributes), |acc, b| acc + b)
    }
}
