//! Active effect resolution.
//!
//! The `ModifierResolver` answers one question: which effects apply to
//! this player right now? It walks the sources in a fixed order:
//!
//! 1. weather (always active)
//! 2. ballpark (home or away variant, by the target's team)
//! 3. for every player in either batting order: their perks (own, then
//!    item-granted), then their status stacks
//!
//! and keeps those whose condition holds from the owner's point of view.

use super::condition::{ConditionContext, ConditionEvaluator};
use super::effect::{ActiveEffect, EffectSource};
use super::registry::EffectRegistry;
use crate::core::{GameState, PlayerId, Side, SimResult};
use crate::play::PitchKind;

/// Gathers active effects for a target player.
pub struct ModifierResolver<'a> {
    registry: &'a EffectRegistry,
}

impl<'a> ModifierResolver<'a> {
    #[must_use]
    pub fn new(registry: &'a EffectRegistry) -> Self {
        Self { registry }
    }

    /// Every effect active for `target` in the current situation.
    ///
    /// `pitch_kind` is the pitch about to be thrown, when known.
    pub fn active_effects(
        &self,
        state: &GameState,
        target: PlayerId,
        pitch_kind: Option<PitchKind>,
    ) -> SimResult<Vec<ActiveEffect>> {
        let mut effects = Vec::new();
        let target_side = state.side_of(target)?;

        let weather = self.registry.weather(&state.weather)?;
        effects.push(ActiveEffect::new(
            EffectSource::Weather(weather.id.clone()),
            weather.effect.clone(),
        ));

        let home = target_side == Side::Home;
        let park = self.registry.ballpark(&state.ballpark)?;
        effects.push(ActiveEffect::new(
            EffectSource::Ballpark {
                id: park.id.clone(),
                home,
            },
            park.effect_for(home).clone(),
        ));

        for owner in state.lineup() {
            let player = state.player(owner)?;
            let ctx = ConditionContext::situation(state, Some(owner), target, pitch_kind)?;

            let granted = state.granted_perks.get(&owner).into_iter().flatten();
            for perk_id in player.perks.iter().chain(granted) {
                let perk = self.registry.perk(perk_id)?;
                if perk.usable_by(player) && ConditionEvaluator::evaluate(&perk.condition, &ctx) {
                    effects.push(ActiveEffect::new(
                        EffectSource::Perk {
                            id: perk.id.clone(),
                            owner,
                        },
                        perk.effect.clone(),
                    ));
                }
            }

            for (status_id, &stacks) in &player.statuses {
                let status = self.registry.status(status_id)?;
                if ConditionEvaluator::evaluate(&status.condition, &ctx) {
                    effects.push(ActiveEffect::new(
                        EffectSource::Status {
                            id: status.id.clone(),
                            owner,
                            stacks,
                        },
                        status.effect(stacks),
                    ));
                }
            }
        }

        Ok(effects)
    }
}
