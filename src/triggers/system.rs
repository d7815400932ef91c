//! Matching and resolving triggers.

use tracing::trace;

use super::event::{ActionTarget, PlayEvent, Trigger, TriggerAction};
use crate::core::{GameState, PlayerId, Side, SimConfig, SimResult};
use crate::effects::{ConditionContext, ConditionEvaluator, EffectRegistry, PerkEffect};
use crate::gamelog::LogEvent;

/// A trigger that matched an event, ready to resolve.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggeredAction {
    /// Definition id of the source, for the log.
    pub source: String,
    pub owner: Option<PlayerId>,
    pub target: PlayerId,
    pub action: TriggerAction,
}

/// Finds and resolves the triggers listening for a play event.
///
/// Sources are scanned in the same order the modifier resolver uses:
/// weather, ballpark, then every lineup player's perks and statuses.
/// Actions resolve in that order, so a replay fires them identically.
pub struct TriggerSystem<'a> {
    registry: &'a EffectRegistry,
    config: &'a SimConfig,
}

impl<'a> TriggerSystem<'a> {
    #[must_use]
    pub fn new(registry: &'a EffectRegistry, config: &'a SimConfig) -> Self {
        Self { registry, config }
    }

    /// Every trigger whose event kind and condition match.
    pub fn find_triggers(
        &self,
        state: &GameState,
        event: &PlayEvent,
    ) -> SimResult<Vec<TriggeredAction>> {
        let mut fired = Vec::new();

        let weather = self.registry.weather(&state.weather)?;
        self.collect(state, event, &weather.effect, weather.id.as_str(), None, &mut fired)?;

        // Ballpark triggers listen with the subject's side of the park
        let park = self.registry.ballpark(&state.ballpark)?;
        for home in [true, false] {
            let effect = park.effect_for(home);
            if let Some(trigger) = &effect.trigger {
                let on_side = match event.participant(trigger.subject) {
                    Some(subject) => {
                        (state.side_of(subject)? == Side::Home) == home
                    }
                    None => false,
                };
                if on_side {
                    self.collect(state, event, effect, park.id.as_str(), None, &mut fired)?;
                }
            }
        }

        for owner in state.lineup() {
            let player = state.player(owner)?;

            let granted = state.granted_perks.get(&owner).into_iter().flatten();
            for perk_id in player.perks.iter().chain(granted) {
                let perk = self.registry.perk(perk_id)?;
                if perk.usable_by(player) {
                    self.collect(state, event, &perk.effect, perk.id.as_str(), Some(owner), &mut fired)?;
                }
            }

            for (status_id, &stacks) in &player.statuses {
                let status = self.registry.status(status_id)?;
                if stacks != 0 {
                    self.collect(
                        state,
                        event,
                        &status.per_stack,
                        status.id.as_str(),
                        Some(owner),
                        &mut fired,
                    )?;
                }
            }
        }

        Ok(fired)
    }

    fn collect(
        &self,
        state: &GameState,
        event: &PlayEvent,
        effect: &PerkEffect,
        source: &str,
        owner: Option<PlayerId>,
        out: &mut Vec<TriggeredAction>,
    ) -> SimResult<()> {
        let Some(trigger) = &effect.trigger else {
            return Ok(());
        };
        if let Some(target) = Self::matches(state, event, trigger, owner)? {
            out.push(TriggeredAction {
                source: source.to_string(),
                owner,
                target,
                action: trigger.action.clone(),
            });
        }
        Ok(())
    }

    /// The action's target if the trigger fires for this event.
    fn matches(
        state: &GameState,
        event: &PlayEvent,
        trigger: &Trigger,
        owner: Option<PlayerId>,
    ) -> SimResult<Option<PlayerId>> {
        if trigger.on != event.kind {
            return Ok(None);
        }
        let Some(subject) = event.participant(trigger.subject) else {
            return Ok(None);
        };

        let ctx = ConditionContext::situation(state, owner, subject, None)?;
        if !ConditionEvaluator::evaluate(&trigger.condition, &ctx) {
            return Ok(None);
        }

        let target = match (trigger.target, owner) {
            (ActionTarget::Owner, Some(owner)) => owner,
            _ => subject,
        };
        Ok(Some(target))
    }

    /// Find and resolve every trigger for an event. Returns how many fired.
    pub fn fire(&self, state: &mut GameState, event: &PlayEvent) -> SimResult<usize> {
        let fired = self.find_triggers(state, event)?;
        for triggered in &fired {
            self.resolve(state, triggered)?;
        }
        Ok(fired.len())
    }

    fn resolve(&self, state: &mut GameState, triggered: &TriggeredAction) -> SimResult<()> {
        let target = triggered.target;
        match &triggered.action {
            TriggerAction::AddStatus { status, stacks } => {
                // Unknown statuses would fail every later lookup
                self.registry.status(status)?;
                state.player_mut(target)?.add_stacks(status, *stacks);
            }
            TriggerAction::Stamina(delta) => {
                let player = state.player_mut(target)?;
                player.stamina = self.config.clamp_stamina(player.stamina + delta);
            }
            TriggerAction::Experience(xp) => {
                let player = state.player_mut(target)?;
                player.xp = player.xp.saturating_add(*xp);
            }
            TriggerAction::Heat(heat) => state.streaks.record(target, *heat),
        }

        trace!(source = %triggered.source, target = %target, "trigger fired");
        state.log(LogEvent::EffectTriggered {
            source: triggered.source.clone(),
            owner: triggered.owner,
            target,
        });
        Ok(())
    }
}
