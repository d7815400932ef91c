//! Trigger events and definitions.
//!
//! The engine fires a [`PlayEvent`] at four points: a hit, a strikeout, a
//! successful steal and a defensive out. A [`Trigger`] attached to a perk,
//! status or weather listens for one event kind, picks one participant of
//! the event as its *subject*, checks its condition against that subject,
//! and applies an action.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, StatusId};
use crate::effects::EffectCondition;

/// Kind of discrete play event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerEvent {
    Hit,
    Strikeout,
    Steal,
    DefensiveOut,
}

/// Participant of a play event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventRole {
    Batter,
    Pitcher,
    Runner,
    Defender,
}

/// A play event with its participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayEvent {
    pub kind: TriggerEvent,
    pub batter: PlayerId,
    pub pitcher: PlayerId,
    pub runner: Option<PlayerId>,
    pub defender: Option<PlayerId>,
}

impl PlayEvent {
    pub fn new(kind: TriggerEvent, batter: PlayerId, pitcher: PlayerId) -> Self {
        Self {
            kind,
            batter,
            pitcher,
            runner: None,
            defender: None,
        }
    }

    #[must_use]
    pub fn with_runner(mut self, runner: PlayerId) -> Self {
        self.runner = Some(runner);
        self
    }

    #[must_use]
    pub fn with_defender(mut self, defender: PlayerId) -> Self {
        self.defender = Some(defender);
        self
    }

    /// The participant in a role, if the event has one.
    #[must_use]
    pub fn participant(&self, role: EventRole) -> Option<PlayerId> {
        match role {
            EventRole::Batter => Some(self.batter),
            EventRole::Pitcher => Some(self.pitcher),
            EventRole::Runner => self.runner,
            EventRole::Defender => self.defender,
        }
    }
}

/// Who a triggered action lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionTarget {
    /// The source's owner. Ownerless sources fall back to the subject.
    #[default]
    Owner,
    Subject,
}

/// What a trigger does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TriggerAction {
    /// Add (or remove) stacks of a status.
    AddStatus { status: StatusId, stacks: i32 },

    /// Change stamina; clamped to the configured bounds.
    Stamina(f64),

    /// Award experience.
    Experience(u32),

    /// Add streak heat.
    Heat(f64),
}

/// A side effect attached to an effect source.
///
/// ## Example
///
/// ```
/// use rust_ballgame::effects::EffectCondition;
/// use rust_ballgame::triggers::{ActionTarget, EventRole, Trigger, TriggerAction, TriggerEvent};
///
/// // When a teammate gets a hit, they gain a little heat
/// let spark = Trigger::new(TriggerEvent::Hit, TriggerAction::Heat(0.5))
///     .with_subject(EventRole::Batter)
///     .with_condition(EffectCondition::IsMyTeam)
///     .targeting(ActionTarget::Subject);
///
/// assert_eq!(spark.on, TriggerEvent::Hit);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub on: TriggerEvent,
    pub subject: EventRole,

    /// Evaluated from the owner's view with the subject as target.
    pub condition: EffectCondition,

    pub action: TriggerAction,
    pub target: ActionTarget,
}

impl Trigger {
    /// A trigger firing when its owner is the batter of the event.
    pub fn new(on: TriggerEvent, action: TriggerAction) -> Self {
        Self {
            on,
            subject: EventRole::Batter,
            condition: EffectCondition::IsMe,
            action,
            target: ActionTarget::Owner,
        }
    }

    #[must_use]
    pub fn with_subject(mut self, subject: EventRole) -> Self {
        self.subject = subject;
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: EffectCondition) -> Self {
        self.condition = condition;
        self
    }

    #[must_use]
    pub fn targeting(mut self, target: ActionTarget) -> Self {
        self.target = target;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participants() {
        let event = PlayEvent::new(TriggerEvent::DefensiveOut, PlayerId::new(1), PlayerId::new(2))
            .with_defender(PlayerId::new(3));

        assert_eq!(event.participant(EventRole::Batter), Some(PlayerId::new(1)));
        assert_eq!(event.participant(EventRole::Pitcher), Some(PlayerId::new(2)));
        assert_eq!(event.participant(EventRole::Defender), Some(PlayerId::new(3)));
        assert_eq!(event.participant(EventRole::Runner), None);
    }

    #[test]
    fn test_trigger_defaults() {
        let trigger = Trigger::new(TriggerEvent::Strikeout, TriggerAction::Experience(1));
        assert_eq!(trigger.subject, EventRole::Batter);
        assert_eq!(trigger.condition, EffectCondition::IsMe);
        assert_eq!(trigger.target, ActionTarget::Owner);
    }

    #[test]
    fn test_trigger_serialization() {
        let trigger = Trigger::new(
            TriggerEvent::Steal,
            TriggerAction::AddStatus {
                status: StatusId::streak(),
                stacks: 1,
            },
        )
        .with_subject(EventRole::Runner);
        let json = serde_json::to_string(&trigger).unwrap();
        let back: Trigger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trigger);
    }
}
