//! Event-driven side effects.
//!
//! Ratings modifiers are continuous: they apply while their condition
//! holds. Triggers are discrete: they fire once when a play event happens
//! (a hit, a strikeout, a successful steal, a defensive out) and change
//! durable state such as status stacks, stamina, experience or streak
//! heat.
//!
//! ## Key Components
//!
//! - [`TriggerEvent`]: the kinds of play event the engine fires
//! - [`PlayEvent`]: an event with its participants
//! - [`Trigger`]: what a source listens for and what it does
//! - [`TriggerSystem`]: matches triggers to events and resolves them
//!
//! Triggers live inside a [`PerkEffect`](crate::effects::PerkEffect), so any
//! weather, ballpark, perk or status can carry one.

mod event;
mod system;

pub use event::{ActionTarget, EventRole, PlayEvent, Trigger, TriggerAction, TriggerEvent};
pub use system::{TriggerSystem, TriggeredAction};
