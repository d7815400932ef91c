//! Stochastic play resolution.
//!
//! One pitch flows through the resolvers in a fixed order:
//!
//! ```text
//! PitchGenerator → SwingResolver → HitResolver (on contact)
//!                                  BaseRunning (advances, steals)
//!                                  StaminaModel → PitcherRotation
//! ```
//!
//! Every resolver takes the game state by `&mut` and draws from its
//! generator, so the draw order here is the replay order.

mod baserunning;
mod hit;
mod outcome;
mod pitch;
mod rotation;
mod stamina;
mod swing;

pub use baserunning::BaseRunning;
pub use hit::{BattedBall, HitArea, HitOutcome, HitPower, HitResolver, HitType};
pub use outcome::{PitchOutcome, PlayResult};
pub use pitch::{ActualPitch, PitchGenerator, PitchKind};
pub use rotation::PitcherRotation;
pub use stamina::{FatigueReport, StaminaModel};
pub use swing::{SwingDecision, SwingResolver};
