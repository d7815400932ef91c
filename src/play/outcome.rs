//! Pitch outcomes.

use serde::{Deserialize, Serialize};

use super::hit::{BattedBall, HitOutcome};

/// What a single pitch produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchOutcome {
    Ball,
    CalledStrike,
    SwingingStrike,
    Foul,
    Out,
    Single,
    Double,
    Triple,
    HomeRun,
}

impl PitchOutcome {
    /// Outcome of a ball put in play.
    #[must_use]
    pub const fn from_hit(outcome: HitOutcome) -> Self {
        match outcome {
            HitOutcome::Single => PitchOutcome::Single,
            HitOutcome::Double => PitchOutcome::Double,
            HitOutcome::Triple => PitchOutcome::Triple,
            HitOutcome::HomeRun => PitchOutcome::HomeRun,
            HitOutcome::Out => PitchOutcome::Out,
            HitOutcome::Foul => PitchOutcome::Foul,
        }
    }

    #[must_use]
    pub const fn is_hit(self) -> bool {
        matches!(
            self,
            PitchOutcome::Single | PitchOutcome::Double | PitchOutcome::Triple | PitchOutcome::HomeRun
        )
    }

    /// Bases the batter takes on a hit.
    #[must_use]
    pub const fn bases(self) -> usize {
        match self {
            PitchOutcome::Single => 1,
            PitchOutcome::Double => 2,
            PitchOutcome::Triple => 3,
            PitchOutcome::HomeRun => 4,
            _ => 0,
        }
    }
}

/// A pitch outcome together with the batted ball, when there was one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayResult {
    pub outcome: PitchOutcome,
    pub batted_ball: Option<BattedBall>,
}

impl PlayResult {
    /// A pitch with no ball in play.
    #[must_use]
    pub fn pitch(outcome: PitchOutcome) -> Self {
        Self {
            outcome,
            batted_ball: None,
        }
    }

    /// A ball in play.
    #[must_use]
    pub fn batted(ball: BattedBall) -> Self {
        Self {
            outcome: PitchOutcome::from_hit(ball.outcome),
            batted_ball: Some(ball),
        }
    }
}
