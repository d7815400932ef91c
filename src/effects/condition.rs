//! Effect conditions.
//!
//! Every effect source carries a condition deciding, per target and
//! situation, whether it applies. Conditions are plain data so content
//! tables stay serializable and testable; [`ConditionEvaluator`] interprets
//! them against a [`ConditionContext`].
//!
//! ## Perspective
//!
//! A condition is always evaluated from the point of view of the source's
//! *owner* looking at a *target*. `IsMe` means "the target is the owner",
//! `IsMyTeam` means "the target plays for the owner's team", and
//! `IsBatter`/`IsPitcher`/`IsRunner` describe the target's current role.
//! Weather and ballpark sources have no owner; they evaluate with `is_me`
//! and `is_my_team` both true.

use serde::{Deserialize, Serialize};

use crate::core::{Count, GameState, PlayerId, SimResult, WeatherId};
use crate::play::PitchKind;

/// A situational predicate attached to an effect source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectCondition {
    // === Roles ===

    /// Target is the owner.
    IsMe,

    /// Target is the current batter.
    IsBatter,

    /// Target is the current pitcher.
    IsPitcher,

    /// Target is on base.
    IsRunner,

    /// Target plays for the owner's team.
    IsMyTeam,

    // === Situation ===

    /// The pitch about to be thrown is of this kind.
    PitchKind(PitchKind),

    /// At least this many balls.
    BallsAtLeast(u8),

    /// At least this many strikes.
    StrikesAtLeast(u8),

    /// Current weather matches.
    Weather(WeatherId),

    // === Combinators ===

    All(Vec<EffectCondition>),
    Any(Vec<EffectCondition>),
    Not(Box<EffectCondition>),

    Always,
    Never,
}

impl Default for EffectCondition {
    /// Perks without an explicit condition apply to their owner only.
    fn default() -> Self {
        Self::IsMe
    }
}

impl EffectCondition {
    /// Owner's teammates, owner included.
    #[must_use]
    pub fn teammates() -> Self {
        Self::IsMyTeam
    }

    /// The owner while batting.
    #[must_use]
    pub fn me_batting() -> Self {
        Self::all([Self::IsMe, Self::IsBatter])
    }

    /// The owner while pitching.
    #[must_use]
    pub fn me_pitching() -> Self {
        Self::all([Self::IsMe, Self::IsPitcher])
    }

    /// Opposing batter, from a pitcher-owned source.
    #[must_use]
    pub fn opposing_batter() -> Self {
        Self::all([Self::IsBatter, Self::IsMyTeam.negate()])
    }

    pub fn all(conditions: impl IntoIterator<Item = EffectCondition>) -> Self {
        Self::All(conditions.into_iter().collect())
    }

    pub fn any(conditions: impl IntoIterator<Item = EffectCondition>) -> Self {
        Self::Any(conditions.into_iter().collect())
    }

    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Add another condition with AND.
    #[must_use]
    pub fn and(self, other: EffectCondition) -> Self {
        match self {
            Self::All(mut conditions) => {
                conditions.push(other);
                Self::All(conditions)
            }
            _ => Self::All(vec![self, other]),
        }
    }

    /// Add another condition with OR.
    #[must_use]
    pub fn or(self, other: EffectCondition) -> Self {
        match self {
            Self::Any(mut conditions) => {
                conditions.push(other);
                Self::Any(conditions)
            }
            _ => Self::Any(vec![self, other]),
        }
    }
}

/// Facts a condition can test.
#[derive(Clone, Copy, Debug)]
pub struct ConditionContext<'a> {
    pub is_me: bool,
    pub is_batter: bool,
    pub is_pitcher: bool,
    pub is_runner: bool,
    pub is_my_team: bool,
    pub pitch_kind: Option<PitchKind>,
    pub count: Count,
    pub weather: &'a WeatherId,
}

impl<'a> ConditionContext<'a> {
    /// A context with no roles set.
    #[must_use]
    pub fn new(weather: &'a WeatherId) -> Self {
        Self {
            is_me: false,
            is_batter: false,
            is_pitcher: false,
            is_runner: false,
            is_my_team: false,
            pitch_kind: None,
            count: Count::default(),
            weather,
        }
    }

    /// Context for a source owned by `owner` (or by nobody, for weather
    /// and ballparks) looking at `target` in the current game situation.
    pub fn situation(
        state: &'a GameState,
        owner: Option<PlayerId>,
        target: PlayerId,
        pitch_kind: Option<PitchKind>,
    ) -> SimResult<Self> {
        let target_side = state.side_of(target)?;
        let is_my_team = match owner {
            Some(owner) => state.side_of(owner)? == target_side,
            None => true,
        };
        Ok(Self {
            is_me: owner.map_or(true, |o| o == target),
            is_batter: state.current_batter()? == target,
            is_pitcher: state.current_pitcher()? == target,
            is_runner: state.is_runner(target),
            is_my_team,
            pitch_kind,
            count: state.count,
            weather: &state.weather,
        })
    }
}

/// Evaluator for effect conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check if a condition holds.
    #[must_use]
    pub fn evaluate(condition: &EffectCondition, ctx: &ConditionContext) -> bool {
        match condition {
            EffectCondition::IsMe => ctx.is_me,
            EffectCondition::IsBatter => ctx.is_batter,
            EffectCondition::IsPitcher => ctx.is_pitcher,
            EffectCondition::IsRunner => ctx.is_runner,
            EffectCondition::IsMyTeam => ctx.is_my_team,

            // Unknown pitch kind never matches a kind-specific condition
            EffectCondition::PitchKind(kind) => ctx.pitch_kind == Some(*kind),

            EffectCondition::BallsAtLeast(n) => ctx.count.balls >= *n,
            EffectCondition::StrikesAtLeast(n) => ctx.count.strikes >= *n,
            EffectCondition::Weather(id) => ctx.weather == id,

            EffectCondition::All(conditions) => {
                conditions.iter().all(|c| Self::evaluate(c, ctx))
            }
            EffectCondition::Any(conditions) => {
                conditions.iter().any(|c| Self::evaluate(c, ctx))
            }
            EffectCondition::Not(inner) => !Self::evaluate(inner, ctx),

            EffectCondition::Always => true,
            EffectCondition::Never => false,
        }
    }
}
