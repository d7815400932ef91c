//! Structured play-by-play.
//!
//! The game log is domain output: an ordered list of [`LogEvent`]s a
//! front end can narrate or replay. It is separate from `tracing`
//! diagnostics, which are for operators.

use serde::{Deserialize, Serialize};

use crate::core::{Count, PlayerId, TeamId};
use crate::play::{HitArea, HitOutcome, HitPower, HitType, PitchKind, PitchOutcome};

/// Why a pitcher left the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapReason {
    Fatigue,
    Injury,
}

/// One narrated event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LogEvent {
    HalfInningStart {
        inning: u32,
        batting_team: TeamId,
        pitcher: PlayerId,
    },
    Pitch {
        pitcher: PlayerId,
        batter: PlayerId,
        kind: PitchKind,
        quality: f64,
        outcome: PitchOutcome,
        /// Count before the pitch.
        count: Count,
    },
    BattedBall {
        batter: PlayerId,
        area: HitArea,
        power: HitPower,
        hit_type: HitType,
        defender: PlayerId,
        outcome: HitOutcome,
    },
    Walk {
        batter: PlayerId,
        pitcher: PlayerId,
    },
    Strikeout {
        batter: PlayerId,
        pitcher: PlayerId,
    },
    Out {
        batter: PlayerId,
        defender: PlayerId,
    },
    DoublePlay {
        batter: PlayerId,
        runner: PlayerId,
        defender: PlayerId,
    },
    Hit {
        batter: PlayerId,
        bases: u8,
    },
    Run {
        runner: PlayerId,
        home_score: u32,
        away_score: u32,
    },
    Steal {
        runner: PlayerId,
        /// Base stolen: 2 or 3.
        base: u8,
        success: bool,
    },
    Injury {
        player: PlayerId,
        games: i32,
    },
    PitcherChange {
        team: TeamId,
        outgoing: PlayerId,
        incoming: PlayerId,
        reason: SwapReason,
    },
    EffectTriggered {
        source: String,
        owner: Option<PlayerId>,
        target: PlayerId,
    },
    GameEnd {
        home_score: u32,
        away_score: u32,
        half_innings: u32,
    },
}

/// Ordered game log.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameLog {
    events: Vec<LogEvent>,
}

impl GameLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: LogEvent) {
        self.events.push(event);
    }

    #[must_use]
    pub fn events(&self) -> &[LogEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEvent> {
        self.events.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop every event (used when a result is archived).
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[must_use]
    pub fn last(&self) -> Option<&LogEvent> {
        self.events.last()
    }
}
