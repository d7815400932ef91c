//! Hot and cold streaks.
//!
//! During a game every notable play adds or removes *heat* for the player
//! involved. At game end, heat past the configured threshold moves the
//! player's durable `streak` status one stack toward hot or cold, bounded
//! by `max_streak_stacks` either way.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, SimConfig, StatusId};
use crate::league::Player;

/// Heat values for the plays the engine records.
pub mod heat {
    pub const SINGLE: f64 = 1.0;
    pub const DOUBLE: f64 = 1.5;
    pub const TRIPLE: f64 = 2.0;
    pub const HOME_RUN: f64 = 2.5;
    pub const WALK: f64 = 0.5;
    pub const RUN: f64 = 0.5;
    pub const STOLEN_BASE: f64 = 0.5;
    pub const CAUGHT_STEALING: f64 = -1.0;
    pub const STRUCK_OUT: f64 = -1.0;
    pub const OUT: f64 = -0.5;
    pub const DOUBLE_PLAY: f64 = -1.0;

    pub const STRIKEOUT_PITCHED: f64 = 1.0;
    pub const HIT_ALLOWED: f64 = -0.5;
    pub const HOME_RUN_ALLOWED: f64 = -1.5;
    pub const WALK_ALLOWED: f64 = -0.5;
    pub const EARNED_RUN: f64 = -1.0;

    /// Heat for a hit of the given number of bases.
    #[must_use]
    pub fn for_hit(bases: usize) -> f64 {
        match bases {
            1 => SINGLE,
            2 => DOUBLE,
            3 => TRIPLE,
            _ => HOME_RUN,
        }
    }
}

/// In-game heat per player.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StreakTracker {
    heat: BTreeMap<PlayerId, f64>,
}

impl StreakTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, player: PlayerId, delta: f64) {
        *self.heat.entry(player).or_insert(0.0) += delta;
    }

    #[must_use]
    pub fn heat(&self, player: PlayerId) -> f64 {
        self.heat.get(&player).copied().unwrap_or(0.0)
    }

    /// Stack change earned by a heat total: +1, -1 or 0.
    #[must_use]
    pub fn stack_change(heat: f64, config: &SimConfig) -> i32 {
        if heat >= config.streak_heat_threshold {
            1
        } else if heat <= -config.streak_heat_threshold {
            -1
        } else {
            0
        }
    }

    /// Move `streak` stacks on the given players; returns the changes made.
    pub fn apply(
        &self,
        players: &mut BTreeMap<PlayerId, Player>,
        config: &SimConfig,
    ) -> Vec<(PlayerId, i32)> {
        let streak = StatusId::streak();
        let mut changes = Vec::new();

        for (&id, &heat) in &self.heat {
            let change = Self::stack_change(heat, config);
            let Some(player) = players.get_mut(&id) else {
                continue;
            };
            if change == 0 {
                continue;
            }
            let current = player.stacks(&streak);
            let next = (current + change).clamp(-config.max_streak_stacks, config.max_streak_stacks);
            if next != current {
                player.set_stacks(&streak, next);
                changes.push((id, next - current));
            }
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::Attributes;

    fn roster(stacks: i32) -> BTreeMap<PlayerId, Player> {
        let mut players = BTreeMap::new();
        for id in 1..=3 {
            let player = Player::new(PlayerId::new(id), "S", Attributes::uniform(10.0))
                .with_status("streak", stacks);
            players.insert(PlayerId::new(id), player);
        }
        players
    }

    #[test]
    fn test_heat_accumulates() {
        let mut tracker = StreakTracker::new();
        tracker.record(PlayerId::new(1), heat::HOME_RUN);
        tracker.record(PlayerId::new(1), heat::STRUCK_OUT);
        assert!((tracker.heat(PlayerId::new(1)) - 1.5).abs() < 1e-12);
        assert_eq!(tracker.heat(PlayerId::new(9)), 0.0);
    }

    #[test]
    fn test_hot_and_cold() {
        let config = SimConfig::default();
        let mut tracker = StreakTracker::new();
        tracker.record(PlayerId::new(1), 3.0);
        tracker.record(PlayerId::new(2), -4.0);
        tracker.record(PlayerId::new(3), 1.0);

        let mut players = roster(0);
        let changes = tracker.apply(&mut players, &config);

        assert_eq!(changes, vec![(PlayerId::new(1), 1), (PlayerId::new(2), -1)]);
        assert_eq!(players[&PlayerId::new(1)].stacks(&StatusId::streak()), 1);
        assert_eq!(players[&PlayerId::new(2)].stacks(&StatusId::streak()), -1);
        assert_eq!(players[&PlayerId::new(3)].stacks(&StatusId::streak()), 0);
    }

    #[test]
    fn test_streak_is_bounded() {
        let config = SimConfig::default();
        let mut tracker = StreakTracker::new();
        tracker.record(PlayerId::new(1), 10.0);

        let mut players = roster(config.max_streak_stacks);
        let changes = tracker.apply(&mut players, &config);

        assert!(changes.is_empty());
        assert_eq!(
            players[&PlayerId::new(1)].stacks(&StatusId::streak()),
            config.max_streak_stacks
        );
    }

    #[test]
    fn test_cold_player_warms_up() {
        let config = SimConfig::default();
        let mut tracker = StreakTracker::new();
        tracker.record(PlayerId::new(2), 5.0);

        let mut players = roster(-1);
        tracker.apply(&mut players, &config);
        // Back to neutral removes the status entry entirely
        assert!(players[&PlayerId::new(2)].statuses.is_empty());
    }
}
