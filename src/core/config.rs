//! Simulation configuration.
//!
//! `SimConfig` collects every tuning constant the engine consumes: game
//! length, stamina and injury rates, rotation thresholds, and the foul-ball
//! and inaccuracy chances of the pitch pipeline. The defaults reproduce the
//! league's standard rules; tests and tools override individual values with
//! the `with_*` builders.

use serde::{Deserialize, Serialize};

/// Per-role stamina drain and injury constants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoleFatigue {
    /// Durability considered average for this role.
    pub baseline_durability: f64,
    /// Stamina drained by one pitch of unit severity at baseline durability.
    pub drain_per_pitch: f64,
    /// Per-pitch injury probability at baseline durability.
    pub injury_rate: f64,
}

/// Complete simulation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Half-innings in a regulation game (9 full innings = 18).
    pub regulation_half_innings: u32,

    /// Hard cutoff on the half-inning counter; the game ends silently past it.
    pub max_half_innings: u32,

    /// Lowest value a player's stamina may ever be set to.
    pub stamina_floor: f64,

    /// Upper bound on stamina.
    pub stamina_ceiling: f64,

    /// Pitchers below this stamina are swapped when a reliever is available.
    pub swap_stamina_threshold: f64,

    /// Minimum stamina for a bench pitcher to enter the game.
    pub reliever_min_stamina: f64,

    /// Chance that contact is overridden into a foul ball.
    pub foul_ball_chance: f64,

    /// Chance an inaccurate pitch still lands in the zone.
    pub inaccurate_strike_chance: f64,

    /// Starting pitcher fatigue constants.
    pub starter: RoleFatigue,

    /// Relief pitcher fatigue constants.
    pub reliever: RoleFatigue,

    /// Batter fatigue constants.
    pub batter: RoleFatigue,

    /// Inclusive range of games an injury keeps a player out.
    pub injury_games: (i32, i32),

    /// Stamina restored to every player between rounds.
    pub rest_recovery: f64,

    /// In-game streak heat needed to move the durable streak stack by one.
    pub streak_heat_threshold: f64,

    /// Largest absolute value of the durable streak stack.
    pub max_streak_stacks: i32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            regulation_half_innings: 18,
            max_half_innings: 50,
            stamina_floor: -0.25,
            stamina_ceiling: 1.0,
            swap_stamina_threshold: 0.3,
            reliever_min_stamina: 0.5,
            foul_ball_chance: 0.5,
            inaccurate_strike_chance: 0.3,
            starter: RoleFatigue {
                baseline_durability: 10.0,
                drain_per_pitch: 0.0065,
                injury_rate: 0.000_12,
            },
            reliever: RoleFatigue {
                baseline_durability: 10.0,
                drain_per_pitch: 0.011,
                injury_rate: 0.000_15,
            },
            batter: RoleFatigue {
                baseline_durability: 10.0,
                drain_per_pitch: 0.0012,
                injury_rate: 0.000_05,
            },
            injury_games: (1, 10),
            rest_recovery: 0.35,
            streak_heat_threshold: 3.0,
            max_streak_stacks: 5,
        }
    }
}

impl SimConfig {
    /// Set the safety-valve cutoff.
    #[must_use]
    pub fn with_max_half_innings(mut self, max: u32) -> Self {
        self.max_half_innings = max;
        self
    }

    /// Set the foul-ball override chance.
    #[must_use]
    pub fn with_foul_ball_chance(mut self, chance: f64) -> Self {
        self.foul_ball_chance = chance;
        self
    }

    /// Set the stamina floor.
    #[must_use]
    pub fn with_stamina_floor(mut self, floor: f64) -> Self {
        self.stamina_floor = floor;
        self
    }

    /// Set the stamina threshold for pulling a pitcher.
    #[must_use]
    pub fn with_swap_threshold(mut self, threshold: f64) -> Self {
        self.swap_stamina_threshold = threshold;
        self
    }

    /// Scale all injury rates (0.0 disables injuries).
    #[must_use]
    pub fn with_injury_scale(mut self, scale: f64) -> Self {
        self.starter.injury_rate *= scale;
        self.reliever.injury_rate *= scale;
        self.batter.injury_rate *= scale;
        self
    }

    /// Clamp a stamina value into the configured range.
    #[must_use]
    pub fn clamp_stamina(&self, stamina: f64) -> f64 {
        stamina.clamp(self.stamina_floor, self.stamina_ceiling)
    }
}
