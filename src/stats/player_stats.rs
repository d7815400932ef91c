//! Per-player game statistics.

use serde::{Deserialize, Serialize};

macro_rules! player_stats {
    ($($(#[$meta:meta])* $field:ident),* $(,)?) => {
        /// Counting stats for one player, batting, pitching and fielding.
        ///
        /// One line per player per game; career totals are the sum of game
        /// lines via [`PlayerStats::merge`].
        #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct PlayerStats {
            $($(#[$meta])* pub $field: u32,)*
        }

        impl PlayerStats {
            /// Add another line into this one.
            pub fn merge(&mut self, other: &PlayerStats) {
                $(self.$field += other.$field;)*
            }
        }
    };
}

player_stats! {
    games_played,

    // Batting
    plate_appearances,
    at_bats,
    hits,
    doubles,
    triples,
    home_runs,
    runs,
    runs_batted_in,
    walks,
    strikeouts,
    stolen_bases,
    caught_stealing,
    /// Double plays hit into (batters) or induced (pitchers).
    double_plays,

    // Pitching
    pitches_thrown,
    outs_recorded,
    hits_allowed,
    walks_allowed,
    strikeouts_pitched,
    home_runs_allowed,
    earned_runs,
    wins,
    losses,
    saves,

    // Fielding
    defensive_outs,
}

impl PlayerStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hits per at-bat, 0 with no at-bats.
    #[must_use]
    pub fn batting_average(&self) -> f64 {
        if self.at_bats == 0 {
            0.0
        } else {
            f64::from(self.hits) / f64::from(self.at_bats)
        }
    }

    /// Innings pitched as a fraction (outs / 3).
    #[must_use]
    pub fn innings_pitched(&self) -> f64 {
        f64::from(self.outs_recorded) / 3.0
    }

    /// Earned runs per nine innings, `None` before the first out.
    #[must_use]
    pub fn earned_run_average(&self) -> Option<f64> {
        (self.outs_recorded > 0).then(|| f64::from(self.earned_runs) * 27.0 / f64::from(self.outs_recorded))
    }

    /// Total bases from hits.
    #[must_use]
    pub fn total_bases(&self) -> u32 {
        let singles = self.hits.saturating_sub(self.doubles + self.triples + self.home_runs);
        singles + 2 * self.doubles + 3 * self.triples + 4 * self.home_runs
    }

    /// Experience earned for this line.
    #[must_use]
    pub fn experience(&self) -> u32 {
        self.plate_appearances
            + 2 * self.hits
            + 4 * self.home_runs
            + self.strikeouts_pitched
            + self.outs_recorded / 3
            + 5 * self.wins
            + 3 * self.saves
    }
}
