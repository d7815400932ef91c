//! Game state.
//!
//! `GameState` is the entire mutable state of one game. It is created by
//! pre-game setup, passed by `&mut` through every resolver, and consumed
//! into a [`GameResult`](crate::game::GameResult) at the end. It is never
//! shared between games.
//!
//! ## Half-innings
//!
//! `inning` counts half-innings from 1. Odd half-innings are the top
//! (away team bats), even ones the bottom (home team bats).
//!
//! ## Invariants
//!
//! Checked by [`GameState::check_invariants`] after every pitch:
//!
//! - `outs < 3` while a half-inning is in progress
//! - no player on two bases
//! - the current batter is never on base
//! - each batter index is inside its batting order

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::{SimError, SimResult};
use super::ids::{BallparkId, GameId, PerkId, PlayerId, TeamId, WeatherId};
use super::rng::GameRng;
use crate::game::InningData;
use crate::gamelog::{GameLog, LogEvent};
use crate::league::{Player, Position};
use crate::stats::{PlayerStats, StreakTracker};

/// Balls and strikes on the current batter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Count {
    pub balls: u8,
    pub strikes: u8,
}

impl Count {
    #[must_use]
    pub const fn new(balls: u8, strikes: u8) -> Self {
        Self { balls, strikes }
    }

    /// 0-0 count.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.balls == 0 && self.strikes == 0
    }

    /// How close the count is to deciding the at-bat, in `[0, 1]`.
    #[must_use]
    pub fn fullness(&self) -> f64 {
        (f64::from(self.balls) / 3.0 + f64::from(self.strikes) / 2.0) / 2.0
    }
}

/// Home or away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// One team's in-game line-up and score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamGameState {
    pub team: TeamId,

    /// Full roster; bench players are relief candidates.
    pub roster: Vec<PlayerId>,

    pub batting_order: Vec<PlayerId>,
    pub position_chart: BTreeMap<Position, PlayerId>,

    /// Pitchers used this game; the last one is on the mound.
    pub pitchers: Vec<PlayerId>,

    pub score: u32,
    pub batter_index: usize,

    /// Pitcher who would be credited with a save if the lead holds.
    pub save_candidate: Option<PlayerId>,
}

impl TeamGameState {
    pub fn new(team: TeamId) -> Self {
        Self {
            team,
            roster: Vec::new(),
            batting_order: Vec::new(),
            position_chart: BTreeMap::new(),
            pitchers: Vec::new(),
            score: 0,
            batter_index: 0,
            save_candidate: None,
        }
    }

    /// Pitcher on the mound.
    pub fn current_pitcher(&self) -> SimResult<PlayerId> {
        self.pitchers
            .last()
            .copied()
            .ok_or(SimError::NoStartingPitcher(self.team))
    }

    /// Batter due up.
    pub fn current_batter(&self) -> SimResult<PlayerId> {
        self.batting_order
            .get(self.batter_index)
            .copied()
            .ok_or(SimError::EmptyLineup(self.team))
    }

    /// Move to the next batter, wrapping around the order.
    pub fn advance_batter(&mut self) {
        if !self.batting_order.is_empty() {
            self.batter_index = (self.batter_index + 1) % self.batting_order.len();
        }
    }

    /// Player fielding a position.
    pub fn fielder(&self, position: Position) -> SimResult<PlayerId> {
        self.position_chart
            .get(&position)
            .copied()
            .ok_or(SimError::EmptyPositionSlot {
                team: self.team,
                position,
            })
    }

    #[must_use]
    pub fn has_pitched(&self, player: PlayerId) -> bool {
        self.pitchers.contains(&player)
    }

    /// Neither batting nor fielding.
    #[must_use]
    pub fn is_on_bench(&self, player: PlayerId) -> bool {
        !self.batting_order.contains(&player) && !self.position_chart.values().any(|&p| p == player)
    }
}

/// Pitchers in line for the win and the loss.
///
/// Updated whenever the lead changes hands.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchersOfRecord {
    pub winning: Option<PlayerId>,
    pub losing: Option<PlayerId>,
    pub leader: Option<Side>,
}

/// The mutable state of one game.
#[derive(Clone, Debug)]
pub struct GameState {
    pub game_id: GameId,

    /// Half-inning counter, 1-based.
    pub inning: u32,

    pub home: TeamGameState,
    pub away: TeamGameState,

    pub count: Count,
    pub outs: u8,

    /// First, second and third base.
    pub bases: [Option<PlayerId>; 3],

    /// Working copies of every player on both rosters.
    pub players: BTreeMap<PlayerId, Player>,

    /// Perks granted by held items, resolved at setup.
    pub granted_perks: BTreeMap<PlayerId, Vec<PerkId>>,

    pub stats: BTreeMap<PlayerId, PlayerStats>,
    pub inning_data: Vec<InningData>,
    pub log: GameLog,

    pub weather: WeatherId,
    pub ballpark: BallparkId,

    pub record: PitchersOfRecord,
    pub streaks: StreakTracker,

    pub rng: GameRng,
}

impl GameState {
    /// Create a game state at the top of the first.
    pub fn new(
        game_id: GameId,
        home: TeamGameState,
        away: TeamGameState,
        weather: WeatherId,
        ballpark: BallparkId,
        rng: GameRng,
    ) -> Self {
        Self {
            game_id,
            inning: 1,
            home,
            away,
            count: Count::default(),
            outs: 0,
            bases: [None; 3],
            players: BTreeMap::new(),
            granted_perks: BTreeMap::new(),
            stats: BTreeMap::new(),
            inning_data: Vec::new(),
            log: GameLog::new(),
            weather,
            ballpark,
            record: PitchersOfRecord::default(),
            streaks: StreakTracker::new(),
            rng,
        }
    }

    /// Is this the top half of an inning?
    #[must_use]
    pub fn is_top(&self) -> bool {
        self.inning % 2 == 1
    }

    /// Full-inning number (1 for the first two half-innings).
    #[must_use]
    pub fn game_inning(&self) -> u32 {
        self.inning.div_ceil(2)
    }

    #[must_use]
    pub fn batting_side(&self) -> Side {
        if self.is_top() {
            Side::Away
        } else {
            Side::Home
        }
    }

    #[must_use]
    pub fn pitching_side(&self) -> Side {
        self.batting_side().opposite()
    }

    #[must_use]
    pub fn team(&self, side: Side) -> &TeamGameState {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn team_mut(&mut self, side: Side) -> &mut TeamGameState {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    #[must_use]
    pub fn batting(&self) -> &TeamGameState {
        self.team(self.batting_side())
    }

    #[must_use]
    pub fn pitching(&self) -> &TeamGameState {
        self.team(self.pitching_side())
    }

    pub fn current_batter(&self) -> SimResult<PlayerId> {
        self.batting().current_batter()
    }

    pub fn current_pitcher(&self) -> SimResult<PlayerId> {
        self.pitching().current_pitcher()
    }

    pub fn player(&self, id: PlayerId) -> SimResult<&Player> {
        self.players.get(&id).ok_or(SimError::UnknownPlayer(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> SimResult<&mut Player> {
        self.players.get_mut(&id).ok_or(SimError::UnknownPlayer(id))
    }

    /// Which side a player is on.
    pub fn side_of(&self, id: PlayerId) -> SimResult<Side> {
        match self.player(id)?.team {
            Some(team) if team == self.home.team => Ok(Side::Home),
            Some(team) if team == self.away.team => Ok(Side::Away),
            _ => Err(SimError::InvariantViolation(
                "player is not on either team in this game",
            )),
        }
    }

    /// Stats line for a player, created on first use.
    pub fn stats_mut(&mut self, id: PlayerId) -> &mut PlayerStats {
        self.stats.entry(id).or_default()
    }

    #[must_use]
    pub fn is_runner(&self, id: PlayerId) -> bool {
        self.bases.contains(&Some(id))
    }

    #[must_use]
    pub fn runner_count(&self) -> usize {
        self.bases.iter().flatten().count()
    }

    /// Runners on second or third.
    #[must_use]
    pub fn runners_in_scoring_position(&self) -> usize {
        self.bases[1..].iter().flatten().count()
    }

    /// Players in either batting order, home first.
    pub fn lineup(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.home
            .batting_order
            .iter()
            .chain(self.away.batting_order.iter())
            .copied()
    }

    /// Run differential from one side's point of view.
    #[must_use]
    pub fn lead(&self, side: Side) -> i64 {
        let own = i64::from(self.team(side).score);
        let other = i64::from(self.team(side.opposite()).score);
        own - other
    }

    /// Side currently ahead, if any.
    #[must_use]
    pub fn leader(&self) -> Option<Side> {
        match self.lead(Side::Home) {
            d if d > 0 => Some(Side::Home),
            d if d < 0 => Some(Side::Away),
            _ => None,
        }
    }

    pub fn log(&mut self, event: LogEvent) {
        self.log.push(event);
    }

    /// Credit one run to the batting side.
    pub fn add_run(&mut self) {
        let side = self.batting_side();
        self.team_mut(side).score += 1;
        if let Some(current) = self.inning_data.last_mut() {
            current.runs += 1;
        }
    }

    /// Clear count, outs and bases for a new half-inning.
    pub fn reset_half_inning(&mut self) {
        self.count = Count::default();
        self.outs = 0;
        self.bases = [None; 3];
    }

    /// Verify the structural invariants.
    pub fn check_invariants(&self) -> SimResult<()> {
        if self.outs > 3 {
            return Err(SimError::InvariantViolation("more than three outs"));
        }
        let occupied: Vec<PlayerId> = self.bases.iter().flatten().copied().collect();
        for (i, a) in occupied.iter().enumerate() {
            if occupied[i + 1..].contains(a) {
                return Err(SimError::InvariantViolation("runner on two bases"));
            }
        }
        for team in [&self.home, &self.away] {
            if team.batter_index >= team.batting_order.len() {
                return Err(SimError::InvariantViolation("batter index out of range"));
            }
        }
        if self.outs < 3 && self.is_runner(self.current_batter()?) {
            return Err(SimError::InvariantViolation("batter is also a runner"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::Attributes;

    fn state() -> GameState {
        let mut home = TeamGameState::new(TeamId::new(1));
        home.batting_order = vec![PlayerId::new(1), PlayerId::new(2)];
        home.pitchers = vec![PlayerId::new(1)];
        let mut away = TeamGameState::new(TeamId::new(2));
        away.batting_order = vec![PlayerId::new(11), PlayerId::new(12)];
        away.pitchers = vec![PlayerId::new(11)];

        let mut state = GameState::new(
            GameId::new(1),
            home,
            away,
            WeatherId::new("clear"),
            BallparkId::new("park"),
            GameRng::new(1),
        );
        for (id, team) in [(1, 1), (2, 1), (11, 2), (12, 2)] {
            state.players.insert(
                PlayerId::new(id),
                Player::new(PlayerId::new(id), "P", Attributes::uniform(10.0))
                    .with_team(TeamId::new(team)),
            );
        }
        state
    }

    #[test]
    fn test_bench_excludes_lineup_and_chart() {
        let mut team = TeamGameState::new(TeamId::new(1));
        team.batting_order = vec![PlayerId::new(1)];
        team.position_chart.insert(Position::Catcher, PlayerId::new(2));

        assert!(!team.is_on_bench(PlayerId::new(1)));
        assert!(!team.is_on_bench(PlayerId::new(2)));
        assert!(team.is_on_bench(PlayerId::new(3)));
    }

    #[test]
    fn test_sides_follow_half_inning() {
        let mut state = state();
        assert!(state.is_top());
        assert_eq!(state.batting_side(), Side::Away);
        assert_eq!(state.current_batter(), Ok(PlayerId::new(11)));
        assert_eq!(state.current_pitcher(), Ok(PlayerId::new(1)));
        assert_eq!(state.game_inning(), 1);

        state.inning = 2;
        assert_eq!(state.batting_side(), Side::Home);
        assert_eq!(state.current_pitcher(), Ok(PlayerId::new(11)));
        assert_eq!(state.game_inning(), 1);

        state.inning = 17;
        assert_eq!(state.game_inning(), 9);
    }

    #[test]
    fn test_side_of() {
        let state = state();
        assert_eq!(state.side_of(PlayerId::new(2)), Ok(Side::Home));
        assert_eq!(state.side_of(PlayerId::new(12)), Ok(Side::Away));
        assert_eq!(
            state.side_of(PlayerId::new(99)),
            Err(SimError::UnknownPlayer(PlayerId::new(99)))
        );
    }

    #[test]
    fn test_invariants() {
        let mut state = state();
        assert!(state.check_invariants().is_ok());

        state.bases = [Some(PlayerId::new(12)), None, Some(PlayerId::new(12))];
        assert_eq!(
            state.check_invariants(),
            Err(SimError::InvariantViolation("runner on two bases"))
        );

        state.bases = [Some(PlayerId::new(11)), None, None];
        assert_eq!(
            state.check_invariants(),
            Err(SimError::InvariantViolation("batter is also a runner"))
        );
    }

    #[test]
    fn test_lead_and_count() {
        let mut state = state();
        assert_eq!(state.leader(), None);
        state.away.score = 2;
        assert_eq!(state.leader(), Some(Side::Away));
        assert_eq!(state.lead(Side::Home), -2);

        assert!(Count::default().is_fresh());
        assert_eq!(Count::new(3, 2).fullness(), 1.0);
    }
}
