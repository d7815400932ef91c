//! Game and round results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{BallparkId, GameId, GameState, PlayerId, TeamId, WeatherId};
use crate::gamelog::GameLog;
use crate::stats::PlayerStats;

/// Runs scored in one half-inning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningData {
    /// Half-inning number, 1-based.
    pub inning: u32,
    pub batting_team: TeamId,
    pub pitching_team: TeamId,
    pub runs: u32,
}

impl InningData {
    /// Scoreless entry for the half-inning the state is in.
    #[must_use]
    pub fn new(state: &GameState) -> Self {
        Self {
            inning: state.inning,
            batting_team: state.batting().team,
            pitching_team: state.pitching().team,
            runs: 0,
        }
    }
}

/// How a team finished the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamGameData {
    /// Batting order at the final out, relievers included.
    pub batting_order: Vec<PlayerId>,

    /// Every pitcher used, in order of appearance.
    pub pitchers_used: Vec<PlayerId>,
}

/// Immutable snapshot of a finished game.
///
/// Everything is keyed by ordered maps, so two games played from the same
/// seed serialize to identical bytes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub game_id: GameId,
    pub home: TeamId,
    pub away: TeamId,
    pub weather: WeatherId,
    pub ballpark: BallparkId,

    /// `None` when the safety valve ended the game tied.
    pub winner: Option<TeamId>,
    pub loser: Option<TeamId>,

    pub score: BTreeMap<TeamId, u32>,
    pub inning_data: Vec<InningData>,
    pub player_stats: BTreeMap<PlayerId, PlayerStats>,
    pub team_data: BTreeMap<TeamId, TeamGameData>,

    pub winning_pitcher: Option<PlayerId>,
    pub losing_pitcher: Option<PlayerId>,
    pub save_pitcher: Option<PlayerId>,

    /// Half-innings started.
    pub half_innings: u32,

    pub game_log: GameLog,
}

impl GameResult {
    /// Final score of one team (0 for a team not in this game).
    #[must_use]
    pub fn score_of(&self, team: TeamId) -> u32 {
        self.score.get(&team).copied().unwrap_or(0)
    }

    /// Runs a team scored according to the inning-by-inning line.
    #[must_use]
    pub fn line_score_total(&self, team: TeamId) -> u32 {
        self.inning_data
            .iter()
            .filter(|i| i.batting_team == team)
            .map(|i| i.runs)
            .sum()
    }

    #[must_use]
    pub fn is_tie(&self) -> bool {
        self.winner.is_none()
    }
}

/// Results of every game in a round, in schedule order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub games: Vec<GameResult>,
}

impl RoundResult {
    /// Result for one scheduled game.
    #[must_use]
    pub fn game(&self, id: GameId) -> Option<&GameResult> {
        self.games.iter().find(|g| g.game_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> GameResult {
        let (home, away) = (TeamId::new(1), TeamId::new(2));
        GameResult {
            game_id: GameId::new(3),
            home,
            away,
            weather: WeatherId::new("clear"),
            ballpark: BallparkId::new("oak_park"),
            winner: Some(home),
            loser: Some(away),
            score: BTreeMap::from([(home, 3), (away, 1)]),
            inning_data: vec![
                InningData {
                    inning: 1,
                    batting_team: away,
                    pitching_team: home,
                    runs: 1,
                },
                InningData {
                    inning: 2,
                    batting_team: home,
                    pitching_team: away,
                    runs: 3,
                },
            ],
            player_stats: BTreeMap::new(),
            team_data: BTreeMap::new(),
            winning_pitcher: None,
            losing_pitcher: None,
            save_pitcher: None,
            half_innings: 2,
            game_log: GameLog::new(),
        }
    }

    #[test]
    fn test_line_score_matches_score() {
        let result = result();
        for team in [result.home, result.away] {
            assert_eq!(result.line_score_total(team), result.score_of(team));
        }
        assert_eq!(result.score_of(TeamId::new(9)), 0);
        assert!(!result.is_tie());
    }

    #[test]
    fn test_result_serialization() {
        let round = RoundResult {
            round: 4,
            games: vec![result()],
        };
        let json = serde_json::to_string(&round).unwrap();
        let back: RoundResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, round);
        assert!(back.game(GameId::new(3)).is_some());
        assert!(back.game(GameId::new(4)).is_none());
    }
}
