//! Teams: roster membership and line-up artifacts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::player::Position;
use crate::core::{BallparkId, PlayerId, SimError, SimResult, TeamId};

/// A team in the league.
///
/// `players` is the full roster. The batting order, position chart and
/// pitching order are the line-up artifacts a game starts from; the engine
/// copies them into its game state and never edits the team's versions
/// except to rotate `next_starter` after each game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,

    /// Full roster, starters and bench.
    pub players: Vec<PlayerId>,

    /// Batting order. The pitcher bats in the slot of whoever plays
    /// `Position::Pitcher` in the position chart.
    pub batting_order: Vec<PlayerId>,

    /// Who fields each position.
    pub position_chart: BTreeMap<Position, PlayerId>,

    /// Starting rotation.
    pub pitching_order: Vec<PlayerId>,

    /// Index into `pitching_order` of the next game's starter.
    pub next_starter: usize,

    pub wins: u32,
    pub losses: u32,

    /// Home ballpark.
    pub ballpark: BallparkId,
}

impl Team {
    /// Create an empty team.
    pub fn new(id: TeamId, name: impl Into<String>, ballpark: impl Into<BallparkId>) -> Self {
        Self {
            id,
            name: name.into(),
            players: Vec::new(),
            batting_order: Vec::new(),
            position_chart: BTreeMap::new(),
            pitching_order: Vec::new(),
            next_starter: 0,
            wins: 0,
            losses: 0,
            ballpark: ballpark.into(),
        }
    }

    /// Player fielding a position.
    pub fn at_position(&self, position: Position) -> SimResult<PlayerId> {
        self.position_chart
            .get(&position)
            .copied()
            .ok_or(SimError::EmptyPositionSlot {
                team: self.id,
                position,
            })
    }

    /// Position a player is fielding, if any.
    #[must_use]
    pub fn position_of(&self, player: PlayerId) -> Option<Position> {
        self.position_chart
            .iter()
            .find(|(_, &p)| p == player)
            .map(|(&pos, _)| pos)
    }

    /// Scheduled starter for the next game.
    #[must_use]
    pub fn scheduled_starter(&self) -> Option<PlayerId> {
        if self.pitching_order.is_empty() {
            None
        } else {
            Some(self.pitching_order[self.next_starter % self.pitching_order.len()])
        }
    }

    /// Move the rotation to the next starter.
    pub fn advance_rotation(&mut self) {
        if !self.pitching_order.is_empty() {
            self.next_starter = (self.next_starter + 1) % self.pitching_order.len();
        }
    }

    /// Is the player on this roster?
    #[must_use]
    pub fn has_player(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> Team {
        let mut team = Team::new(TeamId::new(1), "Owls", "oak_park");
        team.players = vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(3)];
        team.position_chart.insert(Position::Pitcher, PlayerId::new(1));
        team.position_chart.insert(Position::Catcher, PlayerId::new(2));
        team.pitching_order = vec![PlayerId::new(1), PlayerId::new(3)];
        team
    }

    #[test]
    fn test_position_lookup() {
        let team = team();
        assert_eq!(team.at_position(Position::Catcher), Ok(PlayerId::new(2)));
        assert_eq!(
            team.at_position(Position::Shortstop),
            Err(SimError::EmptyPositionSlot {
                team: TeamId::new(1),
                position: Position::Shortstop,
            })
        );
        assert_eq!(team.position_of(PlayerId::new(1)), Some(Position::Pitcher));
        assert_eq!(team.position_of(PlayerId::new(3)), None);
    }

    #[test]
    fn test_rotation() {
        let mut team = team();
        assert_eq!(team.scheduled_starter(), Some(PlayerId::new(1)));
        team.advance_rotation();
        assert_eq!(team.scheduled_starter(), Some(PlayerId::new(3)));
        team.advance_rotation();
        assert_eq!(team.scheduled_starter(), Some(PlayerId::new(1)));

        let empty = Team::new(TeamId::new(2), "Empty", "lot");
        assert_eq!(empty.scheduled_starter(), None);
    }
}
