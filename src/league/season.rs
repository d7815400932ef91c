//! The league: roster of record, schedule and accumulated results.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::player::Player;
use super::team::Team;
use crate::core::{
    BallparkId, GameId, ItemDefId, ItemId, PlayerId, SimConfig, SimError, SimResult, StatusId,
    TeamId, WeatherId,
};
use crate::game::{GameResult, RoundResult};
use crate::stats::PlayerStats;

/// An item instance owned by a team and held by a player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub definition: ItemDefId,
    pub team: TeamId,
}

/// One matchup in a round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduledGame {
    pub id: GameId,
    pub home: TeamId,
    pub away: TeamId,
    pub weather: WeatherId,
    pub ballpark: BallparkId,
}

/// An ordered list of matchups played together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueRound {
    pub round: u32,
    pub games: Vec<ScheduledGame>,
}

/// Roster of record.
///
/// The engine reads rosters from here and writes back only durable
/// per-player effects (stamina, injuries, streaks, XP) and the starting
/// rotation index. Season standings and career totals are merged by the
/// caller through [`League::apply_round_result`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct League {
    pub teams: BTreeMap<TeamId, Team>,
    pub players: BTreeMap<PlayerId, Player>,
    pub items: BTreeMap<ItemId, Item>,
    pub schedule: Vec<LeagueRound>,
    pub game_results: Vec<GameResult>,
    pub career_stats: BTreeMap<PlayerId, PlayerStats>,
}

impl League {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a team. Panics if the ID is already taken.
    pub fn add_team(&mut self, team: Team) {
        assert!(
            !self.teams.contains_key(&team.id),
            "Team with ID {:?} already registered",
            team.id
        );
        self.teams.insert(team.id, team);
    }

    /// Add a player. Panics if the ID is already taken.
    pub fn add_player(&mut self, player: Player) {
        assert!(
            !self.players.contains_key(&player.id),
            "Player with ID {:?} already registered",
            player.id
        );
        self.players.insert(player.id, player);
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.insert(item.id, item);
    }

    pub fn team(&self, id: TeamId) -> SimResult<&Team> {
        self.teams.get(&id).ok_or(SimError::UnknownTeam(id))
    }

    pub fn team_mut(&mut self, id: TeamId) -> SimResult<&mut Team> {
        self.teams.get_mut(&id).ok_or(SimError::UnknownTeam(id))
    }

    pub fn player(&self, id: PlayerId) -> SimResult<&Player> {
        self.players.get(&id).ok_or(SimError::UnknownPlayer(id))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> SimResult<&mut Player> {
        self.players.get_mut(&id).ok_or(SimError::UnknownPlayer(id))
    }

    pub fn item(&self, id: ItemId) -> SimResult<&Item> {
        self.items.get(&id).ok_or(SimError::UnknownItem(id))
    }

    /// Write a game's working copies of players back to the roster.
    pub fn commit_players(&mut self, players: impl IntoIterator<Item = Player>) -> SimResult<()> {
        for player in players {
            let slot = self.player_mut(player.id)?;
            *slot = player;
        }
        Ok(())
    }

    /// Players on the given teams who are currently injured.
    ///
    /// Taken before a round is played: these are the players who sit the
    /// round out, so only they have a game to count off afterwards.
    #[must_use]
    pub fn injured_players(&self, teams: &[TeamId]) -> BTreeSet<PlayerId> {
        self.players
            .values()
            .filter(|p| p.is_injured() && p.team.is_some_and(|t| teams.contains(&t)))
            .map(|p| p.id)
            .collect()
    }

    /// Between-round upkeep.
    ///
    /// Every player recovers stamina. Players in `sidelined` count one game
    /// off their injury; an injury picked up during the round is untouched,
    /// so an N-game injury misses the next N rounds its team plays.
    pub fn rest_between_rounds(&mut self, config: &SimConfig, sidelined: &BTreeSet<PlayerId>) {
        let injured = StatusId::injured();

        for player in self.players.values_mut() {
            player.stamina = config.clamp_stamina(player.stamina + config.rest_recovery);

            if sidelined.contains(&player.id) && player.stacks(&injured) > 0 {
                player.add_stacks(&injured, -1);
            }
        }
    }

    /// Merge a round into season standings, career totals and history.
    ///
    /// Only the most recently applied round keeps its full game logs;
    /// older stored results have theirs dropped.
    pub fn apply_round_result(&mut self, result: &RoundResult) -> SimResult<()> {
        for stored in &mut self.game_results {
            stored.game_log.clear();
        }

        for game in &result.games {
            if let Some(winner) = game.winner {
                self.team_mut(winner)?.wins += 1;
            }
            if let Some(loser) = game.loser {
                self.team_mut(loser)?.losses += 1;
            }
            for (&player, stats) in &game.player_stats {
                self.career_stats.entry(player).or_default().merge(stats);
            }
            self.game_results.push(game.clone());
        }

        debug!(round = result.round, games = result.games.len(), "applied round result");
        Ok(())
    }
}
