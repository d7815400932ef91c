//! Playing a whole round.

use tracing::info;

use super::machine::MatchEngine;
use super::result::RoundResult;
use crate::core::{GameRng, SimResult, TeamId};
use crate::league::{League, LeagueRound};

/// Teams with a game in the round, in first-appearance order.
fn teams_played(round: &LeagueRound) -> Vec<TeamId> {
    let mut teams = Vec::new();
    for game in &round.games {
        for team in [game.home, game.away] {
            if !teams.contains(&team) {
                teams.push(team);
            }
        }
    }
    teams
}

impl MatchEngine {
    /// Play every game of a round in schedule order, then run the
    /// between-round upkeep.
    ///
    /// Standings are not touched; merge the returned result with
    /// [`League::apply_round_result`].
    pub fn simulate_round(
        &self,
        rng: &GameRng,
        league: &mut League,
        round: &LeagueRound,
    ) -> SimResult<RoundResult> {
        info!(round = round.round, games = round.games.len(), "simulating round");

        let sidelined = league.injured_players(&teams_played(round));
        let mut games = Vec::with_capacity(round.games.len());
        for game in &round.games {
            games.push(self.simulate_game(rng, league, game)?);
        }

        league.rest_between_rounds(self.config(), &sidelined);
        Ok(RoundResult {
            round: round.round,
            games,
        })
    }

    /// Play a round's games on the rayon pool.
    ///
    /// Every game reads the league as it stood before the round and the
    /// results are committed in schedule order. When no team plays twice
    /// in the round this matches [`MatchEngine::simulate_round`] exactly.
    #[cfg(feature = "parallel")]
    pub fn simulate_round_parallel(
        &self,
        rng: &GameRng,
        league: &mut League,
        round: &LeagueRound,
    ) -> SimResult<RoundResult> {
        use rayon::prelude::*;

        info!(
            round = round.round,
            games = round.games.len(),
            "simulating round in parallel"
        );

        let sidelined = league.injured_players(&teams_played(round));
        let snapshot: &League = league;
        let outcomes: Vec<_> = round
            .games
            .par_iter()
            .map(|game| self.play_game(rng, snapshot, game))
            .collect();

        let mut games = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            games.push(self.commit(league, outcome?)?);
        }

        league.rest_between_rounds(self.config(), &sidelined);
        Ok(RoundResult {
            round: round.round,
            games,
        })
    }
}

/// Play a round with the default engine: standard rules and content.
pub fn simulate_round(
    rng: &GameRng,
    league: &mut League,
    round: &LeagueRound,
) -> SimResult<RoundResult> {
    MatchEngine::default().simulate_round(rng, league, round)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameId, StatusId};
    use crate::league::fixtures;

    #[test]
    fn test_teams_played() {
        let round = fixtures::demo_round();
        assert_eq!(teams_played(&round), vec![TeamId::new(1), TeamId::new(2)]);
        assert!(teams_played(&LeagueRound::default()).is_empty());
    }

    #[test]
    fn test_round_rotates_starters_and_rests() {
        let engine = MatchEngine::default();
        let mut league = fixtures::demo_league();
        let round = fixtures::demo_round();

        let result = engine.simulate_round(&GameRng::new(3), &mut league, &round).unwrap();

        assert_eq!(result.games.len(), round.games.len());
        assert_eq!(result.games[0].game_id, GameId::new(1));
        for team in [TeamId::new(1), TeamId::new(2)] {
            assert_eq!(league.team(team).unwrap().next_starter, round.games.len() % 3);
        }
        // Standings are left to the caller
        assert_eq!(league.team(TeamId::new(1)).unwrap().wins, 0);
        for player in league.players.values() {
            assert!(player.stamina <= engine.config().stamina_ceiling);
            assert!(player.stacks(&StatusId::injured()) >= 0);
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential_for_single_game() {
        let engine = MatchEngine::default();
        let round = LeagueRound {
            round: 1,
            games: vec![fixtures::demo_game(1)],
        };

        let mut sequential = fixtures::demo_league();
        let a = engine.simulate_round(&GameRng::new(5), &mut sequential, &round).unwrap();
        let mut parallel = fixtures::demo_league();
        let b = engine
            .simulate_round_parallel(&GameRng::new(5), &mut parallel, &round)
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(sequential.players, parallel.players);
    }
}
