//! Whole-game properties over random seeds.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rust_ballgame::league::fixtures;
use rust_ballgame::{GameResult, GameRng, League, LogEvent, MatchEngine, PlayerId, TeamId};

fn play(seed: u64) -> (MatchEngine, League, GameResult) {
    let engine = MatchEngine::default();
    let mut league = fixtures::demo_league();
    let result = engine
        .simulate_game(&GameRng::new(seed), &mut league, &fixtures::demo_game(1))
        .unwrap();
    (engine, league, result)
}

/// Sum a stat over one team's players.
fn team_total(
    league: &League,
    result: &GameResult,
    team: TeamId,
    stat: impl Fn(&rust_ballgame::PlayerStats) -> u32,
) -> u32 {
    result
        .player_stats
        .iter()
        .filter(|(id, _)| league.players[*id].team == Some(team))
        .map(|(_, line)| stat(line))
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Every run shows up once in the line score, once as a batter's run
    /// and once as a pitcher's earned run.
    #[test]
    fn prop_runs_are_conserved(seed in any::<u64>()) {
        let (_, league, result) = play(seed);
        for (team, opponent) in [(result.home, result.away), (result.away, result.home)] {
            let score = result.score_of(team);
            prop_assert_eq!(result.line_score_total(team), score);
            prop_assert_eq!(team_total(&league, &result, team, |s| s.runs), score);
            prop_assert_eq!(team_total(&league, &result, opponent, |s| s.earned_runs), score);
            prop_assert_eq!(
                team_total(&league, &result, team, |s| s.hits),
                team_total(&league, &result, opponent, |s| s.hits_allowed)
            );
        }
    }

    /// Games end within the half-inning limit and never before the top of
    /// the ninth is complete.
    #[test]
    fn prop_games_terminate(seed in any::<u64>()) {
        let (engine, _, result) = play(seed);
        prop_assert!(result.half_innings >= engine.config().regulation_half_innings - 1);
        prop_assert!(result.half_innings <= engine.config().max_half_innings);
        prop_assert_eq!(result.inning_data.len() as u32, result.half_innings);

        match result.winner {
            Some(winner) => {
                let loser = result.loser.unwrap();
                prop_assert!(result.score_of(winner) > result.score_of(loser));
            }
            None => prop_assert_eq!(result.score_of(result.home), result.score_of(result.away)),
        }
    }

    /// The same seed produces byte-identical results.
    #[test]
    fn prop_results_are_deterministic(seed in any::<u64>()) {
        let (_, league_a, a) = play(seed);
        let (_, league_b, b) = play(seed);
        prop_assert_eq!(bincode::serialize(&a).unwrap(), bincode::serialize(&b).unwrap());
        prop_assert_eq!(league_a.players, league_b.players);
    }

    /// The per-pitch base check never trips, and every logged run is
    /// credited to the runner who scored it.
    #[test]
    fn prop_runners_are_tracked(seed in any::<u64>()) {
        let (_, _, result) = play(seed);
        let mut runs_by: BTreeMap<PlayerId, u32> = BTreeMap::new();
        for event in result.game_log.iter() {
            if let LogEvent::Run { runner, .. } = event {
                *runs_by.entry(*runner).or_default() += 1;
            }
        }
        for (runner, runs) in runs_by {
            prop_assert_eq!(result.player_stats[&runner].runs, runs);
        }
    }

    /// Stamina never drops below the configured floor.
    #[test]
    fn prop_stamina_respects_floor(seed in any::<u64>()) {
        let (engine, league, _) = play(seed);
        let config = engine.config();
        for player in league.players.values() {
            prop_assert!(player.stamina >= config.stamina_floor);
            prop_assert!(player.stamina <= config.stamina_ceiling);
        }
    }
}
