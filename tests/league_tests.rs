//! Season flow: rounds, upkeep between rounds and standings.

use rust_ballgame::league::fixtures;
use rust_ballgame::{
    GameId, GameRng, League, MatchEngine, RoundResult, SimConfig, SimError, StatusId, TeamId,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn play_rounds(engine: &MatchEngine, league: &mut League, seed: u64, rounds: u32) -> Vec<RoundResult> {
    let rng = GameRng::new(seed);
    let mut results = Vec::new();
    for n in 1..=rounds {
        let mut round = fixtures::demo_round();
        round.round = n;
        for (i, game) in round.games.iter_mut().enumerate() {
            game.id = GameId::new(n * 10 + i as u32);
        }
        let result = engine.simulate_round(&rng, league, &round).unwrap();
        league.apply_round_result(&result).unwrap();
        results.push(result);
    }
    results
}

#[test]
fn test_standings_add_up() {
    init_tracing();
    let engine = MatchEngine::default();
    let mut league = fixtures::demo_league();
    let results = play_rounds(&engine, &mut league, 99, 3);

    let decided = results
        .iter()
        .flat_map(|r| &r.games)
        .filter(|g| g.winner.is_some())
        .count() as u32;
    let owls = league.team(TeamId::new(1)).unwrap();
    let foxes = league.team(TeamId::new(2)).unwrap();
    assert_eq!(owls.wins + foxes.wins, decided);
    assert_eq!(owls.wins, foxes.losses);
    assert_eq!(owls.losses, foxes.wins);
    assert_eq!(league.game_results.len(), 6);
}

#[test]
fn test_career_totals_merge_game_lines() {
    let engine = MatchEngine::default();
    let mut league = fixtures::demo_league();
    let results = play_rounds(&engine, &mut league, 5, 2);

    for (id, career) in &league.career_stats {
        let games: u32 = results
            .iter()
            .flat_map(|r| &r.games)
            .filter_map(|g| g.player_stats.get(id))
            .map(|line| line.games_played)
            .sum();
        assert_eq!(career.games_played, games, "{id}");
    }
}

#[test]
fn test_only_latest_round_keeps_logs() {
    let engine = MatchEngine::default();
    let mut league = fixtures::demo_league();
    play_rounds(&engine, &mut league, 8, 2);

    let (older, latest) = league.game_results.split_at(2);
    assert!(older.iter().all(|g| g.game_log.is_empty()));
    assert!(latest.iter().all(|g| !g.game_log.is_empty()));
}

#[test]
fn test_rest_heals_and_recovers() {
    let engine = MatchEngine::default();
    let mut league = fixtures::demo_league();
    let hurt = fixtures::demo_player_id(TeamId::new(2), 12);
    {
        let player = league.player_mut(hurt).unwrap();
        player.add_stacks(&StatusId::injured(), 5);
        player.stamina = 0.0;
    }

    play_rounds(&engine, &mut league, 3, 1);

    // Injured relievers are never called in, so this one only rests: one
    // game off the injury per round, not per game
    let player = league.player(hurt).unwrap();
    assert!(league
        .game_results
        .iter()
        .all(|g| !g.player_stats.contains_key(&hurt)));
    assert_eq!(player.stacks(&StatusId::injured()), 4);
    assert_eq!(player.stamina, engine.config().clamp_stamina(engine.config().rest_recovery));
}

#[test]
fn test_injury_from_last_round_sits_out_next_round() {
    let engine = MatchEngine::default();
    let mut league = fixtures::demo_league();
    let owls = TeamId::new(1);
    let teams = [owls, TeamId::new(2)];
    let rng = GameRng::new(17);

    // Round one, played step by step so the starter can be hurt in it
    let sidelined = league.injured_players(&teams);
    for game in fixtures::demo_round().games {
        engine.simulate_game(&rng, &mut league, &game).unwrap();
    }
    let starter = league.team(owls).unwrap().scheduled_starter().unwrap();
    league
        .player_mut(starter)
        .unwrap()
        .add_stacks(&StatusId::injured(), 1);
    league.rest_between_rounds(engine.config(), &sidelined);
    assert!(league.player(starter).unwrap().is_injured());

    let mut round = fixtures::demo_round();
    round.round = 2;
    for (i, game) in round.games.iter_mut().enumerate() {
        game.id = GameId::new(20 + i as u32);
    }
    let result = engine.simulate_round(&rng, &mut league, &round).unwrap();

    for game in &result.games {
        assert!(!game.team_data[&owls].pitchers_used.contains(&starter));
        assert!(!game.player_stats.contains_key(&starter));
    }
    // One round missed, one game counted off
    assert!(!league.player(starter).unwrap().is_injured());
}

#[test]
fn test_xp_is_awarded() {
    let engine = MatchEngine::default();
    let mut league = fixtures::demo_league();
    play_rounds(&engine, &mut league, 12, 1);

    let batter = fixtures::demo_player_id(TeamId::new(1), 1);
    assert!(league.player(batter).unwrap().xp > 0);
}

#[test]
fn test_unknown_team_in_schedule() {
    let engine = MatchEngine::default();
    let mut league = fixtures::demo_league();
    let mut game = fixtures::demo_game(1);
    game.away = TeamId::new(77);

    assert_eq!(
        engine
            .simulate_game(&GameRng::new(1), &mut league, &game)
            .unwrap_err(),
        SimError::UnknownTeam(TeamId::new(77))
    );
    // A failed game leaves the league untouched
    assert_eq!(league.team(TeamId::new(1)).unwrap().next_starter, 0);
}

#[test]
fn test_config_round_trips_through_json() {
    let config = SimConfig::default()
        .with_max_half_innings(30)
        .with_foul_ball_chance(0.4);
    let json = serde_json::to_string(&config).unwrap();
    let back: SimConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
