//! Pre-game setup: turning league data into a fresh game state.

use std::collections::BTreeMap;

use tracing::debug;

use crate::core::{GameRng, GameState, PerkId, PlayerId, SimError, SimResult, TeamGameState};
use crate::effects::EffectRegistry;
use crate::league::{League, Position, ScheduledGame, Team};
use crate::stats::PlayerStats;

/// Build the state for a scheduled game.
///
/// Validates both line-ups, picks each side's starting pitcher, copies the
/// rosters into working player records, resolves item-granted perks, and
/// opens a stats line for everyone in a batting order.
pub fn prepare_game(
    league: &League,
    registry: &EffectRegistry,
    game: &ScheduledGame,
    rng: GameRng,
) -> SimResult<GameState> {
    registry.weather(&game.weather)?;
    registry.ballpark(&game.ballpark)?;

    let home = team_state(league, league.team(game.home)?)?;
    let away = team_state(league, league.team(game.away)?)?;

    let mut state = GameState::new(
        game.id,
        home,
        away,
        game.weather.clone(),
        game.ballpark.clone(),
        rng,
    );

    for team in [game.home, game.away] {
        for &id in &league.team(team)?.players {
            let player = league.player(id)?;
            if player.team != Some(team) {
                return Err(SimError::InvariantViolation(
                    "roster lists a player registered to another team",
                ));
            }
            state.players.insert(id, player.clone());
        }
    }

    state.granted_perks = granted_perks(league, registry, &state)?;

    let lineup: Vec<PlayerId> = state.lineup().collect();
    for id in lineup {
        state.stats.insert(
            id,
            PlayerStats {
                games_played: 1,
                ..PlayerStats::default()
            },
        );
    }

    debug!(
        game = %game.id,
        home = %game.home,
        away = %game.away,
        weather = %game.weather,
        "game prepared"
    );
    Ok(state)
}

/// One side's in-game line-up with today's starter on the mound.
fn team_state(league: &League, team: &Team) -> SimResult<TeamGameState> {
    if team.batting_order.is_empty() {
        return Err(SimError::EmptyLineup(team.id));
    }
    for position in Position::ALL {
        team.at_position(position)?;
    }

    let starter = pick_starter(league, team)?;
    let charted = team.at_position(Position::Pitcher)?;

    let mut state = TeamGameState::new(team.id);
    state.roster = team.players.clone();
    state.position_chart = team.position_chart.clone();
    state.position_chart.insert(Position::Pitcher, starter);
    state.batting_order = team
        .batting_order
        .iter()
        .map(|&id| if id == charted { starter } else { id })
        .collect();
    state.pitchers.push(starter);
    Ok(state)
}

/// First healthy pitcher in rotation order from the scheduled starter.
///
/// If the whole rotation is hurt the scheduled starter goes anyway.
fn pick_starter(league: &League, team: &Team) -> SimResult<PlayerId> {
    let scheduled = team
        .scheduled_starter()
        .ok_or(SimError::NoStartingPitcher(team.id))?;

    let n = team.pitching_order.len();
    for offset in 0..n {
        let candidate = team.pitching_order[(team.next_starter + offset) % n];
        if !league.player(candidate)?.is_injured() {
            return Ok(candidate);
        }
    }
    Ok(scheduled)
}

/// Perks each player receives from held items.
fn granted_perks(
    league: &League,
    registry: &EffectRegistry,
    state: &GameState,
) -> SimResult<BTreeMap<PlayerId, Vec<PerkId>>> {
    let mut granted = BTreeMap::new();
    for (&id, player) in &state.players {
        let mut perks = Vec::new();
        for &item_id in &player.items {
            let item = league.item(item_id)?;
            let definition = registry.item(&item.definition)?;
            for perk in &definition.perks {
                registry.perk(perk)?;
                perks.push(perk.clone());
            }
        }
        if !perks.is_empty() {
            granted.insert(id, perks);
        }
    }
    Ok(granted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameId, StatusId, TeamId};
    use crate::league::fixtures;

    #[test]
    fn test_prepare_demo_game() {
        let registry = crate::content::standard_registry();
        let league = fixtures::demo_league();
        let state = prepare_game(&league, &registry, &fixtures::demo_game(1), GameRng::new(1)).unwrap();

        assert_eq!(state.inning, 1);
        assert_eq!(state.home.batting_order.len(), 9);
        assert_eq!(state.away.batting_order.len(), 9);
        assert_eq!(state.players.len(), 26);
        assert_eq!(state.stats.len(), 18);
        assert!(state.stats.values().all(|s| s.games_played == 1));

        let home_team = league.team(TeamId::new(1)).unwrap();
        assert_eq!(
            state.home.current_pitcher().unwrap(),
            home_team.scheduled_starter().unwrap()
        );
        state.check_invariants().unwrap();
    }

    #[test]
    fn test_items_grant_perks() {
        let registry = crate::content::standard_registry();
        let league = fixtures::demo_league();
        let state = prepare_game(&league, &registry, &fixtures::demo_game(1), GameRng::new(1)).unwrap();

        for (id, player) in &state.players {
            assert_eq!(state.granted_perks.contains_key(id), !player.items.is_empty());
        }
        assert!(!state.granted_perks.is_empty());
    }

    #[test]
    fn test_injured_starter_is_skipped() {
        let registry = crate::content::standard_registry();
        let mut league = fixtures::demo_league();
        let team = league.team(TeamId::new(1)).unwrap().clone();
        let scheduled = team.scheduled_starter().unwrap();
        league
            .player_mut(scheduled)
            .unwrap()
            .add_stacks(&StatusId::injured(), 3);

        let state = prepare_game(&league, &registry, &fixtures::demo_game(1), GameRng::new(1)).unwrap();
        let starter = state.home.current_pitcher().unwrap();
        assert_ne!(starter, scheduled);
        assert_eq!(starter, team.pitching_order[1]);
        assert_eq!(state.home.position_chart[&Position::Pitcher], starter);
        assert!(state.home.batting_order.contains(&starter));
        assert!(!state.home.batting_order.contains(&scheduled));
    }

    #[test]
    fn test_invalid_lineups() {
        let registry = crate::content::standard_registry();

        let mut league = fixtures::demo_league();
        league.team_mut(TeamId::new(2)).unwrap().batting_order.clear();
        assert_eq!(
            prepare_game(&league, &registry, &fixtures::demo_game(1), GameRng::new(1)).unwrap_err(),
            SimError::EmptyLineup(TeamId::new(2))
        );

        let mut league = fixtures::demo_league();
        league
            .team_mut(TeamId::new(1))
            .unwrap()
            .position_chart
            .remove(&Position::Shortstop);
        assert_eq!(
            prepare_game(&league, &registry, &fixtures::demo_game(1), GameRng::new(1)).unwrap_err(),
            SimError::EmptyPositionSlot {
                team: TeamId::new(1),
                position: Position::Shortstop,
            }
        );

        let mut league = fixtures::demo_league();
        league.team_mut(TeamId::new(1)).unwrap().pitching_order.clear();
        assert_eq!(
            prepare_game(&league, &registry, &fixtures::demo_game(1), GameRng::new(1)).unwrap_err(),
            SimError::NoStartingPitcher(TeamId::new(1))
        );
    }

    #[test]
    fn test_unknown_weather() {
        let registry = crate::content::standard_registry();
        let league = fixtures::demo_league();
        let mut game = fixtures::demo_game(1);
        game.weather = "blizzard".into();
        game.id = GameId::new(2);
        assert!(matches!(
            prepare_game(&league, &registry, &game, GameRng::new(1)),
            Err(SimError::UnknownEffect { .. })
        ));
    }
}
