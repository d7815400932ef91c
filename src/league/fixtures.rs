//! A small deterministic league for tests, benchmarks and examples.
//!
//! Two teams of thirteen: nine starters (the pitcher bats ninth) and four
//! more pitchers, two of whom fill out a three-man rotation. Player IDs
//! are `team * 100 + slot`, so team 1's starting pitcher is player 100.

use super::attributes::{Attributes, PlayerClass, Species};
use super::player::{Player, Position};
use super::season::{Item, League, LeagueRound, ScheduledGame};
use super::team::Team;
use crate::core::{GameId, GameRng, GameState, ItemId, PlayerId, TeamId};
use crate::effects::EffectRegistry;
use crate::game::prepare_game;

const SPECIES: [Species; 5] = [
    Species::Human,
    Species::Elf,
    Species::Dwarf,
    Species::Orc,
    Species::Halfling,
];

const CLASSES: [PlayerClass; 5] = [
    PlayerClass::Fighter,
    PlayerClass::Rogue,
    PlayerClass::Wizard,
    PlayerClass::Cleric,
    PlayerClass::Bard,
];

/// Roster slots per team.
const ROSTER_SIZE: u32 = 13;

/// Player in a demo roster slot.
#[must_use]
pub fn demo_player_id(team: TeamId, slot: u32) -> PlayerId {
    PlayerId::new(team.raw() * 100 + slot)
}

/// Base attributes for a slot: spread around league average, pitchers
/// leaning on strength and wisdom.
fn attributes(team: u32, slot: u32) -> Attributes {
    let wobble = |k: u32| f64::from((slot * 7 + team * 3 + k) % 5) - 2.0;
    if slot == 0 || slot >= 9 {
        Attributes::new(
            12.0 + wobble(0) * 0.5,
            10.0 + wobble(1) * 0.5,
            11.0 + wobble(2) * 0.5,
            12.0 + wobble(3) * 0.5,
            10.0 + wobble(4) * 0.5,
            10.0 + wobble(5) * 0.5,
        )
    } else {
        Attributes::new(
            10.0 + wobble(0),
            10.5 + wobble(1),
            10.0 + wobble(2),
            10.0 + wobble(3),
            10.0 + wobble(4),
            9.5 + wobble(5),
        )
    }
}

/// Perks held in each slot, per team.
fn perks(team: u32, slot: u32) -> &'static [&'static str] {
    match (team, slot) {
        (1, 0) => &["ace"],
        (1, 1) => &["heads_up"],
        (1, 3) => &["slugger"],
        (1, 6) => &["speedster"],
        (1, 8) => &["sparkplug"],
        (1, 9) => &["curveball_artist"],
        (1, 11) => &["closer_mentality"],
        (2, 0) => &["intimidator"],
        (2, 2) => &["clubhouse_leader"],
        (2, 4) => &["eagle_eye"],
        (2, 5) => &["gold_glove"],
        (2, 10) => &["strikeout_artist"],
        (2, 12) => &["iron_lung"],
        _ => &[],
    }
}

fn add_demo_team(league: &mut League, id: TeamId, name: &str, ballpark: &str, item: Item) {
    let mut team = Team::new(id, name, ballpark);

    for slot in 0..ROSTER_SIZE {
        let player_id = demo_player_id(id, slot);
        let positions = match slot {
            0 | 9.. => vec![Position::Pitcher],
            1..=8 => {
                let primary = Position::ALL[slot as usize];
                // Every other fielder can also cover the neighbouring spot
                if slot % 2 == 0 && slot < 8 {
                    vec![primary, Position::ALL[slot as usize + 1]]
                } else {
                    vec![primary]
                }
            }
        };

        let mut player = Player::new(
            player_id,
            format!("{name} #{slot}"),
            attributes(id.raw(), slot),
        )
        .with_team(id)
        .with_positions(positions)
        .with_species(SPECIES[(slot as usize + id.raw() as usize) % SPECIES.len()])
        .with_class(CLASSES[(slot as usize * 2 + id.raw() as usize) % CLASSES.len()]);
        for &perk in perks(id.raw(), slot) {
            player = player.with_perk(perk);
        }
        if slot == 4 {
            player = player.with_item(item.id);
        }

        if (1..=8).contains(&slot) {
            team.position_chart.insert(Position::ALL[slot as usize], player_id);
            team.batting_order.push(player_id);
        }
        team.players.push(player_id);
        league.add_player(player);
    }

    let starter = demo_player_id(id, 0);
    team.position_chart.insert(Position::Pitcher, starter);
    team.batting_order.push(starter);
    team.pitching_order = vec![starter, demo_player_id(id, 9), demo_player_id(id, 10)];

    league.add_item(item);
    league.add_team(team);
}

/// The Owls (team 1, Oak Park) and the Foxes (team 2, the Bandbox).
#[must_use]
pub fn demo_league() -> League {
    let mut league = League::new();
    add_demo_team(
        &mut league,
        TeamId::new(1),
        "Owls",
        "oak_park",
        Item {
            id: ItemId::new(1),
            definition: "lucky_bat".into(),
            team: TeamId::new(1),
        },
    );
    add_demo_team(
        &mut league,
        TeamId::new(2),
        "Foxes",
        "bandbox",
        Item {
            id: ItemId::new(2),
            definition: "weighted_glove".into(),
            team: TeamId::new(2),
        },
    );
    league
}

/// Owls host the Foxes under clear skies.
#[must_use]
pub fn demo_game(id: u32) -> ScheduledGame {
    ScheduledGame {
        id: GameId::new(id),
        home: TeamId::new(1),
        away: TeamId::new(2),
        weather: "clear".into(),
        ballpark: "oak_park".into(),
    }
}

/// A home-and-away pair.
#[must_use]
pub fn demo_round() -> LeagueRound {
    LeagueRound {
        round: 1,
        games: vec![
            demo_game(1),
            ScheduledGame {
                id: GameId::new(2),
                home: TeamId::new(2),
                away: TeamId::new(1),
                weather: "rain".into(),
                ballpark: "bandbox".into(),
            },
        ],
    }
}

/// Prepared state for game 1 of the demo league.
///
/// # Panics
///
/// If `registry` lacks the demo league's content (the standard registry
/// has all of it).
#[must_use]
pub fn demo_state(registry: &EffectRegistry, seed: u64) -> GameState {
    let game = demo_game(1);
    prepare_game(
        &demo_league(),
        registry,
        &game,
        GameRng::new(seed).for_game(game.id),
    )
    .expect("demo league content is registered")
}
