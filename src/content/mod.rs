//! Standard content: the weathers, ballparks, perks, statuses and items
//! shipped with the engine.
//!
//! Content is plain data registered into an [`EffectRegistry`]. Leagues
//! with their own tables can start from [`standard_registry`] and register
//! more, or build a registry from scratch; the engine only requires the
//! `injured` and `streak` statuses to exist.

use crate::effects::{
    BallparkDef, EffectCondition, EffectRegistry, HitTableModifier, ItemDefinition, PerkDef,
    PerkEffect, PerkKind, PerkRequirements, StatusDef, WeatherDef,
};
use crate::league::{Attribute, Attributes, Position};
use crate::play::PitchKind;
use crate::ratings::{BattingRatings, PitchingRatings};
use crate::triggers::{ActionTarget, EventRole, Trigger, TriggerAction, TriggerEvent};

/// Registry holding every standard definition.
///
/// ```
/// use rust_ballgame::content::standard_registry;
/// use rust_ballgame::core::{StatusId, WeatherId};
///
/// let registry = standard_registry();
/// assert!(registry.status(&StatusId::injured()).is_ok());
/// assert!(registry.weather(&WeatherId::new("clear")).is_ok());
/// ```
#[must_use]
pub fn standard_registry() -> EffectRegistry {
    let mut registry = EffectRegistry::new();
    register_weathers(&mut registry);
    register_ballparks(&mut registry);
    register_perks(&mut registry);
    register_statuses(&mut registry);
    register_items(&mut registry);
    registry
}

fn register_weathers(registry: &mut EffectRegistry) {
    registry.register_weather(WeatherDef::new("clear", "Clear Skies", PerkEffect::new()));

    // Wet ball: harder to grip, fewer balls carry
    registry.register_weather(WeatherDef::new(
        "rain",
        "Rain",
        PerkEffect::new()
            .with_pitching_bonus(PitchingRatings::default().with_accuracy(-1.0))
            .with_hit_table(HitTableModifier::identity().with_power([1.15, 1.0, 0.85])),
    ));

    registry.register_weather(WeatherDef::new(
        "wind_out",
        "Wind Blowing Out",
        PerkEffect::new().with_hit_table(
            HitTableModifier::identity()
                .with_hit_type([1.0, 1.15, 1.0, 0.9])
                .with_outcome([1.0, 1.05, 1.0, 1.3, 0.95]),
        ),
    ));

    registry.register_weather(WeatherDef::new(
        "heat",
        "Heat Wave",
        PerkEffect::new()
            .with_attribute_bonus(Attributes::zero().with(Attribute::Constitution, -1.0)),
    ));

    registry.register_weather(WeatherDef::new(
        "fog",
        "Fog",
        PerkEffect::new()
            .with_batting_bonus(BattingRatings::default().with_contact(-0.5))
            .with_hit_table(HitTableModifier::identity().with_outcome([1.05, 1.1, 1.2, 1.0, 0.95])),
    ));
}

fn register_ballparks(registry: &mut EffectRegistry) {
    registry.register_ballpark(
        BallparkDef::new("oak_park", "Oak Park")
            .with_home(PerkEffect::new().with_attribute_bonus(
                Attributes::zero().with(Attribute::Charisma, 1.0),
            )),
    );

    // Short fences help everyone hit home runs; the home side knows the
    // caroms off the wall
    let short_porch = HitTableModifier::identity().with_outcome([1.0, 1.0, 0.8, 1.35, 0.95]);
    registry.register_ballpark(
        BallparkDef::new("bandbox", "The Bandbox")
            .with_home(
                PerkEffect::new()
                    .with_hit_table(short_porch.combine(
                        &HitTableModifier::identity().with_outcome([1.0, 1.1, 1.0, 1.0, 1.0]),
                    )),
            )
            .with_away(PerkEffect::new().with_hit_table(short_porch)),
    );

    registry.register_ballpark(BallparkDef::new("neutral_park", "Neutral Park"));

    let deep_alleys = HitTableModifier::identity().with_outcome([1.0, 1.15, 1.5, 0.7, 1.0]);
    registry.register_ballpark(
        BallparkDef::new("canyon", "The Canyon")
            .with_home(PerkEffect::new().with_hit_table(deep_alleys).with_quality_bonus(0.05))
            .with_away(PerkEffect::new().with_hit_table(deep_alleys)),
    );
}

fn register_perks(registry: &mut EffectRegistry) {
    let pitchers_only = PerkRequirements {
        positions: vec![Position::Pitcher],
        min_attributes: Vec::new(),
    };

    registry.register_perk(
        PerkDef::new(
            "slugger",
            "Slugger",
            PerkEffect::new()
                .with_batting_bonus(BattingRatings::default().with_power(1.0))
                .with_hit_table(
                    HitTableModifier::identity().with_outcome([1.0, 1.1, 1.0, 1.25, 0.95]),
                ),
        )
        .with_kind(PerkKind::Batting)
        .with_condition(EffectCondition::me_batting()),
    );

    registry.register_perk(
        PerkDef::new("ace", "Ace", PerkEffect::new().with_quality_bonus(0.15))
            .with_kind(PerkKind::Pitching)
            .with_requirements(pitchers_only.clone())
            .with_condition(EffectCondition::me_pitching()),
    );

    registry.register_perk(
        PerkDef::new(
            "eagle_eye",
            "Eagle Eye",
            PerkEffect::new().with_batting_bonus(BattingRatings {
                plate_discipline: 1.5,
                ..BattingRatings::default()
            }),
        )
        .with_kind(PerkKind::Batting)
        .with_condition(EffectCondition::me_batting()),
    );

    registry.register_perk(
        PerkDef::new(
            "speedster",
            "Speedster",
            PerkEffect::new().with_batting_bonus(BattingRatings::default().with_stealing(2.0)),
        )
        .with_kind(PerkKind::Baserunning)
        .with_requirements(PerkRequirements {
            positions: Vec::new(),
            min_attributes: vec![(Attribute::Agility, 10.0)],
        }),
    );

    registry.register_perk(
        PerkDef::new(
            "gold_glove",
            "Gold Glove",
            PerkEffect::new()
                .with_batting_bonus(BattingRatings::default().with_fielding(1.5))
                .with_pitching_bonus(PitchingRatings {
                    fielding: 1.5,
                    ..PitchingRatings::default()
                }),
        )
        .with_kind(PerkKind::Fielding),
    );

    registry.register_perk(
        PerkDef::new(
            "clubhouse_leader",
            "Clubhouse Leader",
            PerkEffect::new()
                .with_attribute_bonus(Attributes::zero().with(Attribute::Charisma, 0.5)),
        )
        .with_condition(EffectCondition::teammates()),
    );

    // Owned by a pitcher, felt by the hitter
    registry.register_perk(
        PerkDef::new(
            "intimidator",
            "Intimidator",
            PerkEffect::new().with_batting_bonus(BattingRatings::default().with_contact(-1.0)),
        )
        .with_kind(PerkKind::Pitching)
        .with_requirements(pitchers_only.clone())
        .with_condition(EffectCondition::opposing_batter()),
    );

    registry.register_perk(
        PerkDef::new(
            "closer_mentality",
            "Closer Mentality",
            PerkEffect::new().with_quality_bonus(0.2),
        )
        .with_kind(PerkKind::Pitching)
        .with_requirements(pitchers_only.clone())
        .with_condition(EffectCondition::me_pitching().and(EffectCondition::StrikesAtLeast(2))),
    );

    registry.register_perk(
        PerkDef::new(
            "curveball_artist",
            "Curveball Artist",
            PerkEffect::new().with_quality_bonus(0.25),
        )
        .with_kind(PerkKind::Pitching)
        .with_requirements(pitchers_only)
        .with_condition(
            EffectCondition::me_pitching().and(EffectCondition::PitchKind(PitchKind::Curveball)),
        ),
    );

    registry.register_perk(PerkDef::new(
        "iron_lung",
        "Iron Lung",
        PerkEffect::new()
            .with_attribute_bonus(Attributes::zero().with(Attribute::Constitution, 2.0)),
    ));

    // Reactive perks
    registry.register_perk(PerkDef::new(
        "sparkplug",
        "Sparkplug",
        PerkEffect::new().with_trigger(
            Trigger::new(TriggerEvent::Hit, TriggerAction::Heat(0.5))
                .with_condition(EffectCondition::IsMyTeam)
                .targeting(ActionTarget::Subject),
        ),
    ));

    registry.register_perk(
        PerkDef::new(
            "strikeout_artist",
            "Strikeout Artist",
            PerkEffect::new().with_trigger(
                Trigger::new(TriggerEvent::Strikeout, TriggerAction::Heat(1.0))
                    .with_subject(EventRole::Pitcher),
            ),
        )
        .with_kind(PerkKind::Pitching),
    );

    registry.register_perk(
        PerkDef::new(
            "heads_up",
            "Heads Up",
            PerkEffect::new().with_trigger(
                Trigger::new(TriggerEvent::DefensiveOut, TriggerAction::Experience(1))
                    .with_subject(EventRole::Defender),
            ),
        )
        .with_kind(PerkKind::Fielding),
    );
}

fn register_statuses(registry: &mut EffectRegistry) {
    registry.register_status(StatusDef::new(
        "injured",
        "Injured",
        PerkEffect::new().with_attribute_bonus(
            Attributes::zero()
                .with(Attribute::Strength, -0.5)
                .with(Attribute::Agility, -0.5)
                .with(Attribute::Constitution, -0.5),
        ),
    ));

    // Negative stacks are a slump
    registry.register_status(StatusDef::new(
        "streak",
        "Streak",
        PerkEffect::new().with_batting_bonus(
            BattingRatings::default()
                .with_contact(0.25)
                .with_power(0.25),
        ),
    ));
}

fn register_items(registry: &mut EffectRegistry) {
    registry.register_item(ItemDefinition::new("lucky_bat", "Lucky Bat").with_perk("slugger"));
    registry.register_item(
        ItemDefinition::new("weighted_glove", "Weighted Glove").with_perk("gold_glove"),
    );
}
