//! Fatigue and injuries.
//!
//! After every pitch both the pitcher and the batter lose stamina. The
//! loss scales with how taxing the outcome was and shrinks for durable
//! players. Each pitch also rolls a small injury chance per participant,
//! higher for fragile or exhausted players.

use tracing::debug;

use super::outcome::PitchOutcome;
use crate::core::{GameState, PlayerId, RoleFatigue, SimConfig, SimResult, StatusId};
use crate::gamelog::LogEvent;
use crate::ratings::RatingsEngine;

/// Which injuries the last pitch caused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FatigueReport {
    pub pitcher_injured: bool,
    pub batter_injured: bool,
}

pub struct StaminaModel;

impl StaminaModel {
    /// How taxing an outcome is for the pitcher or the batter.
    #[must_use]
    pub fn severity(outcome: PitchOutcome, pitcher: bool) -> f64 {
        match (outcome, pitcher) {
            (PitchOutcome::Ball, true) => 1.0,
            (PitchOutcome::CalledStrike, true) => 0.8,
            (PitchOutcome::SwingingStrike, true) => 0.9,
            (PitchOutcome::Foul | PitchOutcome::Out, true) => 1.0,
            (PitchOutcome::Single, true) => 1.4,
            (PitchOutcome::Double, true) => 1.8,
            (PitchOutcome::Triple, true) => 2.2,
            (PitchOutcome::HomeRun, true) => 3.5,

            (PitchOutcome::Ball, false) => 0.3,
            (PitchOutcome::CalledStrike | PitchOutcome::SwingingStrike, false) => 0.5,
            (PitchOutcome::Foul, false) => 0.6,
            (PitchOutcome::Out, false) => 1.0,
            (PitchOutcome::Single, false) => 1.5,
            (PitchOutcome::Double, false) => 2.0,
            (PitchOutcome::Triple, false) => 3.0,
            // Trotting around the bases
            (PitchOutcome::HomeRun, false) => 1.2,
        }
    }

    /// Signed stamina change for one pitch.
    #[must_use]
    pub fn stamina_delta(durability: f64, severity: f64, role: &RoleFatigue) -> f64 {
        let baseline = role.baseline_durability;
        let resistance = (1.0 - (durability - baseline) / (2.0 * baseline)).max(0.25);
        -role.drain_per_pitch * severity * resistance
    }

    /// Per-pitch injury probability.
    #[must_use]
    pub fn injury_chance(durability: f64, stamina: f64, role: &RoleFatigue) -> f64 {
        let fragility = (role.baseline_durability / durability.max(1.0)).powi(2);
        let exhaustion = 1.0 + (1.0 - stamina).max(0.0);
        role.injury_rate * fragility * exhaustion
    }

    /// Drain stamina and roll injuries for the pitcher and the batter.
    pub fn apply(
        state: &mut GameState,
        ratings: &RatingsEngine,
        config: &SimConfig,
        pitcher: PlayerId,
        batter: PlayerId,
        outcome: PitchOutcome,
    ) -> SimResult<FatigueReport> {
        let pitching = state.team(state.side_of(pitcher)?);
        let role = if pitching.pitchers.first() == Some(&pitcher) {
            &config.starter
        } else {
            &config.reliever
        };
        let durability = ratings.profile(state, pitcher, None)?.pitching().durability;
        let pitcher_injured = Self::tire(
            state,
            config,
            pitcher,
            durability,
            Self::severity(outcome, true),
            role,
        )?;

        let durability = ratings.profile(state, batter, None)?.batting().durability;
        let batter_injured = Self::tire(
            state,
            config,
            batter,
            durability,
            Self::severity(outcome, false),
            &config.batter,
        )?;

        Ok(FatigueReport {
            pitcher_injured,
            batter_injured,
        })
    }

    fn tire(
        state: &mut GameState,
        config: &SimConfig,
        id: PlayerId,
        durability: f64,
        severity: f64,
        role: &RoleFatigue,
    ) -> SimResult<bool> {
        let player = state.player_mut(id)?;
        let stamina = config.clamp_stamina(player.stamina + Self::stamina_delta(durability, severity, role));
        player.stamina = stamina;

        if !state.rng.chance(Self::injury_chance(durability, stamina, role)) {
            return Ok(false);
        }

        let (min, max) = config.injury_games;
        let games = state.rng.gen_range(min..max + 1);
        state.player_mut(id)?.add_stacks(&StatusId::injured(), games);
        state.log(LogEvent::Injury { player: id, games });
        debug!(player = %id, games, "player injured");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::fixtures;

    #[test]
    fn test_durability_reduces_drain() {
        let role = SimConfig::default().starter;
        let average = StaminaModel::stamina_delta(10.0, 1.0, &role);
        let tough = StaminaModel::stamina_delta(16.0, 1.0, &role);
        let fragile = StaminaModel::stamina_delta(4.0, 1.0, &role);

        assert!((average + role.drain_per_pitch).abs() < 1e-12);
        assert!(tough > average && average > fragile);
        assert!(tough < 0.0);
    }

    #[test]
    fn test_home_runs_tax_pitchers_most() {
        let role = SimConfig::default().reliever;
        let ball = StaminaModel::stamina_delta(10.0, StaminaModel::severity(PitchOutcome::Ball, true), &role);
        let homer =
            StaminaModel::stamina_delta(10.0, StaminaModel::severity(PitchOutcome::HomeRun, true), &role);
        assert!(homer < ball);
    }

    #[test]
    fn test_injury_chance_rises_with_fatigue() {
        let role = SimConfig::default().batter;
        let fresh = StaminaModel::injury_chance(10.0, 1.0, &role);
        let tired = StaminaModel::injury_chance(10.0, 0.0, &role);
        let fragile = StaminaModel::injury_chance(5.0, 1.0, &role);
        assert_eq!(fresh, role.injury_rate);
        assert!((tired - 2.0 * fresh).abs() < 1e-15);
        assert!((fragile - 4.0 * fresh).abs() < 1e-15);
    }

    #[test]
    fn test_stamina_never_below_floor() {
        let registry = crate::content::standard_registry();
        let ratings = RatingsEngine::new(&registry);
        let config = SimConfig::default().with_injury_scale(0.0);
        let mut state = fixtures::demo_state(&registry, 3);
        let pitcher = state.current_pitcher().unwrap();
        let batter = state.current_batter().unwrap();
        state.player_mut(pitcher).unwrap().stamina = config.stamina_floor + 0.001;

        for _ in 0..20 {
            let report = StaminaModel::apply(
                &mut state,
                &ratings,
                &config,
                pitcher,
                batter,
                PitchOutcome::HomeRun,
            )
            .unwrap();
            assert_eq!(report, FatigueReport::default());
        }
        assert_eq!(state.player(pitcher).unwrap().stamina, config.stamina_floor);
        assert!(state.player(batter).unwrap().stamina < 1.0);
    }

    #[test]
    fn test_certain_injury_adds_stacks() {
        let registry = crate::content::standard_registry();
        let ratings = RatingsEngine::new(&registry);
        let config = SimConfig::default().with_injury_scale(1e9);
        let mut state = fixtures::demo_state(&registry, 4);
        let pitcher = state.current_pitcher().unwrap();
        let batter = state.current_batter().unwrap();

        let report =
            StaminaModel::apply(&mut state, &ratings, &config, pitcher, batter, PitchOutcome::Ball)
                .unwrap();
        assert!(report.pitcher_injured && report.batter_injured);

        let games = state.player(pitcher).unwrap().stacks(&StatusId::injured());
        assert!((config.injury_games.0..=config.injury_games.1).contains(&games));
        assert!(state.player(batter).unwrap().is_injured());
        assert_eq!(
            state
                .log
                .iter()
                .filter(|e| matches!(e, LogEvent::Injury { .. }))
                .count(),
            2
        );
    }
}
