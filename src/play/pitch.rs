//! Pitch selection.
//!
//! The generator picks a pitch kind, scores its quality against the
//! batter, and decides where it ends up. Quality is computed in log space
//! as a sum of terms and exponentiated, so it is positive by construction;
//! a non-positive or non-finite result means a rating went out of range
//! and aborts the game.

use serde::{Deserialize, Serialize};

use crate::core::{Count, GameRng, GameState, SimConfig, SimError, SimResult};
use crate::effects::HitTableModifier;
use crate::ratings::{BattingRatings, PitchingRatings, RatingsEngine};

/// Pitch kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchKind {
    Fastball,
    Curveball,
    Changeup,
    Slider,
    Sinker,
}

impl PitchKind {
    pub const ALL: [PitchKind; 5] = [
        PitchKind::Fastball,
        PitchKind::Curveball,
        PitchKind::Changeup,
        PitchKind::Slider,
        PitchKind::Sinker,
    ];

    /// Multiplier on the batter's swing probability.
    #[must_use]
    pub const fn swing_factor(self) -> f64 {
        match self {
            PitchKind::Fastball => 1.05,
            PitchKind::Curveball => 0.9,
            PitchKind::Changeup => 1.1,
            PitchKind::Slider => 1.0,
            PitchKind::Sinker => 1.0,
        }
    }

    /// Multiplier on the batter's contact probability.
    #[must_use]
    pub const fn contact_factor(self) -> f64 {
        match self {
            PitchKind::Fastball => 0.95,
            PitchKind::Curveball => 0.9,
            PitchKind::Changeup => 0.85,
            PitchKind::Slider => 0.88,
            PitchKind::Sinker => 0.95,
        }
    }

    /// How the pitch shapes batted balls off it.
    #[must_use]
    pub fn hit_modifier(self) -> HitTableModifier {
        let base = HitTableModifier::identity();
        match self {
            PitchKind::Fastball => base.with_power([0.9, 1.0, 1.15]),
            PitchKind::Curveball => base.with_hit_type([1.2, 0.9, 0.9, 1.1]),
            PitchKind::Changeup => base.with_power([1.2, 1.0, 0.85]),
            PitchKind::Slider => base.with_area([1.1, 1.05, 0.9, 1.0, 1.0]),
            PitchKind::Sinker => base.with_hit_type([1.4, 0.8, 0.9, 0.8]),
        }
    }

    /// Kind-specific log-quality term.
    fn quality_term(self, p: &PitchingRatings) -> f64 {
        let scaled = |v: f64| (v - 10.0) / 10.0;
        match self {
            PitchKind::Fastball => scaled(p.velocity) * 0.25,
            PitchKind::Curveball => scaled(p.movement) * 0.2 + scaled(p.accuracy) * 0.05,
            PitchKind::Changeup => {
                scaled((p.velocity + p.movement) / 2.0) * 0.15 + scaled(p.accuracy) * 0.1
            }
            PitchKind::Slider => scaled(0.4 * p.velocity + 0.6 * p.movement) * 0.25,
            PitchKind::Sinker => scaled(p.movement) * 0.15 + scaled(p.velocity) * 0.1,
        }
    }

    /// Velocity relative to the pitcher's velocity rating.
    const fn velocity_scale(self) -> f64 {
        match self {
            PitchKind::Fastball => 1.1,
            PitchKind::Curveball => 0.8,
            PitchKind::Changeup => 0.75,
            PitchKind::Slider => 0.9,
            PitchKind::Sinker => 1.0,
        }
    }

    /// Movement relative to the pitcher's movement rating.
    const fn movement_scale(self) -> f64 {
        match self {
            PitchKind::Fastball => 0.6,
            PitchKind::Curveball => 1.25,
            PitchKind::Changeup => 1.0,
            PitchKind::Slider => 1.15,
            PitchKind::Sinker => 1.1,
        }
    }
}

/// A thrown pitch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActualPitch {
    pub kind: PitchKind,

    /// Always positive; 1.0 is an even matchup.
    pub quality: f64,

    /// 0-20.
    pub velocity: f64,

    /// 0-20.
    pub movement: f64,

    pub is_strike: bool,
    pub swing_factor: f64,
    pub contact_factor: f64,
    pub hit_modifier: HitTableModifier,
}

/// Chooses and throws pitches.
pub struct PitchGenerator;

impl PitchGenerator {
    /// Throw the next pitch of the current at-bat.
    pub fn generate(
        state: &mut GameState,
        ratings: &RatingsEngine,
        config: &SimConfig,
    ) -> SimResult<ActualPitch> {
        let kind = PitchKind::ALL[state.rng.gen_range_usize(0..PitchKind::ALL.len())];

        let pitcher = ratings.profile(state, state.current_pitcher()?, Some(kind))?;
        let batter = ratings.profile(state, state.current_batter()?, Some(kind))?;
        let count = state.count;

        Self::throw(
            &mut state.rng,
            config,
            kind,
            &pitcher.pitching(),
            pitcher.quality_bonus(),
            &batter.batting(),
            count,
        )
    }

    /// Log-quality of a pitch before exponentiation.
    #[must_use]
    pub fn log_quality(
        kind: PitchKind,
        pitching: &PitchingRatings,
        quality_bonus: f64,
        batting: &BattingRatings,
        count: Count,
    ) -> f64 {
        let gap = (pitching.dueling - batting.dueling) / 10.0;
        let duel = gap.signum() * gap.abs().powf(1.5) * 0.3;

        let strikes = f64::from(count.strikes) * 0.05;

        let nerve = (pitching.composure / 20.0).clamp(0.0, 1.0);
        let composure = (pitching.composure - 10.0) / 10.0 * 0.1
            - f64::from(count.balls) * 0.03 * (1.0 - nerve);

        duel + strikes + composure + kind.quality_term(pitching) + quality_bonus
    }

    /// Throw a pitch of a known kind with resolved ratings.
    pub fn throw(
        rng: &mut GameRng,
        config: &SimConfig,
        kind: PitchKind,
        pitching: &PitchingRatings,
        quality_bonus: f64,
        batting: &BattingRatings,
        count: Count,
    ) -> SimResult<ActualPitch> {
        let quality = Self::log_quality(kind, pitching, quality_bonus, batting, count).exp();
        if !quality.is_finite() || quality <= 0.0 {
            return Err(SimError::InvalidPitchQuality(quality));
        }

        // Ahead in the count the pitcher nibbles; behind, they come in
        let desire = 0.55 + 0.1 * f64::from(count.balls) - 0.08 * f64::from(count.strikes)
            + (10.0 - batting.overall()) / 10.0 * 0.1;
        let intends_strike = rng.chance(desire.clamp(0.2, 0.95));

        let accuracy = (0.45 + pitching.accuracy / 20.0 * 0.45).clamp(0.3, 0.97);
        let accurate = rng.chance(accuracy);

        let is_strike = if accurate {
            intends_strike
        } else {
            rng.chance(config.inaccurate_strike_chance)
        };

        Ok(ActualPitch {
            kind,
            quality,
            velocity: (pitching.velocity * kind.velocity_scale()).clamp(0.0, 20.0),
            movement: (pitching.movement * kind.movement_scale()).clamp(0.0, 20.0),
            is_strike,
            swing_factor: kind.swing_factor() * quality.powf(0.25),
            contact_factor: kind.contact_factor() / quality.sqrt(),
            hit_modifier: kind.hit_modifier(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::Attributes;

    fn even() -> (PitchingRatings, BattingRatings) {
        let avg = Attributes::uniform(10.0);
        (
            PitchingRatings::from_attributes(&avg),
            BattingRatings::from_attributes(&avg),
        )
    }

    #[test]
    fn test_even_matchup_is_neutral() {
        let (pitching, batting) = even();
        for kind in PitchKind::ALL {
            let q = PitchGenerator::log_quality(kind, &pitching, 0.0, &batting, Count::default());
            assert!(q.abs() < 1e-9, "{kind:?} quality {q}");
        }
    }

    #[test]
    fn test_fastball_uses_velocity() {
        let (pitching, batting) = even();
        let hard = pitching.with_velocity(18.0);

        let fastball =
            PitchGenerator::log_quality(PitchKind::Fastball, &hard, 0.0, &batting, Count::default());
        let curveball =
            PitchGenerator::log_quality(PitchKind::Curveball, &hard, 0.0, &batting, Count::default());

        assert!((fastball - 0.2).abs() < 1e-9);
        assert!(curveball.abs() < 1e-9);
    }

    #[test]
    fn test_dueling_gap_preserves_sign() {
        let (mut pitching, batting) = even();
        pitching.dueling = 20.0;
        let up = PitchGenerator::log_quality(PitchKind::Slider, &pitching, 0.0, &batting, Count::default());
        pitching.dueling = 0.0;
        let down =
            PitchGenerator::log_quality(PitchKind::Slider, &pitching, 0.0, &batting, Count::default());
        assert!((up - 0.3).abs() < 1e-9);
        assert!((down + 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_quality_is_an_error() {
        let (pitching, batting) = even();
        let mut rng = GameRng::new(1);
        let err = PitchGenerator::throw(
            &mut rng,
            &SimConfig::default(),
            PitchKind::Fastball,
            &pitching,
            f64::NAN,
            &batting,
            Count::default(),
        )
        .unwrap_err();
        assert!(matches!(err, SimError::InvalidPitchQuality(_)));
    }

    #[test]
    fn test_pitch_fields_clamped() {
        let (pitching, batting) = even();
        let wild = pitching.with_velocity(40.0);
        let mut rng = GameRng::new(5);
        for _ in 0..50 {
            let pitch = PitchGenerator::throw(
                &mut rng,
                &SimConfig::default(),
                PitchKind::Fastball,
                &wild,
                0.0,
                &batting,
                Count::new(1, 1),
            )
            .unwrap();
            assert!(pitch.velocity <= 20.0 && pitch.velocity >= 0.0);
            assert!(pitch.movement <= 20.0 && pitch.movement >= 0.0);
            assert!(pitch.quality > 0.0);
        }
    }

    #[test]
    fn test_strike_rate_tracks_accuracy() {
        let (pitching, batting) = even();
        let sharp = pitching.with_accuracy(20.0);
        let wild = pitching.with_accuracy(0.0);
        let config = SimConfig::default();
        let mut rng = GameRng::new(11);

        let mut strikes = |p: &PitchingRatings| {
            (0..2000)
                .filter(|_| {
                    PitchGenerator::throw(&mut rng, &config, PitchKind::Sinker, p, 0.0, &batting, Count::default())
                        .unwrap()
                        .is_strike
                })
                .count()
        };
        let sharp_strikes = strikes(&sharp);
        let wild_strikes = strikes(&wild);
        assert!(sharp_strikes > wild_strikes);
    }
}
