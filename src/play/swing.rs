//! Swing and contact.

use super::pitch::ActualPitch;
use crate::core::GameRng;
use crate::ratings::BattingRatings;

/// Base swing rate at pitches in the zone.
const SWING_AT_STRIKES: f64 = 0.65;

/// Base swing rate at pitches out of the zone.
const SWING_AT_BALLS: f64 = 0.30;

/// Base contact rate for an average hitter on an average pitch.
const BASE_CONTACT: f64 = 0.75;

/// What the batter did with the pitch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwingDecision {
    pub swung: bool,
    pub contact: bool,
}

pub struct SwingResolver;

impl SwingResolver {
    /// Probability the batter offers at the pitch.
    ///
    /// Discipline raises the rate at strikes and lowers it at balls.
    #[must_use]
    pub fn swing_chance(pitch: &ActualPitch, batting: &BattingRatings) -> f64 {
        let discipline = (batting.plate_discipline - 10.0) / 10.0;
        let base = if pitch.is_strike {
            SWING_AT_STRIKES + 0.15 * discipline
        } else {
            SWING_AT_BALLS - 0.12 * discipline
        };
        (base * pitch.swing_factor).clamp(0.02, 0.98)
    }

    /// Probability a swing makes contact.
    #[must_use]
    pub fn contact_chance(pitch: &ActualPitch, batting: &BattingRatings) -> f64 {
        let chase = if pitch.is_strike { 1.0 } else { 0.7 };
        (BASE_CONTACT * pitch.contact_factor * batting.contact / 10.0 * chase).clamp(0.05, 0.97)
    }

    /// Two coin flips: swing, then contact if swinging.
    pub fn resolve(rng: &mut GameRng, pitch: &ActualPitch, batting: &BattingRatings) -> SwingDecision {
        if !rng.chance(Self::swing_chance(pitch, batting)) {
            return SwingDecision {
                swung: false,
                contact: false,
            };
        }
        SwingDecision {
            swung: true,
            contact: rng.chance(Self::contact_chance(pitch, batting)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::Attributes;
    use crate::play::PitchKind;

    fn pitch(is_strike: bool) -> ActualPitch {
        ActualPitch {
            kind: PitchKind::Fastball,
            quality: 1.0,
            velocity: 10.0,
            movement: 10.0,
            is_strike,
            swing_factor: 1.0,
            contact_factor: 1.0,
            hit_modifier: PitchKind::Fastball.hit_modifier(),
        }
    }

    #[test]
    fn test_discipline_separates_strikes_from_balls() {
        let average = BattingRatings::from_attributes(&Attributes::uniform(10.0));
        let mut patient = average;
        patient.plate_discipline = 20.0;

        assert!((SwingResolver::swing_chance(&pitch(true), &average) - 0.65).abs() < 1e-9);
        assert!((SwingResolver::swing_chance(&pitch(false), &average) - 0.30).abs() < 1e-9);

        assert!(
            SwingResolver::swing_chance(&pitch(true), &patient)
                > SwingResolver::swing_chance(&pitch(true), &average)
        );
        assert!(
            SwingResolver::swing_chance(&pitch(false), &patient)
                < SwingResolver::swing_chance(&pitch(false), &average)
        );
    }

    #[test]
    fn test_contact_scales_with_rating() {
        let average = BattingRatings::from_attributes(&Attributes::uniform(10.0));
        let slap = average.with_contact(16.0);
        assert!((SwingResolver::contact_chance(&pitch(true), &average) - 0.75).abs() < 1e-9);
        assert!(
            SwingResolver::contact_chance(&pitch(true), &slap)
                > SwingResolver::contact_chance(&pitch(true), &average)
        );
        assert!(
            SwingResolver::contact_chance(&pitch(false), &average)
                < SwingResolver::contact_chance(&pitch(true), &average)
        );
    }

    #[test]
    fn test_no_contact_without_swing() {
        let batting = BattingRatings::from_attributes(&Attributes::uniform(10.0));
        let mut rng = GameRng::new(3);
        for _ in 0..200 {
            let decision = SwingResolver::resolve(&mut rng, &pitch(false), &batting);
            assert!(decision.swung || !decision.contact);
        }
    }
}
