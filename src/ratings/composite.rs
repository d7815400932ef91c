//! Composite batting and pitching ratings.
//!
//! Composites are fixed linear combinations of modified attributes, on the
//! same 0-20 scale. They are derived per situation and never stored.

use serde::{Deserialize, Serialize};

use crate::league::Attributes;

/// Batting-side composite ratings. Also used as an additive bonus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BattingRatings {
    pub contact: f64,
    pub power: f64,
    pub hit_angle: f64,
    pub plate_discipline: f64,
    pub extra_base: f64,
    pub home_run: f64,
    pub stealing: f64,
    pub fielding: f64,
    pub durability: f64,
    pub dueling: f64,
}

impl BattingRatings {
    /// Composite ratings from modified attributes.
    #[must_use]
    pub fn from_attributes(a: &Attributes) -> Self {
        Self {
            contact: 0.5 * a.agility + 0.35 * a.wisdom + 0.15 * a.intelligence,
            power: 0.7 * a.strength + 0.3 * a.constitution,
            hit_angle: 0.5 * a.intelligence + 0.5 * a.agility,
            plate_discipline: 0.6 * a.wisdom + 0.4 * a.intelligence,
            extra_base: 0.4 * a.strength + 0.6 * a.agility,
            home_run: 0.8 * a.strength + 0.2 * a.wisdom,
            stealing: 0.7 * a.agility + 0.3 * a.intelligence,
            fielding: 0.5 * a.agility + 0.3 * a.wisdom + 0.2 * a.constitution,
            durability: a.constitution,
            dueling: 0.5 * a.wisdom + 0.3 * a.charisma + 0.2 * a.intelligence,
        }
    }

    /// Headline number used for strike desire and lineup comparisons.
    #[must_use]
    pub fn overall(&self) -> f64 {
        (self.contact + self.power + self.plate_discipline + self.extra_base + self.home_run) / 5.0
    }

    #[must_use]
    pub fn with_contact(mut self, contact: f64) -> Self {
        self.contact = contact;
        self
    }

    #[must_use]
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    #[must_use]
    pub fn with_stealing(mut self, stealing: f64) -> Self {
        self.stealing = stealing;
        self
    }

    #[must_use]
    pub fn with_fielding(mut self, fielding: f64) -> Self {
        self.fielding = fielding;
        self
    }

    fn zip(self, rhs: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self {
            contact: f(self.contact, rhs.contact),
            power: f(self.power, rhs.power),
            hit_angle: f(self.hit_angle, rhs.hit_angle),
            plate_discipline: f(self.plate_discipline, rhs.plate_discipline),
            extra_base: f(self.extra_base, rhs.extra_base),
            home_run: f(self.home_run, rhs.home_run),
            stealing: f(self.stealing, rhs.stealing),
            fielding: f(self.fielding, rhs.fielding),
            durability: f(self.durability, rhs.durability),
            dueling: f(self.dueling, rhs.dueling),
        }
    }
}

impl std::ops::Add for BattingRatings {
    type Output = BattingRatings;

    fn add(self, rhs: BattingRatings) -> BattingRatings {
        self.zip(rhs, |a, b| a + b)
    }
}

impl std::ops::Mul<f64> for BattingRatings {
    type Output = BattingRatings;

    fn mul(self, k: f64) -> BattingRatings {
        self.zip(self, |a, _| a * k)
    }
}

/// Pitching-side composite ratings. Also used as an additive bonus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchingRatings {
    pub velocity: f64,
    pub movement: f64,
    pub accuracy: f64,
    pub composure: f64,
    pub dueling: f64,
    pub fielding: f64,
    pub durability: f64,
}

impl PitchingRatings {
    /// Composite ratings from modified attributes.
    #[must_use]
    pub fn from_attributes(a: &Attributes) -> Self {
        Self {
            velocity: 0.7 * a.strength + 0.3 * a.constitution,
            movement: 0.6 * a.agility + 0.4 * a.intelligence,
            accuracy: 0.6 * a.wisdom + 0.4 * a.agility,
            composure: 0.6 * a.charisma + 0.4 * a.wisdom,
            dueling: 0.5 * a.intelligence + 0.3 * a.charisma + 0.2 * a.wisdom,
            fielding: 0.6 * a.agility + 0.4 * a.wisdom,
            durability: a.constitution,
        }
    }

    #[must_use]
    pub fn overall(&self) -> f64 {
        (self.velocity + self.movement + self.accuracy + self.composure) / 4.0
    }

    #[must_use]
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    #[must_use]
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self
    }

    fn zip(self, rhs: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self {
            velocity: f(self.velocity, rhs.velocity),
            movement: f(self.movement, rhs.movement),
            accuracy: f(self.accuracy, rhs.accuracy),
            composure: f(self.composure, rhs.composure),
            dueling: f(self.dueling, rhs.dueling),
            fielding: f(self.fielding, rhs.fielding),
            durability: f(self.durability, rhs.durability),
        }
    }
}

impl std::ops::Add for PitchingRatings {
    type Output = PitchingRatings;

    fn add(self, rhs: PitchingRatings) -> PitchingRatings {
        self.zip(rhs, |a, b| a + b)
    }
}

impl std::ops::Mul<f64> for PitchingRatings {
    type Output = PitchingRatings;

    fn mul(self, k: f64) -> PitchingRatings {
        self.zip(self, |a, _| a * k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::Attribute;

    #[test]
    fn test_average_player_rates_average() {
        let avg = Attributes::uniform(10.0);
        let batting = BattingRatings::from_attributes(&avg);
        let pitching = PitchingRatings::from_attributes(&avg);

        // Weights sum to one, so a flat 10 stays 10 everywhere
        assert!((batting.contact - 10.0).abs() < 1e-9);
        assert!((batting.dueling - 10.0).abs() < 1e-9);
        assert!((batting.overall() - 10.0).abs() < 1e-9);
        assert!((pitching.velocity - 10.0).abs() < 1e-9);
        assert!((pitching.overall() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_strength_drives_power() {
        let strong = Attributes::uniform(10.0).with(Attribute::Strength, 20.0);
        let batting = BattingRatings::from_attributes(&strong);
        assert!((batting.power - 17.0).abs() < 1e-9);
        assert!((batting.home_run - 18.0).abs() < 1e-9);
        assert!((batting.contact - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_bonus_arithmetic() {
        let bonus = BattingRatings::default().with_contact(1.5);
        let total = BattingRatings::from_attributes(&Attributes::uniform(10.0)) + bonus * 2.0;
        assert!((total.contact - 13.0).abs() < 1e-9);
        assert!((total.power - 10.0).abs() < 1e-9);

        let pitch_bonus = PitchingRatings::default().with_velocity(2.0) * -1.0;
        assert_eq!(pitch_bonus.velocity, -2.0);
        assert_eq!(pitch_bonus.accuracy, 0.0);
    }
}
