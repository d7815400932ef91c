//! The six base attributes and their species/class multipliers.
//!
//! Attributes live on a 0-20 scale where 10 is league average. They are
//! the only raw numbers on a player; every rating the engine uses is
//! derived from them by the [`ratings`](crate::ratings) module.

use serde::{Deserialize, Serialize};

/// Attribute identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Strength,
    Agility,
    Constitution,
    Wisdom,
    Intelligence,
    Charisma,
}

impl Attribute {
    /// All attributes in canonical order.
    pub const ALL: [Attribute; 6] = [
        Attribute::Strength,
        Attribute::Agility,
        Attribute::Constitution,
        Attribute::Wisdom,
        Attribute::Intelligence,
        Attribute::Charisma,
    ];

    /// Mental attributes receive the clutch adjustment.
    #[must_use]
    pub const fn is_mental(self) -> bool {
        matches!(self, Attribute::Wisdom | Attribute::Intelligence)
    }
}

/// A full set of attribute values.
///
/// Used both for a player's base attributes and for additive bonuses
/// (where zero means "no change").
///
/// ```
/// use rust_ballgame::league::{Attribute, Attributes};
///
/// let base = Attributes::uniform(10.0);
/// let bonus = Attributes::zero().with(Attribute::Strength, 2.0);
/// let total = base + bonus;
/// assert_eq!(total.get(Attribute::Strength), 12.0);
/// assert_eq!(total.sum(), 62.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: f64,
    pub agility: f64,
    pub constitution: f64,
    pub wisdom: f64,
    pub intelligence: f64,
    pub charisma: f64,
}

impl Attributes {
    /// Create attributes from explicit values.
    #[must_use]
    pub const fn new(
        strength: f64,
        agility: f64,
        constitution: f64,
        wisdom: f64,
        intelligence: f64,
        charisma: f64,
    ) -> Self {
        Self {
            strength,
            agility,
            constitution,
            wisdom,
            intelligence,
            charisma,
        }
    }

    /// All attributes zero (the additive identity).
    #[must_use]
    pub const fn zero() -> Self {
        Self::uniform(0.0)
    }

    /// All attributes one (the multiplicative identity).
    #[must_use]
    pub const fn one() -> Self {
        Self::uniform(1.0)
    }

    /// All attributes set to the same value.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    /// Get one attribute.
    #[must_use]
    pub fn get(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Constitution => self.constitution,
            Attribute::Wisdom => self.wisdom,
            Attribute::Intelligence => self.intelligence,
            Attribute::Charisma => self.charisma,
        }
    }

    /// Get a mutable reference to one attribute.
    pub fn get_mut(&mut self, attribute: Attribute) -> &mut f64 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Agility => &mut self.agility,
            Attribute::Constitution => &mut self.constitution,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Charisma => &mut self.charisma,
        }
    }

    /// Set one attribute (builder pattern).
    #[must_use]
    pub fn with(mut self, attribute: Attribute, value: f64) -> Self {
        *self.get_mut(attribute) = value;
        self
    }

    /// Element-wise product.
    #[must_use]
    pub fn scaled_by(&self, other: &Attributes) -> Self {
        self.map(|a, v| v * other.get(a))
    }

    /// Apply a function to every attribute.
    #[must_use]
    pub fn map(&self, f: impl Fn(Attribute, f64) -> f64) -> Self {
        let mut out = *self;
        for attribute in Attribute::ALL {
            *out.get_mut(attribute) = f(attribute, self.get(attribute));
        }
        out
    }

    /// Sum of all six attributes.
    #[must_use]
    pub fn sum(&self) -> f64 {
        Attribute::ALL.iter().map(|&a| self.get(a)).sum()
    }
}

impl std::ops::Add for Attributes {
    type Output = Attributes;

    fn add(self, rhs: Attributes) -> Attributes {
        self.map(|a, v| v + rhs.get(a))
    }
}

impl std::ops::AddAssign for Attributes {
    fn add_assign(&mut self, rhs: Attributes) {
        *self = *self + rhs;
    }
}

impl std::ops::Mul<f64> for Attributes {
    type Output = Attributes;

    fn mul(self, rhs: f64) -> Attributes {
        self.map(|_, v| v * rhs)
    }
}

/// Player species. Each applies fixed multipliers to base attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    #[default]
    Human,
    Elf,
    Dwarf,
    Orc,
    Halfling,
}

impl Species {
    /// Attribute multipliers for this species.
    #[must_use]
    pub fn multipliers(self) -> Attributes {
        match self {
            Species::Human => Attributes::one(),
            Species::Elf => Attributes::new(0.9, 1.15, 0.9, 1.05, 1.05, 1.0),
            Species::Dwarf => Attributes::new(1.1, 0.9, 1.2, 1.0, 0.95, 0.9),
            Species::Orc => Attributes::new(1.2, 1.0, 1.1, 0.85, 0.85, 0.95),
            Species::Halfling => Attributes::new(0.85, 1.1, 1.0, 1.05, 1.0, 1.1),
        }
    }
}

/// Player class. Applied on top of species multipliers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    #[default]
    Fighter,
    Rogue,
    Wizard,
    Cleric,
    Bard,
}

impl PlayerClass {
    /// Attribute multipliers for this class.
    #[must_use]
    pub fn multipliers(self) -> Attributes {
        match self {
            PlayerClass::Fighter => Attributes::new(1.1, 1.0, 1.05, 0.95, 0.95, 1.0),
            PlayerClass::Rogue => Attributes::new(0.95, 1.15, 0.95, 1.0, 1.0, 1.0),
            PlayerClass::Wizard => Attributes::new(0.9, 0.95, 0.9, 1.1, 1.15, 1.0),
            PlayerClass::Cleric => Attributes::new(1.0, 0.95, 1.05, 1.15, 1.0, 0.95),
            PlayerClass::Bard => Attributes::new(0.95, 1.0, 0.95, 1.0, 1.0, 1.2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_with() {
        let attrs = Attributes::zero()
            .with(Attribute::Agility, 3.0)
            .with(Attribute::Charisma, -1.0);
        assert_eq!(attrs.get(Attribute::Agility), 3.0);
        assert_eq!(attrs.get(Attribute::Charisma), -1.0);
        assert_eq!(attrs.get(Attribute::Strength), 0.0);
    }

    #[test]
    fn test_arithmetic() {
        let mut a = Attributes::uniform(10.0);
        a += Attributes::uniform(1.0);
        assert_eq!(a, Attributes::uniform(11.0));
        assert_eq!(a * 2.0, Attributes::uniform(22.0));
        assert_eq!(
            a.scaled_by(&Attributes::zero().with(Attribute::Wisdom, 1.0)).sum(),
            11.0
        );
    }

    #[test]
    fn test_mental_attributes() {
        let mental: Vec<_> = Attribute::ALL.iter().filter(|a| a.is_mental()).collect();
        assert_eq!(mental, vec![&Attribute::Wisdom, &Attribute::Intelligence]);
    }

    #[test]
    fn test_human_fighter_multipliers() {
        assert_eq!(Species::Human.multipliers(), Attributes::one());
        assert!(PlayerClass::Fighter.multipliers().strength > 1.0);
        assert!(PlayerClass::Bard.multipliers().charisma > 1.0);
    }
}
