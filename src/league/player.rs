//! Players and fielding positions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::attributes::{Attributes, PlayerClass, Species};
use crate::core::{ItemId, PerkId, PlayerId, StatusId, TeamId};

/// Fielding position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    Pitcher,
    Catcher,
    FirstBase,
    SecondBase,
    ThirdBase,
    Shortstop,
    LeftField,
    CenterField,
    RightField,
}

impl Position {
    /// All nine fielding positions.
    pub const ALL: [Position; 9] = [
        Position::Pitcher,
        Position::Catcher,
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::Shortstop,
        Position::LeftField,
        Position::CenterField,
        Position::RightField,
    ];

    /// Infielders, pitcher and catcher included.
    #[must_use]
    pub const fn is_infield(self) -> bool {
        !self.is_outfield()
    }

    #[must_use]
    pub const fn is_outfield(self) -> bool {
        matches!(
            self,
            Position::LeftField | Position::CenterField | Position::RightField
        )
    }

    /// Scorekeeping abbreviation.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Position::Pitcher => "P",
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::Shortstop => "SS",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
        }
    }
}

/// A player on a league roster.
///
/// Stamina and status stacks change during games; everything else is
/// roster data owned by the league collaborator.
///
/// ```
/// use rust_ballgame::core::{PlayerId, StatusId};
/// use rust_ballgame::league::{Attributes, Player, Position};
///
/// let mut player = Player::new(PlayerId::new(1), "Ada", Attributes::uniform(12.0))
///     .with_positions([Position::Pitcher]);
///
/// assert!(player.can_play(Position::Pitcher));
/// assert!(!player.is_injured());
///
/// player.add_stacks(&StatusId::injured(), 3);
/// assert!(player.is_injured());
/// assert_eq!(player.stacks(&StatusId::injured()), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team: Option<TeamId>,

    /// Positions this player may field.
    pub positions: SmallVec<[Position; 3]>,

    pub species: Species,
    pub class: PlayerClass,

    /// Raw attributes before species and class multipliers.
    pub attributes: Attributes,

    pub perks: Vec<PerkId>,

    /// Sparse status stacks. Zero-stack entries are removed.
    pub statuses: BTreeMap<StatusId, i32>,

    pub items: Vec<ItemId>,

    /// Current stamina, roughly in `[-0.25, 1]`.
    pub stamina: f64,

    pub xp: u32,
}

impl Player {
    /// Create a fully rested player with no perks, statuses or items.
    pub fn new(id: PlayerId, name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id,
            name: name.into(),
            team: None,
            positions: SmallVec::new(),
            species: Species::default(),
            class: PlayerClass::default(),
            attributes,
            perks: Vec::new(),
            statuses: BTreeMap::new(),
            items: Vec::new(),
            stamina: 1.0,
            xp: 0,
        }
    }

    #[must_use]
    pub fn with_team(mut self, team: TeamId) -> Self {
        self.team = Some(team);
        self
    }

    #[must_use]
    pub fn with_positions(mut self, positions: impl IntoIterator<Item = Position>) -> Self {
        self.positions = positions.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_species(mut self, species: Species) -> Self {
        self.species = species;
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: PlayerClass) -> Self {
        self.class = class;
        self
    }

    #[must_use]
    pub fn with_perk(mut self, perk: impl Into<PerkId>) -> Self {
        self.perks.push(perk.into());
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: ItemId) -> Self {
        self.items.push(item);
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<StatusId>, stacks: i32) -> Self {
        self.add_stacks(&status.into(), stacks);
        self
    }

    #[must_use]
    pub fn with_stamina(mut self, stamina: f64) -> Self {
        self.stamina = stamina;
        self
    }

    /// Attributes after species and class multipliers.
    #[must_use]
    pub fn base_attributes(&self) -> Attributes {
        self.attributes
            .scaled_by(&self.species.multipliers())
            .scaled_by(&self.class.multipliers())
    }

    /// Can this player field the given position?
    #[must_use]
    pub fn can_play(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }

    /// Current stacks of a status (0 if absent).
    #[must_use]
    pub fn stacks(&self, status: &StatusId) -> i32 {
        self.statuses.get(status).copied().unwrap_or(0)
    }

    /// Add (or remove, with a negative delta) stacks of a status.
    pub fn add_stacks(&mut self, status: &StatusId, delta: i32) {
        self.set_stacks(status, self.stacks(status) + delta);
    }

    /// Set the stacks of a status, dropping the entry at zero.
    pub fn set_stacks(&mut self, status: &StatusId, stacks: i32) {
        if stacks == 0 {
            self.statuses.remove(status);
        } else {
            self.statuses.insert(status.clone(), stacks);
        }
    }

    /// Is the player on the injured list?
    #[must_use]
    pub fn is_injured(&self) -> bool {
        self.stacks(&StatusId::injured()) > 0
    }
}
