//! Identifier types.
//!
//! ## Numeric IDs
//!
//! Players, teams, items and scheduled games are identified by small
//! numeric newtypes. They are `Copy`, ordered, and serialize as plain
//! integers so results can be keyed by them deterministically.
//!
//! ## Definition IDs
//!
//! Weather, ballparks, perks and statuses are content definitions looked
//! up by name in the [`EffectRegistry`](crate::effects::EffectRegistry).
//! Their IDs wrap a `String`.
//!
//! ```
//! use rust_ballgame::core::{PlayerId, PerkId};
//!
//! let player = PlayerId::new(7);
//! assert_eq!(player.raw(), 7);
//! assert_eq!(format!("{}", player), "Player(7)");
//!
//! let perk = PerkId::new("slugger");
//! assert_eq!(perk.as_str(), "slugger");
//! ```

use serde::{Deserialize, Serialize};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            /// Create a new ID.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw ID value.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

macro_rules! named_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new ID from a name.
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// Borrow the underlying name.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self(name.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

numeric_id!(
    /// Unique identifier for a player in the league.
    PlayerId,
    "Player"
);

numeric_id!(
    /// Unique identifier for a team in the league.
    TeamId,
    "Team"
);

numeric_id!(
    /// Unique identifier for an item instance.
    ItemId,
    "Item"
);

numeric_id!(
    /// Identifier of one scheduled game within the season.
    GameId,
    "Game"
);

named_id!(
    /// Weather definition name.
    WeatherId
);

named_id!(
    /// Ballpark definition name.
    BallparkId
);

named_id!(
    /// Perk definition name.
    PerkId
);

named_id!(
    /// Item definition name. Item instances point at one of these.
    ItemDefId
);

named_id!(
    /// Status definition name. Players carry signed stacks per status.
    StatusId
);

impl StatusId {
    /// Durable injury status; stacks are games remaining on the injured list.
    pub const INJURED: &'static str = "injured";

    /// Hot/cold streak status; positive stacks are hot, negative are cold.
    pub const STREAK: &'static str = "streak";

    /// The injury status ID.
    #[must_use]
    pub fn injured() -> Self {
        Self::new(Self::INJURED)
    }

    /// The streak status ID.
    #[must_use]
    pub fn streak() -> Self {
        Self::new(Self::STREAK)
    }
}
