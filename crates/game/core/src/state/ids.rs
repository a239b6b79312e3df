//! Opaque identifiers for entities and catalog entries.
//!
//! All cross-entity relationships in [`crate::state::GameState`] are expressed
//! as ID references plus indexes, never embedded back-pointers.

use core::fmt;

/// Seat identifier of a player within one game instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u8);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Identifier of a ship entity. Allocated monotonically, never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub u32);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Identifier of a hex tile on the galaxy map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexId(pub u32);

impl fmt::Display for HexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "H{}", self.0)
    }
}

/// The side a ship fights for. Ancient ships form a single neutral
/// pseudo-faction shared by every unowned defender on the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Faction {
    Player(PlayerId),
    Ancients,
}

impl Faction {
    /// The player behind this faction, if any.
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Faction::Player(id) => Some(id),
            Faction::Ancients => None,
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Faction::Player(id) => write!(f, "{id}"),
            Faction::Ancients => write!(f, "ancients"),
        }
    }
}

macro_rules! catalog_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

catalog_id! {
    /// Key into the ship-component catalog (e.g. `electron_drive`).
    ComponentId
}

catalog_id! {
    /// Key into the technology catalog (e.g. `improved_hull`).
    TechId
}

catalog_id! {
    /// Key into the species catalog.
    SpeciesId
}

catalog_id! {
    /// Key into the sector-tile catalog; stamped on hexes at board setup.
    SectorTemplateId
}

catalog_id! {
    /// Key into the discovery-tile catalog.
    DiscoveryId
}
