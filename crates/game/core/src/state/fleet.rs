//! Ship arena and class definitions.

use std::collections::BTreeMap;

use crate::env::AncientKind;

use super::{Faction, HexId, PlayerId, ShipId};

/// The four buildable hull classes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::AsRefStr,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipClass {
    Interceptor,
    Cruiser,
    Dreadnought,
    Starbase,
}

/// One ship on the board.
///
/// `hp_remaining` is bounded by the blueprint hull; at zero the ship is
/// destroyed and removed from the arena by the combat resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipState {
    pub id: ShipId,
    /// `None` marks an ancient/guardian ship.
    pub owner: Option<PlayerId>,
    pub class: ShipClass,
    pub hex: Option<HexId>,
    pub hp_remaining: u32,
    /// Set for neutral defenders; selects their fixed stat block.
    pub ancient: Option<AncientKind>,
}

impl ShipState {
    pub fn faction(&self) -> Faction {
        match self.owner {
            Some(player) => Faction::Player(player),
            None => Faction::Ancients,
        }
    }

    pub fn is_ancient(&self) -> bool {
        self.ancient.is_some()
    }
}

/// Arena of all ships in one game, keyed by opaque id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetState {
    ships: BTreeMap<ShipId, ShipState>,
    next_ship_id: u32,
}

impl FleetState {
    pub fn new() -> Self {
        Self {
            ships: BTreeMap::new(),
            next_ship_id: 1,
        }
    }

    pub fn ship(&self, id: ShipId) -> Option<&ShipState> {
        self.ships.get(&id)
    }

    pub fn ship_mut(&mut self, id: ShipId) -> Option<&mut ShipState> {
        self.ships.get_mut(&id)
    }

    pub fn ships(&self) -> impl Iterator<Item = &ShipState> {
        self.ships.values()
    }

    /// Allocates a fresh id. Ids are never reused, so encounter logs stay
    /// unambiguous after destruction.
    pub fn allocate_id(&mut self) -> ShipId {
        let id = ShipId(self.next_ship_id);
        self.next_ship_id += 1;
        id
    }

    pub fn insert(&mut self, ship: ShipState) {
        self.ships.insert(ship.id, ship);
    }

    pub fn remove(&mut self, id: ShipId) -> Option<ShipState> {
        self.ships.remove(&id)
    }
}

impl Default for FleetState {
    fn default() -> Self {
        Self::new()
    }
}
