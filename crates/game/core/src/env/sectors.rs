//! Sector-tile and discovery-tile oracle.
//!
//! The galaxy map arrives from the external generator as a skeleton of hexes
//! stamped with sector-template ids; this oracle resolves those templates
//! when EXPLORE reveals a hex, and serves the pre-shuffled discovery deck.

use crate::state::{DiscoveryId, PlanetKind, SectorTemplateId, ShipClass};

use super::AncientKind;

/// One planet in a sector template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanetSpec {
    pub kind: PlanetKind,
    pub advanced: bool,
}

/// Static contents of a sector tile, revealed on exploration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectorSpec {
    pub id: SectorTemplateId,
    pub name: String,
    pub planets: Vec<PlanetSpec>,
    /// Ancient defenders spawned when the sector is revealed.
    pub ancients: Vec<AncientKind>,
    /// Whether revealing this sector draws a discovery tile.
    pub has_discovery: bool,
}

impl SectorSpec {
    /// Fallback for hexes seeded without a template: empty space.
    pub fn empty(id: SectorTemplateId) -> Self {
        Self {
            id,
            name: "Deep Space".to_owned(),
            planets: Vec::new(),
            ancients: Vec::new(),
            has_discovery: false,
        }
    }
}

/// What a discovery tile does when drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiscoveryEffect {
    Money(u32),
    Science(u32),
    Materials(u32),
    /// Immediate VP award.
    VictoryPoints(u32),
    /// A derelict hull the explorer reactivates under their own flag.
    DerelictShip(ShipClass),
    /// Empty space; the draw yields nothing.
    Nothing,
}

/// One entry in the discovery-tile catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscoverySpec {
    pub id: DiscoveryId,
    pub name: String,
    pub effect: DiscoveryEffect,
}

/// Read-only access to sector templates and the discovery deck.
pub trait SectorOracle: Send + Sync {
    fn sector(&self, id: &SectorTemplateId) -> Option<&SectorSpec>;

    fn discovery(&self, id: &DiscoveryId) -> Option<&DiscoverySpec>;

    /// The discovery deck in draw order. The engine tracks the draw cursor
    /// in game state; an exhausted deck simply yields nothing further.
    fn discovery_deck(&self) -> &[DiscoveryId];
}
