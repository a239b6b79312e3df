//! Galaxy map state: axial hex geometry, wormhole connectivity, ownership,
//! and the per-hex ship presence index.

use std::collections::{BTreeMap, BTreeSet};

use super::{CubeKind, HexId, PlayerId, SectorTemplateId, ShipId};

/// Two-integer axial addressing for the hex grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

/// Axial direction vectors, indexed by edge 0..6 (pointy-top orientation).
const DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

impl AxialCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The neighbor across edge `direction` (0..6).
    pub fn neighbor(self, direction: u8) -> Self {
        let (dq, dr) = DIRECTIONS[direction as usize % 6];
        Self::new(self.q + dq, self.r + dr)
    }

    /// Edge index (0..6) pointing from `self` to `other`, if adjacent.
    pub fn direction_to(self, other: Self) -> Option<u8> {
        let delta = (other.q - self.q, other.r - self.r);
        DIRECTIONS
            .iter()
            .position(|&d| d == delta)
            .map(|index| index as u8)
    }

    /// The edge on the far side of a shared boundary.
    pub fn opposite_edge(direction: u8) -> u8 {
        (direction + 3) % 6
    }
}

/// Board role of a hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HexKind {
    /// A player's starting sector; always a legal build site for its owner.
    Homeworld,
    Standard,
    /// The galactic center, guarded by the GCDS.
    Center,
}

/// Planet resource types that colony cubes can occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlanetKind {
    Money,
    Science,
    Materials,
}

impl PlanetKind {
    /// The population cube color this planet accepts.
    pub fn cube_kind(self) -> CubeKind {
        match self {
            PlanetKind::Money => CubeKind::Orbital,
            PlanetKind::Science => CubeKind::Advanced,
            PlanetKind::Materials => CubeKind::Gauss,
        }
    }
}

/// A population cube sitting on a planet slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedCube {
    pub owner: PlayerId,
    pub kind: CubeKind,
    /// Round the cube was placed; bankruptcy discards newest-first on value
    /// ties.
    pub placed_round: u32,
}

/// One planet slot in a revealed sector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanetSlot {
    pub kind: PlanetKind,
    /// Advanced planets yield double income.
    pub advanced: bool,
    pub cube: Option<PlacedCube>,
}

impl PlanetSlot {
    pub fn new(kind: PlanetKind, advanced: bool) -> Self {
        Self {
            kind,
            advanced,
            cube: None,
        }
    }
}

/// One hex tile. Ownership changes only via INFLUENCE (and bankruptcy);
/// ship presence changes via MOVE/BUILD/combat destruction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexState {
    pub id: HexId,
    pub coord: AxialCoord,
    pub kind: HexKind,
    /// Sector-catalog template stamped at board generation; consulted when
    /// the hex is revealed by EXPLORE.
    pub template: Option<SectorTemplateId>,
    pub explored: bool,
    /// Sector name, filled in on reveal.
    pub name: Option<String>,
    pub owner: Option<PlayerId>,
    /// Edges (0..6) carrying a wormhole. Fixed at board generation.
    pub wormholes: BTreeSet<u8>,
    /// Filled in when the hex is revealed.
    pub planets: Vec<PlanetSlot>,
    /// Whether revealing this hex draws a discovery tile.
    pub has_discovery: bool,
    /// Presence index; authoritative ship records live in the fleet arena.
    pub ships: BTreeSet<ShipId>,
}

impl HexState {
    /// Rounds since colonization matter for bankruptcy; the newest cube on
    /// the hex dates the colony.
    pub fn colonized_round(&self) -> Option<u32> {
        self.planets
            .iter()
            .filter_map(|slot| slot.cube.map(|cube| cube.placed_round))
            .max()
    }
}

/// The hex arena plus connectivity queries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapState {
    hexes: BTreeMap<HexId, HexState>,
}

impl MapState {
    pub fn new(hexes: BTreeMap<HexId, HexState>) -> Self {
        Self { hexes }
    }

    pub fn hex(&self, id: HexId) -> Option<&HexState> {
        self.hexes.get(&id)
    }

    pub fn hex_mut(&mut self, id: HexId) -> Option<&mut HexState> {
        self.hexes.get_mut(&id)
    }

    pub fn hexes(&self) -> impl Iterator<Item = &HexState> {
        self.hexes.values()
    }

    pub fn hex_at(&self, coord: AxialCoord) -> Option<&HexState> {
        self.hexes.values().find(|hex| hex.coord == coord)
    }

    /// Whether two hexes are adjacent and share a wormhole on the common
    /// edge. This is the only notion of reachability in the game: EXPLORE,
    /// MOVE paths, and combat retreats all step through connected edges.
    pub fn connected(&self, from: HexId, to: HexId) -> bool {
        let (Some(a), Some(b)) = (self.hex(from), self.hex(to)) else {
            return false;
        };
        let Some(direction) = a.coord.direction_to(b.coord) else {
            return false;
        };
        a.wormholes.contains(&direction)
            && b.wormholes.contains(&AxialCoord::opposite_edge(direction))
    }

    /// Hexes owned by `player`, in id order.
    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = &HexState> {
        self.hexes
            .values()
            .filter(move |hex| hex.owner == Some(player))
    }
}
