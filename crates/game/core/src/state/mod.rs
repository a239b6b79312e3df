//! Authoritative game state representation.
//!
//! This module owns the data structures that describe players, ships, hexes,
//! and turn bookkeeping. Host layers clone or query this state but mutate it
//! exclusively through [`crate::engine::GameEngine`].
//!
//! Entity relationships are arenas keyed by opaque ids plus indexes
//! (hex → ship-id set, player → ship-id set); there are no embedded
//! back-pointers, so the Ship ↔ Hex ↔ Player cycle never materializes.
pub mod fleet;
pub mod ids;
pub mod log;
pub mod map;
pub mod player;
pub mod turn;

use std::collections::{BTreeMap, BTreeSet};

pub use fleet::{FleetState, ShipClass, ShipState};
pub use ids::{
    ComponentId, DiscoveryId, Faction, HexId, PlayerId, SectorTemplateId, ShipId, SpeciesId,
    TechId,
};
pub use log::{ActionLog, ActionRecord};
pub use map::{AxialCoord, HexKind, HexState, MapState, PlacedCube, PlanetKind, PlanetSlot};
pub use player::{
    Blueprint, CubeKind, InfluenceTrack, PlayerState, PopulationStock, ResourceKind, Resources,
    VpBreakdown,
};
pub use turn::TurnState;

use crate::combat::CombatEncounter;
use crate::config::RulesConfig;

/// Life-cycle phases of a game instance.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    Lobby,
    Strategy,
    Combat,
    Upkeep,
    Cleanup,
    Finished,
}

/// Canonical snapshot of one game instance.
///
/// Owned exclusively by the turn engine; every mutation flows through its
/// entry points so that no caller can observe a partially-applied action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed fixed at game creation; combined with `nonce` to derive
    /// per-event seeds.
    pub game_seed: u64,

    /// Numeric rule-table for this instance, fixed at creation.
    pub config: RulesConfig,

    /// Action sequence counter. Increments once per applied action.
    pub nonce: u64,

    /// Current round, starting at 1 once the game leaves the lobby.
    pub round: u32,

    pub phase: GamePhase,
    pub turn: TurnState,
    pub players: BTreeMap<PlayerId, PlayerState>,
    pub map: MapState,
    pub fleet: FleetState,

    /// Hexes flagged for the upcoming Combat phase by MOVE/EXPLORE. The
    /// combat resolver re-derives the authoritative set; this flag exists
    /// for clients to render pending battles.
    pub contested: BTreeSet<HexId>,

    /// Append-only history of applied actions.
    pub log: ActionLog,

    /// Immutable battle records, in resolution order.
    pub encounters: Vec<CombatEncounter>,

    /// How many discovery tiles have been drawn from the deck.
    pub discovery_drawn: usize,
}

impl GameState {
    /// A lobby-phase skeleton over a generated board. Players, ships, and
    /// ownership arrive via [`crate::engine::GameEngine::start_game`].
    pub fn new(game_seed: u64, map: MapState) -> Self {
        Self::with_config(game_seed, map, RulesConfig::default())
    }

    /// Same as [`GameState::new`] with a variant rule-table.
    pub fn with_config(game_seed: u64, map: MapState, config: RulesConfig) -> Self {
        Self {
            game_seed,
            config,
            nonce: 0,
            round: 0,
            phase: GamePhase::Lobby,
            turn: TurnState::new(Vec::new()),
            players: BTreeMap::new(),
            map,
            fleet: FleetState::new(),
            contested: BTreeSet::new(),
            log: ActionLog::new(),
            encounters: Vec::new(),
            discovery_drawn: 0,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.get(&id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(&id)
    }

    /// Distinct factions with ships present on a hex.
    pub fn factions_on_hex(&self, hex: HexId) -> BTreeSet<Faction> {
        let Some(hex_state) = self.map.hex(hex) else {
            return BTreeSet::new();
        };
        hex_state
            .ships
            .iter()
            .filter_map(|&id| self.fleet.ship(id))
            .map(ShipState::faction)
            .collect()
    }

    /// Hexes where ships of two or more factions share space, in id order.
    /// This is the authoritative contest detection used by the Combat phase.
    pub fn contested_hexes(&self) -> Vec<HexId> {
        self.map
            .hexes()
            .filter(|hex| self.factions_on_hex(hex.id).len() >= 2)
            .map(|hex| hex.id)
            .collect()
    }

    /// Number of `player`'s ships on `hex`.
    pub fn faction_stack_on_hex(&self, hex: HexId, player: PlayerId) -> usize {
        self.map
            .hex(hex)
            .map(|hex_state| {
                hex_state
                    .ships
                    .iter()
                    .filter_map(|&id| self.fleet.ship(id))
                    .filter(|ship| ship.owner == Some(player))
                    .count()
            })
            .unwrap_or(0)
    }

    /// Deterministic digest of the full state.
    ///
    /// BTree-backed collections serialize in a canonical order, so two equal
    /// states always produce the same digest. Used by tests to prove that a
    /// rejected action left the state byte-identical.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self).expect("game state is always serializable");
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        hasher.finalize().into()
    }
}
