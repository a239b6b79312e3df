//! Engine error types and execution reports.

use crate::action::{Action, ActionId, Effect, Rejection};
use crate::combat::CombatEncounter;
use crate::env::{Income, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    DiscoveryId, GamePhase, HexId, PlayerId, ResourceKind, ShipClass, ShipId, SpeciesId,
};

/// An invariant broke while applying effects or running phase machinery.
///
/// This is an engine bug, never a player error: the in-flight mutation is
/// abandoned, the state is restored to its pre-action snapshot, and the
/// fault is surfaced as fatal for this game instance.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsistencyFault {
    #[error("ship {ship} referenced by an effect no longer exists")]
    MissingShip { ship: ShipId },

    #[error("hex {hex} referenced by an effect does not exist")]
    MissingHex { hex: HexId },

    #[error("player {player} referenced by an effect does not exist")]
    MissingPlayer { player: PlayerId },

    #[error("player {player} has no blueprint for {class}")]
    MissingBlueprint { player: PlayerId, class: ShipClass },

    #[error("validated debit overdrew {} for {player}", kind.as_str())]
    LedgerOverdraft { player: PlayerId, kind: ResourceKind },

    #[error("validated disc placement found an empty supply for {player}")]
    DiscSupplyEmpty { player: PlayerId },

    #[error("validated cube placement found an empty supply for {player}")]
    CubeSupplyEmpty { player: PlayerId },

    #[error("planet slot {slot} on hex {hex} is unavailable")]
    PlanetSlotUnavailable { hex: HexId, slot: usize },

    #[error("hex {hex} was already revealed")]
    AlreadyRevealed { hex: HexId },

    #[error("ship {ship} missing from the occupancy index of hex {hex}")]
    OccupancyDesync { ship: ShipId, hex: HexId },

    #[error("discovery tile {id} is not in the catalog")]
    UnknownDiscovery { id: DiscoveryId },

    #[error(transparent)]
    OracleUnavailable(#[from] OracleError),
}

impl GameError for ConsistencyFault {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OracleUnavailable(_) => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingShip { .. } => "FAULT_MISSING_SHIP",
            Self::MissingHex { .. } => "FAULT_MISSING_HEX",
            Self::MissingPlayer { .. } => "FAULT_MISSING_PLAYER",
            Self::MissingBlueprint { .. } => "FAULT_MISSING_BLUEPRINT",
            Self::LedgerOverdraft { .. } => "FAULT_LEDGER_OVERDRAFT",
            Self::DiscSupplyEmpty { .. } => "FAULT_DISC_SUPPLY_EMPTY",
            Self::CubeSupplyEmpty { .. } => "FAULT_CUBE_SUPPLY_EMPTY",
            Self::PlanetSlotUnavailable { .. } => "FAULT_PLANET_SLOT_UNAVAILABLE",
            Self::AlreadyRevealed { .. } => "FAULT_ALREADY_REVEALED",
            Self::OccupancyDesync { .. } => "FAULT_OCCUPANCY_DESYNC",
            Self::UnknownDiscovery { .. } => "FAULT_UNKNOWN_DISCOVERY",
            Self::OracleUnavailable(_) => "FAULT_ORACLE_UNAVAILABLE",
        }
    }
}

/// Terminal result of one submission.
#[derive(Clone, Debug, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubmitError {
    /// The action was illegal; nothing changed.
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// The engine broke an invariant; state was restored to the pre-action
    /// snapshot and the instance should be taken out of service.
    #[error(transparent)]
    Fault(#[from] ConsistencyFault),
}

impl SubmitError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Rejected(rejection) => rejection.severity(),
            Self::Fault(fault) => fault.severity(),
        }
    }
}

/// Errors raised while starting a game from the lobby.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("game can only be started from the lobby, current phase is {phase}")]
    NotInLobby { phase: GamePhase },

    #[error("a game needs 2-6 players, got {got}")]
    RosterSize { got: usize },

    #[error("player {player} appears twice in the roster")]
    DuplicatePlayer { player: PlayerId },

    #[error("species {species} is not in the catalog")]
    UnknownSpecies { species: SpeciesId },

    #[error("homeworld hex {hex} for {player} does not exist")]
    MissingHomeworld { player: PlayerId, hex: HexId },

    #[error("homeworld hex {hex} is assigned to two players")]
    HomeworldCollision { hex: HexId },

    #[error(transparent)]
    OracleUnavailable(#[from] OracleError),

    #[error("setup failed applying starting state: {0}")]
    Internal(#[from] ConsistencyFault),
}

/// Per-player settlement summary produced by the Upkeep phase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpkeepReport {
    pub player: PlayerId,
    pub income: Income,
    /// Influence maintenance billed, in money.
    pub maintenance: u32,
    pub bankrupt: bool,
    /// Colonies discarded by the bankruptcy policy, in discard order.
    pub colonies_discarded: Vec<HexId>,
}

/// Final ranking entry. Ties on VP break by remaining money.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Standing {
    pub player: PlayerId,
    pub vp: u32,
    pub money: u32,
}

/// What the Cleanup phase decided.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CleanupOutcome {
    /// Back to Strategy with the round counter advanced.
    NextRound { round: u32 },
    /// An end-game trigger fired; the final tally ran.
    Finished { standings: Vec<Standing> },
}

/// Complete outcome of one applied action, including any phase cascade it
/// triggered.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionReport {
    pub action_id: ActionId,
    pub player: PlayerId,
    /// The action as applied.
    pub action: Action,
    /// The primitive mutations that were applied.
    pub effects: Vec<Effect>,
    /// Battles resolved if this action closed the Strategy phase.
    pub encounters: Vec<CombatEncounter>,
    /// Upkeep settlements if this action closed the Strategy phase.
    pub upkeep: Vec<UpkeepReport>,
    /// Cleanup decision if a cascade ran.
    pub cleanup: Option<CleanupOutcome>,
    /// Phase after everything settled.
    pub new_phase: GamePhase,
    /// Round after everything settled.
    pub round: u32,
}
