//! Action rejection taxonomy.
//!
//! A [`Rejection`] names exactly one violated precondition. It is always a
//! caller-visible, recoverable result: the submitting player picked an
//! illegal action, nothing was mutated, and the turn cursor did not move.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    ComponentId, CubeKind, GamePhase, HexId, PlayerId, ResourceKind, ShipClass, ShipId, TechId,
};

use super::ActionId;

/// Why a submitted action was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    // ---- submission envelope ----
    #[error("actions are not accepted in the {phase} phase")]
    WrongPhase { phase: GamePhase },

    #[error("action {action_id} was already applied")]
    DuplicateAction { action_id: ActionId },

    #[error("player {player} is not part of this game")]
    UnknownPlayer { player: PlayerId },

    #[error("it is not {player}'s turn")]
    NotYourTurn { player: PlayerId },

    // ---- resources ----
    #[error("insufficient {}: need {need}, have {have}", kind.as_str())]
    InsufficientResource {
        kind: ResourceKind,
        need: u32,
        have: u32,
    },

    #[error("no influence discs remaining")]
    NoInfluenceDiscs,

    #[error("no {kind:?} cubes remaining in supply")]
    NoCubeAvailable { kind: CubeKind },

    // ---- board references ----
    #[error("hex {hex} does not exist")]
    UnknownHex { hex: HexId },

    #[error("ship {ship} does not exist")]
    UnknownShip { ship: ShipId },

    #[error("ship {ship} does not belong to {player}")]
    ShipNotOwned { ship: ShipId, player: PlayerId },

    #[error("ship {ship} is not on the board")]
    ShipAdrift { ship: ShipId },

    // ---- exploration / influence ----
    #[error("hex {hex} has already been explored")]
    HexAlreadyExplored { hex: HexId },

    #[error("hex {hex} has not been explored")]
    HexNotExplored { hex: HexId },

    #[error("hex {hex} is already claimed by {owner}")]
    HexOwnedByOther { hex: HexId, owner: PlayerId },

    #[error("no ship of {player} present on hex {hex}")]
    NoShipPresent { hex: HexId, player: PlayerId },

    #[error("influence on an owned hex requires a planet slot")]
    PlanetSlotRequired,

    #[error("planet slot {slot} is out of range for hex {hex}")]
    PlanetSlotOutOfRange { hex: HexId, slot: usize },

    #[error("planet slot {slot} on hex {hex} is already occupied")]
    PlanetSlotOccupied { hex: HexId, slot: usize },

    // ---- build / upgrade ----
    #[error("hex {hex} is not controlled by {player}")]
    NotHexOwner { hex: HexId, player: PlayerId },

    #[error("hex {hex} is not a legal build site")]
    NotBuildSite { hex: HexId },

    #[error("{class} construction requires technology {tech}")]
    ClassLocked { class: ShipClass, tech: TechId },

    #[error("{class} blueprint has a power deficit; upgrade it before building")]
    BlueprintInvalid { class: ShipClass },

    #[error("hex {hex} already holds the maximum stack of {cap} ships")]
    StackCapExceeded { hex: HexId, cap: usize },

    #[error("blueprint for {class} expects {expected} slots, got {got}")]
    SlotArityMismatch {
        class: ShipClass,
        expected: usize,
        got: usize,
    },

    #[error("component {component} does not exist")]
    UnknownComponent { component: ComponentId },

    #[error("component {component} requires technology {tech}")]
    ComponentLocked { component: ComponentId, tech: TechId },

    #[error("blueprint power balance is {balance}; it must be non-negative")]
    PowerDeficit { balance: i64 },

    // ---- research ----
    #[error("technology {tech} does not exist")]
    UnknownTech { tech: TechId },

    #[error("technology {tech} is obtained only through discoveries")]
    TechNotResearchable { tech: TechId },

    #[error("technology {tech} is already owned")]
    TechAlreadyOwned { tech: TechId },

    #[error("technology {tech} requires prerequisite {prerequisite}")]
    MissingPrerequisite { tech: TechId, prerequisite: TechId },

    // ---- movement ----
    #[error("a move must list at least one ship")]
    NoShipsListed,

    #[error("moved ships must start in the same hex")]
    ShipsScattered,

    #[error("{class} is immobile")]
    ShipImmobile { class: ShipClass },

    #[error("a move path must contain at least one hex")]
    EmptyPath,

    #[error("path length {length} exceeds the fleet's drive rating {rating}")]
    PathTooLong { length: usize, rating: usize },

    #[error("no wormhole connection from {from} to {to}")]
    DisconnectedPath { from: HexId, to: HexId },
}

impl Rejection {
    /// Stable machine-readable reason code, one per violated precondition.
    pub fn reason(&self) -> &'static str {
        use Rejection::*;
        match self {
            WrongPhase { .. } => "wrong_phase",
            DuplicateAction { .. } => "duplicate_action",
            UnknownPlayer { .. } => "unknown_player",
            NotYourTurn { .. } => "not_your_turn",
            InsufficientResource { kind, .. } => match kind {
                ResourceKind::Money => "insufficient_money",
                ResourceKind::Science => "insufficient_science",
                ResourceKind::Materials => "insufficient_materials",
            },
            NoInfluenceDiscs => "no_influence_discs",
            NoCubeAvailable { .. } => "no_cube_available",
            UnknownHex { .. } => "unknown_hex",
            UnknownShip { .. } => "unknown_ship",
            ShipNotOwned { .. } => "ship_not_owned",
            ShipAdrift { .. } => "ship_adrift",
            HexAlreadyExplored { .. } => "hex_already_explored",
            HexNotExplored { .. } => "hex_not_explored",
            HexOwnedByOther { .. } => "hex_owned_by_other",
            NoShipPresent { .. } => "no_ship_present",
            PlanetSlotRequired => "planet_slot_required",
            PlanetSlotOutOfRange { .. } => "planet_slot_out_of_range",
            PlanetSlotOccupied { .. } => "planet_slot_occupied",
            NotHexOwner { .. } => "not_hex_owner",
            NotBuildSite { .. } => "not_build_site",
            ClassLocked { .. } => "class_locked",
            BlueprintInvalid { .. } => "blueprint_invalid",
            StackCapExceeded { .. } => "stack_cap_exceeded",
            SlotArityMismatch { .. } => "slot_arity_mismatch",
            UnknownComponent { .. } => "unknown_component",
            ComponentLocked { .. } => "component_locked",
            PowerDeficit { .. } => "power_deficit",
            UnknownTech { .. } => "unknown_tech",
            TechNotResearchable { .. } => "tech_not_researchable",
            TechAlreadyOwned { .. } => "tech_already_owned",
            MissingPrerequisite { .. } => "missing_prerequisite",
            NoShipsListed => "no_ships_listed",
            ShipsScattered => "ships_scattered",
            ShipImmobile { .. } => "ship_immobile",
            EmptyPath => "empty_path",
            PathTooLong { .. } => "path_too_long",
            DisconnectedPath { .. } => "disconnected_path",
        }
    }
}

impl GameError for Rejection {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Rejection::NotYourTurn { .. } | Rejection::WrongPhase { .. } => {
                ErrorSeverity::Recoverable
            }
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        self.reason()
    }
}
