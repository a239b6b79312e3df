//! Deterministic rules engine for an asynchronous 4X strategy board game.
//!
//! `game-core` defines the canonical rules (actions, combat, phase machine,
//! world state) and exposes pure APIs that can be reused by servers and
//! offline tools. All state mutation flows through [`engine::GameEngine`],
//! and supporting crates depend on the types re-exported here.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

#[cfg(test)]
pub(crate) mod testkit;

pub use action::{
    Action, ActionId, BuildAction, Effect, ExploreAction, InfluenceAction, MoveAction,
    Rejection, ResearchAction, SubmittedAction, UpgradeAction, VpSource,
};
pub use combat::{
    CombatEncounter, CombatOutcome, CombatShip, EncounterSide, KillRecord, RetreatEvent,
    ShotRecord, Volley, VolleyKind, WeaponKind, WeaponMount, max_hull,
};
pub use config::RulesConfig;
pub use engine::{
    ActionReport, BoardSetup, CleanupOutcome, ConsistencyFault, GameEngine, HexSetup, PlayerSeat,
    SetupError, Standing, SubmitError, UpkeepReport,
};
pub use env::{
    AncientKind, AncientSpec, CatalogOracle, ColonyYieldOracle, ComponentCategory, ComponentSpec,
    DiceOracle, DiscoveryEffect, DiscoverySpec, Env, GameEnv, HoldTheLine, Income, OracleError,
    PcgDice, PlanetSpec, RetreatDoctrine, ScriptedDice, SectorOracle, SectorSpec, ShipClassSpec,
    SpeciesSpec, TechCategory, TechEffect, TechSpec, blueprint_power_valid, compute_seed,
    power_balance,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use state::{
    ActionLog, ActionRecord, AxialCoord, Blueprint, ComponentId, CubeKind, DiscoveryId, Faction,
    FleetState, GamePhase, GameState, HexId, HexKind, HexState, InfluenceTrack, MapState,
    PlacedCube, PlanetKind, PlanetSlot, PlayerId, PlayerState, PopulationStock, ResourceKind,
    Resources, SectorTemplateId, ShipClass, ShipId, ShipState, SpeciesId, TechId, TurnState,
    VpBreakdown,
};
