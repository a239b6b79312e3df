//! Action domain: the seven player actions, their payloads, legality rules,
//! and the effects they compile into.
//!
//! Validation is pure: `validate` inspects state and oracles, then either
//! returns the complete list of primitive [`Effect`] mutations or a
//! [`Rejection`] naming the one violated precondition. Application happens
//! in the engine; a validator never touches state.
//!
//! # Module Structure
//!
//! - `error`: the rejection taxonomy with stable reason codes
//! - `effect`: primitive mutation list applied by the engine
//! - one module per action type with its payload and legality rules

pub mod build;
pub mod effect;
pub mod error;
pub mod explore;
pub mod influence;
pub mod movement;
pub mod pass;
pub mod research;
pub mod upgrade;

use core::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::engine::ConsistencyFault;
use crate::env::{GameEnv, OracleError};
use crate::state::{GameState, PlayerId};

pub use build::BuildAction;
pub use effect::{Effect, VpSource};
pub use error::Rejection;
pub use explore::ExploreAction;
pub use influence::InfluenceAction;
pub use movement::MoveAction;
pub use research::ResearchAction;
pub use upgrade::UpgradeAction;

/// Client-generated idempotency key for one submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionId(pub Uuid);

impl ActionId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A player action with its typed payload.
///
/// The tagged representation keeps validator dispatch exhaustive: adding an
/// action type without a legality rule is a compile error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Explore(ExploreAction),
    Influence(InfluenceAction),
    Build(BuildAction),
    Research(ResearchAction),
    Move(MoveAction),
    Upgrade(UpgradeAction),
    Pass,
}

impl Action {
    /// Snake_case name used in logs and event payloads.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Action::Explore(_) => "explore",
            Action::Influence(_) => "influence",
            Action::Build(_) => "build",
            Action::Research(_) => "research",
            Action::Move(_) => "move",
            Action::Upgrade(_) => "upgrade",
            Action::Pass => "pass",
        }
    }
}

/// The submission envelope: who, when, and the idempotency key.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubmittedAction {
    pub action_id: ActionId,
    pub player: PlayerId,
    /// Caller-observed submission time; recorded verbatim.
    pub submitted_at: DateTime<Utc>,
    pub action: Action,
}

impl SubmittedAction {
    pub fn new(player: PlayerId, submitted_at: DateTime<Utc>, action: Action) -> Self {
        Self {
            action_id: ActionId::random(),
            player,
            submitted_at,
            action,
        }
    }
}

/// Validation outcome distinct from success: either the player made an
/// illegal request, or the engine's own wiring is broken.
#[derive(Debug)]
pub enum ValidationFailure {
    Rejected(Rejection),
    Fault(ConsistencyFault),
}

impl From<Rejection> for ValidationFailure {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected(rejection)
    }
}

impl From<ConsistencyFault> for ValidationFailure {
    fn from(fault: ConsistencyFault) -> Self {
        Self::Fault(fault)
    }
}

impl From<OracleError> for ValidationFailure {
    fn from(error: OracleError) -> Self {
        Self::Fault(ConsistencyFault::OracleUnavailable(error))
    }
}

/// Single validator entry point: dispatches by action type and returns the
/// complete effect list or the first violated precondition.
///
/// Phase, turn-order, and duplicate checks happen in the engine before this
/// is reached; handlers check only their own preconditions.
pub fn validate(
    state: &GameState,
    env: &GameEnv<'_>,
    player: PlayerId,
    action: &Action,
) -> Result<Vec<Effect>, ValidationFailure> {
    match action {
        Action::Explore(payload) => explore::validate(state, env, player, payload),
        Action::Influence(payload) => influence::validate(state, env, player, payload),
        Action::Build(payload) => build::validate(state, env, player, payload),
        Action::Research(payload) => research::validate(state, env, player, payload),
        Action::Move(payload) => movement::validate(state, env, player, payload),
        Action::Upgrade(payload) => upgrade::validate(state, env, player, payload),
        Action::Pass => pass::validate(state, player),
    }
}
