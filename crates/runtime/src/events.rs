//! Session event stream.
//!
//! Events are broadcast after the per-game lock is released, so a slow
//! subscriber can never stall another player's submission. Subscribers that
//! fall behind lose oldest events first (tokio broadcast semantics); the
//! authoritative record is always the game state and its logs.

use game_core::{
    Action, ActionId, CombatOutcome, GamePhase, HexId, PlayerId, Standing,
};

use crate::session::GameId;

/// What happened in a session, for observers (notification fan-out, UIs,
/// spectator feeds).
#[derive(Clone, Debug, serde::Serialize)]
pub enum GameEvent {
    /// A legal action was applied.
    ActionApplied {
        game: GameId,
        action_id: ActionId,
        player: PlayerId,
        action: Action,
        new_phase: GamePhase,
        round: u32,
    },

    /// A submission was refused; state is untouched.
    ActionRejected {
        game: GameId,
        player: PlayerId,
        reason: &'static str,
    },

    /// A battle resolved during a phase cascade.
    CombatResolved {
        game: GameId,
        hex: HexId,
        round: u32,
        outcome: CombatOutcome,
    },

    /// A new round opened after Cleanup.
    RoundStarted { game: GameId, round: u32 },

    /// The game reached its conclusion.
    GameFinished {
        game: GameId,
        standings: Vec<Standing>,
    },
}
