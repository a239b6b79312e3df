//! Runtime-level errors.

use game_core::{SetupError, SubmitError};

use crate::session::GameId;

/// Errors surfaced by the session registry and session construction.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("game {0} not found")]
    GameNotFound(GameId),

    #[error("session setup failed: {0}")]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error("session builder is missing a board")]
    MissingBoard,

    #[error("session builder is missing a roster")]
    MissingRoster,
}
