//! Common error infrastructure for game-core.
//!
//! Domain-specific errors ([`crate::action::Rejection`],
//! [`crate::engine::ConsistencyFault`], oracle errors) are defined next to the
//! code that raises them; this module provides the shared classification
//! layer the runtime uses to decide how to surface a failure.

use crate::state::{HexId, PlayerId};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: temporary conditions that may succeed with a different
///   action (wrong turn, already passed)
/// - **Validation**: illegal input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: unrecoverable errors indicating a corrupted game instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the submitter can retry with a different action.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    Validation,

    /// Internal error - unexpected state inconsistency. Indicates a bug.
    Internal,

    /// Fatal error - game state corrupted, the instance cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable by the caller.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    /// Returns true if this error indicates an engine bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
///
/// Captured at the point of error creation; correlates the failure with a
/// specific point in the action sequence.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Player that triggered the error (if applicable).
    pub player: Option<PlayerId>,

    /// Hex where the error occurred (if applicable).
    pub hex: Option<HexId>,

    /// Engine nonce at the time of the error.
    ///
    /// The nonce uniquely identifies the action sequence position and is
    /// useful for correlating errors with specific game states in logs.
    pub nonce: u64,
}

impl ErrorContext {
    /// Creates a new error context with the given nonce.
    #[must_use]
    pub const fn new(nonce: u64) -> Self {
        Self {
            player: None,
            hex: None,
            nonce,
        }
    }

    /// Attaches a player to this context (builder pattern).
    #[must_use]
    pub const fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    /// Attaches a hex to this context (builder pattern).
    #[must_use]
    pub const fn with_hex(mut self, hex: HexId) -> Self {
        self.hex = Some(hex);
        self
    }
}

/// Common trait for all game-core errors.
///
/// Provides a uniform interface for error classification across the crate.
/// Implementors derive Display/Error via `thiserror` and classify severity
/// by recoverability, not impact.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
