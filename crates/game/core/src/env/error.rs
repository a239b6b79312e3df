//! Oracle availability errors.

use crate::error::{ErrorSeverity, GameError};

/// Raised when the engine needs an oracle the host did not provide.
///
/// Always an engine-wiring bug, never a player error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("catalog oracle not available")]
    CatalogNotAvailable,

    #[error("sector oracle not available")]
    SectorsNotAvailable,

    #[error("colony yield oracle not available")]
    YieldsNotAvailable,

    #[error("dice oracle not available")]
    DiceNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CatalogNotAvailable => "ORACLE_CATALOG_NOT_AVAILABLE",
            Self::SectorsNotAvailable => "ORACLE_SECTORS_NOT_AVAILABLE",
            Self::YieldsNotAvailable => "ORACLE_YIELDS_NOT_AVAILABLE",
            Self::DiceNotAvailable => "ORACLE_DICE_NOT_AVAILABLE",
        }
    }
}
