//! Host layer for game instances.
//!
//! Each [`GameSession`] owns one authoritative [`game_core::GameState`]
//! behind an exclusive async lock: validating and applying a submission,
//! including any phase cascade it triggers, happens entirely inside the
//! lock, and event broadcast happens after release. Many independent
//! sessions run side by side in a [`GameDirectory`]; they share nothing but
//! the immutable catalogs.
//!
//! Transport, persistence, and authentication live above this crate.

mod error;
mod events;
mod registry;
mod session;

pub use error::RuntimeError;
pub use events::GameEvent;
pub use registry::GameDirectory;
pub use session::{GameId, GameSession, OracleSet, SessionBuilder, SessionConfig};
