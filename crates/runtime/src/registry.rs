//! Multi-game directory.
//!
//! Sessions are fully independent; the directory only maps ids to live
//! sessions so a transport layer can route submissions. Lookups return
//! cheap `Arc` clones, so no directory lock is held across a submission.

use std::sync::Arc;

use dashmap::DashMap;

use game_core::{ActionReport, SubmittedAction};

use crate::error::RuntimeError;
use crate::session::{GameId, GameSession, SessionBuilder};

/// Process-wide registry of running games.
#[derive(Default)]
pub struct GameDirectory {
    sessions: DashMap<GameId, Arc<GameSession>>,
}

impl GameDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a session and registers it.
    pub fn create(&self, builder: SessionBuilder) -> Result<Arc<GameSession>, RuntimeError> {
        let session = Arc::new(builder.build()?);
        self.sessions.insert(session.id(), session.clone());
        Ok(session)
    }

    pub fn get(&self, id: GameId) -> Result<Arc<GameSession>, RuntimeError> {
        self.sessions
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or(RuntimeError::GameNotFound(id))
    }

    /// Removes a finished or abandoned game. In-flight submissions holding
    /// the session `Arc` complete normally.
    pub fn remove(&self, id: GameId) -> Result<Arc<GameSession>, RuntimeError> {
        self.sessions
            .remove(&id)
            .map(|(_, session)| session)
            .ok_or(RuntimeError::GameNotFound(id))
    }

    pub fn ids(&self) -> Vec<GameId> {
        self.sessions.iter().map(|entry| *entry.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Routes a submission to its game.
    pub async fn submit_action(
        &self,
        game: GameId,
        submission: SubmittedAction,
    ) -> Result<ActionReport, RuntimeError> {
        let session = self.get(game)?;
        Ok(session.submit_action(submission).await?)
    }
}
