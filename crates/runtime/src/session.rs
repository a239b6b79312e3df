//! One running game instance.
//!
//! The session owns the authoritative state behind a `tokio::sync::Mutex`.
//! Submission holds the lock for validate + apply + cascade; queries take
//! the lock only long enough to clone a consistent snapshot. No I/O happens
//! inside the lock.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, warn};
use uuid::Uuid;

use game_core::{
    Action, ActionReport, BoardSetup, CatalogOracle, CleanupOutcome, ColonyYieldOracle,
    DiceOracle, Env, GameEngine, GameEnv, GameState, HoldTheLine, PcgDice, PlayerId,
    PlayerSeat, RetreatDoctrine, RulesConfig, SectorOracle, SubmitError, SubmittedAction,
};
use game_content::{Catalogs, StandardYields};

use crate::error::RuntimeError;
use crate::events::GameEvent;

/// Identifier of one game instance inside the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct GameId(pub Uuid);

impl GameId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The injected read-only collaborators, shareable across sessions.
#[derive(Clone)]
pub struct OracleSet {
    pub catalog: Arc<dyn CatalogOracle>,
    pub sectors: Arc<dyn SectorOracle>,
    pub yields: Arc<dyn ColonyYieldOracle>,
    pub dice: Arc<dyn DiceOracle>,
    pub retreat: Arc<dyn RetreatDoctrine>,
}

impl OracleSet {
    /// Standard rules: built-in catalogs, standard yields, PCG dice, no
    /// retreats.
    pub fn standard() -> Self {
        let catalogs = Arc::new(Catalogs::standard());
        Self {
            catalog: catalogs.clone(),
            sectors: catalogs,
            yields: Arc::new(StandardYields),
            dice: Arc::new(PcgDice),
            retreat: Arc::new(HoldTheLine),
        }
    }

    fn env(&self) -> GameEnv<'_> {
        Env::new(
            Some(self.catalog.as_ref()),
            Some(self.sectors.as_ref()),
            Some(self.yields.as_ref()),
            Some(self.dice.as_ref()),
            Some(self.retreat.as_ref()),
        )
    }
}

/// Tunables for one session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub event_buffer_size: usize,
    /// Fixed seed for replayable games; `None` draws a random one.
    pub game_seed: Option<u64>,
    pub rules: RulesConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 128,
            game_seed: None,
            rules: RulesConfig::default(),
        }
    }
}

/// Builder for [`GameSession`] with flexible configuration.
pub struct SessionBuilder {
    config: SessionConfig,
    oracles: Option<OracleSet>,
    board: Option<BoardSetup>,
    roster: Vec<PlayerSeat>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            oracles: None,
            board: None,
            roster: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_oracles(mut self, oracles: OracleSet) -> Self {
        self.oracles = Some(oracles);
        self
    }

    pub fn with_board(mut self, board: BoardSetup) -> Self {
        self.board = Some(board);
        self
    }

    pub fn with_seat(mut self, seat: PlayerSeat) -> Self {
        self.roster.push(seat);
        self
    }

    pub fn with_roster(mut self, roster: impl IntoIterator<Item = PlayerSeat>) -> Self {
        self.roster.extend(roster);
        self
    }

    /// Creates the session and starts the game (Lobby → Strategy).
    pub fn build(self) -> Result<GameSession, RuntimeError> {
        let board = self.board.ok_or(RuntimeError::MissingBoard)?;
        if self.roster.is_empty() {
            return Err(RuntimeError::MissingRoster);
        }
        let oracles = self.oracles.unwrap_or_else(OracleSet::standard);
        let seed = self.config.game_seed.unwrap_or_else(rand::random);

        let mut state =
            GameState::with_config(seed, board.into_map(), self.config.rules.clone());
        GameEngine::new(&mut state).start_game(&oracles.env(), &self.roster)?;

        let id = GameId::random();
        let (events, _) = broadcast::channel(self.config.event_buffer_size);
        info!(game = %id, players = self.roster.len(), seed, "game session started");
        Ok(GameSession {
            id,
            state: Mutex::new(state),
            oracles,
            events,
        })
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A single game instance: authoritative state plus its lock and event
/// stream.
pub struct GameSession {
    id: GameId,
    state: Mutex<GameState>,
    oracles: OracleSet,
    events: broadcast::Sender<GameEvent>,
}

impl GameSession {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    /// Subscribe to this session's event stream.
    pub fn subscribe_events(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// Submits one action for `player`, stamping the submission envelope.
    ///
    /// Serialized per session: the exclusive lock covers validation, effect
    /// application, and any phase cascade. The same action id submitted
    /// twice is rejected the second time.
    pub async fn submit_action(
        &self,
        submission: SubmittedAction,
    ) -> Result<ActionReport, SubmitError> {
        let player = submission.player;
        let action_name = submission.action.as_snake_case();
        debug!(game = %self.id, %player, action = action_name, "submission received");

        let result = {
            let mut state = self.state.lock().await;
            GameEngine::new(&mut state).submit(&self.oracles.env(), submission)
        };

        // Lock released; fan events out to observers.
        match &result {
            Ok(report) => {
                info!(
                    game = %self.id,
                    %player,
                    action = action_name,
                    phase = %report.new_phase,
                    round = report.round,
                    "action applied"
                );
                self.publish_report(report);
            }
            Err(SubmitError::Rejected(rejection)) => {
                warn!(
                    game = %self.id,
                    %player,
                    action = action_name,
                    reason = rejection.reason(),
                    "action rejected"
                );
                let _ = self.events.send(GameEvent::ActionRejected {
                    game: self.id,
                    player,
                    reason: rejection.reason(),
                });
            }
            Err(SubmitError::Fault(fault)) => {
                tracing::error!(
                    game = %self.id,
                    %player,
                    action = action_name,
                    %fault,
                    "consistency fault; state restored to last known-good snapshot"
                );
            }
        }
        result
    }

    /// Convenience wrapper: stamps an envelope with the current time and a
    /// fresh action id.
    pub async fn submit(
        &self,
        player: PlayerId,
        action: Action,
    ) -> Result<ActionReport, SubmitError> {
        self.submit_action(SubmittedAction::new(player, chrono::Utc::now(), action))
            .await
    }

    /// Read-only snapshot, consistent by construction: the clone happens
    /// under the lock, never mid-mutation.
    pub async fn query_state(&self) -> GameState {
        self.state.lock().await.clone()
    }

    /// Snapshot serialized for transport layers.
    pub async fn query_state_json(&self) -> serde_json::Value {
        let snapshot = self.query_state().await;
        serde_json::to_value(&snapshot).expect("game state serializes to JSON")
    }

    fn publish_report(&self, report: &ActionReport) {
        let _ = self.events.send(GameEvent::ActionApplied {
            game: self.id,
            action_id: report.action_id,
            player: report.player,
            action: report.action.clone(),
            new_phase: report.new_phase,
            round: report.round,
        });
        for encounter in &report.encounters {
            let _ = self.events.send(GameEvent::CombatResolved {
                game: self.id,
                hex: encounter.hex,
                round: encounter.round,
                outcome: encounter.outcome,
            });
        }
        match &report.cleanup {
            Some(CleanupOutcome::NextRound { round }) => {
                let _ = self.events.send(GameEvent::RoundStarted {
                    game: self.id,
                    round: *round,
                });
            }
            Some(CleanupOutcome::Finished { standings }) => {
                let _ = self.events.send(GameEvent::GameFinished {
                    game: self.id,
                    standings: standings.clone(),
                });
            }
            None => {}
        }
    }
}
