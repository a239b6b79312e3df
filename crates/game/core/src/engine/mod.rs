//! Turn engine: the only component with write access to [`GameState`].
//!
//! [`GameEngine`] validates one submission at a time against the current
//! phase, turn order, and action legality rules, applies the resulting
//! effects atomically, and drives any phase cascade the action triggers.
//! A rejected action leaves the state byte-identical; a consistency fault
//! restores the pre-action snapshot.

pub(crate) mod effects;
mod errors;
mod phase;
mod setup;
mod upkeep;

pub use errors::{
    ActionReport, CleanupOutcome, ConsistencyFault, SetupError, Standing, SubmitError,
    UpkeepReport,
};
pub use setup::{BoardSetup, HexSetup, PlayerSeat};

use crate::action::{self, SubmittedAction, ValidationFailure};
use crate::env::GameEnv;
use crate::state::{ActionRecord, GamePhase, GameState};

/// Authoritative reducer for one game instance.
///
/// Hosts hold the state and borrow it into an engine per submission; the
/// per-game serialization lock lives in the host (see the runtime crate).
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Starts the game: Lobby → Strategy, round 1, players seeded from
    /// species starting data.
    pub fn start_game(
        &mut self,
        env: &GameEnv<'_>,
        roster: &[PlayerSeat],
    ) -> Result<(), SetupError> {
        setup::start_game(self.state, env, roster)
    }

    /// Validates and applies one submission, running any phase cascade it
    /// triggers before returning.
    ///
    /// Rejections never mutate state and never advance the turn cursor. A
    /// consistency fault rolls the state back to the pre-action snapshot
    /// and should take the instance out of service.
    pub fn submit(
        &mut self,
        env: &GameEnv<'_>,
        submission: SubmittedAction,
    ) -> Result<ActionReport, SubmitError> {
        // Envelope checks: idempotency, phase, seat, turn.
        if self.state.log.is_consumed(submission.action_id) {
            return Err(action::Rejection::DuplicateAction {
                action_id: submission.action_id,
            }
            .into());
        }
        if self.state.phase != GamePhase::Strategy {
            return Err(action::Rejection::WrongPhase {
                phase: self.state.phase,
            }
            .into());
        }
        if !self.state.players.contains_key(&submission.player) {
            return Err(action::Rejection::UnknownPlayer {
                player: submission.player,
            }
            .into());
        }
        if self.state.turn.active_player() != submission.player {
            return Err(action::Rejection::NotYourTurn {
                player: submission.player,
            }
            .into());
        }

        // Pure validation against the untouched state.
        let effects = match action::validate(self.state, env, submission.player, &submission.action)
        {
            Ok(effects) => effects,
            Err(ValidationFailure::Rejected(rejection)) => return Err(rejection.into()),
            Err(ValidationFailure::Fault(fault)) => return Err(fault.into()),
        };

        // Apply atomically: any fault restores the last known-good snapshot.
        let snapshot = self.state.clone();
        if let Err(fault) = effects::apply_effects(self.state, env, &effects) {
            *self.state = snapshot;
            return Err(fault.into());
        }

        self.state.nonce += 1;
        self.state.log.push(ActionRecord {
            action_id: submission.action_id,
            player: submission.player,
            round: self.state.round,
            submitted_at: submission.submitted_at,
            action: submission.action.clone(),
        });

        // Cursor advance, or the full Combat/Upkeep/Cleanup cascade when
        // the last player just passed.
        let mut report = ActionReport {
            action_id: submission.action_id,
            player: submission.player,
            action: submission.action,
            effects,
            encounters: Vec::new(),
            upkeep: Vec::new(),
            cleanup: None,
            new_phase: self.state.phase,
            round: self.state.round,
        };

        if self.state.turn.all_passed() {
            match phase::run_cascade(self.state, env) {
                Ok(cascade) => {
                    report.encounters = cascade.encounters;
                    report.upkeep = cascade.upkeep;
                    report.cleanup = Some(cascade.cleanup);
                }
                Err(fault) => {
                    *self.state = snapshot;
                    return Err(fault.into());
                }
            }
        } else {
            // Pass or not, an applied action hands the turn to the next
            // player still in the round.
            self.state.turn.advance();
        }

        report.new_phase = self.state.phase;
        report.round = self.state.round;
        Ok(report)
    }

    /// Final ranking (total VP, money tie-break). Meaningful once the game
    /// is finished, but computable at any time for score displays.
    pub fn standings(&self) -> Vec<Standing> {
        phase::standings(self.state)
    }

    pub fn state(&self) -> &GameState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, ActionId, BuildAction, MoveAction, Rejection, SubmittedAction};
    use crate::state::{GamePhase, PlayerId, ShipClass};
    use crate::testkit::{self, ALICE, BOB};

    fn submit(
        world: &mut testkit::TestWorld,
        player: PlayerId,
        action: Action,
    ) -> Result<ActionReport, SubmitError> {
        // Field-level borrows keep the oracles shared while the state is
        // borrowed mutably by the engine.
        let testkit::TestWorld {
            state,
            catalog,
            sectors,
            yields,
            dice,
            doctrine,
        } = world;
        let env = crate::env::Env::with_all(&*catalog, &*sectors, &*yields, &*dice, &*doctrine)
            .as_game_env();
        let submission = SubmittedAction::new(player, chrono::Utc::now(), action);
        GameEngine::new(state).submit(&env, submission)
    }

    #[test]
    fn rejected_action_leaves_state_untouched() {
        let mut world = testkit::two_player_world();
        world.state.player_mut(ALICE).unwrap().resources.materials = 2;
        let before = world.state.digest();

        // Cruiser costs 3 in the fixture catalog; Alice holds 2.
        let result = submit(
            &mut world,
            ALICE,
            Action::Build(BuildAction {
                hex: testkit::ALICE_HOME,
                class: ShipClass::Cruiser,
            }),
        );
        match result {
            Err(SubmitError::Rejected(rejection)) => {
                assert_eq!(rejection.reason(), "insufficient_materials");
            }
            other => panic!("expected rejection, got {other:?}"),
        }

        assert_eq!(
            hex::encode(world.state.digest()),
            hex::encode(before),
            "rejection must leave the state byte-identical"
        );
        // The cursor did not move either.
        assert_eq!(world.state.turn.active_player(), ALICE);
    }

    #[test]
    fn out_of_turn_submission_is_rejected() {
        let mut world = testkit::two_player_world();
        let result = submit(&mut world, BOB, Action::Pass);
        assert!(matches!(
            result,
            Err(SubmitError::Rejected(Rejection::NotYourTurn { player })) if player == BOB
        ));
    }

    #[test]
    fn replayed_action_id_is_rejected() {
        let mut world = testkit::two_player_world();
        let env = world.env();
        let submission = SubmittedAction::new(ALICE, chrono::Utc::now(), Action::Pass);
        let replay = SubmittedAction {
            // Same idempotency key, resubmitted by the transport layer.
            action_id: submission.action_id,
            ..submission.clone()
        };
        let mut state = world.state.clone();
        GameEngine::new(&mut state)
            .submit(&env, submission)
            .expect("first submission applies");
        let result = GameEngine::new(&mut state).submit(&env, replay);
        assert!(matches!(
            result,
            Err(SubmitError::Rejected(Rejection::DuplicateAction { .. }))
        ));
    }

    #[test]
    fn pass_shrinks_the_active_round_monotonically() {
        let mut world = testkit::two_player_world();
        assert!(world.state.turn.passed.is_empty());

        submit(&mut world, ALICE, Action::Pass).expect("pass is always legal");
        assert_eq!(world.state.turn.passed.len(), 1);
        assert_eq!(world.state.turn.active_player(), BOB);
        // Still Strategy: Bob has not passed yet.
        assert_eq!(world.state.phase, GamePhase::Strategy);
    }

    #[test]
    fn full_pass_round_cascades_through_combat_and_upkeep() {
        let mut world = testkit::world_with_players(4);
        let order = world.state.turn.order.clone();
        for &player in &order {
            let report = submit(&mut world, player, Action::Pass).expect("pass is always legal");
            if player != *order.last().unwrap() {
                assert_eq!(report.new_phase, GamePhase::Strategy);
                assert!(report.cleanup.is_none());
            } else {
                // The closing pass runs Combat (no contested hexes), Upkeep
                // for all four players, and Cleanup back to Strategy.
                assert!(report.encounters.is_empty());
                assert_eq!(report.upkeep.len(), 4);
                assert!(matches!(
                    report.cleanup,
                    Some(CleanupOutcome::NextRound { round: 2 })
                ));
                assert_eq!(report.new_phase, GamePhase::Strategy);
            }
        }

        assert_eq!(world.state.round, 2);
        assert!(world.state.turn.passed.is_empty());
        assert_eq!(world.state.turn.active_player(), order[0]);
    }

    #[test]
    fn round_limit_finishes_the_game() {
        let mut world = testkit::two_player_world();
        world.state.round = world.state.config.round_limit;

        submit(&mut world, ALICE, Action::Pass).expect("pass is always legal");
        let report = submit(&mut world, BOB, Action::Pass).expect("pass is always legal");

        assert_eq!(world.state.phase, GamePhase::Finished);
        let Some(CleanupOutcome::Finished { standings }) = report.cleanup else {
            panic!("expected a final tally");
        };
        assert_eq!(standings.len(), 2);
        // Colony VP tallied: one homeworld each.
        assert!(world.state.player(ALICE).unwrap().vp.colony >= 1);
        // Further submissions are refused.
        let result = submit(&mut world, ALICE, Action::Pass);
        assert!(matches!(
            result,
            Err(SubmitError::Rejected(Rejection::WrongPhase { .. }))
        ));
    }

    #[test]
    fn exhausted_influence_supply_triggers_the_endgame() {
        let mut world = testkit::two_player_world();
        {
            let discs = &mut world.state.player_mut(ALICE).unwrap().discs;
            discs.used = discs.total;
        }
        submit(&mut world, ALICE, Action::Pass).expect("pass is always legal");
        submit(&mut world, BOB, Action::Pass).expect("pass is always legal");
        assert_eq!(world.state.phase, GamePhase::Finished);
    }

    #[test]
    fn bankruptcy_discards_colonies_until_the_bill_clears() {
        let mut world = testkit::two_player_world();
        // Alice rules three sectors but is broke: the homeworld yields one
        // money, the two barren colonies yield nothing.
        testkit::reveal_empty(&mut world.state, testkit::FRONTIER);
        testkit::reveal_empty(&mut world.state, testkit::MIDWAY);
        world.state.map.hex_mut(testkit::FRONTIER).unwrap().owner = Some(ALICE);
        world.state.map.hex_mut(testkit::MIDWAY).unwrap().owner = Some(ALICE);
        world.state.player_mut(ALICE).unwrap().resources.money = 0;

        submit(&mut world, ALICE, Action::Pass).expect("pass is always legal");
        let report = submit(&mut world, BOB, Action::Pass).expect("pass is always legal");

        let alice_report = report
            .upkeep
            .iter()
            .find(|entry| entry.player == ALICE)
            .expect("upkeep settles every player");
        assert!(alice_report.bankrupt);
        // Worthless colonies go first, lowest hex id breaking the tie.
        assert_eq!(
            alice_report.colonies_discarded,
            vec![testkit::FRONTIER, testkit::MIDWAY]
        );
        // The debt cleared exactly; no partial debit is outstanding.
        assert_eq!(world.state.player(ALICE).unwrap().resources.money, 0);
        assert_eq!(world.state.map.hex(testkit::FRONTIER).unwrap().owner, None);
        assert_eq!(
            world.state.map.hex(testkit::ALICE_HOME).unwrap().owner,
            Some(ALICE)
        );
    }

    #[test]
    fn closing_pass_resolves_contested_hexes() {
        let mut world = testkit::two_player_world();
        testkit::reveal_empty(&mut world.state, testkit::FRONTIER);
        testkit::spawn_ancient(&mut world.state, testkit::FRONTIER);
        let ship = testkit::first_ship_of(&world.state, ALICE);

        submit(
            &mut world,
            ALICE,
            Action::Move(MoveAction {
                ships: vec![ship],
                path: vec![testkit::FRONTIER],
            }),
        )
        .expect("move should be legal");
        submit(&mut world, BOB, Action::Pass).expect("pass is always legal");
        let report = submit(&mut world, ALICE, Action::Pass).expect("pass is always legal");

        assert_eq!(report.encounters.len(), 1);
        assert_eq!(report.encounters[0].hex, testkit::FRONTIER);
        assert_eq!(world.state.encounters.len(), 1);
        assert!(world.state.contested.is_empty());
    }

    #[test]
    fn replayed_action_id_uses_fresh_ids() {
        // ActionId::random must not collide across submissions.
        let a = ActionId::random();
        let b = ActionId::random();
        assert_ne!(a, b);
    }
}
