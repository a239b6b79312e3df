//! Phase cascade: Combat → Upkeep → Cleanup.
//!
//! Runs synchronously inside the submission that completed the Strategy
//! phase, so no caller ever observes an intermediate phase. Everything here
//! is non-interactive; irregularities are consistency faults.

use crate::combat::{CombatEncounter, resolve_encounter};
use crate::env::{GameEnv, TechEffect};
use crate::state::{GamePhase, GameState};

use super::errors::{CleanupOutcome, ConsistencyFault, Standing, UpkeepReport};
use super::upkeep::settle_upkeep;

/// Everything the cascade produced, for the action report.
pub(crate) struct CascadeReport {
    pub encounters: Vec<CombatEncounter>,
    pub upkeep: Vec<UpkeepReport>,
    pub cleanup: CleanupOutcome,
}

/// Drives the game from a fully-passed Strategy round back to Strategy (or
/// to Finished).
pub(crate) fn run_cascade(
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<CascadeReport, ConsistencyFault> {
    // Combat: resolve every hex holding ships of two or more factions. The
    // flag set is advisory; the contested set is re-derived from ship
    // positions here.
    state.phase = GamePhase::Combat;
    let mut encounters = Vec::new();
    for hex in state.contested_hexes() {
        if let Some(encounter) = resolve_encounter(state, env, hex)? {
            encounters.push(encounter);
        }
    }
    state.contested.clear();

    // Upkeep: income and maintenance per player, in turn order.
    state.phase = GamePhase::Upkeep;
    let upkeep = settle_upkeep(state, env)?;

    // Cleanup: end-game check, then either the final tally or a new round.
    state.phase = GamePhase::Cleanup;
    let cleanup = run_cleanup(state, env)?;

    Ok(CascadeReport {
        encounters,
        upkeep,
        cleanup,
    })
}

fn run_cleanup(
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<CleanupOutcome, ConsistencyFault> {
    let triggered = state
        .players
        .values()
        .any(|player| !player.eliminated && player.discs.exhausted())
        || state.round >= state.config.round_limit;

    if !triggered {
        state.round += 1;
        let players = state.players.clone();
        state
            .turn
            .reset_for_round(|id| players.get(&id).is_some_and(|p| p.eliminated));
        state.phase = GamePhase::Strategy;
        return Ok(CleanupOutcome::NextRound { round: state.round });
    }

    // Final tally: colony VP from the yield oracle, end-game tech VP from
    // the catalog.
    let yields = env.yields().map_err(ConsistencyFault::OracleUnavailable)?;
    let catalog = env.catalog().map_err(ConsistencyFault::OracleUnavailable)?;

    let ids: Vec<_> = state.players.keys().copied().collect();
    for player in ids {
        let colony_vp = yields.colony_vp(state, player);
        let tech_vp: u32 = state
            .player(player)
            .ok_or(ConsistencyFault::MissingPlayer { player })?
            .technologies
            .keys()
            .filter_map(|tech| catalog.technology(tech))
            .flat_map(|spec| &spec.effects)
            .filter_map(|effect| match effect {
                TechEffect::EndgameVp { amount } => Some(*amount),
                _ => None,
            })
            .sum();
        let player_state = state
            .player_mut(player)
            .ok_or(ConsistencyFault::MissingPlayer { player })?;
        player_state.vp.colony = colony_vp;
        player_state.vp.tech = tech_vp;
    }

    state.phase = GamePhase::Finished;
    Ok(CleanupOutcome::Finished {
        standings: standings(state),
    })
}

/// Ranking by total VP, ties broken by remaining money.
pub(crate) fn standings(state: &GameState) -> Vec<Standing> {
    let mut standings: Vec<Standing> = state
        .players
        .values()
        .map(|player| Standing {
            player: player.id,
            vp: player.vp.total(),
            money: player.resources.money,
        })
        .collect();
    standings.sort_by_key(|entry| {
        (
            core::cmp::Reverse(entry.vp),
            core::cmp::Reverse(entry.money),
            entry.player,
        )
    });
    standings
}
