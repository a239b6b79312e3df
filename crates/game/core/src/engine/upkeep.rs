//! Upkeep settlement: income, influence maintenance, and the bankruptcy
//! policy.
//!
//! Settlement runs per player in turn order and is atomic per player: income
//! is credited, then maintenance is billed, and if the bill cannot be paid
//! the bankruptcy policy discards colonies until it can. A partial debit is
//! never left outstanding; in the worst case the player ends with zero
//! colonies and zero debt.

use crate::env::{GameEnv, Income, TechEffect};
use crate::state::{GameState, HexId, PlayerId, ResourceKind};

use super::errors::{ConsistencyFault, UpkeepReport};

pub(crate) fn settle_upkeep(
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<Vec<UpkeepReport>, ConsistencyFault> {
    let order = state.turn.order.clone();
    let mut reports = Vec::with_capacity(order.len());
    for player in order {
        reports.push(settle_player(state, env, player)?);
    }
    Ok(reports)
}

fn settle_player(
    state: &mut GameState,
    env: &GameEnv<'_>,
    player: PlayerId,
) -> Result<UpkeepReport, ConsistencyFault> {
    let yields = env.yields().map_err(ConsistencyFault::OracleUnavailable)?;
    let catalog = env.catalog().map_err(ConsistencyFault::OracleUnavailable)?;

    // Income: colony yields plus recurring technology income.
    let mut income = Income::default();
    for hex in state.map.owned_by(player) {
        income.add(yields.hex_income(hex));
    }
    {
        let player_state = state
            .player(player)
            .ok_or(ConsistencyFault::MissingPlayer { player })?;
        for tech in player_state.technologies.keys() {
            let Some(spec) = catalog.technology(tech) else {
                continue;
            };
            for effect in &spec.effects {
                if let TechEffect::RoundIncome { kind, amount } = effect {
                    match kind {
                        ResourceKind::Money => income.money += amount,
                        ResourceKind::Science => income.science += amount,
                        ResourceKind::Materials => income.materials += amount,
                    }
                }
            }
        }
    }

    {
        let player_state = state
            .player_mut(player)
            .ok_or(ConsistencyFault::MissingPlayer { player })?;
        player_state.resources.credit(ResourceKind::Money, income.money);
        player_state
            .resources
            .credit(ResourceKind::Science, income.science);
        player_state
            .resources
            .credit(ResourceKind::Materials, income.materials);
    }

    // Maintenance: each owned hex bills one disc's upkeep. Discarding a
    // colony removes its obligation, so the bill is recomputed as the
    // bankruptcy policy shrinks the empire.
    let disc_upkeep = state.config.disc_upkeep;
    let maintenance =
        state.map.owned_by(player).count() as u32 * disc_upkeep;
    let mut discarded: Vec<HexId> = Vec::new();

    loop {
        let owed = state.map.owned_by(player).count() as u32 * disc_upkeep;
        let balance = state
            .player(player)
            .ok_or(ConsistencyFault::MissingPlayer { player })?
            .resources
            .money;
        if balance >= owed {
            state
                .player_mut(player)
                .ok_or(ConsistencyFault::MissingPlayer { player })?
                .resources
                .debit(ResourceKind::Money, owed)
                .map_err(|_| ConsistencyFault::LedgerOverdraft {
                    player,
                    kind: ResourceKind::Money,
                })?;
            break;
        }

        // Bankruptcy: discard the lowest-value colony; ties go to the most
        // recently colonized, then the lowest hex id.
        let victim = state
            .map
            .owned_by(player)
            .map(|hex| {
                (
                    yields.hex_income(hex).total(),
                    core::cmp::Reverse(hex.colonized_round().unwrap_or(0)),
                    hex.id,
                )
            })
            .min()
            .map(|(_, _, id)| id);
        let Some(victim) = victim else {
            // No colonies left; nothing is owed.
            break;
        };

        let hex = state
            .map
            .hex_mut(victim)
            .ok_or(ConsistencyFault::MissingHex { hex: victim })?;
        hex.owner = None;
        for slot in &mut hex.planets {
            slot.cube = None;
        }
        state
            .player_mut(player)
            .ok_or(ConsistencyFault::MissingPlayer { player })?
            .discs
            .release_one();
        discarded.push(victim);
    }

    Ok(UpkeepReport {
        player,
        income,
        maintenance,
        bankrupt: !discarded.is_empty(),
        colonies_discarded: discarded,
    })
}
