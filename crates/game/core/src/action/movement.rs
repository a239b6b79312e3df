//! MOVE: relocate a fleet along wormhole-connected, explored hexes.
//!
//! The path is limited by the slowest ship's drive rating. Moving onto an
//! enemy-held hex does not resolve combat immediately; the hex is flagged
//! contested for the Combat phase.

use crate::env::{ComponentCategory, GameEnv};
use crate::state::{GameState, HexId, PlayerId, ShipClass, ShipId};

use super::effect::Effect;
use super::error::Rejection;
use super::ValidationFailure;

/// Payload: the fleet and the hex-by-hex path (origin excluded; the last
/// entry is the destination).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub ships: Vec<ShipId>,
    pub path: Vec<HexId>,
}

/// A ship's drive rating: the sum of its blueprint's drive movement values,
/// minimum 1 for anything that can move at all.
fn drive_rating(
    state: &GameState,
    env: &GameEnv<'_>,
    player: PlayerId,
    class: ShipClass,
) -> Result<usize, ValidationFailure> {
    let catalog = env.catalog()?;
    let Some(player_state) = state.players.get(&player) else {
        return Err(Rejection::UnknownPlayer { player }.into());
    };
    let total: u32 = player_state
        .blueprint(class)
        .map(|blueprint| {
            blueprint
                .slots
                .iter()
                .flatten()
                .filter_map(|id| catalog.component(id))
                .filter(|spec| spec.category == ComponentCategory::Drive)
                .map(|spec| spec.movement)
                .sum()
        })
        .unwrap_or(0);
    Ok(total.max(1) as usize)
}

pub(crate) fn validate(
    state: &GameState,
    env: &GameEnv<'_>,
    player: PlayerId,
    action: &MoveAction,
) -> Result<Vec<Effect>, ValidationFailure> {
    if action.ships.is_empty() {
        return Err(Rejection::NoShipsListed.into());
    }
    if action.path.is_empty() {
        return Err(Rejection::EmptyPath.into());
    }

    let catalog = env.catalog()?;
    let mut origin: Option<HexId> = None;
    let mut rating = usize::MAX;
    for &ship_id in &action.ships {
        let ship = state
            .fleet
            .ship(ship_id)
            .ok_or(Rejection::UnknownShip { ship: ship_id })?;
        if ship.owner != Some(player) {
            return Err(Rejection::ShipNotOwned {
                ship: ship_id,
                player,
            }
            .into());
        }
        let hex = ship.hex.ok_or(Rejection::ShipAdrift { ship: ship_id })?;
        match origin {
            None => origin = Some(hex),
            Some(existing) if existing == hex => {}
            Some(_) => return Err(Rejection::ShipsScattered.into()),
        }
        if !catalog.ship_class(ship.class).can_move {
            return Err(Rejection::ShipImmobile { class: ship.class }.into());
        }
        // The fleet travels at its slowest ship's pace.
        rating = rating.min(drive_rating(state, env, player, ship.class)?);
    }
    let origin = origin.expect("at least one ship checked above");

    if action.path.len() > rating {
        return Err(Rejection::PathTooLong {
            length: action.path.len(),
            rating,
        }
        .into());
    }

    let mut current = origin;
    for &next in &action.path {
        let next_hex = state
            .map
            .hex(next)
            .ok_or(Rejection::UnknownHex { hex: next })?;
        if !next_hex.explored {
            return Err(Rejection::HexNotExplored { hex: next }.into());
        }
        if !state.map.connected(current, next) {
            return Err(Rejection::DisconnectedPath {
                from: current,
                to: next,
            }
            .into());
        }
        current = next;
    }
    let destination = current;

    let cap = state.config.hex_stack_cap;
    if state.faction_stack_on_hex(destination, player) + action.ships.len() > cap {
        return Err(Rejection::StackCapExceeded {
            hex: destination,
            cap,
        }
        .into());
    }

    let mut effects = vec![Effect::RelocateShips {
        ships: action.ships.clone(),
        to: destination,
    }];
    let hostile = state
        .factions_on_hex(destination)
        .iter()
        .any(|faction| faction.player() != Some(player));
    if hostile {
        effects.push(Effect::FlagContested { hex: destination });
    }
    Ok(effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit;

    #[test]
    fn move_rejects_disconnected_path() {
        let mut world = testkit::two_player_world();
        // Explored, but it shares no wormhole with Alice's homeworld.
        testkit::reveal_empty(&mut world.state, testkit::FAR_FRONTIER);
        let ship = testkit::first_ship_of(&world.state, testkit::ALICE);
        let env = world.env();
        let action = MoveAction {
            ships: vec![ship],
            path: vec![testkit::FAR_FRONTIER],
        };
        let result = validate(&world.state, &env, testkit::ALICE, &action);
        testkit::assert_rejected(result, "disconnected_path");
    }

    #[test]
    fn move_rejects_paths_beyond_drive_rating() {
        let mut world = testkit::two_player_world();
        testkit::reveal_empty(&mut world.state, testkit::FRONTIER);
        testkit::reveal_empty(&mut world.state, testkit::MIDWAY);
        let ship = testkit::first_ship_of(&world.state, testkit::ALICE);
        let env = world.env();
        // Interceptor carries a single drive worth one hex of movement.
        let action = MoveAction {
            ships: vec![ship],
            path: vec![testkit::FRONTIER, testkit::MIDWAY],
        };
        let result = validate(&world.state, &env, testkit::ALICE, &action);
        testkit::assert_rejected(result, "path_too_long");
    }

    #[test]
    fn move_onto_enemies_flags_contest_without_fighting() {
        let mut world = testkit::two_player_world();
        testkit::reveal_empty(&mut world.state, testkit::FRONTIER);
        // A hostile ancient is waiting there.
        testkit::spawn_ancient(&mut world.state, testkit::FRONTIER);
        let ship = testkit::first_ship_of(&world.state, testkit::ALICE);
        let env = world.env();
        let action = MoveAction {
            ships: vec![ship],
            path: vec![testkit::FRONTIER],
        };
        let effects =
            validate(&world.state, &env, testkit::ALICE, &action).expect("move should be legal");
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::FlagContested { hex } if *hex == testkit::FRONTIER)));
    }
}
