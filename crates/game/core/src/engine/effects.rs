//! Effect application.
//!
//! Effects arrive fully validated; any failure here means validation and
//! application disagree about the world, which is a consistency fault.

use crate::action::{Effect, VpSource};
use crate::env::{AncientKind, GameEnv};
use crate::state::{
    GameState, HexId, PlacedCube, PlanetSlot, PlayerId, ShipClass, ShipId, ShipState,
};

use super::errors::ConsistencyFault;

pub(crate) fn apply_effects(
    state: &mut GameState,
    env: &GameEnv<'_>,
    effects: &[Effect],
) -> Result<(), ConsistencyFault> {
    for effect in effects {
        apply_effect(state, env, effect)?;
    }
    Ok(())
}

fn apply_effect(
    state: &mut GameState,
    env: &GameEnv<'_>,
    effect: &Effect,
) -> Result<(), ConsistencyFault> {
    match effect {
        Effect::Credit {
            player,
            kind,
            amount,
        } => {
            let player_state = state
                .player_mut(*player)
                .ok_or(ConsistencyFault::MissingPlayer { player: *player })?;
            player_state.resources.credit(*kind, *amount);
        }

        Effect::Debit {
            player,
            kind,
            amount,
        } => {
            let player_state = state
                .player_mut(*player)
                .ok_or(ConsistencyFault::MissingPlayer { player: *player })?;
            player_state
                .resources
                .debit(*kind, *amount)
                .map_err(|_| ConsistencyFault::LedgerOverdraft {
                    player: *player,
                    kind: *kind,
                })?;
        }

        Effect::SpendDisc { player } => {
            let player_state = state
                .player_mut(*player)
                .ok_or(ConsistencyFault::MissingPlayer { player: *player })?;
            player_state
                .discs
                .place_one()
                .map_err(|_| ConsistencyFault::DiscSupplyEmpty { player: *player })?;
        }

        Effect::MarkPassed { player } => {
            state.turn.passed.insert(*player);
        }

        Effect::SetHexOwner { hex, owner } => {
            let hex_state = state
                .map
                .hex_mut(*hex)
                .ok_or(ConsistencyFault::MissingHex { hex: *hex })?;
            hex_state.owner = *owner;
        }

        Effect::RevealHex {
            hex,
            name,
            planets,
            has_discovery,
        } => {
            let hex_state = state
                .map
                .hex_mut(*hex)
                .ok_or(ConsistencyFault::MissingHex { hex: *hex })?;
            if hex_state.explored {
                return Err(ConsistencyFault::AlreadyRevealed { hex: *hex });
            }
            hex_state.explored = true;
            hex_state.name = Some(name.clone());
            hex_state.planets = planets
                .iter()
                .map(|planet| PlanetSlot::new(planet.kind, planet.advanced))
                .collect();
            hex_state.has_discovery = *has_discovery;
        }

        Effect::SpawnShip {
            owner,
            class,
            hex,
            ancient,
        } => {
            spawn_ship(state, env, *owner, *class, *hex, *ancient)?;
        }

        Effect::RelocateShips { ships, to } => {
            relocate_ships(state, ships, *to)?;
        }

        Effect::FlagContested { hex } => {
            state.contested.insert(*hex);
        }

        Effect::GrantTech { player, tech } => {
            let round = state.round;
            let player_state = state
                .player_mut(*player)
                .ok_or(ConsistencyFault::MissingPlayer { player: *player })?;
            player_state.technologies.insert(tech.clone(), round);
        }

        Effect::SetBlueprint {
            player,
            class,
            slots,
        } => {
            let player_state = state
                .player_mut(*player)
                .ok_or(ConsistencyFault::MissingPlayer { player: *player })?;
            let blueprint = player_state.blueprints.get_mut(class).ok_or(
                ConsistencyFault::MissingBlueprint {
                    player: *player,
                    class: *class,
                },
            )?;
            blueprint.slots = slots.clone();
            blueprint.is_valid = true;
        }

        Effect::PlaceCube {
            player,
            hex,
            slot,
            kind,
        } => {
            let round = state.round;
            let player_state = state
                .player_mut(*player)
                .ok_or(ConsistencyFault::MissingPlayer { player: *player })?;
            player_state
                .population
                .take(*kind)
                .map_err(|_| ConsistencyFault::CubeSupplyEmpty { player: *player })?;
            let hex_state = state
                .map
                .hex_mut(*hex)
                .ok_or(ConsistencyFault::MissingHex { hex: *hex })?;
            let planet =
                hex_state
                    .planets
                    .get_mut(*slot)
                    .ok_or(ConsistencyFault::PlanetSlotUnavailable {
                        hex: *hex,
                        slot: *slot,
                    })?;
            if planet.cube.is_some() {
                return Err(ConsistencyFault::PlanetSlotUnavailable {
                    hex: *hex,
                    slot: *slot,
                });
            }
            planet.cube = Some(PlacedCube {
                owner: *player,
                kind: *kind,
                placed_round: round,
            });
        }

        Effect::AwardVp {
            player,
            source,
            amount,
        } => {
            let player_state = state
                .player_mut(*player)
                .ok_or(ConsistencyFault::MissingPlayer { player: *player })?;
            match source {
                VpSource::Combat => player_state.vp.combat += amount,
                VpSource::Discovery => player_state.vp.discovery += amount,
                VpSource::Colony => player_state.vp.colony += amount,
                VpSource::Tech => player_state.vp.tech += amount,
            }
        }

        Effect::AdvanceDiscoveryDeck => {
            state.discovery_drawn += 1;
        }
    }
    Ok(())
}

/// Creates a ship at full hull and wires up both presence indexes.
pub(crate) fn spawn_ship(
    state: &mut GameState,
    env: &GameEnv<'_>,
    owner: Option<PlayerId>,
    class: ShipClass,
    hex: HexId,
    ancient: Option<AncientKind>,
) -> Result<ShipId, ConsistencyFault> {
    let hull = match (ancient, owner) {
        (Some(kind), _) => {
            let catalog = env.catalog().map_err(ConsistencyFault::OracleUnavailable)?;
            catalog.ancient(kind).hull
        }
        (None, Some(player)) => {
            let slots = state
                .player(player)
                .ok_or(ConsistencyFault::MissingPlayer { player })?
                .blueprint(class)
                .ok_or(ConsistencyFault::MissingBlueprint { player, class })?
                .slots
                .clone();
            crate::combat::max_hull(env, class, &slots)?
        }
        (None, None) => {
            let catalog = env.catalog().map_err(ConsistencyFault::OracleUnavailable)?;
            catalog.ship_class(class).base_hp
        }
    };

    let id = state.fleet.allocate_id();
    state.fleet.insert(ShipState {
        id,
        owner,
        class,
        hex: Some(hex),
        hp_remaining: hull,
        ancient,
    });
    state
        .map
        .hex_mut(hex)
        .ok_or(ConsistencyFault::MissingHex { hex })?
        .ships
        .insert(id);
    if let Some(player) = owner {
        state
            .player_mut(player)
            .ok_or(ConsistencyFault::MissingPlayer { player })?
            .ships
            .insert(id);
    }
    Ok(id)
}

/// Moves ships between hexes, keeping both presence indexes consistent.
pub(crate) fn relocate_ships(
    state: &mut GameState,
    ships: &[ShipId],
    to: HexId,
) -> Result<(), ConsistencyFault> {
    if state.map.hex(to).is_none() {
        return Err(ConsistencyFault::MissingHex { hex: to });
    }
    for &ship_id in ships {
        let origin = {
            let ship = state
                .fleet
                .ship(ship_id)
                .ok_or(ConsistencyFault::MissingShip { ship: ship_id })?;
            ship.hex
        };
        if let Some(origin) = origin {
            let origin_hex = state
                .map
                .hex_mut(origin)
                .ok_or(ConsistencyFault::MissingHex { hex: origin })?;
            if !origin_hex.ships.remove(&ship_id) {
                return Err(ConsistencyFault::OccupancyDesync {
                    ship: ship_id,
                    hex: origin,
                });
            }
        }
        state
            .map
            .hex_mut(to)
            .ok_or(ConsistencyFault::MissingHex { hex: to })?
            .ships
            .insert(ship_id);
        state
            .fleet
            .ship_mut(ship_id)
            .ok_or(ConsistencyFault::MissingShip { ship: ship_id })?
            .hex = Some(to);
    }
    Ok(())
}

/// Removes a destroyed ship from the arena and every index.
pub(crate) fn remove_ship(state: &mut GameState, ship_id: ShipId) -> Result<(), ConsistencyFault> {
    let ship = state
        .fleet
        .remove(ship_id)
        .ok_or(ConsistencyFault::MissingShip { ship: ship_id })?;
    if let Some(hex) = ship.hex {
        let hex_state = state
            .map
            .hex_mut(hex)
            .ok_or(ConsistencyFault::MissingHex { hex })?;
        if !hex_state.ships.remove(&ship_id) {
            return Err(ConsistencyFault::OccupancyDesync { ship: ship_id, hex });
        }
    }
    if let Some(owner) = ship.owner {
        state
            .player_mut(owner)
            .ok_or(ConsistencyFault::MissingPlayer { player: owner })?
            .ships
            .remove(&ship_id);
    }
    Ok(())
}
