//! INFLUENCE: claim an explored sector, or grow population on one you own.
//!
//! Two arms share the action type. Claiming an unowned sector requires a
//! ship on station and a free disc. Growing an owned sector places a
//! population cube whose color matches the targeted planet slot.

use crate::env::GameEnv;
use crate::state::{GameState, HexId, PlayerId, ResourceKind};

use super::effect::Effect;
use super::error::Rejection;
use super::ValidationFailure;

/// Payload: the target hex, and the planet slot when growing population on
/// an already-owned sector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfluenceAction {
    pub hex: HexId,
    pub planet_slot: Option<usize>,
}

pub(crate) fn validate(
    state: &GameState,
    _env: &GameEnv<'_>,
    player: PlayerId,
    action: &InfluenceAction,
) -> Result<Vec<Effect>, ValidationFailure> {
    let hex = state
        .map
        .hex(action.hex)
        .ok_or(Rejection::UnknownHex { hex: action.hex })?;
    if !hex.explored {
        return Err(Rejection::HexNotExplored { hex: hex.id }.into());
    }

    let player_state = state
        .players
        .get(&player)
        .ok_or(Rejection::UnknownPlayer { player })?;

    match hex.owner {
        None => {
            // Claim arm: a ship on station, a free disc, and the claim cost.
            let present = hex
                .ships
                .iter()
                .filter_map(|&id| state.fleet.ship(id))
                .any(|ship| ship.owner == Some(player));
            if !present {
                return Err(Rejection::NoShipPresent {
                    hex: hex.id,
                    player,
                }
                .into());
            }
            if player_state.discs.free() == 0 {
                return Err(Rejection::NoInfluenceDiscs.into());
            }
            let cost = state.config.influence_cost;
            if player_state.resources.money < cost {
                return Err(Rejection::InsufficientResource {
                    kind: ResourceKind::Money,
                    need: cost,
                    have: player_state.resources.money,
                }
                .into());
            }

            let mut effects = Vec::new();
            if cost > 0 {
                effects.push(Effect::Debit {
                    player,
                    kind: ResourceKind::Money,
                    amount: cost,
                });
            }
            effects.push(Effect::SetHexOwner {
                hex: hex.id,
                owner: Some(player),
            });
            effects.push(Effect::SpendDisc { player });
            Ok(effects)
        }
        Some(owner) if owner == player => {
            // Growth arm: place a cube on a compatible empty slot.
            let slot_index = action.planet_slot.ok_or(Rejection::PlanetSlotRequired)?;
            let slot = hex
                .planets
                .get(slot_index)
                .ok_or(Rejection::PlanetSlotOutOfRange {
                    hex: hex.id,
                    slot: slot_index,
                })?;
            if slot.cube.is_some() {
                return Err(Rejection::PlanetSlotOccupied {
                    hex: hex.id,
                    slot: slot_index,
                }
                .into());
            }
            let cube = slot.kind.cube_kind();
            if player_state.population.available(cube) == 0 {
                return Err(Rejection::NoCubeAvailable { kind: cube }.into());
            }

            Ok(vec![Effect::PlaceCube {
                player,
                hex: hex.id,
                slot: slot_index,
                kind: cube,
            }])
        }
        Some(owner) => Err(Rejection::HexOwnedByOther { hex: hex.id, owner }.into()),
    }
}
