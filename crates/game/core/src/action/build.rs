//! BUILD: construct a ship on a controlled hex.
//!
//! Construction happens at the homeworld unless the remote-construction
//! technology extends it to any controlled hex. The class blueprint must be
//! power-valid and the hex must have stack room.

use crate::env::{GameEnv, TechEffect};
use crate::state::{GameState, HexId, HexKind, PlayerId, ResourceKind, ShipClass};

use super::effect::Effect;
use super::error::Rejection;
use super::ValidationFailure;

/// Payload: where to build and which hull class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildAction {
    pub hex: HexId,
    pub class: ShipClass,
}

pub(crate) fn validate(
    state: &GameState,
    env: &GameEnv<'_>,
    player: PlayerId,
    action: &BuildAction,
) -> Result<Vec<Effect>, ValidationFailure> {
    let hex = state
        .map
        .hex(action.hex)
        .ok_or(Rejection::UnknownHex { hex: action.hex })?;
    if hex.owner != Some(player) {
        return Err(Rejection::NotHexOwner {
            hex: hex.id,
            player,
        }
        .into());
    }

    let player_state = state
        .players
        .get(&player)
        .ok_or(Rejection::UnknownPlayer { player })?;

    // Homeworld always builds; elsewhere needs the unlock technology.
    if hex.kind != HexKind::Homeworld {
        let remote_unlocked = player_state.technologies.keys().any(|tech| {
            env.catalog()
                .ok()
                .and_then(|catalog| catalog.technology(tech))
                .is_some_and(|spec| {
                    spec.effects
                        .iter()
                        .any(|effect| matches!(effect, TechEffect::RemoteConstruction))
                })
        });
        if !remote_unlocked {
            return Err(Rejection::NotBuildSite { hex: hex.id }.into());
        }
    }

    let catalog = env.catalog()?;
    let class_spec = catalog.ship_class(action.class);
    if let Some(tech) = &class_spec.requires_tech {
        if !player_state.owns_tech(tech) {
            return Err(Rejection::ClassLocked {
                class: action.class,
                tech: tech.clone(),
            }
            .into());
        }
    }

    let blueprint =
        player_state
            .blueprint(action.class)
            .ok_or(crate::engine::ConsistencyFault::MissingBlueprint {
                player,
                class: action.class,
            })?;
    if !blueprint.is_valid {
        return Err(Rejection::BlueprintInvalid {
            class: action.class,
        }
        .into());
    }

    if player_state.resources.materials < class_spec.build_cost {
        return Err(Rejection::InsufficientResource {
            kind: ResourceKind::Materials,
            need: class_spec.build_cost,
            have: player_state.resources.materials,
        }
        .into());
    }

    let cap = state.config.hex_stack_cap;
    if state.faction_stack_on_hex(hex.id, player) >= cap {
        return Err(Rejection::StackCapExceeded { hex: hex.id, cap }.into());
    }

    let mut effects = vec![
        Effect::Debit {
            player,
            kind: ResourceKind::Materials,
            amount: class_spec.build_cost,
        },
        Effect::SpawnShip {
            owner: Some(player),
            class: action.class,
            hex: hex.id,
            ancient: None,
        },
    ];
    // Building under an enemy fleet queues the hex for combat.
    let factions = state.factions_on_hex(hex.id);
    if factions
        .iter()
        .any(|faction| faction.player() != Some(player))
    {
        effects.push(Effect::FlagContested { hex: hex.id });
    }
    Ok(effects)
}
