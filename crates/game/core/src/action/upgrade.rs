//! UPGRADE: refit a ship class blueprint.
//!
//! The proposed loadout must keep the class's slot arity, use only unlocked
//! components, and stay power-positive. Ships already in space fight with
//! the new loadout from the next battle on.

use crate::env::{GameEnv, power_balance};
use crate::state::{ComponentId, GameState, PlayerId, ResourceKind, ShipClass};

use super::effect::Effect;
use super::error::Rejection;
use super::ValidationFailure;

/// Payload: the class to refit and the full proposed slot list.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpgradeAction {
    pub class: ShipClass,
    pub slots: Vec<Option<ComponentId>>,
}

pub(crate) fn validate(
    state: &GameState,
    env: &GameEnv<'_>,
    player: PlayerId,
    action: &UpgradeAction,
) -> Result<Vec<Effect>, ValidationFailure> {
    let catalog = env.catalog()?;
    let class_spec = catalog.ship_class(action.class);

    if action.slots.len() != class_spec.slot_count {
        return Err(Rejection::SlotArityMismatch {
            class: action.class,
            expected: class_spec.slot_count,
            got: action.slots.len(),
        }
        .into());
    }

    let player_state = state
        .players
        .get(&player)
        .ok_or(Rejection::UnknownPlayer { player })?;

    for component_id in action.slots.iter().flatten() {
        let component = catalog
            .component(component_id)
            .ok_or(Rejection::UnknownComponent {
                component: component_id.clone(),
            })?;
        if let Some(tech) = &component.requires_tech {
            if !player_state.owns_tech(tech) {
                return Err(Rejection::ComponentLocked {
                    component: component_id.clone(),
                    tech: tech.clone(),
                }
                .into());
            }
        }
    }

    let balance = power_balance(catalog, &action.slots);
    if balance < 0 {
        return Err(Rejection::PowerDeficit { balance }.into());
    }

    let cost = state.config.upgrade_cost;
    if player_state.resources.materials < cost {
        return Err(Rejection::InsufficientResource {
            kind: ResourceKind::Materials,
            need: cost,
            have: player_state.resources.materials,
        }
        .into());
    }

    let mut effects = Vec::new();
    if cost > 0 {
        effects.push(Effect::Debit {
            player,
            kind: ResourceKind::Materials,
            amount: cost,
        });
    }
    effects.push(Effect::SetBlueprint {
        player,
        class: action.class,
        slots: action.slots.clone(),
    });
    Ok(effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit;

    #[test]
    fn upgrade_rejects_power_deficit() {
        let world = testkit::two_player_world();
        let env = world.env();
        // Two drives with no source: consumption exceeds output.
        let action = UpgradeAction {
            class: ShipClass::Interceptor,
            slots: vec![
                Some("electron_drive".into()),
                Some("electron_drive".into()),
                None,
                None,
            ],
        };
        let result = validate(&world.state, &env, testkit::ALICE, &action);
        testkit::assert_rejected(result, "power_deficit");
    }

    #[test]
    fn upgrade_rejects_locked_components() {
        let world = testkit::two_player_world();
        let env = world.env();
        let action = UpgradeAction {
            class: ShipClass::Interceptor,
            slots: vec![
                Some("nuclear_source".into()),
                Some("electron_drive".into()),
                Some("antimatter_cannon".into()),
                None,
            ],
        };
        let result = validate(&world.state, &env, testkit::ALICE, &action);
        testkit::assert_rejected(result, "component_locked");
    }

    #[test]
    fn upgrade_accepts_balanced_loadout() {
        let world = testkit::two_player_world();
        let env = world.env();
        let action = UpgradeAction {
            class: ShipClass::Interceptor,
            slots: vec![
                Some("nuclear_source".into()),
                Some("electron_drive".into()),
                Some("ion_cannon".into()),
                Some("hull_plating".into()),
            ],
        };
        let effects =
            validate(&world.state, &env, testkit::ALICE, &action).expect("refit should be legal");
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::SetBlueprint { class, .. } if *class == ShipClass::Interceptor)));
    }
}
