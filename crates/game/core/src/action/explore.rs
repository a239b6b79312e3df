//! EXPLORE: reveal an unexplored sector adjacent to one of your ships.
//!
//! Revealing resolves the hex's sector template: planets appear, ancient
//! defenders spawn, the explorer claims the sector with an influence disc,
//! the exploring ship moves in, and a discovery tile may be drawn.

use crate::env::{DiscoveryEffect, GameEnv, SectorSpec};
use crate::state::{GameState, HexId, PlayerId, ResourceKind, ShipId};

use super::effect::{Effect, VpSource};
use super::error::Rejection;
use super::ValidationFailure;

/// Payload: which ship scouts which unexplored hex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExploreAction {
    pub ship: ShipId,
    pub target: HexId,
}

pub(crate) fn validate(
    state: &GameState,
    env: &GameEnv<'_>,
    player: PlayerId,
    action: &ExploreAction,
) -> Result<Vec<Effect>, ValidationFailure> {
    let ship = state
        .fleet
        .ship(action.ship)
        .ok_or(Rejection::UnknownShip { ship: action.ship })?;
    if ship.owner != Some(player) {
        return Err(Rejection::ShipNotOwned {
            ship: action.ship,
            player,
        }
        .into());
    }
    let origin = ship
        .hex
        .ok_or(Rejection::ShipAdrift { ship: action.ship })?;

    let target = state
        .map
        .hex(action.target)
        .ok_or(Rejection::UnknownHex { hex: action.target })?;
    if target.explored {
        return Err(Rejection::HexAlreadyExplored { hex: target.id }.into());
    }
    if !state.map.connected(origin, target.id) {
        return Err(Rejection::DisconnectedPath {
            from: origin,
            to: target.id,
        }
        .into());
    }

    let player_state = state
        .players
        .get(&player)
        .ok_or(Rejection::UnknownPlayer { player })?;

    let cost = state.config.explore_cost;
    if player_state.resources.money < cost {
        return Err(Rejection::InsufficientResource {
            kind: ResourceKind::Money,
            need: cost,
            have: player_state.resources.money,
        }
        .into());
    }
    // One disc is needed to claim the revealed sector.
    if player_state.discs.free() == 0 {
        return Err(Rejection::NoInfluenceDiscs.into());
    }

    // Resolve the sector template; hexes seeded without one reveal as empty
    // space.
    let sectors = env.sectors()?;
    let resolved;
    let sector = match target.template.as_ref() {
        Some(template) => match sectors.sector(template) {
            Some(spec) => spec,
            None => {
                resolved = SectorSpec::empty(template.clone());
                &resolved
            }
        },
        None => {
            resolved = SectorSpec::empty("deep_space".into());
            &resolved
        }
    };

    let mut effects = Vec::new();
    if cost > 0 {
        effects.push(Effect::Debit {
            player,
            kind: ResourceKind::Money,
            amount: cost,
        });
    }
    effects.push(Effect::RevealHex {
        hex: target.id,
        name: sector.name.clone(),
        planets: sector.planets.clone(),
        has_discovery: sector.has_discovery,
    });
    // Ancient defenders use cruiser hulls; their stats come from the
    // catalog stat block at spawn time.
    for &ancient in &sector.ancients {
        effects.push(Effect::SpawnShip {
            owner: None,
            class: crate::state::ShipClass::Cruiser,
            hex: target.id,
            ancient: Some(ancient),
        });
    }
    effects.push(Effect::SetHexOwner {
        hex: target.id,
        owner: Some(player),
    });
    effects.push(Effect::SpendDisc { player });
    effects.push(Effect::RelocateShips {
        ships: vec![action.ship],
        to: target.id,
    });
    if !sector.ancients.is_empty() {
        // The explorer sails straight into the defenders.
        effects.push(Effect::FlagContested { hex: target.id });
    }

    if sector.has_discovery {
        let deck = sectors.discovery_deck();
        if let Some(id) = deck.get(state.discovery_drawn) {
            let discovery = sectors
                .discovery(id)
                .ok_or(crate::engine::ConsistencyFault::UnknownDiscovery { id: id.clone() })?;
            effects.push(Effect::AdvanceDiscoveryDeck);
            let reward = match discovery.effect {
                DiscoveryEffect::Money(amount) => Some(Effect::Credit {
                    player,
                    kind: ResourceKind::Money,
                    amount,
                }),
                DiscoveryEffect::Science(amount) => Some(Effect::Credit {
                    player,
                    kind: ResourceKind::Science,
                    amount,
                }),
                DiscoveryEffect::Materials(amount) => Some(Effect::Credit {
                    player,
                    kind: ResourceKind::Materials,
                    amount,
                }),
                DiscoveryEffect::VictoryPoints(amount) => Some(Effect::AwardVp {
                    player,
                    source: VpSource::Discovery,
                    amount,
                }),
                DiscoveryEffect::DerelictShip(class) => Some(Effect::SpawnShip {
                    owner: Some(player),
                    class,
                    hex: target.id,
                    ancient: None,
                }),
                DiscoveryEffect::Nothing => None,
            };
            effects.extend(reward);
        }
        // An exhausted deck simply yields nothing.
    }

    Ok(effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit;

    #[test]
    fn explore_rejects_explored_target() {
        let world = testkit::two_player_world();
        let ship = testkit::first_ship_of(&world.state, testkit::ALICE);
        let action = ExploreAction {
            ship,
            // Bob's homeworld is explored.
            target: testkit::BOB_HOME,
        };
        let env = world.env();
        let result = validate(&world.state, &env, testkit::ALICE, &action);
        testkit::assert_rejected(result, "hex_already_explored");
    }

    #[test]
    fn explore_rejects_disconnected_target() {
        let world = testkit::two_player_world();
        let ship = testkit::first_ship_of(&world.state, testkit::ALICE);
        let action = ExploreAction {
            ship,
            target: testkit::FAR_FRONTIER,
        };
        let env = world.env();
        let result = validate(&world.state, &env, testkit::ALICE, &action);
        testkit::assert_rejected(result, "disconnected_path");
    }

    #[test]
    fn explore_reveals_claims_and_moves_in() {
        let world = testkit::two_player_world();
        let ship = testkit::first_ship_of(&world.state, testkit::ALICE);
        let action = ExploreAction {
            ship,
            target: testkit::FRONTIER,
        };
        let env = world.env();
        let effects = validate(&world.state, &env, testkit::ALICE, &action)
            .expect("explore should be legal");

        assert!(matches!(
            effects.first(),
            Some(Effect::RevealHex { hex, .. }) if *hex == testkit::FRONTIER
        ));
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::SetHexOwner { hex, owner: Some(p) }
                if *hex == testkit::FRONTIER && *p == testkit::ALICE
        )));
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::SpendDisc { player } if *player == testkit::ALICE)));
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::RelocateShips { to, .. } if *to == testkit::FRONTIER
        )));
    }
}
