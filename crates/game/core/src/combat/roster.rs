//! Combat stat derivation.
//!
//! Player ships fight with stats computed from their class and current
//! blueprint; ancient ships use fixed stat blocks from the catalog.

use crate::engine::ConsistencyFault;
use crate::env::{ComponentCategory, GameEnv};
use crate::state::{Faction, GameState, ShipClass, ShipId};

use super::WeaponKind;

/// One weapon mount ready to fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponMount {
    pub kind: WeaponKind,
    pub damage: u32,
}

/// A ship's working stats for one battle. Hull is tracked here while the
/// exchange runs and written back to the arena afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatShip {
    pub id: ShipId,
    pub faction: Faction,
    pub class: ShipClass,
    pub is_ancient: bool,
    pub initiative: i32,
    pub computer: i32,
    pub shield: i32,
    pub hull: u32,
}

/// Stats plus the ship's weapon mounts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Combatant {
    pub ship: CombatShip,
    pub weapons: Vec<WeaponMount>,
}

impl Combatant {
    pub fn alive(&self) -> bool {
        self.ship.hull > 0
    }

    pub fn has_weapon(&self, kind: WeaponKind) -> bool {
        self.weapons.iter().any(|mount| mount.kind == kind)
    }
}

/// Derives a ship's working combat stats from state and catalogs.
pub(crate) fn combatant(
    state: &GameState,
    env: &GameEnv<'_>,
    ship_id: ShipId,
) -> Result<Combatant, ConsistencyFault> {
    let ship = state
        .fleet
        .ship(ship_id)
        .ok_or(ConsistencyFault::MissingShip { ship: ship_id })?;
    let catalog = env
        .catalog()
        .map_err(ConsistencyFault::OracleUnavailable)?;

    if let Some(kind) = ship.ancient {
        let spec = catalog.ancient(kind);
        return Ok(Combatant {
            ship: CombatShip {
                id: ship.id,
                faction: Faction::Ancients,
                class: ship.class,
                is_ancient: true,
                initiative: spec.initiative,
                computer: spec.computer,
                shield: spec.shield,
                hull: ship.hp_remaining,
            },
            weapons: spec
                .weapons
                .iter()
                .map(|&(damage, fires_first)| WeaponMount {
                    kind: if fires_first {
                        WeaponKind::Missile
                    } else {
                        WeaponKind::Cannon
                    },
                    damage,
                })
                .collect(),
        });
    }

    let owner = ship
        .owner
        .ok_or(ConsistencyFault::MissingShip { ship: ship_id })?;
    let player = state
        .players
        .get(&owner)
        .ok_or(ConsistencyFault::MissingPlayer { player: owner })?;
    let class_spec = catalog.ship_class(ship.class);

    let mut computer = 0;
    let mut shield = 0;
    let mut weapons = Vec::new();
    if let Some(blueprint) = player.blueprint(ship.class) {
        for component_id in blueprint.slots.iter().flatten() {
            let Some(component) = catalog.component(component_id) else {
                continue;
            };
            match component.category {
                ComponentCategory::Computer => computer += component.accuracy,
                ComponentCategory::Shield => shield += component.shield,
                ComponentCategory::Cannon => weapons.push(WeaponMount {
                    kind: WeaponKind::Cannon,
                    damage: component.damage,
                }),
                ComponentCategory::Missile => weapons.push(WeaponMount {
                    kind: WeaponKind::Missile,
                    damage: component.damage,
                }),
                ComponentCategory::Drive
                | ComponentCategory::Source
                | ComponentCategory::Hull => {}
            }
        }
    }

    Ok(Combatant {
        ship: CombatShip {
            id: ship.id,
            faction: Faction::Player(owner),
            class: ship.class,
            is_ancient: false,
            initiative: class_spec.base_initiative + computer,
            computer,
            shield,
            hull: ship.hp_remaining,
        },
        weapons,
    })
}

/// A blueprint's maximum hull: class base plus hull plating.
pub fn max_hull(
    env: &GameEnv<'_>,
    class: ShipClass,
    slots: &[Option<crate::state::ComponentId>],
) -> Result<u32, ConsistencyFault> {
    let catalog = env
        .catalog()
        .map_err(ConsistencyFault::OracleUnavailable)?;
    let extra: u32 = slots
        .iter()
        .flatten()
        .filter_map(|id| catalog.component(id))
        .filter(|spec| spec.category == ComponentCategory::Hull)
        .map(|spec| spec.extra_hp)
        .sum();
    Ok(catalog.ship_class(class).base_hp + extra)
}
