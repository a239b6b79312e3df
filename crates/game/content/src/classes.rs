//! Hull class table.

use std::collections::BTreeMap;

use game_core::{ComponentId, ShipClass, ShipClassSpec};

fn slots(ids: &[Option<&str>]) -> Vec<Option<ComponentId>> {
    ids.iter().map(|id| id.map(ComponentId::from)).collect()
}

pub(crate) fn ship_classes() -> BTreeMap<ShipClass, ShipClassSpec> {
    BTreeMap::from([
        (
            ShipClass::Interceptor,
            ShipClassSpec {
                class: ShipClass::Interceptor,
                name: "Interceptor".to_owned(),
                slot_count: 4,
                base_hp: 1,
                base_initiative: 2,
                build_cost: 3,
                can_move: true,
                requires_tech: None,
                default_slots: slots(&[
                    Some("nuclear_source"),
                    Some("electron_cannon"),
                    Some("electron_drive"),
                    None,
                ]),
            },
        ),
        (
            ShipClass::Cruiser,
            ShipClassSpec {
                class: ShipClass::Cruiser,
                name: "Cruiser".to_owned(),
                slot_count: 6,
                base_hp: 1,
                base_initiative: 1,
                build_cost: 5,
                can_move: true,
                requires_tech: None,
                default_slots: slots(&[
                    Some("nuclear_source"),
                    Some("electron_cannon"),
                    Some("electron_drive"),
                    None,
                    None,
                    None,
                ]),
            },
        ),
        (
            ShipClass::Dreadnought,
            ShipClassSpec {
                class: ShipClass::Dreadnought,
                name: "Dreadnought".to_owned(),
                slot_count: 8,
                base_hp: 2,
                base_initiative: 0,
                build_cost: 8,
                can_move: true,
                requires_tech: None,
                default_slots: slots(&[
                    Some("nuclear_source"),
                    Some("nuclear_source"),
                    Some("electron_cannon"),
                    Some("electron_cannon"),
                    Some("electron_drive"),
                    None,
                    None,
                    None,
                ]),
            },
        ),
        (
            ShipClass::Starbase,
            ShipClassSpec {
                class: ShipClass::Starbase,
                name: "Starbase".to_owned(),
                slot_count: 5,
                base_hp: 3,
                base_initiative: 3,
                build_cost: 3,
                can_move: false,
                requires_tech: Some("starbase".into()),
                default_slots: slots(&[
                    Some("nuclear_source"),
                    Some("electron_cannon"),
                    Some("basic_shield"),
                    None,
                    None,
                ]),
            },
        ),
    ])
}
