//! Discovery tile table.
//!
//! Eighteen tiles, matching the physical game's scale. The deck order here
//! is the catalog order; the map generator may hand the engine a shuffled
//! copy instead.

use std::collections::BTreeMap;

use game_core::{DiscoveryEffect, DiscoveryId, DiscoverySpec, ShipClass};

fn tile(id: &str, name: &str, effect: DiscoveryEffect) -> (DiscoveryId, DiscoverySpec) {
    let spec = DiscoverySpec {
        id: id.into(),
        name: name.to_owned(),
        effect,
    };
    (spec.id.clone(), spec)
}

pub(crate) fn discovery_tiles() -> BTreeMap<DiscoveryId, DiscoverySpec> {
    use DiscoveryEffect::*;

    BTreeMap::from([
        tile("disc_money_2a", "+2 Money Cache", Money(2)),
        tile("disc_money_2b", "+2 Money Cache", Money(2)),
        tile("disc_money_3", "+3 Money Vault", Money(3)),
        tile("disc_science_2a", "+2 Science Lab", Science(2)),
        tile("disc_science_2b", "+2 Science Lab", Science(2)),
        tile("disc_science_3", "+3 Research Cache", Science(3)),
        tile("disc_materials_2a", "+2 Materials", Materials(2)),
        tile("disc_materials_2b", "+2 Materials", Materials(2)),
        tile("disc_materials_3", "+3 Materials", Materials(3)),
        tile(
            "disc_ancient_1",
            "Derelict Cruiser",
            DerelictShip(ShipClass::Cruiser),
        ),
        tile(
            "disc_ancient_2",
            "Derelict Cruiser",
            DerelictShip(ShipClass::Cruiser),
        ),
        tile("disc_orbital_1", "Orbital", VictoryPoints(1)),
        tile("disc_orbital_2", "Orbital", VictoryPoints(1)),
        tile("disc_empty_1", "Empty Space", Nothing),
        tile("disc_empty_2", "Empty Space", Nothing),
        tile("disc_empty_3", "Empty Space", Nothing),
        tile("disc_empty_4", "Empty Space", Nothing),
        tile("disc_empty_5", "Empty Space", Nothing),
    ])
}
