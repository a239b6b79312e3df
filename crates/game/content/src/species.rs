//! Species starting data.
//!
//! Each species defines its opening economy and fleet. A few species carry
//! blueprint overrides for their signature hulls.

use std::collections::BTreeMap;

use game_core::{ComponentId, CubeKind, ShipClass, SpeciesId, SpeciesSpec};

fn slots(ids: &[Option<&str>]) -> Vec<Option<ComponentId>> {
    ids.iter().map(|id| id.map(ComponentId::from)).collect()
}

struct Builder {
    spec: SpeciesSpec,
}

fn species(id: &str, name: &str, money: u32, science: u32, materials: u32) -> Builder {
    Builder {
        spec: SpeciesSpec {
            id: id.into(),
            name: name.to_owned(),
            starting_money: money,
            starting_science: science,
            starting_materials: materials,
            starting_cubes: 5,
            starting_ships: vec![(ShipClass::Interceptor, 2)],
            starting_techs: Vec::new(),
            blueprint_overrides: Vec::new(),
            starting_population: vec![CubeKind::Orbital, CubeKind::Advanced, CubeKind::Gauss],
        },
    }
}

impl Builder {
    fn ships(mut self, ships: Vec<(ShipClass, u32)>) -> Self {
        self.spec.starting_ships = ships;
        self
    }

    fn tech(mut self, tech: &str) -> Self {
        self.spec.starting_techs.push(tech.into());
        self
    }

    fn blueprint(mut self, class: ShipClass, loadout: Vec<Option<ComponentId>>) -> Self {
        self.spec.blueprint_overrides.push((class, loadout));
        self
    }

    fn build(self) -> (SpeciesId, SpeciesSpec) {
        (self.spec.id.clone(), self.spec)
    }
}

pub(crate) fn species_table() -> BTreeMap<SpeciesId, SpeciesSpec> {
    BTreeMap::from([
        species("human", "Human", 3, 3, 3).build(),
        species("eridani_empire", "Eridani Empire", 6, 2, 2).build(),
        species("hydran_progress", "Hydran Progress", 2, 6, 2).build(),
        species("planta", "Planta", 3, 3, 3).ships(Vec::new()).build(),
        species("descendants_of_draco", "Descendants of Draco", 2, 3, 4).build(),
        species("mechanema", "Mechanema", 2, 2, 6)
            .ships(vec![(ShipClass::Interceptor, 2), (ShipClass::Cruiser, 1)])
            .build(),
        // The Hegemony's warfleet: interceptors ship an extra cannon out of
        // the yard.
        species("orion_hegemony", "Orion Hegemony", 3, 2, 4)
            .blueprint(
                ShipClass::Interceptor,
                slots(&[
                    Some("nuclear_source"),
                    Some("electron_cannon"),
                    Some("electron_drive"),
                    Some("electron_cannon"),
                ]),
            )
            .build(),
        species("exiles", "Exiles", 4, 3, 3)
            .ships(vec![(ShipClass::Interceptor, 2), (ShipClass::Starbase, 2)])
            .tech("starbase")
            .build(),
        species("terran_directorate", "Terran Directorate", 3, 4, 3).build(),
    ])
}
