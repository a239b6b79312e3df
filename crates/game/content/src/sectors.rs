//! Sector tile table.
//!
//! Tiles carry planets, wormhole edges in their unrotated frame, ancient
//! defenders, and whether exploring them draws a discovery tile. The map
//! generator stamps tiles onto hexes (applying rotation to the wormhole
//! edges); the engine only resolves contents on reveal, so the wormhole
//! lists here are informational for generators rather than read by the
//! engine.

use std::collections::BTreeMap;

use game_core::{AncientKind, PlanetKind, PlanetSpec, SectorSpec, SectorTemplateId};

fn planet(kind: PlanetKind) -> PlanetSpec {
    PlanetSpec {
        kind,
        advanced: false,
    }
}

fn advanced(kind: PlanetKind) -> PlanetSpec {
    PlanetSpec {
        kind,
        advanced: true,
    }
}

fn sector(
    id: &str,
    name: &str,
    planets: Vec<PlanetSpec>,
    ancients: usize,
    has_discovery: bool,
) -> (SectorTemplateId, SectorSpec) {
    let spec = SectorSpec {
        id: id.into(),
        name: name.to_owned(),
        planets,
        ancients: vec![AncientKind::Warship; ancients],
        has_discovery,
    };
    (spec.id.clone(), spec)
}

pub(crate) fn sector_tiles() -> BTreeMap<SectorTemplateId, SectorSpec> {
    use PlanetKind::*;

    let mut tiles = BTreeMap::from([
        // The galactic center and its guardian.
        (
            SectorTemplateId::from("GC"),
            SectorSpec {
                id: "GC".into(),
                name: "Galactic Center".into(),
                planets: vec![advanced(Money), advanced(Science)],
                ancients: vec![AncientKind::Guardian],
                has_discovery: false,
            },
        ),
        // Homeworld sector used by every starting position.
        sector(
            "HW",
            "Starting Sector",
            vec![planet(Money), planet(Science), planet(Materials)],
            0,
            false,
        ),
    ]);

    tiles.extend([
        sector("I01", "Alpha Centauri", vec![planet(Money), planet(Science)], 0, true),
        sector("I02", "Barnard's Star", vec![planet(Materials), planet(Money)], 0, true),
        sector("I03", "Wolf 359", vec![planet(Science), planet(Materials)], 0, true),
        sector("I04", "Sirius", vec![advanced(Money)], 2, true),
        sector(
            "I05",
            "Luyten 726-8",
            vec![advanced(Science), planet(Materials)],
            0,
            true,
        ),
        sector("I06", "Ross 154", vec![planet(Money), planet(Money)], 0, true),
        sector("I07", "Lalande 21185", vec![advanced(Materials)], 2, true),
        sector("I08", "Ross 248", vec![planet(Science), planet(Science)], 0, true),
        sector(
            "I09",
            "Epsilon Eridani",
            vec![planet(Materials), planet(Materials)],
            0,
            true,
        ),
        sector(
            "I10",
            "Tau Ceti",
            vec![planet(Money), planet(Science), planet(Materials)],
            0,
            true,
        ),
        sector(
            "I11",
            "Lacaille 9352",
            vec![advanced(Money), planet(Science)],
            0,
            true,
        ),
        sector("I12", "EZ Aquarii", Vec::new(), 3, true),
        sector("I13", "Procyon", vec![advanced(Science)], 2, true),
        sector("I14", "61 Cygni", vec![planet(Money), planet(Materials)], 0, true),
        sector("I15", "Struve 2398", vec![planet(Science)], 0, true),
        sector(
            "I16",
            "Groombridge 34",
            vec![advanced(Materials), planet(Money)],
            0,
            true,
        ),
        sector("O01", "Epsilon Indi", vec![planet(Money), planet(Science)], 0, true),
        sector(
            "O02",
            "Tau Ceti II",
            vec![planet(Materials), planet(Materials)],
            0,
            true,
        ),
        sector("O03", "Gliese 229", vec![advanced(Science)], 2, true),
        sector(
            "O04",
            "Gliese 570",
            vec![advanced(Money), planet(Science)],
            0,
            true,
        ),
        sector(
            "O05",
            "Fomalhaut",
            vec![planet(Money), planet(Money), planet(Science)],
            0,
            true,
        ),
        sector("O06", "Vega", vec![planet(Science), planet(Materials)], 0, true),
        sector(
            "O07",
            "Altair",
            vec![advanced(Materials), planet(Materials)],
            0,
            true,
        ),
        sector(
            "O08",
            "Deneb",
            vec![planet(Money), planet(Science), planet(Materials)],
            0,
            true,
        ),
        sector("O09", "Arcturus", Vec::new(), 2, true),
        sector("O10", "Capella", vec![planet(Money)], 0, true),
    ]);

    tiles
}
