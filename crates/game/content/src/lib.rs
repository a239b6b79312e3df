//! Static game-data catalogs: ship components, hull classes, technologies,
//! species, sector tiles, and discovery tiles.
//!
//! Everything here is immutable reference data. Hosts build the tables once
//! at process start with [`Catalogs::standard`] and pass them into the
//! engine explicitly; the engine never reaches for ambient globals.

mod classes;
mod components;
mod discovery;
mod sectors;
mod species;
mod technologies;
mod yields;

use std::collections::BTreeMap;

use game_core::{
    AncientKind, AncientSpec, CatalogOracle, ComponentId, ComponentSpec, DiscoveryId,
    DiscoverySpec, SectorOracle, SectorSpec, SectorTemplateId, ShipClass, ShipClassSpec,
    SpeciesId, SpeciesSpec, TechCategory, TechId, TechSpec,
};

pub use yields::StandardYields;

/// The full standard-rules catalog bundle.
///
/// Implements both [`CatalogOracle`] and [`SectorOracle`]; clone-free and
/// cheap to share behind an `Arc`.
pub struct Catalogs {
    components: BTreeMap<ComponentId, ComponentSpec>,
    classes: BTreeMap<ShipClass, ShipClassSpec>,
    technologies: BTreeMap<TechId, TechSpec>,
    species: BTreeMap<SpeciesId, SpeciesSpec>,
    sectors: BTreeMap<SectorTemplateId, SectorSpec>,
    discoveries: BTreeMap<DiscoveryId, DiscoverySpec>,
    discovery_deck: Vec<DiscoveryId>,
    warship: AncientSpec,
    guardian: AncientSpec,
}

impl Catalogs {
    /// Builds the standard rule-set tables.
    pub fn standard() -> Self {
        let discoveries = discovery::discovery_tiles();
        let discovery_deck = discoveries.keys().cloned().collect();
        Self {
            components: components::components(),
            classes: classes::ship_classes(),
            technologies: technologies::technologies(),
            species: species::species_table(),
            sectors: sectors::sector_tiles(),
            discoveries,
            discovery_deck,
            warship: AncientSpec {
                kind: AncientKind::Warship,
                hull: 1,
                initiative: 4,
                computer: 2,
                shield: 1,
                weapons: vec![(2, false)],
            },
            guardian: AncientSpec {
                kind: AncientKind::Guardian,
                hull: 2,
                initiative: 4,
                computer: 2,
                shield: 3,
                weapons: vec![(4, false), (4, false)],
            },
        }
    }

    pub fn species_ids(&self) -> impl Iterator<Item = &SpeciesId> {
        self.species.keys()
    }

    pub fn sector_ids(&self) -> impl Iterator<Item = &SectorTemplateId> {
        self.sectors.keys()
    }
}

impl CatalogOracle for Catalogs {
    fn component(&self, id: &ComponentId) -> Option<&ComponentSpec> {
        self.components.get(id)
    }

    fn ship_class(&self, class: ShipClass) -> &ShipClassSpec {
        &self.classes[&class]
    }

    fn technology(&self, id: &TechId) -> Option<&TechSpec> {
        self.technologies.get(id)
    }

    fn species(&self, id: &SpeciesId) -> Option<&SpeciesSpec> {
        self.species.get(id)
    }

    fn ancient(&self, kind: AncientKind) -> &AncientSpec {
        match kind {
            AncientKind::Warship => &self.warship,
            AncientKind::Guardian => &self.guardian,
        }
    }

    fn technologies_in_category(&self, category: TechCategory) -> Vec<&TechSpec> {
        self.technologies
            .values()
            .filter(|spec| spec.category == category)
            .collect()
    }
}

impl SectorOracle for Catalogs {
    fn sector(&self, id: &SectorTemplateId) -> Option<&SectorSpec> {
        self.sectors.get(id)
    }

    fn discovery(&self, id: &DiscoveryId) -> Option<&DiscoverySpec> {
        self.discoveries.get(id)
    }

    fn discovery_deck(&self) -> &[DiscoveryId] {
        &self.discovery_deck
    }
}
