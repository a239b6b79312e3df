//! Technology table.
//!
//! Most technologies matter through the components they unlock
//! (`ComponentSpec::requires_tech` points back here); the rest carry
//! explicit effects: recurring income, remote construction, or end-game VP.
//! Every owned technology also discounts later research in its category.

use std::collections::BTreeMap;

use game_core::{ResourceKind, TechCategory, TechEffect, TechId, TechSpec};

struct Builder {
    spec: TechSpec,
}

fn tech(id: &str, name: &str, category: TechCategory, base_cost: u32) -> Builder {
    Builder {
        spec: TechSpec {
            id: id.into(),
            name: name.to_owned(),
            category,
            base_cost,
            prerequisites: Vec::new(),
            can_research: true,
            effects: Vec::new(),
        },
    }
}

impl Builder {
    fn requires(mut self, prerequisite: &str) -> Self {
        self.spec.prerequisites.push(prerequisite.into());
        self
    }

    fn effect(mut self, effect: TechEffect) -> Self {
        self.spec.effects.push(effect);
        self
    }

    fn discovery_only(mut self) -> Self {
        self.spec.can_research = false;
        self
    }

    fn build(self) -> (TechId, TechSpec) {
        (self.spec.id.clone(), self.spec)
    }
}

pub(crate) fn technologies() -> BTreeMap<TechId, TechSpec> {
    use TechCategory::*;

    BTreeMap::from([
        // Military
        tech("improved_hull", "Improved Hull", Military, 2).build(),
        tech("sentient_hull", "Sentient Hull", Military, 3)
            .requires("improved_hull")
            .build(),
        tech("gauss_shield", "Gauss Shield", Military, 4).build(),
        tech("phase_shield", "Phase Shield", Military, 6)
            .requires("gauss_shield")
            .build(),
        tech("neural_targeting", "Neural Targeting", Military, 5).build(),
        tech("advanced_targeting", "Advanced Targeting", Military, 7)
            .requires("neural_targeting")
            .build(),
        tech("starbase", "Starbase", Military, 4).build(),
        // Grid
        tech("nuclear_drive", "Nuclear Drive", Grid, 2).build(),
        tech("fusion_drive", "Fusion Drive", Grid, 4)
            .requires("nuclear_drive")
            .build(),
        tech("warp_drive", "Warp Drive", Grid, 6)
            .requires("fusion_drive")
            .build(),
        tech("nuclear_source", "Nuclear Source", Grid, 3).build(),
        tech("fusion_source", "Fusion Source", Grid, 5)
            .requires("nuclear_source")
            .build(),
        tech("antimatter_source", "Antimatter Source", Grid, 8)
            .requires("fusion_source")
            .build(),
        // Nano
        tech("advanced_mining", "Advanced Mining", Nano, 3)
            .effect(TechEffect::RoundIncome {
                kind: ResourceKind::Materials,
                amount: 2,
            })
            .build(),
        tech("nanorobots", "Nanorobots", Nano, 5)
            .requires("advanced_mining")
            .effect(TechEffect::RemoteConstruction)
            .build(),
        tech("quantum_grid", "Quantum Grid", Nano, 4)
            .effect(TechEffect::RoundIncome {
                kind: ResourceKind::Money,
                amount: 2,
            })
            .build(),
        tech("conifold_field", "Conifold Field", Nano, 6)
            .requires("quantum_grid")
            .effect(TechEffect::RoundIncome {
                kind: ResourceKind::Science,
                amount: 2,
            })
            .build(),
        tech("orbital", "Orbital", Nano, 5).build(),
        tech("morphogenesis", "Morphogenesis", Nano, 7)
            .requires("orbital")
            .build(),
        // Quantum
        tech("ion_cannon", "Ion Cannon", Quantum, 2).build(),
        tech("plasma_cannon", "Plasma Cannon", Quantum, 6)
            .requires("ion_cannon")
            .build(),
        tech("antimatter_cannon", "Antimatter Cannon", Quantum, 9)
            .requires("plasma_cannon")
            .build(),
        tech("flux_missile", "Flux Missile", Quantum, 3).build(),
        tech("plasma_missile", "Plasma Missile", Quantum, 6)
            .requires("flux_missile")
            .build(),
        tech("positron_computer", "Positron Computer", Quantum, 3).build(),
        // Rare
        tech("cloaking_device", "Cloaking Device", Rare, 5).build(),
        tech("tachyon_drive", "Tachyon Drive", Rare, 5).build(),
        tech("point_defense", "Point Defense", Rare, 4).build(),
        tech("carapace_hull", "Carapace Hull", Rare, 4).build(),
        tech("artifact_key", "Artifact Key", Rare, 3)
            .discovery_only()
            .build(),
        tech("monolith", "Monolith", Rare, 6)
            .effect(TechEffect::EndgameVp { amount: 2 })
            .build(),
    ])
}
