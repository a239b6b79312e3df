//! Ship component table.
//!
//! Components with `requires_tech: None` are available from game start;
//! everything else unlocks through research. The power rule: a blueprint's
//! generated-minus-consumed total must be non-negative.

use std::collections::BTreeMap;

use game_core::{ComponentCategory, ComponentId, ComponentSpec};

struct Builder {
    spec: ComponentSpec,
}

fn part(id: &str, name: &str, category: ComponentCategory) -> Builder {
    Builder {
        spec: ComponentSpec {
            id: id.into(),
            name: name.to_owned(),
            category,
            power_generated: 0,
            power_consumed: 0,
            damage: 0,
            movement: 0,
            accuracy: 0,
            shield: 0,
            extra_hp: 0,
            requires_tech: None,
        },
    }
}

impl Builder {
    fn generates(mut self, power: u32) -> Self {
        self.spec.power_generated = power;
        self
    }

    fn consumes(mut self, power: u32) -> Self {
        self.spec.power_consumed = power;
        self
    }

    fn damage(mut self, damage: u32) -> Self {
        self.spec.damage = damage;
        self
    }

    fn movement(mut self, movement: u32) -> Self {
        self.spec.movement = movement;
        self
    }

    fn accuracy(mut self, accuracy: i32) -> Self {
        self.spec.accuracy = accuracy;
        self
    }

    fn shield(mut self, shield: i32) -> Self {
        self.spec.shield = shield;
        self
    }

    fn extra_hp(mut self, extra_hp: u32) -> Self {
        self.spec.extra_hp = extra_hp;
        self
    }

    fn unlocked_by(mut self, tech: &str) -> Self {
        self.spec.requires_tech = Some(tech.into());
        self
    }

    fn build(self) -> (ComponentId, ComponentSpec) {
        (self.spec.id.clone(), self.spec)
    }
}

pub(crate) fn components() -> BTreeMap<ComponentId, ComponentSpec> {
    use ComponentCategory::*;

    BTreeMap::from([
        // Sources
        part("nuclear_source", "Nuclear Source", Source)
            .generates(3)
            .build(),
        part("fusion_source", "Fusion Source", Source)
            .generates(6)
            .unlocked_by("fusion_source")
            .build(),
        part("antimatter_source", "Antimatter Source", Source)
            .generates(9)
            .unlocked_by("antimatter_source")
            .build(),
        // Drives
        part("electron_drive", "Electron Drive", Drive)
            .consumes(1)
            .movement(1)
            .build(),
        part("nuclear_drive", "Nuclear Drive", Drive)
            .consumes(2)
            .movement(2)
            .unlocked_by("nuclear_drive")
            .build(),
        part("fusion_drive", "Fusion Drive", Drive)
            .consumes(3)
            .movement(3)
            .unlocked_by("fusion_drive")
            .build(),
        part("warp_drive", "Warp Drive", Drive)
            .consumes(3)
            .movement(4)
            .unlocked_by("warp_drive")
            .build(),
        // Cannons
        part("electron_cannon", "Electron Cannon", Cannon)
            .consumes(1)
            .damage(1)
            .build(),
        part("ion_cannon", "Ion Cannon", Cannon)
            .consumes(1)
            .damage(2)
            .unlocked_by("ion_cannon")
            .build(),
        part("plasma_cannon", "Plasma Cannon", Cannon)
            .consumes(2)
            .damage(4)
            .unlocked_by("plasma_cannon")
            .build(),
        part("antimatter_cannon", "Antimatter Cannon", Cannon)
            .consumes(4)
            .damage(7)
            .unlocked_by("antimatter_cannon")
            .build(),
        // Missiles
        part("flux_missile", "Flux Missile", Missile)
            .consumes(2)
            .damage(2)
            .unlocked_by("flux_missile")
            .build(),
        part("plasma_missile", "Plasma Missile", Missile)
            .consumes(3)
            .damage(4)
            .unlocked_by("plasma_missile")
            .build(),
        // Computers
        part("basic_computer", "Basic Computer", Computer)
            .accuracy(1)
            .build(),
        part("positron_computer", "Positron Computer", Computer)
            .consumes(1)
            .accuracy(3)
            .unlocked_by("positron_computer")
            .build(),
        // Shields
        part("basic_shield", "Basic Shield", Shield).shield(1).build(),
        part("gauss_shield", "Gauss Shield", Shield)
            .consumes(1)
            .shield(2)
            .unlocked_by("gauss_shield")
            .build(),
        part("phase_shield", "Phase Shield", Shield)
            .consumes(1)
            .shield(3)
            .unlocked_by("phase_shield")
            .build(),
        // Hull plating
        part("improved_hull", "Improved Hull", Hull)
            .extra_hp(1)
            .unlocked_by("improved_hull")
            .build(),
        part("sentient_hull", "Sentient Hull", Hull)
            .consumes(1)
            .extra_hp(2)
            .unlocked_by("sentient_hull")
            .build(),
    ])
}
