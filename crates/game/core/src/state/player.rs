//! Per-player state: resource ledger, population stock, influence track,
//! blueprints, owned entities, and the VP breakdown.

use std::collections::{BTreeMap, BTreeSet};

use super::{ComponentId, PlayerId, ShipClass, ShipId, SpeciesId, TechId};

/// The three spendable resource pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    Money,
    Science,
    Materials,
}

impl ResourceKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Money => "money",
            Self::Science => "science",
            Self::Materials => "materials",
        }
    }
}

/// Resource balances. Unsigned by construction: a debit that would go below
/// zero is refused by the ledger, so totals can never be negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resources {
    pub money: u32,
    pub science: u32,
    pub materials: u32,
}

impl Resources {
    pub fn new(money: u32, science: u32, materials: u32) -> Self {
        Self {
            money,
            science,
            materials,
        }
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Money => self.money,
            ResourceKind::Science => self.science,
            ResourceKind::Materials => self.materials,
        }
    }

    pub fn credit(&mut self, kind: ResourceKind, amount: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    /// Debits `amount`, or reports the shortfall without mutating.
    pub fn debit(&mut self, kind: ResourceKind, amount: u32) -> Result<(), u32> {
        let slot = self.slot_mut(kind);
        match slot.checked_sub(amount) {
            Some(rest) => {
                *slot = rest;
                Ok(())
            }
            None => Err(amount - *slot),
        }
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Money => &mut self.money,
            ResourceKind::Science => &mut self.science,
            ResourceKind::Materials => &mut self.materials,
        }
    }
}

/// Population cube colors. Each color colonizes one planet type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CubeKind {
    /// Colonizes money planets.
    Orbital,
    /// Colonizes science planets.
    Advanced,
    /// Colonizes materials planets.
    Gauss,
}

/// Per-player supply of unplaced population cubes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationStock {
    pub orbital: u8,
    pub advanced: u8,
    pub gauss: u8,
}

impl PopulationStock {
    pub fn uniform(count: u8) -> Self {
        Self {
            orbital: count,
            advanced: count,
            gauss: count,
        }
    }

    pub fn available(&self, kind: CubeKind) -> u8 {
        match kind {
            CubeKind::Orbital => self.orbital,
            CubeKind::Advanced => self.advanced,
            CubeKind::Gauss => self.gauss,
        }
    }

    /// Removes one cube of `kind`; fails if the supply is empty.
    pub fn take(&mut self, kind: CubeKind) -> Result<(), ()> {
        let slot = match kind {
            CubeKind::Orbital => &mut self.orbital,
            CubeKind::Advanced => &mut self.advanced,
            CubeKind::Gauss => &mut self.gauss,
        };
        *slot = slot.checked_sub(1).ok_or(())?;
        Ok(())
    }
}

/// Influence-disc supply. Discs placed on the board (hex claims, pass costs)
/// count as `used`; a player whose supply is exhausted triggers the end-game
/// check at Cleanup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfluenceTrack {
    pub total: u8,
    pub used: u8,
}

impl InfluenceTrack {
    pub fn new(total: u8) -> Self {
        Self { total, used: 0 }
    }

    pub fn free(&self) -> u8 {
        self.total.saturating_sub(self.used)
    }

    pub fn exhausted(&self) -> bool {
        self.free() == 0
    }

    /// Places one disc on the board; fails if none remain.
    pub fn place_one(&mut self) -> Result<(), ()> {
        if self.free() == 0 {
            return Err(());
        }
        self.used += 1;
        Ok(())
    }

    /// Returns one disc to the supply (bankruptcy colony discard).
    pub fn release_one(&mut self) {
        self.used = self.used.saturating_sub(1);
    }
}

/// Victory-point ledger, broken down by source for end-of-game reporting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VpBreakdown {
    /// Kills during combat resolution.
    pub combat: u32,
    /// Discovery-tile awards.
    pub discovery: u32,
    /// Controlled systems, tallied at game end.
    pub colony: u32,
    /// End-game technology awards, tallied at game end.
    pub tech: u32,
}

impl VpBreakdown {
    pub fn total(&self) -> u32 {
        self.combat + self.discovery + self.colony + self.tech
    }
}

/// A ship class's component loadout for one player.
///
/// `is_valid` caches the power-balance check; an invalid blueprint blocks
/// BUILD for that class until repaired by UPGRADE.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Blueprint {
    pub slots: Vec<Option<ComponentId>>,
    pub is_valid: bool,
}

impl Blueprint {
    pub fn new(slots: Vec<Option<ComponentId>>, is_valid: bool) -> Self {
        Self { slots, is_valid }
    }
}

/// Everything the engine tracks about one player.
///
/// Created at game start from species starting data; never deleted. The
/// `eliminated` flag exists for variant rules; base rules never set it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub id: PlayerId,
    pub species: SpeciesId,
    pub resources: Resources,
    pub population: PopulationStock,
    pub discs: InfluenceTrack,
    /// Ship ownership index; the ships themselves live in the fleet arena.
    pub ships: BTreeSet<ShipId>,
    /// Owned technologies with the round each was acquired.
    pub technologies: BTreeMap<TechId, u32>,
    pub blueprints: BTreeMap<ShipClass, Blueprint>,
    pub vp: VpBreakdown,
    pub eliminated: bool,
}

impl PlayerState {
    pub fn owns_tech(&self, tech: &TechId) -> bool {
        self.technologies.contains_key(tech)
    }

    pub fn blueprint(&self, class: ShipClass) -> Option<&Blueprint> {
        self.blueprints.get(&class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_refuses_overdraft_without_mutating() {
        let mut resources = Resources::new(2, 0, 0);
        assert_eq!(resources.debit(ResourceKind::Money, 5), Err(3));
        assert_eq!(resources.money, 2);
        assert_eq!(resources.debit(ResourceKind::Money, 2), Ok(()));
        assert_eq!(resources.money, 0);
    }

    #[test]
    fn influence_track_exhaustion() {
        let mut discs = InfluenceTrack::new(2);
        assert!(discs.place_one().is_ok());
        assert!(discs.place_one().is_ok());
        assert!(discs.exhausted());
        assert!(discs.place_one().is_err());
        discs.release_one();
        assert_eq!(discs.free(), 1);
    }
}
