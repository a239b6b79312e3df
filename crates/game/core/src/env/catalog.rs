//! Static catalog oracle: ship components, hull classes, technologies,
//! species, and ancient stat blocks.
//!
//! Catalogs are loaded once at process start (see `game-content`) and passed
//! into the engine explicitly; the engine never reads ambient global state.

use crate::state::{ComponentId, CubeKind, ResourceKind, ShipClass, SpeciesId, TechId};

/// Component roles on a blueprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentCategory {
    /// Fires during cannon volleys.
    Cannon,
    /// Fires once, before any cannon volley.
    Missile,
    /// Hexes of movement per MOVE action.
    Drive,
    /// Generates power for the rest of the blueprint.
    Source,
    /// Adds to hit rolls and initiative.
    Computer,
    /// Subtracts from attackers' hit rolls.
    Shield,
    /// Extra hull points.
    Hull,
}

/// One entry in the ship-component catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentSpec {
    pub id: ComponentId,
    pub name: String,
    pub category: ComponentCategory,
    pub power_generated: u32,
    pub power_consumed: u32,
    /// Damage per hit (cannons and missiles).
    pub damage: u32,
    /// Hexes of movement (drives).
    pub movement: u32,
    /// Hit-roll bonus (computers).
    pub accuracy: i32,
    /// Hit-roll penalty imposed on attackers (shields).
    pub shield: i32,
    /// Extra hull points (hull plating).
    pub extra_hp: u32,
    /// Technology that unlocks the component; `None` is always available.
    pub requires_tech: Option<TechId>,
}

/// Static definition of a hull class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipClassSpec {
    pub class: ShipClass,
    pub name: String,
    pub slot_count: usize,
    pub base_hp: u32,
    pub base_initiative: i32,
    /// Materials cost to BUILD.
    pub build_cost: u32,
    /// Starbases are immobile.
    pub can_move: bool,
    /// Technology gating construction of this class, if any.
    pub requires_tech: Option<TechId>,
    /// Factory-default slot loadout.
    pub default_slots: Vec<Option<ComponentId>>,
}

/// Research categories; owning technologies in a category discounts further
/// research in the same category.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::AsRefStr, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TechCategory {
    Military,
    Grid,
    Nano,
    Quantum,
    Rare,
}

/// Rule effects a technology can carry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TechEffect {
    /// One-time resource grant on acquisition.
    ImmediateIncome { kind: ResourceKind, amount: u32 },
    /// Recurring income credited every Upkeep.
    RoundIncome { kind: ResourceKind, amount: u32 },
    /// BUILD becomes legal on any controlled hex, not just the homeworld.
    RemoteConstruction,
    /// VP granted at the final tally.
    EndgameVp { amount: u32 },
}

/// One entry in the technology catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TechSpec {
    pub id: TechId,
    pub name: String,
    pub category: TechCategory,
    pub base_cost: u32,
    pub prerequisites: Vec<TechId>,
    /// Discovery-only techs cannot be bought with science.
    pub can_research: bool,
    pub effects: Vec<TechEffect>,
}

/// Species starting data used at game setup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeciesSpec {
    pub id: SpeciesId,
    pub name: String,
    pub starting_money: u32,
    pub starting_science: u32,
    pub starting_materials: u32,
    /// Unplaced cubes per color at game start.
    pub starting_cubes: u8,
    /// Ships placed on the homeworld at game start.
    pub starting_ships: Vec<(ShipClass, u32)>,
    /// Technologies owned from the start.
    pub starting_techs: Vec<TechId>,
    /// Blueprint slot overrides replacing the class default, if any.
    pub blueprint_overrides: Vec<(ShipClass, Vec<Option<ComponentId>>)>,
    /// Homeworld population placed at setup, as cube colors.
    pub starting_population: Vec<CubeKind>,
}

/// Variants of the neutral defender faction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AncientKind {
    /// Standard ancient warship guarding explored sectors.
    Warship,
    /// The galactic-center guardian.
    Guardian,
}

/// Fixed combat stats for ancient ships; they carry no blueprints.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AncientSpec {
    pub kind: AncientKind,
    pub hull: u32,
    pub initiative: i32,
    pub computer: i32,
    pub shield: i32,
    /// (weapon damage, fires in the missile volley) per mount.
    pub weapons: Vec<(u32, bool)>,
}

/// Read-only lookup into the static game-data tables.
pub trait CatalogOracle: Send + Sync {
    fn component(&self, id: &ComponentId) -> Option<&ComponentSpec>;

    fn ship_class(&self, class: ShipClass) -> &ShipClassSpec;

    fn technology(&self, id: &TechId) -> Option<&TechSpec>;

    fn species(&self, id: &SpeciesId) -> Option<&SpeciesSpec>;

    fn ancient(&self, kind: AncientKind) -> &AncientSpec;

    /// All technologies in `category`, for discount counting.
    fn technologies_in_category(&self, category: TechCategory) -> Vec<&TechSpec>;
}

/// Net power of a slot loadout: generated minus consumed.
pub fn power_balance(
    catalog: &(impl CatalogOracle + ?Sized),
    slots: &[Option<ComponentId>],
) -> i64 {
    slots
        .iter()
        .flatten()
        .filter_map(|id| catalog.component(id))
        .map(|spec| i64::from(spec.power_generated) - i64::from(spec.power_consumed))
        .sum()
}

/// Whether a loadout's power balance is non-negative.
pub fn blueprint_power_valid(
    catalog: &(impl CatalogOracle + ?Sized),
    slots: &[Option<ComponentId>],
) -> bool {
    power_balance(catalog, slots) >= 0
}
