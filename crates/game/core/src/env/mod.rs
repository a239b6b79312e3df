//! Traits describing read-only collaborator data.
//!
//! Oracles expose static catalogs, sector templates, colony yields, die
//! rolls, and retreat doctrine. The [`Env`] aggregate bundles them so the
//! engine can access everything it needs without hard coupling to concrete
//! implementations.
mod catalog;
mod error;
mod retreat;
mod rng;
mod sectors;
mod yields;

pub use catalog::{
    AncientKind, AncientSpec, CatalogOracle, ComponentCategory, ComponentSpec, ShipClassSpec,
    SpeciesSpec, TechCategory, TechEffect, TechSpec, blueprint_power_valid, power_balance,
};
pub use error::OracleError;
pub use retreat::{HoldTheLine, RetreatDoctrine};
pub use rng::{DiceOracle, PcgDice, ScriptedDice, compute_seed};
pub use sectors::{DiscoveryEffect, DiscoverySpec, PlanetSpec, SectorOracle, SectorSpec};
pub use yields::{ColonyYieldOracle, Income};

/// Aggregates read-only oracles required by the validator, combat resolver,
/// and phase machine.
#[derive(Clone, Copy)]
pub struct Env<'a, C, S, Y, D, R>
where
    C: CatalogOracle + ?Sized,
    S: SectorOracle + ?Sized,
    Y: ColonyYieldOracle + ?Sized,
    D: DiceOracle + ?Sized,
    R: RetreatDoctrine + ?Sized,
{
    catalog: Option<&'a C>,
    sectors: Option<&'a S>,
    yields: Option<&'a Y>,
    dice: Option<&'a D>,
    retreat: Option<&'a R>,
}

/// Trait-object form used throughout the engine.
pub type GameEnv<'a> = Env<
    'a,
    dyn CatalogOracle + 'a,
    dyn SectorOracle + 'a,
    dyn ColonyYieldOracle + 'a,
    dyn DiceOracle + 'a,
    dyn RetreatDoctrine + 'a,
>;

impl<'a, C, S, Y, D, R> Env<'a, C, S, Y, D, R>
where
    C: CatalogOracle + ?Sized,
    S: SectorOracle + ?Sized,
    Y: ColonyYieldOracle + ?Sized,
    D: DiceOracle + ?Sized,
    R: RetreatDoctrine + ?Sized,
{
    pub fn new(
        catalog: Option<&'a C>,
        sectors: Option<&'a S>,
        yields: Option<&'a Y>,
        dice: Option<&'a D>,
        retreat: Option<&'a R>,
    ) -> Self {
        Self {
            catalog,
            sectors,
            yields,
            dice,
            retreat,
        }
    }

    pub fn with_all(
        catalog: &'a C,
        sectors: &'a S,
        yields: &'a Y,
        dice: &'a D,
        retreat: &'a R,
    ) -> Self {
        Self::new(
            Some(catalog),
            Some(sectors),
            Some(yields),
            Some(dice),
            Some(retreat),
        )
    }

    pub fn empty() -> Self {
        Self {
            catalog: None,
            sectors: None,
            yields: None,
            dice: None,
            retreat: None,
        }
    }

    /// Returns the catalog oracle, or an error if not available.
    pub fn catalog(&self) -> Result<&'a C, OracleError> {
        self.catalog.ok_or(OracleError::CatalogNotAvailable)
    }

    /// Returns the sector oracle, or an error if not available.
    pub fn sectors(&self) -> Result<&'a S, OracleError> {
        self.sectors.ok_or(OracleError::SectorsNotAvailable)
    }

    /// Returns the colony yield oracle, or an error if not available.
    pub fn yields(&self) -> Result<&'a Y, OracleError> {
        self.yields.ok_or(OracleError::YieldsNotAvailable)
    }

    /// Returns the dice oracle, or an error if not available.
    pub fn dice(&self) -> Result<&'a D, OracleError> {
        self.dice.ok_or(OracleError::DiceNotAvailable)
    }

    /// Returns the retreat doctrine if one was provided. Absence means no
    /// faction ever retreats, which is a valid doctrine, not an error.
    pub fn retreat(&self) -> Option<&'a R> {
        self.retreat
    }
}

impl<'a, C, S, Y, D, R> Env<'a, C, S, Y, D, R>
where
    C: CatalogOracle + 'a,
    S: SectorOracle + 'a,
    Y: ColonyYieldOracle + 'a,
    D: DiceOracle + 'a,
    R: RetreatDoctrine + 'a,
{
    /// Converts this environment into the trait-object based [`GameEnv`].
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let catalog: Option<&'a dyn CatalogOracle> = self.catalog.map(|c| c as _);
        let sectors: Option<&'a dyn SectorOracle> = self.sectors.map(|s| s as _);
        let yields: Option<&'a dyn ColonyYieldOracle> = self.yields.map(|y| y as _);
        let dice: Option<&'a dyn DiceOracle> = self.dice.map(|d| d as _);
        let retreat: Option<&'a dyn RetreatDoctrine> = self.retreat.map(|r| r as _);
        Env::new(catalog, sectors, yields, dice, retreat)
    }
}

impl<'a> std::fmt::Debug for GameEnv<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("catalog", &self.catalog.is_some())
            .field("sectors", &self.sectors.is_some())
            .field("yields", &self.yields.is_some())
            .field("dice", &self.dice.is_some())
            .field("retreat", &self.retreat.is_some())
            .finish()
    }
}
