//! Shared test fixtures: a small catalog, a five-hex board, and helpers for
//! staging ships. Test-only.

use std::collections::BTreeMap;

use crate::action::{Effect, ValidationFailure};
use crate::engine::{BoardSetup, GameEngine, HexSetup, PlayerSeat};
use crate::env::{
    AncientKind, AncientSpec, CatalogOracle, ColonyYieldOracle, ComponentCategory, ComponentSpec,
    DiceOracle, DiscoverySpec, Env, GameEnv, HoldTheLine, Income, PcgDice, PlanetSpec,
    SectorOracle, SectorSpec, ShipClassSpec, SpeciesSpec, TechCategory, TechSpec,
};
use crate::state::{
    AxialCoord, ComponentId, CubeKind, DiscoveryId, GameState, HexId, HexKind, PlanetKind,
    PlayerId, SectorTemplateId, ShipClass, ShipId, ShipState, SpeciesId, TechId,
};

pub const ALICE: PlayerId = PlayerId(1);
pub const BOB: PlayerId = PlayerId(2);

pub const ALICE_HOME: HexId = HexId(1);
pub const BOB_HOME: HexId = HexId(2);
pub const FRONTIER: HexId = HexId(3);
pub const MIDWAY: HexId = HexId(4);
pub const FAR_FRONTIER: HexId = HexId(5);

const ALL_EDGES: [u8; 6] = [0, 1, 2, 3, 4, 5];

// ---------------------------------------------------------------------------
// Catalog fixture
// ---------------------------------------------------------------------------

pub struct TestCatalog {
    components: BTreeMap<ComponentId, ComponentSpec>,
    classes: BTreeMap<ShipClass, ShipClassSpec>,
    technologies: BTreeMap<TechId, TechSpec>,
    species: BTreeMap<SpeciesId, SpeciesSpec>,
    warship: AncientSpec,
    guardian: AncientSpec,
}

fn component(
    id: &str,
    category: ComponentCategory,
    build: impl FnOnce(&mut ComponentSpec),
) -> (ComponentId, ComponentSpec) {
    let mut spec = ComponentSpec {
        id: id.into(),
        name: id.replace('_', " "),
        category,
        power_generated: 0,
        power_consumed: 0,
        damage: 0,
        movement: 0,
        accuracy: 0,
        shield: 0,
        extra_hp: 0,
        requires_tech: None,
    };
    build(&mut spec);
    (spec.id.clone(), spec)
}

impl TestCatalog {
    fn new() -> Self {
        let components = BTreeMap::from([
            component("nuclear_source", ComponentCategory::Source, |c| {
                c.power_generated = 3;
            }),
            component("electron_drive", ComponentCategory::Drive, |c| {
                c.power_consumed = 1;
                c.movement = 1;
            }),
            component("ion_cannon", ComponentCategory::Cannon, |c| {
                c.power_consumed = 1;
                c.damage = 1;
            }),
            component("starburst_missile", ComponentCategory::Missile, |c| {
                c.damage = 1;
            }),
            component("positron_computer", ComponentCategory::Computer, |c| {
                c.power_consumed = 1;
                c.accuracy = 1;
            }),
            component("gauss_shield", ComponentCategory::Shield, |c| {
                c.shield = 1;
            }),
            component("hull_plating", ComponentCategory::Hull, |c| {
                c.extra_hp = 1;
            }),
            component("antimatter_cannon", ComponentCategory::Cannon, |c| {
                c.power_consumed = 4;
                c.damage = 4;
                c.requires_tech = Some("antimatter_cannon".into());
            }),
        ]);

        let interceptor_slots = vec![
            Some(ComponentId::from("nuclear_source")),
            Some(ComponentId::from("electron_drive")),
            Some(ComponentId::from("ion_cannon")),
            Some(ComponentId::from("hull_plating")),
        ];
        let classes = BTreeMap::from([
            (
                ShipClass::Interceptor,
                ShipClassSpec {
                    class: ShipClass::Interceptor,
                    name: "Interceptor".into(),
                    slot_count: 4,
                    base_hp: 1,
                    base_initiative: 2,
                    build_cost: 2,
                    can_move: true,
                    requires_tech: None,
                    default_slots: interceptor_slots.clone(),
                },
            ),
            (
                ShipClass::Cruiser,
                ShipClassSpec {
                    class: ShipClass::Cruiser,
                    name: "Cruiser".into(),
                    slot_count: 6,
                    base_hp: 2,
                    base_initiative: 1,
                    build_cost: 3,
                    can_move: true,
                    requires_tech: None,
                    default_slots: vec![
                        Some("nuclear_source".into()),
                        Some("electron_drive".into()),
                        Some("ion_cannon".into()),
                        Some("hull_plating".into()),
                        None,
                        None,
                    ],
                },
            ),
            (
                ShipClass::Dreadnought,
                ShipClassSpec {
                    class: ShipClass::Dreadnought,
                    name: "Dreadnought".into(),
                    slot_count: 8,
                    base_hp: 3,
                    base_initiative: 0,
                    build_cost: 5,
                    can_move: true,
                    requires_tech: None,
                    default_slots: vec![
                        Some("nuclear_source".into()),
                        Some("electron_drive".into()),
                        Some("ion_cannon".into()),
                        Some("ion_cannon".into()),
                        Some("hull_plating".into()),
                        None,
                        None,
                        None,
                    ],
                },
            ),
            (
                ShipClass::Starbase,
                ShipClassSpec {
                    class: ShipClass::Starbase,
                    name: "Starbase".into(),
                    slot_count: 5,
                    base_hp: 3,
                    base_initiative: 4,
                    build_cost: 2,
                    can_move: false,
                    requires_tech: Some("starbase_engineering".into()),
                    default_slots: vec![
                        Some("nuclear_source".into()),
                        Some("ion_cannon".into()),
                        Some("hull_plating".into()),
                        None,
                        None,
                    ],
                },
            ),
        ]);

        let tech = |id: &str, category: TechCategory, base_cost: u32| TechSpec {
            id: id.into(),
            name: id.replace('_', " "),
            category,
            base_cost,
            prerequisites: Vec::new(),
            can_research: true,
            effects: Vec::new(),
        };
        let mut technologies = BTreeMap::new();
        technologies.insert(
            TechId::from("improved_hull"),
            tech("improved_hull", TechCategory::Military, 2),
        );
        technologies.insert(
            TechId::from("plasma_cannon"),
            tech("plasma_cannon", TechCategory::Military, 3),
        );
        technologies.insert(TechId::from("antimatter_cannon"), {
            let mut spec = tech("antimatter_cannon", TechCategory::Military, 6);
            spec.prerequisites = vec!["plasma_cannon".into()];
            spec
        });
        technologies.insert(TechId::from("starbase_engineering"), {
            tech("starbase_engineering", TechCategory::Grid, 3)
        });
        technologies.insert(TechId::from("advanced_robotics"), {
            let mut spec = tech("advanced_robotics", TechCategory::Grid, 4);
            spec.effects = vec![crate::env::TechEffect::RemoteConstruction];
            spec
        });

        let terran = SpeciesSpec {
            id: "terran".into(),
            name: "Terran Directorate".into(),
            starting_money: 5,
            starting_science: 3,
            starting_materials: 3,
            starting_cubes: 5,
            starting_ships: vec![(ShipClass::Interceptor, 1)],
            starting_techs: Vec::new(),
            blueprint_overrides: Vec::new(),
            starting_population: vec![CubeKind::Orbital],
        };
        let species = BTreeMap::from([(terran.id.clone(), terran)]);

        Self {
            components,
            classes,
            technologies,
            species,
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
}

impl CatalogOracle for TestCatalog {
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

// ---------------------------------------------------------------------------
// Sector fixture
// ---------------------------------------------------------------------------

pub struct TestSectors {
    sectors: BTreeMap<SectorTemplateId, SectorSpec>,
    discoveries: BTreeMap<DiscoveryId, DiscoverySpec>,
    deck: Vec<DiscoveryId>,
}

impl TestSectors {
    fn new() -> Self {
        let home = SectorSpec {
            id: "home_sector".into(),
            name: "Home Sector".into(),
            planets: vec![
                PlanetSpec {
                    kind: PlanetKind::Money,
                    advanced: false,
                },
                PlanetSpec {
                    kind: PlanetKind::Science,
                    advanced: false,
                },
            ],
            ancients: Vec::new(),
            has_discovery: false,
        };
        let nebula = SectorSpec {
            id: "nebula".into(),
            name: "Dust Nebula".into(),
            planets: vec![PlanetSpec {
                kind: PlanetKind::Money,
                advanced: false,
            }],
            ancients: Vec::new(),
            has_discovery: false,
        };
        let sectors =
            BTreeMap::from([(home.id.clone(), home), (nebula.id.clone(), nebula)]);
        let cache = DiscoverySpec {
            id: "ancient_cache".into(),
            name: "Ancient Cache".into(),
            effect: crate::env::DiscoveryEffect::Money(3),
        };
        let deck = vec![cache.id.clone()];
        let discoveries = BTreeMap::from([(cache.id.clone(), cache)]);
        Self {
            sectors,
            discoveries,
            deck,
        }
    }
}

impl SectorOracle for TestSectors {
    fn sector(&self, id: &SectorTemplateId) -> Option<&SectorSpec> {
        self.sectors.get(id)
    }

    fn discovery(&self, id: &DiscoveryId) -> Option<&DiscoverySpec> {
        self.discoveries.get(id)
    }

    fn discovery_deck(&self) -> &[DiscoveryId] {
        &self.deck
    }
}

// ---------------------------------------------------------------------------
// Yield fixture: 1 income per cube, 2 on advanced planets; 1 VP per hex.
// ---------------------------------------------------------------------------

pub struct TestYields;

impl ColonyYieldOracle for TestYields {
    fn hex_income(&self, hex: &crate::state::HexState) -> Income {
        let mut income = Income::default();
        for slot in &hex.planets {
            if slot.cube.is_none() {
                continue;
            }
            let amount = if slot.advanced { 2 } else { 1 };
            match slot.kind {
                PlanetKind::Money => income.money += amount,
                PlanetKind::Science => income.science += amount,
                PlanetKind::Materials => income.materials += amount,
            }
        }
        income
    }

    fn colony_vp(&self, state: &GameState, player: PlayerId) -> u32 {
        state.map.owned_by(player).count() as u32
    }
}

// ---------------------------------------------------------------------------
// World assembly
// ---------------------------------------------------------------------------

pub struct TestWorld {
    pub state: GameState,
    pub catalog: TestCatalog,
    pub sectors: TestSectors,
    pub yields: TestYields,
    pub dice: PcgDice,
    pub doctrine: HoldTheLine,
}

impl TestWorld {
    pub fn env(&self) -> GameEnv<'_> {
        Env::with_all(
            &self.catalog,
            &self.sectors,
            &self.yields,
            &self.dice,
            &self.doctrine,
        )
        .as_game_env()
    }

    pub fn env_with_dice<'a>(&'a self, dice: &'a dyn DiceOracle) -> GameEnv<'a> {
        GameEnv::new(
            Some(&self.catalog),
            Some(&self.sectors),
            Some(&self.yields),
            Some(dice),
            Some(&self.doctrine),
        )
    }
}

/// An n-player world (2..=6): homeworlds on a west-east line, plus an
/// unexplored frontier chain and one unreachable hex.
pub fn world_with_players(count: usize) -> TestWorld {
    let catalog = TestCatalog::new();
    let sectors = TestSectors::new();

    let mut hexes = vec![
        HexSetup {
            id: FRONTIER,
            coord: AxialCoord::new(1, 0),
            kind: HexKind::Standard,
            template: Some("nebula".into()),
            wormholes: ALL_EDGES.into_iter().collect(),
            explored: false,
        },
        HexSetup {
            id: MIDWAY,
            coord: AxialCoord::new(2, 0),
            kind: HexKind::Standard,
            template: Some("nebula".into()),
            wormholes: ALL_EDGES.into_iter().collect(),
            explored: false,
        },
        HexSetup {
            id: FAR_FRONTIER,
            coord: AxialCoord::new(0, 5),
            kind: HexKind::Standard,
            template: None,
            wormholes: std::collections::BTreeSet::new(),
            explored: false,
        },
    ];
    // Homeworlds west of the frontier chain: Alice at (0,0), the rest
    // stacked south so they never collide with the frontier line.
    let mut roster = Vec::new();
    for seat in 0..count {
        let id = if seat == 0 {
            ALICE_HOME
        } else if seat == 1 {
            BOB_HOME
        } else {
            HexId(10 + seat as u32)
        };
        hexes.push(HexSetup {
            id,
            coord: AxialCoord::new(-(seat as i32), seat as i32 * 2),
            kind: HexKind::Homeworld,
            template: Some("home_sector".into()),
            wormholes: ALL_EDGES.into_iter().collect(),
            explored: true,
        });
        roster.push(PlayerSeat {
            player: PlayerId(seat as u8 + 1),
            species: "terran".into(),
            homeworld: id,
        });
    }

    let board = BoardSetup { hexes };
    let mut state = GameState::new(7, board.into_map());
    {
        let yields = TestYields;
        let dice = PcgDice;
        let doctrine = HoldTheLine;
        let env = Env::with_all(&catalog, &sectors, &yields, &dice, &doctrine).as_game_env();
        GameEngine::new(&mut state)
            .start_game(&env, &roster)
            .expect("fixture setup is valid");
    }

    TestWorld {
        state,
        catalog,
        sectors,
        yields: TestYields,
        dice: PcgDice,
        doctrine: HoldTheLine,
    }
}

pub fn two_player_world() -> TestWorld {
    world_with_players(2)
}

// ---------------------------------------------------------------------------
// Staging helpers
// ---------------------------------------------------------------------------

/// The lowest-id ship owned by `player`.
pub fn first_ship_of(state: &GameState, player: PlayerId) -> ShipId {
    state
        .fleet
        .ships()
        .find(|ship| ship.owner == Some(player))
        .map(|ship| ship.id)
        .expect("fixture players always start with a ship")
}

/// Marks a hex explored with no planets, bypassing the EXPLORE action.
pub fn reveal_empty(state: &mut GameState, hex: HexId) {
    let hex_state = state.map.hex_mut(hex).expect("fixture hex exists");
    hex_state.explored = true;
    hex_state.planets = Vec::new();
}

fn spawn_interceptor(state: &mut GameState, player: PlayerId, hex: HexId, hull: u32) -> ShipId {
    let id = state.fleet.allocate_id();
    state.fleet.insert(ShipState {
        id,
        owner: Some(player),
        class: ShipClass::Interceptor,
        hex: Some(hex),
        hp_remaining: hull,
        ancient: None,
    });
    state
        .map
        .hex_mut(hex)
        .expect("fixture hex exists")
        .ships
        .insert(id);
    state
        .player_mut(player)
        .expect("fixture player exists")
        .ships
        .insert(id);
    id
}

/// Interceptor at one hull; pair with a stripped blueprint for unarmed tests.
pub fn spawn_bare_interceptor(state: &mut GameState, player: PlayerId, hex: HexId) -> ShipId {
    spawn_interceptor(state, player, hex, 1)
}

/// Interceptor at the default blueprint's full two hull.
pub fn spawn_armed_interceptor(state: &mut GameState, player: PlayerId, hex: HexId) -> ShipId {
    spawn_interceptor(state, player, hex, 2)
}

/// A neutral ancient warship.
pub fn spawn_ancient(state: &mut GameState, hex: HexId) -> ShipId {
    let id = state.fleet.allocate_id();
    state.fleet.insert(ShipState {
        id,
        owner: None,
        class: ShipClass::Cruiser,
        hex: Some(hex),
        hp_remaining: 1,
        ancient: Some(AncientKind::Warship),
    });
    state
        .map
        .hex_mut(hex)
        .expect("fixture hex exists")
        .ships
        .insert(id);
    id
}

/// Asserts a validation result is a rejection with the given reason code.
pub fn assert_rejected(result: Result<Vec<Effect>, ValidationFailure>, reason: &str) {
    match result {
        Err(ValidationFailure::Rejected(rejection)) => {
            assert_eq!(
                rejection.reason(),
                reason,
                "unexpected rejection: {rejection}"
            );
        }
        Err(ValidationFailure::Fault(fault)) => {
            panic!("expected rejection `{reason}`, got fault: {fault}")
        }
        Ok(effects) => panic!("expected rejection `{reason}`, got {} effects", effects.len()),
    }
}
