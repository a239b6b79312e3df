//! Game creation: board skeleton types and the Lobby → Strategy transition.
//!
//! The galaxy layout arrives from the external map generator as a
//! [`BoardSetup`]; `start_game` turns a lobby-phase state plus a roster into
//! a playable round 1, seeding players from species starting data.

use std::collections::BTreeSet;

use crate::env::{GameEnv, blueprint_power_valid};
use crate::state::{
    AxialCoord, Blueprint, GameState, HexId, HexKind, HexState, InfluenceTrack, MapState,
    PlanetSlot, PlayerId, PlayerState, PopulationStock, Resources, SectorTemplateId, ShipClass,
    SpeciesId, TurnState, VpBreakdown,
};

use super::effects;
use super::errors::SetupError;

/// One hex of the generated board skeleton.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexSetup {
    pub id: HexId,
    pub coord: AxialCoord,
    pub kind: HexKind,
    pub template: Option<SectorTemplateId>,
    /// Wormhole edges (0..6), already rotated by the generator.
    pub wormholes: BTreeSet<u8>,
    /// Homeworlds start explored; frontier hexes do not.
    pub explored: bool,
}

/// The full generated board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSetup {
    pub hexes: Vec<HexSetup>,
}

impl BoardSetup {
    /// Builds the map arena for [`GameState::new`].
    pub fn into_map(self) -> MapState {
        let hexes = self
            .hexes
            .into_iter()
            .map(|setup| {
                (
                    setup.id,
                    HexState {
                        id: setup.id,
                        coord: setup.coord,
                        kind: setup.kind,
                        template: setup.template,
                        explored: setup.explored,
                        name: None,
                        owner: None,
                        wormholes: setup.wormholes,
                        planets: Vec::new(),
                        has_discovery: false,
                        ships: BTreeSet::new(),
                    },
                )
            })
            .collect();
        MapState::new(hexes)
    }
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSeat {
    pub player: PlayerId,
    pub species: SpeciesId,
    /// The player's starting sector on the board.
    pub homeworld: HexId,
}

/// Transitions a lobby state into round 1 of Strategy.
pub(crate) fn start_game(
    state: &mut GameState,
    env: &GameEnv<'_>,
    roster: &[PlayerSeat],
) -> Result<(), SetupError> {
    if state.phase != crate::state::GamePhase::Lobby {
        return Err(SetupError::NotInLobby { phase: state.phase });
    }
    if !(2..=6).contains(&roster.len()) {
        return Err(SetupError::RosterSize { got: roster.len() });
    }

    let catalog = env.catalog()?;
    let sectors = env.sectors()?;

    let mut order = Vec::with_capacity(roster.len());
    let mut claimed_homes = BTreeSet::new();
    for seat in roster {
        if order.contains(&seat.player) {
            return Err(SetupError::DuplicatePlayer {
                player: seat.player,
            });
        }
        if !claimed_homes.insert(seat.homeworld) {
            return Err(SetupError::HomeworldCollision {
                hex: seat.homeworld,
            });
        }
        if state.map.hex(seat.homeworld).is_none() {
            return Err(SetupError::MissingHomeworld {
                player: seat.player,
                hex: seat.homeworld,
            });
        }
        order.push(seat.player);
    }

    for seat in roster {
        let species = catalog
            .species(&seat.species)
            .ok_or_else(|| SetupError::UnknownSpecies {
                species: seat.species.clone(),
            })?
            .clone();

        // Blueprints: class defaults with species overrides applied.
        let mut blueprints = std::collections::BTreeMap::new();
        for class in [
            ShipClass::Interceptor,
            ShipClass::Cruiser,
            ShipClass::Dreadnought,
            ShipClass::Starbase,
        ] {
            let slots = species
                .blueprint_overrides
                .iter()
                .find(|(overridden, _)| *overridden == class)
                .map(|(_, slots)| slots.clone())
                .unwrap_or_else(|| catalog.ship_class(class).default_slots.clone());
            let is_valid = blueprint_power_valid(catalog, &slots);
            blueprints.insert(class, Blueprint::new(slots, is_valid));
        }

        let mut discs = InfluenceTrack::new(state.config.influence_discs);
        // The homeworld claim is the player's first disc on the board.
        discs
            .place_one()
            .expect("a fresh influence track always has discs");

        let mut technologies = std::collections::BTreeMap::new();
        for tech in &species.starting_techs {
            technologies.insert(tech.clone(), 0);
        }

        state.players.insert(
            seat.player,
            PlayerState {
                id: seat.player,
                species: species.id.clone(),
                resources: Resources::new(
                    species.starting_money,
                    species.starting_science,
                    species.starting_materials,
                ),
                population: PopulationStock::uniform(species.starting_cubes),
                discs,
                ships: BTreeSet::new(),
                technologies,
                blueprints,
                vp: VpBreakdown::default(),
                eliminated: false,
            },
        );

        // Reveal the homeworld from its template and claim it.
        {
            let template = state
                .map
                .hex(seat.homeworld)
                .and_then(|hex| hex.template.clone());
            let sector = template.as_ref().and_then(|id| sectors.sector(id));
            let (name, planets) = match sector {
                Some(spec) => (
                    Some(spec.name.clone()),
                    spec.planets
                        .iter()
                        .map(|planet| PlanetSlot::new(planet.kind, planet.advanced))
                        .collect(),
                ),
                None => (None, Vec::new()),
            };
            let hex = state
                .map
                .hex_mut(seat.homeworld)
                .expect("homeworld existence checked above");
            hex.explored = true;
            hex.owner = Some(seat.player);
            if name.is_some() {
                hex.name = name;
            }
            hex.planets = planets;
        }

        // Starting population on the first compatible free slots.
        for cube in &species.starting_population {
            let Some(slot_index) = state.map.hex(seat.homeworld).and_then(|hex| {
                hex.planets
                    .iter()
                    .position(|slot| slot.cube.is_none() && slot.kind.cube_kind() == *cube)
            }) else {
                continue;
            };
            let player_state = state
                .player_mut(seat.player)
                .expect("player inserted above");
            if player_state.population.take(*cube).is_err() {
                continue;
            }
            let hex = state
                .map
                .hex_mut(seat.homeworld)
                .expect("homeworld existence checked above");
            hex.planets[slot_index].cube = Some(crate::state::PlacedCube {
                owner: seat.player,
                kind: *cube,
                placed_round: 0,
            });
        }

        // Starting fleet.
        for (class, count) in &species.starting_ships {
            for _ in 0..*count {
                effects::spawn_ship(state, env, Some(seat.player), *class, seat.homeworld, None)?;
            }
        }
    }

    state.turn = TurnState::new(order);
    state.round = 1;
    state.phase = crate::state::GamePhase::Strategy;
    Ok(())
}
