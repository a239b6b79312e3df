//! Deterministic battle resolution for one contested hex.
//!
//! The algorithm: retreat window, one simultaneous missile volley, then
//! initiative-ordered cannon volleys until a side is eliminated or the
//! configured volley cap declares a stalemate. Every roll goes through the
//! injected dice oracle, so a battle replays identically from the same seed
//! or the same scripted roll sequence.

use crate::config::RulesConfig;
use crate::engine::ConsistencyFault;
use crate::env::{DiceOracle, GameEnv, compute_seed};
use crate::state::{Faction, GameState, HexId, ShipId};

use super::encounter::{
    CombatEncounter, CombatOutcome, EncounterSide, KillRecord, RetreatEvent, ShotRecord, Volley,
    VolleyKind, WeaponKind,
};
use super::roster::{Combatant, combatant};

/// One roster entry during resolution.
struct Entry {
    side: EncounterSide,
    combatant: Combatant,
}

/// Dice-seed stream scoped to one encounter. Each draw gets a fresh seed so
/// target picks and hit rolls stay independent.
struct SeedStream<'a> {
    dice: &'a dyn DiceOracle,
    game_seed: u64,
    nonce: u64,
    hex: u64,
    counter: u64,
}

impl<'a> SeedStream<'a> {
    fn next_seed(&mut self) -> u64 {
        let seed = compute_seed(self.game_seed, self.nonce, self.hex, self.counter);
        self.counter += 1;
        seed
    }

    fn roll_die(&mut self, sides: u8) -> u8 {
        let seed = self.next_seed();
        self.dice.roll_die(seed, sides)
    }

    fn pick(&mut self, len: usize) -> usize {
        let seed = self.next_seed();
        self.dice.pick(seed, len)
    }
}

/// Whether a shot lands under the configured threshold rules.
fn shot_hits(config: &RulesConfig, roll: u8, computer: i32, shield: i32) -> bool {
    if config.natural_rules {
        if roll >= config.die_sides {
            return true;
        }
        if roll <= 1 {
            return false;
        }
    }
    i32::from(roll) + computer - shield >= config.hit_threshold
}

/// Resolves the battle in `hex`, mutating ship state and awarding VP.
/// Returns `None` when fewer than two factions are present.
///
/// This function runs inside the Combat phase and is non-interactive: any
/// irregularity is a [`ConsistencyFault`], never a player-facing rejection.
pub(crate) fn resolve_encounter(
    state: &mut GameState,
    env: &GameEnv<'_>,
    hex: HexId,
) -> Result<Option<CombatEncounter>, ConsistencyFault> {
    let factions = state.factions_on_hex(hex);
    if factions.len() < 2 {
        return Ok(None);
    }

    // Side assignment: everyone against the ancients when they are present,
    // otherwise the two lowest-seated factions pair off (any third fleet
    // sits the battle out and stays contested for the next round).
    let (attackers, defenders): (Vec<Faction>, Vec<Faction>) =
        if factions.contains(&Faction::Ancients) {
            (
                factions
                    .iter()
                    .copied()
                    .filter(|faction| *faction != Faction::Ancients)
                    .collect(),
                vec![Faction::Ancients],
            )
        } else {
            let mut players = factions.iter().copied();
            let first = players.next().expect("two factions checked above");
            let second = players.next().expect("two factions checked above");
            (vec![first], vec![second])
        };

    // Retreat window. Ancients never withdraw; player factions may, if
    // their doctrine names a valid destination.
    let mut retreats = Vec::new();
    if let Some(doctrine) = env.retreat() {
        for faction in factions.iter().copied() {
            if faction == Faction::Ancients {
                continue;
            }
            let Some(destination) = doctrine.retreat_order(state, hex, faction) else {
                continue;
            };
            if !valid_retreat(state, hex, faction, destination) {
                continue;
            }
            let ships: Vec<ShipId> = state
                .map
                .hex(hex)
                .ok_or(ConsistencyFault::MissingHex { hex })?
                .ships
                .iter()
                .copied()
                .filter(|&id| {
                    state
                        .fleet
                        .ship(id)
                        .is_some_and(|ship| ship.faction() == faction)
                })
                .collect();
            crate::engine::effects::relocate_ships(state, &ships, destination)?;
            retreats.push(RetreatEvent {
                faction,
                ships,
                to: destination,
            });
        }
    }

    let side_of = |faction: Faction| -> Option<EncounterSide> {
        if attackers.contains(&faction) {
            Some(EncounterSide::Attackers)
        } else if defenders.contains(&faction) {
            Some(EncounterSide::Defenders)
        } else {
            None
        }
    };

    // Build working rosters from whoever stayed.
    let present: Vec<ShipId> = state
        .map
        .hex(hex)
        .ok_or(ConsistencyFault::MissingHex { hex })?
        .ships
        .iter()
        .copied()
        .collect();
    let mut roster: Vec<Entry> = Vec::new();
    for ship_id in present {
        let fighter = combatant(state, env, ship_id)?;
        if let Some(side) = side_of(fighter.ship.faction) {
            roster.push(Entry {
                side,
                combatant: fighter,
            });
        }
    }

    let config = state.config.clone();
    let mut encounter = CombatEncounter {
        hex,
        round: state.round,
        attackers,
        defenders,
        retreats,
        volleys: Vec::new(),
        kills: Vec::new(),
        outcome: CombatOutcome::NoExchange,
    };

    let side_alive = |roster: &[Entry], side: EncounterSide| {
        roster
            .iter()
            .any(|entry| entry.side == side && entry.combatant.alive())
    };

    if !side_alive(&roster, EncounterSide::Attackers)
        || !side_alive(&roster, EncounterSide::Defenders)
    {
        // A whole side withdrew; the battle never forms.
        encounter.outcome = CombatOutcome::Retreated {
            faction: encounter
                .retreats
                .first()
                .map(|event| event.faction)
                .unwrap_or(Faction::Ancients),
        };
        state.encounters.push(encounter.clone());
        return Ok(Some(encounter));
    }

    if roster.iter().all(|entry| entry.combatant.weapons.is_empty()) {
        // Unarmed standoff: nothing can ever hit.
        encounter.outcome = CombatOutcome::NoExchange;
        state.encounters.push(encounter.clone());
        return Ok(Some(encounter));
    }

    let dice = env.dice().map_err(ConsistencyFault::OracleUnavailable)?;
    let mut seeds = SeedStream {
        dice,
        game_seed: state.game_seed,
        nonce: state.nonce,
        hex: u64::from(hex.0),
        counter: 0,
    };

    // Missile volley: every missile-armed ship fires, regardless of
    // initiative and regardless of damage taken mid-volley. Firing order
    // only sequences the log.
    if roster
        .iter()
        .any(|entry| entry.combatant.has_weapon(WeaponKind::Missile))
    {
        let shooters = firing_order(&roster, &config, WeaponKind::Missile);
        let mut shots = Vec::new();
        for index in shooters {
            fire_mounts(
                &mut roster,
                index,
                WeaponKind::Missile,
                &config,
                &mut seeds,
                &mut shots,
                &mut encounter.kills,
                // Missiles launched simultaneously: a dying shooter's
                // salvo is already in the air.
                false,
            );
        }
        encounter.volleys.push(Volley {
            index: 0,
            kind: VolleyKind::Missile,
            shots,
        });
    }

    // Cannon volleys in initiative order until elimination or stalemate.
    let mut cannon_volleys = 0u32;
    let outcome = loop {
        let attackers_alive = side_alive(&roster, EncounterSide::Attackers);
        let defenders_alive = side_alive(&roster, EncounterSide::Defenders);
        if !attackers_alive {
            break CombatOutcome::Eliminated {
                side: EncounterSide::Attackers,
            };
        }
        if !defenders_alive {
            break CombatOutcome::Eliminated {
                side: EncounterSide::Defenders,
            };
        }

        if cannon_volleys >= config.max_combat_volleys {
            break CombatOutcome::Stalemate;
        }

        let shooters = firing_order(&roster, &config, WeaponKind::Cannon);
        if shooters.is_empty() {
            // Missiles are spent and nobody mounts a cannon.
            break if encounter.volleys.is_empty() {
                CombatOutcome::NoExchange
            } else {
                CombatOutcome::Stalemate
            };
        }

        let mut shots = Vec::new();
        for index in shooters {
            fire_mounts(
                &mut roster,
                index,
                WeaponKind::Cannon,
                &config,
                &mut seeds,
                &mut shots,
                &mut encounter.kills,
                // Destroyed ships do not fire cannons.
                true,
            );
        }
        encounter.volleys.push(Volley {
            index: encounter.volleys.len() as u32,
            kind: VolleyKind::Cannon,
            shots,
        });
        cannon_volleys += 1;
    };
    encounter.outcome = outcome;

    apply_results(state, &roster, &encounter.kills)?;
    state.encounters.push(encounter.clone());
    Ok(Some(encounter))
}

/// Indexes of living, `kind`-armed ships in firing order: descending
/// initiative, then configured class precedence, then ship id.
fn firing_order(roster: &[Entry], config: &RulesConfig, kind: WeaponKind) -> Vec<usize> {
    let mut order: Vec<usize> = roster
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.combatant.alive() && entry.combatant.has_weapon(kind))
        .map(|(index, _)| index)
        .collect();
    order.sort_by_key(|&index| {
        let ship = &roster[index].combatant.ship;
        (
            core::cmp::Reverse(ship.initiative),
            config.class_precedence(ship.class),
            ship.id,
        )
    });
    order
}

/// Fires every `kind` mount of the ship at `shooter`. Damage lands
/// immediately: a target reduced to zero hull is out of the battle and out
/// of the target pool at once.
#[allow(clippy::too_many_arguments)]
fn fire_mounts(
    roster: &mut Vec<Entry>,
    shooter: usize,
    kind: WeaponKind,
    config: &RulesConfig,
    seeds: &mut SeedStream<'_>,
    shots: &mut Vec<ShotRecord>,
    kills: &mut Vec<KillRecord>,
    skip_if_destroyed: bool,
) {
    if skip_if_destroyed && !roster[shooter].combatant.alive() {
        return;
    }

    let shooter_side = roster[shooter].side;
    let shooter_ship = roster[shooter].combatant.ship.clone();
    let mounts: Vec<_> = roster[shooter]
        .combatant
        .weapons
        .iter()
        .copied()
        .filter(|mount| mount.kind == kind)
        .collect();

    for mount in mounts {
        let targets: Vec<usize> = roster
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.side == shooter_side.opponent() && entry.combatant.alive())
            .map(|(index, _)| index)
            .collect();
        if targets.is_empty() {
            return;
        }
        let target = targets[seeds.pick(targets.len())];
        let target_shield = roster[target].combatant.ship.shield;
        let roll = seeds.roll_die(config.die_sides);
        let hit = shot_hits(config, roll, shooter_ship.computer, target_shield);
        let damage = if hit { mount.damage } else { 0 };

        let target_entry = &mut roster[target].combatant;
        let hp_after = target_entry.ship.hull.saturating_sub(damage);
        target_entry.ship.hull = hp_after;
        let destroyed = hit && hp_after == 0;

        shots.push(ShotRecord {
            attacker: shooter_ship.id,
            attacker_faction: shooter_ship.faction,
            target: target_entry.ship.id,
            weapon: kind,
            roll,
            computer: shooter_ship.computer,
            shield: target_shield,
            hit,
            damage,
            target_hp_after: hp_after,
            destroyed,
        });

        if destroyed {
            let vp = if shooter_ship.faction == Faction::Ancients {
                0
            } else if target_entry.ship.is_ancient {
                config.vp_per_ancient_kill
            } else {
                config.vp_per_player_kill
            };
            kills.push(KillRecord {
                ship: target_entry.ship.id,
                class: target_entry.ship.class,
                owner: target_entry.ship.faction,
                destroyed_by: shooter_ship.faction,
                vp,
            });
        }
    }
}

/// Writes surviving hulls back to the arena, removes the destroyed, and
/// credits kill VP.
fn apply_results(
    state: &mut GameState,
    roster: &[Entry],
    kills: &[KillRecord],
) -> Result<(), ConsistencyFault> {
    for entry in roster {
        let ship_id = entry.combatant.ship.id;
        if entry.combatant.alive() {
            let ship = state
                .fleet
                .ship_mut(ship_id)
                .ok_or(ConsistencyFault::MissingShip { ship: ship_id })?;
            ship.hp_remaining = entry.combatant.ship.hull;
        } else {
            crate::engine::effects::remove_ship(state, ship_id)?;
        }
    }

    for kill in kills {
        if kill.vp == 0 {
            continue;
        }
        if let Faction::Player(player) = kill.destroyed_by {
            let player_state = state
                .players
                .get_mut(&player)
                .ok_or(ConsistencyFault::MissingPlayer { player })?;
            player_state.vp.combat += kill.vp;
        }
    }
    Ok(())
}

/// A retreat destination must be connected, explored, and clear of enemies.
fn valid_retreat(state: &GameState, from: HexId, faction: Faction, to: HexId) -> bool {
    if to == from || !state.map.connected(from, to) {
        return false;
    }
    let Some(destination) = state.map.hex(to) else {
        return false;
    };
    if !destination.explored {
        return false;
    }
    state
        .factions_on_hex(to)
        .iter()
        .all(|&present| present == faction)
}
