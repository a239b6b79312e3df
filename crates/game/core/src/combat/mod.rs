//! Combat resolution system.
//!
//! Runs once per contested hex per Combat phase, fully deterministic given
//! the injected die-roll source. The resolver mutates ship state (damage,
//! destruction, VP) and produces an immutable [`CombatEncounter`] log.

mod encounter;
mod resolve;
mod roster;

pub use encounter::{
    CombatEncounter, CombatOutcome, EncounterSide, KillRecord, RetreatEvent, ShotRecord, Volley,
    VolleyKind, WeaponKind,
};
pub use roster::{CombatShip, WeaponMount, max_hull};

pub(crate) use resolve::resolve_encounter;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{GameEnv, RetreatDoctrine, ScriptedDice};
    use crate::state::{Faction, GameState, HexId, ShipClass};
    use crate::testkit;

    /// Two weaponless interceptors share a hex: the battle ends immediately
    /// with no destruction and an empty exchange log.
    #[test]
    fn unarmed_standoff_is_a_no_exchange() {
        let mut world = testkit::two_player_world();
        testkit::reveal_empty(&mut world.state, testkit::FRONTIER);
        let alice_ship = testkit::spawn_bare_interceptor(
            &mut world.state,
            testkit::ALICE,
            testkit::FRONTIER,
        );
        let bob_ship =
            testkit::spawn_bare_interceptor(&mut world.state, testkit::BOB, testkit::FRONTIER);
        // Strip both blueprints of weapons.
        for player in [testkit::ALICE, testkit::BOB] {
            let blueprint = world
                .state
                .player_mut(player)
                .unwrap()
                .blueprints
                .get_mut(&ShipClass::Interceptor)
                .unwrap();
            blueprint.slots = vec![Some("nuclear_source".into()), None, None, None];
        }

        let env = GameEnv::new(
            Some(&world.catalog),
            Some(&world.sectors),
            Some(&world.yields),
            Some(&world.dice),
            Some(&world.doctrine),
        );
        let encounter = resolve_encounter(&mut world.state, &env, testkit::FRONTIER)
            .expect("resolution never faults here")
            .expect("hex is contested");

        assert_eq!(encounter.outcome, CombatOutcome::NoExchange);
        assert!(encounter.volleys.is_empty());
        assert!(encounter.kills.is_empty());
        assert!(world.state.fleet.ship(alice_ship).is_some());
        assert!(world.state.fleet.ship(bob_ship).is_some());
    }

    /// Same roster, same scripted rolls: identical logs and survivors.
    #[test]
    fn resolution_is_deterministic() {
        let run = || {
            let mut world = testkit::two_player_world();
            testkit::reveal_empty(&mut world.state, testkit::FRONTIER);
            for _ in 0..2 {
                testkit::spawn_armed_interceptor(
                    &mut world.state,
                    testkit::ALICE,
                    testkit::FRONTIER,
                );
            }
            testkit::spawn_armed_interceptor(&mut world.state, testkit::BOB, testkit::FRONTIER);

            let dice = ScriptedDice::new([0, 5, 1, 2, 0, 3, 1, 5, 0, 4, 1, 1]).with_fallback(3);
            let env = GameEnv::new(
                Some(&world.catalog),
                Some(&world.sectors),
                Some(&world.yields),
                Some(&dice),
                Some(&world.doctrine),
            );
            let encounter = resolve_encounter(&mut world.state, &env, testkit::FRONTIER)
                .expect("resolution never faults here")
                .expect("hex is contested");
            let survivors: Vec<_> = world.state.fleet.ships().map(|ship| ship.id).collect();
            (encounter, survivors)
        };

        let (first_log, first_survivors) = run();
        let (second_log, second_survivors) = run();
        assert_eq!(first_log, second_log);
        assert_eq!(first_survivors, second_survivors);
    }

    /// A scripted natural 6 destroys a one-hull interceptor and awards VP
    /// to the shooter's owner.
    #[test]
    fn kills_award_vp_to_the_destroying_faction() {
        let mut world = testkit::two_player_world();
        testkit::reveal_empty(&mut world.state, testkit::FRONTIER);
        let hunter =
            testkit::spawn_armed_interceptor(&mut world.state, testkit::ALICE, testkit::FRONTIER);
        let prey =
            testkit::spawn_bare_interceptor(&mut world.state, testkit::BOB, testkit::FRONTIER);
        // Bob's interceptor carries no weapons.
        world
            .state
            .player_mut(testkit::BOB)
            .unwrap()
            .blueprints
            .get_mut(&ShipClass::Interceptor)
            .unwrap()
            .slots = vec![Some("nuclear_source".into()), None, None, None];

        // Single-target picks draw no dice; the one scripted value is the
        // hunter's natural 6.
        let dice = ScriptedDice::new([5]).with_fallback(5);
        let env = GameEnv::new(
            Some(&world.catalog),
            Some(&world.sectors),
            Some(&world.yields),
            Some(&dice),
            Some(&world.doctrine),
        );
        let encounter = resolve_encounter(&mut world.state, &env, testkit::FRONTIER)
            .expect("resolution never faults here")
            .expect("hex is contested");

        assert_eq!(
            encounter.outcome,
            CombatOutcome::Eliminated {
                side: EncounterSide::Defenders
            }
        );
        assert_eq!(encounter.kills.len(), 1);
        assert_eq!(encounter.kills[0].ship, prey);
        assert_eq!(
            encounter.kills[0].destroyed_by,
            Faction::Player(testkit::ALICE)
        );
        assert!(world.state.fleet.ship(prey).is_none());
        assert!(world.state.fleet.ship(hunter).is_some());
        assert_eq!(world.state.player(testkit::ALICE).unwrap().vp.combat, 1);
    }

    /// A faction whose doctrine names a valid destination withdraws before
    /// the shooting starts and exits without firing.
    #[test]
    fn retreat_window_lets_a_faction_withdraw() {
        struct FleeHome;
        impl RetreatDoctrine for FleeHome {
            fn retreat_order(
                &self,
                _state: &GameState,
                _hex: HexId,
                faction: Faction,
            ) -> Option<HexId> {
                (faction == Faction::Player(testkit::ALICE)).then_some(testkit::ALICE_HOME)
            }
        }

        let mut world = testkit::two_player_world();
        testkit::reveal_empty(&mut world.state, testkit::FRONTIER);
        let runner =
            testkit::spawn_armed_interceptor(&mut world.state, testkit::ALICE, testkit::FRONTIER);
        testkit::spawn_ancient(&mut world.state, testkit::FRONTIER);

        let doctrine = FleeHome;
        let env = GameEnv::new(
            Some(&world.catalog),
            Some(&world.sectors),
            Some(&world.yields),
            Some(&world.dice),
            Some(&doctrine),
        );
        let encounter = resolve_encounter(&mut world.state, &env, testkit::FRONTIER)
            .expect("resolution never faults here")
            .expect("hex is contested");

        assert_eq!(
            encounter.outcome,
            CombatOutcome::Retreated {
                faction: Faction::Player(testkit::ALICE)
            }
        );
        assert!(encounter.volleys.is_empty());
        assert_eq!(encounter.retreats.len(), 1);
        assert_eq!(encounter.retreats[0].to, testkit::ALICE_HOME);
        // The runner survived and actually moved.
        assert_eq!(
            world.state.fleet.ship(runner).unwrap().hex,
            Some(testkit::ALICE_HOME)
        );
    }

    /// Ancient kills pay the configured double multiplier.
    #[test]
    fn ancient_kills_pay_double() {
        let mut world = testkit::two_player_world();
        testkit::reveal_empty(&mut world.state, testkit::FRONTIER);
        testkit::spawn_armed_interceptor(&mut world.state, testkit::ALICE, testkit::FRONTIER);
        let ancient = testkit::spawn_ancient(&mut world.state, testkit::FRONTIER);

        // The ancient's higher initiative fires first: script its natural 1
        // (miss), then Alice's natural 6.
        let dice = ScriptedDice::new([0, 5]).with_fallback(5);
        let env = GameEnv::new(
            Some(&world.catalog),
            Some(&world.sectors),
            Some(&world.yields),
            Some(&dice),
            Some(&world.doctrine),
        );
        let encounter = resolve_encounter(&mut world.state, &env, testkit::FRONTIER)
            .expect("resolution never faults here")
            .expect("hex is contested");

        let kill = encounter
            .kills
            .iter()
            .find(|kill| kill.ship == ancient)
            .expect("the ancient dies to the scripted six");
        assert_eq!(kill.vp, 2);
        assert_eq!(world.state.player(testkit::ALICE).unwrap().vp.combat, 2);
    }
}
