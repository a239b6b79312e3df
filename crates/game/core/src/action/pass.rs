//! PASS: withdraw from the rest of the round.
//!
//! Always legal for the active player. Passing costs one influence disc
//! with no refund; a player whose supply is already empty still passes,
//! which is what ends their game at the Cleanup check.

use crate::state::{GameState, PlayerId};

use super::effect::Effect;
use super::error::Rejection;
use super::ValidationFailure;

pub(crate) fn validate(
    state: &GameState,
    player: PlayerId,
) -> Result<Vec<Effect>, ValidationFailure> {
    let player_state = state
        .players
        .get(&player)
        .ok_or(Rejection::UnknownPlayer { player })?;

    let mut effects = vec![Effect::MarkPassed { player }];
    if player_state.discs.free() > 0 {
        effects.push(Effect::SpendDisc { player });
    }
    Ok(effects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit;

    #[test]
    fn pass_is_always_legal_and_spends_a_disc() {
        let world = testkit::two_player_world();
        let effects = validate(&world.state, testkit::ALICE).expect("pass is always legal");
        assert!(effects.contains(&Effect::MarkPassed {
            player: testkit::ALICE
        }));
        assert!(effects.contains(&Effect::SpendDisc {
            player: testkit::ALICE
        }));
    }

    #[test]
    fn pass_with_empty_supply_skips_the_disc() {
        let mut world = testkit::two_player_world();
        {
            let discs = &mut world.state.player_mut(testkit::ALICE).unwrap().discs;
            discs.used = discs.total;
        }
        let effects = validate(&world.state, testkit::ALICE).expect("pass is always legal");
        assert_eq!(
            effects,
            vec![Effect::MarkPassed {
                player: testkit::ALICE
            }]
        );
    }
}
