//! Standard colony yield rules.
//!
//! Each occupied planet slot produces one unit of its resource per round,
//! two on advanced planets. End-game colony VP is one point per controlled
//! system.

use game_core::{ColonyYieldOracle, GameState, HexState, Income, PlanetKind, PlayerId};

/// The standard-rules income and VP calculator.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardYields;

impl ColonyYieldOracle for StandardYields {
    fn hex_income(&self, hex: &HexState) -> Income {
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
