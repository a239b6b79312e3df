//! Turn-order bookkeeping for the Strategy phase.

use std::collections::BTreeSet;

use super::PlayerId;

/// Turn-order cursor and pass tracking.
///
/// `order` is fixed for the lifetime of the game. Invariant: while the game
/// is in Strategy, `active` indexes a player not in `passed`, unless `passed`
/// covers the whole order (at which point the phase machine is advancing).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    /// Seat order, fixed at game start.
    pub order: Vec<PlayerId>,
    /// Cursor into `order`.
    pub active: usize,
    /// Players that passed this round.
    pub passed: BTreeSet<PlayerId>,
}

impl TurnState {
    pub fn new(order: Vec<PlayerId>) -> Self {
        Self {
            order,
            active: 0,
            passed: BTreeSet::new(),
        }
    }

    pub fn active_player(&self) -> PlayerId {
        self.order[self.active]
    }

    pub fn all_passed(&self) -> bool {
        self.order.iter().all(|id| self.passed.contains(id))
    }

    /// Moves the cursor to the next player not in `passed`, wrapping around.
    /// No-op when everyone has passed.
    pub fn advance(&mut self) {
        let n = self.order.len();
        for offset in 1..=n {
            let index = (self.active + offset) % n;
            if !self.passed.contains(&self.order[index]) {
                self.active = index;
                return;
            }
        }
    }

    /// Resets pass state for a new round and parks the cursor on the first
    /// seat still in the game.
    pub fn reset_for_round(&mut self, eliminated: impl Fn(PlayerId) -> bool) {
        self.passed.clear();
        self.active = self
            .order
            .iter()
            .position(|&id| !eliminated(id))
            .unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(order: &[u8]) -> TurnState {
        TurnState::new(order.iter().map(|&n| PlayerId(n)).collect())
    }

    #[test]
    fn advance_skips_passed_players() {
        let mut state = turn(&[1, 2, 3]);
        state.passed.insert(PlayerId(2));
        state.advance();
        assert_eq!(state.active_player(), PlayerId(3));
        state.advance();
        assert_eq!(state.active_player(), PlayerId(1));
    }

    #[test]
    fn all_passed_detects_full_round() {
        let mut state = turn(&[1, 2]);
        assert!(!state.all_passed());
        state.passed.insert(PlayerId(1));
        state.passed.insert(PlayerId(2));
        assert!(state.all_passed());
    }
}
