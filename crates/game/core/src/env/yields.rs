//! Colony income and end-game VP oracle.
//!
//! The colonization subsystem owns the per-hex yield and final-tally rules;
//! the engine consumes them as pure lookups during Upkeep and at game end.

use crate::state::{GameState, HexState, PlayerId};

/// Per-round income from one source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Income {
    pub money: u32,
    pub science: u32,
    pub materials: u32,
}

impl Income {
    pub fn total(&self) -> u32 {
        self.money + self.science + self.materials
    }

    pub fn add(&mut self, other: Income) {
        self.money += other.money;
        self.science += other.science;
        self.materials += other.materials;
    }
}

/// Read-only income/VP calculator for colonies.
pub trait ColonyYieldOracle: Send + Sync {
    /// Income produced by one hex for its owner this round.
    fn hex_income(&self, hex: &HexState) -> Income;

    /// End-game VP for controlled systems.
    fn colony_vp(&self, state: &GameState, player: PlayerId) -> u32;
}
