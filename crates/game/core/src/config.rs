//! Rule constants and tunable parameters.
//!
//! The engine mechanics are fixed; the numeric rule-table is supplied here so
//! hosts can run variant rule sets without touching the engine. Defaults
//! follow the standard rules.

use crate::state::ShipClass;

/// Tunable rule parameters consumed by the validator, combat resolver, and
/// phase machine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RulesConfig {
    /// Rounds after which the game ends at Cleanup (inclusive trigger:
    /// `round >= round_limit`).
    pub round_limit: u32,

    /// Money cost of an EXPLORE action (the claim disc is charged separately).
    pub explore_cost: u32,

    /// Money cost of an INFLUENCE claim.
    pub influence_cost: u32,

    /// Materials cost of an UPGRADE action.
    pub upgrade_cost: u32,

    /// Maximum ships a single faction may stack in one hex.
    pub hex_stack_cap: usize,

    /// Lower bound on the discounted research cost.
    pub research_min_cost: u32,

    /// Influence discs each player starts with.
    pub influence_discs: u8,

    /// Money charged per owned hex during Upkeep.
    pub disc_upkeep: u32,

    /// Sides on the combat die.
    pub die_sides: u8,

    /// A shot hits when `roll + computer - shield >= hit_threshold`.
    pub hit_threshold: i32,

    /// Natural-roll overrides: a max roll always hits, a 1 always misses.
    pub natural_rules: bool,

    /// Cannon volleys before a battle is declared a stalemate.
    pub max_combat_volleys: u32,

    /// VP credited for destroying a player-owned ship.
    pub vp_per_player_kill: u32,

    /// VP credited for destroying an ancient or guardian ship.
    pub vp_per_ancient_kill: u32,

    /// Initiative tie-break: classes earlier in this list fire first.
    /// Remaining ties fall back to ship id.
    pub initiative_precedence: [ShipClass; 4],
}

impl RulesConfig {
    pub const DEFAULT_ROUND_LIMIT: u32 = 9;
    pub const DEFAULT_MAX_COMBAT_VOLLEYS: u32 = 10;
    pub const DEFAULT_HIT_THRESHOLD: i32 = 6;
    pub const DEFAULT_INFLUENCE_DISCS: u8 = 11;

    pub fn new() -> Self {
        Self {
            round_limit: Self::DEFAULT_ROUND_LIMIT,
            explore_cost: 0,
            influence_cost: 0,
            upgrade_cost: 1,
            hex_stack_cap: 4,
            research_min_cost: 0,
            influence_discs: Self::DEFAULT_INFLUENCE_DISCS,
            disc_upkeep: 1,
            die_sides: 6,
            hit_threshold: Self::DEFAULT_HIT_THRESHOLD,
            natural_rules: true,
            max_combat_volleys: Self::DEFAULT_MAX_COMBAT_VOLLEYS,
            vp_per_player_kill: 1,
            vp_per_ancient_kill: 2,
            initiative_precedence: [
                ShipClass::Starbase,
                ShipClass::Interceptor,
                ShipClass::Cruiser,
                ShipClass::Dreadnought,
            ],
        }
    }

    /// Firing precedence of a class among equal initiatives (lower fires first).
    pub fn class_precedence(&self, class: ShipClass) -> usize {
        self.initiative_precedence
            .iter()
            .position(|&c| c == class)
            .unwrap_or(self.initiative_precedence.len())
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
