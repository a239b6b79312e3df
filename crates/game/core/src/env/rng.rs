//! Die-roll oracle for deterministic combat and draws.
//!
//! All randomness flows through a trait so the combat resolver can be tested
//! with scripted rolls. Implementations must be deterministic: the same seed
//! always produces the same value, which makes every battle replayable from
//! the game seed and action history.

use std::collections::VecDeque;
use std::sync::Mutex;

/// Deterministic randomness source.
///
/// The engine derives a fresh seed per event with [`compute_seed`]; stateless
/// implementations map each seed to one value.
pub trait DiceOracle: Send + Sync {
    /// Generate a random u32 from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a die with `sides` faces (1..=sides).
    fn roll_die(&self, seed: u64, sides: u8) -> u8 {
        ((self.next_u32(seed) % u32::from(sides.max(1))) + 1) as u8
    }

    /// Pick an index in `0..len`. Returns 0 for empty ranges.
    fn pick(&self, seed: u64, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        (self.next_u32(seed) as usize) % len
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: single multiply + xorshift + rotate, 64-bit state, 32-bit
/// output, good statistical quality. Stateless here: each call steps once
/// from the supplied seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgDice;

impl PcgDice {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl DiceOracle for PcgDice {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Scripted dice for tests: consumes a fixed queue of raw values, ignoring
/// seeds. `roll_die`/`pick` reduce the queued value modulo their range, so a
/// scripted `5` is a 6-sided roll of 6.
#[derive(Debug, Default)]
pub struct ScriptedDice {
    values: Mutex<VecDeque<u32>>,
    /// Returned when the script runs dry.
    fallback: u32,
}

impl ScriptedDice {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
            fallback: 0,
        }
    }

    pub fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = fallback;
        self
    }
}

impl DiceOracle for ScriptedDice {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.values
            .lock()
            .expect("scripted dice lock poisoned")
            .pop_front()
            .unwrap_or(self.fallback)
    }
}

/// Compute a deterministic seed from game state components.
///
/// Mixes the game seed, the action nonce, and two salts so that distinct
/// events within one action (each shot, each target pick) get independent
/// values. Constants are SplitMix64/FxHash multipliers.
pub fn compute_seed(game_seed: u64, nonce: u64, salt_a: u64, salt_b: u64) -> u64 {
    let mut hash = game_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= salt_a.wrapping_mul(0x517cc1b727220a95);
    hash ^= salt_b.wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let dice = PcgDice;
        assert_eq!(dice.next_u32(42), dice.next_u32(42));
        assert_ne!(dice.next_u32(42), dice.next_u32(43));
    }

    #[test]
    fn roll_die_stays_in_range() {
        let dice = PcgDice;
        for seed in 0..200 {
            let roll = dice.roll_die(seed, 6);
            assert!((1..=6).contains(&roll));
        }
    }

    #[test]
    fn scripted_dice_replays_queue() {
        let dice = ScriptedDice::new([5, 0, 2]);
        assert_eq!(dice.roll_die(1, 6), 6);
        assert_eq!(dice.roll_die(2, 6), 1);
        assert_eq!(dice.roll_die(3, 6), 3);
        // Dry queue falls back.
        assert_eq!(dice.roll_die(4, 6), 1);
    }

    #[test]
    fn compute_seed_separates_salts() {
        let a = compute_seed(7, 1, 0, 0);
        let b = compute_seed(7, 1, 1, 0);
        let c = compute_seed(7, 1, 0, 1);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
        assert_eq!(a, compute_seed(7, 1, 0, 0));
    }
}
