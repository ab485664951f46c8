//! Injectable randomness.
//!
//! Effects never reach for an ambient generator: every random draw goes
//! through a [`RandomSource`] handed in by the caller. [`Xorshift64`] is the
//! seedable default; [`FixedSource`] replays scripted unit values so tests
//! can place points exactly.

use serde::{Deserialize, Serialize};

/// A uniform random number source over real intervals.
pub trait RandomSource {
    /// Returns a uniformly distributed f64 in [0, 1).
    fn next_unit(&mut self) -> f64;

    /// Returns a uniformly distributed f64 in [min, max).
    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_unit() * (max - min)
    }
}

/// Xorshift64 deterministic PRNG. Same seed always produces the same sequence.
///
/// Shift parameters (13, 7, 17). A seed of 0 is replaced with a non-zero
/// fallback since zero is a fixed point of the algorithm.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

impl RandomSource for Xorshift64 {
    /// Upper 53 bits of `next_u64()` over 2^53, full mantissa precision.
    fn next_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Replays a fixed list of unit values, cycling when exhausted.
///
/// Values are clamped into [0, 1) on construction. An empty script yields 0.0.
#[derive(Debug, Clone)]
pub struct FixedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl FixedSource {
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// A source that always returns the midpoint of the requested range.
    pub fn midpoint() -> Self {
        Self::new(vec![0.5])
    }
}

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // If this breaks, every recorded scene replay with this seed changes.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_does_not_produce_all_zeros() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xorshift64::new(7);
        let mut b = Xorshift64::new(7);
        for i in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64(), "diverged at index {i}");
        }
    }

    #[test]
    fn range_handles_symmetric_velocity_interval() {
        let mut rng = Xorshift64::new(12345);
        for i in 0..10_000 {
            let v = rng.range(-0.4, 0.4);
            assert!((-0.4..0.4).contains(&v), "range = {v} at iteration {i}");
        }
    }

    #[test]
    fn fixed_source_cycles_script() {
        let mut src = FixedSource::new(vec![0.0, 0.5]);
        assert_eq!(src.range(0.0, 10.0), 0.0);
        assert_eq!(src.range(0.0, 10.0), 5.0);
        assert_eq!(src.range(0.0, 10.0), 0.0);
    }

    #[test]
    fn fixed_source_midpoint() {
        let mut src = FixedSource::midpoint();
        assert_eq!(src.range(-0.4, 0.4), 0.0);
        assert_eq!(src.range(0.0, 300.0), 150.0);
    }

    #[test]
    fn fixed_source_clamps_into_half_open_interval() {
        let mut src = FixedSource::new(vec![1.0, -3.0]);
        assert!(src.next_unit() < 1.0);
        assert_eq!(src.next_unit(), 0.0);
    }

    #[test]
    fn empty_fixed_source_yields_zero() {
        let mut src = FixedSource::new(Vec::new());
        assert_eq!(src.next_unit(), 0.0);
    }

    #[test]
    fn serialization_roundtrip_preserves_state() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for i in 0..100 {
            assert_eq!(rng.next_u64(), restored.next_u64(), "diverged at {i}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_unit_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_unit();
                    prop_assert!((0.0..1.0).contains(&v), "next_unit = {v}");
                }
            }

            #[test]
            fn range_in_bounds_for_any_seed_and_range(
                seed: u64,
                min in -1e6_f64..1e6,
                max in -1e6_f64..1e6,
            ) {
                prop_assume!(min < max);
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.range(min, max);
                    prop_assert!(v >= min && v < max, "range({min}, {max}) = {v}");
                }
            }
        }
    }
}
