//! RNG module - seeded generator for fruit placement
//!
//! A small LCG keeps runs reproducible: the same seed and the same sequence
//! of moves place every fruit on the same cell.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// `max` must be non-zero.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Current internal state (usable as a seed to replay the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..200 {
            assert!(rng.next_range(max) < max);
        }
    }

    #[test]
    fn test_state_replays_sequence() {
        let mut rng = SimpleRng::new(99);
        rng.next_u32();
        let mut replay = SimpleRng::new(rng.state());
        assert_eq!(rng.next_u32(), replay.next_u32());
    }
}
