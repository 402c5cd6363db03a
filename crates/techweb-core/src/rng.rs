//! Deterministic PRNG for research use (bonus topic draws).
//!
//! Uses the SplitMix64 algorithm: fast, 8 bytes of state, excellent
//! statistical properties, and trivially serializable for saves.

/// SplitMix64 pseudo-random number generator.
///
/// Deterministic across platforms, so a campaign seeded the same way draws
/// the same bonus topics.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SimRng {
    state: u64,
}

impl SimRng {
    /// Create a new RNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generate the next `u64` in the sequence.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform index in `0..len`. Returns 0 when `len` is 0.
    ///
    /// Maps the 64-bit output onto the range with a widening multiply,
    /// which keeps the bias below 2^-32 for any realistic pool size.
    pub fn below(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let wide = (self.next_u64() as u128) * (len as u128);
        (wide >> 64) as usize
    }

    /// Pick one element of `items` uniformly, or `None` if it is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.below(items.len());
        items.get(idx)
    }

    /// Get the internal state (for hashing/serialization).
    pub fn state(&self) -> u64 {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let mut a = SimRng::new(42);
        let mut b = SimRng::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = SimRng::new(1);
        let mut b = SimRng::new(2);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn below_stays_in_range() {
        let mut rng = SimRng::new(7);
        for len in 1..20usize {
            for _ in 0..50 {
                assert!(rng.below(len) < len);
            }
        }
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn below_roughly_uniform() {
        let mut rng = SimRng::new(12345);
        let mut buckets = [0u32; 4];
        for _ in 0..8_000 {
            buckets[rng.below(4)] += 1;
        }
        // Expect ~2000 each (very generous tolerance).
        for hits in buckets {
            assert!((1600..=2400).contains(&hits), "bucket count {hits}");
        }
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = SimRng::new(3);
        let empty: [u32; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert_eq!(rng.choose(&[9]), Some(&9));
    }

    #[test]
    fn serialization_round_trip() {
        let mut rng = SimRng::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }

        let json = serde_json::to_string(&rng).unwrap();
        let restored: SimRng = serde_json::from_str(&json).unwrap();
        assert_eq!(rng, restored);

        let mut rng2 = restored;
        for _ in 0..10 {
            assert_eq!(rng.next_u64(), rng2.next_u64());
        }
    }
}
