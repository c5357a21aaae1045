use serde::{Deserialize, Serialize};

/// Tiny deterministic RNG used to generate rosters.
///
/// Reproducible across platforms so a failing seed can be replayed anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Create a new deterministic RNG from a seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: seed ^ 0x9E37_79B9_7F4A_7C15,
        }
    }

    /// Next pseudo-random `u64`.
    pub const fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        // Low LCG bits have short periods; hand out the high half mixed down.
        self.state ^ (self.state >> 33)
    }

    /// Next value in `[0, upper_exclusive)`.
    pub const fn next_bounded(&mut self, upper_exclusive: u64) -> u64 {
        if upper_exclusive == 0 {
            return 0;
        }
        self.next_u64() % upper_exclusive
    }

    /// Next `u32` in `[0, upper_exclusive)`.
    pub fn next_u32_below(&mut self, upper_exclusive: u32) -> u32 {
        u32::try_from(self.next_bounded(u64::from(upper_exclusive))).unwrap_or(0)
    }

    /// Next length in `[0, upper_inclusive]`.
    pub fn next_len(&mut self, upper_inclusive: usize) -> usize {
        let upper = u64::try_from(upper_inclusive).unwrap_or(u64::MAX);
        usize::try_from(self.next_bounded(upper.saturating_add(1))).unwrap_or(0)
    }

    /// Bernoulli trial with integer percent.
    pub fn hit_rate_percent(&mut self, percent: u8) -> bool {
        if percent == 0 {
            return false;
        }
        if percent >= 100 {
            return true;
        }
        self.next_bounded(100) < u64::from(percent)
    }

    /// Fisher-Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_len(i);
            items.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = DeterministicRng::new(7);
        let mut b = DeterministicRng::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn bounded_values_stay_in_range() {
        let mut rng = DeterministicRng::new(1);
        for _ in 0..1000 {
            assert!(rng.next_u32_below(13) < 13);
            assert!(rng.next_len(4) <= 4);
        }
        assert_eq!(rng.next_bounded(0), 0);
    }

    #[test]
    fn percent_extremes() {
        let mut rng = DeterministicRng::new(3);
        assert!(!rng.hit_rate_percent(0));
        assert!(rng.hit_rate_percent(100));
    }

    #[test]
    fn shuffle_keeps_elements() {
        let mut rng = DeterministicRng::new(11);
        let mut items: Vec<u32> = (0..50).collect();
        rng.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<u32>>());
    }
}
