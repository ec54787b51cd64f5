//! Deterministic pseudo-random generator
//!
//! A 15-bit linear congruential generator. The output sequence for a given
//! seed is part of the score contract: both kernel selection and kernel
//! inputs are drawn from it, so it must never change.

/// Multiplier of the LCG step
const MULTIPLIER: i32 = 214_013;
/// Increment of the LCG step
const INCREMENT: i32 = 2_531_011;
/// Outputs are masked to 15 bits
pub const RNG_MAX: i32 = (1 << 15) - 1;

/// Linear congruential generator with a single 32-bit register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchRng {
    state: i32,
}

impl BenchRng {
    /// Create a generator seeded with `seed`
    pub fn new(seed: i32) -> Self {
        Self { state: seed }
    }

    /// Reset the register. Any value is accepted.
    pub fn seed(&mut self, seed: i32) {
        self.state = seed;
    }

    /// Current register value
    pub fn state(&self) -> i32 {
        self.state
    }

    /// Advance the generator and return the new state, in `0..=32767`
    pub fn next_int(&mut self) -> i32 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT)
            & RNG_MAX;
        self.state
    }

    /// Draw a value in `low..high`.
    ///
    /// Callers must guarantee `high > low`; a zero-width range divides by zero.
    pub fn next_range(&mut self, low: i32, high: i32) -> i32 {
        let range = high - low;
        low + self.next_int() % range
    }
}

impl Default for BenchRng {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::BENCH_RND_SEED;

    const REFERENCE_2137: [i32; 16] = [
        10680, 411, 17906, 5357, 21500, 4815, 25174, 20417, 29568, 17475, 7674, 11477, 11332,
        10743, 15582, 24617,
    ];

    #[test]
    fn test_reference_sequence() {
        let mut rng = BenchRng::new(BENCH_RND_SEED);
        for (i, &expected) in REFERENCE_2137.iter().enumerate() {
            assert_eq!(rng.next_int(), expected, "mismatch at output {}", i);
        }
    }

    #[test]
    fn test_reseed_restarts_sequence() {
        let mut rng = BenchRng::new(BENCH_RND_SEED);
        let first: Vec<i32> = (0..8).map(|_| rng.next_int()).collect();
        rng.seed(BENCH_RND_SEED);
        let second: Vec<i32> = (0..8).map(|_| rng.next_int()).collect();
        assert_eq!(first, second);
        assert_eq!(&first[..], &REFERENCE_2137[..8]);
    }

    #[test]
    fn test_degenerate_seeds_are_accepted() {
        let mut rng = BenchRng::new(0);
        assert_eq!(
            (0..4).map(|_| rng.next_int()).collect::<Vec<_>>(),
            vec![7875, 3706, 23381, 8388]
        );

        let mut rng = BenchRng::new(-5);
        assert_eq!(
            (0..4).map(|_| rng.next_int()).collect::<Vec<_>>(),
            vec![19154, 1613, 32732, 3887]
        );

        let mut rng = BenchRng::new(i32::MAX);
        for _ in 0..1000 {
            let v = rng.next_int();
            assert!((0..=RNG_MAX).contains(&v));
        }
    }

    #[test]
    fn test_kernel_selection_prefix() {
        let mut rng = BenchRng::new(BENCH_RND_SEED);
        let picks: Vec<i32> = (0..10).map(|_| rng.next_range(0, 5)).collect();
        assert_eq!(picks, vec![0, 1, 1, 2, 0, 0, 4, 2, 3, 0]);
    }

    #[test]
    fn test_range_bounds() {
        let mut rng = BenchRng::new(BENCH_RND_SEED);
        for (low, high) in [(0, 1), (0, 5), (16, 32), (32, 126), (1, 64), (0, 256), (-10, 10)] {
            for _ in 0..2000 {
                let v = rng.next_range(low, high);
                assert!(v >= low && v < high, "{} not in [{}, {})", v, low, high);
            }
        }
    }
}
