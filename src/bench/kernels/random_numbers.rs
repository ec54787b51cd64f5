//! Decaying average over raw generator output

use crate::bench::rng::BenchRng;
use crate::models::KernelResult;

pub const ITERATIONS: usize = 1000;

/// Fold `ITERATIONS` draws into `avg = (avg + x) / 2`
pub fn bench_random_numbers(rng: &mut BenchRng) -> KernelResult {
    let mut avg = 0.0f64;
    for _ in 0..ITERATIONS {
        avg += rng.next_int() as f64;
        avg /= 2.0;
    }

    KernelResult::Float(avg)
}
