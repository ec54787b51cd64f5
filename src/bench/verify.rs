//! Verification pass
//!
//! Runs every kernel once from the fixed seed and logs the raw results, so
//! a build can be checked against known-good output before timing it.

use crate::bench::kernels::{run_kernel, Scratch};
use crate::bench::rng::BenchRng;
use crate::bench::BENCH_RND_SEED;
use crate::models::{BenchmarkKind, KernelResult};
use tracing::info;

/// Reseed `rng` and run each kernel once in ordinal order
pub fn verify(rng: &mut BenchRng, scratch: &mut Scratch) -> Vec<(BenchmarkKind, KernelResult)> {
    rng.seed(BENCH_RND_SEED);
    info!("Verification:");

    BenchmarkKind::ALL
        .iter()
        .map(|&kind| {
            let result = run_kernel(kind, rng, scratch);
            info!("{}", kind.describe(result));
            (kind, result)
        })
        .collect()
}
