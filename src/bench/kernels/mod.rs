//! Workload kernels
//!
//! Each kernel fills its own scratch buffer from the shared generator,
//! computes a value and returns it. Kernels keep no state between calls.

pub mod crc32;
pub mod quick_sort;
pub mod random_numbers;
pub mod rle;
pub mod word_count;

use crate::bench::rng::BenchRng;
use crate::models::{BenchmarkKind, KernelResult};

/// Fixed-size buffers the kernels write their synthetic input into.
///
/// Owned by the caller and reused across invocations, so a run performs no
/// allocation after setup.
#[derive(Debug, Clone)]
pub struct Scratch {
    pub text: [u8; word_count::TEXT_CAPACITY],
    pub crc_data: [u8; crc32::DATA_SIZE],
    pub rle_input: [u8; rle::DATA_SIZE],
    pub rle_output: [u8; rle::OUTPUT_CAPACITY],
    pub sort_data: [i32; quick_sort::DATA_SIZE],
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            text: [0; word_count::TEXT_CAPACITY],
            crc_data: [0; crc32::DATA_SIZE],
            rle_input: [0; rle::DATA_SIZE],
            rle_output: [0; rle::OUTPUT_CAPACITY],
            sort_data: [0; quick_sort::DATA_SIZE],
        }
    }
}

impl Default for Scratch {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one invocation of the kernel for `kind`
pub fn run_kernel(kind: BenchmarkKind, rng: &mut BenchRng, scratch: &mut Scratch) -> KernelResult {
    match kind {
        BenchmarkKind::RandomNumbers => random_numbers::bench_random_numbers(rng),
        BenchmarkKind::WordCount => word_count::bench_word_count(rng, &mut scratch.text),
        BenchmarkKind::Crc32 => crc32::bench_crc32_hashes(rng, &mut scratch.crc_data),
        BenchmarkKind::RunLengthEncode => {
            rle::bench_rle_compression(rng, &mut scratch.rle_input, &mut scratch.rle_output)
        }
        BenchmarkKind::QuickSort => quick_sort::bench_quick_sort(rng, &mut scratch.sort_data),
    }
}
