//! CRC-32 over random printable bytes
//!
//! The lookup table folds the usual pre- and post-inversion into its
//! entries (each entry carries a `0xFF000000` XOR), so the running value
//! starts at zero and needs no final XOR while still producing the
//! standard reflected CRC-32.

use crate::bench::rng::BenchRng;
use crate::models::KernelResult;
use std::sync::OnceLock;

pub const ITERATIONS: usize = 1000;

/// Bytes hashed per iteration
pub const DATA_SIZE: usize = 128;

const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Lowest and one-past-highest byte values written to the input buffer
const PRINTABLE_LOW: i32 = 32;
const PRINTABLE_HIGH: i32 = 126;

static TABLE: OnceLock<[u32; 256]> = OnceLock::new();

fn crc32_for_byte(mut r: u32) -> u32 {
    for _ in 0..8 {
        r = (if r & 1 != 0 { 0 } else { POLYNOMIAL }) ^ (r >> 1);
    }
    r ^ 0xFF00_0000
}

/// Lookup table, built on first use
pub fn table() -> &'static [u32; 256] {
    TABLE.get_or_init(|| {
        let mut table = [0u32; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = crc32_for_byte(i as u32);
        }
        table
    })
}

/// CRC-32 of `data`
pub fn crc32(data: &[u8]) -> u32 {
    let table = table();
    data.iter().fold(0u32, |crc, &byte| {
        table[((crc as u8) ^ byte) as usize] ^ (crc >> 8)
    })
}

fn fill_test_data(rng: &mut BenchRng, data: &mut [u8]) {
    for byte in data.iter_mut() {
        *byte = rng.next_range(PRINTABLE_LOW, PRINTABLE_HIGH) as u8;
    }
}

/// Hash `ITERATIONS` random buffers; result is the XOR of all hashes
pub fn bench_crc32_hashes(rng: &mut BenchRng, data: &mut [u8; DATA_SIZE]) -> KernelResult {
    let mut result_hash = 0u32;

    for _ in 0..ITERATIONS {
        fill_test_data(rng, data);
        result_hash ^= crc32(&data[..]);
    }

    KernelResult::Unsigned(result_hash)
}
