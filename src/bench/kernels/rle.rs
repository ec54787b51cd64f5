//! Run-length encoding of randomly sized byte runs
//!
//! Encoding: a run of one byte is copied as is; a longer run is written as
//! the byte twice followed by the run length as a little-endian `u16`.
//! Two equal literal bytes in a row are indistinguishable from a run
//! marker, so the format is not losslessly decodable.

use crate::bench::rng::BenchRng;
use crate::models::KernelResult;

pub const ITERATIONS: usize = 250;

/// Input bytes per iteration
pub const DATA_SIZE: usize = 1024;
/// Worst case output is two-byte runs, each growing to four bytes
pub const OUTPUT_CAPACITY: usize = DATA_SIZE * 2;

const MIN_RUN: i32 = 1;
const MAX_RUN: i32 = 64;

fn emit_run(output: &mut [u8], at: usize, value: u8, run: u16) -> usize {
    if run == 1 {
        output[at] = value;
        1
    } else {
        let [lo, hi] = run.to_le_bytes();
        output[at..at + 4].copy_from_slice(&[value, value, lo, hi]);
        4
    }
}

/// Encode `input` into `output`, returning the number of bytes written.
///
/// `output` must hold at least `2 * input.len()` bytes.
pub fn encode_into(input: &[u8], output: &mut [u8]) -> usize {
    debug_assert!(output.len() >= input.len() * 2);

    let Some((&first, rest)) = input.split_first() else {
        return 0;
    };

    let mut written = 0;
    let mut last_byte = first;
    let mut run: u16 = 1;

    for &byte in rest {
        if byte == last_byte && run < u16::MAX {
            run += 1;
        } else {
            written += emit_run(output, written, last_byte, run);
            last_byte = byte;
            run = 1;
        }
    }
    written += emit_run(output, written, last_byte, run);

    written
}

/// Allocating convenience wrapper around [`encode_into`]
pub fn encode(input: &[u8]) -> Vec<u8> {
    let mut output = vec![0u8; input.len() * 2];
    let len = encode_into(input, &mut output);
    output.truncate(len);
    output
}

fn fill_test_data(rng: &mut BenchRng, data: &mut [u8]) {
    let mut chunk_left = 0;
    let mut chunk_value = 0u8;

    for byte in data.iter_mut() {
        if chunk_left == 0 {
            chunk_left = rng.next_range(MIN_RUN, MAX_RUN);
            chunk_value = rng.next_range(0, 256) as u8;
        }
        *byte = chunk_value;
        chunk_left -= 1;
    }
}

/// Encode `ITERATIONS` random buffers; result is the mean compressed size as
/// a percentage of the input size
pub fn bench_rle_compression(
    rng: &mut BenchRng,
    input: &mut [u8; DATA_SIZE],
    output: &mut [u8; OUTPUT_CAPACITY],
) -> KernelResult {
    let mut ratio_sum = 0.0f64;

    for _ in 0..ITERATIONS {
        fill_test_data(rng, input);
        let compressed = encode_into(&input[..], &mut output[..]);
        ratio_sum += compressed as f64 / DATA_SIZE as f64;
    }

    KernelResult::Float((ratio_sum / ITERATIONS as f64) * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::BENCH_RND_SEED;

    #[test]
    fn test_single_run() {
        assert_eq!(encode(&[0x41; 5]), vec![0x41, 0x41, 0x05, 0x00]);
    }

    #[test]
    fn test_distinct_literals_pass_through() {
        assert_eq!(encode(&[0x01, 0x02, 0x03]), vec![0x01, 0x02, 0x03]);
        assert_eq!(encode(&[0x07]), vec![0x07]);
        assert!(encode(&[]).is_empty());
    }

    #[test]
    fn test_mixed_runs() {
        let input = [9, 9, 1, 2, 2, 2, 3];
        assert_eq!(encode(&input), vec![9, 9, 2, 0, 1, 2, 2, 3, 0, 3]);
    }

    #[test]
    fn test_long_run_length_is_little_endian() {
        let input = vec![0xEE; 300];
        assert_eq!(encode(&input), vec![0xEE, 0xEE, 0x2C, 0x01]);
    }

    #[test]
    fn test_run_longer_than_u16_is_split() {
        let input = vec![0u8; u16::MAX as usize + 3];
        assert_eq!(encode(&input), vec![0, 0, 0xFF, 0xFF, 0, 0, 3, 0]);
    }

    #[test]
    fn test_worst_case_fits_capacity() {
        let input: Vec<u8> = (0..DATA_SIZE).map(|i| (i / 2) as u8).collect();
        let mut output = [0u8; OUTPUT_CAPACITY];
        assert_eq!(encode_into(&input, &mut output), OUTPUT_CAPACITY);
    }

    #[test]
    fn test_fill_produces_bounded_runs() {
        let mut rng = BenchRng::new(BENCH_RND_SEED);
        let mut data = [0u8; DATA_SIZE];
        fill_test_data(&mut rng, &mut data);

        // Adjacent chunks may share a value, so only check the data is not uniform.
        assert!(data.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_reference_value() {
        let mut rng = BenchRng::new(BENCH_RND_SEED);
        let mut input = [0u8; DATA_SIZE];
        let mut output = [0u8; OUTPUT_CAPACITY];
        let pct = bench_rle_compression(&mut rng, &mut input, &mut output)
            .as_f64()
            .unwrap();
        assert!((pct - 12.555078125).abs() < 1e-9);
        assert_eq!(rng.state(), 32757);
    }
}
