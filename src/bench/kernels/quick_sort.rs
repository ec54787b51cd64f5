//! Hoare-partition quicksort of a small integer array

use crate::bench::rng::BenchRng;
use crate::models::KernelResult;

pub const ITERATIONS: usize = 100;

/// Elements sorted per iteration
pub const DATA_SIZE: usize = 64;

const VALUE_LIMIT: i32 = 100;

/// Sort `values` in place.
///
/// Middle-element pivot, strict comparisons and recursion on both
/// partitions, with no small-slice fallback.
pub fn quick_sort(values: &mut [i32]) {
    if values.len() > 1 {
        sort_range(values, 0, values.len() as isize - 1);
    }
}

fn sort_range(values: &mut [i32], l: isize, r: isize) {
    let mut i = l;
    let mut j = r;
    let x = values[(l + (r - l) / 2) as usize];

    loop {
        while values[i as usize] < x {
            i += 1;
        }
        while values[j as usize] > x {
            j -= 1;
        }

        if i <= j {
            values.swap(i as usize, j as usize);
            i += 1;
            j -= 1;
        }

        if i >= j {
            break;
        }
    }

    if l < j {
        sort_range(values, l, j);
    }
    if r > i {
        sort_range(values, i, r);
    }
}

fn fill_test_data(rng: &mut BenchRng, values: &mut [i32]) {
    for v in values.iter_mut() {
        *v = rng.next_range(0, VALUE_LIMIT);
    }
}

/// Sort `ITERATIONS` random arrays; result is the wrapping sum of all
/// sorted elements
pub fn bench_quick_sort(rng: &mut BenchRng, values: &mut [i32; DATA_SIZE]) -> KernelResult {
    let mut sum = 0u32;

    for _ in 0..ITERATIONS {
        fill_test_data(rng, values);
        quick_sort(values);
        sum = values.iter().fold(sum, |acc, &v| acc.wrapping_add(v as u32));
    }

    KernelResult::Unsigned(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::BENCH_RND_SEED;

    fn assert_sorted_permutation(original: &[i32], sorted: &[i32]) {
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]), "not sorted: {:?}", sorted);
        let mut expected = original.to_vec();
        expected.sort_unstable();
        assert_eq!(sorted, &expected[..]);
    }

    #[test]
    fn test_small_inputs() {
        for input in [
            vec![],
            vec![1],
            vec![2, 1],
            vec![1, 2],
            vec![3, 3, 3],
            vec![5, 1, 4, 2, 3],
            vec![0, 0, 1, 0, 0],
            vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
        ] {
            let mut sorted = input.clone();
            quick_sort(&mut sorted);
            assert_sorted_permutation(&input, &sorted);
        }
    }

    #[test]
    fn test_generated_arrays() {
        let mut rng = BenchRng::new(BENCH_RND_SEED);
        let mut values = [0i32; DATA_SIZE];
        for _ in 0..200 {
            fill_test_data(&mut rng, &mut values);
            let original = values;
            quick_sort(&mut values);
            assert_sorted_permutation(&original, &values);
        }
    }

    #[test]
    fn test_reference_value() {
        let mut rng = BenchRng::new(BENCH_RND_SEED);
        let mut values = [0i32; DATA_SIZE];
        assert_eq!(
            bench_quick_sort(&mut rng, &mut values),
            KernelResult::Unsigned(316_564)
        );
        assert_eq!(rng.state(), 7513);
    }
}
