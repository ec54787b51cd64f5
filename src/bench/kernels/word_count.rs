//! Synthetic text building and word counting

use crate::bench::rng::BenchRng;
use crate::models::KernelResult;

pub const ITERATIONS: usize = 500;

/// Capacity of the text buffer in bytes
pub const TEXT_CAPACITY: usize = 512;
/// Inclusive lower bound on words per text
pub const MIN_WORDS: i32 = 16;
/// Exclusive upper bound on words per text
pub const MAX_WORDS: i32 = 32;

pub const TEST_WORDS: [&str; 32] = [
    "lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "consectetur",
    "adipiscing",
    "elit",
    "sed",
    "tristique",
    "ante",
    "libero",
    "eu",
    "sodales",
    "arcu",
    "euismod",
    "sit",
    "amet",
    "duis",
    "nec",
    "consequat",
    "metus",
    "donec",
    "ut",
    "lectus",
    "vel",
    "dui",
    "blandit",
    "blandit",
    "nam",
    "luctus",
    "scelerisque",
];

const fn longest_word_len() -> usize {
    let mut longest = 0;
    let mut i = 0;
    while i < TEST_WORDS.len() {
        if TEST_WORDS[i].len() > longest {
            longest = TEST_WORDS[i].len();
        }
        i += 1;
    }
    longest
}

// Worst case: every word is the longest one, each followed by a separator.
const _: () = assert!((longest_word_len() + 1) * (MAX_WORDS as usize - 1) <= TEXT_CAPACITY);

fn is_whitespace(c: u8) -> bool {
    matches!(c, b'\n' | b' ' | b'\t' | b'\r')
}

/// Count whitespace-delimited words.
///
/// Whitespace is space, tab, CR and LF; everything else is part of a word.
pub fn count_words(text: &[u8]) -> u32 {
    let mut count = 0;
    let mut in_word = false;

    for &c in text {
        if is_whitespace(c) {
            if in_word {
                count += 1;
            }
            in_word = false;
        } else {
            in_word = true;
        }
    }

    if in_word {
        count += 1;
    }

    count
}

/// Write `number_of_words` random lexicon words separated by single spaces
/// into `text`, returning the used length.
///
/// `number_of_words` must be below `MAX_WORDS`. Exactly that many words are
/// drawn, so the generator advances one step per word; scores are not
/// comparable with builds that draw one word fewer per text.
pub fn create_test_text(
    rng: &mut BenchRng,
    text: &mut [u8; TEXT_CAPACITY],
    number_of_words: usize,
) -> usize {
    debug_assert!(number_of_words < MAX_WORDS as usize);

    let mut len = 0;
    for i in 0..number_of_words {
        if i > 0 {
            text[len] = b' ';
            len += 1;
        }
        let word = TEST_WORDS[rng.next_range(0, TEST_WORDS.len() as i32) as usize].as_bytes();
        text[len..len + word.len()].copy_from_slice(word);
        len += word.len();
    }

    len
}

/// Build and count `ITERATIONS` texts; result is the integer average word count
pub fn bench_word_count(rng: &mut BenchRng, text: &mut [u8; TEXT_CAPACITY]) -> KernelResult {
    let mut total: i32 = 0;

    for _ in 0..ITERATIONS {
        let number_of_words = rng.next_range(MIN_WORDS, MAX_WORDS) as usize;
        let len = create_test_text(rng, text, number_of_words);
        total += count_words(&text[..len]) as i32;
    }

    KernelResult::Signed(total / ITERATIONS as i32)
}
