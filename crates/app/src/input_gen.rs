//! Sample text generation.
//!
//! When no input is given, we generate text with a mix of compression
//! characteristics so each codec has something to work with:
//! - Runs of a single letter (good for RLE)
//! - Word-like text over a small alphabet (good for Huffman)
//! - Short phrases repeated verbatim (good for LZW)
//!
//! The alphabet never includes digits, so RLE round-trips every sample.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const WORD_ALPHABET: &[u8] = b"etaoinshrdlu etaoin ,.\n";

/// Generate `len` symbols of sample text from `seed`.
pub fn generate_sample_text(seed: u64, len: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut text = String::with_capacity(len);

    while text.len() < len {
        let remaining = len - text.len();
        let span = remaining.min(rng.gen_range(8..=64));

        match rng.gen_range(0..10u8) {
            // 30% runs of one letter
            0..=2 => {
                let letter = LETTERS[rng.gen_range(0..LETTERS.len())] as char;
                text.extend(std::iter::repeat(letter).take(span));
            }

            // 40% word-like text
            3..=6 => {
                for _ in 0..span {
                    let idx = rng.gen_range(0..WORD_ALPHABET.len());
                    text.push(WORD_ALPHABET[idx] as char);
                }
            }

            // 30% a short phrase, repeated
            _ => {
                let phrase = generate_phrase(&mut rng);
                text.extend(phrase.chars().cycle().take(span));
            }
        }
    }

    text
}

/// Generate a short lowercase phrase.
fn generate_phrase(rng: &mut ChaCha8Rng) -> String {
    let phrase_len = rng.gen_range(3..=12);
    (0..phrase_len)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
        .collect()
}
