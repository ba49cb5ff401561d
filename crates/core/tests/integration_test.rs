//! Integration tests for the public codec API.
//!
//! These exercise each codec end to end (compress -> decompress) through the
//! module functions and through the `Codec` trait, on fixed samples and on
//! seeded random corpora.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use textpack_core::{
    error::{CorruptStreamError, FormatError},
    huffman::{self, FrequencyTable, HuffmanTree},
    lzw, rle, round_trip, Codec, CodecKind, Error, Huffman, Lzw, Rle,
};

const SAMPLES: &[&str] = &[
    "a",
    "ab",
    "aaaa",
    "TOBEORNOTTOBEORTOBEORNOT",
    "the quick brown fox jumps over the lazy dog",
    "aaaaaaaaaabbbbbbbbbbcccccccccc dddddddddd",
    "mississippi",
    "  leading and trailing spaces  ",
    "line one\nline two\n\ttabbed",
];

/// Random text over a small alphabet, with occasional long runs.
fn random_text(rng: &mut ChaCha8Rng, len: usize) -> String {
    let alphabet: Vec<char> = "abcdefghij .,\nàé".chars().collect();
    let mut text = String::with_capacity(len);
    while text.chars().count() < len {
        let symbol = alphabet[rng.gen_range(0..alphabet.len())];
        let run = if rng.gen_bool(0.2) { rng.gen_range(2..40) } else { 1 };
        text.extend(std::iter::repeat(symbol).take(run));
    }
    text
}

#[test]
fn test_round_trip_all_codecs_on_samples() {
    for &sample in SAMPLES {
        let encoded = huffman::compress(sample).expect("huffman compress failed");
        assert_eq!(huffman::decompress(&encoded.bits, &encoded.tree).unwrap(), sample);

        let codes = lzw::compress(sample).expect("lzw compress failed");
        assert_eq!(lzw::decompress(&codes).unwrap(), sample);

        let runs = rle::compress(sample).expect("rle compress failed");
        assert_eq!(rle::decompress(&runs).unwrap(), sample);
    }
}

#[test]
fn test_round_trip_seeded_corpus() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for _ in 0..50 {
        let len = rng.gen_range(1..2000);
        let text = random_text(&mut rng, len);

        assert!(round_trip(&Huffman, &text).unwrap().verified());
        assert!(round_trip(&Lzw, &text).unwrap().verified());
        assert!(round_trip(&Rle::default(), &text).unwrap().verified());
    }
}

#[test]
fn test_huffman_prefix_free() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..20 {
        let text = random_text(&mut rng, 500);
        let freq = FrequencyTable::from_text(&text).unwrap();
        assert!(freq.len() >= 2);

        let table = HuffmanTree::build(&freq).unwrap().code_table();
        assert_eq!(table.len(), freq.len());
        assert!(table.is_prefix_free());
    }
}

#[test]
fn test_huffman_degenerate() {
    let encoded = huffman::compress("aaaa").unwrap();
    assert!(!encoded.bits.is_empty());
    assert_eq!(huffman::decompress(&encoded.bits, &encoded.tree).unwrap(), "aaaa");
}

#[test]
fn test_huffman_skewed_input_does_not_expand() {
    let text = format!("{}{}{}", "e".repeat(500), "t".repeat(120), "xyz".repeat(10));
    let encoded = huffman::compress(&text).unwrap();

    assert!(encoded.bits.len() <= text.chars().count() * 8);
    assert!(huffman::ratio(&text, &encoded.bits) > 0.0);
}

#[test]
fn test_huffman_truncated_stream() {
    let encoded = huffman::compress("abcdefgh").unwrap();
    // Every code is 3 bits long for 8 equally frequent symbols.
    let truncated = huffman::HuffmanEncoded {
        bits: encoded.bits.to_string()[..encoded.bits.len() - 1].parse().unwrap(),
        tree: encoded.tree.clone(),
    };

    assert!(matches!(
        Huffman.decompress(&truncated),
        Err(Error::CorruptStream(CorruptStreamError::TruncatedCode { .. }))
    ));
}

#[test]
fn test_lzw_classic_string() {
    let text = "TOBEORNOTTOBEORTOBEORNOT";
    let mut encoder = lzw::Encoder::new();
    for symbol in text.chars() {
        encoder.push(symbol).unwrap();
    }
    let dictionary_len = encoder.dictionary_len();
    let codes = encoder.finish();

    // One new entry per emitted code, except the final flush.
    assert_eq!(dictionary_len, lzw::SEED_SIZE as usize + codes.len() - 1);
    assert_eq!(lzw::decompress(&codes).unwrap(), text);
}

#[test]
fn test_lzw_code_beyond_dictionary() {
    let mut codes = lzw::compress("abababab").unwrap();
    // Before the last of n codes the decoder holds 256 + (n - 2) entries.
    let next_code = lzw::SEED_SIZE + codes.len() as u32 - 2;
    *codes.last_mut().unwrap() = next_code + 2;

    assert!(matches!(
        lzw::decompress(&codes),
        Err(Error::CorruptStream(CorruptStreamError::UnknownCode { .. }))
    ));
}

#[test]
fn test_rle_examples() {
    assert_eq!(rle::compress("aaabbbbcc").unwrap(), "a3b4c2");
    assert_eq!(rle::decompress("a3b4c2").unwrap(), "aaabbbbcc");
    assert_eq!(rle::compress("a").unwrap(), "a");
    assert_eq!(rle::decompress("a").unwrap(), "a");
}

#[test]
fn test_rle_overflowing_count() {
    assert!(matches!(
        rle::decompress("z184467440737095516160"),
        Err(Error::Format(FormatError::CountOverflow { .. }))
    ));
}

#[test]
fn test_rle_unallocatable_count() {
    let compressed = "a18446744073709551615".to_string();
    assert!(matches!(
        Rle::default().decompress(&compressed),
        Err(Error::Format(FormatError::CountOverflow { position: 1 }))
    ));
}

#[test]
fn test_empty_input_rejected_by_every_codec() {
    assert!(matches!(huffman::compress(""), Err(Error::EmptyInput)));
    assert!(matches!(lzw::compress(""), Err(Error::EmptyInput)));
    assert!(matches!(rle::compress(""), Err(Error::EmptyInput)));

    for kind in CodecKind::ALL {
        let result = match kind {
            CodecKind::Huffman => round_trip(&Huffman, ""),
            CodecKind::Lzw => round_trip(&Lzw, ""),
            CodecKind::Rle => round_trip(&Rle::default(), ""),
        };
        assert!(matches!(result, Err(Error::EmptyInput)), "{kind} accepted empty input");
    }
}

#[test]
fn test_concurrent_calls_are_independent() {
    let handles: Vec<_> = (0..8u64)
        .map(|seed| {
            std::thread::spawn(move || {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let text = random_text(&mut rng, 1000);
                let a = huffman::compress(&text).unwrap();
                let b = lzw::compress(&text).unwrap();
                (
                    text.clone(),
                    huffman::decompress(&a.bits, &a.tree).unwrap(),
                    lzw::decompress(&b).unwrap(),
                )
            })
        })
        .collect();

    for handle in handles {
        let (text, from_huffman, from_lzw) = handle.join().unwrap();
        assert_eq!(from_huffman, text);
        assert_eq!(from_lzw, text);
    }
}
