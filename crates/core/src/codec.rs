//! Common surface over the three codecs.
//!
//! Each codec is a small `Copy` value implementing [`Codec`]; the trait only
//! exists so round-trip measurement can be written once.

use std::fmt;
use std::str::FromStr;

use crate::error::Result;
use crate::huffman::{self, HuffmanEncoded};
use crate::lzw::{self, LzwCodes};
use crate::rle;

/// A lossless text codec.
pub trait Codec {
    /// Compressed form, printable for the driver.
    type Compressed: fmt::Display;

    /// Short lowercase name, as accepted by [`CodecKind::from_str`].
    const NAME: &'static str;

    fn compress(&self, input: &str) -> Result<Self::Compressed>;

    fn decompress(&self, compressed: &Self::Compressed) -> Result<String>;

    /// Size of the compressed form in bits, for ratio accounting.
    fn compressed_bits(&self, compressed: &Self::Compressed) -> usize;
}

/// Huffman coding; the compressed form carries its own tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct Huffman;

impl Codec for Huffman {
    type Compressed = HuffmanEncoded;
    const NAME: &'static str = "huffman";

    fn compress(&self, input: &str) -> Result<HuffmanEncoded> {
        huffman::compress(input)
    }

    fn decompress(&self, compressed: &HuffmanEncoded) -> Result<String> {
        huffman::decompress(&compressed.bits, &compressed.tree)
    }

    fn compressed_bits(&self, compressed: &HuffmanEncoded) -> usize {
        compressed.bits.len()
    }
}

/// LZW coding; codes are counted at the width of the final dictionary.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lzw;

impl Codec for Lzw {
    type Compressed = LzwCodes;
    const NAME: &'static str = "lzw";

    fn compress(&self, input: &str) -> Result<LzwCodes> {
        lzw::compress(input).map(LzwCodes)
    }

    fn decompress(&self, compressed: &LzwCodes) -> Result<String> {
        lzw::decompress(compressed.as_slice())
    }

    fn compressed_bits(&self, compressed: &LzwCodes) -> usize {
        compressed.bit_len()
    }
}

/// Run-length coding; output symbols are counted at 8 bits each.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rle {
    max_symbols: Option<usize>,
}

impl Rle {
    /// Refuse to decode more than `max_symbols` symbols.
    pub fn with_limit(max_symbols: usize) -> Self {
        Self {
            max_symbols: Some(max_symbols),
        }
    }
}

impl Codec for Rle {
    type Compressed = String;
    const NAME: &'static str = "rle";

    fn compress(&self, input: &str) -> Result<String> {
        rle::compress(input)
    }

    fn decompress(&self, compressed: &String) -> Result<String> {
        match self.max_symbols {
            Some(limit) => rle::decompress_bounded(compressed, limit),
            None => rle::decompress(compressed),
        }
    }

    fn compressed_bits(&self, compressed: &String) -> usize {
        compressed.chars().count() * 8
    }
}

/// Codec selector for drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecKind {
    Huffman,
    Lzw,
    Rle,
}

impl CodecKind {
    pub const ALL: [CodecKind; 3] = [CodecKind::Huffman, CodecKind::Lzw, CodecKind::Rle];

    pub fn name(self) -> &'static str {
        match self {
            CodecKind::Huffman => Huffman::NAME,
            CodecKind::Lzw => Lzw::NAME,
            CodecKind::Rle => Rle::NAME,
        }
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodecKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        CodecKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown codec: {s} (expected huffman, lzw or rle)"))
    }
}
