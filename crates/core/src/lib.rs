//! textpack-core: classic lossless text codecs
//!
//! This library provides three independent codecs over in-memory strings:
//! - Huffman coding with a deterministic, arena-backed tree
//! - LZW with encoder and decoder dictionaries grown in lockstep
//! - Run-length encoding with decimal counts
//!
//! # Architecture
//!
//! - `bitio`: MSB-first bit writing/reading and the `BitString` type
//! - `huffman`: frequency table, tree, code table, bit encode/decode
//! - `lzw`: incremental encoder/decoder and the `LzwCodes` sequence
//! - `rle`: run detection, encoding, and bounded decoding
//! - `codec`: the `Codec` trait shared by all three
//! - `report`: round-trip measurement and the compression ratio
//! - `error`: the error taxonomy
//!
//! # Design Principles
//!
//! - **No panics**: malformed input surfaces as a structured `Error`
//! - **No shared state**: every call builds and drops its own tables
//! - **Deterministic**: equal inputs always give equal outputs
//!
//! # Example
//! ```
//! use textpack_core::{huffman, lzw, rle};
//!
//! let encoded = huffman::compress("abracadabra").unwrap();
//! assert_eq!(huffman::decompress(&encoded.bits, &encoded.tree).unwrap(), "abracadabra");
//!
//! let codes = lzw::compress("TOBEORNOTTOBE").unwrap();
//! assert_eq!(lzw::decompress(&codes).unwrap(), "TOBEORNOTTOBE");
//!
//! assert_eq!(rle::compress("aaabbbbcc").unwrap(), "a3b4c2");
//! ```

pub mod bitio;
pub mod codec;
pub mod error;
pub mod huffman;
pub mod lzw;
pub mod report;
pub mod rle;

// Re-export commonly used types
pub use codec::{Codec, CodecKind, Huffman, Lzw, Rle};
pub use error::{Error, Result};
pub use report::{ratio, round_trip, Report};
