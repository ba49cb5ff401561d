//! Bit-level I/O for Huffman bitstreams.
//!
//! `BitWriter` and `BitReader` work MSB-first. `BitString` pairs the packed
//! bytes with an exact bit length, so trailing padding in the last byte is
//! never mistaken for data.
//!
//! # Example
//! ```
//! use textpack_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! for bit in [true, false, true, true] {
//!     writer.write_bit(bit);
//! }
//! let bits = writer.into_bit_string();
//! assert_eq!(bits.to_string(), "1011");
//!
//! let mut reader = BitReader::new(&bits);
//! assert!(reader.read_bit().unwrap());
//! assert_eq!(reader.position(), 1);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{BitIoError, CorruptStreamError, Error, Result};

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8
/// - unused low bits of `bit_buffer` are zero
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Finish writing, keeping the exact bit length alongside the bytes.
    pub fn into_bit_string(mut self) -> BitString {
        let len = self.bytes.len() * 8 + self.bit_count as usize;
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        BitString {
            bytes: self.bytes,
            len,
        }
    }
}

/// A packed sequence of bits with an exact length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BitString {
    bytes: Vec<u8>,
    len: usize,
}

impl BitString {
    /// Number of meaningful bits.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).filter_map(move |i| self.get(i))
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = Error;

    /// Parse text made of `0` and `1` characters.
    fn from_str(s: &str) -> Result<Self> {
        let mut writer = BitWriter::new();
        for (position, c) in s.chars().enumerate() {
            match c {
                '0' => writer.write_bit(false),
                '1' => writer.write_bit(true),
                found => {
                    return Err(CorruptStreamError::InvalidBitChar { position, found }.into())
                }
            }
        }
        Ok(writer.into_bit_string())
    }
}

/// Reads bits MSB-first from a `BitString`.
///
/// Reading stops at the string's bit length, never at the padded byte end.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bits: &'a BitString,
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bits: &'a BitString) -> Self {
        Self {
            bits,
            bit_position: 0,
        }
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        let bit = self
            .bits
            .get(self.bit_position)
            .ok_or(BitIoError::UnexpectedEof)?;
        self.bit_position += 1;
        Ok(bit)
    }

    pub fn position(&self) -> usize {
        self.bit_position
    }

    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.bits.len()
    }
}
