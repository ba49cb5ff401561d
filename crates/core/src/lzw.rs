//! LZW coding with dictionaries rebuilt on both sides.
//!
//! Encoder and decoder start from the same 256 single-symbol entries
//! (U+0000..=U+00FF map to codes 0..=255) and add exactly one entry per step,
//! in the same order, so the dictionary never travels with the codes.
//!
//! Both dictionaries are plain owned maps local to one [`Encoder`] or
//! [`Decoder`]; nothing is shared between calls.

use std::collections::HashMap;
use std::fmt;

use crate::error::{CorruptStreamError, Error, Result};

/// Number of single-symbol entries every dictionary starts with.
pub const SEED_SIZE: u32 = 256;

/// Incremental LZW encoder.
#[derive(Debug, Clone)]
pub struct Encoder {
    dictionary: HashMap<String, u32>,
    next_code: u32,
    /// Longest prefix seen so far that is already in the dictionary
    buffer: String,
    /// Code of `buffer`, `None` only before the first symbol
    buffer_code: Option<u32>,
    codes: Vec<u32>,
    position: usize,
}

impl Encoder {
    pub fn new() -> Self {
        let dictionary = (0..SEED_SIZE)
            .filter_map(|code| char::from_u32(code).map(|symbol| (symbol.to_string(), code)))
            .collect();

        Self {
            dictionary,
            next_code: SEED_SIZE,
            buffer: String::new(),
            buffer_code: None,
            codes: Vec::new(),
            position: 0,
        }
    }

    /// Feed one symbol.
    ///
    /// # Errors
    /// `Error::UnsupportedSymbol` for symbols above U+00FF.
    pub fn push(&mut self, symbol: char) -> Result<()> {
        if u32::from(symbol) >= SEED_SIZE {
            return Err(Error::UnsupportedSymbol {
                symbol,
                position: self.position,
            });
        }
        self.position += 1;

        let mut extended = self.buffer.clone();
        extended.push(symbol);

        if let Some(&code) = self.dictionary.get(&extended) {
            self.buffer = extended;
            self.buffer_code = Some(code);
            return Ok(());
        }

        if let Some(code) = self.buffer_code {
            self.codes.push(code);
        }
        self.dictionary.insert(extended, self.next_code);
        self.next_code += 1;

        self.buffer.clear();
        self.buffer.push(symbol);
        self.buffer_code = Some(u32::from(symbol));

        Ok(())
    }

    /// Current number of dictionary entries.
    pub fn dictionary_len(&self) -> usize {
        self.dictionary.len()
    }

    /// Codes emitted so far (the pending buffer is not flushed yet).
    pub fn codes(&self) -> &[u32] {
        &self.codes
    }

    /// Flush the pending buffer and return every emitted code.
    pub fn finish(mut self) -> Vec<u32> {
        if let Some(code) = self.buffer_code {
            self.codes.push(code);
        }
        self.codes
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Incremental LZW decoder.
#[derive(Debug, Clone)]
pub struct Decoder {
    /// Entry for code `i` lives at index `i`
    dictionary: Vec<String>,
    previous: Option<String>,
    output: String,
    index: usize,
}

impl Decoder {
    pub fn new() -> Self {
        let dictionary = (0..SEED_SIZE)
            .filter_map(char::from_u32)
            .map(String::from)
            .collect();

        Self {
            dictionary,
            previous: None,
            output: String::new(),
            index: 0,
        }
    }

    /// The code the encoder would assign next.
    pub fn next_code(&self) -> u32 {
        self.dictionary.len() as u32
    }

    /// Current number of dictionary entries.
    pub fn dictionary_len(&self) -> usize {
        self.dictionary.len()
    }

    /// Resolve one code and append its string to the output.
    ///
    /// # Errors
    /// `CorruptStreamError::UnknownCode` when `code` is neither in the
    /// dictionary nor the code about to be assigned (the latter is only
    /// resolvable once a previous string exists).
    pub fn push(&mut self, code: u32) -> Result<()> {
        let next_code = self.next_code();
        let unknown = CorruptStreamError::UnknownCode {
            index: self.index,
            code,
            next_code,
        };

        let entry = match (self.dictionary.get(code as usize), &self.previous) {
            (Some(known), _) => known.clone(),
            (None, Some(previous)) if code == next_code => {
                let first = first_symbol(previous).ok_or(unknown)?;
                let mut entry = previous.clone();
                entry.push(first);
                entry
            }
            _ => return Err(unknown.into()),
        };

        if let Some(mut previous) = self.previous.take() {
            if let Some(first) = first_symbol(&entry) {
                previous.push(first);
                self.dictionary.push(previous);
            }
        }

        self.output.push_str(&entry);
        self.previous = Some(entry);
        self.index += 1;

        Ok(())
    }

    pub fn finish(self) -> String {
        self.output
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

fn first_symbol(s: &str) -> Option<char> {
    s.chars().next()
}

/// A sequence of LZW codes, as returned by [`compress`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LzwCodes(pub Vec<u32>);

impl LzwCodes {
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Dictionary size once every code has been read.
    pub fn final_dictionary_len(&self) -> usize {
        SEED_SIZE as usize + self.0.len().saturating_sub(1)
    }

    /// Bits needed to address every code of the final dictionary (at least 8).
    pub fn code_width(&self) -> usize {
        let highest = self.final_dictionary_len() - 1;
        ((usize::BITS - highest.leading_zeros()) as usize).max(8)
    }

    /// Size of the codes if each one were written with `code_width` bits.
    pub fn bit_len(&self) -> usize {
        self.0.len() * self.code_width()
    }
}

impl From<Vec<u32>> for LzwCodes {
    fn from(codes: Vec<u32>) -> Self {
        Self(codes)
    }
}

impl fmt::Display for LzwCodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, code) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{code}")?;
        }
        f.write_str("]")
    }
}

/// Encode `text` into dictionary codes.
///
/// # Errors
/// - `Error::EmptyInput` if `text` is empty
/// - `Error::UnsupportedSymbol` for symbols above U+00FF
pub fn compress(text: &str) -> Result<Vec<u32>> {
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut encoder = Encoder::new();
    for symbol in text.chars() {
        encoder.push(symbol)?;
    }
    let dictionary_len = encoder.dictionary_len();
    let codes = encoder.finish();

    tracing::debug!(codes = codes.len(), dictionary_len, "lzw compress");

    Ok(codes)
}

/// Rebuild the text from dictionary codes.
///
/// An empty code sequence decodes to an empty string.
pub fn decompress(codes: &[u32]) -> Result<String> {
    let mut decoder = Decoder::new();
    for &code in codes {
        decoder.push(code)?;
    }

    tracing::debug!(
        codes = codes.len(),
        dictionary_len = decoder.dictionary_len(),
        "lzw decompress"
    );

    Ok(decoder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{quickcheck, TestResult};

    const CLASSIC: &str = "TOBEORNOTTOBEORTOBEORNOT";

    #[test]
    fn test_classic_codes() {
        let codes = compress(CLASSIC).unwrap();
        assert_eq!(
            codes,
            vec![84, 79, 66, 69, 79, 82, 78, 79, 84, 256, 258, 260, 265, 259, 261, 263]
        );
        assert_eq!(decompress(&codes).unwrap(), CLASSIC);
    }

    #[test]
    fn test_dictionary_grows_one_per_non_final_code() {
        let mut encoder = Encoder::new();
        assert_eq!(encoder.dictionary_len(), SEED_SIZE as usize);

        for symbol in CLASSIC.chars() {
            let before_len = encoder.dictionary_len();
            let before_codes = encoder.codes().len();
            encoder.push(symbol).unwrap();
            let emitted = encoder.codes().len() - before_codes;
            assert_eq!(encoder.dictionary_len() - before_len, emitted);
        }

        let dictionary_len = encoder.dictionary_len();
        let codes = encoder.finish();
        assert_eq!(dictionary_len, SEED_SIZE as usize + codes.len() - 1);
    }

    #[test]
    fn test_decoder_tracks_encoder_dictionary() {
        let codes = compress(CLASSIC).unwrap();
        let mut decoder = Decoder::new();
        for (i, &code) in codes.iter().enumerate() {
            decoder.push(code).unwrap();
            assert_eq!(decoder.dictionary_len(), SEED_SIZE as usize + i);
        }
        assert_eq!(
            decoder.dictionary_len(),
            LzwCodes(codes).final_dictionary_len()
        );
    }

    #[test]
    fn test_code_not_yet_in_dictionary() {
        // "AAA" -> [65, 256]: 256 is resolved as "A" + 'A'
        assert_eq!(compress("AAA").unwrap(), vec![65, 256]);
        assert_eq!(decompress(&[65, 256]).unwrap(), "AAA");
    }

    #[test]
    fn test_code_too_far_ahead() {
        let err = decompress(&[65, 258]).unwrap_err();
        assert!(matches!(
            err,
            Error::CorruptStream(CorruptStreamError::UnknownCode {
                index: 1,
                code: 258,
                next_code: 256
            })
        ));
    }

    #[test]
    fn test_first_code_must_be_seeded() {
        assert!(matches!(
            decompress(&[256]),
            Err(Error::CorruptStream(CorruptStreamError::UnknownCode { index: 0, .. }))
        ));
    }

    #[test]
    fn test_empty() {
        assert!(matches!(compress(""), Err(Error::EmptyInput)));
        assert_eq!(decompress(&[]).unwrap(), "");
    }

    #[test]
    fn test_latin1_round_trip() {
        let text = "café crème brûlée ÿ\u{0}\u{7f}";
        let codes = compress(text).unwrap();
        assert_eq!(decompress(&codes).unwrap(), text);
    }

    #[test]
    fn test_symbol_outside_seed_alphabet() {
        assert!(matches!(
            compress("abc€"),
            Err(Error::UnsupportedSymbol {
                symbol: '€',
                position: 3
            })
        ));
    }

    #[test]
    fn test_code_width() {
        let single = LzwCodes(vec![97]);
        assert_eq!(single.final_dictionary_len(), 256);
        assert_eq!(single.code_width(), 8);

        let classic = LzwCodes(compress(CLASSIC).unwrap());
        assert_eq!(classic.final_dictionary_len(), 271);
        assert_eq!(classic.code_width(), 9);
        assert_eq!(classic.bit_len(), 16 * 9);
        assert!(classic.to_string().starts_with("[84, 79, 66"));
    }

    quickcheck! {
        fn prop_round_trip(text: String) -> TestResult {
            let text: String = text.chars().filter(|&c| u32::from(c) < SEED_SIZE).collect();
            if text.is_empty() {
                return TestResult::discard();
            }
            let codes = compress(&text).unwrap();
            TestResult::from_bool(decompress(&codes).unwrap() == text)
        }
    }
}
