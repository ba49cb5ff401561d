//! Error types for the textpack codecs.
//!
//! Every codec operation returns a structured, recoverable error instead of
//! panicking. Only the driver decides whether an error ends the process.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Empty input: nothing to compress
/// - Corrupt stream: structurally invalid input to a decoder
/// - Format: malformed run-length counts
/// - Unsupported symbol: a character outside the LZW seed alphabet
/// - Bit I/O: reading/writing bits from/to byte buffers
#[derive(Debug, Error)]
pub enum Error {
    /// Zero-length input handed to a compress call
    #[error("empty input: nothing to compress")]
    EmptyInput,

    /// Decoder input that cannot have been produced by the matching encoder
    #[error("corrupt stream: {0}")]
    CorruptStream(#[from] CorruptStreamError),

    /// Run-length count that is not a usable number
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Symbol the codec has no code for (outside the LZW seed alphabet,
    /// or missing from a Huffman code table)
    #[error("unsupported symbol {symbol:?} at position {position}")]
    UnsupportedSymbol { symbol: char, position: usize },

    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),
}

/// Bit-level I/O errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,
}

/// Structurally invalid decoder input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorruptStreamError {
    /// Huffman bitstream ended before reaching a leaf
    #[error("bit stream ends inside the code starting at bit {position}")]
    TruncatedCode { position: usize },

    /// A single-symbol tree only knows the code `0`
    #[error("unexpected bit 1 at position {position} for a single-symbol tree")]
    InvalidBit { position: usize },

    /// Textual bitstring contains something other than `0`/`1`
    #[error("invalid bit character {found:?} at position {position}")]
    InvalidBitChar { position: usize, found: char },

    /// LZW code that is neither in the dictionary nor the next code to be assigned
    #[error("unknown code {code} at index {index} (next code would be {next_code})")]
    UnknownCode {
        index: usize,
        code: u32,
        next_code: u32,
    },
}

/// Run-length count errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Count does not fit in `usize`, or its run cannot be allocated
    #[error("run count at position {position} overflows")]
    CountOverflow { position: usize },

    /// A run of zero symbols is never emitted by the encoder
    #[error("zero run count at position {position}")]
    ZeroCount { position: usize },

    /// Expanded output would exceed the caller's limit
    #[error("decoded output exceeds {limit} symbols")]
    OutputTooLarge { limit: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        let err: Error = CorruptStreamError::TruncatedCode { position: 3 }.into();
        assert!(matches!(
            err,
            Error::CorruptStream(CorruptStreamError::TruncatedCode { position: 3 })
        ));

        let err: Error = FormatError::ZeroCount { position: 1 }.into();
        assert!(matches!(err, Error::Format(FormatError::ZeroCount { .. })));
    }

    #[test]
    fn test_display() {
        let err = Error::UnsupportedSymbol {
            symbol: 'λ',
            position: 2,
        };
        assert_eq!(err.to_string(), "unsupported symbol 'λ' at position 2");

        let err: Error = CorruptStreamError::UnknownCode {
            index: 4,
            code: 300,
            next_code: 259,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "corrupt stream: unknown code 300 at index 4 (next code would be 259)"
        );
    }
}
