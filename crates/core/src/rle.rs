//! Run-length encoding as text.
//!
//! Each maximal run is written as its symbol followed by the decimal run
//! length, with the length left out when it is 1: `"aaabccdd"` becomes
//! `"a3bc2d2"`.
//!
//! # Limitation: digit symbols
//!
//! Counts are plain decimal digits with no delimiter, so a digit that is part
//! of the data cannot be told apart from a count. `"a1"` encodes to `"a1"`,
//! which decodes to `"a"`. Round trips are only guaranteed for text that
//! contains no ASCII digits; [`is_unambiguous`] checks exactly that.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::{Error, FormatError, Result};

/// A maximal repetition of one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub symbol: char,
    pub len: usize,
}

/// Iterator over the runs of a string.
#[derive(Debug, Clone)]
pub struct Runs<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let symbol = self.chars.next()?;
        let mut len = 1;
        while self.chars.next_if_eq(&symbol).is_some() {
            len += 1;
        }
        Some(Run { symbol, len })
    }
}

/// Split `text` into maximal runs.
pub fn runs(text: &str) -> Runs<'_> {
    Runs {
        chars: text.chars().peekable(),
    }
}

/// True when `text` survives a round trip, i.e. has no ASCII digit symbols.
pub fn is_unambiguous(text: &str) -> bool {
    !text.chars().any(|c| c.is_ascii_digit())
}

/// Encode every run as symbol plus count (count omitted for single symbols).
///
/// # Errors
/// `Error::EmptyInput` if `text` is empty.
pub fn compress(text: &str) -> Result<String> {
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut output = String::with_capacity(text.len());
    let mut run_count = 0usize;
    for run in runs(text) {
        output.push(run.symbol);
        if run.len > 1 {
            output.push_str(&run.len.to_string());
        }
        run_count += 1;
    }

    tracing::debug!(runs = run_count, output_len = output.len(), "rle compress");

    Ok(output)
}

/// Expand encoded runs back into text.
///
/// An empty string decodes to an empty string.
///
/// # Errors
/// - `FormatError::CountOverflow` if a count does not fit in `usize`, or its
///   run is too large to allocate
/// - `FormatError::ZeroCount` for an explicit count of zero
pub fn decompress(compressed: &str) -> Result<String> {
    decompress_bounded(compressed, usize::MAX)
}

/// Like [`decompress`], but refuses to produce more than `max_symbols` symbols.
///
/// # Errors
/// Those of [`decompress`], plus `FormatError::OutputTooLarge` once the
/// expanded output would exceed `max_symbols`.
pub fn decompress_bounded(compressed: &str, max_symbols: usize) -> Result<String> {
    let mut output = String::new();
    let mut produced = 0usize;
    let mut chars = compressed.chars().enumerate().peekable();

    while let Some((index, symbol)) = chars.next() {
        let mut count: Option<(usize, usize)> = None;

        while let Some(&(position, c)) = chars.peek() {
            let Some(digit) = c.to_digit(10) else {
                break;
            };
            let (start, value) = count.unwrap_or((position, 0));
            let value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit as usize))
                .ok_or(FormatError::CountOverflow { position: start })?;
            count = Some((start, value));
            chars.next();
        }

        let (position, len) = match count {
            Some((position, 0)) => return Err(FormatError::ZeroCount { position }.into()),
            Some(count) => count,
            None => (index, 1),
        };

        produced = match produced.checked_add(len) {
            Some(total) if total <= max_symbols => total,
            _ => {
                return Err(FormatError::OutputTooLarge { limit: max_symbols }.into());
            }
        };

        // `extend` would reserve infallibly and panic or abort on a huge count.
        let reserved = len
            .checked_mul(symbol.len_utf8())
            .is_some_and(|bytes| output.try_reserve(bytes).is_ok());
        if !reserved {
            return Err(FormatError::CountOverflow { position }.into());
        }
        output.extend(std::iter::repeat(symbol).take(len));
    }

    Ok(output)
}
