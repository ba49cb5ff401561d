//! Round-trip measurement and reporting.
//!
//! [`round_trip`] compresses an input, decompresses the result, and records
//! sizes, timing, and whether the output matches the input.
//!
//! # Ratio
//!
//! The ratio is the space saved against a flat 8 bits per symbol:
//!
//! ```text
//! ratio = (8 × symbols − compressed_bits) / (8 × symbols) × 100
//! ```
//!
//! It is negative when the compressed form is larger than the baseline.
//! Multi-byte UTF-8 symbols still count as 8 bits.

use std::time::{Duration, Instant};

use crate::codec::Codec;
use crate::error::Result;

/// Bits per symbol in the uncompressed baseline.
pub const BASELINE_BITS_PER_SYMBOL: usize = 8;

/// Percentage of space saved versus 8 bits per symbol.
///
/// Returns 0.0 for zero symbols.
pub fn ratio(symbol_count: usize, compressed_bits: usize) -> f64 {
    if symbol_count == 0 {
        return 0.0;
    }
    let baseline = (symbol_count * BASELINE_BITS_PER_SYMBOL) as f64;
    (baseline - compressed_bits as f64) / baseline * 100.0
}

/// Result of one compress/decompress round trip.
#[derive(Debug, Clone)]
pub struct Report {
    /// Codec name
    pub codec: &'static str,

    pub original: String,

    /// Printable compressed form
    pub compressed: String,

    pub decompressed: String,

    /// Symbols (chars) in the original
    pub symbol_count: usize,

    /// Size of the compressed form as the codec accounts it
    pub compressed_bits: usize,

    pub compress_time: Duration,
    pub decompress_time: Duration,
}

impl Report {
    /// True when decompression reproduced the original exactly.
    pub fn verified(&self) -> bool {
        self.original == self.decompressed
    }

    /// Baseline size in bits (8 per symbol).
    pub fn original_bits(&self) -> usize {
        self.symbol_count * BASELINE_BITS_PER_SYMBOL
    }

    pub fn ratio(&self) -> f64 {
        ratio(self.symbol_count, self.compressed_bits)
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("=== {} ===", self.codec);
        println!("Original:     {}", self.original);
        println!("Compressed:   {}", self.compressed);
        println!("Decompressed: {}", self.decompressed);
        println!();
        println!("Original size:   {} bits ({} symbols)", self.original_bits(), self.symbol_count);
        println!("Compressed size: {} bits", self.compressed_bits);
        println!("Ratio: {:.2}%", self.ratio());
        println!();
        println!("Compress time:   {} µs", self.compress_time.as_micros());
        println!("Decompress time: {} µs", self.decompress_time.as_micros());
        println!();
    }

    /// Print just the final result (pass/fail).
    pub fn print_result(&self) {
        if self.verified() {
            println!("✓ Round trip succeeded ({})", self.codec);
        } else {
            println!(
                "✗ Round trip failed ({}): {} symbols in, {} out",
                self.codec,
                self.symbol_count,
                self.decompressed.chars().count()
            );
        }
    }

    /// Export as `key=value` lines (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "codec={}\n\
             symbols={}\n\
             original_bits={}\n\
             compressed_bits={}\n\
             ratio={:.4}\n\
             verified={}\n\
             compress_us={}\n\
             decompress_us={}\n",
            self.codec,
            self.symbol_count,
            self.original_bits(),
            self.compressed_bits,
            self.ratio(),
            self.verified(),
            self.compress_time.as_micros(),
            self.decompress_time.as_micros(),
        )
    }
}

/// Compress `input` with `codec`, decompress it again, and measure both.
///
/// A mismatch between input and output is reported through
/// [`Report::verified`], not as an error.
///
/// # Errors
/// Whatever the codec's compress or decompress returns.
pub fn round_trip<C: Codec>(codec: &C, input: &str) -> Result<Report> {
    let start = Instant::now();
    let compressed = codec.compress(input)?;
    let compress_time = start.elapsed();

    let start = Instant::now();
    let decompressed = codec.decompress(&compressed)?;
    let decompress_time = start.elapsed();

    let report = Report {
        codec: C::NAME,
        original: input.to_string(),
        compressed: compressed.to_string(),
        decompressed,
        symbol_count: input.chars().count(),
        compressed_bits: codec.compressed_bits(&compressed),
        compress_time,
        decompress_time,
    };

    tracing::debug!(
        codec = report.codec,
        symbols = report.symbol_count,
        compressed_bits = report.compressed_bits,
        verified = report.verified(),
        "round trip"
    );

    Ok(report)
}
