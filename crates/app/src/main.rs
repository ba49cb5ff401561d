//! textpack CLI
//!
//! Loads one input string, round-trips it through the chosen codec, and prints
//! original, compressed and decompressed forms with the compression ratio.
//! Exits with a failure status if the codec errors or the round trip does
//! not reproduce the input.

mod config;
mod input_gen;

use std::process::ExitCode;

use config::{Config, InputSource};
use textpack_core::{rle, round_trip, CodecKind, Huffman, Lzw, Report, Rle};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Run with --help for usage.");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();

    if config.print_config {
        config.print();
    }

    let input = match load_input(&config.input) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("error: failed to read input: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(codec = %config.codec, symbols = input.chars().count(), "input loaded");

    let report = match run(config.codec, &input) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(codec = %config.codec, error = %e, "round trip failed");
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.print_metrics {
        report.print_summary();
    }
    report.print_result();
    if config.export {
        print!("{}", report.export_text());
    }

    if report.verified() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_input(source: &InputSource) -> std::io::Result<String> {
    match source {
        InputSource::Text(text) => Ok(text.clone()),
        InputSource::File(path) => std::fs::read_to_string(path),
        InputSource::Sample { seed, len } => Ok(input_gen::generate_sample_text(*seed, *len)),
    }
}

fn run(codec: CodecKind, input: &str) -> textpack_core::Result<Report> {
    match codec {
        CodecKind::Huffman => round_trip(&Huffman, input),
        CodecKind::Lzw => round_trip(&Lzw, input),
        CodecKind::Rle => {
            if !rle::is_unambiguous(input) {
                tracing::warn!("input contains digits; RLE will read them back as run counts");
            }
            // A faithful decode never produces more symbols than went in.
            round_trip(&Rle::with_limit(input.chars().count()), input)
        }
    }
}
