//! Configuration for the textpack driver.
//!
//! Handles parsing command-line arguments and filling in defaults. With no
//! arguments the driver round-trips a generated sample through Huffman
//! coding; the sample's seed is printed with `--print-config` so runs can be
//! repeated.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use textpack_core::CodecKind;
use tracing::Level;

/// Where the text to compress comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Literal text from `--text`
    Text(String),
    /// UTF-8 file from `--in`
    File(PathBuf),
    /// Generated sample
    Sample { seed: u64, len: usize },
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Codec to round-trip through
    pub codec: CodecKind,

    pub input: InputSource,

    /// Maximum level for log events on stderr
    pub log_level: Level,

    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to print the detailed summary
    pub print_metrics: bool,

    /// Whether to print `key=value` lines after the summary
    pub export: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (program name excluded).
    ///
    /// If no input is given, a sample is generated from `--seed` (or a
    /// time-based seed); its length comes from `--sample-len` or is drawn
    /// from the same seed.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut codec = CodecKind::Huffman;
        let mut text: Option<String> = None;
        let mut input_file: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut sample_len: Option<usize> = None;
        let mut log_level = Level::WARN;
        let mut print_config = false;
        let mut print_metrics = true;
        let mut export = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--codec" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--codec requires a name".to_string());
                    }
                    codec = args[i].parse()?;
                }
                "--text" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--text requires a string".to_string());
                    }
                    text = Some(args[i].clone());
                }
                "--in" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--in requires a path".to_string());
                    }
                    input_file = Some(PathBuf::from(&args[i]));
                }
                "--seed" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--seed requires a number".to_string());
                    }
                    seed = Some(args[i].parse().map_err(|_| "invalid seed")?);
                }
                "--sample-len" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--sample-len requires a number".to_string());
                    }
                    let len: usize = args[i].parse().map_err(|_| "invalid sample-len")?;
                    if len == 0 {
                        return Err("--sample-len must be at least 1".to_string());
                    }
                    sample_len = Some(len);
                }
                "--log-level" => {
                    i += 1;
                    if i >= args.len() {
                        return Err("--log-level requires a level".to_string());
                    }
                    log_level = args[i]
                        .parse()
                        .map_err(|_| format!("invalid log level: {}", args[i]))?;
                }
                "-v" | "--verbose" => {
                    log_level = Level::DEBUG;
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-metrics" => {
                    print_metrics = false;
                }
                "--export" => {
                    export = true;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        let input = match (text, input_file) {
            (Some(_), Some(_)) => return Err("--text and --in are mutually exclusive".to_string()),
            (Some(text), None) => InputSource::Text(text),
            (None, Some(path)) => InputSource::File(path),
            (None, None) => {
                let seed = seed.unwrap_or_else(time_seed);
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let len = sample_len.unwrap_or_else(|| rng.gen_range(64..=512));
                InputSource::Sample { seed, len }
            }
        };

        Ok(Config {
            codec,
            input,
            log_level,
            print_config,
            print_metrics,
            export,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Codec: {}", self.codec);
        match &self.input {
            InputSource::Text(text) => println!("Input: --text ({} symbols)", text.chars().count()),
            InputSource::File(path) => println!("Input: {}", path.display()),
            InputSource::Sample { seed, len } => {
                println!("Input: generated sample ({} symbols)", len);
                println!("Seed: {}", seed);
            }
        }
        println!("Log level: {}", self.log_level);
        println!();
    }
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn print_help() {
    println!("textpack: round-trip text through Huffman, LZW or RLE coding");
    println!();
    println!("USAGE:");
    println!("    textpack [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --codec <NAME>          huffman, lzw or rle (default: huffman)");
    println!("    --text <STRING>         Text to compress");
    println!("    --in <PATH>             UTF-8 file to compress");
    println!("    --seed <N>              Seed for the generated sample (default: time-based)");
    println!("    --sample-len <N>        Generated sample length (default: random 64-512)");
    println!();
    println!("    --log-level <LEVEL>     error, warn, info, debug or trace (default: warn)");
    println!("    -v, --verbose           Same as --log-level debug");
    println!("    --print-config          Print resolved configuration");
    println!("    --no-metrics            Only print the pass/fail line");
    println!("    --export                Print key=value metrics");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    textpack --codec rle --text aaabbbbcc");
    println!("    textpack --codec lzw --text TOBEORNOTTOBEORTOBEORNOT");
    println!("    textpack --seed 42 --sample-len 1000 --export");
    println!();
}
