//! huffcode: command-line front end.
//!
//! Pipeline: input text -> alphabet -> codec -> encode -> decode -> verify,
//! with optional archive output, code table dump and statistics.

mod config;
mod input_gen;
mod presets;

use std::error::Error;
use std::fs;

use huffcode_core::{
    archive::{parse_archive, write_archive, Archive},
    stats::{CodeStats, StreamStats},
    Alphabet, Codec,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{print_help, Config};
use presets::Preset;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("run with --help for usage");
            std::process::exit(2);
        }
    };

    if config.show_help {
        print_help();
        return;
    }

    init_tracing(config.verbose);

    if let Err(e) = run(&config) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    if config.print_config {
        config.print();
    }

    if let Some(path) = &config.decode_archive {
        return decode_archive_file(config, path);
    }

    let (text, alphabet) = load_input(config)?;
    let Some(alphabet) = alphabet else {
        // No symbols to weigh: the empty input encodes to the empty stream
        println!("=== Encoded ===");
        println!();
        println!("=== Decoded ===");
        println!();
        if config.archive.is_some() {
            warn!("empty input without a preset; no archive written");
        }
        return Ok(());
    };
    info!(chars = text.chars().count(), symbols = alphabet.len(), "input ready");

    let codec = Codec::from_alphabet(&alphabet)?;

    if config.print_table {
        println!("=== Code Table ===");
        print!("{}", codec.table());
        println!();
    }
    if config.print_tree {
        println!("=== Tree ===");
        print!("{}", codec.tree());
        println!();
    }

    let stream = codec.encode_str(&text)?;
    println!("=== Encoded ===");
    println!("{}", stream);
    println!();

    let decoded = codec.decode_to_string(&stream)?;
    if decoded != text {
        return Err("round trip mismatch: decoded text differs from input".into());
    }
    println!("=== Decoded ===");
    println!("{}", decoded);
    println!();

    if let Some(path) = &config.archive {
        let bytes = write_archive(&alphabet, &stream)?;
        fs::write(path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "archive written");
    }

    if config.print_stats {
        print!("{}", CodeStats::compute(&alphabet, codec.table())?);
        println!();
        print!("{}", StreamStats::new(text.chars().count(), &stream));
    }

    Ok(())
}

/// Resolve the input text and the alphabet to encode it with.
///
/// A preset always wins; otherwise weights are counted from the input.
/// Generated samples default to the English preset. The alphabet is `None`
/// only for empty input with no preset.
fn load_input(config: &Config) -> Result<(String, Option<Alphabet<char>>), Box<dyn Error>> {
    let preset_alphabet = config.preset.map(Preset::alphabet).transpose()?;

    let text = match (&config.input_file, &config.text) {
        (Some(path), _) => fs::read_to_string(path)?,
        (None, Some(text)) => text.clone(),
        (None, None) => {
            let alphabet = match preset_alphabet {
                Some(alphabet) => alphabet,
                None => Preset::English.alphabet()?,
            };
            let text =
                input_gen::generate_sample_text(&alphabet, config.seed, config.sample_size)?;
            return Ok((text, Some(alphabet)));
        }
    };

    let alphabet = resolve_alphabet(&text, preset_alphabet)?;
    Ok((text, alphabet))
}

/// The preset if given, else weights counted from `text`; `None` for empty
/// text with no preset.
fn resolve_alphabet(
    text: &str,
    preset: Option<Alphabet<char>>,
) -> huffcode_core::Result<Option<Alphabet<char>>> {
    match preset {
        Some(alphabet) => Ok(Some(alphabet)),
        None if text.is_empty() => Ok(None),
        None => Alphabet::from_sample(text.chars()).map(Some),
    }
}

fn decode_archive_file(config: &Config, path: &std::path::Path) -> Result<(), Box<dyn Error>> {
    let bytes = fs::read(path)?;
    let archive: Archive<char> = parse_archive(&bytes)?;
    info!(symbols = archive.alphabet.len(), stream = archive.stream.len(), "archive parsed");

    let codec = archive.codec()?;
    if config.print_table {
        println!("=== Code Table ===");
        print!("{}", codec.table());
        println!();
    }

    let decoded = codec.decode_to_string(&archive.stream)?;
    println!("{}", decoded);
    Ok(())
}
