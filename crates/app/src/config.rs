//! Configuration for the huffcode application.
//!
//! Handles parsing command-line arguments and filling in defaults.
//!
//! # Philosophy
//!
//! The tool works with ZERO arguments: it generates a seeded sample text from
//! the English preset and runs the full encode/decode round trip on it. The
//! seed is printed with the configuration so runs are reproducible.

use std::path::PathBuf;

use crate::presets::Preset;

/// Default length of generated sample text, in characters.
const DEFAULT_SAMPLE_SIZE: usize = 200;

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Input ===
    /// Input file path
    pub input_file: Option<PathBuf>,

    /// Literal input text (takes precedence over generation)
    pub text: Option<String>,

    /// Archive to decode instead of encoding anything
    pub decode_archive: Option<PathBuf>,

    // === Alphabet ===
    /// Preset frequency table (None = derive weights from the input)
    pub preset: Option<Preset>,

    // === Sample generation ===
    /// Seed for sample text generation
    pub seed: u64,

    /// Length of generated sample text
    pub sample_size: usize,

    // === Output ===
    /// Write an archive of the encoded input here
    pub archive: Option<PathBuf>,

    // === Behavior ===
    /// Print the symbol -> codeword table
    pub print_table: bool,

    /// Print the tree structure
    pub print_tree: bool,

    /// Print the resolved configuration
    pub print_config: bool,

    /// Print code and stream statistics
    pub print_stats: bool,

    /// Enable debug logging on stderr
    pub verbose: bool,

    /// Print usage and exit
    pub show_help: bool,
}

impl Config {
    /// Parse configuration from command-line arguments (program name excluded).
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut input_file: Option<PathBuf> = None;
        let mut text: Option<String> = None;
        let mut decode_archive: Option<PathBuf> = None;
        let mut preset: Option<Preset> = None;
        let mut seed: Option<u64> = None;
        let mut sample_size: Option<usize> = None;
        let mut archive: Option<PathBuf> = None;
        let mut print_table = false;
        let mut print_tree = false;
        let mut print_config = false;
        let mut print_stats = true;
        let mut verbose = false;
        let mut show_help = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => {
                    input_file = Some(PathBuf::from(value(args, &mut i, "--in requires a path")?));
                }
                "--text" => {
                    text = Some(value(args, &mut i, "--text requires a string")?.to_string());
                }
                "--decode" => {
                    let path = value(args, &mut i, "--decode requires a path")?;
                    decode_archive = Some(PathBuf::from(path));
                }
                "--preset" => {
                    let name = value(args, &mut i, "--preset requires a name")?;
                    let parsed = Preset::parse(name)
                        .ok_or_else(|| format!("unknown preset: {}", name))?;
                    preset = Some(parsed);
                }
                "--seed" => {
                    let v = value(args, &mut i, "--seed requires a number")?;
                    seed = Some(v.parse().map_err(|_| "invalid seed")?);
                }
                "--sample-size" => {
                    let v = value(args, &mut i, "--sample-size requires a number")?;
                    sample_size = Some(v.parse().map_err(|_| "invalid sample-size")?);
                }
                "--archive" => {
                    let path = value(args, &mut i, "--archive requires a path")?;
                    archive = Some(PathBuf::from(path));
                }
                "--print-table" => {
                    print_table = true;
                }
                "--print-tree" => {
                    print_tree = true;
                }
                "--print-config" => {
                    print_config = true;
                }
                "--no-stats" => {
                    print_stats = false;
                }
                "--verbose" | "-v" => {
                    verbose = true;
                }
                "--help" | "-h" => {
                    show_help = true;
                }
                _ => {
                    return Err(format!("unknown argument: {}", args[i]));
                }
            }
            i += 1;
        }

        if input_file.is_some() && text.is_some() {
            return Err("--in and --text are mutually exclusive".to_string());
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Config {
            input_file,
            text,
            decode_archive,
            preset,
            seed,
            sample_size: sample_size.unwrap_or(DEFAULT_SAMPLE_SIZE),
            archive,
            print_table,
            print_tree,
            print_config,
            print_stats,
            verbose,
            show_help,
        })
    }

    /// True when the input text must be generated.
    pub fn generates_sample(&self) -> bool {
        self.input_file.is_none() && self.text.is_none()
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        if self.generates_sample() {
            println!("Input: generated sample ({} chars)", self.sample_size);
        } else if let Some(path) = &self.input_file {
            println!("Input: file {}", path.display());
        } else if let Some(text) = &self.text {
            println!("Input: literal text ({} chars)", text.chars().count());
        }
        let alphabet = match self.preset {
            Some(preset) => preset.name(),
            None if self.generates_sample() => Preset::English.name(),
            None => "derived from input",
        };
        println!("Alphabet: {}", alphabet);
        println!("Seed: {}", self.seed);
        if let Some(path) = &self.archive {
            println!("Archive: {}", path.display());
        }
        println!();
    }
}

/// Advance past a flag and return its value.
fn value<'a>(args: &'a [String], i: &mut usize, missing: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| missing.to_string())
}

pub fn print_help() {
    println!("huffcode: optimal prefix-code compression to a textual 0/1 stream");
    println!();
    println!("USAGE:");
    println!("    huffcode [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>             Input text file");
    println!("    --text <STR>            Literal input text");
    println!("    --decode <PATH>         Decode an archive and print the text");
    println!();
    println!("    --preset <NAME>         Use a built-in table: english, french");
    println!("                            (default: weights counted from the input)");
    println!("    --seed <N>              Seed for generated sample text");
    println!(
        "    --sample-size <N>       Generated sample length (default: {})",
        DEFAULT_SAMPLE_SIZE
    );
    println!();
    println!("    --archive <PATH>        Write alphabet + encoded stream archive");
    println!("    --print-table           Print the symbol -> codeword table");
    println!("    --print-tree            Print the tree structure");
    println!("    --print-config          Print resolved configuration");
    println!("    --no-stats              Don't print statistics");
    println!("    --verbose, -v           Debug logging on stderr (or set RUST_LOG)");
    println!("    --help, -h              Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    huffcode                                  # Sample text, English weights");
    println!("    huffcode --text \"abracadabra\" --print-table");
    println!("    huffcode --in notes.txt --archive notes.hftx");
    println!("    huffcode --decode notes.hftx");
    println!();
}
