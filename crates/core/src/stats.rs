//! Code quality and stream size statistics.
//!
//! [`CodeStats`] describes a code table against the weights it was built
//! from: weighted path length, average codeword length and how close that
//! is to the Shannon entropy of the weights. [`StreamStats`] describes one
//! concrete encoded stream.
//!
//! Both types render a human-readable summary through `Display` and a
//! `key=value` form through `export_text` for scripts and tests.

use std::fmt;

use crate::alphabet::Alphabet;
use crate::codec::EncodedStream;
use crate::codeword::CodewordTable;
use crate::error::Result;
use crate::symbol::Symbol;

/// Statistics for a codeword table.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeStats {
    /// Number of symbols in the table
    pub symbols: usize,

    /// Sum of all weights
    pub total_weight: u64,

    /// Σ weight × codeword length
    pub weighted_length: u128,

    /// Weighted average codeword length in bits
    pub average_length: f64,

    /// Shannon entropy of the weight distribution in bits per symbol
    pub entropy: f64,

    /// Shortest codeword length
    pub min_length: usize,

    /// Longest codeword length
    pub max_length: usize,
}

impl CodeStats {
    /// Compute statistics for `table` using the weights in `alphabet`.
    ///
    /// # Errors
    /// `Error::Lookup` if an alphabet symbol has no codeword in `table`.
    pub fn compute<S: Symbol>(alphabet: &Alphabet<S>, table: &CodewordTable<S>) -> Result<Self> {
        let total_weight = alphabet.total_weight();
        let mut weighted_length: u128 = 0;
        let mut entropy = 0.0;

        for entry in alphabet.iter() {
            let len = table.get(&entry.symbol)?.len();
            weighted_length += entry.weight as u128 * len as u128;

            if entry.weight > 0 && total_weight > 0 {
                let p = entry.weight as f64 / total_weight as f64;
                entropy -= p * p.log2();
            }
        }

        let average_length = if total_weight == 0 {
            0.0
        } else {
            weighted_length as f64 / total_weight as f64
        };

        Ok(Self {
            symbols: table.len(),
            total_weight,
            weighted_length,
            average_length,
            entropy,
            min_length: table.min_len(),
            max_length: table.max_len(),
        })
    }

    /// Entropy divided by average length (1.0 is a perfect code).
    ///
    /// Returns 0.0 if the average length is zero.
    pub fn efficiency(&self) -> f64 {
        if self.average_length == 0.0 {
            0.0
        } else {
            self.entropy / self.average_length
        }
    }

    /// Export as `key=value` lines.
    pub fn export_text(&self) -> String {
        format!(
            "symbols={}\n\
             total_weight={}\n\
             weighted_length={}\n\
             average_length={:.4}\n\
             entropy={:.4}\n\
             efficiency={:.4}\n\
             min_length={}\n\
             max_length={}\n",
            self.symbols,
            self.total_weight,
            self.weighted_length,
            self.average_length,
            self.entropy,
            self.efficiency(),
            self.min_length,
            self.max_length,
        )
    }
}

impl fmt::Display for CodeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Code ===")?;
        writeln!(f, "Symbols: {}", self.symbols)?;
        writeln!(f, "Total weight: {}", self.total_weight)?;
        writeln!(f, "Codeword length: {}..={} bits", self.min_length, self.max_length)?;
        writeln!(f, "Average length: {:.3} bits/symbol", self.average_length)?;
        writeln!(f, "Entropy: {:.3} bits/symbol", self.entropy)?;
        writeln!(f, "Efficiency: {:.1}%", self.efficiency() * 100.0)
    }
}

/// Size statistics for one encoded stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamStats {
    /// Symbols fed to the encoder
    pub input_symbols: usize,

    /// Characters in the textual stream (bits + separators)
    pub stream_chars: usize,

    /// Codeword bits, excluding separators
    pub payload_bits: usize,
}

impl StreamStats {
    pub fn new(input_symbols: usize, stream: &EncodedStream) -> Self {
        Self {
            input_symbols,
            stream_chars: stream.len(),
            payload_bits: stream.payload_bits(),
        }
    }

    /// Payload bits per input symbol. Returns 0.0 for empty input.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_symbols == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.input_symbols as f64
        }
    }

    /// Payload bits relative to a fixed 8-bit encoding of the input.
    ///
    /// Returns 0.0 for empty input.
    pub fn ratio_vs_bytes(&self) -> f64 {
        if self.input_symbols == 0 {
            0.0
        } else {
            self.payload_bits as f64 / (self.input_symbols as f64 * 8.0)
        }
    }

    /// Export as `key=value` lines.
    pub fn export_text(&self) -> String {
        format!(
            "input_symbols={}\n\
             stream_chars={}\n\
             payload_bits={}\n\
             bits_per_symbol={:.4}\n\
             ratio_vs_bytes={:.4}\n",
            self.input_symbols,
            self.stream_chars,
            self.payload_bits,
            self.bits_per_symbol(),
            self.ratio_vs_bytes(),
        )
    }
}

impl fmt::Display for StreamStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Stream ===")?;
        writeln!(f, "Input symbols: {}", self.input_symbols)?;
        writeln!(f, "Stream characters: {}", self.stream_chars)?;
        writeln!(f, "Payload bits: {}", self.payload_bits)?;
        writeln!(f, "Bits/symbol: {:.3}", self.bits_per_symbol())?;
        writeln!(f, "Ratio vs 8-bit: {:.1}%", self.ratio_vs_bytes() * 100.0)
    }
}
