//! Built-in letter-frequency tables.
//!
//! Weights are percentages scaled by 100 to stay integral. Upper-case letters
//! carry the same weight as their lower-case counterparts.

use huffcode_core::{Alphabet, Result};

/// English letter frequencies, a..z.
const ENGLISH: [u64; 26] = [
    834, 154, 273, 414, 1260, 203, 192, 611, 671, 23, 87, 424, 253, 680, 770, 166, 9, 568, 611,
    937, 285, 106, 234, 20, 204, 6,
];

/// French letter frequencies, a..z.
const FRENCH: [u64; 26] = [
    813, 93, 315, 355, 1510, 96, 97, 108, 694, 71, 16, 568, 323, 642, 527, 303, 89, 643, 791, 711,
    605, 183, 4, 42, 19, 106,
];

/// A named frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    English,
    French,
}

impl Preset {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "english" | "en" => Some(Preset::English),
            "french" | "fr" => Some(Preset::French),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::English => "english",
            Preset::French => "french",
        }
    }

    /// Alphabet of `a..z` followed by `A..Z`.
    pub fn alphabet(self) -> Result<Alphabet<char>> {
        let weights = match self {
            Preset::English => &ENGLISH,
            Preset::French => &FRENCH,
        };

        let lower = ('a'..='z').zip(weights.iter().copied());
        let upper = ('A'..='Z').zip(weights.iter().copied());
        Alphabet::from_pairs(lower.chain(upper))
    }
}
