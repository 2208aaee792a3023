//! Sample text generation.
//!
//! When no input is given, a sample is drawn from the active alphabet with
//! each symbol chosen in proportion to its weight. The generator is seeded,
//! so the same seed always produces the same text.

use huffcode_core::Alphabet;
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Draw `len` symbols from `alphabet`, weighted by symbol weight.
///
/// Falls back to a uniform draw if every weight is zero. Weights whose sum
/// does not fit in a `u64` are rejected as `WeightedError::InvalidWeight`.
pub fn generate_sample_text(
    alphabet: &Alphabet<char>,
    seed: u64,
    len: usize,
) -> Result<String, WeightedError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let symbols: Vec<char> = alphabet.iter().map(|e| e.symbol).collect();

    let weights: Vec<u64> = if alphabet.total_weight() == 0 {
        vec![1; symbols.len()]
    } else {
        alphabet.iter().map(|e| e.weight).collect()
    };

    if weights.iter().try_fold(0u64, |acc, &w| acc.checked_add(w)).is_none() {
        return Err(WeightedError::InvalidWeight);
    }
    let dist = WeightedIndex::new(&weights)?;
    Ok((0..len).map(|_| symbols[dist.sample(&mut rng)]).collect())
}
