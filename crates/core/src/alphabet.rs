//! Weighted alphabets: the input to tree construction.
//!
//! An [`Alphabet`] is an ordered list of `(symbol, weight)` pairs. The order
//! is significant: it is the insertion order into the priority selector, and
//! therefore decides ties between equal weights.

use std::collections::HashMap;

use crate::error::{InputError, Result};
use crate::symbol::Symbol;

/// A symbol with its relative frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedSymbol<S> {
    pub symbol: S,
    pub weight: u64,
}

/// Validated, non-empty set of weighted symbols with unique symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet<S> {
    entries: Vec<WeightedSymbol<S>>,
}

impl<S: Symbol> Alphabet<S> {
    /// Build an alphabet from parallel symbol and weight slices.
    ///
    /// # Errors
    /// - `InputError::LengthMismatch` if the slices differ in length
    /// - `InputError::EmptyAlphabet` if there are no symbols
    /// - `InputError::DuplicateSymbol` if a symbol repeats
    pub fn new(symbols: &[S], weights: &[u64]) -> Result<Self> {
        if symbols.len() != weights.len() {
            return Err(InputError::LengthMismatch {
                symbols: symbols.len(),
                weights: weights.len(),
            }
            .into());
        }
        Self::from_pairs(symbols.iter().copied().zip(weights.iter().copied()))
    }

    /// Build an alphabet from `(symbol, weight)` pairs, keeping their order.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
    {
        let mut seen = HashMap::new();
        let mut entries = Vec::new();

        for (index, (symbol, weight)) in pairs.into_iter().enumerate() {
            if seen.insert(symbol, index).is_some() {
                return Err(InputError::DuplicateSymbol {
                    symbol: symbol.describe(),
                    index,
                }
                .into());
            }
            entries.push(WeightedSymbol { symbol, weight });
        }

        if entries.is_empty() {
            return Err(InputError::EmptyAlphabet.into());
        }

        Ok(Self { entries })
    }

    /// Build an alphabet from signed weights, rejecting negatives.
    ///
    /// Frequency tables arriving from loosely typed sources (CSV, JSON) may
    /// carry signed values; this is the checked entry point for them.
    pub fn from_signed(symbols: &[S], weights: &[i64]) -> Result<Self> {
        if symbols.len() != weights.len() {
            return Err(InputError::LengthMismatch {
                symbols: symbols.len(),
                weights: weights.len(),
            }
            .into());
        }

        let mut unsigned = Vec::with_capacity(weights.len());
        for (&symbol, &weight) in symbols.iter().zip(weights) {
            let w = u64::try_from(weight).map_err(|_| InputError::NegativeWeight {
                symbol: symbol.describe(),
                weight,
            })?;
            unsigned.push(w);
        }

        Self::new(symbols, &unsigned)
    }

    /// Count symbol occurrences in a sample.
    ///
    /// Symbols are ordered by first appearance, so the same sample always
    /// yields the same alphabet (and the same tree).
    pub fn from_sample<I>(sample: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        let mut index: HashMap<S, usize> = HashMap::new();
        let mut counts: Vec<(S, u64)> = Vec::new();

        for symbol in sample {
            match index.get(&symbol) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(symbol, counts.len());
                    counts.push((symbol, 1));
                }
            }
        }

        Self::from_pairs(counts)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed alphabet; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &WeightedSymbol<S>> {
        self.entries.iter()
    }

    /// Weight of `symbol`, if present.
    pub fn weight_of(&self, symbol: S) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.weight)
    }

    /// Sum of all weights, saturating at `u64::MAX`.
    pub fn total_weight(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_new_keeps_order() {
        let alphabet = Alphabet::new(&['c', 'a', 'b'], &[3, 1, 2]).unwrap();
        let symbols: Vec<char> = alphabet.iter().map(|e| e.symbol).collect();
        assert_eq!(symbols, vec!['c', 'a', 'b']);
        assert_eq!(alphabet.total_weight(), 6);
        assert_eq!(alphabet.weight_of('a'), Some(1));
        assert_eq!(alphabet.weight_of('z'), None);
    }

    #[test]
    fn test_empty_alphabet() {
        let result = Alphabet::<char>::new(&[], &[]);
        assert!(matches!(
            result,
            Err(Error::InvalidInput(InputError::EmptyAlphabet))
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let result = Alphabet::new(&['a', 'b'], &[1]);
        assert!(matches!(
            result,
            Err(Error::InvalidInput(InputError::LengthMismatch {
                symbols: 2,
                weights: 1
            }))
        ));
    }

    #[test]
    fn test_duplicate_symbol() {
        let result = Alphabet::new(&['a', 'b', 'a'], &[1, 2, 3]);
        match result {
            Err(Error::InvalidInput(InputError::DuplicateSymbol { symbol, index })) => {
                assert_eq!(symbol, "'a'");
                assert_eq!(index, 2);
            }
            other => panic!("expected duplicate symbol error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_weight() {
        let result = Alphabet::from_signed(&['a', 'b'], &[4, -1]);
        match result {
            Err(Error::InvalidInput(InputError::NegativeWeight { symbol, weight })) => {
                assert_eq!(symbol, "'b'");
                assert_eq!(weight, -1);
            }
            other => panic!("expected negative weight error, got {:?}", other),
        }

        let ok = Alphabet::from_signed(&['a', 'b'], &[4, 0]).unwrap();
        assert_eq!(ok.weight_of('b'), Some(0));
    }

    #[test]
    fn test_from_sample_counts_in_first_appearance_order() {
        let alphabet = Alphabet::from_sample("abracadabra".chars()).unwrap();
        let pairs: Vec<(char, u64)> = alphabet.iter().map(|e| (e.symbol, e.weight)).collect();
        assert_eq!(
            pairs,
            vec![('a', 5), ('b', 2), ('r', 2), ('c', 1), ('d', 1)]
        );
    }

    #[test]
    fn test_from_empty_sample() {
        assert!(Alphabet::from_sample("".chars()).is_err());
    }
}
