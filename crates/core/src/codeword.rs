//! Codewords and the symbol → codeword table derived from a tree.
//!
//! A codeword is the path from the root to a leaf: `0` for every left edge,
//! `1` for every right edge. Because codewords are leaf paths of a tree, no
//! codeword is a prefix of another.
//!
//! The one exception to "codeword = path" is a tree whose root is itself a
//! leaf. That path is empty, so the lone symbol is assigned the one-bit
//! codeword `0` instead. The decoder applies the same rule.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::symbol::Symbol;
use crate::tree::{Node, PrefixTree};

/// One binary decision along a tree path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }
}

/// An owned sequence of bits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Codeword {
    bits: Vec<Bit>,
}

impl Codeword {
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// A copy of this codeword with `bit` appended.
    pub fn extended(&self, bit: Bit) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Self { bits }
    }

    /// True if `self` is a prefix of `other` (including equality).
    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl From<Vec<Bit>> for Codeword {
    fn from(bits: Vec<Bit>) -> Self {
        Self { bits }
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", bit.as_char())?;
        }
        Ok(())
    }
}

/// Immutable mapping from every leaf symbol of a tree to its codeword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodewordTable<S> {
    codes: BTreeMap<S, Codeword>,
}

impl<S: Symbol> CodewordTable<S> {
    /// Walk `tree` once and record the path to every leaf.
    ///
    /// Each pending stack frame owns its own path, so sibling branches never
    /// see each other's bits. Internal nodes with a single child (only
    /// possible for trees from [`PrefixTree::from_raw_parts`]) are walked
    /// through their present child.
    pub fn derive(tree: &PrefixTree<S>) -> Self {
        let mut codes = BTreeMap::new();

        if let Node::Leaf { symbol, .. } = tree.node(tree.root()) {
            codes.insert(*symbol, Codeword::from(vec![Bit::Zero]));
            debug!("single-leaf tree: assigned codeword 0");
            return Self { codes };
        }

        let mut stack = vec![(tree.root(), Codeword::new())];
        while let Some((id, path)) = stack.pop() {
            match tree.node(id) {
                Node::Leaf { symbol, .. } => {
                    codes.insert(*symbol, path);
                }
                Node::Internal { left, right, .. } => {
                    if left.is_none() || right.is_none() {
                        warn!(node = id.index(), "internal node with a single child");
                    }
                    if let Some(r) = right {
                        stack.push((*r, path.extended(Bit::One)));
                    }
                    if let Some(l) = left {
                        stack.push((*l, path.extended(Bit::Zero)));
                    }
                }
            }
        }

        debug!(symbols = codes.len(), "derived codeword table");
        Self { codes }
    }

    /// Codeword for `symbol`.
    ///
    /// # Errors
    /// `Error::Lookup` if the symbol is not a leaf of the tree.
    pub fn get(&self, symbol: &S) -> Result<&Codeword> {
        self.codes.get(symbol).ok_or_else(|| Error::Lookup {
            symbol: symbol.describe(),
        })
    }

    pub fn contains(&self, symbol: &S) -> bool {
        self.codes.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries ordered by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &Codeword)> {
        self.codes.iter()
    }

    pub fn max_len(&self) -> usize {
        self.codes.values().map(Codeword::len).max().unwrap_or(0)
    }

    pub fn min_len(&self) -> usize {
        self.codes.values().map(Codeword::len).min().unwrap_or(0)
    }

    /// Check that no codeword is a prefix of (or equal to) another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Codeword> = self.codes.values().collect();
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                if a.is_prefix_of(b) || b.is_prefix_of(a) {
                    return false;
                }
            }
        }
        true
    }

    /// Diagnostic dump: one `symbol: codeword` line per entry.
    pub fn report(&self) -> String {
        self.to_string()
    }
}

impl<S: Symbol> fmt::Display for CodewordTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in &self.codes {
            writeln!(f, "{}: {}", symbol.describe(), code)?;
        }
        Ok(())
    }
}
