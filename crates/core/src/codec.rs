//! Textual prefix-code codec.
//!
//! # Stream Format
//!
//! An encoded stream is plain text over three characters: `0`, `1` and the
//! separator ` ` (a single space). Each input symbol becomes its codeword
//! followed by one separator:
//!
//! ```text
//! input:   f   a     c
//! stream:  "0 1100 100 "
//! ```
//!
//! Codewords are not packed into bytes. The separator makes each codeword
//! boundary explicit, which the decoder uses to reject truncated or
//! misaligned streams.
//!
//! # Decoding Rules
//!
//! The decoder walks the tree from the root, `0` to the left child and `1`
//! to the right. Landing on a leaf emits its symbol and resets the cursor to
//! the root; the separator that follows an emitted symbol is consumed. The
//! separator is optional after a leaf, so `"01100100"` decodes the same as
//! the stream above. A separator is an error anywhere else:
//! - after some bits that have not reached a leaf (incomplete codeword)
//! - with no bits before it (empty codeword)
//!
//! A tree whose root is a leaf has the conventional codeword `0`.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::codeword::{Bit, CodewordTable};
use crate::error::{DecodeError, EncodeError, Result};
use crate::symbol::Symbol;
use crate::tree::{Node, PrefixTree};

/// Token written after every codeword.
pub const SEPARATOR: char = ' ';

/// Output of [`encode`]: codewords as `0`/`1` text, each followed by [`SEPARATOR`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EncodedStream {
    text: String,
}

impl EncodedStream {
    /// Wrap existing text, checking it only contains `0`, `1` and separators.
    ///
    /// # Errors
    /// `DecodeError::UnexpectedChar` naming the first invalid character.
    pub fn parse(text: &str) -> Result<Self> {
        if let Some((position, found)) = text
            .chars()
            .enumerate()
            .find(|&(_, c)| c != SEPARATOR && Bit::from_char(c).is_none())
        {
            return Err(DecodeError::UnexpectedChar { found, position }.into());
        }
        Ok(Self {
            text: text.to_owned(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters (every character is one byte).
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Codeword tokens between separators.
    pub fn codewords(&self) -> impl Iterator<Item = &str> {
        self.text.split(SEPARATOR).filter(|t| !t.is_empty())
    }

    /// Number of `0`/`1` characters, excluding separators.
    pub fn payload_bits(&self) -> usize {
        self.text.bytes().filter(|&b| b != SEPARATOR as u8).count()
    }
}

impl fmt::Display for EncodedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for EncodedStream {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Encode `symbols` with `table`.
///
/// # Errors
/// `EncodeError::UnknownSymbol` for the first symbol without a codeword. No
/// partial stream is returned.
pub fn encode<S, I>(symbols: I, table: &CodewordTable<S>) -> Result<EncodedStream>
where
    S: Symbol,
    I: IntoIterator<Item = S>,
{
    let mut text = String::new();

    for (position, symbol) in symbols.into_iter().enumerate() {
        let code = table.get(&symbol).map_err(|_| EncodeError::UnknownSymbol {
            symbol: symbol.describe(),
            position,
        })?;
        for &bit in code.bits() {
            text.push(bit.as_char());
        }
        text.push(SEPARATOR);
    }

    Ok(EncodedStream { text })
}

/// Decode `stream` by walking `tree`.
///
/// # Errors
/// `DecodeError` variants carrying the character position of the defect.
pub fn decode<S: Symbol>(tree: &PrefixTree<S>, stream: &EncodedStream) -> Result<Vec<S>> {
    decode_text(tree, stream.as_str())
}

/// Decode raw text without first wrapping it in an [`EncodedStream`].
pub fn decode_text<S: Symbol>(tree: &PrefixTree<S>, text: &str) -> Result<Vec<S>> {
    let root = tree.root();
    let lone_leaf = match tree.node(root) {
        Node::Leaf { symbol, .. } => Some(*symbol),
        Node::Internal { .. } => None,
    };

    let mut out = Vec::new();
    let mut cursor = root;
    // Position of the first bit of the codeword in progress
    let mut start: Option<usize> = None;
    // A separator may close the codeword just emitted
    let mut after_emit = false;

    for (position, c) in text.chars().enumerate() {
        if c == SEPARATOR {
            if after_emit {
                after_emit = false;
                continue;
            }
            return Err(match start {
                Some(_) => DecodeError::IncompleteCodeword { position },
                None => DecodeError::EmptyCodeword { position },
            }
            .into());
        }

        let bit = Bit::from_char(c).ok_or(DecodeError::UnexpectedChar { found: c, position })?;
        after_emit = false;

        if let Some(symbol) = lone_leaf {
            if bit != Bit::Zero {
                return Err(DecodeError::PathOffTree { bit: c, position }.into());
            }
            out.push(symbol);
            after_emit = true;
            continue;
        }

        if start.is_none() {
            start = Some(position);
        }
        let next = tree
            .child(cursor, bit)
            .ok_or(DecodeError::PathOffTree { bit: c, position })?;

        match tree.node(next) {
            Node::Leaf { symbol, .. } => {
                out.push(*symbol);
                cursor = root;
                start = None;
                after_emit = true;
            }
            Node::Internal { .. } => cursor = next,
        }
    }

    if let Some(start) = start {
        return Err(DecodeError::Truncated { start }.into());
    }

    Ok(out)
}

/// A tree together with its derived codeword table.
///
/// Immutable once built; share it behind an `Arc` to decode from several
/// threads.
#[derive(Debug, Clone)]
pub struct Codec<S> {
    tree: PrefixTree<S>,
    table: CodewordTable<S>,
}

impl<S: Symbol> Codec<S> {
    pub fn new(tree: PrefixTree<S>) -> Self {
        let table = CodewordTable::derive(&tree);
        Self { tree, table }
    }

    /// Build the optimal tree for `alphabet` and derive its table.
    pub fn from_alphabet(alphabet: &Alphabet<S>) -> Result<Self> {
        Ok(Self::new(PrefixTree::build(alphabet)?))
    }

    pub fn tree(&self) -> &PrefixTree<S> {
        &self.tree
    }

    pub fn table(&self) -> &CodewordTable<S> {
        &self.table
    }

    pub fn encode<I>(&self, symbols: I) -> Result<EncodedStream>
    where
        I: IntoIterator<Item = S>,
    {
        let stream = encode(symbols, &self.table)?;
        debug!(chars = stream.len(), "encoded stream");
        Ok(stream)
    }

    pub fn decode(&self, stream: &EncodedStream) -> Result<Vec<S>> {
        decode(&self.tree, stream)
    }
}

impl Codec<char> {
    pub fn encode_str(&self, text: &str) -> Result<EncodedStream> {
        self.encode(text.chars())
    }

    pub fn decode_to_string(&self, stream: &EncodedStream) -> Result<String> {
        Ok(self.decode(stream)?.into_iter().collect())
    }
}
