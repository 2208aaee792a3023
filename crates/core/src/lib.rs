//! huffcode-core: optimal prefix codes with a textual 0/1 codec
//!
//! This library builds a Huffman tree from a weighted alphabet, derives one
//! codeword per symbol, and converts symbol sequences to and from a text
//! stream of `0`/`1` codewords separated by single spaces.
//!
//! # Architecture
//!
//! The pipeline runs leaves-first through these modules:
//! - `alphabet`: validated `(symbol, weight)` tables
//! - `selector`: fixed-capacity min-priority queue with stable ties
//! - `tree`: arena-backed prefix tree and its optimal construction
//! - `codeword`: codeword derivation and the symbol → codeword table
//! - `codec`: encoder (table-driven) and decoder (tree-driven)
//! - `stats`: code efficiency and stream size figures
//! - `archive`: alphabet + stream container with CRC32
//!
//! # Example
//! ```
//! use huffcode_core::{Alphabet, Codec};
//!
//! let alphabet = Alphabet::new(&['a', 'b', 'c'], &[1, 2, 10]).unwrap();
//! let codec = Codec::from_alphabet(&alphabet).unwrap();
//!
//! let stream = codec.encode_str("cab").unwrap();
//! assert_eq!(stream.as_str(), "1 00 01 ");
//! assert_eq!(codec.decode_to_string(&stream).unwrap(), "cab");
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured and carry positions
//! - **Deterministic**: same alphabet order, same tree, same codewords
//! - **Immutable results**: trees, tables and codecs are read-only once built

pub mod alphabet;
pub mod archive;
pub mod codec;
pub mod codeword;
pub mod error;
pub mod selector;
pub mod stats;
pub mod symbol;
pub mod tree;

// Re-export commonly used types
pub use alphabet::{Alphabet, WeightedSymbol};
pub use codec::{decode, encode, Codec, EncodedStream, SEPARATOR};
pub use codeword::{Bit, Codeword, CodewordTable};
pub use error::{Error, Result};
pub use symbol::Symbol;
pub use tree::{Node, NodeId, PrefixTree};
