//! Error types for huffcode.
//!
//! Every fallible operation returns a structured error rather than panicking,
//! and no error is retried internally. Each variant carries enough context
//! (the offending symbol, the position in the stream) to act on.

use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to a specific failure domain:
/// - Invalid input: alphabets or raw trees that cannot produce a code
/// - Allocation: the queue or node arena could not be reserved
/// - Queue: misuse of the fixed-capacity priority selector
/// - Lookup: codeword requested for a symbol the table does not hold
/// - Encoding / Decoding: codec failures with positions
/// - Framing / CRC / I/O: archive container failures
#[derive(Debug, Error)]
pub enum Error {
    /// Alphabet or tree input rejected before any work was done
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// Reserving storage for `requested` elements failed
    #[error("allocation failure: could not reserve {requested} {what}")]
    Allocation { what: &'static str, requested: usize },

    /// Priority selector misuse (a logic error, surfaced loudly)
    #[error("priority queue error: {0}")]
    Queue(#[from] QueueError),

    /// Symbol absent from the codeword table
    #[error("no codeword for symbol {symbol}")]
    Lookup { symbol: String },

    /// Encoding failure (e.g., symbol outside the alphabet)
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodeError),

    /// Decoding failure (e.g., malformed stream, path off the tree)
    #[error("decoding error: {0}")]
    Decoding(#[from] DecodeError),

    /// Archive container error (e.g., invalid header, length mismatch)
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),

    /// CRC validation failed, indicating archive corruption
    #[error("CRC mismatch: expected {expected:#010x}, got {actual:#010x}")]
    Crc { expected: u32, actual: u32 },

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Rejected alphabets and raw trees.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// No symbols at all (cannot build a tree)
    #[error("empty alphabet: at least one symbol is required")]
    EmptyAlphabet,

    /// Symbols and weights have different lengths
    #[error("length mismatch: {symbols} symbols but {weights} weights")]
    LengthMismatch { symbols: usize, weights: usize },

    /// Weight below zero
    #[error("negative weight {weight} for symbol {symbol}")]
    NegativeWeight { symbol: String, weight: i64 },

    /// The same symbol listed twice
    #[error("duplicate symbol {symbol} at index {index}")]
    DuplicateSymbol { symbol: String, index: usize },

    /// Subtree weights no longer fit in a u64
    #[error("weight overflow while merging subtrees")]
    WeightOverflow,

    /// A raw tree refers to a node index outside the arena
    #[error("node {node} refers to missing child {child} (arena holds {len} nodes)")]
    DanglingChild { node: usize, child: usize, len: usize },

    /// A raw tree root outside the arena
    #[error("root {root} is outside the arena of {len} nodes")]
    InvalidRoot { root: usize, len: usize },

    /// A node owned by more than one parent, or reachable through a cycle
    #[error("node {node} is reachable more than once")]
    SharedNode { node: usize },

    /// Internal node with neither child
    #[error("internal node {node} has no children")]
    ChildlessInternal { node: usize },

    /// Internal node weight differs from the sum of its children
    #[error("node {node} has weight {actual}, children sum to {expected}")]
    WeightMismatch { node: usize, expected: u64, actual: u64 },

    /// A node that no path from the root reaches
    #[error("node {node} is not reachable from the root")]
    UnreachableNode { node: usize },
}

/// Priority selector errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    /// Insert attempted with the queue already at capacity
    #[error("queue overflow: capacity {capacity} exhausted")]
    Overflow { capacity: usize },

    /// Extract attempted on an empty queue
    #[error("queue underflow: no entries remain")]
    Underflow,
}

/// Encoding errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// Input symbol has no codeword
    #[error("symbol {symbol} at input position {position} is not in the code table")]
    UnknownSymbol { symbol: String, position: usize },
}

/// Decoding errors. Positions are character offsets into the stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Tree has no nodes to walk
    #[error("cannot decode against an empty tree")]
    EmptyTree,

    /// Character other than '0', '1' or the separator
    #[error("unexpected character {found:?} at position {position}")]
    UnexpectedChar { found: char, position: usize },

    /// Bit leads to a child the tree does not have
    #[error("bit '{bit}' at position {position} leads off the tree")]
    PathOffTree { bit: char, position: usize },

    /// Separator reached while the cursor sits on an internal node
    #[error("separator at position {position} ends an incomplete codeword")]
    IncompleteCodeword { position: usize },

    /// Separator with no codeword bits before it
    #[error("empty codeword at position {position}")]
    EmptyCodeword { position: usize },

    /// Stream ended in the middle of a codeword
    #[error("stream truncated: codeword starting at position {start} never reached a leaf")]
    Truncated { start: usize },
}

/// Archive container errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FramingError {
    /// Invalid magic number in header
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Archive is too short to contain a valid header
    #[error("archive too short: need at least {required} bytes, got {actual}")]
    FrameTooShort { required: usize, actual: usize },

    /// Total size doesn't match the lengths in the header
    #[error("archive length mismatch: header implies {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Symbol value not representable in the requested symbol type
    #[error("entry {index} holds invalid symbol value {value:#x}")]
    InvalidSymbol { index: usize, value: u32 },

    /// Stream byte other than `0`, `1` or the separator
    #[error("stream byte {byte:#04x} at offset {position} is not '0', '1' or ' '")]
    InvalidStream { position: usize, byte: u8 },

    /// Header field does not fit its on-wire width
    #[error("{field} value {value} does not fit in 32 bits")]
    FieldOverflow { field: &'static str, value: usize },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
