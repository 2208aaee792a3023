//! Self-describing archive: an alphabet plus an encoded stream.
//!
//! The decoder needs the tree, and the tree is fully determined by the
//! alphabet (symbols, weights and their order). An archive therefore stores
//! the alphabet rather than the tree, and rebuilds the tree on read.
//!
//! # Archive Format
//!
//! ```text
//! +----------------------+
//! | Magic (4 bytes)      |  0x48 0x46 0x54 0x58 ("HFTX")
//! +----------------------+
//! | symbol_count (4)     |  u32 number of alphabet entries
//! +----------------------+
//! | stream_len (4)       |  u32 bytes of encoded stream text
//! +----------------------+
//! | crc32 (4)            |  u32 checksum of everything after the header
//! +----------------------+
//! | entries              |  symbol_count × (symbol u32, weight u64)
//! | (variable)           |
//! +----------------------+
//! | stream               |  stream_len bytes of '0' / '1' / ' '
//! | (variable)           |
//! +----------------------+
//! ```
//!
//! All integers are little-endian. The CRC32 covers `symbol_count`,
//! `stream_len`, the entries and the stream, so header corruption is caught
//! as well as payload corruption.

use crate::alphabet::Alphabet;
use crate::codec::{Codec, EncodedStream, SEPARATOR};
use crate::error::{Error, FramingError, Result};
use crate::symbol::Symbol;

/// Magic number for archives: "HFTX" (Huffman text)
const MAGIC: [u8; 4] = [0x48, 0x46, 0x54, 0x58];

/// Size of the archive header in bytes
const HEADER_SIZE: usize = 16;

/// Size of one alphabet entry in bytes
const ENTRY_SIZE: usize = 12;

/// A parsed archive.
#[derive(Debug, Clone)]
pub struct Archive<S> {
    /// Alphabet the stream was encoded with, in original order
    pub alphabet: Alphabet<S>,

    /// The encoded stream
    pub stream: EncodedStream,

    /// CRC32 checksum (validated)
    pub crc32: u32,
}

impl<S: Symbol> Archive<S> {
    /// Rebuild the codec the stream was encoded with.
    pub fn codec(&self) -> Result<Codec<S>> {
        Codec::from_alphabet(&self.alphabet)
    }

    /// Rebuild the tree and decode the stream.
    pub fn decode(&self) -> Result<Vec<S>> {
        self.codec()?.decode(&self.stream)
    }
}

/// Serialize an alphabet and stream into archive bytes.
///
/// # Errors
/// `FramingError::FieldOverflow` if a count does not fit in a `u32`.
pub fn write_archive<S: Symbol>(alphabet: &Alphabet<S>, stream: &EncodedStream) -> Result<Vec<u8>> {
    let symbol_count = u32::try_from(alphabet.len()).map_err(|_| FramingError::FieldOverflow {
        field: "symbol_count",
        value: alphabet.len(),
    })?;
    let stream_len = u32::try_from(stream.len()).map_err(|_| FramingError::FieldOverflow {
        field: "stream_len",
        value: stream.len(),
    })?;

    let mut entries = Vec::with_capacity(alphabet.len() * ENTRY_SIZE);
    for entry in alphabet.iter() {
        entries.extend_from_slice(&entry.symbol.to_wire().to_le_bytes());
        entries.extend_from_slice(&entry.weight.to_le_bytes());
    }

    let stream_bytes = stream.as_str().as_bytes();
    let crc32 = compute_crc(symbol_count, stream_len, &entries, stream_bytes);

    let mut out = Vec::with_capacity(HEADER_SIZE + entries.len() + stream_bytes.len());
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&symbol_count.to_le_bytes());
    out.extend_from_slice(&stream_len.to_le_bytes());
    out.extend_from_slice(&crc32.to_le_bytes());
    out.extend_from_slice(&entries);
    out.extend_from_slice(stream_bytes);

    Ok(out)
}

/// Parse archive bytes.
///
/// # Errors
/// - `FramingError::FrameTooShort` if the buffer cannot hold a header
/// - `FramingError::InvalidMagic` if the magic number doesn't match
/// - `FramingError::LengthMismatch` if the size disagrees with the header
/// - `Error::Crc` if CRC validation fails
/// - `FramingError::InvalidSymbol` if an entry is not a valid `S`
/// - `FramingError::InvalidStream` for a stream byte other than `0`, `1`, ` `
/// - alphabet validation errors
pub fn parse_archive<S: Symbol>(bytes: &[u8]) -> Result<Archive<S>> {
    if bytes.len() < HEADER_SIZE {
        return Err(FramingError::FrameTooShort {
            required: HEADER_SIZE,
            actual: bytes.len(),
        }
        .into());
    }

    let magic = read_array::<4>(bytes, 0);
    if magic != MAGIC {
        return Err(FramingError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }

    let symbol_count = u32::from_le_bytes(read_array(bytes, 4));
    let stream_len = u32::from_le_bytes(read_array(bytes, 8));
    let crc32 = u32::from_le_bytes(read_array(bytes, 12));

    let entries_len = symbol_count as usize * ENTRY_SIZE;
    let expected = HEADER_SIZE + entries_len + stream_len as usize;
    if bytes.len() != expected {
        return Err(FramingError::LengthMismatch {
            expected,
            actual: bytes.len(),
        }
        .into());
    }

    let entries = &bytes[HEADER_SIZE..HEADER_SIZE + entries_len];
    let stream_bytes = &bytes[HEADER_SIZE + entries_len..];

    let computed = compute_crc(symbol_count, stream_len, entries, stream_bytes);
    if computed != crc32 {
        return Err(Error::Crc {
            expected: crc32,
            actual: computed,
        });
    }

    let mut pairs = Vec::with_capacity(symbol_count as usize);
    for (index, chunk) in entries.chunks_exact(ENTRY_SIZE).enumerate() {
        let value = u32::from_le_bytes(read_array(chunk, 0));
        let weight = u64::from_le_bytes(read_array(chunk, 4));
        let symbol = S::from_wire(value).ok_or(FramingError::InvalidSymbol { index, value })?;
        pairs.push((symbol, weight));
    }
    let alphabet = Alphabet::from_pairs(pairs)?;

    if let Some(position) = stream_bytes
        .iter()
        .position(|&b| !matches!(b, b'0' | b'1') && b != SEPARATOR as u8)
    {
        return Err(FramingError::InvalidStream {
            position,
            byte: stream_bytes[position],
        }
        .into());
    }
    let text: String = stream_bytes.iter().map(|&b| char::from(b)).collect();
    let stream = EncodedStream::parse(&text)?;

    Ok(Archive {
        alphabet,
        stream,
        crc32,
    })
}

/// Derive an alphabet from `symbols`, encode them and write an archive.
///
/// # Errors
/// `InputError::EmptyAlphabet` for empty input, since no alphabet can be
/// derived from it.
pub fn compress_to_archive<S: Symbol>(symbols: &[S]) -> Result<Vec<u8>> {
    let alphabet = Alphabet::from_sample(symbols.iter().copied())?;
    let codec = Codec::from_alphabet(&alphabet)?;
    let stream = codec.encode(symbols.iter().copied())?;
    write_archive(&alphabet, &stream)
}

/// Copy `N` bytes starting at `offset`. Callers check bounds first.
fn read_array<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}

/// Compute CRC32 over the protected fields.
fn compute_crc(symbol_count: u32, stream_len: u32, entries: &[u8], stream: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();

    hasher.update(&symbol_count.to_le_bytes());
    hasher.update(&stream_len.to_le_bytes());
    hasher.update(entries);
    hasher.update(stream);

    hasher.finalize()
}
