//! Integration tests for the full huffcode pipeline.
//!
//! These tests verify end-to-end behavior: alphabet -> tree -> codeword
//! table -> encode -> decode, with verification that output matches input.
//! Randomised checks use fixed seeds so failures are reproducible.

use std::sync::Arc;

use huffcode_core::{
    archive::{compress_to_archive, parse_archive, write_archive, Archive},
    error::{DecodeError, EncodeError, Error},
    stats::{CodeStats, StreamStats},
    Alphabet, Codec, CodewordTable, EncodedStream, PrefixTree,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const POOL: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 .,;:!?'\"-";

fn random_alphabet(rng: &mut ChaCha8Rng) -> Alphabet<char> {
    let k = rng.gen_range(1..=60);
    let pool: Vec<char> = POOL.chars().collect();
    let symbols = &pool[..k];
    let weights: Vec<u64> = (0..k).map(|_| rng.gen_range(0..1000)).collect();
    Alphabet::new(symbols, &weights).unwrap()
}

/// Round-trip: decode(tree, encode(sequence, table)) == sequence.
#[test]
fn test_round_trip_random_alphabets() {
    for seed in 0..50u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let alphabet = random_alphabet(&mut rng);
        let codec = Codec::from_alphabet(&alphabet).unwrap();

        let symbols: Vec<char> = alphabet.iter().map(|e| e.symbol).collect();
        let len = rng.gen_range(0..500);
        let input: Vec<char> = (0..len)
            .map(|_| symbols[rng.gen_range(0..symbols.len())])
            .collect();

        let stream = codec.encode(input.iter().copied()).unwrap();
        assert_eq!(stream.codewords().count(), input.len(), "seed {}", seed);

        let decoded = codec.decode(&stream).unwrap();
        assert_eq!(decoded, input, "seed {}", seed);
    }
}

/// Prefix-free: no codeword is a prefix of another.
#[test]
fn test_tables_are_prefix_free() {
    for seed in 100..150u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let alphabet = random_alphabet(&mut rng);
        let tree = PrefixTree::build(&alphabet).unwrap();
        let table = CodewordTable::derive(&tree);

        assert_eq!(table.len(), alphabet.len());
        assert!(table.is_prefix_free(), "seed {}", seed);
    }
}

/// Tree completeness: 2k - 1 nodes for k >= 2, one node for k = 1.
#[test]
fn test_tree_completeness() {
    for seed in 200..240u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let alphabet = random_alphabet(&mut rng);
        let tree = PrefixTree::build(&alphabet).unwrap();

        let k = alphabet.len();
        let expected = if k == 1 { 1 } else { 2 * k - 1 };
        assert_eq!(tree.len(), expected, "seed {}", seed);
        assert_eq!(tree.leaf_count(), k);
        assert_eq!(tree.weight(), alphabet.total_weight());
    }
}

/// Determinism: same input, same order, same table.
#[test]
fn test_determinism() {
    for seed in 300..320u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let alphabet = random_alphabet(&mut rng);

        let a = CodewordTable::derive(&PrefixTree::build(&alphabet).unwrap());
        let b = CodewordTable::derive(&PrefixTree::build(&alphabet.clone()).unwrap());
        assert_eq!(a, b, "seed {}", seed);
    }
}

/// Optimality: weighted length never exceeds a fixed-length code and stays
/// within one bit of the entropy.
#[test]
fn test_average_length_bounds() {
    for seed in 400..430u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let alphabet = random_alphabet(&mut rng);
        if alphabet.total_weight() == 0 {
            continue;
        }
        let codec = Codec::from_alphabet(&alphabet).unwrap();
        let stats = CodeStats::compute(&alphabet, codec.table()).unwrap();

        let fixed = (alphabet.len() as f64).log2().ceil().max(1.0);
        assert!(stats.average_length <= fixed + 1e-9, "seed {}", seed);
        assert!(stats.average_length + 1e-9 >= stats.entropy, "seed {}", seed);
        assert!(stats.average_length < stats.entropy + 1.0 + 1e-9, "seed {}", seed);
    }
}

/// Scenario A: the classic textbook alphabet.
#[test]
fn test_textbook_alphabet() {
    let alphabet = Alphabet::new(&['a', 'b', 'c', 'd', 'e', 'f'], &[5, 9, 12, 13, 16, 45]).unwrap();
    let codec = Codec::from_alphabet(&alphabet).unwrap();
    let table = codec.table();

    let f = table.get(&'f').unwrap().len();
    let a = table.get(&'a').unwrap().len();
    let b = table.get(&'b').unwrap().len();

    assert_eq!(f, 1);
    assert_eq!(a, table.max_len());
    assert_eq!(b, table.max_len());
    for (symbol, code) in table.iter() {
        assert!(code.len() >= f, "{:?}", symbol);
    }
}

/// Scenario B: one-symbol alphabet.
#[test]
fn test_single_symbol_alphabet() {
    let alphabet = Alphabet::new(&['x'], &[10]).unwrap();
    let codec = Codec::from_alphabet(&alphabet).unwrap();

    let stream = codec.encode_str("x").unwrap();
    assert_eq!(codec.decode_to_string(&stream).unwrap(), "x");
}

/// Scenario C: symbols outside the alphabet are named.
#[test]
fn test_encode_unknown_symbol() {
    let alphabet = Alphabet::new(&['a', 'b'], &[1, 2]).unwrap();
    let codec = Codec::from_alphabet(&alphabet).unwrap();

    let err = codec.encode_str("ab c").unwrap_err();
    match err {
        Error::Encoding(EncodeError::UnknownSymbol { ref symbol, position }) => {
            assert_eq!(symbol, "' '");
            assert_eq!(position, 2);
        }
        ref other => panic!("unexpected error {:?}", other),
    }
    assert!(err.to_string().contains("position 2"));
}

/// Scenario D: empty input.
#[test]
fn test_empty_sequence() {
    let alphabet = Alphabet::new(&['a', 'b', 'c'], &[3, 2, 1]).unwrap();
    let codec = Codec::from_alphabet(&alphabet).unwrap();

    let stream = codec.encode(std::iter::empty()).unwrap();
    assert_eq!(stream, EncodedStream::default());
    assert!(codec.decode(&stream).unwrap().is_empty());
}

/// Invalid input surfaces before any tree is built.
#[test]
fn test_empty_alphabet_is_invalid() {
    assert!(matches!(
        PrefixTree::<char>::from_weights(&[], &[]),
        Err(Error::InvalidInput(_))
    ));
}

/// A stream produced by one alphabet fails cleanly against another tree.
#[test]
fn test_decode_against_wrong_tree() {
    let big_alphabet = Alphabet::new(&['a', 'b', 'c', 'd'], &[1, 1, 1, 1]).unwrap();
    let big = Codec::from_alphabet(&big_alphabet).unwrap();
    let lone = Codec::from_alphabet(&Alphabet::new(&['a'], &[1]).unwrap()).unwrap();

    let stream = big.encode_str("abcd").unwrap();
    assert_eq!(stream.as_str(), "00 01 10 11 ");
    assert!(matches!(
        lone.decode(&stream),
        Err(Error::Decoding(DecodeError::PathOffTree { bit: '1', position: 4 }))
    ));
}

/// Trees and codecs are read-only after construction and can be shared.
#[test]
fn test_shared_codec_across_threads() {
    let alphabet =
        Alphabet::from_sample("the quick brown fox jumps over the lazy dog".chars()).unwrap();
    let codec = Arc::new(Codec::from_alphabet(&alphabet).unwrap());

    let handles: Vec<_> = ["the fox", "lazy dog", "quick brown", "jumps over"]
        .into_iter()
        .map(|text| {
            let codec = Arc::clone(&codec);
            std::thread::spawn(move || {
                let stream = codec.encode_str(text).unwrap();
                codec.decode_to_string(&stream).unwrap() == text
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

/// Archive: write, parse, rebuild and decode.
#[test]
fn test_archive_pipeline() {
    let input: Vec<char> = "She sells sea shells by the sea shore.".chars().collect();

    let bytes = compress_to_archive(&input).unwrap();
    let archive: Archive<char> = parse_archive(&bytes).unwrap();
    let decoded = archive.decode().unwrap();
    assert_eq!(decoded, input);

    let stats = StreamStats::new(input.len(), &archive.stream);
    assert!(stats.ratio_vs_bytes() < 1.0);
}

/// Archive with an explicit alphabet larger than the text.
#[test]
fn test_archive_with_preset_alphabet() {
    let alphabet = Alphabet::new(&['a', 'b', 'c', 'd', 'e', 'f'], &[5, 9, 12, 13, 16, 45]).unwrap();
    let codec = Codec::from_alphabet(&alphabet).unwrap();
    let stream = codec.encode_str("faded").unwrap();

    let bytes = write_archive(&alphabet, &stream).unwrap();
    let archive: Archive<char> = parse_archive(&bytes).unwrap();

    assert_eq!(archive.alphabet, alphabet);
    assert_eq!(archive.codec().unwrap().decode_to_string(&archive.stream).unwrap(), "faded");
}

/// Archive corruption is detected.
#[test]
fn test_archive_corruption_detection() {
    let data: Vec<char> = "test data for crc validation".chars().collect();
    let mut bytes = compress_to_archive(&data).unwrap();

    // Corrupt a weight byte in the first entry
    bytes[20] ^= 0xFF;

    assert!(matches!(parse_archive::<char>(&bytes), Err(Error::Crc { .. })));
}
