mod common;

use common::*;
use huffseq::{Codec, CodecError, HuffmanCodec, State};

fn blob_of(codec: &Codec) -> Vec<u8> {
    let mut blob = vec![0u8; Codec::max_serial_size()];
    let used = codec.serialize(&mut blob).unwrap();
    blob.truncate(used);
    blob
}

/// Rewrites `blob` as if it had been produced on the opposite
/// endianness: flipped marker, byte-reversed escape and code words.
fn flip_endianness(blob: &mut [u8]) {
    blob[0] ^= 1;
    blob[1..5].reverse();
    let mut pos = 5;
    while pos < blob.len() {
        let len = blob[pos];
        pos += 1;
        if len > 0 {
            blob.swap(pos, pos + 1);
            pos += 2;
        }
    }
}

#[test]
fn blob_round_trips() {
    let codec = geometric_codec();
    let blob = blob_of(&codec);
    let loaded = Codec::deserialize(&blob).unwrap();
    let (original, loaded_huffman) = (
        codec.as_huffman().unwrap(),
        loaded.as_huffman().unwrap(),
    );

    assert_eq!(loaded_huffman.state(), State::CodedLoaded);
    assert_eq!(loaded_huffman.escape_code(), original.escape_code());
    for s in 0..=255u8 {
        assert_eq!(loaded_huffman.code_len(s), original.code_len(s));
        assert_eq!(loaded_huffman.code_bits(s), original.code_bits(s));
    }

    // Streams are interchangeable between the builder and the loader.
    let input = b"llkllkjllkllkjithlhlkl";
    let mut encoded = vec![0u8; codec.encoded_capacity(input.len())];
    let bits = codec.encode(input, &mut encoded).unwrap();
    let mut decoded = vec![0u8; input.len()];
    let n = loaded.decode(&encoded, bits, &mut decoded).unwrap();
    assert_eq!(&decoded[..n], input);

    let bits = loaded.encode(input, &mut encoded).unwrap();
    let n = codec.decode(&encoded, bits, &mut decoded).unwrap();
    assert_eq!(&decoded[..n], input);
}

#[test]
fn blob_size_is_bounded() {
    assert_eq!(Codec::max_serial_size(), 773);
    assert_eq!(HuffmanCodec::MAX_SERIAL_SIZE, 773);

    let codec = geometric_codec();
    let blob = blob_of(&codec);
    // Header, one length byte per symbol, a code word for the 13 coded
    // symbols (12 trained plus the escape).
    assert_eq!(blob.len(), 5 + 256 + 2 * 13);

    let mut full = Codec::new();
    let every_byte: Vec<u8> = (0..=255).collect();
    full.add(&every_byte).unwrap();
    full.build(true).unwrap();
    assert_eq!(blob_of(&full).len(), Codec::max_serial_size());
}

#[test]
fn foreign_endian_blob_loads() {
    let codec = geometric_codec();
    let mut blob = blob_of(&codec);
    flip_endianness(&mut blob);

    let loaded = Codec::deserialize(&blob).unwrap();
    let (original, loaded_huffman) = (
        codec.as_huffman().unwrap(),
        loaded.as_huffman().unwrap(),
    );
    assert_eq!(loaded_huffman.escape_code(), original.escape_code());
    for s in 0..=255u8 {
        assert_eq!(loaded_huffman.code_len(s), original.code_len(s));
        assert_eq!(loaded_huffman.code_bits(s), original.code_bits(s));
    }

    let input = b"llkllkjlkl\x00hhg";
    assert_eq!(round_trip(&loaded, input), input);
}

#[test]
fn truncated_blobs_are_rejected() {
    let blob = blob_of(&geometric_codec());
    assert!(matches!(
        Codec::deserialize(&[]),
        Err(CodecError::CorruptBlob(_))
    ));
    assert!(matches!(
        Codec::deserialize(&blob[..4]),
        Err(CodecError::CorruptBlob(_))
    ));
    assert!(matches!(
        Codec::deserialize(&blob[..blob.len() - 1]),
        Err(CodecError::CorruptBlob(_))
    ));
    assert!(matches!(
        Codec::deserialize(&blob[..200]),
        Err(CodecError::CorruptBlob(_))
    ));
}

#[test]
fn inconsistent_blobs_are_rejected() {
    let blob = blob_of(&geometric_codec());

    // Byte 5 is the stored length of symbol 0, the escape.
    let mut overlong = blob.clone();
    overlong[5] = 13;
    assert!(matches!(
        Codec::deserialize(&overlong),
        Err(CodecError::CorruptBlob("code length over the limit"))
    ));

    let mut bad_endian = blob.clone();
    bad_endian[0] = 7;
    assert!(matches!(
        Codec::deserialize(&bad_endian),
        Err(CodecError::CorruptBlob("bad endianness byte"))
    ));

    let mut out_of_range = vec![0u8; 5 + 256];
    out_of_range[1..5].copy_from_slice(&300i32.to_le_bytes());
    assert!(matches!(
        Codec::deserialize(&out_of_range),
        Err(CodecError::CorruptBlob("escape code out of range"))
    ));

    let mut unescaped = vec![0u8; 5 + 256];
    unescaped[1..5].copy_from_slice(&5i32.to_le_bytes());
    assert!(matches!(
        Codec::deserialize(&unescaped),
        Err(CodecError::CorruptBlob("escape code has no code word"))
    ));
}

#[test]
fn dna_codec_serializes_to_nothing() {
    let codec = Codec::dna();
    let mut blob = vec![0u8; Codec::max_serial_size()];
    assert_eq!(codec.serialize(&mut blob).unwrap(), 0);
}
