/*
 * Utility functions and consts used by the tests.
 *
 */

use huffseq::Codec;
use rand::prelude::{Distribution, SmallRng};
use rand::SeedableRng;
use rand_distr::Zipf;

/// Training data with geometric weights over `'a'..='l'`: one `'a'`, then
/// `'b'` through `'l'` with counts doubling from 1 up to 1024.
pub fn geometric_training() -> Vec<u8> {
    let mut data = vec![b'a'];
    for (i, sym) in (b'b'..=b'l').enumerate() {
        for _ in 0..1u64 << i {
            data.push(sym);
        }
    }
    data
}

/// A codec trained on [`geometric_training`] and built with an escape.
pub fn geometric_codec() -> Codec {
    let mut codec = Codec::new();
    codec.add(&geometric_training()).unwrap();
    codec.build(true).unwrap();
    codec
}

/// Creates `len` bytes in `33..=96` sampled from a Zipfian distribution,
/// reproducible from `seed`.
pub fn zipf_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let distribution = Zipf::new(64, 1.0).unwrap();
    (0..len)
        .map(|_| b' ' + distribution.sample(&mut rng) as u8)
        .collect()
}

/// Encodes and decodes `input`, checking the expansion bound on the way,
/// and returns the decoded bytes.
pub fn round_trip(codec: &Codec, input: &[u8]) -> Vec<u8> {
    let mut encoded = vec![0u8; codec.encoded_capacity(input.len())];
    let bits = codec.encode(input, &mut encoded).unwrap();
    assert!(bits <= 8 * (input.len() + 1), "expansion bound violated");
    let mut decoded = vec![0u8; input.len() + 1];
    let n = codec.decode(&encoded, bits, &mut decoded).unwrap();
    decoded.truncate(n);
    decoded
}
