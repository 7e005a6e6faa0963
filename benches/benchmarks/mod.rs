use huffseq::Codec;
use rand::prelude::{Distribution, SmallRng};
use rand::SeedableRng;
use rand_distr::Zipf;

pub mod decoder;
pub mod encoder;

/// Size of the buffer used to bench.
const BUFFER_LENGTH: usize = 500_000;

/// Creates a Zipf-distributed buffer of [`BUFFER_LENGTH`] bytes.
pub fn get_buffer() -> Vec<u8> {
    let mut rng = SmallRng::seed_from_u64(0);
    let distribution = Zipf::new(64, 1.0).unwrap();
    (0..BUFFER_LENGTH)
        .map(|_| b' ' + distribution.sample(&mut rng) as u8)
        .collect()
}

/// A codec trained on the bench buffer, built with an escape.
pub fn get_codec(buffer: &[u8]) -> Codec {
    let mut codec = Codec::new();
    codec.add(buffer).unwrap();
    codec.build(true).unwrap();
    codec
}
