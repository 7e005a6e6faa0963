use criterion::{criterion_group, Criterion};

use crate::benchmarks::{get_buffer, get_codec};

fn decoding_benchmark(c: &mut Criterion) {
    let buffer = get_buffer();
    let codec = get_codec(&buffer);
    let mut encoded = vec![0u8; codec.encoded_capacity(buffer.len())];
    let bits = codec.encode(&buffer, &mut encoded).unwrap();
    let mut decoded = vec![0u8; buffer.len()];

    let mut group = c.benchmark_group("huffman");
    group.bench_function("decode", |b| {
        b.iter(|| codec.decode(&encoded, bits, &mut decoded).unwrap())
    });
}

criterion_group!(decoder_benches, decoding_benchmark);
