use criterion::{criterion_group, Criterion};

use crate::benchmarks::{get_buffer, get_codec};

fn encoding_benchmark(c: &mut Criterion) {
    let buffer = get_buffer();
    let codec = get_codec(&buffer);
    let mut out = vec![0u8; codec.encoded_capacity(buffer.len())];

    let mut group = c.benchmark_group("huffman");
    group.bench_function("encode", |b| {
        b.iter(|| codec.encode(&buffer, &mut out).unwrap())
    });

    let dna = huffseq::Codec::dna();
    let bases: Vec<u8> = buffer.iter().map(|b| b"acgt"[*b as usize % 4]).collect();
    let mut packed = vec![0u8; dna.encoded_capacity(bases.len())];
    group.bench_function("encode_dna", |b| {
        b.iter(|| dna.encode(&bases, &mut packed).unwrap())
    });
}

criterion_group!(encoder_benches, encoding_benchmark);
