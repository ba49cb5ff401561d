//! Criterion benchmarks for the three codecs on repetitive and text-like input.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use textpack_core::{huffman, lzw, rle};

fn text_like(len: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let alphabet = b"abcdefghijklmnopqrstuvwxyz .,\n";
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

fn bench_compress(c: &mut Criterion) {
    let repetitive = "the the the and the and the cat sat on the mat ".repeat(100);
    let text = text_like(5000);

    c.bench_function("huffman_compress_repetitive", |b| {
        b.iter(|| huffman::compress(black_box(&repetitive)).unwrap())
    });
    c.bench_function("huffman_compress_text", |b| {
        b.iter(|| huffman::compress(black_box(&text)).unwrap())
    });
    c.bench_function("lzw_compress_repetitive", |b| {
        b.iter(|| lzw::compress(black_box(&repetitive)).unwrap())
    });
    c.bench_function("lzw_compress_text", |b| {
        b.iter(|| lzw::compress(black_box(&text)).unwrap())
    });
    c.bench_function("rle_compress_text", |b| {
        b.iter(|| rle::compress(black_box(&text)).unwrap())
    });
}

fn bench_decompress(c: &mut Criterion) {
    let text = text_like(5000);
    let encoded = huffman::compress(&text).unwrap();
    let codes = lzw::compress(&text).unwrap();
    let runs = rle::compress(&"aaaaabbbbbbbbcd".repeat(300)).unwrap();

    c.bench_function("huffman_decompress_text", |b| {
        b.iter(|| huffman::decompress(black_box(&encoded.bits), &encoded.tree).unwrap())
    });
    c.bench_function("lzw_decompress_text", |b| {
        b.iter(|| lzw::decompress(black_box(&codes)).unwrap())
    });
    c.bench_function("rle_decompress_runs", |b| {
        b.iter(|| rle::decompress(black_box(&runs)).unwrap())
    });
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
