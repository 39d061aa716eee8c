use criterion::{Criterion, black_box, criterion_group, criterion_main};
use minhash::{MinhashConfig, MinhashEngine};

const BIG_TEXT: &str = include_str!("big_text.txt");
const SHINGLE_SIZE: usize = 5;

fn normalize_bench(c: &mut Criterion) {
    c.bench_function("normalize_big_text", |b| {
        b.iter(|| {
            let normalized = normalize::normalize(black_box(BIG_TEXT));
            black_box(normalized);
        });
    });
}

fn shingle_bench(c: &mut Criterion) {
    let normalized = normalize::normalize(BIG_TEXT);
    c.bench_function("shingle_big_text", |b| {
        b.iter(|| {
            let set = shingle::shingles(black_box(&normalized), SHINGLE_SIZE);
            black_box(set);
        });
    });
}

fn minhash_bench(c: &mut Criterion) {
    let normalized = normalize::normalize(BIG_TEXT);
    let set = shingle::shingles(&normalized, SHINGLE_SIZE);
    let engine = MinhashEngine::new(MinhashConfig::default()).expect("bench config is valid");

    c.bench_function("signature_big_text", |b| {
        b.iter(|| {
            let sig = engine.signature(black_box(&set));
            black_box(sig);
        });
    });
}

fn pipeline_bench(c: &mut Criterion) {
    let engine = MinhashEngine::new(MinhashConfig::default()).expect("bench config is valid");

    c.bench_function("normalize_shingle_signature_big_text", |b| {
        b.iter(|| {
            let normalized = normalize::normalize(black_box(BIG_TEXT));
            let set = shingle::shingles(&normalized, SHINGLE_SIZE);
            let sig = engine.signature(&set);
            black_box(sig);
        });
    });
}

criterion_group!(pipeline_benches, normalize_bench, shingle_bench, minhash_bench, pipeline_bench);
criterion_main!(pipeline_benches);
