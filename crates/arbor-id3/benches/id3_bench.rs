//! Criterion benchmarks for arbor-id3: tree induction and classification.

use criterion::{Criterion, criterion_group, criterion_main};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use arbor_id3::{Example, Id3Config, Schema};

fn make_categorical(
    n_examples: usize,
    n_features: usize,
    cardinality: usize,
    seed: u64,
) -> (Schema, Vec<Example>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut names: Vec<String> = (0..n_features).map(|f| format!("f{f}")).collect();
    names.push("class".to_string());
    let schema = Schema::new(names).unwrap();
    let examples = (0..n_examples)
        .map(|_| {
            let values: Vec<String> = (0..n_features)
                .map(|_| format!("v{}", rng.gen_range(0..cardinality)))
                .collect();
            let label = format!("c{}", rng.gen_range(0..4));
            Example::new(values, label)
        })
        .collect();
    (schema, examples)
}

fn bench_id3_fit(c: &mut Criterion) {
    let (schema, examples) = make_categorical(500, 8, 4, 42);
    let cfg = Id3Config::new();

    c.bench_function("id3_fit_500x8_card4", |b| {
        b.iter(|| cfg.fit(&schema, &examples).unwrap());
    });
}

fn bench_id3_classify_batch(c: &mut Criterion) {
    let (schema, examples) = make_categorical(500, 8, 4, 42);
    let tree = Id3Config::new().fit(&schema, &examples).unwrap();
    let rows: Vec<Vec<String>> = examples.iter().map(|e| e.values().to_vec()).collect();

    c.bench_function("id3_classify_batch_500x8", |b| {
        b.iter(|| tree.classify_batch(&rows).unwrap());
    });
}

criterion_group!(benches, bench_id3_fit, bench_id3_classify_batch);
criterion_main!(benches);
