use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use markov_text::chain::definition::weather_hmm;
use markov_text::corpus::Corpus;
use markov_text::ngram::{NGramModel, SequenceGenerator};
use markov_text::sampling;

fn bench_model_build(c: &mut Criterion) {
    let corpus = Corpus::embedded();

    for n in [1, 2, 3] {
        c.bench_function(&format!("ngram build n={n} (embedded corpus)"), |b| {
            b.iter(|| NGramModel::build(black_box(corpus.tokens()), n).unwrap())
        });
    }
}

fn bench_generation(c: &mut Criterion) {
    let corpus = Corpus::embedded();
    let model = NGramModel::build(corpus.tokens(), 2).unwrap();
    let generator = SequenceGenerator::new(&model);

    c.bench_function("generate 20 tokens (n=2)", |b| {
        let mut rng = SmallRng::seed_from_u64(1);
        b.iter(|| {
            // A dead end near the end of the corpus is possible; ignore it.
            let _ = generator.generate(black_box("the"), 20, &mut rng);
        })
    });
}

fn bench_sampling(c: &mut Criterion) {
    let weights: Vec<f64> = (1..=100).map(|w| w as f64).collect();
    let mut rng = SmallRng::seed_from_u64(1);

    c.bench_function("sample_index (100 weights)", |b| {
        b.iter(|| sampling::sample_index(&mut rng, black_box(&weights)).unwrap())
    });
}

fn bench_hmm_walk(c: &mut Criterion) {
    let hmm = weather_hmm().unwrap();
    let mut rng = SmallRng::seed_from_u64(1);

    c.bench_function("observed_walk 1000 steps", |b| {
        b.iter(|| hmm.observed_walk(black_box(1000), &mut rng).unwrap())
    });
}

criterion_group!(
    benches,
    bench_model_build,
    bench_generation,
    bench_sampling,
    bench_hmm_walk
);
criterion_main!(benches);
