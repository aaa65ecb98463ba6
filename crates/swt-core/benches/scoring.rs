use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use swt_core::local::overlap::extract_keywords;
use swt_core::local::stemmer::stem;
use swt_core::model::{KeyElements, Passage};
use swt_core::{Lexicon, LocalScorer, ScoringConfig};

const PASSAGE: &str = "Youth unemployment rates have been rising across Europe for a decade. \
Governments have invested heavily in training programmes, yet few graduates find stable work. \
Economists conclude that education reform alone cannot solve the crisis.";

const STRONG: &str = "Youth unemployment rates keep rising across Europe; however, although \
governments invested heavily in training programmes, education reform alone cannot solve the crisis.";

const PARAPHRASE: &str = "The passage notes increasing youth joblessness, but training alone \
has not fixed it and they was unable to recieve help.";

fn passage() -> Passage {
    Passage::new(
        PASSAGE,
        KeyElements {
            topic: Some("rising youth unemployment rates".into()),
            pivot: Some("governments invested heavily in training programmes".into()),
            conclusion: Some("education reform alone cannot solve the crisis".into()),
        },
    )
}

fn bench_local_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("local_score");
    let scorer = LocalScorer::new(
        Arc::new(Lexicon::standard().expect("standard lexicon")),
        ScoringConfig::default(),
    );
    let passage = passage();

    group.bench_function("strong", |b| {
        b.iter(|| scorer.score(black_box(STRONG), black_box(&passage)))
    });

    group.bench_function("paraphrase_with_errors", |b| {
        b.iter(|| scorer.score(black_box(PARAPHRASE), black_box(&passage)))
    });

    group.bench_function("form_failure", |b| {
        b.iter(|| scorer.score(black_box("Rates rose."), black_box(&passage)))
    });

    group.finish();
}

fn bench_components(c: &mut Criterion) {
    let mut group = c.benchmark_group("components");

    group.bench_function("stem", |b| {
        b.iter(|| stem(black_box("hopefulness")))
    });

    group.bench_function("extract_keywords", |b| {
        b.iter(|| extract_keywords(black_box(PASSAGE)))
    });

    group.bench_function("lexicon_standard", |b| {
        b.iter(Lexicon::standard)
    });

    group.finish();
}

criterion_group!(benches, bench_local_scoring, bench_components);
criterion_main!(benches);
