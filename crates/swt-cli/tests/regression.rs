//! Scoring regression corpus.
//!
//! Pins the local engine's output for a fixed set of summaries so changes to
//! the lexicon or rule tables show up as test failures.

use std::path::Path;
use std::sync::Arc;

use swt_core::{parser, Lexicon, LocalScorer, ScoringConfig};

struct Case {
    name: &'static str,
    summary: &'static str,
    raw: f64,
    overall: u32,
    band: &'static str,
}

const CORPUS: &[Case] = &[
    Case {
        name: "all elements, contrast, clean",
        summary: "Youth unemployment rates keep rising across Europe; however, although \
                  governments invested heavily in training programmes, education reform alone \
                  cannot solve the crisis.",
        raw: 8.0,
        overall: 90,
        band: "Expert",
    },
    Case {
        name: "pivot dropped, no connector",
        summary: "Youth unemployment rates keep rising across Europe and education reform alone \
                  cannot solve the crisis.",
        raw: 6.0,
        overall: 68,
        band: "Good",
    },
    Case {
        name: "pivot dropped, two errors",
        summary: "Youth unemployment rates keep rising across Europe and education reform alone \
                  cannot solve the crisis, and the goverment should of acted.",
        raw: 5.0,
        overall: 56,
        band: "Competent",
    },
    Case {
        name: "off topic but well formed",
        summary: "The weather was pleasant yesterday, although many people stayed at home to \
                  read books.",
        raw: 5.0,
        overall: 56,
        band: "Competent",
    },
    Case {
        name: "too short",
        summary: "Unemployment is rising.",
        raw: 0.0,
        overall: 0,
        band: "Insufficient",
    },
];

fn scorer() -> LocalScorer {
    LocalScorer::new(
        Arc::new(Lexicon::standard().unwrap()),
        ScoringConfig::default(),
    )
}

#[test]
fn corpus_scores_are_stable() {
    let passage = parser::parse_passage(Path::new("../../passages/youth-unemployment.toml")).unwrap();
    let scorer = scorer();

    let mut failures = Vec::new();
    for case in CORPUS {
        let result = scorer.score(case.summary, &passage);
        if result.raw_score != case.raw
            || result.overall_score != case.overall
            || result.band != case.band
        {
            failures.push(format!(
                "{}: expected raw {} / {} / {}, got raw {} / {} / {} ({})",
                case.name,
                case.raw,
                case.overall,
                case.band,
                result.raw_score,
                result.overall_score,
                result.band,
                result.feedback
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn errors_never_raise_the_score() {
    let passage = parser::parse_passage(Path::new("../../passages/youth-unemployment.toml")).unwrap();
    let scorer = scorer();

    let clean = scorer.score(CORPUS[1].summary, &passage);
    let flawed = scorer.score(CORPUS[2].summary, &passage);
    assert!(flawed.raw_score <= clean.raw_score);
    assert!(flawed.grammar.value < clean.grammar.value);
    assert_eq!(flawed.content.value, clean.content.value);
}

#[test]
fn overall_tracks_raw_across_corpus() {
    let passage = parser::parse_passage(Path::new("../../passages/youth-unemployment.toml")).unwrap();
    let scorer = scorer();

    let mut scored: Vec<(f64, u32)> = CORPUS
        .iter()
        .map(|case| {
            let r = scorer.score(case.summary, &passage);
            (r.raw_score, r.overall_score)
        })
        .collect();
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    assert!(scored.windows(2).all(|w| w[0].1 <= w[1].1));
}
