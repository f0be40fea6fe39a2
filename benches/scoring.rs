//! Benchmarks for the extraction hot path: sentence scoring and topics.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use recap::analysis::{extract_topics, rank_sentences};

/// Build a synthetic transcript of roughly `sentences` sentences.
fn synthetic_transcript(sentences: usize) -> String {
    let templates = [
        "We talked about the deployment process for a while.",
        "Sarah Chen explained how the Acme Dashboard aggregates reporting data.",
        "The candidate described debugging a production incident under pressure.",
        "I asked about testing strategy and you answered with concrete examples.",
        "Kubernetes came up repeatedly during the infrastructure discussion.",
    ];
    (0..sentences)
        .map(|i| templates[i % templates.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_rank_sentences(c: &mut Criterion) {
    let short = synthetic_transcript(20);
    let long = synthetic_transcript(500);

    c.bench_function("rank_sentences/20", |b| {
        b.iter(|| rank_sentences(black_box(&short), 5, 2))
    });
    c.bench_function("rank_sentences/500", |b| {
        b.iter(|| rank_sentences(black_box(&long), 5, 2))
    });
}

fn bench_extract_topics(c: &mut Criterion) {
    let long = synthetic_transcript(500);

    c.bench_function("extract_topics/500", |b| {
        b.iter(|| extract_topics(black_box(&long), 5))
    });
}

criterion_group!(benches, bench_rank_sentences, bench_extract_topics);
criterion_main!(benches);
