//! Throughput benchmarks for the annotation pipeline
//!
//! Run with: cargo bench --bench pipeline_benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use marginalia_core::{
    Annotation, Category, IndexedText, OverlapResolver, Pipeline, SegmentBuilder,
};
use std::hint::black_box;

const SENTENCE: &str = "The committee met in 1987 to review the proposal carefully. ";

fn generate_text(sentences: usize) -> String {
    SENTENCE.repeat(sentences)
}

/// Annotations with drifted offsets spread evenly over the text
fn generate_annotations(text: &str, count: usize) -> Vec<Annotation> {
    let sentence_len = SENTENCE.chars().count();
    let sentences = text.chars().count() / sentence_len;
    let categories = [
        Category::Validation,
        Category::FactualFlag,
        Category::CreativeFlag,
        Category::LogicFlag,
    ];

    (0..count)
        .map(|i| {
            let base = (i % sentences.max(1)) * sentence_len;
            let (offset, anchor) = match i % 3 {
                0 => (21, "1987"),
                1 => (4, "committee"),
                _ => (40, "proposal"),
            };
            // Off by one so the reconciler has work to do
            let start = base + offset + 1;
            Annotation::new(
                format!("a{i}"),
                categories[i % categories.len()].clone(),
                start..start + anchor.len(),
                anchor,
            )
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let text = generate_text(80);
    let pipeline = Pipeline::default();

    for count in [0, 10, 50, 200] {
        let annotations = generate_annotations(&text, count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("run", count), &annotations, |b, annotations| {
            b.iter(|| pipeline.run(black_box(&text), black_box(annotations)));
        });
    }

    group.finish();
}

fn bench_text_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_size");
    let pipeline = Pipeline::default();

    for sentences in [10, 100, 1000] {
        let text = generate_text(sentences);
        let annotations = generate_annotations(&text, sentences / 2);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("run", sentences), &text, |b, text| {
            b.iter(|| pipeline.run(black_box(text), black_box(&annotations)));
        });
    }

    group.finish();
}

fn bench_segment_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment_builder");
    let text = generate_text(200);
    let indexed = IndexedText::new(&text);
    let builder = SegmentBuilder::default();

    for count in [10, 100, 1000] {
        let annotations = OverlapResolver::new().resolve(generate_annotations(&text, count));
        group.bench_with_input(BenchmarkId::new("build", count), &annotations, |b, annotations| {
            b.iter(|| builder.build(black_box(&indexed), black_box(annotations)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_text_size, bench_segment_builder);
criterion_main!(benches);
