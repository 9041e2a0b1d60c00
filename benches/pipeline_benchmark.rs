//! Benchmarks for the outline pipeline.
//!
//! Run with: cargo bench
//!
//! These benchmarks feed the pipeline synthetic spans so that timing covers
//! aggregation, statistics, filtering and classification without PDF I/O.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use outpdf::{OutlinePipeline, Span};

/// A synthetic document: each page carries a heading, a subheading and a
/// run of body lines.
fn synthetic_spans(page_count: u32) -> Vec<Span> {
    let mut spans = Vec::new();
    for page in 1..=page_count {
        spans.push(Span::new(
            format!("Chapter {}", page),
            18.0,
            true,
            72.0,
            60.0,
            page,
        ));
        spans.push(Span::new(
            format!("Section {}.1", page),
            14.0,
            true,
            72.0,
            120.0,
            page,
        ));
        for line in 0..40 {
            spans.push(Span::new(
                format!(
                    "Body line {} with a typical sentence length for benchmark purposes.",
                    line
                ),
                11.0,
                false,
                72.0,
                160.0 + line as f32 * 14.0,
                page,
            ));
        }
    }
    spans
}

fn bench_pipeline(c: &mut Criterion) {
    let pipeline = OutlinePipeline::new();

    let small = synthetic_spans(5);
    c.bench_function("pipeline_5_pages", |b| {
        b.iter(|| pipeline.run(black_box(&small)))
    });

    let large = synthetic_spans(50);
    c.bench_function("pipeline_50_pages", |b| {
        b.iter(|| pipeline.run(black_box(&large)))
    });
}

fn bench_pipeline_construction(c: &mut Criterion) {
    // Pattern compilation cost, paid once per batch
    c.bench_function("pipeline_new", |b| {
        b.iter(|| black_box(OutlinePipeline::new()))
    });
}

criterion_group!(benches, bench_pipeline, bench_pipeline_construction);
criterion_main!(benches);
