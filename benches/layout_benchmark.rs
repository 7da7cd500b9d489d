//! Benchmarks for unpdf-layout analysis performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the pipeline over synthetic pages of per-character runs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use unpdf_layout::{
    analyze_document, reconstruct_line_text, DocumentInput, LayoutAnalyzer, LayoutOptions,
    PageInput, PageRect, TextPipeline, TextRun,
};

const SENTENCE: &str = "the annual report covers every region of the business in some detail";

/// One run per character, the way many producers emit text.
fn line_runs(text: &str, x: f32, y: f32) -> Vec<TextRun> {
    let mut runs = Vec::with_capacity(text.len());
    let mut cursor = x;
    for c in text.chars() {
        if c != ' ' {
            runs.push(TextRun::new(c.to_string(), cursor, y, 5.0, 10.0));
        }
        cursor += if c == ' ' { 9.0 } else { 5.0 };
    }
    runs
}

/// Creates a synthetic page with three text blocks and an image.
fn create_test_page(number: u32) -> PageInput {
    let mut page = PageInput::letter(number);
    let mut y = 720.0;
    for block in 0..3 {
        for _ in 0..12 {
            page.runs.extend(line_runs(SENTENCE, 72.0, y));
            y -= 12.0;
        }
        y -= 30.0;
        if block == 1 {
            page.add_image(PageRect::new(400.0, y + 40.0, 100.0, 80.0));
        }
    }
    page
}

/// Benchmark single-line reconstruction.
fn bench_line_reconstruction(c: &mut Criterion) {
    let runs = line_runs(SENTENCE, 72.0, 700.0);

    c.bench_function("reconstruct_line", |b| {
        b.iter(|| reconstruct_line_text(black_box(&runs)));
    });
}

/// Benchmark page analysis per text pipeline.
fn bench_page_analysis(c: &mut Criterion) {
    let page = create_test_page(1);
    let mut group = c.benchmark_group("page_analysis");

    for pipeline in [TextPipeline::Legacy, TextPipeline::Rules, TextPipeline::Smart] {
        let analyzer = LayoutAnalyzer::new(LayoutOptions::new().with_pipeline(pipeline));
        group.bench_function(pipeline.as_str(), |b| {
            b.iter(|| analyzer.analyze(black_box(&page)));
        });
    }

    group.finish();
}

/// Benchmark document analysis, sequential and parallel.
fn bench_document_analysis(c: &mut Criterion) {
    let doc = DocumentInput {
        pages: (1..=20).map(create_test_page).collect(),
    };
    let mut group = c.benchmark_group("document_analysis");

    group.bench_function("20_pages_sequential", |b| {
        let options = LayoutOptions::new().sequential();
        b.iter(|| analyze_document(black_box(&doc), &options));
    });

    group.bench_function("20_pages_parallel", |b| {
        let options = LayoutOptions::new();
        b.iter(|| analyze_document(black_box(&doc), &options));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_line_reconstruction,
    bench_page_analysis,
    bench_document_analysis,
);
criterion_main!(benches);
