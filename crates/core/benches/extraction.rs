use brevis_core::chunk::chunk_text;
use brevis_core::preprocess::{PreprocessConfig, preprocess_html};
use brevis_core::{Document, Extractor, fallback, structured};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let short = fixture("short_article.html");
    let long = fixture("long_article.html");

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("short", "1KB"), &short, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("long", "4KB"), &long, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_preprocess(c: &mut Criterion) {
    let html = fixture("long_article.html");
    let config = PreprocessConfig::default();

    c.bench_function("preprocess", |b| b.iter(|| preprocess_html(black_box(&html), &config)));
}

fn bench_extraction_paths(c: &mut Criterion) {
    let long = fixture("long_article.html");
    let short = fixture("short_article.html");
    let extractor = Extractor::with_defaults().unwrap();

    c.bench_function("structured_parse", |b| b.iter(|| structured::parse(black_box(&long), None)));
    c.bench_function("fallback_scrape", |b| b.iter(|| fallback::scrape(black_box(&short))));
    c.bench_function("extract_html", |b| b.iter(|| extractor.extract_html(black_box(&short), None)));
}

fn bench_chunking(c: &mut Criterion) {
    let text = fixture("article.txt").repeat(200);

    let mut group = c.benchmark_group("chunking");

    for size in [500usize, 1024, 2000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| chunk_text(black_box(&text), size).unwrap().count())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_preprocess, bench_extraction_paths, bench_chunking);
criterion_main!(benches);
