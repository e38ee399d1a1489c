use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shelfdex::core::types::{Book, Complexity, ReadingLevel};
use shelfdex::index::BookIndex;
use shelfdex::query::{FilterCriteria, SortCriterion, SortField};
use shelfdex::search::QueryEngine;
use shelfdex::stats::compute_stats;

const GENRES: [&str; 6] = ["Fiction", "Science Fiction", "Fantasy", "History", "Technology", "Self-Help"];
const WORDS: [&str; 8] = ["river", "glass", "empire", "garden", "signal", "winter", "machine", "atlas"];
const TAGS: [&str; 6] = ["classic", "award", "series", "debut", "translated", "reread"];

/// Helper to create a reproducible synthetic collection
fn create_books(count: usize) -> Vec<Book> {
    let mut rng = StdRng::seed_from_u64(42);
    let start = Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap();

    (0..count)
        .map(|i| {
            let title = format!(
                "The {} {} {}",
                WORDS[rng.gen_range(0..WORDS.len())],
                WORDS[rng.gen_range(0..WORDS.len())],
                i
            );
            let finished = start + ChronoDuration::days(rng.gen_range(0..3500));
            let mut book = Book::new(
                title,
                format!("Author {}", rng.gen_range(0..200)),
                finished,
                GENRES[rng.gen_range(0..GENRES.len())],
                rng.gen_range(80..900),
            );
            book.reading_level = Some(ReadingLevel::ALL[rng.gen_range(0..3)]);
            book.complexity = Some(Complexity::ALL[rng.gen_range(0..3)]);
            book.tags = (0..rng.gen_range(0..3))
                .map(|_| TAGS[rng.gen_range(0..TAGS.len())].to_string())
                .collect();
            book.themes = vec![WORDS[rng.gen_range(0..WORDS.len())].to_string()];
            book.reading_time = Some(format!("{} hours", rng.gen_range(2..30)));
            book
        })
        .collect()
}

/// Benchmark index construction
fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for size in [100, 1_000, 10_000].iter() {
        let books = create_books(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &books, |b, books| {
            b.iter(|| BookIndex::build(black_box(books)));
        });
    }
    group.finish();
}

/// Benchmark uncached and cached search
fn bench_search(c: &mut Criterion) {
    let engine = QueryEngine::new(create_books(10_000));
    let mut group = c.benchmark_group("search");

    group.bench_function("cold", |b| {
        b.iter(|| {
            engine.clear_cache();
            engine.search(black_box("garden"), 50)
        });
    });

    engine.search("garden", 50);
    group.bench_function("warm", |b| {
        b.iter(|| engine.search(black_box("garden"), 50));
    });
    group.finish();
}

/// Benchmark multi-field filtering
fn bench_filter(c: &mut Criterion) {
    let engine = QueryEngine::new(create_books(10_000));
    let criteria = FilterCriteria::new()
        .genres(["Fantasy", "History"])
        .reading_levels([ReadingLevel::Intermediate])
        .min_pages(200)
        .max_pages(600);

    c.bench_function("filter_10k", |b| {
        b.iter(|| engine.filter(black_box(&criteria)));
    });
}

/// Benchmark two-key sort
fn bench_sort(c: &mut Criterion) {
    let engine = QueryEngine::new(create_books(10_000));
    let books = engine.books();
    let criteria = [
        SortCriterion::asc(SortField::ReadingLevel),
        SortCriterion::desc(SortField::Pages),
    ];

    c.bench_function("sort_10k", |b| {
        b.iter(|| engine.sort(black_box(&books), &criteria));
    });
}

/// Benchmark statistics aggregation
fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats");

    for size in [100, 1_000, 10_000].iter() {
        let books = create_books(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &books, |b, books| {
            b.iter(|| compute_stats(black_box(books)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_index_build,
    bench_search,
    bench_filter,
    bench_sort,
    bench_stats
);
criterion_main!(benches);
