// benches/extract.rs
use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, Criterion};

use docket_scrape::config::ExtractOptions;
use docket_scrape::{CaseQuery, DocketDocument, Extractor, FixedClock};

const PAGE: &str = include_str!("../tests/fixtures/docket_full.html");

fn bench_extract(c: &mut Criterion) {
    let extractor = Extractor::new(&ExtractOptions::default()).expect("default layout compiles");
    let query = CaseQuery::new("https://example.test/docket", "Smith, John").expect("query");
    let clock = FixedClock::at(NaiveDate::from_ymd_opt(2024, 6, 1).expect("date"));

    c.bench_function("parse_document", |b| {
        b.iter(|| DocketDocument::parse(black_box(PAGE)).map(|_| ()))
    });

    let doc = DocketDocument::parse(PAGE).expect("fixture parses");
    c.bench_function("extract_parsed", |b| {
        b.iter(|| extractor.extract(black_box(&query), black_box(&doc), &clock))
    });

    c.bench_function("extract_html", |b| {
        b.iter(|| extractor.extract_html(&query, black_box(PAGE), &clock))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
