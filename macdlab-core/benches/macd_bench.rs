//! Criterion benchmarks for the MACD engine and labeler.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use macdlab_core::data::{ingest, SyntheticProvider};
use macdlab_core::domain::PriceSeries;
use macdlab_core::indicators::{Macd, MacdParams, Weighting};
use macdlab_core::signals::{label_series, MacdSignal};

fn synthetic_series(years: i32) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024 - years, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
    ingest("BENCH", SyntheticProvider::generate("BENCH", start, end)).unwrap()
}

fn bench_macd(c: &mut Criterion) {
    let mut group = c.benchmark_group("macd_lines");
    for years in [1, 10] {
        let closes = synthetic_series(years).closes();
        for weighting in [Weighting::Recursive, Weighting::Adjusted] {
            let macd = Macd::new(MacdParams {
                weighting,
                ..MacdParams::default()
            });
            group.bench_with_input(
                BenchmarkId::new(format!("{weighting:?}"), closes.len()),
                &closes,
                |b, closes| b.iter(|| macd.lines(black_box(closes))),
            );
        }
    }
    group.finish();
}

fn bench_labeler(c: &mut Criterion) {
    let series = synthetic_series(10);
    let oscillator = Macd::default().compute(&series);
    c.bench_function("label_series_10y", |b| {
        b.iter(|| label_series(black_box(&series), black_box(&oscillator)))
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let series = synthetic_series(1);
    let signal = MacdSignal::default();
    c.bench_function("evaluate_1y", |b| b.iter(|| signal.evaluate(black_box(&series))));
}

criterion_group!(benches, bench_macd, bench_labeler, bench_evaluate);
criterion_main!(benches);
