//! Exchange-rate resolution benchmarks.
//!
//! Run with: cargo bench -p ledgermetrics-fx

#![allow(missing_docs)]

use std::hint::black_box;

use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ledgermetrics_fx::{FxResolver, QuoteBook};

/// Generate `hledger prices` output: a chain of currencies quoted weekly,
/// each in terms of the next, ending in SEK.
fn generate_prices(currencies: usize, weeks: usize) -> String {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let mut lines = Vec::new();

    for week in 0..weeks {
        let date = start + Duration::weeks(week as i64);
        for i in 0..currencies {
            let to = if i + 1 == currencies {
                "SEK".to_string()
            } else {
                format!("C{:03}", i + 1)
            };
            lines.push(format!("P {date} C{i:03} 1.{week:03} {to}"));
        }
        lines.push(format!("P {date} USD 10.{week:03} SEK"));
        lines.push(format!("P {date} EUR 11.{week:03} SEK"));
    }

    lines.join("\n")
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for &currencies in &[5, 20, 50] {
        let book = QuoteBook::parse(&generate_prices(currencies, 52)).unwrap();
        let resolver = FxResolver::new(["SEK", "USD", "EUR"]);
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let days: Vec<_> = (0..364).map(|d| start + Duration::days(d)).collect();

        group.throughput(Throughput::Elements(days.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(currencies),
            &book,
            |b, book| {
                b.iter(|| resolver.resolve(black_box(book), days.iter().copied()).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let prices = generate_prices(20, 520);
    c.bench_function("parse_prices", |b| {
        b.iter(|| QuoteBook::parse(black_box(&prices)).unwrap());
    });
}

criterion_group!(benches, bench_resolve, bench_parse);
criterion_main!(benches);
