use criterion::{black_box, criterion_group, criterion_main, Criterion};
use currency_converter::core::converter::convert;
use currency_converter::core::currency::{CurrencyCode, CurrencyRate};
use currency_converter::core::rate_store::RateStore;
use currency_converter::persistence::{parse_rates, render_rates};

/// A store of `size` synthetic currencies (C0000, C0001, ...).
fn synthetic_store(size: usize) -> RateStore {
    (0..size)
        .filter_map(|i| {
            CurrencyRate::new(CurrencyCode::new(format!("C{:04}", i)), 1.0 + i as f64 / 10.0).ok()
        })
        .collect()
}

fn bench_convert_defaults(c: &mut Criterion) {
    let store = RateStore::defaults();
    let from = CurrencyCode::new("GBP");
    let to = CurrencyCode::new("JPY");

    c.bench_function("convert_defaults", |b| {
        b.iter(|| convert(black_box(1234.5), &from, &to, black_box(&store)))
    });
}

fn bench_convert_large_store(c: &mut Criterion) {
    let store = synthetic_store(200);
    let from = CurrencyCode::new("C0000");
    let to = CurrencyCode::new("C0199");

    c.bench_function("convert_200_currencies", |b| {
        b.iter(|| convert(black_box(1234.5), &from, &to, black_box(&store)))
    });
}

fn bench_rate_file_round_trip(c: &mut Criterion) {
    let store = synthetic_store(200);

    c.bench_function("rate_file_round_trip_200", |b| {
        b.iter(|| parse_rates(&render_rates(black_box(&store))))
    });
}

criterion_group!(
    benches,
    bench_convert_defaults,
    bench_convert_large_store,
    bench_rate_file_round_trip
);
criterion_main!(benches);
