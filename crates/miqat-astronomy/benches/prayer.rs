use std::hint::black_box;

use chrono::{FixedOffset, TimeZone};
use criterion::{criterion_group, criterion_main, Criterion};
use miqat_astronomy::prayer::calculate_prayer_times;
use miqat_types::{CalculationParams, FormatConfig, GeoCoordinate};

fn bench_calculate(c: &mut Criterion) {
    let at = FixedOffset::west_opt(4 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 6, 21, 12, 0, 0)
        .unwrap();
    let toronto = GeoCoordinate::new_unchecked(43.65, -79.38);
    let params = CalculationParams::default();
    let format = FormatConfig::default();

    c.bench_function("calculate_prayer_times", |b| {
        b.iter(|| calculate_prayer_times(black_box(at), black_box(toronto), &params, &format))
    });
}

criterion_group!(benches, bench_calculate);
criterion_main!(benches);
