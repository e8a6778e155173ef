//! Benchmarks for wwc_validator performance testing.
//!
//! Run with: cargo bench

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wwc_validator::{
    batch::{count_valid, validate_batch, BatchValidator},
    detect::{detect_region, validate_number},
    expiry::{check_expiry, parse_expiry_date},
    stream::ValidateExt,
    validate_at,
};

// Credential numbers, first and last in match order
const VIC: &str = "WWC-1234567-12";
const VIC_MESSY: &str = "  wwc-1234567-12  ";
const ACT: &str = "REG-12345678-1";
const UNRECOGNIZED: &str = "INVALID123";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap_or_default()
}

/// Benchmark single credential validation
fn bench_single_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_validation");
    let today = today();

    group.bench_function("vic_active", |b| {
        b.iter(|| validate_at(black_box(VIC), black_box("2030-01-01"), today))
    });

    group.bench_function("vic_messy_input", |b| {
        b.iter(|| validate_at(black_box(VIC_MESSY), black_box("2030-01-01"), today))
    });

    group.bench_function("act_last_in_table", |b| {
        b.iter(|| validate_at(black_box(ACT), black_box("2030-01-01"), today))
    });

    group.bench_function("unrecognized", |b| {
        b.iter(|| validate_at(black_box(UNRECOGNIZED), black_box("2030-01-01"), today))
    });

    group.finish();
}

/// Benchmark number matching alone
fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("detection");

    group.bench_function("detect_first", |b| {
        b.iter(|| detect_region(black_box(VIC)))
    });

    group.bench_function("detect_last", |b| {
        b.iter(|| detect_region(black_box(ACT)))
    });

    // builds the supported formats message
    group.bench_function("validate_number_miss", |b| {
        b.iter(|| validate_number(black_box(UNRECOGNIZED)))
    });

    group.finish();
}

/// Benchmark date parsing across formats
fn bench_expiry(c: &mut Criterion) {
    let mut group = c.benchmark_group("expiry");
    let today = today();

    for (name, text) in [
        ("iso", "2025-07-01"),
        ("day_first", "01/07/2025"),
        ("long_month", "1 July 2025"),
        ("rfc3339", "2025-07-01T09:30:00+10:00"),
        ("garbage", "not a date"),
    ] {
        group.bench_function(BenchmarkId::new("parse", name), |b| {
            b.iter(|| parse_expiry_date(black_box(text)))
        });
    }

    group.bench_function("check_date", |b| {
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap_or_default();
        b.iter(|| check_expiry(black_box(date), today))
    });

    group.finish();
}

/// Benchmark batch validation with various sizes
fn bench_batch_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_validation");

    for size in [10, 100, 1000, 10000].iter() {
        let credentials: Vec<(&str, &str)> = (0..*size)
            .map(|i| match i % 3 {
                0 => (VIC, "2030-01-01"),
                1 => (ACT, "15/07/2025"),
                _ => ("SA12345678", "2019-10-24"),
            })
            .collect();

        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(
            BenchmarkId::new("validate_batch", size),
            &credentials,
            |b, credentials| b.iter(|| validate_batch(black_box(credentials))),
        );

        group.bench_with_input(
            BenchmarkId::new("count_valid", size),
            &credentials,
            |b, credentials| b.iter(|| count_valid(black_box(credentials))),
        );

        group.bench_with_input(
            BenchmarkId::new("summarize", size),
            &credentials,
            |b, credentials| {
                let batch = BatchValidator::new().as_of(today());
                b.iter(|| batch.summarize(black_box(credentials)))
            },
        );
    }

    group.finish();
}

/// Benchmark streaming validation
fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("streaming");

    for size in [100, 1000, 10000].iter() {
        let credentials: Vec<(&str, &str)> = (0..*size)
            .map(|i| if i % 4 == 0 { (UNRECOGNIZED, "") } else { (VIC, "2030-01-01") })
            .collect();

        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(
            BenchmarkId::new("validate_stream", size),
            &credentials,
            |b, credentials| {
                b.iter(|| {
                    credentials
                        .iter()
                        .validate_credentials()
                        .filter(|r| r.is_valid)
                        .count()
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("valid_only_stream", size),
            &credentials,
            |b, credentials| b.iter(|| credentials.iter().validate_valid_only().count()),
        );
    }

    group.finish();
}

#[cfg(feature = "parallel")]
fn bench_parallel(c: &mut Criterion) {
    use wwc_validator::batch::{count_valid_parallel, validate_batch_parallel};

    let mut group = c.benchmark_group("parallel");

    for size in [1000, 10000, 100000].iter() {
        let credentials: Vec<(String, String)> = (0..*size)
            .map(|i| (format!("SA{:08}", i), "2030-01-01".to_string()))
            .collect();

        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(
            BenchmarkId::new("validate_parallel", size),
            &credentials,
            |b, credentials| b.iter(|| validate_batch_parallel(black_box(credentials))),
        );

        group.bench_with_input(
            BenchmarkId::new("count_parallel", size),
            &credentials,
            |b, credentials| b.iter(|| count_valid_parallel(black_box(credentials))),
        );
    }

    group.finish();
}

#[cfg(not(feature = "parallel"))]
fn bench_parallel(_c: &mut Criterion) {
    // Parallel benchmarks disabled - enable 'parallel' feature
}

criterion_group!(
    benches,
    bench_single_validation,
    bench_detection,
    bench_expiry,
    bench_batch_validation,
    bench_streaming,
    bench_parallel,
);

criterion_main!(benches);
