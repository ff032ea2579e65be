//! Puka Benchmarks
//!
//! This module contains benchmarks for the Puka cuckoo hash table.
//! The benchmarks are implemented using the Criterion framework, which provides
//! statistical analysis and performance regression detection.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkId, BatchSize,
    Criterion, SamplingMode, Throughput,
};
use puka_lib::data_structures::puka_cuckoo_hash::{PukaCuckooHash, PukaCuckooHashConfig};
use std::time::Duration;

fn keys(size: usize) -> Vec<String> {
    (0..size).map(|i| format!("key-{i}")).collect()
}

fn filled(size: usize) -> PukaCuckooHash {
    let mut table = PukaCuckooHash::with_config(PukaCuckooHashConfig::default())
        .expect("default config is valid");
    for key in keys(size) {
        table.insert(key).expect("insert succeeds");
    }
    table
}

/// Benchmark the Puka Cuckoo Hash
fn bench_puka_cuckoo_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("puka_cuckoo_hash");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));
    group.sample_size(100);

    // Insertion from the default starting size, growth included
    for size in [100, 1000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("insert", size), size, |b, &size| {
            let input = keys(size);
            b.iter_batched(
                || input.clone(),
                |input| {
                    let mut table = PukaCuckooHash::with_config(PukaCuckooHashConfig::default())
                        .expect("default config is valid");
                    for key in input {
                        table.insert(black_box(key)).expect("insert succeeds");
                    }
                    table
                },
                BatchSize::SmallInput,
            );
        });
    }

    // Lookups of stored keys
    for size in [100, 1000, 10_000].iter() {
        let table = filled(*size);
        let input = keys(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("lookup_hit", size), size, |b, _| {
            b.iter(|| {
                for key in &input {
                    black_box(table.lookup(key.as_str()));
                }
            });
        });
    }

    // Lookups of absent keys
    for size in [100, 1000, 10_000].iter() {
        let table = filled(*size);
        let input: Vec<String> = (0..*size).map(|i| format!("absent-{i}")).collect();
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("lookup_miss", size), size, |b, _| {
            b.iter(|| {
                for key in &input {
                    black_box(table.lookup(key.as_str()));
                }
            });
        });
    }

    // Draining a filled table
    for size in [100, 1000].iter() {
        let input = keys(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("remove", size), size, |b, &size| {
            b.iter_batched(
                || filled(size),
                |mut table| {
                    for key in &input {
                        black_box(table.remove(key.as_str()));
                    }
                    table
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// Group all benchmarks together
criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02)
        .confidence_level(0.99);
    targets = bench_puka_cuckoo_hash
}

criterion_main!(benches);
