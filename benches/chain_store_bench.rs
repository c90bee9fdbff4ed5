//! Benchmark for ChainStore vs standard HashMap.
//!
//! Compares the separate-chaining table against Rust's standard HashMap for
//! common operations, including growth from the default capacity.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dualstore::store::{ChainStore, Collection};
use std::collections::HashMap;

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("chain_insert");

    for size in [100, 1000, 10000] {
        // ChainStore insert, growing from the default 16 buckets
        group.bench_with_input(
            BenchmarkId::new("ChainStore", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut store = ChainStore::new();
                    for key in 0..size {
                        store.insert(black_box(key), black_box(key * 2));
                    }
                    black_box(store)
                });
            },
        );

        // Standard HashMap insert
        group.bench_with_input(
            BenchmarkId::new("HashMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = HashMap::new();
                    for key in 0..size {
                        map.insert(black_box(key), black_box(key * 2));
                    }
                    black_box(map)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// insert with preallocation Benchmark
// =============================================================================

fn benchmark_insert_preallocated(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("chain_insert_preallocated");

    for size in [100, 1000, 10000] {
        // ChainStore insert into a table sized to avoid resizes
        group.bench_with_input(
            BenchmarkId::new("ChainStore", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut store = ChainStore::with_capacity(size as usize * 2);
                    for key in 0..size {
                        store.insert(black_box(key), black_box(key * 2));
                    }
                    black_box(store)
                });
            },
        );

        // Standard HashMap insert with capacity
        group.bench_with_input(
            BenchmarkId::new("HashMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut map = HashMap::with_capacity(size as usize);
                    for key in 0..size {
                        map.insert(black_box(key), black_box(key * 2));
                    }
                    black_box(map)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("chain_get");

    for size in [100, 1000, 10000] {
        // Prepare data
        let store: ChainStore<i32, i32> = (0..size).map(|key| (key, key * 2)).collect();
        let standard_map: HashMap<i32, i32> = (0..size).map(|key| (key, key * 2)).collect();

        // ChainStore get
        group.bench_with_input(
            BenchmarkId::new("ChainStore", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sum = 0;
                    for key in 0..size {
                        if let Some(&value) = store.get(&black_box(key)) {
                            sum += value;
                        }
                    }
                    black_box(sum)
                });
            },
        );

        // Standard HashMap get
        group.bench_with_input(
            BenchmarkId::new("HashMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sum = 0;
                    for key in 0..size {
                        if let Some(&value) = standard_map.get(&black_box(key)) {
                            sum += value;
                        }
                    }
                    black_box(sum)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// remove Benchmark
// =============================================================================

fn benchmark_remove(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("chain_remove");

    for size in [100, 1000, 10000] {
        // ChainStore remove
        group.bench_with_input(
            BenchmarkId::new("ChainStore", size),
            &size,
            |bencher, &size| {
                bencher.iter_with_setup(
                    || (0..size).map(|key| (key, key * 2)).collect::<ChainStore<i32, i32>>(),
                    |mut store| {
                        for key in 0..size {
                            black_box(store.remove(&key));
                        }
                        black_box(store)
                    },
                );
            },
        );

        // Standard HashMap remove
        group.bench_with_input(
            BenchmarkId::new("HashMap", size),
            &size,
            |bencher, &size| {
                bencher.iter_with_setup(
                    || (0..size).map(|key| (key, key * 2)).collect::<HashMap<i32, i32>>(),
                    |mut map| {
                        for key in 0..size {
                            black_box(map.remove(&key));
                        }
                        black_box(map)
                    },
                );
            },
        );
    }

    group.finish();
}

// =============================================================================
// sorted_keys Benchmark
// =============================================================================

fn benchmark_sorted_keys(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("chain_sorted_keys");

    for size in [100, 1000, 10000] {
        // Prepare data
        let store: ChainStore<i32, i32> = (0..size).map(|key| (key, key * 2)).collect();

        group.bench_with_input(
            BenchmarkId::new("ChainStore", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    let keys = store.sorted_keys();
                    black_box(keys)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_insert_preallocated,
    benchmark_get,
    benchmark_remove,
    benchmark_sorted_keys
);

criterion_main!(benches);
