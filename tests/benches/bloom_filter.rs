//! # Bloom Filter Benchmarks
//!
//! | Operation | Notes |
//! |-----------|-------|
//! | `has` on a decoded filter | steady-state `Alert::has_address` cost |
//! | first `has` | includes base64 and bitset decode |
//! | encode | building a filter for an alert's address set |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use forta_bloom_filter::{BloomFilter, FilterEncoder};

fn addresses(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("0x{i:040x}")).collect()
}

fn encoded(n: usize) -> (Vec<String>, BloomFilter) {
    let keys = addresses(n);
    let mut encoder = FilterEncoder::with_estimates(n, 0.01).expect("valid estimates");
    for key in &keys {
        encoder.insert(key).expect("insert");
    }
    (keys, encoder.to_filter().expect("encoder output decodes"))
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-filter-query");

    for size in [100, 1_000, 10_000] {
        let (keys, filter) = encoded(size);
        filter.has(&keys[0]).expect("decode");

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("has_decoded", size), &size, |b, _| {
            b.iter(|| black_box(filter.has(black_box(&keys[size / 2])).expect("query")))
        });

        let params = (filter.size_bits(), filter.hash_count(), filter.bitset().to_string());
        group.bench_with_input(BenchmarkId::new("has_first_query", size), &size, |b, _| {
            b.iter(|| {
                let fresh = BloomFilter::new(params.0, params.1, params.2.clone()).expect("valid");
                black_box(fresh.has(&keys[0]).expect("query"))
            })
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-filter-encode");

    for size in [100, 1_000, 10_000] {
        let keys = addresses(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("insert_all", size), &keys, |b, keys| {
            b.iter(|| {
                let mut encoder = FilterEncoder::with_estimates(keys.len(), 0.01).expect("estimates");
                for key in keys {
                    encoder.insert(key).expect("insert");
                }
                black_box(encoder.to_base64())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_query, bench_encode);
criterion_main!(benches);
