//! Micro-operation benchmarks for the policy cores.
//!
//! Run with: `cargo bench --bench policies`
//!
//! Measures per-operation latency for get and insert across all bounded
//! policies under identical conditions.

use std::hint::black_box;
use std::time::Instant;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use memocache::policy::clock::ClockPolicy;
use memocache::policy::fifo::FifoPolicy;
use memocache::policy::lfu::LfuPolicy;
use memocache::policy::lru::LruPolicy;
use memocache::policy::mru::MruPolicy;

const CAPACITY: usize = 16_384;
const OPS: u64 = 100_000;

macro_rules! bench_get_hit {
    ($group:expr, $label:expr, $policy:ty) => {
        $group.bench_function($label, |b| {
            b.iter_custom(|iters| {
                let mut policy = <$policy>::with_capacity(CAPACITY);
                for i in 0..CAPACITY as u64 {
                    policy.insert(i, i);
                }
                let start = Instant::now();
                for _ in 0..iters {
                    for i in 0..OPS {
                        let key = i % (CAPACITY as u64);
                        black_box(policy.get(&key));
                    }
                }
                start.elapsed()
            })
        });
    };
}

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit_ns");
    group.throughput(Throughput::Elements(OPS));

    bench_get_hit!(group, "lru", LruPolicy<u64, u64>);
    bench_get_hit!(group, "lfu", LfuPolicy<u64, u64>);
    bench_get_hit!(group, "fifo", FifoPolicy<u64, u64>);
    bench_get_hit!(group, "mru", MruPolicy<u64, u64>);
    bench_get_hit!(group, "clock", ClockPolicy<u64, u64>);

    group.finish();
}

macro_rules! bench_insert_evict {
    ($group:expr, $label:expr, $policy:ty) => {
        $group.bench_function($label, |b| {
            b.iter_custom(|iters| {
                let mut total = std::time::Duration::ZERO;
                for _ in 0..iters {
                    let mut policy = <$policy>::with_capacity(CAPACITY);
                    for i in 0..CAPACITY as u64 {
                        policy.insert(i, i);
                    }
                    let start = Instant::now();
                    for i in 0..OPS {
                        let key = CAPACITY as u64 + i;
                        policy.insert(key, key);
                    }
                    total += start.elapsed();
                }
                total
            })
        });
    };
}

fn bench_insert_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_evict_ns");
    group.throughput(Throughput::Elements(OPS));

    bench_insert_evict!(group, "lru", LruPolicy<u64, u64>);
    bench_insert_evict!(group, "lfu", LfuPolicy<u64, u64>);
    bench_insert_evict!(group, "fifo", FifoPolicy<u64, u64>);
    bench_insert_evict!(group, "mru", MruPolicy<u64, u64>);
    bench_insert_evict!(group, "clock", ClockPolicy<u64, u64>);

    group.finish();
}

macro_rules! bench_mixed {
    ($group:expr, $label:expr, $policy:ty) => {
        $group.bench_function($label, |b| {
            b.iter_custom(|iters| {
                let mut total = std::time::Duration::ZERO;
                for _ in 0..iters {
                    let mut policy = <$policy>::with_capacity(CAPACITY);
                    for i in 0..CAPACITY as u64 {
                        policy.insert(i, i);
                    }
                    // Uniform keys over twice the capacity: roughly half the
                    // lookups miss and trigger an insert with eviction.
                    let mut rng = StdRng::seed_from_u64(0xCAC4E);
                    let start = Instant::now();
                    for _ in 0..OPS {
                        let key = rng.gen_range(0..(2 * CAPACITY as u64));
                        if policy.get(&key).is_none() {
                            policy.insert(key, key);
                        }
                    }
                    total += start.elapsed();
                }
                total
            })
        });
    };
}

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_ops_ns");
    group.throughput(Throughput::Elements(OPS));

    bench_mixed!(group, "lru", LruPolicy<u64, u64>);
    bench_mixed!(group, "lfu", LfuPolicy<u64, u64>);
    bench_mixed!(group, "clock", ClockPolicy<u64, u64>);

    group.finish();
}

criterion_group!(benches, bench_get_hit, bench_insert_evict, bench_mixed);
criterion_main!(benches);
