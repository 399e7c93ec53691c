use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use sampled_lru::builder::CacheBuilder;
use sampled_lru::policy::sampled_lru::SampledLruCore;

fn warmed(capacity: usize) -> SampledLruCore<u64, u64> {
    let mut cache = CacheBuilder::new(capacity).seed(42).build();
    for i in 0..capacity as u64 {
        cache.add(i, i);
    }
    cache
}

fn bench_add_get(c: &mut Criterion) {
    c.bench_function("sampled_lru_add_get", |b| {
        b.iter_batched(
            || warmed(1024),
            |mut cache| {
                for i in 0..1024u64 {
                    cache.add(std::hint::black_box(i + 10_000), i);
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("sampled_lru_get_hit", |b| {
        b.iter_batched(
            || warmed(4096),
            |mut cache| {
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(cache.get(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_peek_hit(c: &mut Criterion) {
    c.bench_function("sampled_lru_peek_hit", |b| {
        b.iter_batched(
            || warmed(4096),
            |cache| {
                for i in 0..4096u64 {
                    let _ = std::hint::black_box(cache.peek(&std::hint::black_box(i)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_eviction_churn(c: &mut Criterion) {
    c.bench_function("sampled_lru_eviction_churn", |b| {
        b.iter_batched(
            || warmed(1024),
            |mut cache| {
                // Every insert lands in a full cache and runs the probe.
                for i in 0..4096u64 {
                    cache.add(std::hint::black_box(10_000 + i), i);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_resize_cycle(c: &mut Criterion) {
    c.bench_function("sampled_lru_resize_cycle", |b| {
        b.iter_batched(
            || warmed(4096),
            |mut cache| {
                let _ = std::hint::black_box(cache.resize(1024));
                let _ = std::hint::black_box(cache.resize(4096));
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_add_get,
    bench_get_hit,
    bench_peek_hit,
    bench_eviction_churn,
    bench_resize_cycle
);
criterion_main!(benches);
