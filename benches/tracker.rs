use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use freqtrack::tracker::FrequencyTracker;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const KEYS: u64 = 4096;

fn seeded(keys: u64, rounds: u64) -> FrequencyTracker<u64> {
    let mut tracker = FrequencyTracker::with_capacity(keys as usize);
    for round in 0..rounds {
        for key in 0..keys {
            if key % (round + 1) == 0 {
                tracker.increment(key);
            }
        }
    }
    tracker
}

fn bench_increment(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker_increment");
    group.throughput(Throughput::Elements(KEYS));
    group.bench_function("new_keys", |b| {
        b.iter_batched(
            || FrequencyTracker::with_capacity(KEYS as usize),
            |mut tracker| {
                for key in 0..KEYS {
                    std::hint::black_box(tracker.increment(std::hint::black_box(key)));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("hot_key", |b| {
        b.iter_batched(
            || seeded(KEYS, 4),
            |mut tracker| {
                for _ in 0..KEYS {
                    std::hint::black_box(tracker.increment(std::hint::black_box(0)));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_decrement(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker_decrement");
    group.throughput(Throughput::Elements(KEYS));
    group.bench_function("to_zero", |b| {
        b.iter_batched(
            || seeded(KEYS, 1),
            |mut tracker| {
                for key in 0..KEYS {
                    std::hint::black_box(tracker.decrement(&std::hint::black_box(key)));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function("untracked", |b| {
        b.iter_batched(
            || seeded(KEYS, 1),
            |mut tracker| {
                for key in KEYS..KEYS * 2 {
                    std::hint::black_box(tracker.decrement(&std::hint::black_box(key)));
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_extremes(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker_extremes");
    let tracker = seeded(KEYS, 16);
    group.bench_function("max_key", |b| {
        b.iter(|| std::hint::black_box(tracker.max_key()))
    });
    group.bench_function("min_key", |b| {
        b.iter(|| std::hint::black_box(tracker.min_key()))
    });
    group.finish();
}

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("tracker_mixed");
    let ops = 8192u64;
    group.throughput(Throughput::Elements(ops));
    group.bench_function("inc_dec_query", |b| {
        b.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(42);
                let script: Vec<(u8, u64)> = (0..ops)
                    .map(|_| (rng.random_range(0..10), rng.random_range(0..KEYS)))
                    .collect();
                (seeded(KEYS, 2), script)
            },
            |(mut tracker, script)| {
                for (op, key) in script {
                    match op {
                        0..=4 => {
                            tracker.increment(key);
                        },
                        5..=7 => {
                            tracker.decrement(&key);
                        },
                        _ => {
                            std::hint::black_box(tracker.max_key());
                            std::hint::black_box(tracker.min_key());
                        },
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_increment,
    bench_decrement,
    bench_extremes,
    bench_mixed
);
criterion_main!(benches);
