use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;
use xcollections::ChainedHashMap;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64, n: usize) -> (ChainedHashMap<String, u64>, Vec<String>) {
    let mut m = ChainedHashMap::new();
    let keys: Vec<String> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        m.insert(k.clone(), i as u64);
    }
    (m, keys)
}

// 10k keys drawn from `keys` by a second LCG.
fn sample(keys: &[String]) -> Vec<String> {
    let n = keys.len();
    let mut s = 0x9e3779b97f4a7c15u64;
    (0..10_000)
        .map(|_| {
            s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
            keys[(s as usize) % n].clone()
        })
        .collect()
}

fn bench_insert_fresh_100k(c: &mut Criterion) {
    c.bench_function("chained::insert_fresh_100k", |b| {
        b.iter_batched(
            ChainedHashMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(100_000).enumerate() {
                    m.insert(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert_presized_100k(c: &mut Criterion) {
    c.bench_function("chained::insert_presized_100k", |b| {
        b.iter_batched(
            || ChainedHashMap::<String, u64>::with_capacity(100_000),
            |mut m| {
                for (i, x) in lcg(3).take(100_000).enumerate() {
                    m.insert(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit_10k(c: &mut Criterion) {
    c.bench_function("chained::get_hit_10k_on_100k", |b| {
        let (mut m, keys) = filled(7, 100_000);
        let queries = sample(&keys);
        b.iter(|| {
            for k in &queries {
                black_box(m.get(k));
            }
        })
    });
}

fn bench_peek_miss_10k(c: &mut Criterion) {
    c.bench_function("chained::peek_miss_10k_on_100k", |b| {
        let (m, _) = filled(11, 100_000);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            for x in miss.by_ref().take(10_000) {
                black_box(m.peek(&key(x)));
            }
        })
    });
}

fn bench_remove_eager_vs_lazy(c: &mut Criterion) {
    c.bench_function("chained::remove_10k_of_100k", |b| {
        b.iter_batched(
            || {
                let (m, keys) = filled(5, 100_000);
                (m, sample(&keys))
            },
            |(mut m, doomed)| {
                for k in &doomed {
                    black_box(m.remove(k));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
    c.bench_function("chained::remove_lazy_10k_of_100k_then_get", |b| {
        b.iter_batched(
            || {
                let (m, keys) = filled(5, 100_000);
                (m, sample(&keys))
            },
            |(mut m, doomed)| {
                for k in &doomed {
                    black_box(m.remove_lazy(k));
                }
                // Lookups on the same buckets detach the hollow heads.
                for k in &doomed {
                    black_box(m.get(k));
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_iter_and_add_values(c: &mut Criterion) {
    c.bench_function("chained::iter_all_100k", |b| {
        let (m, _) = filled(13, 100_000);
        b.iter(|| {
            let mut acc = 0u64;
            for (_, v) in m.iter() {
                acc = acc.wrapping_add(*v);
            }
            black_box(acc)
        })
    });
    c.bench_function("chained::add_values_100k", |b| {
        let (m, _) = filled(13, 100_000);
        b.iter(|| {
            let mut out = Vec::with_capacity(100_000);
            black_box(m.add_values(&mut out));
            black_box(out)
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_insert;
    config = bench_config();
    targets = bench_insert_fresh_100k, bench_insert_presized_100k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_get_hit_10k,
              bench_peek_miss_10k,
              bench_remove_eager_vs_lazy,
              bench_iter_and_add_values
}
criterion_main!(benches_insert, benches_ops);
