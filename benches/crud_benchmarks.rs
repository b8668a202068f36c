use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rank_collections::{BlockDeque, TreapMap};
use std::collections::{BTreeMap, VecDeque};

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Deque Benchmarks ───────────────────────────────────────────────────────

fn bench_deque_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque_push_back");

    group.bench_function(BenchmarkId::new("BlockDeque", N), |b| {
        b.iter(|| {
            let mut deque = BlockDeque::new();
            for i in 0..N as i64 {
                deque.push_back(i);
            }
            deque
        });
    });

    group.bench_function(BenchmarkId::new("VecDeque", N), |b| {
        b.iter(|| {
            let mut deque = VecDeque::new();
            for i in 0..N as i64 {
                deque.push_back(i);
            }
            deque
        });
    });

    group.finish();
}

fn bench_deque_insert_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque_insert_middle");

    group.bench_function(BenchmarkId::new("BlockDeque", N), |b| {
        b.iter(|| {
            let mut deque = BlockDeque::new();
            for i in 0..N as i64 {
                let _ = deque.insert_at(deque.len() / 2, i);
            }
            deque
        });
    });

    group.bench_function(BenchmarkId::new("VecDeque", N), |b| {
        b.iter(|| {
            let mut deque = VecDeque::new();
            for i in 0..N as i64 {
                deque.insert(deque.len() / 2, i);
            }
            deque
        });
    });

    group.finish();
}

fn bench_deque_get_random(c: &mut Criterion) {
    let indices: Vec<usize> = random_keys(N).into_iter().map(|k| k as usize % N).collect();
    let block_deque: BlockDeque<i64> = ordered_keys(N).into_iter().collect();
    let vec_deque: VecDeque<i64> = ordered_keys(N).into_iter().collect();

    let mut group = c.benchmark_group("deque_get_random");

    group.bench_function(BenchmarkId::new("BlockDeque", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &i in &indices {
                if let Some(&v) = block_deque.get(i) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("VecDeque", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &i in &indices {
                if let Some(&v) = vec_deque.get(i) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_deque_remove_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("deque_remove_middle");

    group.bench_function(BenchmarkId::new("BlockDeque", N), |b| {
        b.iter_batched(
            || ordered_keys(N).into_iter().collect::<BlockDeque<_>>(),
            |mut deque| {
                while !deque.is_empty() {
                    let _ = deque.remove_at(deque.len() / 2);
                }
                deque
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("VecDeque", N), |b| {
        b.iter_batched(
            || ordered_keys(N).into_iter().collect::<VecDeque<_>>(),
            |mut deque| {
                while !deque.is_empty() {
                    deque.remove(deque.len() / 2);
                }
                deque
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("map_insert_random");

    group.bench_function(BenchmarkId::new("TreapMap", N), |b| {
        b.iter(|| {
            let mut map = TreapMap::with_seed(1);
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in &keys {
                map.entry(k).or_insert(k);
            }
            map
        });
    });

    group.finish();
}

fn bench_map_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let treap_map: TreapMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_get_random");

    group.bench_function(BenchmarkId::new("TreapMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = treap_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = bt_map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_map_get_by_rank(c: &mut Criterion) {
    let treap_map: TreapMap<i64, i64> = ordered_keys(N).into_iter().map(|k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = ordered_keys(N).into_iter().map(|k| (k, k)).collect();
    let ranks: Vec<usize> = random_keys(N / 10).into_iter().map(|k| k as usize % N).collect();

    let mut group = c.benchmark_group("map_get_by_rank");

    group.bench_function(BenchmarkId::new("TreapMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &r in &ranks {
                if let Some((_, &v)) = treap_map.get_by_rank(r) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &r in &ranks {
                if let Some((_, &v)) = bt_map.iter().nth(r) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_map_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("map_remove_random");

    group.bench_function(BenchmarkId::new("TreapMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<TreapMap<_, _>>(),
            |mut map| {
                for &k in &keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<_, _>>(),
            |mut map| {
                for &k in &keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(
    deque_benches,
    bench_deque_push_back,
    bench_deque_insert_middle,
    bench_deque_get_random,
    bench_deque_remove_middle,
);

criterion_group!(
    map_benches,
    bench_map_insert_random,
    bench_map_get_random,
    bench_map_get_by_rank,
    bench_map_remove_random,
);

criterion_main!(deque_benches, map_benches);
