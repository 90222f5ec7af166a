use std::hint::black_box;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
type RandomState = hashbrown::DefaultHashBuilder;
type OdictMap<K, V> = odict::ordered_map::OrderedMap<K, V, odict::HashStore<K, V, RandomState>>;
type OdictTreeMap<K, V> = odict::OrderedTreeMap<K, V>;

type HashLinkedMap<K, V> = hashlink::LinkedHashMap<K, V, RandomState>;
type IndexMap<K, V> = indexmap::IndexMap<K, V, RandomState>;

const SIZES: &[usize] = &[10000];

fn filled_odict(size: usize) -> OdictMap<usize, usize> {
    let mut map = OdictMap::with_capacity_and_hasher(size, RandomState::default());
    for i in 0..size {
        map.insert(i, i * 2);
    }
    map
}

fn filled_indexmap(size: usize) -> IndexMap<usize, usize> {
    let mut map = IndexMap::with_capacity_and_hasher(size, RandomState::default());
    for i in 0..size {
        map.insert(i, i * 2);
    }
    map
}

fn filled_hashlinked(size: usize) -> HashLinkedMap<usize, usize> {
    let mut map = HashLinkedMap::default();
    for i in 0..size {
        map.insert(i, i * 2);
    }
    map
}

fn bench_insertion_at_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertion_at_end");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("odict", size), &size, |b, &size| {
            b.iter(|| {
                let mut map: OdictMap<usize, usize> = OdictMap::default();
                for i in 0..size {
                    map.insert(black_box(i), black_box(i * 2));
                }
                map
            })
        });

        group.bench_with_input(
            BenchmarkId::new("odict_preallocated", size),
            &size,
            |b, &size| {
                b.iter(|| {
                    let mut map: OdictMap<usize, usize> =
                        OdictMap::with_capacity_and_hasher(size, RandomState::default());
                    for i in 0..size {
                        map.insert(black_box(i), black_box(i * 2));
                    }
                    map
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("odict_tree", size), &size, |b, &size| {
            b.iter(|| {
                let mut map: OdictTreeMap<usize, usize> = OdictTreeMap::new();
                for i in 0..size {
                    map.insert(black_box(i), black_box(i * 2));
                }
                map
            })
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = IndexMap::default();
                for i in 0..size {
                    map.insert(black_box(i), black_box(i * 2));
                }
                map
            })
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = HashLinkedMap::default();
                for i in 0..size {
                    map.insert(black_box(i), black_box(i * 2));
                }
                map
            })
        });
    }

    group.finish();
}

fn bench_pop_from_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("pop_from_end");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("odict", size), &size, |b, &size| {
            b.iter_batched(
                || filled_odict(size),
                |mut map| {
                    let mut count = 0;
                    while map.pop_last().is_ok() {
                        count += 1;
                    }
                    count
                },
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            b.iter_batched(
                || filled_indexmap(size),
                |mut map| {
                    let mut count = 0;
                    while map.pop().is_some() {
                        count += 1;
                    }
                    count
                },
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            b.iter_batched(
                || filled_hashlinked(size),
                |mut map| {
                    let mut count = 0;
                    while map.pop_back().is_some() {
                        count += 1;
                    }
                    count
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_remove_from_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_from_middle");

    for &size in SIZES {
        let mut next_down = size / 2;
        let mut next_up = size / 2 + 1;
        let mut middle_keys = Vec::with_capacity(size);
        for _ in 0..size / 2 {
            middle_keys.push(next_down);
            middle_keys.push(next_up);
            next_down = next_down.saturating_sub(1);
            if next_up < size - 1 {
                next_up += 1;
            }
        }

        group.throughput(criterion::Throughput::Elements(middle_keys.len() as u64));

        group.bench_with_input(BenchmarkId::new("odict", size), &size, |b, &size| {
            b.iter_batched(
                || filled_odict(size),
                |mut map| {
                    for &key in &middle_keys {
                        map.remove(&black_box(key));
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(
            BenchmarkId::new("indexmap_shift_remove", size),
            &size,
            |b, &size| {
                b.iter_batched(
                    || filled_indexmap(size),
                    |mut map| {
                        for &key in &middle_keys {
                            map.shift_remove(&black_box(key));
                        }
                        map
                    },
                    criterion::BatchSize::SmallInput,
                )
            },
        );

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            b.iter_batched(
                || filled_hashlinked(size),
                |mut map| {
                    for &key in &middle_keys {
                        map.remove(&black_box(key));
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_insert_in_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_in_middle");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("odict", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut map = OdictMap::default();
                    for i in 0..size {
                        map.insert(i * 2, (i * 2) * 2);
                    }
                    map
                },
                |mut map| {
                    for i in 0..size {
                        let key = i * 2 + 1;
                        let _ = map.insert_after(&(i * 2), black_box(key), black_box(key * 2));
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut map = IndexMap::default();
                    for i in 0..size {
                        map.insert(i * 2, (i * 2) * 2);
                    }
                    map
                },
                |mut map| {
                    for i in 0..size {
                        let key = i * 2 + 1;
                        let index = if i < map.len() { 2 * i + 1 } else { map.len() };
                        map.shift_insert(black_box(index), black_box(key), black_box(key * 2));
                    }
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_move_to_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_to_front");

    for &size in SIZES {
        let keys: Vec<usize> = (0..100).map(|_| rand::random_range(0..size)).collect();

        group.throughput(criterion::Throughput::Elements(keys.len() as u64));

        group.bench_with_input(BenchmarkId::new("odict", size), &size, |b, &size| {
            let mut map = filled_odict(size);
            b.iter(|| {
                for key in &keys {
                    let _ = map.move_first(black_box(key));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            let mut map = filled_indexmap(size);
            b.iter(|| {
                for key in &keys {
                    if let Some(index) = map.get_index_of(black_box(key)) {
                        map.move_index(index, 0);
                    }
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            let mut map = filled_hashlinked(size);
            b.iter(|| {
                for key in &keys {
                    map.to_front(black_box(key));
                }
            })
        });
    }

    group.finish();
}

fn bench_swap(c: &mut Criterion) {
    let mut group = c.benchmark_group("swap");

    for &size in SIZES {
        let pairs: Vec<(usize, usize)> = (0..100)
            .map(|_| (rand::random_range(0..size), rand::random_range(0..size)))
            .collect();

        group.throughput(criterion::Throughput::Elements(pairs.len() as u64));

        group.bench_with_input(BenchmarkId::new("odict", size), &size, |b, &size| {
            let mut map = filled_odict(size);
            b.iter(|| {
                for (a, b) in &pairs {
                    let _ = map.swap(black_box(a), black_box(b));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            let mut map = filled_indexmap(size);
            b.iter(|| {
                for (a, b) in &pairs {
                    let a = map.get_index_of(black_box(a));
                    let b = map.get_index_of(black_box(b));
                    if let (Some(a), Some(b)) = (a, b) {
                        map.swap_indices(a, b);
                    }
                }
            })
        });
    }

    group.finish();
}

fn bench_sort_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_values");

    for &size in SIZES {
        let values: Vec<usize> = (0..size).map(|_| rand::random_range(0..size)).collect();

        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("odict", size), &size, |b, _| {
            b.iter_batched(
                || values.iter().copied().enumerate().collect::<OdictMap<_, _>>(),
                |mut map| {
                    map.sort_values();
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, _| {
            b.iter_batched(
                || values.iter().copied().enumerate().collect::<IndexMap<_, _>>(),
                |mut map| {
                    map.sort_by(|_, a, _, b| a.cmp(b));
                    map
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_iteration_full(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration_full");

    for &size in SIZES {
        group.throughput(criterion::Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("odict", size), &size, |b, &size| {
            let map = filled_odict(size);

            b.iter(|| {
                let mut sum = 0;
                for (key, value) in map.iter() {
                    sum += black_box(*key) + black_box(*value);
                }
                sum
            })
        });

        group.bench_with_input(BenchmarkId::new("odict_reverse", size), &size, |b, &size| {
            let map = filled_odict(size);

            b.iter(|| {
                let mut sum = 0;
                for (key, value) in map.iter().rev() {
                    sum += black_box(*key) + black_box(*value);
                }
                sum
            })
        });

        group.bench_with_input(BenchmarkId::new("indexmap", size), &size, |b, &size| {
            let map = filled_indexmap(size);

            b.iter(|| {
                let mut sum = 0;
                for (key, value) in map.iter() {
                    sum += black_box(*key) + black_box(*value);
                }
                sum
            })
        });

        group.bench_with_input(BenchmarkId::new("hashlinked", size), &size, |b, &size| {
            let map = filled_hashlinked(size);

            b.iter(|| {
                let mut sum = 0;
                for (key, value) in map.iter() {
                    sum += black_box(*key) + black_box(*value);
                }
                sum
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insertion_at_end,
    bench_pop_from_end,
    bench_remove_from_middle,
    bench_insert_in_middle,
    bench_move_to_front,
    bench_swap,
    bench_sort_values,
    bench_iteration_full,
);
criterion_main!(benches);
