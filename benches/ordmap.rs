use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::hint::black_box;
use std::iter::FromIterator;
use std::sync::Arc;
use twinmap::ordmap::OrdMap;

mod utils;
use utils::*;

// Trait to abstract over different map implementations
trait BenchMap<K, V>: Clone + FromIterator<(K, V)>
where
    K: Clone + Ord,
    V: Clone,
{
    type Iter<'a>: Iterator<Item = (&'a K, &'a V)>
    where
        Self: 'a,
        K: 'a,
        V: 'a;

    fn new() -> Self;
    fn insert(&mut self, k: K, v: V);
    fn remove(&mut self, k: &K);
    fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized;
    fn iter(&self) -> Self::Iter<'_>;
    fn merge(left: &Self, right: &Self) -> Self;
}

impl<K, V> BenchMap<K, V> for OrdMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    type Iter<'a>
        = twinmap::ordmap::Iter<'a, K, V, twinmap::shared_ptr::DefaultSharedPtr>
    where
        K: 'a,
        V: 'a;

    fn new() -> Self {
        OrdMap::new()
    }

    fn insert(&mut self, k: K, v: V) {
        self.insert(k, v);
    }

    fn remove(&mut self, k: &K) {
        self.remove(k);
    }

    fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(k)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.iter()
    }

    fn merge(left: &Self, right: &Self) -> Self {
        OrdMap::merge(left, right)
    }
}

impl<K, V> BenchMap<K, V> for BTreeMap<K, V>
where
    K: Clone + Ord,
    V: Clone,
{
    type Iter<'a>
        = std::collections::btree_map::Iter<'a, K, V>
    where
        K: 'a,
        V: 'a;

    fn new() -> Self {
        BTreeMap::new()
    }

    fn insert(&mut self, k: K, v: V) {
        self.insert(k, v);
    }

    fn remove(&mut self, k: &K) {
        self.remove(k);
    }

    fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(k)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.iter()
    }

    fn merge(left: &Self, right: &Self) -> Self {
        let mut out = left.clone();
        out.extend(right.iter().map(|(k, v)| (k.clone(), v.clone())));
        out
    }
}

fn bench_lookup<M, K, V>(b: &mut Bencher, size: usize)
where
    M: BenchMap<K, V>,
    K: TestData,
    V: TestData,
{
    let keys = K::generate(size);
    let values = V::generate(size);
    let order = reorder(&keys);
    let m: M = keys.into_iter().zip(values).collect();
    b.iter(|| {
        for k in &order {
            black_box(m.get(k));
        }
    })
}

fn bench_lookup_ne<M, K, V>(b: &mut Bencher, size: usize)
where
    M: BenchMap<K, V>,
    K: TestData,
    V: TestData,
{
    let keys = K::generate(size * 2);
    let values = V::generate(size);
    let order = reorder(&keys[size..]);
    let m: M = keys.into_iter().zip(values).collect();
    b.iter(|| {
        for k in &order {
            black_box(m.get(k));
        }
    })
}

fn bench_insert<M, K, V>(b: &mut Bencher, size: usize)
where
    M: BenchMap<K, V>,
    K: TestData,
    V: TestData,
{
    let keys = reorder(&K::generate(size));
    let values = V::generate(size);
    b.iter(|| {
        let mut m = M::new();
        for (k, v) in keys.clone().into_iter().zip(values.clone()) {
            m.insert(k, v);
        }
        m
    })
}

fn bench_remove<M, K, V>(b: &mut Bencher, size: usize)
where
    M: BenchMap<K, V>,
    K: TestData,
    V: TestData,
{
    let keys = K::generate(size);
    let values = V::generate(size);
    let order = reorder(&keys);
    let map: M = keys.into_iter().zip(values).collect();
    b.iter(|| {
        let mut m = map.clone();
        for k in &order {
            m.remove(k);
        }
        m
    })
}

fn bench_iter<M, K, V>(b: &mut Bencher, size: usize)
where
    M: BenchMap<K, V>,
    K: TestData,
    V: TestData,
{
    let keys = K::generate(size);
    let values = V::generate(size);
    let m: M = keys.into_iter().zip(values).collect();
    b.iter(|| {
        for p in m.iter() {
            black_box(p);
        }
    })
}

fn merge_operands<M, K, V>(size: usize) -> (M, M)
where
    M: BenchMap<K, V>,
    K: TestData,
    V: TestData,
{
    let keys = reorder(&K::generate(size * 2));
    let values = V::generate(size * 2);
    let left: M = keys[..size]
        .iter()
        .cloned()
        .zip(values[..size].iter().cloned())
        .collect();
    let right: M = keys[size / 2..size + size / 2]
        .iter()
        .cloned()
        .zip(values[size..].iter().cloned())
        .collect();
    (left, right)
}

fn bench_merge<M, K, V>(b: &mut Bencher, size: usize)
where
    M: BenchMap<K, V>,
    K: TestData,
    V: TestData,
{
    let (left, right) = merge_operands::<M, K, V>(size);
    b.iter(|| M::merge(&left, &right))
}

// The same union as `merge`, built by inserting one key at a time.
fn bench_merge_by_insertion<K, V>(b: &mut Bencher, size: usize)
where
    K: TestData,
    V: TestData,
{
    let (left, right) = merge_operands::<OrdMap<K, V>, K, V>(size);
    b.iter(|| {
        let mut m = left.clone();
        for (k, v) in right.iter() {
            if m.contains_key(k) {
                m.remove(k);
            }
            m.insert(k.clone(), v.clone());
        }
        m
    })
}

fn bench_rebuild<K, V>(b: &mut Bencher, size: usize)
where
    K: TestData,
    V: TestData,
{
    let m: OrdMap<K, V> = K::generate(size).into_iter().zip(V::generate(size)).collect();
    b.iter(|| OrdMap::from_bridge(m.to_bridge()))
}

fn bench_ordmap(c: &mut Criterion) {
    bench_group::<OrdMap<i64, i64>, i64, i64>(c, "ordmap_i64");
    bench_group::<OrdMap<Arc<String>, Arc<String>>, Arc<String>, Arc<String>>(c, "ordmap_str");
}

fn bench_btreemap(c: &mut Criterion) {
    bench_group::<BTreeMap<i64, i64>, i64, i64>(c, "btreemap_i64");
    bench_group::<BTreeMap<Arc<String>, Arc<String>>, Arc<String>, Arc<String>>(
        c,
        "btreemap_str",
    );
}

fn bench_ordmap_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordmap_merge_i64");
    for size in &[1000, 10000, 100000] {
        group.bench_function(&format!("by_insertion_{}", size), |b| {
            bench_merge_by_insertion::<i64, i64>(b, *size)
        });
        group.bench_function(&format!("rebuild_{}", size), |b| {
            bench_rebuild::<i64, i64>(b, *size)
        });
    }
    group.finish();
}

// Helper function to run all benchmarks for a specific map/key/value type
fn bench_group<M, K, V>(c: &mut Criterion, group_name: &str)
where
    M: BenchMap<K, V>,
    K: TestData,
    V: TestData,
{
    let mut group = c.benchmark_group(group_name);

    for size in &[100, 1000, 10000, 100000] {
        group.bench_function(&format!("lookup_{}", size), |b| {
            bench_lookup::<M, K, V>(b, *size)
        });
    }

    for size in &[10000, 100000] {
        group.bench_function(&format!("lookup_ne_{}", size), |b| {
            bench_lookup_ne::<M, K, V>(b, *size)
        });
    }

    for size in &[100, 1000, 10000, 100000] {
        group.bench_function(&format!("insert_{}", size), |b| {
            bench_insert::<M, K, V>(b, *size)
        });
    }

    for size in &[100, 1000, 10000] {
        group.bench_function(&format!("remove_{}", size), |b| {
            bench_remove::<M, K, V>(b, *size)
        });
    }

    for size in &[1000, 10000] {
        group.bench_function(&format!("iter_{}", size), |b| {
            bench_iter::<M, K, V>(b, *size)
        });
    }

    for size in &[1000, 10000, 100000] {
        group.bench_function(&format!("merge_{}", size), |b| {
            bench_merge::<M, K, V>(b, *size)
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ordmap, bench_btreemap, bench_ordmap_merge);
criterion_main!(benches);
