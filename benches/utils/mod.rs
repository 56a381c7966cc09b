#![allow(dead_code)]
use rand::seq::SliceRandom;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

const SEED: u64 = 1;

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(SEED)
}

/// Keys and values for the benchmarks: `generate(size)` yields `size`
/// distinct items in ascending order, the same ones on every run.
pub trait TestData: Clone + Debug + Ord + Eq + Hash {
    fn generate(size: usize) -> Vec<Self>;
}

fn distinct<A: Ord>(size: usize, mut next: impl FnMut(&mut SmallRng) -> A) -> Vec<A> {
    let mut gen = rng();
    let mut set = BTreeSet::new();
    while set.len() < size {
        set.insert(next(&mut gen));
    }
    set.into_iter().collect()
}

impl TestData for i64 {
    fn generate(size: usize) -> Vec<Self> {
        distinct(size, |gen| gen.random::<i64>())
    }
}

impl TestData for String {
    fn generate(size: usize) -> Vec<Self> {
        distinct(size, |gen| {
            let len = gen.random_range(5..20);
            (0..len)
                .map(|_| gen.random_range(b'a'..=b'z') as char)
                .collect()
        })
    }
}

impl<T> TestData for Arc<T>
where
    T: TestData + 'static,
{
    fn generate(size: usize) -> Vec<Self> {
        T::generate(size).into_iter().map(Arc::new).collect()
    }
}

/// A shuffled copy of `items`, in the same order on every run.
pub fn reorder<A: Clone>(items: &[A]) -> Vec<A> {
    let mut out = items.to_vec();
    out.shuffle(&mut rng());
    out
}
