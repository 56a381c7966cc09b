// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;
use std::slice;

use archery::{SharedPointer, SharedPointerKind};

/// A singly linked list of entries sharing one bucket.
pub(crate) type Chain<K, V, P> = Option<Box<Entry<K, V, P>>>;

pub(crate) fn hash_key<K: Hash + ?Sized, S: BuildHasher>(bh: &S, key: &K) -> u64 {
    bh.hash_one(key)
}

/// The bucket a key hashing to `hash` lives in, out of `buckets`.
#[inline]
pub(crate) fn bucket_index(hash: u64, buckets: usize) -> usize {
    (hash % buckets as u64) as usize
}

pub(crate) struct Entry<K, V, P: SharedPointerKind> {
    pub(crate) key: K,
    pub(crate) value: SharedPointer<V, P>,
    next: Chain<K, V, P>,
}

impl<K, V, P: SharedPointerKind> Entry<K, V, P> {
    pub(crate) fn new(key: K, value: SharedPointer<V, P>) -> Box<Self> {
        Box::new(Entry {
            key,
            value,
            next: None,
        })
    }

    pub(crate) fn into_pair(self) -> (K, SharedPointer<V, P>) {
        (self.key, self.value)
    }
}

/// Links `entry` in at the head of the chain.
#[inline]
pub(crate) fn push_front<K, V, P: SharedPointerKind>(chain: &mut Chain<K, V, P>, mut entry: Box<Entry<K, V, P>>) {
    entry.next = chain.take();
    *chain = Some(entry);
}

/// Unlinks the head of the chain.
#[inline]
pub(crate) fn pop_front<K, V, P: SharedPointerKind>(chain: &mut Chain<K, V, P>) -> Option<Box<Entry<K, V, P>>> {
    let mut entry = chain.take()?;
    *chain = entry.next.take();
    Some(entry)
}

pub(crate) fn lookup<'a, K, V, P, BK>(chain: &'a Chain<K, V, P>, key: &BK) -> Option<&'a Entry<K, V, P>>
where
    BK: Eq + ?Sized,
    K: Borrow<BK>,
    P: SharedPointerKind,
{
    entries(chain).find(|entry| entry.key.borrow() == key)
}

/// Unlinks the entry for `key`, if the chain has one.
pub(crate) fn unlink<K, V, P, BK>(chain: &mut Chain<K, V, P>, key: &BK) -> Option<Box<Entry<K, V, P>>>
where
    BK: Eq + ?Sized,
    K: Borrow<BK>,
    P: SharedPointerKind,
{
    let mut cursor = chain;
    while cursor.as_ref().is_some_and(|entry| entry.key.borrow() != key) {
        cursor = &mut cursor.as_mut()?.next;
    }
    pop_front(cursor)
}

/// Drops a chain one entry at a time, so that a long chain can't overflow
/// the stack with nested `Box` drops.
pub(crate) fn clear<K, V, P: SharedPointerKind>(chain: &mut Chain<K, V, P>) {
    while pop_front(chain).is_some() {}
}

/// Moves every entry out of `buckets` into a new bucket array of length
/// `len`, re-chaining each by its hash. Entries are relinked, not copied.
pub(crate) fn rehash<K, V, P, S>(buckets: &mut Vec<Chain<K, V, P>>, len: usize, hasher: &S)
where
    K: Hash,
    P: SharedPointerKind,
    S: BuildHasher,
{
    let mut resized: Vec<Chain<K, V, P>> = Vec::with_capacity(len);
    resized.resize_with(len, || None);
    for chain in buckets.iter_mut() {
        while let Some(entry) = pop_front(chain) {
            let index = bucket_index(hash_key(hasher, &entry.key), len);
            push_front(&mut resized[index], entry);
        }
    }
    *buckets = resized;
}

/// Copies a bucket array entry by entry. Value handles are shared with
/// the source, the entries themselves are not.
pub(crate) fn deep_copy<K, V, P>(buckets: &[Chain<K, V, P>]) -> Vec<Chain<K, V, P>>
where
    K: Clone,
    P: SharedPointerKind,
{
    buckets
        .iter()
        .map(|chain| {
            let mut copy = None;
            for entry in entries(chain) {
                push_front(&mut copy, Entry::new(entry.key.clone(), entry.value.clone()));
            }
            copy
        })
        .collect()
}

/// Walks the entries of a single chain, head first.
pub(crate) fn entries<K, V, P: SharedPointerKind>(chain: &Chain<K, V, P>) -> Entries<'_, K, V, P> {
    Entries {
        cursor: chain.as_deref(),
    }
}

/// An iterator over one chain. Chains don't track their length.
pub(crate) struct Entries<'a, K, V, P: SharedPointerKind> {
    cursor: Option<&'a Entry<K, V, P>>,
}

impl<'a, K, V, P: SharedPointerKind> Iterator for Entries<'a, K, V, P> {
    type Item = &'a Entry<K, V, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor?;
        self.cursor = entry.next.as_deref();
        Some(entry)
    }
}

impl<'a, K, V, P: SharedPointerKind> FusedIterator for Entries<'a, K, V, P> {}

/// An iterator over every entry of a bucket array.
pub(crate) struct Iter<'a, K, V, P: SharedPointerKind> {
    buckets: slice::Iter<'a, Chain<K, V, P>>,
    current: Option<&'a Entry<K, V, P>>,
    remaining: usize,
}

impl<'a, K, V, P: SharedPointerKind> Iter<'a, K, V, P> {
    pub(crate) fn new(buckets: &'a [Chain<K, V, P>], len: usize) -> Self {
        Iter {
            buckets: buckets.iter(),
            current: None,
            remaining: len,
        }
    }
}

impl<'a, K, V, P: SharedPointerKind> Iterator for Iter<'a, K, V, P> {
    type Item = &'a Entry<K, V, P>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current {
                self.current = entry.next.as_deref();
                self.remaining -= 1;
                return Some(entry);
            }
            self.current = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, P: SharedPointerKind> FusedIterator for Iter<'a, K, V, P> {}

impl<'a, K, V, P: SharedPointerKind> Clone for Iter<'a, K, V, P> {
    fn clone(&self) -> Self {
        Iter {
            buckets: self.buckets.clone(),
            current: self.current,
            remaining: self.remaining,
        }
    }
}

/// A consuming iterator over every entry of a bucket array.
pub(crate) struct Drain<K, V, P: SharedPointerKind> {
    buckets: std::vec::IntoIter<Chain<K, V, P>>,
    current: Chain<K, V, P>,
    remaining: usize,
}

impl<K, V, P: SharedPointerKind> Drain<K, V, P> {
    pub(crate) fn new(buckets: Vec<Chain<K, V, P>>, len: usize) -> Self {
        Drain {
            buckets: buckets.into_iter(),
            current: None,
            remaining: len,
        }
    }
}

impl<K, V, P: SharedPointerKind> Iterator for Drain<K, V, P> {
    type Item = Box<Entry<K, V, P>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = pop_front(&mut self.current) {
                self.remaining -= 1;
                return Some(entry);
            }
            self.current = self.buckets.next()?;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, P: SharedPointerKind> Drop for Drain<K, V, P> {
    fn drop(&mut self) {
        clear(&mut self.current);
        for mut chain in self.buckets.by_ref() {
            clear(&mut chain);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared_ptr::DefaultSharedPtr;
    use std::hash::BuildHasherDefault;

    use crate::hash::index::IndexHasher;

    type TestChain = Chain<u32, &'static str, DefaultSharedPtr>;

    fn chain_of(keys: &[u32]) -> TestChain {
        let mut chain = None;
        for &k in keys {
            push_front(&mut chain, Entry::new(k, SharedPointer::new("v")));
        }
        chain
    }

    fn keys(chain: &TestChain) -> Vec<u32> {
        entries(chain).map(|e| e.key).collect()
    }

    #[test]
    fn push_front_prepends() {
        assert_eq!(vec![3, 2, 1], keys(&chain_of(&[1, 2, 3])));
    }

    #[test]
    fn unlink_head_middle_and_tail() {
        let mut chain = chain_of(&[1, 2, 3, 4]);
        assert_eq!(4, unlink(&mut chain, &4).unwrap().key);
        assert_eq!(2, unlink(&mut chain, &2).unwrap().key);
        assert_eq!(1, unlink(&mut chain, &1).unwrap().key);
        assert!(unlink(&mut chain, &9).is_none());
        assert_eq!(vec![3], keys(&chain));
    }

    #[test]
    fn chain_walk_reports_no_exact_length() {
        let chain = chain_of(&[1, 2, 3]);
        assert_eq!((0, None), entries(&chain).size_hint());
        assert_eq!(3, entries(&chain).count());
        let empty: TestChain = None;
        assert!(entries(&empty).next().is_none());
    }

    #[test]
    fn bucket_walk_counts_down_exactly() {
        let buckets = vec![chain_of(&[1, 2]), None, chain_of(&[3])];
        let mut it = Iter::new(&buckets, 3);
        assert_eq!((3, Some(3)), it.size_hint());
        it.next();
        assert_eq!((2, Some(2)), it.size_hint());
        assert_eq!(2, it.count());
    }

    #[test]
    fn lookup_finds_any_position() {
        let chain = chain_of(&[7, 8, 9]);
        for k in [7, 8, 9] {
            assert_eq!(k, lookup(&chain, &k).unwrap().key);
        }
        assert!(lookup(&chain, &10).is_none());
    }

    #[test]
    fn rehash_places_entries_by_modulus() {
        let hasher = BuildHasherDefault::<IndexHasher>::default();
        let mut buckets = vec![chain_of(&[0, 3, 6]), chain_of(&[1, 4]), None];
        rehash(&mut buckets, 9, &hasher);
        assert_eq!(9, buckets.len());
        for (i, chain) in buckets.iter().enumerate() {
            for k in keys(chain) {
                assert_eq!(i as u32, k % 9);
            }
        }
        assert_eq!(5, Iter::new(&buckets, 5).count());
    }

    #[test]
    fn deep_copy_shares_values_not_entries() {
        let buckets = vec![chain_of(&[1, 2])];
        let copy = deep_copy(&buckets);
        let (a, b) = (lookup(&buckets[0], &1).unwrap(), lookup(&copy[0], &1).unwrap());
        assert!(!std::ptr::eq(a, b));
        assert!(SharedPointer::ptr_eq(&a.value, &b.value));
    }

    #[test]
    fn long_chain_drops_without_recursion() {
        let mut chain: TestChain = None;
        for k in 0..200_000 {
            push_front(&mut chain, Entry::new(k, SharedPointer::new("v")));
        }
        clear(&mut chain);
        assert!(chain.is_none());
    }
}
