// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An unordered map.
//!
//! A hash map using [separate chaining][1].
//!
//! Every key lives in the chain of the bucket its hash selects, modulo the
//! number of buckets. The bucket array starts with three buckets, grows
//! threefold as soon as the map holds as many entries as it has buckets,
//! and shrinks to a third once the load drops to one ninth or below, so
//! chains stay short on average and resizes are amortised O(1).
//!
//! Unless otherwise specified the map uses
//! [`BuildIndexHasher`][crate::hash::index::BuildIndexHasher], under which
//! a non-negative integer key `k` lives in bucket `k mod m`. Any
//! [`BuildHasher`][std::hash::BuildHasher] can be used instead.
//!
//! [1]: https://en.wikipedia.org/wiki/Hash_table#Separate_chaining
//! [std::hash::BuildHasher]: https://doc.rust-lang.org/std/hash/trait.BuildHasher.html

use std::borrow::Borrow;
use std::collections;
use std::fmt::{Debug, Error, Formatter};
use std::hash::{BuildHasher, Hash};
use std::iter::{FromIterator, FusedIterator};
use std::mem;
use std::ops::{Add, Index};

use archery::{SharedPointer, SharedPointerKind};

use crate::config::{INITIAL_BUCKETS, RESIZE_FACTOR, SHRINK_LOAD};
use crate::hash::index::BuildIndexHasher;
use crate::nodes::chain::{
    self, bucket_index, hash_key, Chain, Drain as ChainDrain, Entry, Iter as ChainIter,
};
use crate::shared_ptr::DefaultSharedPtr;

/// Construct a hash map from a sequence of key/value pairs.
///
/// If a key appears more than once, the first value is kept.
///
/// # Examples
///
/// ```
/// # #[macro_use] extern crate twinmap;
/// # use twinmap::HashMap;
/// # fn main() {
/// assert_eq!(
///   hashmap!{
///     1 => 11,
///     2 => 22,
///     3 => 33
///   },
///   HashMap::from(vec![(1, 11), (2, 22), (3, 33)])
/// );
/// # }
/// ```
#[macro_export]
macro_rules! hashmap {
    () => { $crate::hashmap::HashMap::new() };

    ( $( $key:expr => $value:expr ),* ) => {{
        let mut map = $crate::hashmap::HashMap::new();
        $({
            map.insert($key, $value);
        })*;
        map
    }};

    ( $( $key:expr => $value:expr ,)* ) => {{
        let mut map = $crate::hashmap::HashMap::new();
        $({
            map.insert($key, $value);
        })*;
        map
    }};
}

/// Type alias for [`GenericHashMap`] that uses [`BuildIndexHasher`] as the default hasher and [`DefaultSharedPtr`] as the pointer type.
///
/// [GenericHashMap]: ./struct.GenericHashMap.html
/// [BuildIndexHasher]: ../hash/index/type.BuildIndexHasher.html
/// [DefaultSharedPtr]: ../shared_ptr/type.DefaultSharedPtr.html
pub type HashMap<K, V> = GenericHashMap<K, V, BuildIndexHasher, DefaultSharedPtr>;

/// An unordered map.
///
/// A hash map using separate chaining over a bucket array that grows and
/// shrinks by a factor of three.
///
/// Every value is held behind a [`SharedPointer`], so a caller can keep a
/// handle to a value after inserting it. The chains belong to the map
/// alone: cloning a map copies every entry into a new bucket array, and
/// only the value handles are shared between the two.
///
/// Inserting a key which is already present, or removing one which isn't,
/// leaves the map unchanged.
///
/// Dropping the map unlinks each chain one entry at a time, so that a
/// hasher which sends every key to the same bucket can't overflow the
/// stack. Because the map implements [`Drop`], borrowed keys must outlive
/// the map itself, and so must be declared before it:
///
/// ```compile_fail
/// # use twinmap::HashMap;
/// let mut map = HashMap::new();
/// let key = String::from("x");
/// map.insert(&key[..], 1);
/// ```
///
/// ```
/// # use twinmap::HashMap;
/// let key = String::from("x");
/// let mut map = HashMap::new();
/// map.insert(&key[..], 1);
/// ```
pub struct GenericHashMap<K, V, S, P: SharedPointerKind> {
    size: usize,
    buckets: Vec<Chain<K, V, P>>,
    hasher: S,
}

fn empty_buckets<K, V, P: SharedPointerKind>(len: usize) -> Vec<Chain<K, V, P>> {
    let mut buckets = Vec::with_capacity(len);
    buckets.resize_with(len, || None);
    buckets
}

impl<K, V, P> GenericHashMap<K, V, BuildIndexHasher, P>
where
    K: Hash + Eq,
    P: SharedPointerKind,
{
    /// Construct a hash map with a single mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::HashMap;
    /// let map = HashMap::unit(123, "onetwothree");
    /// assert_eq!(
    ///   map.get(&123),
    ///   Some(&"onetwothree")
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn unit(k: K, v: V) -> Self {
        let mut map = Self::new();
        map.insert(k, v);
        map
    }
}

impl<K, V, S, P: SharedPointerKind> GenericHashMap<K, V, S, P> {
    /// Construct an empty hash map.
    #[inline]
    #[must_use]
    pub fn new() -> Self
    where
        S: Default,
    {
        Self::default()
    }

    /// Construct an empty hash map using the provided hasher.
    #[inline]
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        GenericHashMap {
            size: 0,
            buckets: empty_buckets(INITIAL_BUCKETS),
            hasher,
        }
    }

    /// Test whether a hash map is empty.
    ///
    /// Time: O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::HashMap;
    /// assert!(
    ///   !hashmap!{1 => 2}.is_empty()
    /// );
    /// assert!(
    ///   HashMap::<i32, i32>::new().is_empty()
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the size of a hash map.
    ///
    /// Time: O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::HashMap;
    /// assert_eq!(3, hashmap!{
    ///   1 => 11,
    ///   2 => 22,
    ///   3 => 33
    /// }.len());
    /// ```
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Get the number of buckets currently allocated.
    ///
    /// This is always a power of three, and always greater than `len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::HashMap;
    /// let mut map = HashMap::new();
    /// map.insert(0, "a");
    /// map.insert(1, "b");
    /// assert_eq!(3, map.bucket_count());
    /// map.insert(2, "c");
    /// assert_eq!(9, map.bucket_count());
    /// ```
    #[inline]
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Get a reference to the map's [`BuildHasher`][BuildHasher].
    ///
    /// [BuildHasher]: https://doc.rust-lang.org/std/hash/trait.BuildHasher.html
    #[must_use]
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Discard all elements from the map, and return to the initial
    /// bucket count.
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain::clear(chain);
        }
        self.buckets = empty_buckets(INITIAL_BUCKETS);
        self.size = 0;
    }

    /// Get an iterator over the key/value pairs of a hash map.
    ///
    /// Please note that the order is consistent between maps using
    /// the same hasher and bucket count, but no other ordering guarantee
    /// is offered.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, P> {
        Iter {
            it: ChainIter::new(&self.buckets, self.size),
        }
    }

    /// Get an iterator over a hash map's keys.
    #[inline]
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, P> {
        Keys {
            it: ChainIter::new(&self.buckets, self.size),
        }
    }

    /// Get an iterator over a hash map's values.
    #[inline]
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, P> {
        Values {
            it: ChainIter::new(&self.buckets, self.size),
        }
    }
}

impl<K, V, S, P> GenericHashMap<K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher,
    P: SharedPointerKind,
{
    fn chain_for<BK>(&self, key: &BK) -> &Chain<K, V, P>
    where
        BK: Hash + ?Sized,
    {
        let index = bucket_index(hash_key(&self.hasher, key), self.buckets.len());
        &self.buckets[index]
    }

    fn chain_for_mut<BK>(&mut self, key: &BK) -> &mut Chain<K, V, P>
    where
        BK: Hash + ?Sized,
    {
        let index = bucket_index(hash_key(&self.hasher, key), self.buckets.len());
        &mut self.buckets[index]
    }

    fn resize(&mut self, len: usize) {
        tracing::trace!(
            from = self.buckets.len(),
            to = len,
            size = self.size,
            "resizing hash map"
        );
        chain::rehash(&mut self.buckets, len, &self.hasher);
    }

    /// Get the value for a key from a hash map.
    ///
    /// Time: O(1)*
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::HashMap;
    /// let map = hashmap!{123 => "lol"};
    /// assert_eq!(
    ///   map.get(&123),
    ///   Some(&"lol")
    /// );
    /// ```
    #[must_use]
    pub fn get<BK>(&self, key: &BK) -> Option<&V>
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        chain::lookup(self.chain_for(key), key).map(|entry| &*entry.value)
    }

    /// Get a shared handle to the value for a key.
    ///
    /// The handle stays valid after the key is removed from the map.
    ///
    /// Time: O(1)*
    #[must_use]
    pub fn get_shared<BK>(&self, key: &BK) -> Option<SharedPointer<V, P>>
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        chain::lookup(self.chain_for(key), key).map(|entry| entry.value.clone())
    }

    /// Get the key/value pair for a key from a hash map.
    ///
    /// Time: O(1)*
    #[must_use]
    pub fn get_key_value<BK>(&self, key: &BK) -> Option<(&K, &V)>
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        chain::lookup(self.chain_for(key), key).map(|entry| (&entry.key, &*entry.value))
    }

    /// Test for the presence of a key in a hash map.
    ///
    /// Time: O(1)*
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::HashMap;
    /// let map = hashmap!{123 => "lol"};
    /// assert!(
    ///   map.contains_key(&123)
    /// );
    /// assert!(
    ///   !map.contains_key(&321)
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn contains_key<BK>(&self, k: &BK) -> bool
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        self.get(k).is_some()
    }

    /// Insert a key/value mapping into a map.
    ///
    /// If the map already has a mapping for the given key, nothing
    /// changes and the new value is dropped. Returns `true` if the
    /// mapping was added.
    ///
    /// Time: O(1)*
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::HashMap;
    /// let mut map = hashmap!{};
    /// assert!(map.insert(123, "123"));
    /// assert!(map.insert(456, "456"));
    /// assert!(!map.insert(123, "789"));
    /// assert_eq!(
    ///   map,
    ///   hashmap!{123 => "123", 456 => "456"}
    /// );
    /// ```
    #[inline]
    pub fn insert(&mut self, k: K, v: V) -> bool {
        self.insert_shared(k, SharedPointer::new(v))
    }

    /// Insert a key mapped to an existing value handle.
    ///
    /// The map and the caller share the value afterwards. Like
    /// [`insert`][GenericHashMap::insert], this does nothing if the key is
    /// already present.
    ///
    /// Time: O(1)*
    pub fn insert_shared(&mut self, k: K, v: SharedPointer<V, P>) -> bool {
        let chain = self.chain_for_mut(&k);
        if chain::lookup(chain, &k).is_some() {
            return false;
        }
        chain::push_front(chain, Entry::new(k, v));
        self.size += 1;
        if self.size == self.buckets.len() {
            self.resize(self.buckets.len() * RESIZE_FACTOR);
        }
        true
    }

    /// Remove a key/value pair from a map, if it exists, and return the
    /// handle to the removed value.
    ///
    /// Time: O(1)*
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::HashMap;
    /// let mut map = hashmap!{123 => "123", 456 => "456"};
    /// assert_eq!(Some("123"), map.remove(&123).map(|v| *v));
    /// assert_eq!(None, map.remove(&123));
    /// assert_eq!(
    ///   map,
    ///   hashmap!{456 => "456"}
    /// );
    /// ```
    pub fn remove<BK>(&mut self, k: &BK) -> Option<SharedPointer<V, P>>
    where
        BK: Hash + Eq + ?Sized,
        K: Borrow<BK>,
    {
        let entry = chain::unlink(self.chain_for_mut(k), k)?;
        self.size -= 1;
        if self.size != 0 && self.size * SHRINK_LOAD <= self.buckets.len() {
            self.resize(self.buckets.len() / RESIZE_FACTOR);
        }
        Some(entry.into_pair().1)
    }

    /// Test whether two maps hold the same keys, comparing their values
    /// with the provided function.
    fn test_eq<S2, F>(&self, other: &GenericHashMap<K, V, S2, P>, mut cmp: F) -> bool
    where
        S2: BuildHasher,
        F: FnMut(&V, &V) -> bool,
    {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|theirs| cmp(value, theirs)))
    }

    /// Check the map's invariants, panicking if any is broken: every
    /// entry sits in the bucket its key hashes to, no key appears twice,
    /// the entry count matches `len()`, and the load is within bounds.
    #[cfg(any(test, feature = "debug"))]
    pub fn check_sane(&self) {
        let mut count = 0;
        for (index, chain) in self.buckets.iter().enumerate() {
            for entry in chain::entries(chain) {
                count += 1;
                assert_eq!(
                    index,
                    bucket_index(hash_key(&self.hasher, &entry.key), self.buckets.len()),
                    "entry in the wrong bucket"
                );
                assert!(
                    chain::entries(chain)
                        .filter(|other| other.key == entry.key)
                        .count()
                        == 1,
                    "duplicate key in chain"
                );
            }
        }
        assert_eq!(self.size, count, "size doesn't match entry count");
        assert!(self.size < self.buckets.len(), "load factor at or above 1");
        assert!(
            self.size == 0 || self.size * SHRINK_LOAD > self.buckets.len(),
            "load factor at or below 1/{SHRINK_LOAD}"
        );
    }
}

impl<K, V, S, P> GenericHashMap<K, V, S, P>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
    P: SharedPointerKind,
{
    /// Construct a map holding the union of two maps.
    ///
    /// A fresh map using `left`'s hasher receives every entry of `left`,
    /// then every entry of `right`. When a key exists in both maps the
    /// value from `left` is kept, which is the opposite of
    /// [`GenericOrdMap::merge`][crate::GenericOrdMap::merge].
    ///
    /// Neither input is modified; the result shares value handles with
    /// them.
    ///
    /// Time: O(n + m)*
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::HashMap;
    /// let map1 = hashmap!{1 => 1, 3 => 3};
    /// let map2 = hashmap!{2 => 2, 3 => 4};
    /// let expected = hashmap!{1 => 1, 2 => 2, 3 => 3};
    /// assert_eq!(expected, HashMap::merge(&map1, &map2));
    /// ```
    #[must_use]
    pub fn merge<S2>(left: &Self, right: &GenericHashMap<K, V, S2, P>) -> Self {
        tracing::debug!(left = left.len(), right = right.len(), "merging hash maps");
        let mut out = Self::with_hasher(left.hasher.clone());
        for entry in ChainIter::new(&left.buckets, left.size) {
            out.insert_shared(entry.key.clone(), entry.value.clone());
        }
        for entry in ChainIter::new(&right.buckets, right.size) {
            out.insert_shared(entry.key.clone(), entry.value.clone());
        }
        out
    }
}

// Core traits

impl<K, V, S, P> Clone for GenericHashMap<K, V, S, P>
where
    K: Clone,
    S: Clone,
    P: SharedPointerKind,
{
    /// Copy every entry of a map into a new bucket array. Values are
    /// shared with the original.
    ///
    /// Time: O(n)
    #[inline]
    fn clone(&self) -> Self {
        GenericHashMap {
            size: self.size,
            buckets: chain::deep_copy(&self.buckets),
            hasher: self.hasher.clone(),
        }
    }
}

impl<K, V, S, P: SharedPointerKind> Drop for GenericHashMap<K, V, S, P> {
    fn drop(&mut self) {
        for chain in &mut self.buckets {
            chain::clear(chain);
        }
    }
}

impl<K, V, S1, S2, P> PartialEq<GenericHashMap<K, V, S2, P>> for GenericHashMap<K, V, S1, P>
where
    K: Hash + Eq,
    V: PartialEq,
    S1: BuildHasher,
    S2: BuildHasher,
    P: SharedPointerKind,
{
    fn eq(&self, other: &GenericHashMap<K, V, S2, P>) -> bool {
        self.test_eq(other, PartialEq::eq)
    }
}

impl<K, V, S, P> Eq for GenericHashMap<K, V, S, P>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
    P: SharedPointerKind,
{
}

impl<K, V, S, P> Default for GenericHashMap<K, V, S, P>
where
    S: Default,
    P: SharedPointerKind,
{
    #[inline]
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S, P> Add for GenericHashMap<K, V, S, P>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
    P: SharedPointerKind,
{
    type Output = GenericHashMap<K, V, S, P>;

    fn add(self, other: Self) -> Self::Output {
        Self::merge(&self, &other)
    }
}

impl<K, V, S, P> Add for &GenericHashMap<K, V, S, P>
where
    K: Hash + Eq + Clone,
    S: BuildHasher + Clone,
    P: SharedPointerKind,
{
    type Output = GenericHashMap<K, V, S, P>;

    fn add(self, other: Self) -> Self::Output {
        GenericHashMap::merge(self, other)
    }
}

impl<K, V, S, P> Extend<(K, V)> for GenericHashMap<K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher,
    P: SharedPointerKind,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<BK, K, V, S, P> Index<&BK> for GenericHashMap<K, V, S, P>
where
    BK: Hash + Eq + ?Sized,
    K: Hash + Eq + Borrow<BK>,
    S: BuildHasher,
    P: SharedPointerKind,
{
    type Output = V;

    fn index(&self, key: &BK) -> &Self::Output {
        match self.get(key) {
            None => panic!("HashMap::index: invalid key"),
            Some(value) => value,
        }
    }
}

impl<K, V, S, P> Debug for GenericHashMap<K, V, S, P>
where
    K: Debug,
    V: Debug,
    P: SharedPointerKind,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let mut d = f.debug_map();
        for (k, v) in self {
            d.entry(k, v);
        }
        d.finish()
    }
}

// Iterators

/// An iterator over the elements of a map.
pub struct Iter<'a, K, V, P: SharedPointerKind> {
    it: ChainIter<'a, K, V, P>,
}

// We impl Clone instead of deriving it, because we want Clone even if K and V aren't.
impl<'a, K, V, P: SharedPointerKind> Clone for Iter<'a, K, V, P> {
    fn clone(&self) -> Self {
        Iter {
            it: self.it.clone(),
        }
    }
}

impl<'a, K, V, P: SharedPointerKind> Iterator for Iter<'a, K, V, P> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|entry| (&entry.key, &*entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V, P: SharedPointerKind> ExactSizeIterator for Iter<'a, K, V, P> {}

impl<'a, K, V, P: SharedPointerKind> FusedIterator for Iter<'a, K, V, P> {}

/// A consuming iterator over the keys and value handles of a map.
pub struct ConsumingIter<K, V, P: SharedPointerKind> {
    it: ChainDrain<K, V, P>,
}

impl<K, V, P: SharedPointerKind> Iterator for ConsumingIter<K, V, P> {
    type Item = (K, SharedPointer<V, P>);

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|entry| entry.into_pair())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V, P: SharedPointerKind> ExactSizeIterator for ConsumingIter<K, V, P> {}

impl<K, V, P: SharedPointerKind> FusedIterator for ConsumingIter<K, V, P> {}

/// An iterator over the keys of a map.
pub struct Keys<'a, K, V, P: SharedPointerKind> {
    it: ChainIter<'a, K, V, P>,
}

impl<'a, K, V, P: SharedPointerKind> Iterator for Keys<'a, K, V, P> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|entry| &entry.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V, P: SharedPointerKind> ExactSizeIterator for Keys<'a, K, V, P> {}

impl<'a, K, V, P: SharedPointerKind> FusedIterator for Keys<'a, K, V, P> {}

/// An iterator over the values of a map.
pub struct Values<'a, K, V, P: SharedPointerKind> {
    it: ChainIter<'a, K, V, P>,
}

impl<'a, K, V, P: SharedPointerKind> Iterator for Values<'a, K, V, P> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|entry| &*entry.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V, P: SharedPointerKind> ExactSizeIterator for Values<'a, K, V, P> {}

impl<'a, K, V, P: SharedPointerKind> FusedIterator for Values<'a, K, V, P> {}

impl<'a, K, V, S, P: SharedPointerKind> IntoIterator for &'a GenericHashMap<K, V, S, P> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, P>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S, P: SharedPointerKind> IntoIterator for GenericHashMap<K, V, S, P> {
    type Item = (K, SharedPointer<V, P>);
    type IntoIter = ConsumingIter<K, V, P>;

    #[inline]
    fn into_iter(mut self) -> Self::IntoIter {
        let buckets = mem::take(&mut self.buckets);
        ConsumingIter {
            it: ChainDrain::new(buckets, self.size),
        }
    }
}

// Conversions

impl<K, V, S, P> FromIterator<(K, V)> for GenericHashMap<K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
    P: SharedPointerKind,
{
    fn from_iter<T>(i: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::default();
        map.extend(i);
        map
    }
}

impl<K, V, S, P> From<Vec<(K, V)>> for GenericHashMap<K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
    P: SharedPointerKind,
{
    fn from(m: Vec<(K, V)>) -> Self {
        m.into_iter().collect()
    }
}

impl<'a, K, V, S, P> From<&'a [(K, V)]> for GenericHashMap<K, V, S, P>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Default,
    P: SharedPointerKind,
{
    fn from(m: &'a [(K, V)]) -> Self {
        m.iter().cloned().collect()
    }
}

impl<K, V, S, P, S2> From<collections::HashMap<K, V, S2>> for GenericHashMap<K, V, S, P>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
    P: SharedPointerKind,
{
    fn from(m: collections::HashMap<K, V, S2>) -> Self {
        m.into_iter().collect()
    }
}

// Tests
