// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An ordered map.
//!
//! A map implemented as an [AVL tree][1].
//!
//! Lookups, insertions and removals are O(log n), and the tree is kept
//! height-balanced after every one of them. Keys only need to implement
//! [`Ord`][std::cmp::Ord], and always come out of the map from lowest to
//! highest.
//!
//! Two maps can be [merged][GenericOrdMap::merge] in linear time: both are
//! flattened into sorted [`ArrayBridge`][crate::bridge::ArrayBridge]s, the
//! bridges are merged, and a balanced tree of the right size is laid out
//! and filled in order, without going through per-key insertion.
//!
//! [1]: https://en.wikipedia.org/wiki/AVL_tree
//! [std::cmp::Ord]: https://doc.rust-lang.org/std/cmp/trait.Ord.html

use std::borrow::Borrow;
use std::collections;
use std::fmt::{Debug, Error, Formatter};
use std::iter::{FromIterator, FusedIterator};
use std::ops::{Add, Index};

use archery::{SharedPointer, SharedPointerKind};

use crate::bridge::GenericArrayBridge;
use crate::error::MapError;
use crate::nodes::avl::{height, Drain as NodeDrain, Iter as NodeIter, Link, Node, Skeleton};
use crate::shared_ptr::DefaultSharedPtr;

/// Construct a map from a sequence of key/value pairs.
///
/// If a key appears more than once, the first value is kept.
///
/// # Examples
///
/// ```
/// # #[macro_use] extern crate twinmap;
/// # use twinmap::ordmap::OrdMap;
/// # fn main() {
/// assert_eq!(
///   ordmap!{
///     1 => 11,
///     2 => 22,
///     3 => 33
///   },
///   OrdMap::from(vec![(1, 11), (2, 22), (3, 33)])
/// );
/// # }
/// ```
#[macro_export]
macro_rules! ordmap {
    () => { $crate::ordmap::OrdMap::new() };

    ( $( $key:expr => $value:expr ),* ) => {{
        let mut map = $crate::ordmap::OrdMap::new();
        $({
            map.insert($key, $value);
        })*;
        map
    }};

    ( $( $key:expr => $value:expr ,)* ) => {{
        let mut map = $crate::ordmap::OrdMap::new();
        $({
            map.insert($key, $value);
        })*;
        map
    }};
}

/// Type alias for [`GenericOrdMap`] that uses [`DefaultSharedPtr`] as the pointer type.
///
/// [GenericOrdMap]: ./struct.GenericOrdMap.html
/// [DefaultSharedPtr]: ../shared_ptr/type.DefaultSharedPtr.html
pub type OrdMap<K, V> = GenericOrdMap<K, V, DefaultSharedPtr>;

/// An ordered map.
///
/// A map implemented as an AVL tree. Every value is held behind a
/// [`SharedPointer`], so a caller can keep a handle to a value after
/// inserting it. The nodes of the tree belong to the map alone.
///
/// Inserting a key which is already present, or removing one which isn't,
/// leaves the map unchanged.
pub struct GenericOrdMap<K, V, P: SharedPointerKind> {
    size: usize,
    root: Link<K, V, P>,
}

impl<K, V, P: SharedPointerKind> GenericOrdMap<K, V, P> {
    /// Construct an empty map.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        GenericOrdMap {
            size: 0,
            root: None,
        }
    }

    /// Test whether a map is empty.
    ///
    /// Time: O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::ordmap::OrdMap;
    /// assert!(
    ///   !ordmap!{1 => 2}.is_empty()
    /// );
    /// assert!(
    ///   OrdMap::<i32, i32>::new().is_empty()
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the size of a map.
    ///
    /// Time: O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::ordmap::OrdMap;
    /// assert_eq!(3, ordmap!{
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

    /// The height of the tree: -1 when empty, 0 for a single entry.
    ///
    /// Time: O(1)
    #[must_use]
    pub fn height(&self) -> isize {
        height(&self.root)
    }

    /// Discard all elements from the map.
    pub fn clear(&mut self) {
        self.root = None;
        self.size = 0;
    }

    /// Get an iterator over the key/value pairs of a map, in ascending
    /// key order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, P> {
        Iter {
            it: NodeIter::new(&self.root, self.size),
        }
    }

    /// Get an iterator over a map's keys, in ascending order.
    #[inline]
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, P> {
        Keys {
            it: NodeIter::new(&self.root, self.size),
        }
    }

    /// Get an iterator over a map's values, in the order of their keys.
    #[inline]
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, P> {
        Values {
            it: NodeIter::new(&self.root, self.size),
        }
    }

    /// Get the value of the largest key in a map.
    ///
    /// Time: O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::ordmap::OrdMap;
    /// # use twinmap::MapError;
    /// let map = ordmap!{1 => "a", 5 => "e", 3 => "c"};
    /// assert_eq!(Ok(&"e"), map.get_max());
    /// assert_eq!(Err(MapError::EmptyMap), OrdMap::<i32, i32>::new().get_max());
    /// ```
    pub fn get_max(&self) -> Result<&V, MapError> {
        Node::max(&self.root)
            .map(|node| &*node.value)
            .ok_or(MapError::EmptyMap)
    }

    /// Get the value of the smallest key in a map.
    ///
    /// Time: O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::ordmap::OrdMap;
    /// let map = ordmap!{1 => "a", 5 => "e", 3 => "c"};
    /// assert_eq!(Ok(&"a"), map.get_min());
    /// ```
    pub fn get_min(&self) -> Result<&V, MapError> {
        Node::min(&self.root)
            .map(|node| &*node.value)
            .ok_or(MapError::EmptyMap)
    }
}

impl<K, V, P> GenericOrdMap<K, V, P>
where
    K: Ord,
    P: SharedPointerKind,
{
    /// Construct a map with a single mapping.
    ///
    /// # Examples
    ///
    /// ```
    /// # use twinmap::ordmap::OrdMap;
    /// let map = OrdMap::unit(123, "onetwothree");
    /// assert_eq!(
    ///   map.get(&123),
    ///   Some(&"onetwothree")
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn unit(key: K, value: V) -> Self {
        let mut map = Self::new();
        map.insert(key, value);
        map
    }

    /// Get the value for a key from a map.
    ///
    /// Time: O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::ordmap::OrdMap;
    /// let map = ordmap!{123 => "lol"};
    /// assert_eq!(
    ///   map.get(&123),
    ///   Some(&"lol")
    /// );
    /// assert_eq!(map.get(&321), None);
    /// ```
    #[must_use]
    pub fn get<BK>(&self, key: &BK) -> Option<&V>
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        Node::lookup(&self.root, key).map(|node| &*node.value)
    }

    /// Get a shared handle to the value for a key.
    ///
    /// The handle stays valid after the key is removed from the map.
    ///
    /// Time: O(log n)
    #[must_use]
    pub fn get_shared<BK>(&self, key: &BK) -> Option<SharedPointer<V, P>>
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        Node::lookup(&self.root, key).map(|node| node.value.clone())
    }

    /// Get the key/value pair for a key from a map.
    ///
    /// Time: O(log n)
    #[must_use]
    pub fn get_key_value<BK>(&self, key: &BK) -> Option<(&K, &V)>
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        Node::lookup(&self.root, key).map(|node| (&node.key, &*node.value))
    }

    /// Test for the presence of a key in a map.
    ///
    /// Time: O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::ordmap::OrdMap;
    /// let map = ordmap!{123 => "lol"};
    /// assert!(
    ///   map.contains_key(&123)
    /// );
    /// assert!(
    ///   !map.contains_key(&321)
    /// );
    /// ```
    #[inline]
    #[must_use]
    pub fn contains_key<BK>(&self, key: &BK) -> bool
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        self.get(key).is_some()
    }

    /// Insert a key/value mapping into a map.
    ///
    /// If the map already has a mapping for the given key, nothing
    /// changes and the new value is dropped. Returns `true` if the
    /// mapping was added.
    ///
    /// Time: O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::ordmap::OrdMap;
    /// let mut map = ordmap!{};
    /// assert!(map.insert(123, "123"));
    /// assert!(!map.insert(123, "456"));
    /// assert_eq!(
    ///   map,
    ///   ordmap!{123 => "123"}
    /// );
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.insert_shared(key, SharedPointer::new(value))
    }

    /// Insert a key mapped to an existing value handle.
    ///
    /// The map and the caller share the value afterwards. Like
    /// [`insert`][GenericOrdMap::insert], this does nothing if the key is
    /// already present.
    ///
    /// Time: O(log n)
    pub fn insert_shared(&mut self, key: K, value: SharedPointer<V, P>) -> bool {
        let inserted = Node::insert(&mut self.root, key, value);
        if inserted {
            self.size += 1;
        }
        inserted
    }

    /// Remove a key/value mapping from a map if it exists, and return
    /// the handle to the removed value.
    ///
    /// Time: O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::ordmap::OrdMap;
    /// let mut map = ordmap!{123 => "123", 456 => "456"};
    /// assert_eq!(Some("123"), map.remove(&123).map(|v| *v));
    /// assert_eq!(None, map.remove(&123));
    /// assert_eq!(1, map.len());
    /// ```
    pub fn remove<BK>(&mut self, key: &BK) -> Option<SharedPointer<V, P>>
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        let removed = Node::remove(&mut self.root, key);
        if removed.is_some() {
            self.size -= 1;
        }
        removed
    }

    /// Build a map from a bridge in linear time.
    ///
    /// A tree shape with exactly `bridge.len()` nodes and leaves on at
    /// most two adjacent levels is laid out first, then filled with the
    /// bridge's pairs by an in-order walk. No comparisons or rotations
    /// are performed.
    ///
    /// Time: O(n)
    #[must_use]
    pub fn from_bridge(bridge: GenericArrayBridge<K, V, P>) -> Self {
        let size = bridge.len();
        let skeleton = Skeleton::balanced(size);
        let root = Skeleton::fill(skeleton, &mut bridge.into_iter());
        let map = GenericOrdMap { size, root };
        tracing::trace!(size, height = map.height(), "rebuilt balanced tree");
        map
    }

    /// Test whether two maps hold the same keys, comparing their values
    /// with the provided function. The shapes of the trees don't matter.
    #[must_use]
    pub fn eq_by<F>(&self, other: &Self, mut cmp: F) -> bool
    where
        F: FnMut(&V, &V) -> bool,
    {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((k1, v1), (k2, v2))| k1 == k2 && cmp(v1, v2))
    }

    /// Check the tree's invariants, panicking if any is broken: keys in
    /// strictly ascending order, correct heights, every balance factor
    /// within one, and a node count equal to `len()`.
    #[cfg(any(test, feature = "debug"))]
    pub fn check_sane(&self) {
        let count = Node::check_sane(&self.root, None, None);
        assert_eq!(self.size, count, "size doesn't match node count");
    }
}

impl<K, V, P> GenericOrdMap<K, V, P>
where
    K: Ord + Clone,
    P: SharedPointerKind,
{
    /// Flatten a map into a bridge of its keys and value handles in
    /// ascending key order.
    ///
    /// Time: O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::ordmap::OrdMap;
    /// let map = ordmap!{3 => "c", 1 => "a", 2 => "b"};
    /// let bridge = map.to_bridge();
    /// assert_eq!(&[1, 2, 3], bridge.keys());
    /// assert_eq!(map, OrdMap::from_bridge(bridge));
    /// ```
    #[must_use]
    pub fn to_bridge(&self) -> GenericArrayBridge<K, V, P> {
        let mut keys = Vec::with_capacity(self.size);
        let mut values = Vec::with_capacity(self.size);
        Node::flatten(&self.root, &mut keys, &mut values);
        GenericArrayBridge::from_sorted(keys, values)
    }

    /// Flatten two maps and merge their content into one bridge, keeping
    /// the value from `right` for keys present in both.
    ///
    /// Time: O(n + m)
    #[must_use]
    pub fn merge_to_bridge(left: &Self, right: &Self) -> GenericArrayBridge<K, V, P> {
        GenericArrayBridge::merge(left.to_bridge(), right.to_bridge())
    }

    /// Construct a map holding the union of two maps.
    ///
    /// When a key exists in both maps, the value from `right` is kept.
    /// Note that [`GenericHashMap::merge`][crate::GenericHashMap::merge]
    /// keeps the value from its left operand instead.
    ///
    /// Neither input is modified; the result shares value handles with
    /// them.
    ///
    /// Time: O(n + m)
    ///
    /// # Examples
    ///
    /// ```
    /// # #[macro_use] extern crate twinmap;
    /// # use twinmap::ordmap::OrdMap;
    /// let map1 = ordmap!{1 => 1, 3 => 3};
    /// let map2 = ordmap!{2 => 2, 3 => 4};
    /// let expected = ordmap!{1 => 1, 2 => 2, 3 => 4};
    /// assert_eq!(expected, OrdMap::merge(&map1, &map2));
    /// ```
    #[must_use]
    pub fn merge(left: &Self, right: &Self) -> Self {
        tracing::debug!(left = left.len(), right = right.len(), "merging ordered maps");
        Self::from_bridge(Self::merge_to_bridge(left, right))
    }
}

// Core traits

impl<K, V, P> Clone for GenericOrdMap<K, V, P>
where
    K: Clone,
    P: SharedPointerKind,
{
    /// Copy a map's structure. Values are shared with the original.
    ///
    /// Time: O(n)
    fn clone(&self) -> Self {
        GenericOrdMap {
            size: self.size,
            root: self.root.clone(),
        }
    }
}

impl<K, V, P> PartialEq for GenericOrdMap<K, V, P>
where
    K: Ord,
    V: PartialEq,
    P: SharedPointerKind,
{
    fn eq(&self, other: &Self) -> bool {
        self.eq_by(other, PartialEq::eq)
    }
}

impl<K, V, P> Eq for GenericOrdMap<K, V, P>
where
    K: Ord,
    V: Eq,
    P: SharedPointerKind,
{
}

impl<K, V, P: SharedPointerKind> Default for GenericOrdMap<K, V, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, P> Add for GenericOrdMap<K, V, P>
where
    K: Ord + Clone,
    P: SharedPointerKind,
{
    type Output = GenericOrdMap<K, V, P>;

    fn add(self, other: Self) -> Self::Output {
        Self::merge(&self, &other)
    }
}

impl<K, V, P> Add for &GenericOrdMap<K, V, P>
where
    K: Ord + Clone,
    P: SharedPointerKind,
{
    type Output = GenericOrdMap<K, V, P>;

    fn add(self, other: Self) -> Self::Output {
        GenericOrdMap::merge(self, other)
    }
}

impl<K, V, P> Extend<(K, V)> for GenericOrdMap<K, V, P>
where
    K: Ord,
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

impl<BK, K, V, P> Index<&BK> for GenericOrdMap<K, V, P>
where
    BK: Ord + ?Sized,
    K: Ord + Borrow<BK>,
    P: SharedPointerKind,
{
    type Output = V;

    fn index(&self, key: &BK) -> &Self::Output {
        match self.get(key) {
            None => panic!("OrdMap::index: invalid key"),
            Some(value) => value,
        }
    }
}

impl<K, V, P> Debug for GenericOrdMap<K, V, P>
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

/// An iterator over the key/value pairs of a map.
pub struct Iter<'a, K, V, P: SharedPointerKind> {
    it: NodeIter<'a, K, V, P>,
}

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
        self.it.next().map(|node| (&node.key, &*node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V, P: SharedPointerKind> ExactSizeIterator for Iter<'a, K, V, P> {}

impl<'a, K, V, P: SharedPointerKind> FusedIterator for Iter<'a, K, V, P> {}

/// An iterator over the keys of a map.
pub struct Keys<'a, K, V, P: SharedPointerKind> {
    it: NodeIter<'a, K, V, P>,
}

impl<'a, K, V, P: SharedPointerKind> Iterator for Keys<'a, K, V, P> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|node| &node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V, P: SharedPointerKind> ExactSizeIterator for Keys<'a, K, V, P> {}

impl<'a, K, V, P: SharedPointerKind> FusedIterator for Keys<'a, K, V, P> {}

/// An iterator over the values of a map.
pub struct Values<'a, K, V, P: SharedPointerKind> {
    it: NodeIter<'a, K, V, P>,
}

impl<'a, K, V, P: SharedPointerKind> Iterator for Values<'a, K, V, P> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|node| &*node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<'a, K, V, P: SharedPointerKind> ExactSizeIterator for Values<'a, K, V, P> {}

impl<'a, K, V, P: SharedPointerKind> FusedIterator for Values<'a, K, V, P> {}

/// A consuming iterator over the keys and value handles of a map, in
/// ascending key order.
pub struct ConsumingIter<K, V, P: SharedPointerKind> {
    it: NodeDrain<K, V, P>,
}

impl<K, V, P: SharedPointerKind> Iterator for ConsumingIter<K, V, P> {
    type Item = (K, SharedPointer<V, P>);

    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V, P: SharedPointerKind> ExactSizeIterator for ConsumingIter<K, V, P> {}

impl<K, V, P: SharedPointerKind> FusedIterator for ConsumingIter<K, V, P> {}

impl<'a, K, V, P: SharedPointerKind> IntoIterator for &'a GenericOrdMap<K, V, P> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, P>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, P: SharedPointerKind> IntoIterator for GenericOrdMap<K, V, P> {
    type Item = (K, SharedPointer<V, P>);
    type IntoIter = ConsumingIter<K, V, P>;

    fn into_iter(self) -> Self::IntoIter {
        ConsumingIter {
            it: NodeDrain::new(self.root, self.size),
        }
    }
}

// Conversions

impl<K, V, P> FromIterator<(K, V)> for GenericOrdMap<K, V, P>
where
    K: Ord,
    P: SharedPointerKind,
{
    fn from_iter<T>(i: T) -> Self
    where
        T: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        map.extend(i);
        map
    }
}

impl<K, V, P> From<Vec<(K, V)>> for GenericOrdMap<K, V, P>
where
    K: Ord,
    P: SharedPointerKind,
{
    fn from(m: Vec<(K, V)>) -> Self {
        m.into_iter().collect()
    }
}

impl<'a, K, V, P> From<&'a [(K, V)]> for GenericOrdMap<K, V, P>
where
    K: Ord + Clone,
    V: Clone,
    P: SharedPointerKind,
{
    fn from(m: &'a [(K, V)]) -> Self {
        m.iter().cloned().collect()
    }
}

impl<K, V, P> From<collections::BTreeMap<K, V>> for GenericOrdMap<K, V, P>
where
    K: Ord,
    P: SharedPointerKind,
{
    /// Built in linear time, since the source is already sorted.
    fn from(m: collections::BTreeMap<K, V>) -> Self {
        let (keys, values) = m
            .into_iter()
            .map(|(k, v)| (k, SharedPointer::new(v)))
            .unzip();
        Self::from_bridge(GenericArrayBridge::from_sorted(keys, values))
    }
}

// Tests
