// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Sorted key/value sequences.
//!
//! An [`ArrayBridge`] carries the content of a map out of, and back into,
//! tree form: [`GenericOrdMap::to_bridge`][crate::GenericOrdMap::to_bridge]
//! flattens a map into one, [`ArrayBridge::merge`] combines two of them in
//! linear time, and
//! [`GenericOrdMap::from_bridge`][crate::GenericOrdMap::from_bridge] builds a
//! balanced tree from one without any rotations.
//!
//! Keys are always strictly ascending, and `keys()[i]` belongs with
//! `values()[i]`.

use std::fmt::{Debug, Error, Formatter};
use std::iter::{FusedIterator, Zip};
use std::slice;
use std::vec;

use archery::{SharedPointer, SharedPointerKind};

use crate::error::MapError;
use crate::shared_ptr::DefaultSharedPtr;
use crate::util::Side;

/// Type alias for [`GenericArrayBridge`] that uses [`DefaultSharedPtr`] as the pointer type.
///
/// [GenericArrayBridge]: ./struct.GenericArrayBridge.html
/// [DefaultSharedPtr]: ../shared_ptr/type.DefaultSharedPtr.html
pub type ArrayBridge<K, V> = GenericArrayBridge<K, V, DefaultSharedPtr>;

/// Two parallel sequences of keys and value handles in ascending key order.
pub struct GenericArrayBridge<K, V, P: SharedPointerKind> {
    keys: Vec<K>,
    values: Vec<SharedPointer<V, P>>,
}

impl<K, V, P: SharedPointerKind> GenericArrayBridge<K, V, P> {
    /// Construct an empty bridge.
    #[must_use]
    pub fn new() -> Self {
        GenericArrayBridge {
            keys: Vec::new(),
            values: Vec::new(),
        }
    }

    pub(crate) fn from_sorted(keys: Vec<K>, values: Vec<SharedPointer<V, P>>) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        GenericArrayBridge { keys, values }
    }

    /// The number of key/value pairs in the bridge.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Test whether the bridge is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The keys, in ascending order.
    #[must_use]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// The value handles, in the order of their keys.
    #[must_use]
    pub fn values(&self) -> &[SharedPointer<V, P>] {
        &self.values
    }

    /// Iterate over the key/value pairs in ascending key order.
    pub fn iter(&self) -> Zip<slice::Iter<'_, K>, slice::Iter<'_, SharedPointer<V, P>>> {
        self.keys.iter().zip(self.values.iter())
    }

    /// Take the two sequences apart.
    #[must_use]
    pub fn into_parts(self) -> (Vec<K>, Vec<SharedPointer<V, P>>) {
        (self.keys, self.values)
    }
}

impl<K: Ord, V, P: SharedPointerKind> GenericArrayBridge<K, V, P> {
    /// Construct a bridge from separate key and value sequences.
    ///
    /// Fails if the sequences differ in length, or if the keys are not
    /// strictly ascending.
    ///
    /// # Examples
    ///
    /// ```
    /// # use twinmap::bridge::ArrayBridge;
    /// # use twinmap::shared_ptr::SharedPointer;
    /// # use twinmap::MapError;
    /// let bridge = ArrayBridge::try_from_parts(
    ///     vec![1, 2],
    ///     vec![SharedPointer::new("a"), SharedPointer::new("b")],
    /// );
    /// assert!(bridge.is_ok());
    ///
    /// let unsorted = ArrayBridge::try_from_parts(
    ///     vec![2, 1],
    ///     vec![SharedPointer::new("a"), SharedPointer::new("b")],
    /// );
    /// assert_eq!(Some(MapError::Unordered { index: 1 }), unsorted.err());
    /// ```
    pub fn try_from_parts(keys: Vec<K>, values: Vec<SharedPointer<V, P>>) -> Result<Self, MapError> {
        if keys.len() != values.len() {
            return Err(MapError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        if let Some(index) = keys.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(MapError::Unordered { index: index + 1 });
        }
        Ok(GenericArrayBridge { keys, values })
    }

    /// Merge two bridges into one in a single linear pass.
    ///
    /// When both bridges hold the same key, the pair from `right` is kept
    /// and the pair from `left` is dropped.
    ///
    /// Time: O(n + m)
    #[must_use]
    pub fn merge(left: Self, right: Self) -> Self {
        let capacity = left.len() + right.len();
        let mut keys = Vec::with_capacity(capacity);
        let mut values = Vec::with_capacity(capacity);
        let mut left = left.into_iter().peekable();
        let mut right = right.into_iter().peekable();
        loop {
            let side = match (left.peek(), right.peek()) {
                (None, None) => break,
                (Some(_), None) => Side::Left,
                (None, Some(_)) => Side::Right,
                (Some((l, _)), Some((r, _))) if l < r => Side::Left,
                _ => Side::Right,
            };
            let next = match side {
                Side::Left => left.next(),
                Side::Right => right.next(),
            };
            if let Some((key, value)) = next {
                if side == Side::Right {
                    left.next_if(|(l, _)| *l == key);
                }
                keys.push(key);
                values.push(value);
            }
        }
        GenericArrayBridge { keys, values }
    }
}

impl<K, V, P: SharedPointerKind> Default for GenericArrayBridge<K, V, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V, P: SharedPointerKind> Clone for GenericArrayBridge<K, V, P> {
    fn clone(&self) -> Self {
        GenericArrayBridge {
            keys: self.keys.clone(),
            values: self.values.clone(),
        }
    }
}

impl<K: Debug, V: Debug, P: SharedPointerKind> Debug for GenericArrayBridge<K, V, P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let mut d = f.debug_map();
        for (k, v) in self.iter() {
            d.entry(k, &**v);
        }
        d.finish()
    }
}

/// A consuming iterator over the pairs of a bridge.
pub struct ConsumingIter<K, V, P: SharedPointerKind> {
    it: Zip<vec::IntoIter<K>, vec::IntoIter<SharedPointer<V, P>>>,
}

impl<K, V, P: SharedPointerKind> Iterator for ConsumingIter<K, V, P> {
    type Item = (K, SharedPointer<V, P>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V, P: SharedPointerKind> DoubleEndedIterator for ConsumingIter<K, V, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.it.next_back()
    }
}

impl<K, V, P: SharedPointerKind> ExactSizeIterator for ConsumingIter<K, V, P> {}

impl<K, V, P: SharedPointerKind> FusedIterator for ConsumingIter<K, V, P> {}

impl<K, V, P: SharedPointerKind> IntoIterator for GenericArrayBridge<K, V, P> {
    type Item = (K, SharedPointer<V, P>);
    type IntoIter = ConsumingIter<K, V, P>;

    fn into_iter(self) -> Self::IntoIter {
        ConsumingIter {
            it: self.keys.into_iter().zip(self.values),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bridge(pairs: &[(i32, &'static str)]) -> ArrayBridge<i32, &'static str> {
        ArrayBridge::try_from_parts(
            pairs.iter().map(|(k, _)| *k).collect(),
            pairs.iter().map(|(_, v)| SharedPointer::new(*v)).collect(),
        )
        .unwrap()
    }

    fn pairs(bridge: &ArrayBridge<i32, &'static str>) -> Vec<(i32, &'static str)> {
        bridge.iter().map(|(k, v)| (*k, **v)).collect()
    }

    #[test]
    fn merge_interleaves() {
        let merged = ArrayBridge::merge(
            bridge(&[(1, "a"), (4, "d"), (5, "e")]),
            bridge(&[(2, "b"), (3, "c"), (9, "i")]),
        );
        assert_eq!(
            vec![(1, "a"), (2, "b"), (3, "c"), (4, "d"), (5, "e"), (9, "i")],
            pairs(&merged)
        );
    }

    #[test]
    fn merge_prefers_right_on_equal_keys() {
        let merged = ArrayBridge::merge(
            bridge(&[(1, "left"), (2, "left"), (3, "left")]),
            bridge(&[(2, "right"), (3, "right"), (4, "right")]),
        );
        assert_eq!(
            vec![(1, "left"), (2, "right"), (3, "right"), (4, "right")],
            pairs(&merged)
        );
    }

    #[test]
    fn merge_with_empty() {
        let merged = ArrayBridge::merge(ArrayBridge::new(), bridge(&[(7, "x")]));
        assert_eq!(vec![(7, "x")], pairs(&merged));
        let merged = ArrayBridge::merge(bridge(&[(7, "x")]), ArrayBridge::new());
        assert_eq!(vec![(7, "x")], pairs(&merged));
        assert!(ArrayBridge::<i32, ()>::merge(ArrayBridge::new(), ArrayBridge::new()).is_empty());
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let result = ArrayBridge::try_from_parts(vec![1, 2], vec![SharedPointer::new(())]);
        assert_eq!(
            Some(MapError::LengthMismatch { keys: 2, values: 1 }),
            result.err()
        );
    }

    #[test]
    fn rejects_duplicate_keys() {
        let result = ArrayBridge::try_from_parts(
            vec![1, 3, 3],
            vec![SharedPointer::new(()), SharedPointer::new(()), SharedPointer::new(())],
        );
        assert_eq!(Some(MapError::Unordered { index: 2 }), result.err());
    }

    #[test]
    fn into_parts_returns_both_sequences() {
        let (keys, values) = bridge(&[(1, "a"), (3, "c")]).into_parts();
        assert_eq!(vec![1, 3], keys);
        assert_eq!(vec!["a", "c"], values.iter().map(|v| **v).collect::<Vec<_>>());
        let rebuilt = ArrayBridge::try_from_parts(keys, values).unwrap();
        assert_eq!(vec![(1, "a"), (3, "c")], pairs(&rebuilt));
    }

    #[test]
    fn merge_shares_value_handles() {
        let value = SharedPointer::new("shared");
        let left = ArrayBridge::try_from_parts(vec![1], vec![value.clone()]).unwrap();
        let merged = ArrayBridge::merge(left, ArrayBridge::new());
        assert!(SharedPointer::ptr_eq(&value, &merged.values()[0]));
    }
}
