// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

use archery::{SharedPointer, SharedPointerKind};

use crate::util::{parent_height, EMPTY_HEIGHT};

pub(crate) type Link<K, V, P> = Option<Box<Node<K, V, P>>>;

/// A node in an AVL tree.
///
/// Invariants:
/// * every key in `left` is less than `key`, every key in `right` greater
/// * `height` is `1 + max(height(left), height(right))`, empty subtrees count as -1
/// * `height(left) - height(right)` is -1, 0 or 1 between public operations
pub(crate) struct Node<K, V, P: SharedPointerKind> {
    pub(crate) key: K,
    pub(crate) value: SharedPointer<V, P>,
    left: Link<K, V, P>,
    right: Link<K, V, P>,
    height: isize,
}

#[inline]
pub(crate) fn height<K, V, P: SharedPointerKind>(link: &Link<K, V, P>) -> isize {
    link.as_ref().map_or(EMPTY_HEIGHT, |node| node.height)
}

impl<K, V, P: SharedPointerKind> Node<K, V, P> {
    fn leaf(key: K, value: SharedPointer<V, P>) -> Self {
        Node {
            key,
            value,
            left: None,
            right: None,
            height: 0,
        }
    }

    fn update_height(&mut self) {
        self.height = parent_height(height(&self.left), height(&self.right));
    }

    fn balance_factor(&self) -> isize {
        height(&self.left) - height(&self.right)
    }

    /// Lift the left child into this node's place.
    ///
    /// ```text
    ///       n              l
    ///      / \            / \
    ///     l   c    =>    a   n
    ///    / \                / \
    ///   a   b              b   c
    /// ```
    fn rotate_right(mut node: Box<Self>) -> Box<Self> {
        match node.left.take() {
            None => node,
            Some(mut pivot) => {
                node.left = pivot.right.take();
                node.update_height();
                pivot.right = Some(node);
                pivot.update_height();
                pivot
            }
        }
    }

    /// Lift the right child into this node's place. Mirror of `rotate_right`.
    fn rotate_left(mut node: Box<Self>) -> Box<Self> {
        match node.right.take() {
            None => node,
            Some(mut pivot) => {
                node.right = pivot.left.take();
                node.update_height();
                pivot.left = Some(node);
                pivot.update_height();
                pivot
            }
        }
    }

    /// Restore the AVL invariant at `node`, assuming both subtrees already
    /// satisfy it and differ in height by at most two. Returns the new root
    /// of the subtree.
    fn rebalance(mut node: Box<Self>) -> Box<Self> {
        node.update_height();
        match node.balance_factor() {
            2 => {
                if node.left.as_ref().is_some_and(|l| l.balance_factor() < 0) {
                    node.left = node.left.take().map(Self::rotate_left);
                }
                Self::rotate_right(node)
            }
            -2 => {
                if node.right.as_ref().is_some_and(|r| r.balance_factor() > 0) {
                    node.right = node.right.take().map(Self::rotate_right);
                }
                Self::rotate_left(node)
            }
            _ => node,
        }
    }

    fn rebalance_link(link: &mut Link<K, V, P>) {
        if let Some(node) = link.take() {
            *link = Some(Self::rebalance(node));
        }
    }

    pub(crate) fn lookup<'a, BK>(link: &'a Link<K, V, P>, key: &BK) -> Option<&'a Self>
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        let mut cursor = link.as_deref();
        while let Some(node) = cursor {
            cursor = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    pub(crate) fn min(link: &Link<K, V, P>) -> Option<&Self> {
        let mut node = link.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(node)
    }

    pub(crate) fn max(link: &Link<K, V, P>) -> Option<&Self> {
        let mut node = link.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(node)
    }

    /// Removes the leftmost node of the subtree, rebalancing on the way up.
    fn remove_min(link: &mut Link<K, V, P>) -> Option<(K, SharedPointer<V, P>)> {
        let node = link.as_mut()?;
        if node.left.is_some() {
            let min = Self::remove_min(&mut node.left);
            Self::rebalance_link(link);
            min
        } else {
            let node = *link.take()?;
            *link = node.right;
            Some((node.key, node.value))
        }
    }

    /// Detaches the node at `link`: a leaf is dropped, a single child is
    /// spliced into its place, and a node with two children takes over the
    /// key and value of its in-order successor. The caller rebalances.
    fn unlink(link: &mut Link<K, V, P>) -> Option<SharedPointer<V, P>> {
        let mut node = link.take()?;
        match (node.left.take(), node.right.take()) {
            (None, None) => Some(node.value),
            (Some(child), None) | (None, Some(child)) => {
                *link = Some(child);
                Some(node.value)
            }
            (Some(left), Some(right)) => {
                node.left = Some(left);
                node.right = Some(right);
                let (key, value) = Self::remove_min(&mut node.right)?;
                node.key = key;
                let removed = mem::replace(&mut node.value, value);
                *link = Some(node);
                Some(removed)
            }
        }
    }
}

impl<K: Ord, V, P: SharedPointerKind> Node<K, V, P> {
    /// Inserts a new leaf for `key` unless the key is already present.
    /// Returns `true` if the tree gained a node.
    pub(crate) fn insert(link: &mut Link<K, V, P>, key: K, value: SharedPointer<V, P>) -> bool {
        let inserted = match link {
            None => {
                *link = Some(Box::new(Node::leaf(key, value)));
                return true;
            }
            Some(node) => match key.cmp(&node.key) {
                Ordering::Less => Self::insert(&mut node.left, key, value),
                Ordering::Greater => Self::insert(&mut node.right, key, value),
                Ordering::Equal => false,
            },
        };
        if inserted {
            Self::rebalance_link(link);
        }
        inserted
    }

    /// Removes `key` from the tree if present and returns its value.
    pub(crate) fn remove<BK>(link: &mut Link<K, V, P>, key: &BK) -> Option<SharedPointer<V, P>>
    where
        BK: Ord + ?Sized,
        K: Borrow<BK>,
    {
        let node = link.as_mut()?;
        let removed = match key.cmp(node.key.borrow()) {
            Ordering::Less => Self::remove(&mut node.left, key),
            Ordering::Greater => Self::remove(&mut node.right, key),
            Ordering::Equal => Self::unlink(link),
        };
        if removed.is_some() {
            Self::rebalance_link(link);
        }
        removed
    }
}

impl<K: Clone, V, P: SharedPointerKind> Node<K, V, P> {
    /// Appends the subtree's keys and value handles in ascending order.
    pub(crate) fn flatten(
        link: &Link<K, V, P>,
        keys: &mut Vec<K>,
        values: &mut Vec<SharedPointer<V, P>>,
    ) {
        if let Some(node) = link {
            Self::flatten(&node.left, keys, values);
            keys.push(node.key.clone());
            values.push(node.value.clone());
            Self::flatten(&node.right, keys, values);
        }
    }
}

impl<K: Clone, V, P: SharedPointerKind> Clone for Node<K, V, P> {
    fn clone(&self) -> Self {
        Node {
            key: self.key.clone(),
            value: self.value.clone(),
            left: self.left.clone(),
            right: self.right.clone(),
            height: self.height,
        }
    }
}

#[cfg(any(test, feature = "debug"))]
impl<K: Ord, V, P: SharedPointerKind> Node<K, V, P> {
    /// Checks every structural invariant of the subtree, panicking on the
    /// first violation. Returns the number of nodes visited.
    pub(crate) fn check_sane(link: &Link<K, V, P>, lower: Option<&K>, upper: Option<&K>) -> usize {
        let Some(node) = link else {
            return 0;
        };
        if let Some(lower) = lower {
            assert!(*lower < node.key, "keys out of order");
        }
        if let Some(upper) = upper {
            assert!(node.key < *upper, "keys out of order");
        }
        let count = 1
            + Self::check_sane(&node.left, lower, Some(&node.key))
            + Self::check_sane(&node.right, Some(&node.key), upper);
        assert_eq!(
            node.height,
            parent_height(height(&node.left), height(&node.right)),
            "stale height"
        );
        assert!(
            node.balance_factor().abs() <= 1,
            "balance factor {} out of range",
            node.balance_factor()
        );
        count
    }
}

/// The shape of a tree without any keys or values.
///
/// Used to lay out a balanced tree for a known number of entries before
/// the entries are moved into it.
pub(crate) struct Skeleton {
    left: Option<Box<Skeleton>>,
    right: Option<Box<Skeleton>>,
    height: isize,
}

impl Skeleton {
    /// Builds a tree shape with exactly `len` nodes in which every
    /// root-to-leaf path has the same length, give or take one.
    ///
    /// A perfect tree of the smallest sufficient height is built first, and
    /// the surplus leaves are then cut from its deepest level, right to left.
    pub(crate) fn balanced(len: usize) -> Option<Box<Skeleton>> {
        if len == 0 {
            return None;
        }
        let height = complete_height(len);
        let mut surplus = complete_size(height) - len;
        let mut root = Self::perfect(height as isize);
        Self::trim(&mut root, &mut surplus, height as isize, 0);
        debug_assert_eq!(surplus, 0);
        root
    }

    fn perfect(height: isize) -> Option<Box<Skeleton>> {
        if height < 0 {
            return None;
        }
        Some(Box::new(Skeleton {
            left: Self::perfect(height - 1),
            right: Self::perfect(height - 1),
            height,
        }))
    }

    // Walks the tree right to left. A node one level above the leaves drops
    // its right leaf, then its left leaf if more removals are still owed.
    fn trim(link: &mut Option<Box<Skeleton>>, surplus: &mut usize, leaf_depth: isize, depth: isize) {
        let Some(node) = link else {
            return;
        };
        if *surplus == 0 {
            return;
        }
        Self::trim(&mut node.right, surplus, leaf_depth, depth + 1);
        if depth + 1 == leaf_depth {
            if *surplus > 0 && node.right.take().is_some() {
                *surplus -= 1;
            }
            if *surplus > 0 && node.left.take().is_some() {
                *surplus -= 1;
            }
        }
        Self::trim(&mut node.left, surplus, leaf_depth, depth + 1);
        node.height = parent_height(
            node.left.as_ref().map_or(EMPTY_HEIGHT, |n| n.height),
            node.right.as_ref().map_or(EMPTY_HEIGHT, |n| n.height),
        );
    }

    /// Turns the shape into a tree by assigning entries to its nodes in
    /// order. `entries` must yield at least as many items as there are
    /// nodes, in ascending key order.
    pub(crate) fn fill<K, V, P, I>(skeleton: Option<Box<Skeleton>>, entries: &mut I) -> Link<K, V, P>
    where
        P: SharedPointerKind,
        I: Iterator<Item = (K, SharedPointer<V, P>)>,
    {
        let skeleton = *skeleton?;
        let left = Self::fill(skeleton.left, entries);
        let (key, value) = entries.next()?;
        let right = Self::fill(skeleton.right, entries);
        Some(Box::new(Node {
            key,
            value,
            left,
            right,
            height: skeleton.height,
        }))
    }
}

/// Height of the smallest perfect tree holding at least `len` nodes,
/// i.e. `ceil(log2(len + 1)) - 1`.
pub(crate) fn complete_height(len: usize) -> usize {
    let mut height = 0;
    while complete_size(height) < len {
        height += 1;
    }
    height
}

/// Number of nodes in a perfect tree of the given height.
pub(crate) fn complete_size(height: usize) -> usize {
    (1 << (height + 1)) - 1
}

/// An in-order iterator over a tree.
pub(crate) struct Iter<'a, K, V, P: SharedPointerKind> {
    stack: Vec<&'a Node<K, V, P>>,
    remaining: usize,
}

impl<'a, K, V, P: SharedPointerKind> Iter<'a, K, V, P> {
    pub(crate) fn new(root: &'a Link<K, V, P>, len: usize) -> Self {
        let mut it = Iter {
            stack: Vec::new(),
            remaining: len,
        };
        it.push_left_spine(root.as_deref());
        it
    }

    fn push_left_spine(&mut self, mut cursor: Option<&'a Node<K, V, P>>) {
        while let Some(node) = cursor {
            self.stack.push(node);
            cursor = node.left.as_deref();
        }
    }
}

impl<'a, K, V, P: SharedPointerKind> Iterator for Iter<'a, K, V, P> {
    type Item = &'a Node<K, V, P>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(node)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, P: SharedPointerKind> Clone for Iter<'a, K, V, P> {
    fn clone(&self) -> Self {
        Iter {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

/// An in-order iterator which takes the tree apart as it goes, moving each
/// key out of its node.
pub(crate) struct Drain<K, V, P: SharedPointerKind> {
    stack: Vec<Box<Node<K, V, P>>>,
    remaining: usize,
}

impl<K, V, P: SharedPointerKind> Drain<K, V, P> {
    pub(crate) fn new(root: Link<K, V, P>, len: usize) -> Self {
        let mut it = Drain {
            stack: Vec::new(),
            remaining: len,
        };
        it.push_left_spine(root);
        it
    }

    fn push_left_spine(&mut self, mut cursor: Link<K, V, P>) {
        while let Some(mut node) = cursor {
            cursor = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K, V, P: SharedPointerKind> Iterator for Drain<K, V, P> {
    type Item = (K, SharedPointer<V, P>);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        self.remaining -= 1;
        Some((node.key, node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
