// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! # Two maps and a fast merge
//!
//! This library provides two interchangeable key/value maps:
//!
//! | Type | Keys need | Lookup | Merge tie-break |
//! | --- | --- | --- | --- |
//! | [`OrdMap`][ordmap::OrdMap] | [`Ord`][std::cmp::Ord] | O(log n) | right operand wins |
//! | [`HashMap`][hashmap::HashMap] | [`Hash`][std::hash::Hash] + [`Eq`][std::cmp::Eq] | O(1)* | left operand wins |
//!
//! [`OrdMap`][ordmap::OrdMap] is an [AVL tree][avl], rebalanced with
//! rotations after every insertion and removal so that the heights of any
//! node's two subtrees never differ by more than one.
//!
//! [`HashMap`][hashmap::HashMap] is a chained hash table. It starts with
//! three buckets, triples its bucket array whenever it holds as many
//! entries as it has buckets, and cuts it to a third when the load drops
//! to one ninth.
//!
//! ## Merging
//!
//! Merging two ordered maps doesn't insert keys one at a time. Both trees
//! are flattened into sorted [`ArrayBridge`][bridge::ArrayBridge]s, which
//! are merged in a single pass, and a balanced tree with exactly the right
//! number of nodes is laid out and filled in order. The whole merge is
//! linear in the size of the two maps.
//!
//! ```
//! # #[macro_use] extern crate twinmap;
//! # use twinmap::OrdMap;
//! let left = ordmap!{1 => "one", 5 => "five"};
//! let right = ordmap!{3 => "three", 5 => "FIVE"};
//! let merged = OrdMap::merge(&left, &right);
//! assert_eq!(
//!     vec![(&1, &"one"), (&3, &"three"), (&5, &"FIVE")],
//!     merged.iter().collect::<Vec<_>>()
//! );
//! ```
//!
//! Note that the two maps break ties differently: an ordered merge keeps
//! the value from its right operand, a hash merge keeps the value from
//! its left operand.
//!
//! ## Values
//!
//! Both maps store their values behind a shared pointer from the
//! [`archery`][archery] crate, and hand out handles to them through
//! `get_shared` and `remove`. A handle stays valid after its key is removed
//! or its map is dropped. The nodes and chains themselves are never shared;
//! cloning a map copies its structure and shares only the values.
//!
//! The pointer kind is a type parameter of the `Generic*` types. The
//! `OrdMap` and `HashMap` aliases use
//! [`DefaultSharedPtr`][shared_ptr::DefaultSharedPtr], which is
//! [`ArcK`][shared_ptr::ArcK], or `ArcTK` from [`triomphe`][triomphe] when
//! the `triomphe` feature is enabled.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! | ------- | ----------- |
//! | [`debug`](#feature-debug) | Exposes `check_sane` on both maps |
//! | [`triomphe`](#feature-triomphe) | Use [`triomphe`][triomphe] for the default shared pointer |
//! | [`proptest`](https://docs.rs/proptest) | Strategies for both maps in the [`proptest`](proptest/index.html) module |
//! | [`quickcheck`](https://docs.rs/quickcheck) | [`quickcheck::Arbitrary`](https://docs.rs/quickcheck/latest/quickcheck/trait.Arbitrary.html) implementations |
//! | [`arbitrary`](https://docs.rs/arbitrary/) | [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/latest/arbitrary/trait.Arbitrary.html) implementations |
//!
//! ## Logging
//!
//! Resizes, rebuilds and merges emit [`tracing`][tracing] events at the
//! `trace` and `debug` levels. The library never installs a subscriber.
//!
//! [avl]: https://en.wikipedia.org/wiki/AVL_tree
//! [archery]: https://docs.rs/archery
//! [triomphe]: https://docs.rs/triomphe
//! [tracing]: https://docs.rs/tracing
//! [std::cmp::Ord]: https://doc.rust-lang.org/std/cmp/trait.Ord.html
//! [std::cmp::Eq]: https://doc.rust-lang.org/std/cmp/trait.Eq.html
//! [std::hash::Hash]: https://doc.rust-lang.org/std/hash/trait.Hash.html

#![warn(rust_2018_idioms)]
#![deny(unsafe_code, nonstandard_style)]
#![warn(unreachable_pub, missing_docs)]

#[macro_use]
mod util;

mod config;
mod nodes;

pub mod bridge;
pub mod error;
pub mod hash;
pub mod ord;
pub mod shared_ptr;

pub use crate::hash::map as hashmap;
pub use crate::ord::map as ordmap;

pub use crate::bridge::{ArrayBridge, GenericArrayBridge};
pub use crate::error::MapError;
pub use crate::hashmap::{GenericHashMap, HashMap};
pub use crate::ordmap::{GenericOrdMap, OrdMap};

#[cfg(feature = "quickcheck")]
#[doc(hidden)]
pub mod quickcheck;

#[cfg(any(test, feature = "proptest"))]
pub mod proptest;

#[cfg(feature = "arbitrary")]
#[doc(hidden)]
pub mod arbitrary;

#[cfg(test)]
mod test {
    use metrohash::MetroHash64;
    use std::hash::{BuildHasher, Hasher};

    /// A deliberately poor hasher: keeps only the lowest `N` bits of the
    /// input, so distinct keys collide constantly.
    pub(crate) struct LolHasher<const N: usize = 4> {
        state: u64,
        shift: usize,
    }

    impl<const N: usize> LolHasher<N> {
        fn feed_me(&mut self, byte: u8) {
            self.state ^= u64::from(byte) << self.shift;
            self.shift += 8;
            if self.shift >= 64 {
                self.shift = 0;
            }
        }
    }

    impl<const N: usize> Hasher for LolHasher<N> {
        fn write(&mut self, bytes: &[u8]) {
            for byte in bytes {
                self.feed_me(*byte)
            }
        }

        fn finish(&self) -> u64 {
            if N >= 64 {
                self.state
            } else {
                self.state & ((1 << N) - 1)
            }
        }
    }

    impl<const N: usize> Default for LolHasher<N> {
        fn default() -> Self {
            LolHasher { state: 0, shift: 0 }
        }
    }

    pub(crate) struct MetroHashBuilder {
        seed: u64,
    }

    impl MetroHashBuilder {
        pub(crate) fn new(seed: u64) -> Self {
            MetroHashBuilder { seed }
        }
    }

    impl BuildHasher for MetroHashBuilder {
        type Hasher = MetroHash64;
        fn build_hasher(&self) -> Self::Hasher {
            MetroHash64::with_seed(self.seed)
        }
    }
}
