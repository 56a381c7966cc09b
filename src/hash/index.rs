// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The default bucket indexing for [`HashMap`][crate::HashMap].
//!
//! [`IndexHasher`] hashes an integer key to the integer itself, so a map
//! with `m` buckets puts a non-negative key `k` in bucket `k mod m`. Keys
//! which write more than one integer, or raw bytes, are folded into a
//! single integer, so every [`Hash`][std::hash::Hash] key gets an index.
//!
//! Signed integers are reinterpreted as unsigned of the same width, so
//! `-1i32` indexes like `u32::MAX`.
//!
//! Any other [`BuildHasher`][std::hash::BuildHasher] can be plugged into
//! [`GenericHashMap`][crate::GenericHashMap] instead.

use std::hash::{BuildHasherDefault, Hasher};

const FOLD_MULTIPLIER: u64 = 0x0000_0100_0000_01b3;

/// A [`BuildHasher`][std::hash::BuildHasher] producing [`IndexHasher`]s.
pub type BuildIndexHasher = BuildHasherDefault<IndexHasher>;

/// A hasher which maps integers to themselves.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IndexHasher {
    state: u64,
}

impl IndexHasher {
    #[inline]
    fn fold(&mut self, value: u64) {
        self.state = self.state.wrapping_mul(FOLD_MULTIPLIER).wrapping_add(value);
    }
}

impl Hasher for IndexHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.fold(u64::from(*byte));
        }
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.fold(u64::from(i));
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.fold(u64::from(i));
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.fold(u64::from(i));
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.fold(i);
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.fold(i as u64);
    }
}
