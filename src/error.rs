// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors for the few operations with preconditions.
//!
//! Missing or duplicate keys are never errors: lookups return `None`,
//! and inserting an existing key or removing a missing one does nothing.

use thiserror::Error;

/// An operation was called on a map or bridge that can't satisfy it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// The map has no entries, so it has no minimum or maximum.
    #[error("the map is empty")]
    EmptyMap,
    /// The key and value sequences of a bridge differ in length.
    #[error("bridge has {keys} keys but {values} values")]
    LengthMismatch {
        /// Number of keys supplied.
        keys: usize,
        /// Number of values supplied.
        values: usize,
    },
    /// The bridge key at `index` is not strictly greater than the one before it.
    #[error("bridge keys are not strictly ascending at index {index}")]
    Unordered {
        /// Position of the offending key.
        index: usize,
    },
}
