// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// The number of buckets in a freshly constructed hash map.
pub(crate) const INITIAL_BUCKETS: usize = 3;

/// The factor by which the bucket array grows or shrinks on a resize.
pub(crate) const RESIZE_FACTOR: usize = 3;

/// A hash map shrinks once `len / buckets <= 1 / SHRINK_LOAD`.
// Must be larger than RESIZE_FACTOR, or a shrink could leave len >= buckets.
pub(crate) const SHRINK_LOAD: usize = 9;
