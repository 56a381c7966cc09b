// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use arbitrary::{size_hint, Arbitrary, Result, Unstructured};
use std::hash::{BuildHasher, Hash};

use crate::{shared_ptr::SharedPointerKind, GenericArrayBridge, GenericHashMap, GenericOrdMap};

impl<'a, K, V, P> Arbitrary<'a> for GenericOrdMap<K, V, P>
where
    K: Arbitrary<'a> + Ord,
    V: Arbitrary<'a>,
    P: SharedPointerKind + 'static,
{
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        u.arbitrary_iter()?.collect()
    }

    fn arbitrary_take_rest(u: Unstructured<'a>) -> Result<Self> {
        u.arbitrary_take_rest_iter()?.collect()
    }

    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        size_hint::recursion_guard(depth, |depth| {
            size_hint::and(<usize as Arbitrary<'_>>::size_hint(depth), (0, None))
        })
    }
}

impl<'a, K, V, S, P> Arbitrary<'a> for GenericHashMap<K, V, S, P>
where
    K: Arbitrary<'a> + Hash + Eq,
    V: Arbitrary<'a>,
    S: BuildHasher + Default + 'static,
    P: SharedPointerKind + 'static,
{
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        u.arbitrary_iter()?.collect()
    }

    fn arbitrary_take_rest(u: Unstructured<'a>) -> Result<Self> {
        u.arbitrary_take_rest_iter()?.collect()
    }

    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        size_hint::recursion_guard(depth, |depth| {
            size_hint::and(<usize as Arbitrary<'_>>::size_hint(depth), (0, None))
        })
    }
}

/// Bridges are generated through an ordered map, so their keys are always
/// strictly ascending.
impl<'a, K, V, P> Arbitrary<'a> for GenericArrayBridge<K, V, P>
where
    K: Arbitrary<'a> + Ord + Clone,
    V: Arbitrary<'a>,
    P: SharedPointerKind + 'static,
{
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(GenericOrdMap::<K, V, P>::arbitrary(u)?.to_bridge())
    }

    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        <GenericOrdMap<K, V, P> as Arbitrary<'a>>::size_hint(depth)
    }
}
