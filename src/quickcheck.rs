// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{shared_ptr::SharedPointerKind, GenericHashMap, GenericOrdMap};
use ::quickcheck::{Arbitrary, Gen};
use std::hash::{BuildHasher, Hash};
use std::iter::FromIterator;

impl<K, V, P> Arbitrary for GenericOrdMap<K, V, P>
where
    K: Ord + Clone + Arbitrary + Sync,
    V: Arbitrary + Sync + Send,
    P: SharedPointerKind + 'static,
{
    fn arbitrary(g: &mut Gen) -> Self {
        GenericOrdMap::from_iter(Vec::<(K, V)>::arbitrary(g))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let keys: Vec<K> = self.keys().cloned().collect();
        let source = self.clone();
        Box::new(keys.shrink().map(move |keep| {
            let mut map = source.clone();
            for key in source.keys() {
                if !keep.contains(key) {
                    map.remove(key);
                }
            }
            map
        }))
    }
}

impl<K, V, S, P> Arbitrary for GenericHashMap<K, V, S, P>
where
    K: Hash + Eq + Arbitrary + Sync,
    V: Arbitrary + Sync + Send,
    S: BuildHasher + Default + Clone + Send + Sync + 'static,
    P: SharedPointerKind + 'static,
{
    fn arbitrary(g: &mut Gen) -> Self {
        GenericHashMap::from(Vec::<(K, V)>::arbitrary(g))
    }
}
