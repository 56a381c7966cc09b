#![no_main]

use std::collections::BTreeMap as NatMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use twinmap::OrdMap;

#[derive(Arbitrary, Debug)]
enum Action<K, V> {
    Insert(K, V),
    Remove(K),
    Merge(Vec<(K, V)>),
    Rebuild,
}

fuzz_target!(|actions: Vec<Action<u32, u32>>| {
    let mut map = OrdMap::new();
    let mut nat = NatMap::new();
    for action in actions {
        match action {
            Action::Insert(key, value) => {
                let fresh = !nat.contains_key(&key);
                nat.entry(key).or_insert(value);
                assert_eq!(fresh, map.insert(key, value));
            }
            Action::Remove(key) => {
                assert_eq!(nat.remove(&key), map.remove(&key).map(|v| *v));
            }
            Action::Merge(pairs) => {
                let other: OrdMap<u32, u32> = pairs.iter().cloned().collect();
                for (k, v) in other.iter() {
                    nat.insert(*k, *v);
                }
                map = OrdMap::merge(&map, &other);
            }
            Action::Rebuild => {
                map = OrdMap::from_bridge(map.to_bridge());
            }
        }
        map.check_sane();
        assert_eq!(nat.len(), map.len());
        assert_eq!(nat.values().next_back(), map.get_max().ok());
        assert_eq!(nat.values().next(), map.get_min().ok());
    }
    for (a, b) in map.iter().zip(&nat) {
        assert_eq!(a, b);
    }
    for ((k1, v1), (k2, v2)) in map.into_iter().zip(nat) {
        assert_eq!(k1, k2);
        assert_eq!(*v1, v2);
    }
});
