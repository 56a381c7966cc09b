#![no_main]

use std::collections::HashMap as NatMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use twinmap::HashMap;

#[derive(Arbitrary, Debug)]
enum Action<K, V> {
    Insert(K, V),
    Remove(K),
    Merge(Vec<(K, V)>),
    Clear,
}

fuzz_target!(|actions: Vec<Action<u32, u32>>| {
    let mut map = HashMap::new();
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
                let other: HashMap<u32, u32> = pairs.iter().cloned().collect();
                for (k, v) in other.iter() {
                    nat.entry(*k).or_insert(*v);
                }
                map = HashMap::merge(&map, &other);
            }
            Action::Clear => {
                nat.clear();
                map.clear();
            }
        }
        map.check_sane();
        assert_eq!(nat.len(), map.len());
    }
    assert_eq!(HashMap::from(nat.clone()), map);
    assert_eq!(map.iter().count(), nat.len());
    let drained: NatMap<u32, u32> = map.into_iter().map(|(k, v)| (k, *v)).collect();
    assert_eq!(drained, nat);
});
