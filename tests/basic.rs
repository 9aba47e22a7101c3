use linhash::LinearHashMap;

use std::hash::{BuildHasherDefault, Hasher};
use std::rc::Rc;

mod common;
use common::{check_layout, with_map, with_map_hasher};

#[test]
fn new() {
    with_map::<usize, usize>(|map| drop(map()));
}

#[test]
fn clear() {
    with_map::<usize, usize>(|map| {
        let mut map = map();
        let buckets = map.bucket_count();
        for i in 0..64 {
            map.insert(i, 1);
        }
        assert!(map.bucket_count() > buckets);

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.bucket_count(), buckets);
        assert!(map.get(&0).is_none());
        check_layout(&map);

        map.insert(0, 2);
        assert_eq!(map.get(&0), Some(&2));
    });
}

#[test]
fn insert() {
    with_map::<usize, usize>(|map| {
        let mut map = map();
        let old = map.insert(42, 0);
        assert!(old.is_none());
        assert_eq!(map.len(), 1);
    });
}

#[test]
fn get_empty() {
    with_map::<usize, usize>(|map| {
        let map = map();
        let e = map.get(&42);
        assert!(e.is_none());
    });
}

#[test]
fn get_key_value_empty() {
    with_map::<usize, usize>(|map| {
        let map = map();
        let e = map.get_key_value(&42);
        assert!(e.is_none());
    });
}

#[test]
fn remove_empty() {
    with_map::<usize, usize>(|map| {
        let mut map = map();
        let old = map.remove(&42);
        assert!(old.is_none());
        assert_eq!(map.len(), 0);
    });
}

#[test]
fn insert_and_remove() {
    with_map::<usize, usize>(|map| {
        let mut map = map();
        map.insert(42, 0);
        let old = map.remove(&42).unwrap();
        assert_eq!(old, 0);
        assert!(map.get(&42).is_none());
        assert!(map.is_empty());
    });
}

#[test]
fn insert_and_get() {
    with_map::<usize, usize>(|map| {
        let mut map = map();
        map.insert(42, 0);

        let e = map.get(&42).unwrap();
        assert_eq!(e, &0);
    });
}

#[test]
fn insert_and_get_key_value() {
    with_map::<usize, usize>(|map| {
        let mut map = map();
        map.insert(42, 0);

        let e = map.get_key_value(&42).unwrap();
        assert_eq!(e, (&42, &0));
    });
}

#[test]
fn reinsert() {
    with_map::<usize, usize>(|map| {
        let mut map = map();
        map.insert(42, 0);
        let buckets = map.bucket_count();

        let old = map.insert(42, 1);
        assert_eq!(old, Some(0));
        assert_eq!(map.get(&42), Some(&1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.bucket_count(), buckets);
    });
}

#[test]
fn get_mut() {
    with_map::<usize, usize>(|map| {
        let mut map = map();
        map.insert(42, 0);
        *map.get_mut(&42).unwrap() += 1;
        assert_eq!(map.get(&42), Some(&1));
    });
}

#[test]
fn get_mut_empty() {
    with_map::<usize, usize>(|map| {
        let mut map = map();
        assert!(map.get_mut(&42).is_none());
        assert!(map.get(&42).is_none());
    });
}

#[test]
fn try_insert() {
    with_map::<usize, usize>(|map| {
        let mut map = map();

        assert_eq!(map.try_insert(42, 0), Ok(&mut 0));

        let err = map.try_insert(42, 1).unwrap_err();
        assert_eq!(*err.current, 0);
        assert_eq!(err.not_inserted, 1);

        assert_eq!(map.get(&42), Some(&0));
        assert_eq!(map.len(), 1);
    });
}

#[test]
fn remove_entry() {
    with_map::<String, usize>(|map| {
        let mut map = map();
        map.insert("foo".to_owned(), 1);

        assert_eq!(map.remove_entry("foo"), Some(("foo".to_owned(), 1)));
        assert_eq!(map.remove_entry("foo"), None);
    });
}

#[test]
fn borrowed_keys() {
    with_map::<String, usize>(|map| {
        let mut map = map();
        map.insert("foo".to_owned(), 1);

        assert!(map.contains_key("foo"));
        assert_eq!(map.get("foo"), Some(&1));
        assert_eq!(map.get_key_value("foo"), Some((&"foo".to_owned(), &1)));
        assert!(!map.contains_key("bar"));
        assert_eq!(map.remove("foo"), Some(1));
    });
}

#[test]
fn current_kv_dropped() {
    let dropped1 = Rc::new(0);
    let dropped2 = Rc::new(0);

    with_map::<Rc<usize>, Rc<usize>>(|map| {
        let mut map = map();
        map.insert(dropped1.clone(), dropped2.clone());
        assert_eq!(Rc::strong_count(&dropped1), 2);
        assert_eq!(Rc::strong_count(&dropped2), 2);

        drop(map);

        assert_eq!(Rc::strong_count(&dropped1), 1);
        assert_eq!(Rc::strong_count(&dropped2), 1);
    });
}

#[test]
fn replaced_value_dropped() {
    let old = Rc::new(0);

    with_map::<usize, Rc<usize>>(|map| {
        let mut map = map();
        map.insert(0, old.clone());
        assert_eq!(Rc::strong_count(&old), 2);

        let replaced = map.insert(0, Rc::new(1));
        drop(replaced);
        assert_eq!(Rc::strong_count(&old), 1);
    });
}

#[test]
fn empty_maps_equal() {
    with_map::<usize, usize>(|map1| {
        with_map::<usize, usize>(|map2| {
            let (map1, map2) = (map1(), map2());
            assert_eq!(map1, map2);
            assert_eq!(map2, map1);
        });
    });
}

#[test]
fn different_size_maps_not_equal() {
    with_map::<usize, usize>(|map1| {
        with_map::<usize, usize>(|map2| {
            let (mut map1, mut map2) = (map1(), map2());

            map1.insert(1, 0);
            map1.insert(2, 0);
            map1.insert(3, 0);

            map2.insert(1, 0);
            map2.insert(2, 0);

            assert_ne!(map1, map2);
            assert_ne!(map2, map1);
        });
    });
}

#[test]
fn same_values_equal() {
    with_map::<usize, usize>(|map1| {
        with_map::<usize, usize>(|map2| {
            let (mut map1, mut map2) = (map1(), map2());

            // Equality does not depend on the layout of either map.
            for i in 0..32 {
                map1.insert(i, i);
                map2.insert(31 - i, 31 - i);
            }

            assert_eq!(map1, map2);
            assert_eq!(map2, map1);
        });
    });
}

#[test]
fn different_values_not_equal() {
    with_map::<usize, usize>(|map1| {
        with_map::<usize, usize>(|map2| {
            let (mut map1, mut map2) = (map1(), map2());

            map1.insert(1, 0);
            map2.insert(1, 1);

            assert_ne!(map1, map2);
            assert_ne!(map2, map1);
        });
    });
}

#[test]
fn clone_map_empty() {
    with_map::<&'static str, u32>(|map| {
        let map = map();
        let cloned_map = map.clone();
        assert_eq!(map.len(), cloned_map.len());
        assert_eq!(&map, &cloned_map);
        assert_eq!(cloned_map.len(), 0);
    });
}

#[test]
// Test that same values exists in both maps (original and cloned)
fn clone_map_filled() {
    with_map::<&'static str, u32>(|map| {
        let mut map = map();
        map.insert("FooKey", 0);
        map.insert("BarKey", 10);
        let cloned_map = map.clone();
        assert_eq!(map.len(), cloned_map.len());
        assert_eq!(map.bucket_count(), cloned_map.bucket_count());
        assert_eq!(&map, &cloned_map);

        // test that we are not sharing buckets
        map.insert("NewItem", 100);
        assert_ne!(&map, &cloned_map);
        assert!(cloned_map.get("NewItem").is_none());
    });
}

#[test]
fn default() {
    let mut map: LinearHashMap<usize, usize> = LinearHashMap::default();
    map.insert(42, 0);

    assert_eq!(map.get(&42), Some(&0));
    assert_eq!(map.bucket_count(), linhash::DEFAULT_BUCKETS);
    assert_eq!(map.bucket_capacity(), linhash::DEFAULT_BUCKET_CAPACITY);
}

#[test]
fn builder_clamps_sizes() {
    let mut map: LinearHashMap<usize, usize> = LinearHashMap::builder()
        .buckets(0)
        .bucket_capacity(0)
        .build();

    assert_eq!(map.bucket_count(), 1);
    assert_eq!(map.bucket_capacity(), 1);

    for i in 0..16 {
        map.insert(i, i);
    }
    check_layout(&map);
}

#[test]
#[should_panic]
fn builder_rejects_zero_growth_factor() {
    let _ = LinearHashMap::<usize, usize>::builder().growth_factor(0.0);
}

#[test]
#[should_panic]
fn builder_rejects_nan_growth_factor() {
    let _ = LinearHashMap::<usize, usize>::builder().growth_factor(f64::NAN);
}

#[test]
fn debug() {
    with_map::<usize, usize>(|map| {
        let mut map = map();
        map.insert(42, 0);
        map.insert(16, 8);

        let formatted = format!("{:?}", map);

        assert!(formatted == "{42: 0, 16: 8}" || formatted == "{16: 8, 42: 0}");
    });
}

#[test]
fn extend() {
    with_map::<usize, usize>(|map| {
        let mut map = map();

        let mut entries: Vec<(usize, usize)> = vec![(42, 0), (16, 6), (38, 42)];
        entries.sort_unstable();

        map.extend(entries.clone().into_iter());

        let mut collected: Vec<(usize, usize)> =
            map.iter().map(|(key, value)| (*key, *value)).collect();
        collected.sort_unstable();

        assert_eq!(entries, collected);
    });
}

#[test]
fn extend_ref() {
    with_map::<usize, usize>(|map| {
        let mut map = map();

        let mut entries: Vec<(&usize, &usize)> = vec![(&42, &0), (&16, &6), (&38, &42)];
        entries.sort();

        map.extend(entries.clone().into_iter());

        let mut collected: Vec<(&usize, &usize)> = map.iter().collect();
        collected.sort();

        assert_eq!(entries, collected);
    });
}

#[test]
fn from_iter_empty() {
    use std::iter::FromIterator;

    let entries: Vec<(usize, usize)> = Vec::new();
    let map: LinearHashMap<usize, usize> = LinearHashMap::from_iter(entries.into_iter());

    assert_eq!(map.len(), 0)
}

#[test]
fn from_iter_duplicates() {
    let map: LinearHashMap<usize, usize> = vec![(1, 1), (2, 2), (1, 3)].into_iter().collect();

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&1), Some(&3));
}

#[test]
fn len() {
    with_map::<usize, usize>(|map| {
        let mut map = map();
        let len = if cfg!(miri) { 100 } else { 10_000 };
        for i in 0..len {
            map.insert(i, i + 1);
        }
        assert_eq!(map.len(), len);
        check_layout(&map);
    });
}

#[test]
fn iter() {
    with_map::<usize, usize>(|map| {
        let mut map = map();
        let len = if cfg!(miri) { 100 } else { 10_000 };
        for i in 0..len {
            assert_eq!(map.insert(i, i + 1), None);
        }

        let v: Vec<_> = (0..len).map(|i| (i, i + 1)).collect();
        let mut got: Vec<_> = map.iter().map(|(&k, &v)| (k, v)).collect();
        got.sort();
        assert_eq!(v, got);
    });
}

#[test]
fn keys_and_values() {
    with_map::<usize, usize>(|map| {
        let mut map = map();
        for i in 0..100 {
            map.insert(i, i * 2);
        }

        let mut keys: Vec<_> = map.keys().copied().collect();
        keys.sort();
        assert_eq!(keys, (0..100).collect::<Vec<_>>());

        let mut values: Vec<_> = map.values().copied().collect();
        values.sort();
        assert_eq!(values, (0..100).map(|i| i * 2).collect::<Vec<_>>());
    });
}

#[test]
fn values_mut() {
    with_map::<usize, usize>(|map| {
        let mut map = map();
        for i in 0..100 {
            map.insert(i, i);
        }

        for value in map.values_mut() {
            *value += 1;
        }
        for (_, value) in &mut map {
            *value *= 2;
        }

        for i in 0..100 {
            assert_eq!(map.get(&i), Some(&((i + 1) * 2)));
        }
    });
}

#[test]
fn into_iter() {
    with_map::<usize, usize>(|map| {
        let mut map = map();
        for i in 0..100 {
            map.insert(i, i + 1);
        }

        let mut got: Vec<_> = map.into_iter().collect();
        got.sort();
        assert_eq!(got, (0..100).map(|i| (i, i + 1)).collect::<Vec<_>>());
    });
}

#[test]
fn retain() {
    with_map::<usize, usize>(|map| {
        let mut map = map();
        for i in 0..200 {
            map.insert(i, i);
        }
        let buckets = map.bucket_count();

        map.retain(|&k, v| {
            *v += 1;
            k % 3 == 0
        });

        assert_eq!(map.len(), 67);
        assert_eq!(map.bucket_count(), buckets);
        for i in 0..200 {
            if i % 3 == 0 {
                assert_eq!(map.get(&i), Some(&(i + 1)));
            } else {
                assert!(map.get(&i).is_none());
            }
        }
        check_layout(&map);
    });
}

#[test]
fn mixed() {
    const LEN: usize = if cfg!(miri) { 48 } else { 1024 };
    with_map::<usize, usize>(|map| {
        let mut map = map();
        assert!(map.get(&100).is_none());
        map.insert(100, 101);
        assert_eq!(map.get(&100), Some(&101));
        *map.get_mut(&100).unwrap() += 2;
        assert_eq!(map.get(&100), Some(&103));

        assert!(map.get(&200).is_none());
        map.insert(200, 202);
        assert_eq!(map.get(&200), Some(&202));

        assert!(map.get(&300).is_none());

        assert_eq!(map.remove(&100), Some(103));
        assert_eq!(map.remove(&200), Some(202));
        assert!(map.remove(&300).is_none());

        assert!(map.get(&100).is_none());
        assert!(map.get(&200).is_none());
        assert!(map.get(&300).is_none());

        for i in 0..LEN {
            assert_eq!(map.insert(i, i + 1), None);
        }

        for i in 0..LEN {
            assert_eq!(map.get(&i), Some(&(i + 1)));
        }

        for i in 0..LEN {
            assert_eq!(map.insert(i, i), Some(i + 1));
        }

        for i in 0..LEN {
            assert_eq!(map.get(&i), Some(&i));
        }

        for i in 0..LEN {
            assert_eq!(map.remove(&i), Some(i));
        }

        for i in 0..LEN {
            assert_eq!(map.get(&i), None);
        }
        check_layout(&map);

        for i in 0..(LEN * 2) {
            assert_eq!(map.insert(i, i + 1), None);
        }

        for i in 0..(LEN * 2) {
            assert_eq!(map.get(&i), Some(&(i + 1)));
        }
        check_layout(&map);
    });
}

// run tests with hashers that address every key to the same bucket
mod hasher {
    use super::*;

    fn check<S: Default + Clone + std::hash::BuildHasher>() {
        let range = if cfg!(miri) { 0..16 } else { 0..100 };

        with_map_hasher::<i32, i32, S>(S::default(), |map| {
            let mut map = map();
            for i in range.clone() {
                map.insert(i, i);
            }

            assert!(!map.contains_key(&i32::MIN));
            assert!(!map.contains_key(&(range.start - 1)));
            for i in range.clone() {
                assert!(map.contains_key(&i));
            }
            assert!(!map.contains_key(&range.end));
            assert!(!map.contains_key(&i32::MAX));
            check_layout(&map);

            for i in range.clone().step_by(2) {
                assert_eq!(map.remove(&i), Some(i));
            }
            for i in range.clone() {
                assert_eq!(map.contains_key(&i), i % 2 != 0);
            }
            check_layout(&map);
        });
    }

    #[test]
    fn test_zero_hasher() {
        #[derive(Default)]
        pub struct ZeroHasher;

        impl Hasher for ZeroHasher {
            fn finish(&self) -> u64 {
                0
            }

            fn write(&mut self, _: &[u8]) {}
        }

        check::<BuildHasherDefault<ZeroHasher>>();
    }

    #[test]
    fn test_max_hasher() {
        #[derive(Default)]
        struct MaxHasher;

        impl Hasher for MaxHasher {
            fn finish(&self) -> u64 {
                u64::MAX
            }

            fn write(&mut self, _: &[u8]) {}
        }

        check::<BuildHasherDefault<MaxHasher>>();
    }
}
