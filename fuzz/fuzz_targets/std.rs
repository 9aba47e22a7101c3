#![no_main]

use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use linhash::LinearHashMap;
use std::collections::HashMap as StdHashMap;
use std::hash::{BuildHasher, Hash};

#[derive(Debug, Arbitrary)]
enum Operation<K, V> {
    Insert(K, V),
    TryInsert(K, V),
    Remove(K),
    Get(K),
    GetMut(K, V),
    Contains(K),
    Retain(V),
    Clear,
    Len,
    IsEmpty,
    Bucket(usize),
}

#[derive(Debug, Arbitrary)]
struct Config {
    buckets: u8,
    bucket_capacity: u8,
    growth_factor: u8,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    config: Config,
    operations: Vec<Operation<u16, u32>>,
}

fn fuzz_hashmap(input: FuzzInput) {
    let config = input.config;
    let mut std_map = StdHashMap::new();
    let mut map: LinearHashMap<u16, u32> = LinearHashMap::builder()
        .buckets(usize::from(config.buckets % 16))
        .bucket_capacity(usize::from(config.bucket_capacity % 8))
        .growth_factor(f64::from(config.growth_factor % 32 + 1) / 4.0)
        .build();

    for op in input.operations {
        match op {
            Operation::Insert(k, v) => {
                let std_result = std_map.insert(k, v);
                let result = map.insert(k, v);
                assert_eq!(std_result, result);
            }
            Operation::TryInsert(k, v) => match map.try_insert(k, v) {
                Ok(inserted) => {
                    assert_eq!(*inserted, v);
                    assert!(std_map.insert(k, v).is_none());
                }
                Err(err) => {
                    assert_eq!(Some(&*err.current), std_map.get(&k));
                    assert_eq!(err.not_inserted, v);
                }
            },
            Operation::Remove(k) => {
                let std_result = std_map.remove(&k);
                let result = map.remove(&k);
                assert_eq!(std_result, result);
            }
            Operation::Get(k) => {
                assert_eq!(std_map.get(&k), map.get(&k));
            }
            Operation::GetMut(k, v) => {
                if let Some(e) = std_map.get_mut(&k) {
                    *e = e.wrapping_add(v);
                }
                if let Some(e) = map.get_mut(&k) {
                    *e = e.wrapping_add(v);
                }
                assert_eq!(std_map.get(&k), map.get(&k));
            }
            Operation::Contains(k) => {
                assert_eq!(std_map.contains_key(&k), map.contains_key(&k));
            }
            Operation::Retain(v) => {
                std_map.retain(|_, e| *e > v);
                map.retain(|_, e| *e > v);
            }
            Operation::Clear => {
                std_map.clear();
                map.clear();
            }
            Operation::Len => {
                assert_eq!(std_map.len(), map.len());
            }
            Operation::IsEmpty => {
                assert_eq!(std_map.is_empty(), map.is_empty());
            }
            Operation::Bucket(i) => {
                assert_eq!(map.bucket(i).is_ok(), i < map.bucket_count());
            }
        }

        check_layout(&map);
    }

    // Final consistency checks
    for (k, v) in std_map.iter() {
        assert_eq!(Some(v), map.get(k));
    }
    assert_eq!(std_map.len(), map.len());
    assert_eq!(std_map.is_empty(), map.is_empty());
}

fn check_layout<K, V, S>(map: &LinearHashMap<K, V, S>)
where
    K: Hash + Eq,
    S: BuildHasher,
{
    assert!(map.level() >= map.bucket_count() && map.level() / 2 < map.bucket_count());

    let mut total = 0;
    for bucket in map.buckets() {
        let lens = bucket.segment_lens().collect::<Vec<_>>();
        if let Some((_, full)) = lens.split_last() {
            assert!(full.iter().all(|&len| len == map.bucket_capacity()));
        }

        for (key, _) in bucket.iter() {
            assert_eq!(map.bucket_of(key), bucket.index());
        }
        total += bucket.len();
    }
    assert_eq!(total, map.len());
}

fuzz_target!(|data: FuzzInput| {
    fuzz_hashmap(data);
});
