#![allow(dead_code)]

use linhash::{Djb2State, LinearHashMap};

use std::hash::{BuildHasher, Hash};

// Run the test on different configurations of a `LinearHashMap`.
pub fn with_map<K, V>(test: impl FnMut(&dyn Fn() -> LinearHashMap<K, V>)) {
    with_map_hasher(Djb2State, test);
}

// Run the test on different configurations of a `LinearHashMap` using the given hasher.
pub fn with_map_hasher<K, V, S: Clone>(
    hasher: S,
    mut test: impl FnMut(&dyn Fn() -> LinearHashMap<K, V, S>),
) {
    // The default configuration.
    test(&(|| LinearHashMap::builder().hasher(hasher.clone()).build()));

    // Single-record segments and an eager growth factor, so buckets overflow and split constantly.
    test(
        &(|| {
            LinearHashMap::builder()
                .hasher(hasher.clone())
                .buckets(1)
                .bucket_capacity(1)
                .growth_factor(0.5)
                .build()
        }),
    );

    // Large segments with a lazy growth factor, so chains grow long before a split relieves them.
    test(
        &(|| {
            LinearHashMap::builder()
                .hasher(hasher.clone())
                .buckets(1)
                .bucket_capacity(16)
                .growth_factor(8.0)
                .build()
        }),
    );

    // An initial size that is not a power of two.
    test(
        &(|| {
            LinearHashMap::builder()
                .hasher(hasher.clone())
                .buckets(5)
                .bucket_capacity(3)
                .growth_factor(1.0)
                .build()
        }),
    );
}

// Asserts the structural invariants of the map.
pub fn check_layout<K, V, S>(map: &LinearHashMap<K, V, S>)
where
    K: Hash + Eq + std::fmt::Debug,
    S: BuildHasher,
{
    let level = map.level();
    assert!(level.is_power_of_two());
    assert!(level >= map.bucket_count() && level / 2 < map.bucket_count());
    assert!(map.split_pointer() < map.bucket_count());

    let mut total = 0;
    for bucket in map.buckets() {
        let lens = bucket.segment_lens().collect::<Vec<_>>();
        let (last, full) = lens.split_last().expect("bucket without a segment");

        assert!(
            full.iter().all(|&len| len == map.bucket_capacity()),
            "bucket {} has a partial segment before its tail: {lens:?}",
            bucket.index()
        );
        assert!(*last <= map.bucket_capacity());

        for (key, _) in bucket.iter() {
            assert_eq!(
                map.bucket_of(key),
                bucket.index(),
                "{key:?} stored in the wrong bucket"
            );
        }

        total += bucket.len();
    }

    assert_eq!(total, map.len());
}

// Prints a log message if `RUST_LOG=debug` is set.
#[macro_export]
macro_rules! debug {
    ($($x:tt)*) => {
        if std::env::var("RUST_LOG").as_deref() == Ok("debug") {
            println!($($x)*);
        }
    };
}
