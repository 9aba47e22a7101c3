#![doc = include_str!("../README.md")]

mod error;
mod hash;
mod map;
mod raw;

#[cfg(feature = "serde")]
mod serde_impls;

pub use error::{Error, Result};
pub use hash::{djb2, Djb2Hasher, Djb2State};
pub use map::{
    BucketRef, Buckets, IntoIter, Iter, IterMut, Keys, LinearHashMap, LinearHashMapBuilder,
    OccupiedError, Stats, Values, ValuesMut, DEFAULT_BUCKETS, DEFAULT_BUCKET_CAPACITY,
    DEFAULT_GROWTH_FACTOR,
};
