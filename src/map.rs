use crate::error::{Error, Result};
use crate::hash::Djb2State;
use crate::raw::{self, InsertResult};

use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

pub use crate::raw::Stats;

/// The number of buckets a map starts with by default.
pub const DEFAULT_BUCKETS: usize = 2;

/// The number of records a bucket segment holds by default.
pub const DEFAULT_BUCKET_CAPACITY: usize = 2;

/// The default number of records per bucket past which the map expands.
pub const DEFAULT_GROWTH_FACTOR: f64 = 1.7;

/// A hash map based on linear hashing.
///
/// The map is made of a directory of buckets. Each bucket holds a fixed number
/// of records and links overflow segments of the same size when it fills up.
/// Instead of rehashing every record into a table twice as large, the map
/// grows one bucket at a time: whenever the number of records exceeds the
/// growth threshold, a single bucket is appended to the directory and the
/// records of one existing bucket, the one under the split pointer, are
/// divided between the two.
///
/// See [`LinearHashMap::builder`] for the available configuration.
pub struct LinearHashMap<K, V, S = Djb2State> {
    raw: raw::HashMap<K, V, S>,
}

/// A builder for a [`LinearHashMap`].
///
/// # Examples
///
/// ```rust
/// use linhash::{Djb2State, LinearHashMap};
///
/// let map: LinearHashMap<String, u64> = LinearHashMap::builder()
///     // Start with eight buckets.
///     .buckets(8)
///     // Hold four records per bucket segment.
///     .bucket_capacity(4)
///     // Expand once there are more than three records per bucket.
///     .growth_factor(3.0)
///     // Set the hasher.
///     .hasher(Djb2State)
///     // Construct the hash map.
///     .build();
///
/// assert_eq!(map.bucket_count(), 8);
/// ```
pub struct LinearHashMapBuilder<K, V, S = Djb2State> {
    hasher: S,
    buckets: usize,
    bucket_capacity: usize,
    growth_factor: f64,
    _kv: PhantomData<(K, V)>,
}

impl<K, V> LinearHashMapBuilder<K, V> {
    /// Set the hash builder used to hash keys.
    ///
    /// The default [`Djb2State`] is not randomly seeded, so an adversary who
    /// controls the keys can steer them all into a single bucket. Use a
    /// seeded hasher such as [`RandomState`](std::collections::hash_map::RandomState)
    /// when keys come from untrusted input.
    pub fn hasher<S>(self, hasher: S) -> LinearHashMapBuilder<K, V, S> {
        LinearHashMapBuilder {
            hasher,
            buckets: self.buckets,
            bucket_capacity: self.bucket_capacity,
            growth_factor: self.growth_factor,
            _kv: PhantomData,
        }
    }
}

impl<K, V, S> LinearHashMapBuilder<K, V, S> {
    /// Set the number of buckets the map starts with.
    ///
    /// The map never shrinks below this size. A value of 0 is treated as 1.
    pub fn buckets(self, buckets: usize) -> Self {
        LinearHashMapBuilder { buckets, ..self }
    }

    /// Set the number of records held by a bucket before it overflows.
    ///
    /// A value of 0 is treated as 1.
    pub fn bucket_capacity(self, bucket_capacity: usize) -> Self {
        LinearHashMapBuilder {
            bucket_capacity,
            ..self
        }
    }

    /// Set the growth factor of the map.
    ///
    /// An insert expands the map by one bucket when the number of records
    /// exceeds `floor(buckets * growth_factor)`.
    ///
    /// # Panics
    ///
    /// Panics if `growth_factor` is not a positive, finite number.
    pub fn growth_factor(self, growth_factor: f64) -> Self {
        assert!(
            growth_factor.is_finite() && growth_factor > 0.0,
            "growth factor must be positive and finite, got {growth_factor}"
        );

        LinearHashMapBuilder {
            growth_factor,
            ..self
        }
    }

    /// Construct a [`LinearHashMap`] from the builder, using the configured options.
    pub fn build(self) -> LinearHashMap<K, V, S> {
        LinearHashMap {
            raw: raw::HashMap::new(
                self.buckets.max(1),
                self.bucket_capacity.max(1),
                self.growth_factor,
                self.hasher,
            ),
        }
    }
}

impl<K, V, S> fmt::Debug for LinearHashMapBuilder<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinearHashMapBuilder")
            .field("buckets", &self.buckets)
            .field("bucket_capacity", &self.bucket_capacity)
            .field("growth_factor", &self.growth_factor)
            .finish()
    }
}

impl<K, V> LinearHashMap<K, V> {
    /// Creates an empty `LinearHashMap`.
    ///
    /// The map starts with two buckets of two records each, and expands once
    /// it holds more than 1.7 records per bucket.
    ///
    /// # Examples
    ///
    /// ```
    /// use linhash::LinearHashMap;
    /// let map: LinearHashMap<&str, i32> = LinearHashMap::new();
    /// assert_eq!(map.bucket_count(), 2);
    /// ```
    pub fn new() -> LinearHashMap<K, V> {
        LinearHashMap::builder().build()
    }

    /// Returns a builder for a `LinearHashMap`.
    ///
    /// The builder can be used for more complex configuration, such as the
    /// bucket capacity or growth factor.
    pub fn builder() -> LinearHashMapBuilder<K, V> {
        LinearHashMapBuilder {
            hasher: Djb2State,
            buckets: DEFAULT_BUCKETS,
            bucket_capacity: DEFAULT_BUCKET_CAPACITY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            _kv: PhantomData,
        }
    }
}

impl<K, V, S> Default for LinearHashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        LinearHashMap::with_hasher(S::default())
    }
}

impl<K, V, S> LinearHashMap<K, V, S> {
    /// Creates an empty `LinearHashMap` which will use the given hash builder
    /// to hash keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use linhash::LinearHashMap;
    /// use std::collections::hash_map::RandomState;
    ///
    /// let mut map = LinearHashMap::with_hasher(RandomState::new());
    /// map.insert(1, 2);
    /// ```
    pub fn with_hasher(hasher: S) -> LinearHashMap<K, V, S> {
        LinearHashMap::builder().hasher(hasher).build()
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use linhash::LinearHashMap;
    ///
    /// let mut map = LinearHashMap::new();
    ///
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert!(map.len() == 2);
    /// ```
    #[doc(alias = "record_count")]
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map is empty. Otherwise returns `false`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of buckets in the directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use linhash::LinearHashMap;
    ///
    /// let mut map = LinearHashMap::new();
    /// for (key, value) in [("a", 1), ("b", 2), ("c", 3)] {
    ///     map.insert(key, value);
    /// }
    /// // floor(2 * 1.7) = 3 records fit in the initial two buckets
    /// assert_eq!(map.bucket_count(), 2);
    ///
    /// map.insert("d", 4);
    /// assert_eq!(map.bucket_count(), 3);
    /// ```
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.raw.table().bucket_count()
    }

    /// Returns the current hashing level.
    ///
    /// The level is the smallest power of two no smaller than the bucket count.
    /// Keys are addressed by their hash modulo the level, or modulo half the
    /// level if the bucket they map to has not been created yet.
    #[inline]
    pub fn level(&self) -> usize {
        self.raw.table().level()
    }

    /// Returns the index of the bucket the next expansion will split.
    #[inline]
    pub fn split_pointer(&self) -> usize {
        self.raw.table().split_pointer()
    }

    /// Returns the number of records a bucket segment holds.
    #[inline]
    pub fn bucket_capacity(&self) -> usize {
        self.raw.table().bucket_capacity()
    }

    #[inline]
    pub fn growth_factor(&self) -> f64 {
        self.raw.table().growth_factor()
    }

    /// Returns the number of records in a bucket, overflow segments included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` is not a bucket of the directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use linhash::{Error, LinearHashMap};
    ///
    /// let mut map = LinearHashMap::new();
    /// map.insert("a", 1);
    ///
    /// let total: usize = (0..map.bucket_count())
    ///     .map(|i| map.bucket_len(i).unwrap())
    ///     .sum();
    /// assert_eq!(total, 1);
    ///
    /// assert_eq!(map.bucket_len(2), Err(Error::OutOfRange { index: 2, buckets: 2 }));
    /// ```
    #[inline]
    pub fn bucket_len(&self, index: usize) -> Result<usize> {
        self.bucket(index).map(|bucket| bucket.len())
    }

    /// Returns a view of a bucket and its overflow segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` is not a bucket of the directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use linhash::LinearHashMap;
    ///
    /// let mut map = LinearHashMap::new();
    /// map.insert("a", 1);
    ///
    /// let bucket = map.bucket(map.bucket_of("a")).unwrap();
    /// assert_eq!(bucket.iter().collect::<Vec<_>>(), [(&"a", &1)]);
    /// ```
    pub fn bucket(&self, index: usize) -> Result<BucketRef<'_, K, V>> {
        match self.raw.chain(index) {
            Some(chain) => Ok(BucketRef { index, chain }),
            None => Err(Error::OutOfRange {
                index,
                buckets: self.bucket_count(),
            }),
        }
    }

    /// An iterator visiting every bucket in directory order.
    pub fn buckets(&self) -> Buckets<'_, K, V, S> {
        Buckets {
            map: self,
            index: 0,
        }
    }

    /// Returns a snapshot of the layout of the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use linhash::LinearHashMap;
    ///
    /// let mut map = LinearHashMap::new();
    /// for i in 0..10 {
    ///     map.insert(i, i);
    /// }
    ///
    /// let stats = map.stats();
    /// assert_eq!(stats.records, 10);
    /// assert_eq!(stats.buckets, map.bucket_count());
    /// assert!(stats.longest_chain >= 1);
    /// ```
    #[inline]
    pub fn stats(&self) -> Stats {
        self.raw.stats()
    }

    /// An iterator visiting all key-value pairs in arbitrary order.
    /// The iterator element type is `(&K, &V)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linhash::LinearHashMap;
    ///
    /// let mut map = LinearHashMap::new();
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    ///
    /// for (key, val) in map.iter() {
    ///     println!("key: {key} val: {val}");
    /// }
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            raw: self.raw.iter(),
        }
    }

    /// An iterator visiting all key-value pairs in arbitrary order, with
    /// mutable references to the values.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            raw: self.raw.iter_mut(),
        }
    }

    /// An iterator visiting all keys in arbitrary order.
    /// The iterator element type is `&K`.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { iter: self.iter() }
    }

    /// An iterator visiting all values in arbitrary order.
    /// The iterator element type is `&V`.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { iter: self.iter() }
    }

    /// An iterator visiting all values mutably in arbitrary order.
    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            iter: self.iter_mut(),
        }
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all pairs `(k, v)` for which `f(&k, &mut v)` returns `false`.
    /// The directory keeps its size.
    ///
    /// # Examples
    ///
    /// ```
    /// use linhash::LinearHashMap;
    ///
    /// let mut map: LinearHashMap<i32, i32> = (0..8).map(|x| (x, x * 10)).collect();
    /// map.retain(|&k, _| k % 2 == 0);
    /// assert_eq!(map.len(), 4);
    /// ```
    #[inline]
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.raw.retain(f)
    }

    /// Clears the map, removing all key-value pairs.
    ///
    /// The directory shrinks back to the number of buckets the map was
    /// created with.
    ///
    /// # Examples
    ///
    /// ```
    /// use linhash::LinearHashMap;
    ///
    /// let mut map = LinearHashMap::new();
    /// for i in 0..16 {
    ///     map.insert(i, "a");
    /// }
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.bucket_count(), 2);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns a reference to the map's [`BuildHasher`].
    #[inline]
    pub fn hasher(&self) -> &S {
        &self.raw.hasher
    }
}

impl<K, V, S> LinearHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// The key may be any borrowed form of the map's key type, but
    /// [`Hash`] and [`Eq`] on the borrowed form *must* match those for
    /// the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use linhash::LinearHashMap;
    ///
    /// let mut map = LinearHashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.contains_key(&1), true);
    /// assert_eq!(map.contains_key(&2), false);
    /// ```
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key is hashed, addressed to its bucket, and looked up across the
    /// bucket's overflow segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use linhash::LinearHashMap;
    ///
    /// let mut map = LinearHashMap::new();
    /// map.insert("a", "1");
    /// assert_eq!(map.get("a"), Some(&"1"));
    /// assert_eq!(map.get("z"), None);
    /// ```
    #[doc(alias = "find")]
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.get(key).map(|(_, value)| value)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    #[inline]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use linhash::LinearHashMap;
    ///
    /// let mut map = LinearHashMap::new();
    /// map.insert(1, "a");
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.get_mut(key)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, [`None`] is returned. Inserting
    /// a new key may expand the map by one bucket before the record is placed.
    ///
    /// If the map did have this key present, the value is updated, and the old
    /// value is returned. The key is not updated, and the map does not grow.
    ///
    /// # Examples
    ///
    /// ```
    /// use linhash::LinearHashMap;
    ///
    /// let mut map = LinearHashMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map.get(&37), Some(&"c"));
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.replace(key, value)
    }

    /// Tries to insert a key-value pair into the map, and returns
    /// a reference to the value that was inserted.
    ///
    /// If the map already had this key present, nothing is updated, and
    /// an error containing the existing value is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linhash::LinearHashMap;
    ///
    /// let mut map = LinearHashMap::new();
    ///
    /// let inserted = map.try_insert(37, "a").unwrap();
    /// assert_eq!(inserted, &"a");
    ///
    /// let err = map.try_insert(37, "b").unwrap_err();
    /// assert_eq!(err.current, &"a");
    /// assert_eq!(err.not_inserted, "b");
    /// ```
    #[inline]
    pub fn try_insert(&mut self, key: K, value: V) -> std::result::Result<&mut V, OccupiedError<'_, V>> {
        match self.raw.insert(key, value) {
            InsertResult::Inserted(value) => Ok(value),
            InsertResult::Occupied {
                current,
                not_inserted,
            } => Err(OccupiedError {
                current,
                not_inserted: not_inserted.value,
            }),
        }
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// Removing a record compacts the overflow segments of its bucket. Removing
    /// a key that is not present leaves the map untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use linhash::LinearHashMap;
    ///
    /// let mut map = LinearHashMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    #[doc(alias = "delete")]
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.remove(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the
    /// key was previously in the map.
    #[inline]
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.raw.remove(key)
    }

    /// Returns the index of the bucket a key is addressed to.
    ///
    /// The key does not need to be present in the map.
    #[inline]
    pub fn bucket_of<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        self.raw.bucket_of(key)
    }
}

/// The error returned by [`LinearHashMap::try_insert`] when the key already exists.
///
/// Contains the existing value, and the value that was not inserted.
#[derive(Debug, PartialEq, Eq)]
pub struct OccupiedError<'a, V> {
    /// The value in the map that was already present.
    pub current: &'a mut V,
    /// The value which was not inserted, because the entry was already occupied.
    pub not_inserted: V,
}

impl<V> fmt::Display for OccupiedError<'_, V>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to insert {:?}, key occupied with value {:?}",
            self.not_inserted, self.current
        )
    }
}

impl<V> std::error::Error for OccupiedError<'_, V> where V: fmt::Debug {}

/// A view of a single bucket of a [`LinearHashMap`], overflow segments included.
///
/// Created by [`LinearHashMap::bucket`].
pub struct BucketRef<'a, K, V> {
    index: usize,
    chain: &'a raw::Chain<K, V>,
}

impl<'a, K, V> BucketRef<'a, K, V> {
    /// The position of this bucket in the directory.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The number of records in the bucket, across all of its segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// The number of segments in the bucket, the bucket itself included.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.chain.segments().len()
    }

    /// The number of records held by each segment, in chain order.
    ///
    /// Every segment but the last is full.
    pub fn segment_lens(&self) -> impl Iterator<Item = usize> + 'a {
        self.chain.segments().iter().map(raw::Segment::len)
    }

    /// An iterator over the records of the bucket, in segment order.
    #[inline]
    pub fn iter(&self) -> Iter<'a, K, V> {
        Iter {
            raw: self.chain.iter(),
        }
    }
}

impl<K, V> fmt::Debug for BucketRef<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = self
            .chain
            .segments()
            .iter()
            .map(|segment| {
                segment
                    .records()
                    .iter()
                    .map(|record| (&record.key, &record.value))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        f.debug_struct("Bucket")
            .field("index", &self.index)
            .field("segments", &segments)
            .finish()
    }
}

impl<'a, K, V> IntoIterator for BucketRef<'a, K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the buckets of a [`LinearHashMap`].
pub struct Buckets<'a, K, V, S> {
    map: &'a LinearHashMap<K, V, S>,
    index: usize,
}

impl<'a, K, V, S> Iterator for Buckets<'a, K, V, S> {
    type Item = BucketRef<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let bucket = self.map.bucket(self.index).ok()?;
        self.index += 1;
        Some(bucket)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.map.bucket_count() - self.index;
        (remaining, Some(remaining))
    }
}

impl<K, V, S> ExactSizeIterator for Buckets<'_, K, V, S> {}

impl<K, V, S> PartialEq for LinearHashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.iter()
            .all(|(key, value)| other.get(key).map_or(false, |v| *value == *v))
    }
}

impl<K, V, S> Eq for LinearHashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> fmt::Debug for LinearHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Clone for LinearHashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> LinearHashMap<K, V, S> {
        LinearHashMap {
            raw: self.raw.clone(),
        }
    }
}

impl<K, V, S> Extend<(K, V)> for LinearHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for LinearHashMap<K, V, S>
where
    K: Copy + Hash + Eq,
    V: Copy,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K, V, S> FromIterator<(K, V)> for LinearHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = LinearHashMap::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a LinearHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut LinearHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for LinearHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            raw: self.raw.into_table().into_iter(),
        }
    }
}

/// An iterator over a map's entries.
///
/// See [`LinearHashMap::iter`] for details.
pub struct Iter<'a, K, V> {
    raw: raw::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next().map(|record| (&record.key, &record.value))
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Iter<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// A mutable iterator over a map's entries.
///
/// See [`LinearHashMap::iter_mut`] for details.
pub struct IterMut<'a, K, V> {
    raw: raw::IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.raw
            .next()
            .map(|record| (&record.key, &mut record.value))
    }
}

/// An owned iterator over a map's entries.
pub struct IntoIter<K, V> {
    raw: raw::IntoIter<K, V>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next().map(|record| (record.key, record.value))
    }
}

/// An iterator over a map's keys.
///
/// See [`LinearHashMap::keys`] for details.
pub struct Keys<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (key, _) = self.iter.next()?;
        Some(key)
    }
}

/// An iterator over a map's values.
///
/// See [`LinearHashMap::values`] for details.
pub struct Values<'a, K, V> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (_, value) = self.iter.next()?;
        Some(value)
    }
}

/// A mutable iterator over a map's values.
pub struct ValuesMut<'a, K, V> {
    iter: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let (_, value) = self.iter.next()?;
        Some(value)
    }
}
