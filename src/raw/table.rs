use std::mem;

use super::bucket::{self, Chain, Record};

/// A linear hashing table.
///
/// The table is agnostic to how keys are hashed: callers pass the hash of the
/// key they operate on, along with a hash function used to redistribute
/// records when a bucket is split.
#[derive(Clone, Debug)]
pub struct Table<K, V> {
    // One chain per logical bucket.
    directory: Vec<Chain<K, V>>,

    // The smallest power of two at least as large as the directory.
    level: usize,

    // The number of records across all chains.
    len: usize,

    // The number of records held by a single bucket segment.
    bucket_capacity: usize,

    // The table expands once it holds more than `growth_factor` records per bucket.
    growth_factor: f64,

    // The number of buckets the table was created with.
    initial_buckets: usize,
}

/// A snapshot of the table layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stats {
    /// The number of records in the table.
    pub records: usize,

    /// The number of buckets in the directory.
    pub buckets: usize,

    /// The current hashing level, a power of two.
    pub level: usize,

    /// The bucket the next expansion will split.
    pub split_pointer: usize,

    /// The number of segments across all buckets, including overflow.
    pub segments: usize,

    /// The number of segments in the longest bucket chain.
    pub longest_chain: usize,

    /// The average number of records per bucket.
    pub load_factor: f64,
}

impl<K, V> Table<K, V> {
    /// Creates a table with `buckets` empty buckets.
    pub fn new(buckets: usize, bucket_capacity: usize, growth_factor: f64) -> Table<K, V> {
        debug_assert!(buckets > 0 && bucket_capacity > 0);

        Table {
            directory: (0..buckets).map(|_| Chain::new(bucket_capacity)).collect(),
            level: buckets.next_power_of_two(),
            len: 0,
            bucket_capacity,
            growth_factor,
            initial_buckets: buckets,
        }
    }

    /// Returns the number of records in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of buckets in the directory.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.directory.len()
    }

    #[inline]
    pub fn level(&self) -> usize {
        self.level
    }

    #[inline]
    pub fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    #[inline]
    pub fn growth_factor(&self) -> f64 {
        self.growth_factor
    }

    /// Returns the bucket that the next expansion will split.
    #[inline]
    pub fn split_pointer(&self) -> usize {
        if self.directory.len() == self.level {
            // the round is complete, the next one starts over from the first bucket
            0
        } else {
            self.directory.len() - self.level / 2
        }
    }

    /// Returns the chain at the given directory index.
    #[inline]
    pub fn chain(&self, index: usize) -> Option<&Chain<K, V>> {
        self.directory.get(index)
    }

    /// Maps a hash to its bucket.
    ///
    /// Hashes are taken modulo the current level. Addresses past the end of
    /// the directory belong to buckets that have not been split yet, and
    /// fall back to the address they had in the previous level.
    #[inline]
    pub fn index(&self, hash: u64) -> usize {
        let index = (hash % self.level as u64) as usize;

        if index >= self.directory.len() {
            index - self.level / 2
        } else {
            index
        }
    }

    /// Returns the record whose key matches in the bucket addressed by `hash`.
    #[inline]
    pub fn find(&self, hash: u64, eq: impl FnMut(&K) -> bool) -> Option<&Record<K, V>> {
        self.directory[self.index(hash)].find(eq)
    }

    /// Returns the record whose key matches in the bucket addressed by `hash`, mutably.
    #[inline]
    pub fn find_mut(&mut self, hash: u64, eq: impl FnMut(&K) -> bool) -> Option<&mut Record<K, V>> {
        let index = self.index(hash);
        self.directory[index].find_mut(eq)
    }

    /// Inserts a record whose key is not yet in the table.
    ///
    /// The table expands before the record is placed if the new record
    /// count exceeds the growth threshold.
    pub fn insert(
        &mut self,
        hash: u64,
        record: Record<K, V>,
        hasher: impl Fn(&K) -> u64,
    ) -> &mut Record<K, V> {
        self.len += 1;

        if self.should_expand() {
            self.expand(hasher);
        }

        let index = self.index(hash);
        self.directory[index].push(record)
    }

    /// Removes the record whose key matches in the bucket addressed by `hash`.
    pub fn remove(&mut self, hash: u64, eq: impl FnMut(&K) -> bool) -> Option<Record<K, V>> {
        let index = self.index(hash);
        let record = self.directory[index].remove(eq)?;

        self.len -= 1;
        Some(record)
    }

    /// Keeps only the records for which `f` returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(&K, &mut V) -> bool) {
        for chain in &mut self.directory {
            self.len -= chain.retain(&mut f);
        }
    }

    /// Removes every record and shrinks the directory back to its initial size.
    pub fn clear(&mut self) {
        *self = Table::new(
            self.initial_buckets,
            self.bucket_capacity,
            self.growth_factor,
        );
    }

    /// Returns a snapshot of the table layout.
    pub fn stats(&self) -> Stats {
        let segments = self.directory.iter().map(|chain| chain.segments().len());

        Stats {
            records: self.len,
            buckets: self.directory.len(),
            level: self.level,
            split_pointer: self.split_pointer(),
            segments: segments.clone().sum(),
            longest_chain: segments.max().unwrap_or(0),
            load_factor: self.len as f64 / self.directory.len() as f64,
        }
    }

    #[inline]
    pub fn iter(&self) -> bucket::Iter<'_, K, V> {
        bucket::Iter::new(&self.directory)
    }

    #[inline]
    pub fn iter_mut(&mut self) -> bucket::IterMut<'_, K, V> {
        bucket::IterMut::new(&mut self.directory)
    }

    // Whether the record count has outgrown the directory.
    #[inline]
    fn should_expand(&self) -> bool {
        let threshold = (self.directory.len() as f64 * self.growth_factor).floor() as usize;
        threshold < self.len
    }

    // Appends a bucket to the directory and splits the bucket under the split
    // pointer between itself and the new bucket.
    fn expand(&mut self, hasher: impl Fn(&K) -> u64) {
        let new = self.directory.len();
        if new == self.level {
            self.level <<= 1;
        }

        self.directory.push(Chain::new(self.bucket_capacity));
        let split = new - self.level / 2;

        let chain = mem::replace(&mut self.directory[split], Chain::new(self.bucket_capacity));

        let mut moved = 0;
        for record in chain {
            if (hasher(&record.key) % self.level as u64) as usize == new {
                self.directory[new].insert(record);
                moved += 1;
            } else {
                self.directory[split].insert(record);
            }
        }

        log::debug!(
            "Split bucket {split} into bucket {new} ({moved} records moved, level {})",
            self.level
        );
    }
}

impl<K, V> Table<K, V>
where
    K: Eq,
{
    /// Inserts a record unless its key is already present.
    ///
    /// On conflict the record is handed back along with the one already in the table.
    pub fn try_insert(
        &mut self,
        hash: u64,
        record: Record<K, V>,
        hasher: impl Fn(&K) -> u64,
    ) -> Result<&mut Record<K, V>, (Record<K, V>, &mut Record<K, V>)> {
        let index = self.index(hash);

        if let Some(position) = self.directory[index].position(|key| *key == record.key) {
            let current = self.directory[index].record_mut(position);
            return Err((record, current));
        }

        Ok(self.insert(hash, record, hasher))
    }
}

impl<K, V> IntoIterator for Table<K, V> {
    type Item = Record<K, V>;
    type IntoIter = bucket::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        bucket::IntoIter::new(self.directory)
    }
}
