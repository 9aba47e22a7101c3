use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use std::mem;

use super::bucket::{self, Chain, Record};
use super::table::{Stats, Table};

/// A linear hashing hash-table.
#[derive(Clone)]
pub struct HashMap<K, V, S> {
    table: Table<K, V>,

    /// Hasher for keys.
    pub hasher: S,
}

// The result of an insert operation.
pub enum InsertResult<'a, K, V> {
    /// Inserted the given value.
    Inserted(&'a mut V),

    /// The key was already present.
    Occupied {
        current: &'a mut V,
        not_inserted: Record<K, V>,
    },
}

impl<K, V, S> HashMap<K, V, S> {
    /// Creates new hash-table with the given options.
    #[inline]
    pub fn new(
        buckets: usize,
        bucket_capacity: usize,
        growth_factor: f64,
        hasher: S,
    ) -> HashMap<K, V, S> {
        HashMap {
            table: Table::new(buckets, bucket_capacity, growth_factor),
            hasher,
        }
    }

    /// Returns the number of entries in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn table(&self) -> &Table<K, V> {
        &self.table
    }

    #[inline]
    pub fn chain(&self, index: usize) -> Option<&Chain<K, V>> {
        self.table.chain(index)
    }

    #[inline]
    pub fn stats(&self) -> Stats {
        self.table.stats()
    }

    /// Keeps only the entries for which `f` returns `true`.
    #[inline]
    pub fn retain(&mut self, f: impl FnMut(&K, &mut V) -> bool) {
        self.table.retain(f);
    }

    /// Remove all entries from this table.
    #[inline]
    pub fn clear(&mut self) {
        self.table.clear();
    }

    #[inline]
    pub fn iter(&self) -> bucket::Iter<'_, K, V> {
        self.table.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> bucket::IterMut<'_, K, V> {
        self.table.iter_mut()
    }

    #[inline]
    pub fn into_table(self) -> Table<K, V> {
        self.table
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns a reference to the entry corresponding to the key.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);

        self.table
            .find(hash, |k| key.eq(k.borrow()))
            .map(|record| (&record.key, &record.value))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);

        self.table
            .find_mut(hash, |k| key.eq(k.borrow()))
            .map(|record| &mut record.value)
    }

    /// Inserts a key-value pair into the table, unless the key is already present.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> InsertResult<'_, K, V> {
        let hash = self.hasher.hash_one(&key);
        let hasher = &self.hasher;

        match self
            .table
            .try_insert(hash, Record { key, value }, |k| hasher.hash_one(k))
        {
            Ok(record) => InsertResult::Inserted(&mut record.value),
            Err((not_inserted, current)) => InsertResult::Occupied {
                current: &mut current.value,
                not_inserted,
            },
        }
    }

    /// Inserts a key-value pair into the table, returning the value it replaced.
    #[inline]
    pub fn replace(&mut self, key: K, value: V) -> Option<V> {
        match self.insert(key, value) {
            InsertResult::Inserted(_) => None,
            InsertResult::Occupied {
                current,
                not_inserted,
            } => Some(mem::replace(current, not_inserted.value)),
        }
    }

    /// Removes a key from the map, returning the entry for the key if the key was previously in the map.
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hasher.hash_one(key);

        self.table
            .remove(hash, |k| key.eq(k.borrow()))
            .map(|record| (record.key, record.value))
    }

    /// Returns the bucket a key is addressed to.
    #[inline]
    pub fn bucket_of<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        self.table.index(self.hasher.hash_one(key))
    }
}
