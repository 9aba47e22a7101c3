use std::{slice, vec};

// A key-value pair stored in a bucket segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record<K, V> {
    pub key: K,
    pub value: V,
}

// A fixed-capacity run of records.
#[derive(Clone, Debug)]
pub struct Segment<K, V> {
    records: Vec<Record<K, V>>,
}

impl<K, V> Segment<K, V> {
    fn new(capacity: usize) -> Segment<K, V> {
        Segment {
            records: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn records(&self) -> &[Record<K, V>] {
        &self.records
    }
}

/// A bucket and its overflow segments.
///
/// The first segment is the bucket itself, every following segment is an
/// overflow of the one before it. All segments except the last hold exactly
/// `capacity` records, and the chain always owns at least one segment.
#[derive(Clone, Debug)]
pub struct Chain<K, V> {
    segments: Vec<Segment<K, V>>,
    capacity: usize,
}

impl<K, V> Chain<K, V> {
    /// Creates a chain made of a single empty segment.
    pub fn new(capacity: usize) -> Chain<K, V> {
        debug_assert!(capacity > 0);

        Chain {
            segments: vec![Segment::new(capacity)],
            capacity,
        }
    }

    /// The number of records across all segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|segment| segment.len() == 0)
    }

    #[inline]
    pub fn segments(&self) -> &[Segment<K, V>] {
        &self.segments
    }

    /// Appends a record to the first segment with spare capacity.
    ///
    /// Returns the index of the tail segment, which accepts the next record.
    pub fn insert(&mut self, record: Record<K, V>) -> usize {
        self.push(record);
        self.segments.len() - 1
    }

    /// Appends a record like [`Chain::insert`], returning a reference to it.
    pub fn push(&mut self, record: Record<K, V>) -> &mut Record<K, V> {
        let capacity = self.capacity;

        let s = match self
            .segments
            .iter()
            .position(|segment| segment.len() < capacity)
        {
            Some(s) => s,
            // the tail was filled and its empty overflow spliced out by a removal
            None => {
                self.segments.push(Segment::new(capacity));
                self.segments.len() - 1
            }
        };

        self.segments[s].records.push(record);
        let r = self.segments[s].len() - 1;

        if self.segments[s].len() >= capacity && s + 1 == self.segments.len() {
            self.segments.push(Segment::new(capacity));
            log::trace!("chain overflowed into segment {}", s + 1);
        }

        &mut self.segments[s].records[r]
    }

    /// Returns the segment and slot of the first record whose key matches.
    pub fn position(&self, mut eq: impl FnMut(&K) -> bool) -> Option<(usize, usize)> {
        self.segments.iter().enumerate().find_map(|(s, segment)| {
            segment
                .records
                .iter()
                .position(|record| eq(&record.key))
                .map(|r| (s, r))
        })
    }

    /// Returns the record at a position found by [`Chain::position`].
    #[inline]
    pub fn record_mut(&mut self, (s, r): (usize, usize)) -> &mut Record<K, V> {
        &mut self.segments[s].records[r]
    }

    /// Returns the first record whose key matches.
    pub fn find(&self, mut eq: impl FnMut(&K) -> bool) -> Option<&Record<K, V>> {
        self.iter().find(|record| eq(&record.key))
    }

    /// Returns the first record whose key matches, mutably.
    pub fn find_mut(&mut self, mut eq: impl FnMut(&K) -> bool) -> Option<&mut Record<K, V>> {
        self.iter_mut().find(|record| eq(&record.key))
    }

    /// Removes the first record whose key matches.
    ///
    /// Records from later segments then shift forward so that every segment
    /// but the last stays full.
    pub fn remove(&mut self, mut eq: impl FnMut(&K) -> bool) -> Option<Record<K, V>> {
        let (s, r) = self.position(&mut eq)?;

        let record = self.segments[s].records.remove(r);

        // Repacking from the predecessor splices out a segment left empty and
        // folds a sparse one into it, since only the tail may be partial.
        self.refill(s.saturating_sub(1));
        Some(record)
    }

    /// Keeps only the records for which `f` returns `true`.
    ///
    /// Returns the number of records removed.
    pub fn retain(&mut self, mut f: impl FnMut(&K, &mut V) -> bool) -> usize {
        let before = self.len();

        for segment in &mut self.segments {
            segment
                .records
                .retain_mut(|record| f(&record.key, &mut record.value));
        }

        let removed = before - self.len();
        if removed > 0 {
            self.refill(0);
        }

        removed
    }

    // Shifts records forward into the segments starting at `from`, so that all
    // segments but the last are full again. Trailing segments left without
    // records are dropped, but the chain keeps its head.
    fn refill(&mut self, from: usize) {
        if from + 1 >= self.segments.len() {
            return;
        }

        let capacity = self.capacity;
        let before = self.segments.len();
        let mut records = self
            .segments
            .drain(from..)
            .flat_map(|segment| segment.records)
            .collect::<Vec<_>>()
            .into_iter()
            .peekable();

        while records.peek().is_some() {
            self.segments.push(Segment {
                records: records.by_ref().take(capacity).collect(),
            });
        }

        if self.segments.is_empty() {
            self.segments.push(Segment::new(capacity));
        }

        if self.segments.len() < before {
            log::trace!("compacted chain from {before} to {} segments", self.segments.len());
        }
    }

    /// Returns an iterator over the records in segment order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(slice::from_ref(self))
    }

    /// Returns a mutable iterator over the records in segment order.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(slice::from_mut(self))
    }
}

impl<K, V> IntoIterator for Chain<K, V> {
    type Item = Record<K, V>;
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(vec![self])
    }
}

// An iterator over the records of a run of chains, in chain then segment order.
pub struct Iter<'a, K, V> {
    chains: slice::Iter<'a, Chain<K, V>>,
    segments: slice::Iter<'a, Segment<K, V>>,
    records: slice::Iter<'a, Record<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub fn new(chains: &'a [Chain<K, V>]) -> Iter<'a, K, V> {
        Iter {
            chains: chains.iter(),
            segments: Default::default(),
            records: Default::default(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Record<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.records.next() {
                return Some(record);
            }

            match self.segments.next() {
                Some(segment) => self.records = segment.records.iter(),
                None => self.segments = self.chains.next()?.segments.iter(),
            }
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            chains: self.chains.clone(),
            segments: self.segments.clone(),
            records: self.records.clone(),
        }
    }
}

// A mutable iterator over the records of a run of chains.
pub struct IterMut<'a, K, V> {
    chains: slice::IterMut<'a, Chain<K, V>>,
    segments: slice::IterMut<'a, Segment<K, V>>,
    records: slice::IterMut<'a, Record<K, V>>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub fn new(chains: &'a mut [Chain<K, V>]) -> IterMut<'a, K, V> {
        IterMut {
            chains: chains.iter_mut(),
            segments: Default::default(),
            records: Default::default(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = &'a mut Record<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.records.next() {
                return Some(record);
            }

            match self.segments.next() {
                Some(segment) => self.records = segment.records.iter_mut(),
                None => self.segments = self.chains.next()?.segments.iter_mut(),
            }
        }
    }
}

// An owning iterator over the records of a run of chains.
pub struct IntoIter<K, V> {
    chains: vec::IntoIter<Chain<K, V>>,
    segments: vec::IntoIter<Segment<K, V>>,
    records: vec::IntoIter<Record<K, V>>,
}

impl<K, V> IntoIter<K, V> {
    pub fn new(chains: Vec<Chain<K, V>>) -> IntoIter<K, V> {
        IntoIter {
            chains: chains.into_iter(),
            segments: Default::default(),
            records: Default::default(),
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = Record<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.records.next() {
                return Some(record);
            }

            match self.segments.next() {
                Some(segment) => self.records = segment.records.into_iter(),
                None => self.segments = self.chains.next()?.segments.into_iter(),
            }
        }
    }
}
