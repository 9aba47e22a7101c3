use std::hash::{BuildHasher, Hasher};

// Initial state of the djb2 accumulator.
const SEED: u64 = 5381;

/// Hashes a byte string with Bernstein's djb2 function.
///
/// Every byte is folded into the accumulator as `hash * 33 + byte`, using
/// wrapping arithmetic over a `u64`.
///
/// # Examples
///
/// ```
/// use linhash::djb2;
///
/// assert_eq!(djb2(b""), 5381);
/// assert_eq!(djb2(b"a"), 5381 * 33 + 97);
/// ```
#[inline]
pub fn djb2(bytes: &[u8]) -> u64 {
    bytes.iter().fold(SEED, |hash, &byte| step(hash, byte))
}

#[inline]
fn step(hash: u64, byte: u8) -> u64 {
    (hash << 5).wrapping_add(hash).wrapping_add(u64::from(byte))
}

/// A [`Hasher`] running the djb2 recurrence over everything written to it.
///
/// Note that `str` and `String` keys also write a trailing `0xff` byte through
/// their [`Hash`](std::hash::Hash) implementation, so `Djb2Hasher` applied to a
/// string key is not equal to [`djb2`] applied to its bytes. Both are
/// deterministic, which is all the table relies on.
#[derive(Clone, Copy, Debug)]
pub struct Djb2Hasher {
    hash: u64,
}

impl Default for Djb2Hasher {
    fn default() -> Self {
        Djb2Hasher { hash: SEED }
    }
}

impl Hasher for Djb2Hasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.hash = bytes.iter().fold(self.hash, |hash, &byte| step(hash, byte));
    }
}

/// The default hash builder of a [`LinearHashMap`](crate::LinearHashMap).
///
/// Unlike [`RandomState`](std::collections::hash_map::RandomState), `Djb2State`
/// is not seeded, so bucket placement is reproducible across runs and processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Djb2State;

impl BuildHasher for Djb2State {
    type Hasher = Djb2Hasher;

    #[inline]
    fn build_hasher(&self) -> Djb2Hasher {
        Djb2Hasher::default()
    }
}
