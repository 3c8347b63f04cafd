//! seq::distinct
//!
//! First occurrence of each key, in source order.
//!
//! [`DistinctBy`] hashes keys. [`DistinctByWith`] takes an explicit key
//! equality and compares each new key against every key seen so far, so it
//! works for keys that have no hash but costs O(n) per item.

use std::collections::HashSet;
use std::hash::Hash;

/// Distinct items by hashed key. Created by
/// [`SeqExt::distinct_by`](super::SeqExt::distinct_by).
pub struct DistinctBy<I, K, F> {
    source: I,
    key_of: F,
    seen: HashSet<K>,
}

impl<I, K, F> DistinctBy<I, K, F>
where
    I: Iterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> K,
{
    /// Create a distinct-by stage.
    pub fn new(source: I, key_of: F) -> Self {
        Self {
            source,
            key_of,
            seen: HashSet::new(),
        }
    }
}

impl<I, K, F> Iterator for DistinctBy<I, K, F>
where
    I: Iterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> K,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.source.next()?;
            if self.seen.insert((self.key_of)(&item)) {
                return Some(item);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.source.size_hint().1)
    }
}

/// Distinct items under an explicit key equality. Created by
/// [`SeqExt::distinct_by_with`](super::SeqExt::distinct_by_with).
pub struct DistinctByWith<I, K, F, E> {
    source: I,
    key_of: F,
    key_eq: E,
    seen: Vec<K>,
}

impl<I, K, F, E> DistinctByWith<I, K, F, E>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    E: FnMut(&K, &K) -> bool,
{
    /// Create a distinct-by stage with a custom key equality.
    pub fn new(source: I, key_of: F, key_eq: E) -> Self {
        Self {
            source,
            key_of,
            key_eq,
            seen: Vec::new(),
        }
    }

    fn is_new(&mut self, key: &K) -> bool {
        let key_eq = &mut self.key_eq;
        !self.seen.iter().any(|seen| key_eq(seen, key))
    }
}

impl<I, K, F, E> Iterator for DistinctByWith<I, K, F, E>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    E: FnMut(&K, &K) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let item = self.source.next()?;
            let key = (self.key_of)(&item);
            if self.is_new(&key) {
                self.seen.push(key);
                return Some(item);
            }
        }
    }
}
