//! seq::group
//!
//! Grouping of adjacent items.
//!
//! # Stages
//!
//! - [`GroupConsecutiveBy`] - Maximal runs of adjacent items with equal keys.
//!   Non-adjacent items with equal keys land in separate groups.
//! - [`GroupByGap`] - Runs of chronologically ordered items where each item
//!   is within a maximum gap of its predecessor.
//!
//! A group is only complete once the first item of the next group (or the end
//! of the source) has been seen, so each stage holds one pending group.

use std::iter::Fuse;
use std::vec;

use chrono::{DateTime, Duration, Utc};

/// A key and the run of items that share it, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grouping<K, T> {
    key: K,
    items: Vec<T>,
}

impl<K, T> Grouping<K, T> {
    /// Create a grouping.
    pub fn new(key: K, items: Vec<T>) -> Self {
        Self { key, items }
    }

    /// The group key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The grouped items.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items in the group. Never zero for stage output.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the group has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Split into key and items.
    pub fn into_parts(self) -> (K, Vec<T>) {
        (self.key, self.items)
    }
}

impl<K, T> IntoIterator for Grouping<K, T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Consecutive groups under default key equality. Created by
/// [`SeqExt::group_consecutive_by`](super::SeqExt::group_consecutive_by).
pub type GroupConsecutive<I, K, F> = GroupConsecutiveBy<I, K, F, fn(&K, &K) -> bool>;

/// Consecutive groups under an explicit key equality. Created by
/// [`SeqExt::group_consecutive_by_with`](super::SeqExt::group_consecutive_by_with).
///
/// The key reported for a group is the key of its first item.
pub struct GroupConsecutiveBy<I: Iterator, K, F, E> {
    source: Fuse<I>,
    key_of: F,
    key_eq: E,
    pending: Option<(K, Vec<I::Item>)>,
}

impl<I, K, F, E> GroupConsecutiveBy<I, K, F, E>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    E: FnMut(&K, &K) -> bool,
{
    /// Create a consecutive grouping stage.
    pub fn new(source: I, key_of: F, key_eq: E) -> Self {
        Self {
            source: source.fuse(),
            key_of,
            key_eq,
            pending: None,
        }
    }
}

impl<I, K, F, E> Iterator for GroupConsecutiveBy<I, K, F, E>
where
    I: Iterator,
    F: FnMut(&I::Item) -> K,
    E: FnMut(&K, &K) -> bool,
{
    type Item = Grouping<K, I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(item) = self.source.next() {
            let key = (self.key_of)(&item);
            match self.pending.take() {
                Some((current, mut items)) if (self.key_eq)(&current, &key) => {
                    items.push(item);
                    self.pending = Some((current, items));
                }
                Some((current, items)) => {
                    self.pending = Some((key, vec![item]));
                    return Some(Grouping::new(current, items));
                }
                None => self.pending = Some((key, vec![item])),
            }
        }

        self.pending
            .take()
            .map(|(key, items)| Grouping::new(key, items))
    }
}

/// Time-gap groups. Created by
/// [`SeqExt::group_consecutive_by_gap`](super::SeqExt::group_consecutive_by_gap).
///
/// Items are presumed to be in chronological order. An item joins the
/// current group when its distance from the previous item is at most the
/// maximum gap, so a group may span more than the gap overall. The key
/// reported for a group is the timestamp of its last item.
pub struct GroupByGap<I: Iterator, F> {
    source: Fuse<I>,
    max_gap: Duration,
    time_of: F,
    pending: Option<(DateTime<Utc>, Vec<I::Item>)>,
}

impl<I, F> GroupByGap<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item) -> DateTime<Utc>,
{
    /// Create a time-gap grouping stage.
    pub fn new(source: I, max_gap: Duration, time_of: F) -> Self {
        Self {
            source: source.fuse(),
            max_gap,
            time_of,
            pending: None,
        }
    }
}

impl<I, F> Iterator for GroupByGap<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item) -> DateTime<Utc>,
{
    type Item = Grouping<DateTime<Utc>, I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(item) = self.source.next() {
            let time = (self.time_of)(&item);
            match self.pending.take() {
                Some((last, mut items)) if gap_between(last, time) <= self.max_gap => {
                    items.push(item);
                    self.pending = Some((time, items));
                }
                Some((last, items)) => {
                    self.pending = Some((time, vec![item]));
                    return Some(Grouping::new(last, items));
                }
                None => self.pending = Some((time, vec![item])),
            }
        }

        self.pending
            .take()
            .map(|(last, items)| Grouping::new(last, items))
    }
}

fn gap_between(a: DateTime<Utc>, b: DateTime<Utc>) -> Duration {
    if a > b {
        a - b
    } else {
        b - a
    }
}
