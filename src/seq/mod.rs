//! seq
//!
//! Lazy sequence combinators over pull sources.
//!
//! # Architecture
//!
//! A pull source is any [`Iterator`]: it hands out one item per `next` call
//! and nothing else. Every combinator in this module wraps one or more
//! iterators and is itself an iterator, so stages compose by nesting. Nothing
//! is pulled until the consumer asks for an item.
//!
//! # Modules
//!
//! - [`batch`] - Fixed-size batches, predicate-bounded batches, even bins
//! - [`merge`] - Two-way merge of sorted sequences
//! - [`cross`] - Cartesian product in odometer order
//! - [`zip`] - Positional pairing with strict or truncating length policy
//! - [`group`] - Runs of adjacent equal-keyed items, and time-gap grouping
//! - [`distinct`] - First occurrence of each key
//! - [`trim`] - Removal of a trailing run matching a predicate
//! - [`query`] - Separator insertion and eager queries
//!
//! # Invariants
//!
//! - Argument errors are returned by the constructor, before any item is pulled
//! - Stage-local buffers live on the stage and never outlive one yield
//! - Items produced by upstream sources (including `Result` items) pass
//!   through untouched
//! - A single pipeline supports one consumer at a time
//!
//! # Example
//!
//! ```
//! use seqscope::seq::SeqExt;
//!
//! let batches: Vec<Vec<i32>> = (1..=5).batches(2).unwrap().collect();
//! assert_eq!(batches, vec![vec![1, 2], vec![3, 4], vec![5]]);
//!
//! let trimmed: Vec<i32> = vec![1, 0, 2, 0, 0]
//!     .into_iter()
//!     .trim_end_where(|x| *x == 0)
//!     .collect();
//! assert_eq!(trimmed, vec![1, 0, 2]);
//! ```

pub mod batch;
pub mod cross;
pub mod distinct;
pub mod group;
pub mod merge;
pub mod query;
pub mod trim;
pub mod zip;

pub use batch::{Batches, BatchesBy, Bins};
pub use cross::{cross_product, CrossProduct};
pub use distinct::{DistinctBy, DistinctByWith};
pub use group::{GroupByGap, GroupConsecutive, GroupConsecutiveBy, Grouping};
pub use merge::{merge, merge_by, Merge};
pub use query::Separated;
pub use trim::TrimEndWhere;
pub use zip::{zip_strict, zip_truncate, Side, ZipStrict, ZipTruncate};

use std::cmp::Ordering;
use std::hash::Hash;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// Errors from sequence operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeqError {
    /// A size, count, or input list was out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A strict zip found one side exhausted before the other.
    #[error("both sequences must be the same length, {longer} sequence is longer")]
    UnbalancedSequences {
        /// The side that still had items.
        longer: Side,
    },

    /// An operation that needs at least one item got none.
    #[error("sequence contains no elements")]
    NoElements,
}

/// Combinator methods available on every iterator.
///
/// Constructors that take a size or count return `Result` so that a bad
/// argument is reported at the call site rather than on the first pull.
pub trait SeqExt: Iterator + Sized {
    /// Groups items into order-preserving chunks of `size`; the last chunk may
    /// be shorter.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::InvalidArgument`] if `size` is zero.
    fn batches(self, size: usize) -> Result<Batches<Self>, SeqError> {
        Batches::new(self, size)
    }

    /// Starts a new batch at every item for which `starts_new_batch` is true.
    /// The first item always opens the first batch.
    fn batches_by<F>(self, starts_new_batch: F) -> BatchesBy<Self, F>
    where
        F: FnMut(&Self::Item) -> bool,
    {
        BatchesBy::new(self, starts_new_batch)
    }

    /// Splits a sized sequence into at most `bin_count` bins whose sizes
    /// differ by at most one, larger bins first.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::InvalidArgument`] if `bin_count` is zero.
    fn split_into_bins(self, bin_count: usize) -> Result<Bins<Self>, SeqError>
    where
        Self: ExactSizeIterator,
    {
        Bins::new(self, bin_count)
    }

    /// Merges with another sequence sorted by the same comparison.
    fn merge_by<J, F>(self, other: J, compare: F) -> Merge<Self, J::IntoIter, F>
    where
        J: IntoIterator<Item = Self::Item>,
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        merge_by(self, other, compare)
    }

    /// Pairs items positionally, failing if the lengths differ.
    fn zip_strict<J>(self, other: J) -> ZipStrict<Self, J::IntoIter>
    where
        J: IntoIterator,
    {
        zip_strict(self, other)
    }

    /// Pairs items positionally, stopping at the shorter sequence.
    fn zip_truncate<J>(self, other: J) -> ZipTruncate<Self, J::IntoIter>
    where
        J: IntoIterator,
    {
        zip_truncate(self, other)
    }

    /// Groups maximal runs of adjacent items with equal keys.
    fn group_consecutive_by<K, F>(self, key_of: F) -> GroupConsecutive<Self, K, F>
    where
        K: PartialEq,
        F: FnMut(&Self::Item) -> K,
    {
        GroupConsecutiveBy::new(self, key_of, K::eq as fn(&K, &K) -> bool)
    }

    /// Groups maximal runs of adjacent items whose keys satisfy `key_eq`.
    fn group_consecutive_by_with<K, F, E>(
        self,
        key_of: F,
        key_eq: E,
    ) -> GroupConsecutiveBy<Self, K, F, E>
    where
        F: FnMut(&Self::Item) -> K,
        E: FnMut(&K, &K) -> bool,
    {
        GroupConsecutiveBy::new(self, key_of, key_eq)
    }

    /// Groups chronologically ordered items separated by at most `max_gap`.
    fn group_consecutive_by_gap<F>(self, max_gap: Duration, time_of: F) -> GroupByGap<Self, F>
    where
        F: FnMut(&Self::Item) -> DateTime<Utc>,
    {
        GroupByGap::new(self, max_gap, time_of)
    }

    /// Yields the first item for each distinct key.
    fn distinct_by<K, F>(self, key_of: F) -> DistinctBy<Self, K, F>
    where
        K: Eq + Hash,
        F: FnMut(&Self::Item) -> K,
    {
        DistinctBy::new(self, key_of)
    }

    /// Yields the first item for each key distinct under `key_eq`.
    fn distinct_by_with<K, F, E>(self, key_of: F, key_eq: E) -> DistinctByWith<Self, K, F, E>
    where
        F: FnMut(&Self::Item) -> K,
        E: FnMut(&K, &K) -> bool,
    {
        DistinctByWith::new(self, key_of, key_eq)
    }

    /// Drops the trailing run of items matching `predicate`.
    fn trim_end_where<P>(self, predicate: P) -> TrimEndWhere<Self, P>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        TrimEndWhere::new(self, predicate)
    }

    /// Inserts a clone of `separator` between adjacent items.
    fn separated_by(self, separator: Self::Item) -> Separated<Self>
    where
        Self::Item: Clone,
    {
        Separated::new(self, separator)
    }

    /// Returns at most `count` items from the end, in order.
    fn take_last(self, count: usize) -> Vec<Self::Item> {
        query::take_last(self, count)
    }

    /// True if the sequence has exactly `count` items. Pulls at most `count + 1`.
    fn count_is_exactly(self, count: usize) -> bool {
        query::count_is_exactly(self, count)
    }

    /// True if the sequence has at least `count` items. Pulls at most `count`.
    fn count_is_at_least(self, count: usize) -> bool {
        query::count_is_at_least(self, count)
    }

    /// Returns the maximal item under `compare`; the first of equal maxima wins.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::NoElements`] if the sequence is empty.
    fn max_by_comparison<F>(self, compare: F) -> Result<Self::Item, SeqError>
    where
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        query::max_by_comparison(self, compare)
    }
}

impl<I: Iterator> SeqExt for I {}
