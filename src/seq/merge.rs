//! seq::merge
//!
//! Lazy two-way merge of sorted sequences.
//!
//! # Invariants
//!
//! - Both inputs must already be sorted by the comparison; this is not checked
//! - Single pass: each input item is compared at most once per yield
//! - On ties the item from the first sequence is emitted first
//! - Duplicates are preserved

use std::cmp::Ordering;
use std::iter::{Fuse, Peekable};

/// Merged sequence. Created by [`merge`], [`merge_by`], or
/// [`SeqExt::merge_by`](super::SeqExt::merge_by).
pub struct Merge<A: Iterator, B: Iterator, F> {
    first: Peekable<Fuse<A>>,
    second: Peekable<Fuse<B>>,
    compare: F,
}

/// Merges two sequences sorted by their natural order.
///
/// # Example
///
/// ```
/// use seqscope::seq::merge;
///
/// let merged: Vec<i32> = merge(vec![1, 4, 9], vec![2, 4, 10]).collect();
/// assert_eq!(merged, vec![1, 2, 4, 4, 9, 10]);
/// ```
pub fn merge<A, B>(
    first: A,
    second: B,
) -> Merge<A::IntoIter, B::IntoIter, fn(&A::Item, &A::Item) -> Ordering>
where
    A: IntoIterator,
    A::Item: Ord,
    B: IntoIterator<Item = A::Item>,
{
    merge_by(first, second, Ord::cmp as fn(&A::Item, &A::Item) -> Ordering)
}

/// Merges two sequences sorted by `compare`.
pub fn merge_by<A, B, F>(first: A, second: B, compare: F) -> Merge<A::IntoIter, B::IntoIter, F>
where
    A: IntoIterator,
    B: IntoIterator<Item = A::Item>,
    F: FnMut(&A::Item, &A::Item) -> Ordering,
{
    Merge {
        first: first.into_iter().fuse().peekable(),
        second: second.into_iter().fuse().peekable(),
        compare,
    }
}

impl<A, B, F> Iterator for Merge<A, B, F>
where
    A: Iterator,
    B: Iterator<Item = A::Item>,
    F: FnMut(&A::Item, &A::Item) -> Ordering,
{
    type Item = A::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let take_first = match (self.first.peek(), self.second.peek()) {
            (Some(a), Some(b)) => (self.compare)(a, b) != Ordering::Greater,
            (Some(_), None) => true,
            (None, _) => false,
        };

        if take_first {
            self.first.next()
        } else {
            self.second.next()
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (first_lower, first_upper) = self.first.size_hint();
        let (second_lower, second_upper) = self.second.size_hint();
        let upper = match (first_upper, second_upper) {
            (Some(a), Some(b)) => a.checked_add(b),
            _ => None,
        };
        (first_lower.saturating_add(second_lower), upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::SeqExt;

    #[test]
    fn merge_interleaves_sorted_inputs() {
        let merged: Vec<i32> = merge(vec![1, 3, 5], vec![2, 4, 6]).collect();
        assert_eq!(merged, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn merge_drains_longer_side() {
        let merged: Vec<i32> = merge(vec![1], vec![0, 2, 3, 4]).collect();
        assert_eq!(merged, vec![0, 1, 2, 3, 4]);

        let merged: Vec<i32> = merge(vec![5, 6, 7], Vec::new()).collect();
        assert_eq!(merged, vec![5, 6, 7]);
    }

    #[test]
    fn merge_prefers_first_on_ties() {
        let first = vec![(1, 'a'), (2, 'a')];
        let second = vec![(1, 'b'), (2, 'b')];
        let merged: Vec<(i32, char)> = merge_by(first, second, |x, y| x.0.cmp(&y.0)).collect();
        assert_eq!(merged, vec![(1, 'a'), (1, 'b'), (2, 'a'), (2, 'b')]);
    }

    #[test]
    fn merge_by_descending_comparer() {
        let merged: Vec<i32> = vec![9, 5, 1]
            .into_iter()
            .merge_by(vec![8, 2], |a, b| b.cmp(a))
            .collect();
        assert_eq!(merged, vec![9, 8, 5, 2, 1]);
    }

    #[test]
    fn merge_of_empty_inputs() {
        let merged: Vec<i32> = merge(Vec::new(), Vec::new()).collect();
        assert!(merged.is_empty());
    }

    #[test]
    fn merge_size_hint_sums_inputs() {
        let merged = merge(vec![1, 2], vec![3]);
        assert_eq!(merged.size_hint(), (3, Some(3)));
    }
}
