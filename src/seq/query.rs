//! seq::query
//!
//! Separator insertion and eager queries over a sequence.
//!
//! [`Separated`] is lazy like every other stage. The query functions consume
//! their source immediately and pull no more items than they need.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::iter::Fuse;

use super::SeqError;

/// Items with a separator between each adjacent pair. Created by
/// [`SeqExt::separated_by`](super::SeqExt::separated_by).
///
/// A separator is only produced once the item after it is known to exist.
pub struct Separated<I: Iterator> {
    source: Fuse<I>,
    separator: I::Item,
    pending: Option<I::Item>,
    started: bool,
}

impl<I> Separated<I>
where
    I: Iterator,
    I::Item: Clone,
{
    /// Create a separator stage.
    pub fn new(source: I, separator: I::Item) -> Self {
        Self {
            source: source.fuse(),
            separator,
            pending: None,
            started: false,
        }
    }
}

impl<I> Iterator for Separated<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.pending.take() {
            return Some(item);
        }

        let item = self.source.next()?;
        if self.started {
            self.pending = Some(item);
            Some(self.separator.clone())
        } else {
            self.started = true;
            Some(item)
        }
    }
}

/// Returns at most `count` items from the end of `source`, in order.
///
/// The source is enumerated once and at most `count` items are kept. A
/// `count` of zero returns immediately without pulling anything.
pub fn take_last<I: IntoIterator>(source: I, count: usize) -> Vec<I::Item> {
    if count == 0 {
        return Vec::new();
    }

    let mut window = VecDeque::with_capacity(count);
    for item in source {
        if window.len() == count {
            window.pop_front();
        }
        window.push_back(item);
    }
    window.into()
}

/// True if `source` has exactly `count` items.
pub fn count_is_exactly<I: IntoIterator>(source: I, count: usize) -> bool {
    source.into_iter().take(count.saturating_add(1)).count() == count
}

/// True if `source` has at least `count` items.
pub fn count_is_at_least<I: IntoIterator>(source: I, count: usize) -> bool {
    source.into_iter().take(count).count() == count
}

/// Returns the maximal item under `compare`. On ties the earliest item wins.
///
/// # Errors
///
/// Returns [`SeqError::NoElements`] if `source` is empty.
pub fn max_by_comparison<I, F>(source: I, mut compare: F) -> Result<I::Item, SeqError>
where
    I: IntoIterator,
    F: FnMut(&I::Item, &I::Item) -> Ordering,
{
    let mut items = source.into_iter();
    let mut max = items.next().ok_or(SeqError::NoElements)?;
    for item in items {
        if compare(&item, &max) == Ordering::Greater {
            max = item;
        }
    }
    Ok(max)
}
