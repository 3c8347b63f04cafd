//! seq::trim
//!
//! Removal of a trailing run of matching items.
//!
//! # Architecture
//!
//! Whether a matching item is part of the trailing run is only known once a
//! later item fails the predicate (it was not trailing) or the source ends
//! (it was). Matching items are therefore held back in a candidate buffer.
//! When a non-matching item arrives the buffer, followed by that item, is
//! replayed in order before normal pulling resumes. When the source ends the
//! buffer is discarded.
//!
//! # Invariants
//!
//! - The predicate is evaluated exactly once per source item
//! - While replaying, nothing is pulled from the source

use std::collections::VecDeque;
use std::iter::Fuse;

/// Trailing-trim stage. Created by
/// [`SeqExt::trim_end_where`](super::SeqExt::trim_end_where).
pub struct TrimEndWhere<I: Iterator, P> {
    source: Fuse<I>,
    predicate: P,
    held: VecDeque<I::Item>,
    /// Number of items at the front of `held` confirmed as not trailing.
    replay: usize,
}

impl<I: Iterator, P> TrimEndWhere<I, P>
where
    P: FnMut(&I::Item) -> bool,
{
    /// Create a trailing-trim stage.
    pub fn new(source: I, predicate: P) -> Self {
        Self {
            source: source.fuse(),
            predicate,
            held: VecDeque::new(),
            replay: 0,
        }
    }
}

impl<I: Iterator, P> Iterator for TrimEndWhere<I, P>
where
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.replay > 0 {
                self.replay -= 1;
                return self.held.pop_front();
            }

            let Some(item) = self.source.next() else {
                self.held.clear();
                return None;
            };

            if (self.predicate)(&item) {
                self.held.push_back(item);
            } else if self.held.is_empty() {
                return Some(item);
            } else {
                self.held.push_back(item);
                self.replay = self.held.len();
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.source.size_hint();
        (
            self.replay,
            upper.and_then(|upper| upper.checked_add(self.held.len())),
        )
    }
}
