//! seq::zip
//!
//! Positional pairing of two sequences.
//!
//! # Length policies
//!
//! - [`ZipStrict`] yields `Err(SeqError::UnbalancedSequences)` the moment one
//!   side runs out while the other still has an item, then ends
//! - [`ZipTruncate`] stops silently at the shorter length
//!
//! The first sequence is always pulled before the second.

use std::fmt;

use super::SeqError;

/// Which of two input sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The first (left) sequence.
    First,
    /// The second (right) sequence.
    Second,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "first"),
            Side::Second => write!(f, "second"),
        }
    }
}

/// Strict positional pairs. Created by [`zip_strict`].
#[derive(Debug, Clone)]
pub struct ZipStrict<A, B> {
    first: A,
    second: B,
    finished: bool,
}

/// Pairs two sequences, reporting a length mismatch as an error item.
///
/// # Example
///
/// ```
/// use seqscope::seq::{zip_strict, SeqError, Side};
///
/// let mut pairs = zip_strict(vec![1, 2, 3], vec![4, 5]);
/// assert_eq!(pairs.next(), Some(Ok((1, 4))));
/// assert_eq!(pairs.next(), Some(Ok((2, 5))));
/// assert_eq!(
///     pairs.next(),
///     Some(Err(SeqError::UnbalancedSequences { longer: Side::First }))
/// );
/// assert_eq!(pairs.next(), None);
/// ```
pub fn zip_strict<A, B>(first: A, second: B) -> ZipStrict<A::IntoIter, B::IntoIter>
where
    A: IntoIterator,
    B: IntoIterator,
{
    ZipStrict {
        first: first.into_iter(),
        second: second.into_iter(),
        finished: false,
    }
}

impl<A: Iterator, B: Iterator> Iterator for ZipStrict<A, B> {
    type Item = Result<(A::Item, B::Item), SeqError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.first.next() {
            Some(a) => match self.second.next() {
                Some(b) => Some(Ok((a, b))),
                None => {
                    self.finished = true;
                    Some(Err(SeqError::UnbalancedSequences {
                        longer: Side::First,
                    }))
                }
            },
            None => {
                self.finished = true;
                self.second.next().map(|_| {
                    Err(SeqError::UnbalancedSequences {
                        longer: Side::Second,
                    })
                })
            }
        }
    }
}

/// Truncating positional pairs. Created by [`zip_truncate`].
#[derive(Debug, Clone)]
pub struct ZipTruncate<A, B> {
    first: A,
    second: B,
    finished: bool,
}

/// Pairs two sequences, stopping at the end of the shorter one.
pub fn zip_truncate<A, B>(first: A, second: B) -> ZipTruncate<A::IntoIter, B::IntoIter>
where
    A: IntoIterator,
    B: IntoIterator,
{
    ZipTruncate {
        first: first.into_iter(),
        second: second.into_iter(),
        finished: false,
    }
}

impl<A: Iterator, B: Iterator> Iterator for ZipTruncate<A, B> {
    type Item = (A::Item, B::Item);

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let pair = self
            .first
            .next()
            .and_then(|a| self.second.next().map(|b| (a, b)));
        if pair.is_none() {
            self.finished = true;
        }
        pair
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        let (first_lower, first_upper) = self.first.size_hint();
        let (second_lower, second_upper) = self.second.size_hint();
        let upper = match (first_upper, second_upper) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (upper, None) | (None, upper) => upper,
        };
        (first_lower.min(second_lower), upper)
    }
}
