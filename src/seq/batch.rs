//! seq::batch
//!
//! Batching stages.
//!
//! # Stages
//!
//! - [`Batches`] - Fixed-size chunks; only the last may be short
//! - [`BatchesBy`] - A new chunk starts wherever a predicate fires
//! - [`Bins`] - A sized sequence split into a requested number of bins
//!
//! Every chunk is fully buffered into a `Vec` before it is handed out, so a
//! consumer never has to finish an inner sequence before advancing the outer
//! one.

use std::iter::Fuse;
use std::mem;

use super::SeqError;

/// Fixed-size batches. Created by [`SeqExt::batches`](super::SeqExt::batches).
#[derive(Debug, Clone)]
pub struct Batches<I> {
    source: Fuse<I>,
    size: usize,
}

impl<I: Iterator> Batches<I> {
    /// Create a batching stage.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::InvalidArgument`] if `size` is zero.
    pub fn new(source: I, size: usize) -> Result<Self, SeqError> {
        if size == 0 {
            return Err(SeqError::InvalidArgument(
                "batch size must be at least 1".into(),
            ));
        }
        Ok(Self {
            source: source.fuse(),
            size,
        })
    }

    /// The configured batch size.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut batch = Vec::with_capacity(self.size);
        batch.extend(self.source.by_ref().take(self.size));
        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.source.size_hint();
        (
            lower.div_ceil(self.size),
            upper.map(|upper| upper.div_ceil(self.size)),
        )
    }
}

/// Predicate-bounded batches. Created by
/// [`SeqExt::batches_by`](super::SeqExt::batches_by).
pub struct BatchesBy<I: Iterator, F> {
    source: Fuse<I>,
    starts_new_batch: F,
    batch: Vec<I::Item>,
}

impl<I: Iterator, F> BatchesBy<I, F>
where
    F: FnMut(&I::Item) -> bool,
{
    /// Create a predicate-bounded batching stage.
    pub fn new(source: I, starts_new_batch: F) -> Self {
        Self {
            source: source.fuse(),
            starts_new_batch,
            batch: Vec::new(),
        }
    }
}

impl<I: Iterator, F> Iterator for BatchesBy<I, F>
where
    F: FnMut(&I::Item) -> bool,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        for item in self.source.by_ref() {
            // The predicate sees every item, but an empty batch is never emitted.
            if (self.starts_new_batch)(&item) && !self.batch.is_empty() {
                return Some(mem::replace(&mut self.batch, vec![item]));
            }
            self.batch.push(item);
        }

        if self.batch.is_empty() {
            None
        } else {
            Some(mem::take(&mut self.batch))
        }
    }
}

/// Evenly sized bins. Created by
/// [`SeqExt::split_into_bins`](super::SeqExt::split_into_bins).
///
/// A 12-item sequence split into 5 bins yields bins of 3, 3, 2, 2, 2.
/// Fixed-size [`Batches`] cannot express that split. With fewer items than
/// bins, each item gets its own bin and fewer bins are produced.
#[derive(Debug, Clone)]
pub struct Bins<I> {
    source: I,
    bin_size: usize,
    remainder: usize,
}

impl<I: ExactSizeIterator> Bins<I> {
    /// Create a binning stage. The length is taken from the iterator up front.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::InvalidArgument`] if `bin_count` is zero.
    pub fn new(source: I, bin_count: usize) -> Result<Self, SeqError> {
        if bin_count == 0 {
            return Err(SeqError::InvalidArgument(
                "bin count must be at least 1".into(),
            ));
        }

        let len = source.len();
        let remainder = len % bin_count;
        let mut bin_size = len / bin_count;
        if remainder > 0 {
            bin_size += 1;
        }

        Ok(Self {
            source,
            bin_size,
            remainder,
        })
    }
}

impl<I: Iterator> Iterator for Bins<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bin_size == 0 {
            return None;
        }

        let bin: Vec<I::Item> = self.source.by_ref().take(self.bin_size).collect();
        if bin.is_empty() {
            return None;
        }

        // Once the remainder is spent the remaining bins are one smaller.
        if self.remainder > 0 {
            self.remainder -= 1;
            if self.remainder == 0 {
                self.bin_size -= 1;
            }
        }

        Some(bin)
    }
}
