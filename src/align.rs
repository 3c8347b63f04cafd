//! align
//!
//! Longest common contiguous slice between two sequences.
//!
//! # Algorithm
//!
//! Both inputs are materialized, then a dense `|A| x |B|` table is filled in
//! row-major order (outer index over A, inner over B):
//!
//! - `table[i][j] = 0` if `A[i] != B[j]`
//! - `table[i][j] = 1` if they match and `i == 0 || j == 0`
//! - `table[i][j] = 1 + table[i-1][j-1]` otherwise
//!
//! Each cell is the length of the common run ending at `A[i]` / `B[j]`.
//!
//! # Invariants
//!
//! - A later cell only replaces the recorded maximum if it is strictly longer,
//!   so the first maximal run in row-major order wins ties
//! - No match anywhere yields length 0 and no start offsets
//! - Empty inputs are legal

use std::ops::Range;

/// The longest common slice found between two sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommonSlice {
    /// Length of the slice.
    pub len: usize,
    /// Start offset in the first sequence, or `None` if nothing matched.
    pub first_start: Option<usize>,
    /// Start offset in the second sequence, or `None` if nothing matched.
    pub second_start: Option<usize>,
}

impl CommonSlice {
    /// True if no common item was found.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The slice's index range within the first sequence.
    pub fn first_range(&self) -> Option<Range<usize>> {
        self.first_start.map(|start| start..start + self.len)
    }

    /// The slice's index range within the second sequence.
    pub fn second_range(&self) -> Option<Range<usize>> {
        self.second_start.map(|start| start..start + self.len)
    }
}

/// The dynamic-programming table of common run lengths.
#[derive(Debug, Clone)]
pub struct AlignmentTable {
    rows: usize,
    cols: usize,
    cells: Vec<usize>,
    longest: CommonSlice,
}

impl AlignmentTable {
    /// Fill the table for `first` (rows) against `second` (columns).
    pub fn build<T, F>(first: &[T], second: &[T], mut eq: F) -> Self
    where
        F: FnMut(&T, &T) -> bool,
    {
        let rows = first.len();
        let cols = second.len();
        let mut cells = vec![0; rows * cols];
        let mut longest = CommonSlice::default();

        for (i, a) in first.iter().enumerate() {
            for (j, b) in second.iter().enumerate() {
                if !eq(a, b) {
                    continue;
                }

                let run = if i == 0 || j == 0 {
                    1
                } else {
                    1 + cells[(i - 1) * cols + (j - 1)]
                };
                cells[i * cols + j] = run;

                if run > longest.len {
                    longest = CommonSlice {
                        len: run,
                        first_start: Some(i + 1 - run),
                        second_start: Some(j + 1 - run),
                    };
                }
            }
        }

        Self {
            rows,
            cols,
            cells,
            longest,
        }
    }

    /// Number of rows (length of the first sequence).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (length of the second sequence).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Length of the common run ending at `first[row]` / `second[col]`.
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// The first longest run in row-major order.
    pub fn longest(&self) -> CommonSlice {
        self.longest
    }
}

/// Finds the longest contiguous slice contained in both sequences.
///
/// # Example
///
/// ```
/// use seqscope::align::longest_common_slice;
///
/// let slice = longest_common_slice(vec![1, 2, 3], vec![2, 3, 4]);
/// assert_eq!(slice.len, 2);
/// assert_eq!(slice.first_start, Some(1));
/// assert_eq!(slice.second_start, Some(0));
/// ```
pub fn longest_common_slice<T, A, B>(first: A, second: B) -> CommonSlice
where
    T: PartialEq,
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
{
    longest_common_slice_by(first, second, T::eq)
}

/// Finds the longest contiguous slice contained in both sequences, comparing
/// items with `eq`.
pub fn longest_common_slice_by<T, A, B, F>(first: A, second: B, eq: F) -> CommonSlice
where
    A: IntoIterator<Item = T>,
    B: IntoIterator<Item = T>,
    F: FnMut(&T, &T) -> bool,
{
    let first: Vec<T> = first.into_iter().collect();
    let second: Vec<T> = second.into_iter().collect();
    AlignmentTable::build(&first, &second, eq).longest()
}
