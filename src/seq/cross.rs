//! seq::cross
//!
//! Cartesian product of several sequences.
//!
//! # Architecture
//!
//! Every input is materialized into a `Vec` when the stage is built. The
//! stage then walks an index vector like an odometer: the last position
//! advances fastest and carries into earlier positions when it wraps.

use super::SeqError;

/// Cartesian product in odometer order. Created by [`cross_product`].
#[derive(Debug, Clone)]
pub struct CrossProduct<T> {
    pools: Vec<Vec<T>>,
    indexes: Vec<usize>,
    exhausted: bool,
}

/// Returns every combination that takes one item from each sequence.
///
/// If any input is empty the product is empty.
///
/// # Errors
///
/// Returns [`SeqError::InvalidArgument`] if `sequences` is empty.
///
/// # Example
///
/// ```
/// use seqscope::seq::cross_product;
///
/// let product: Vec<Vec<i32>> = cross_product(vec![vec![1, 2], vec![3, 4]]).unwrap().collect();
/// assert_eq!(product, vec![vec![1, 3], vec![1, 4], vec![2, 3], vec![2, 4]]);
/// ```
pub fn cross_product<S, I, T>(sequences: S) -> Result<CrossProduct<T>, SeqError>
where
    S: IntoIterator<Item = I>,
    I: IntoIterator<Item = T>,
    T: Clone,
{
    let pools: Vec<Vec<T>> = sequences
        .into_iter()
        .map(|sequence| sequence.into_iter().collect())
        .collect();
    if pools.is_empty() {
        return Err(SeqError::InvalidArgument(
            "there must be at least one sequence".into(),
        ));
    }

    let exhausted = pools.iter().any(Vec::is_empty);
    Ok(CrossProduct {
        indexes: vec![0; pools.len()],
        pools,
        exhausted,
    })
}

impl<T> CrossProduct<T> {
    /// Total number of combinations, or `None` on overflow.
    pub fn combinations(&self) -> Option<usize> {
        self.pools
            .iter()
            .try_fold(1usize, |total, pool| total.checked_mul(pool.len()))
    }

    /// Moves the odometer one step. Returns false once every position wrapped.
    fn advance(&mut self) -> bool {
        for position in (0..self.indexes.len()).rev() {
            self.indexes[position] += 1;
            if self.indexes[position] < self.pools[position].len() {
                return true;
            }
            self.indexes[position] = 0;
        }
        false
    }
}

impl<T: Clone> Iterator for CrossProduct<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let combination = self
            .indexes
            .iter()
            .zip(&self.pools)
            .map(|(&index, pool)| pool[index].clone())
            .collect();

        if !self.advance() {
            self.exhausted = true;
        }
        Some(combination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_by_two_in_odometer_order() {
        let product: Vec<Vec<i32>> = cross_product(vec![vec![1, 2], vec![3, 4]]).unwrap().collect();
        assert_eq!(
            product,
            vec![vec![1, 3], vec![1, 4], vec![2, 3], vec![2, 4]]
        );
    }

    #[test]
    fn last_sequence_varies_fastest() {
        let product: Vec<String> = cross_product(vec![vec!['a', 'b'], vec!['x'], vec!['1', '2', '3']])
            .unwrap()
            .map(|combo| combo.into_iter().collect())
            .collect();
        assert_eq!(product, vec!["ax1", "ax2", "ax3", "bx1", "bx2", "bx3"]);
    }

    #[test]
    fn single_sequence_yields_singletons() {
        let product: Vec<Vec<i32>> = cross_product(vec![vec![7, 8, 9]]).unwrap().collect();
        assert_eq!(product, vec![vec![7], vec![8], vec![9]]);
    }

    #[test]
    fn empty_input_sequence_yields_nothing() {
        let product: Vec<Vec<i32>> = cross_product(vec![vec![1, 2], vec![]]).unwrap().collect();
        assert!(product.is_empty());
    }

    #[test]
    fn no_sequences_is_an_error() {
        let result = cross_product(Vec::<Vec<i32>>::new());
        assert!(matches!(result, Err(SeqError::InvalidArgument(_))));
    }

    #[test]
    fn inputs_are_materialized_eagerly() {
        use std::cell::Cell;

        let pulled = Cell::new(0);
        let counter = &pulled;
        let counting = move |range: std::ops::Range<i32>| {
            range.inspect(move |_| counter.set(counter.get() + 1))
        };
        let product = cross_product(vec![counting(0..3), counting(0..2)]).unwrap();
        assert_eq!(pulled.get(), 5);
        assert_eq!(product.combinations(), Some(6));
    }

    #[test]
    fn combinations_matches_yield_count() {
        let product = cross_product(vec![vec![1, 2, 3], vec![4, 5], vec![6, 7]]).unwrap();
        assert_eq!(product.combinations(), Some(12));
        assert_eq!(product.count(), 12);
    }
}
