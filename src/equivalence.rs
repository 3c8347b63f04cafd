//! equivalence
//!
//! A capability for "same for this purpose" comparisons that are looser than
//! `PartialEq`.
//!
//! # Design
//!
//! A type opts in by implementing [`Equivalent`]. Resolution is static: the
//! trait bound is checked at compile time and there is no per-type registry
//! or cache. [`equivalence`] turns the capability into a plain function so it
//! can be handed to any combinator that accepts a key equality.
//!
//! # Example
//!
//! ```
//! use seqscope::equivalence::{sequences_equivalent, Equivalent};
//!
//! struct Word(&'static str);
//!
//! impl Equivalent for Word {
//!     fn is_equivalent_to(&self, other: &Self) -> bool {
//!         self.0.eq_ignore_ascii_case(other.0)
//!     }
//! }
//!
//! let left = [Word("Hello"), Word("World")];
//! let right = [Word("hello"), Word("WORLD")];
//! assert!(sequences_equivalent(&left, &right));
//! ```

/// Types with a notion of equivalence.
pub trait Equivalent {
    /// True if `self` and `other` are equivalent.
    fn is_equivalent_to(&self, other: &Self) -> bool;
}

impl<T: Equivalent> Equivalent for [T] {
    fn is_equivalent_to(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(left, right)| left.is_equivalent_to(right))
    }
}

impl<T: Equivalent> Equivalent for Vec<T> {
    fn is_equivalent_to(&self, other: &Self) -> bool {
        self.as_slice().is_equivalent_to(other.as_slice())
    }
}

impl<T: Equivalent> Equivalent for Option<T> {
    fn is_equivalent_to(&self, other: &Self) -> bool {
        are_equivalent(self.as_ref(), other.as_ref())
    }
}

/// True if both values are absent, or both are present and equivalent.
pub fn are_equivalent<T: Equivalent + ?Sized>(left: Option<&T>, right: Option<&T>) -> bool {
    match (left, right) {
        (Some(left), Some(right)) => left.is_equivalent_to(right),
        (None, None) => true,
        _ => false,
    }
}

/// True if the sequences have the same length and are pairwise equivalent.
pub fn sequences_equivalent<'a, T, L, R>(left: L, right: R) -> bool
where
    T: Equivalent + 'a,
    L: IntoIterator<Item = &'a T>,
    R: IntoIterator<Item = &'a T>,
{
    let mut left = left.into_iter();
    let mut right = right.into_iter();
    loop {
        match (left.next(), right.next()) {
            (Some(l), Some(r)) if l.is_equivalent_to(r) => {}
            (None, None) => return true,
            _ => return false,
        }
    }
}

/// The equivalence of `T` as a plain comparison function.
pub fn equivalence<T: Equivalent + ?Sized>() -> fn(&T, &T) -> bool {
    T::is_equivalent_to
}
