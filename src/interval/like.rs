//! Coercion of heterogeneous interval-like inputs.
//!
//! Collection APIs accept anything convertible into an [`IntervalLike`]:
//! a scalar (degenerate point interval), a `(lower, upper)` pair (closed
//! left, open right), a triple adding the lower closure flag, a quadruple
//! adding both flags, or an already built [`Atomic`] / [`Interval`]. The sum
//! type is resolved exactly once at the API boundary; nothing downstream of
//! it inspects input shapes.

use super::{Atomic, Interval, IntervalError};

/// An input value convertible into an atomic interval.
///
/// In bound positions, `None` denotes the corresponding infinity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalLike<T> {
    Scalar(T),
    Pair(Option<T>, Option<T>),
    Triple(Option<T>, Option<T>, bool),
    Quadruple(Option<T>, Option<T>, bool, bool),
    Atomic(Atomic<T>),
}

impl<T: Ord + Clone> IntervalLike<T> {
    /// Resolves the input into an atomic interval.
    ///
    /// Malformed inputs (inverted bounds) fail with
    /// [`IntervalError::InvalidInterval`]: by the time a value reaches this
    /// coercion it is scan input, not direct interval construction.
    pub fn resolve(self) -> Result<Atomic<T>, IntervalError> {
        let atomic = match self {
            IntervalLike::Scalar(value) => Atomic::NonEmpty(Interval::point(value)),
            IntervalLike::Pair(lower, upper) => Interval::from_bounds(lower, upper, true, false)
                .map_err(|_| IntervalError::InvalidInterval)?,
            IntervalLike::Triple(lower, upper, lower_closed) => {
                Interval::from_bounds(lower, upper, lower_closed, false)
                    .map_err(|_| IntervalError::InvalidInterval)?
            }
            IntervalLike::Quadruple(lower, upper, lower_closed, upper_closed) => {
                Interval::from_bounds(lower, upper, lower_closed, upper_closed)
                    .map_err(|_| IntervalError::InvalidInterval)?
            }
            IntervalLike::Atomic(atomic) => atomic,
        };
        Ok(atomic)
    }
}

impl<T> From<T> for IntervalLike<T> {
    fn from(value: T) -> Self {
        IntervalLike::Scalar(value)
    }
}

impl<T> From<(T, T)> for IntervalLike<T> {
    fn from((lower, upper): (T, T)) -> Self {
        IntervalLike::Pair(Some(lower), Some(upper))
    }
}

impl<T> From<(Option<T>, Option<T>)> for IntervalLike<T> {
    fn from((lower, upper): (Option<T>, Option<T>)) -> Self {
        IntervalLike::Pair(lower, upper)
    }
}

impl<T> From<(T, T, bool)> for IntervalLike<T> {
    fn from((lower, upper, lower_closed): (T, T, bool)) -> Self {
        IntervalLike::Triple(Some(lower), Some(upper), lower_closed)
    }
}

impl<T> From<(Option<T>, Option<T>, bool)> for IntervalLike<T> {
    fn from((lower, upper, lower_closed): (Option<T>, Option<T>, bool)) -> Self {
        IntervalLike::Triple(lower, upper, lower_closed)
    }
}

impl<T> From<(T, T, bool, bool)> for IntervalLike<T> {
    fn from((lower, upper, lower_closed, upper_closed): (T, T, bool, bool)) -> Self {
        IntervalLike::Quadruple(Some(lower), Some(upper), lower_closed, upper_closed)
    }
}

impl<T> From<(Option<T>, Option<T>, bool, bool)> for IntervalLike<T> {
    fn from((lower, upper, lower_closed, upper_closed): (Option<T>, Option<T>, bool, bool)) -> Self {
        IntervalLike::Quadruple(lower, upper, lower_closed, upper_closed)
    }
}

impl<T> From<Atomic<T>> for IntervalLike<T> {
    fn from(atomic: Atomic<T>) -> Self {
        IntervalLike::Atomic(atomic)
    }
}

impl<T> From<Interval<T>> for IntervalLike<T> {
    fn from(span: Interval<T>) -> Self {
        IntervalLike::Atomic(Atomic::NonEmpty(span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(like: impl Into<IntervalLike<i32>>) -> Atomic<i32> {
        like.into().resolve().unwrap()
    }

    #[test]
    fn scalar_is_a_point() {
        assert_eq!(resolved(1).to_string(), "[1;1]");
    }

    #[test]
    fn pair_is_half_open() {
        assert_eq!(resolved((0, 1)).to_string(), "[0;1)");
    }

    #[test]
    fn triple_sets_lower_closure() {
        assert_eq!(resolved((0, 1, false)).to_string(), "(0;1)");
        assert_eq!(resolved((0, 1, true)).to_string(), "[0;1)");
    }

    #[test]
    fn quadruple_sets_both_closures() {
        assert_eq!(resolved((0, 1, true, true)).to_string(), "[0;1]");
        assert_eq!(resolved((0, 1, false, true)).to_string(), "(0;1]");
    }

    #[test]
    fn none_bounds_are_infinite() {
        assert_eq!(resolved((None, Some(1))).to_string(), "(-inf;1)");
        assert_eq!(resolved((Some(1), None)).to_string(), "[1;+inf)");
        assert_eq!(
            resolved((None::<i32>, None)).to_string(),
            "(-inf;+inf)"
        );
    }

    #[test]
    fn atomic_passes_through() {
        let span = Interval::point(3);
        assert_eq!(resolved(span.clone()), Atomic::NonEmpty(span));
        assert_eq!(resolved(Atomic::<i32>::Empty), Atomic::Empty);
    }

    #[test]
    fn inverted_bounds_fail_as_coercion_error() {
        assert_eq!(
            IntervalLike::<i32>::from((5, 2)).resolve(),
            Err(IntervalError::InvalidInterval)
        );
    }

    #[test]
    fn degenerate_pair_is_empty() {
        assert_eq!(resolved((1, 1)), Atomic::Empty);
    }
}
