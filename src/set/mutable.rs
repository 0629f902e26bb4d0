//! Mutable interval sets.

use std::fmt::Display;
use std::ops::{BitAndAssign, BitOrAssign, BitXorAssign, Deref, SubAssign};

use crate::interval::{Atomic, Interval, IntervalError, IntervalLike};
use crate::ops;

use super::{IntervalSet, SetError};

/// A canonical interval set with in-place mutation.
///
/// Shares the read-only surface of [`IntervalSet`] through `Deref`; every
/// mutating operation re-establishes canonical form before returning.
/// Mutation requires `&mut self`, so exactly one logical owner mutates at a
/// time; the frozen variant is the one to share across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutableIntervalSet<T: Ord + Clone> {
    set: IntervalSet<T>,
}

impl<T: Ord + Clone> Default for MutableIntervalSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> MutableIntervalSet<T> {
    /// Creates the empty set.
    pub fn new() -> Self {
        MutableIntervalSet {
            set: IntervalSet::new(),
        }
    }

    /// Builds a set from interval-like values; see
    /// [`IntervalSet::try_from_iter`].
    pub fn try_from_iter<I, L>(iterable: I) -> Result<Self, IntervalError>
    where
        I: IntoIterator<Item = L>,
        L: Into<IntervalLike<T>>,
    {
        Ok(MutableIntervalSet {
            set: IntervalSet::try_from_iter(iterable)?,
        })
    }

    pub(crate) fn from_frozen(set: IntervalSet<T>) -> Self {
        MutableIntervalSet { set }
    }

    /// Converts into the frozen, hashable variant.
    pub fn freeze(self) -> IntervalSet<T> {
        self.set
    }

    /// A frozen snapshot of the current content.
    pub fn to_frozen(&self) -> IntervalSet<T> {
        self.set.clone()
    }

    /// Inserts the coerced value, merging with overlapping or near
    /// members. Inserting the empty interval is a no-op.
    pub fn add<L: Into<IntervalLike<T>>>(&mut self, value: L) -> Result<(), SetError> {
        match value.into().resolve()? {
            Atomic::Empty => Ok(()),
            Atomic::NonEmpty(span) => {
                ops::insert(self.set.spans_mut(), span);
                Ok(())
            }
        }
    }

    /// Removes the exact member interval, failing with
    /// [`SetError::NotFound`] if it is not a member.
    ///
    /// Membership is exact: a value merely covered by a member is not
    /// removable. Carving points out of the set is `difference_update`.
    pub fn remove<L: Into<IntervalLike<T>>>(&mut self, value: L) -> Result<(), SetError> {
        match self.position_of(value.into())? {
            Some(index) => {
                self.set.spans_mut().remove(index);
                Ok(())
            }
            None => Err(SetError::NotFound),
        }
    }

    /// Removes the exact member interval if present; no-op otherwise.
    pub fn discard<L: Into<IntervalLike<T>>>(&mut self, value: L) -> Result<(), SetError> {
        if let Some(index) = self.position_of(value.into())? {
            self.set.spans_mut().remove(index);
        }
        Ok(())
    }

    /// Removes and returns the last canonical member.
    pub fn pop(&mut self) -> Result<Interval<T>, SetError> {
        self.set.spans_mut().pop().ok_or(SetError::EmptyPop)
    }

    /// Removes all members.
    pub fn clear(&mut self) {
        self.set.spans_mut().clear();
    }

    /// In-place union with `other`.
    pub fn union_update(&mut self, other: &IntervalSet<T>) {
        self.set = self.set.union(other);
    }

    /// In-place intersection with `other`.
    pub fn intersection_update(&mut self, other: &IntervalSet<T>) {
        self.set = self.set.intersection(other);
    }

    /// In-place difference with `other`.
    pub fn difference_update(&mut self, other: &IntervalSet<T>) {
        self.set = self.set.difference(other);
    }

    /// In-place symmetric difference with `other`.
    pub fn symmetric_difference_update(&mut self, other: &IntervalSet<T>) {
        self.set = self.set.symmetric_difference(other);
    }

    /// Position of the exact member equal to the resolved value, if any.
    /// The empty interval is never a member.
    fn position_of(&self, value: IntervalLike<T>) -> Result<Option<usize>, SetError> {
        let span = match value.resolve()? {
            Atomic::Empty => return Ok(None),
            Atomic::NonEmpty(span) => span,
        };
        let spans = self.set.as_slice();
        let index = spans.partition_point(|s| s.lower() < span.lower());
        Ok(spans.get(index).filter(|s| **s == span).map(|_| index))
    }
}

impl<T: Ord + Clone> Deref for MutableIntervalSet<T> {
    type Target = IntervalSet<T>;

    fn deref(&self) -> &IntervalSet<T> {
        &self.set
    }
}

impl<T: Ord + Clone> From<IntervalSet<T>> for MutableIntervalSet<T> {
    fn from(set: IntervalSet<T>) -> Self {
        MutableIntervalSet { set }
    }
}

impl<T: Ord + Clone> FromIterator<Interval<T>> for MutableIntervalSet<T> {
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        MutableIntervalSet {
            set: IntervalSet::from_iter(iter),
        }
    }
}

impl<T: Ord + Clone> BitOrAssign<&IntervalSet<T>> for MutableIntervalSet<T> {
    fn bitor_assign(&mut self, rhs: &IntervalSet<T>) {
        self.union_update(rhs);
    }
}

impl<T: Ord + Clone> BitAndAssign<&IntervalSet<T>> for MutableIntervalSet<T> {
    fn bitand_assign(&mut self, rhs: &IntervalSet<T>) {
        self.intersection_update(rhs);
    }
}

impl<T: Ord + Clone> SubAssign<&IntervalSet<T>> for MutableIntervalSet<T> {
    fn sub_assign(&mut self, rhs: &IntervalSet<T>) {
        self.difference_update(rhs);
    }
}

impl<T: Ord + Clone> BitXorAssign<&IntervalSet<T>> for MutableIntervalSet<T> {
    fn bitxor_assign(&mut self, rhs: &IntervalSet<T>) {
        self.symmetric_difference_update(rhs);
    }
}

impl<T: Ord + Clone + Display> Display for MutableIntervalSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.set.fmt(f)
    }
}
