//! Canonical interval sets.
//!
//! [`IntervalSet`] is the frozen variant: immutable after construction, so
//! it is hashable and freely shareable. [`MutableIntervalSet`] adds in-place
//! mutation on top of the same canonical sequence. Both keep the **canonical
//! invariant** at all times: intervals sorted by lower mark, pairwise
//! disjoint, with near neighbours merged.

mod error;
mod mutable;

pub use error::SetError;
pub use mutable::MutableIntervalSet;

use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, BitXor, Deref, Index, Not, Range, Sub};

use crate::interval::{Atomic, Interval, IntervalError, IntervalLike};
use crate::ops;

/// A sorted, disjoint, non-adjacent set of non-empty intervals.
///
/// Construction normalizes arbitrary input by repeated insertion; every
/// derived set is produced in canonical form, so equality and hashing are
/// content-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalSet<T: Ord + Clone> {
    spans: Vec<Interval<T>>,
}

impl<T: Ord + Clone> IntervalSet<T> {
    /// Creates the empty set.
    pub fn new() -> Self {
        IntervalSet { spans: Vec::new() }
    }

    /// Builds a set from interval-like values, coercing each at the
    /// boundary.
    ///
    /// Empty atomics are skipped; malformed inputs fail with
    /// [`IntervalError::InvalidInterval`] before any scanning happens.
    pub fn try_from_iter<I, L>(iterable: I) -> Result<Self, IntervalError>
    where
        I: IntoIterator<Item = L>,
        L: Into<IntervalLike<T>>,
    {
        let mut spans = Vec::new();
        for item in iterable {
            match item.into().resolve()? {
                Atomic::Empty => {}
                Atomic::NonEmpty(span) => ops::insert(&mut spans, span),
            }
        }
        Ok(IntervalSet { spans })
    }

    /// The spans in canonical order.
    pub fn as_slice(&self) -> &[Interval<T>] {
        &self.spans
    }

    pub(crate) fn spans_mut(&mut self) -> &mut Vec<Interval<T>> {
        &mut self.spans
    }

    /// The nth interval in canonical order.
    pub fn get(&self, index: usize) -> Option<&Interval<T>> {
        self.spans.get(index)
    }

    /// A new set holding the given positional sub-range of intervals.
    ///
    /// A slice of a canonical sequence is itself canonical.
    pub fn slice(&self, range: Range<usize>) -> Self {
        IntervalSet {
            spans: self.spans[range].to_vec(),
        }
    }

    /// True if the coerced value is entirely covered by one member
    /// interval. The empty interval is contained in every set.
    pub fn contains<L: Into<IntervalLike<T>>>(&self, value: L) -> Result<bool, IntervalError> {
        let query = match value.into().resolve()? {
            Atomic::Empty => return Ok(true),
            Atomic::NonEmpty(span) => span,
        };
        let index = ops::locate(&self.spans, query.lower());
        Ok(match self.spans.get(index) {
            Some(member) => member.lower() <= query.lower() && query.upper() <= member.upper(),
            None => false,
        })
    }

    /// True if every point of `self` belongs to `other`.
    ///
    /// Forward scan: each member must lie inside a single member of
    /// `other`, and the candidate index only moves forward.
    pub fn is_subset(&self, other: &Self) -> bool {
        let mut cursor = 0usize;
        for span in &self.spans {
            cursor += ops::locate(&other.spans[cursor..], span.lower());
            match other.spans.get(cursor) {
                Some(during) => {
                    if span.lower() < during.lower() || span.upper() > during.upper() {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }

    /// True if every point of `other` belongs to `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// True if the sets share no point.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        let mut i = 0usize;
        let mut j = 0usize;
        while i < self.spans.len() && j < other.spans.len() {
            let a = &self.spans[i];
            let b = &other.spans[j];
            if a.intersects(b) {
                return false;
            }
            if a.upper() < b.upper() {
                i += 1;
            } else {
                j += 1;
            }
        }
        true
    }

    /// Lazily yields the members intersecting the query (non-strict) or
    /// properly contained in it (strict). Re-invoking restarts the scan.
    pub fn select<L: Into<IntervalLike<T>>>(
        &self,
        value: L,
        strict: bool,
    ) -> Result<Select<'_, T>, IntervalError> {
        Ok(Select::new(&self.spans, value.into().resolve()?, strict))
    }

    /// The union of the two sets as a new canonical set.
    pub fn union(&self, other: &Self) -> Self {
        IntervalSet {
            spans: ops::union(&self.spans, &other.spans),
        }
    }

    /// The intersection of the two sets as a new canonical set.
    pub fn intersection(&self, other: &Self) -> Self {
        IntervalSet {
            spans: ops::intersection(&self.spans, &other.spans),
        }
    }

    /// The points of `self` not in `other`, as a new canonical set.
    pub fn difference(&self, other: &Self) -> Self {
        IntervalSet {
            spans: ops::difference(&self.spans, &other.spans),
        }
    }

    /// The points in exactly one of the sets, as a new canonical set.
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        IntervalSet {
            spans: ops::symmetric_difference(&self.spans, &other.spans),
        }
    }

    /// The complement within `(-inf;+inf)`, as a new canonical set.
    pub fn complement(&self) -> Self {
        IntervalSet {
            spans: ops::complement(&self.spans),
        }
    }

    /// Converts into the mutable variant.
    pub fn into_mutable(self) -> MutableIntervalSet<T> {
        MutableIntervalSet::from_frozen(self)
    }
}

/// Lazy selection over a canonical sequence. See [`IntervalSet::select`].
pub struct Select<'a, T: Ord + Clone> {
    spans: &'a [Interval<T>],
    query: Option<Interval<T>>,
    strict: bool,
    index: usize,
}

impl<'a, T: Ord + Clone> Select<'a, T> {
    pub(crate) fn new(spans: &'a [Interval<T>], query: Atomic<T>, strict: bool) -> Self {
        let query = query.into_interval();
        let index = match &query {
            Some(span) => {
                let mut index = ops::locate(spans, span.lower());
                if strict && index < spans.len() && spans[index].lower() < span.lower() {
                    index += 1;
                }
                index
            }
            None => spans.len(),
        };
        Select {
            spans,
            query,
            strict,
            index,
        }
    }
}

impl<'a, T: Ord + Clone> Iterator for Select<'a, T> {
    type Item = &'a Interval<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let query = self.query.as_ref()?;
        let other = self.spans.get(self.index)?;
        if other.lower() > query.upper() {
            self.query = None;
            return None;
        }
        if other.upper() > query.upper() {
            // last candidate: partially past the query
            self.query = None;
            if self.strict {
                return None;
            }
            return Some(other);
        }
        self.index += 1;
        Some(other)
    }
}

impl<T: Ord + Clone> Default for IntervalSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone> Deref for IntervalSet<T> {
    type Target = [Interval<T>];

    fn deref(&self) -> &[Interval<T>] {
        &self.spans
    }
}

impl<T: Ord + Clone> Index<usize> for IntervalSet<T> {
    type Output = Interval<T>;

    fn index(&self, index: usize) -> &Interval<T> {
        &self.spans[index]
    }
}

impl<T: Ord + Clone> From<Interval<T>> for IntervalSet<T> {
    fn from(span: Interval<T>) -> Self {
        IntervalSet { spans: vec![span] }
    }
}

impl<T: Ord + Clone> From<Vec<Interval<T>>> for IntervalSet<T> {
    /// Normalizes an arbitrary vector by repeated insertion.
    fn from(spans: Vec<Interval<T>>) -> Self {
        spans.into_iter().collect()
    }
}

impl<T: Ord + Clone> FromIterator<Interval<T>> for IntervalSet<T> {
    fn from_iter<I: IntoIterator<Item = Interval<T>>>(iter: I) -> Self {
        let mut spans = Vec::new();
        for span in iter {
            ops::insert(&mut spans, span);
        }
        IntervalSet { spans }
    }
}

impl<T: Ord + Clone> IntoIterator for IntervalSet<T> {
    type Item = Interval<T>;
    type IntoIter = std::vec::IntoIter<Interval<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.into_iter()
    }
}

impl<'a, T: Ord + Clone> IntoIterator for &'a IntervalSet<T> {
    type Item = &'a Interval<T>;
    type IntoIter = std::slice::Iter<'a, Interval<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}

impl<T: Ord + Clone + Hash> Hash for IntervalSet<T> {
    /// Content hash over the canonical sequence; canonical order is
    /// deterministic, so equal sets hash equally.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.spans.hash(state);
    }
}

impl<T: Ord + Clone> BitOr for &IntervalSet<T> {
    type Output = IntervalSet<T>;

    fn bitor(self, rhs: Self) -> IntervalSet<T> {
        self.union(rhs)
    }
}

impl<T: Ord + Clone> BitAnd for &IntervalSet<T> {
    type Output = IntervalSet<T>;

    fn bitand(self, rhs: Self) -> IntervalSet<T> {
        self.intersection(rhs)
    }
}

impl<T: Ord + Clone> Sub for &IntervalSet<T> {
    type Output = IntervalSet<T>;

    fn sub(self, rhs: Self) -> IntervalSet<T> {
        self.difference(rhs)
    }
}

impl<T: Ord + Clone> BitXor for &IntervalSet<T> {
    type Output = IntervalSet<T>;

    fn bitxor(self, rhs: Self) -> IntervalSet<T> {
        self.symmetric_difference(rhs)
    }
}

impl<T: Ord + Clone> Not for &IntervalSet<T> {
    type Output = IntervalSet<T>;

    fn not(self) -> IntervalSet<T> {
        self.complement()
    }
}

impl<T: Ord + Clone + Display> Display for IntervalSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, span) in self.spans.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", span)?;
        }
        Ok(())
    }
}

/// Enables `assert_eq!(set, vec![...])` in tests.
impl<T: Ord + Clone> PartialEq<Vec<Interval<T>>> for IntervalSet<T> {
    fn eq(&self, other: &Vec<Interval<T>>) -> bool {
        self.spans == *other
    }
}

// =============================================================================
// Serde support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: Ord + Clone + serde::Serialize> serde::Serialize for IntervalSet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.spans.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Ord + Clone + serde::Deserialize<'de>> serde::Deserialize<'de> for IntervalSet<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let spans = Vec::<Interval<T>>::deserialize(deserializer)?;
        Ok(Self::from(spans))
    }
}
