//! Atomic intervals and Allen's interval algebra.
//!
//! An [`Atomic`] value is either the empty set or a single contiguous range
//! ([`Interval`]) between two [`Mark`]s. Allen's relations (`meets`,
//! `overlaps`, `starts`, `during`, `finishes`) are implemented on both, with
//! a `strict` flag tightening boundary comparisons and a `reverse` flag that
//! swaps operand roles to expose the inverse relations.

mod error;
mod like;

pub use error::IntervalError;
pub use like::IntervalLike;

use std::fmt::Display;

use crate::mark::Mark;
use crate::set::IntervalSet;

/// A non-empty contiguous range `{x : lower <= x <= upper}` under mark
/// semantics.
///
/// The invariant `lower <= upper` in mark order holds for every constructed
/// value; mark order alone decides emptiness, so `(10;10]` (lower mark
/// `10+`, upper mark `10`) can never be represented here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval<T> {
    lower: Mark<T>,
    upper: Mark<T>,
}

/// A single convex subset of the domain: empty, or one interval.
///
/// Empty is a distinguished variant, not an interval with degenerate
/// bounds: it equals only itself and satisfies no Allen relation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Atomic<T> {
    Empty,
    NonEmpty(Interval<T>),
}

impl<T: Ord> Interval<T> {
    /// The unbounded interval `(-inf;+inf)`.
    pub fn full() -> Self {
        Interval {
            lower: Mark::lower(None, false),
            upper: Mark::upper(None, false),
        }
    }

    /// Builds an interval from explicit bounds, where `None` denotes the
    /// corresponding infinity.
    ///
    /// Returns [`Atomic::Empty`] when the bounds describe no point (equal
    /// values not both closed). Errors with
    /// [`IntervalError::InvalidBounds`] when the lower value strictly
    /// exceeds the upper value.
    pub fn from_bounds(
        lower: Option<T>,
        upper: Option<T>,
        lower_closed: bool,
        upper_closed: bool,
    ) -> Result<Atomic<T>, IntervalError> {
        if let (Some(lo), Some(up)) = (&lower, &upper) {
            if lo > up {
                return Err(IntervalError::InvalidBounds);
            }
        }
        let lower = Mark::lower(lower, lower_closed);
        let upper = Mark::upper(upper, upper_closed);
        if lower <= upper {
            Ok(Atomic::NonEmpty(Interval { lower, upper }))
        } else {
            Ok(Atomic::Empty)
        }
    }

    /// The interval `[value;+inf)` or `(value;+inf)`.
    pub fn lower_limit(value: T, closed: bool) -> Self {
        Interval {
            lower: Mark::lower(Some(value), closed),
            upper: Mark::upper(None, false),
        }
    }

    /// The interval `(-inf;value]` or `(-inf;value)`.
    pub fn upper_limit(value: T, closed: bool) -> Self {
        Interval {
            lower: Mark::lower(None, false),
            upper: Mark::upper(Some(value), closed),
        }
    }

    pub(crate) fn from_marks(lower: Mark<T>, upper: Mark<T>) -> Option<Self> {
        if lower <= upper {
            Some(Interval { lower, upper })
        } else {
            None
        }
    }

    /// Builds from marks already known to be ordered.
    pub(crate) fn raw(lower: Mark<T>, upper: Mark<T>) -> Self {
        debug_assert!(lower <= upper);
        Interval { lower, upper }
    }
}

impl<T: Ord + Clone> Interval<T> {
    /// The degenerate closed interval `[value;value]`.
    pub fn point(value: T) -> Self {
        Interval {
            lower: Mark::lower(Some(value.clone()), true),
            upper: Mark::upper(Some(value), true),
        }
    }
}

impl<T> Interval<T> {
    pub fn lower(&self) -> &Mark<T> {
        &self.lower
    }

    pub fn upper(&self) -> &Mark<T> {
        &self.upper
    }

    /// The finite lower value, or `None` when unbounded below.
    pub fn lower_value(&self) -> Option<&T> {
        self.lower.value().finite()
    }

    /// The finite upper value, or `None` when unbounded above.
    pub fn upper_value(&self) -> Option<&T> {
        self.upper.value().finite()
    }

    pub fn lower_closed(&self) -> bool {
        self.lower.is_closed()
    }

    pub fn upper_closed(&self) -> bool {
        self.upper.is_closed()
    }
}

impl<T: Ord> Interval<T> {
    /// True if every point of `self` is strictly before every point of
    /// `other`.
    pub fn before(&self, other: &Self) -> bool {
        self.upper < other.lower
    }

    /// True if every point of `self` is strictly after every point of
    /// `other`.
    pub fn after(&self, other: &Self) -> bool {
        self.lower > other.upper
    }

    /// Allen's *meets*: the end of `self` touches the start of `other`
    /// with no gap. Non-strict comparison also accepts the two bounds
    /// merely sharing their value, whatever the openness.
    pub fn meets(&self, other: &Self, strict: bool, reverse: bool) -> bool {
        if reverse {
            return other.meets(self, strict, false);
        }
        if strict {
            self.upper.near(other.lower())
        } else {
            self.upper.value() == other.lower.value()
        }
    }

    /// Allen's *overlaps*: the intervals share points but neither contains
    /// the other and their lower bounds differ.
    pub fn overlaps(&self, other: &Self, strict: bool, reverse: bool) -> bool {
        if reverse {
            return other.overlaps(self, strict, false);
        }
        if strict {
            self.lower < other.lower && other.lower < self.upper && self.upper < other.upper
        } else {
            self.lower <= other.lower && other.lower <= self.upper && self.upper <= other.upper
        }
    }

    /// Allen's *starts*: same lower mark, and `self` ends strictly before
    /// (`strict`) or no later than `other`.
    pub fn starts(&self, other: &Self, strict: bool, reverse: bool) -> bool {
        if reverse {
            return other.starts(self, strict, false);
        }
        if strict {
            self.lower == other.lower && self.upper < other.upper
        } else {
            self.lower.near(other.lower()) && self.upper <= other.upper
        }
    }

    /// Allen's *during*: `self` lies within the open interior (`strict`)
    /// or the closure of `other`.
    pub fn during(&self, other: &Self, strict: bool, reverse: bool) -> bool {
        if reverse {
            return other.during(self, strict, false);
        }
        if strict {
            self.lower > other.lower && self.upper < other.upper
        } else {
            self.lower >= other.lower && self.upper <= other.upper
        }
    }

    /// Allen's *finishes*: same upper mark, and `self` begins strictly
    /// after (`strict`) or no earlier than `other`.
    pub fn finishes(&self, other: &Self, strict: bool, reverse: bool) -> bool {
        if reverse {
            return other.finishes(self, strict, false);
        }
        if strict {
            self.lower > other.lower && self.upper == other.upper
        } else {
            self.lower >= other.lower && self.upper.near(other.upper())
        }
    }

    /// True if the two intervals share at least one point.
    pub fn intersects(&self, other: &Self) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }

    /// True if overlapping-or-near intervals would merge into one
    /// interval: they intersect or their facing bounds are near.
    pub(crate) fn mergeable(&self, other: &Self) -> bool {
        self.intersects(other)
            || self.upper.near(other.lower())
            || other.upper.near(self.lower())
    }
}

impl<T: Ord + Clone> Interval<T> {
    /// Smallest interval containing both operands.
    pub(crate) fn hull(&self, other: &Self) -> Self {
        Interval {
            lower: self.lower.clone().min(other.lower.clone()),
            upper: self.upper.clone().max(other.upper.clone()),
        }
    }

    /// Union of two intervals as a canonical set (two disjoint intervals
    /// do not union into an interval).
    pub fn union(&self, other: &Self) -> IntervalSet<T> {
        IntervalSet::from_iter([self.clone(), other.clone()])
    }

    /// Intersection of two intervals as a canonical set.
    pub fn intersection(&self, other: &Self) -> IntervalSet<T> {
        if !self.intersects(other) {
            return IntervalSet::new();
        }
        let lower = self.lower.clone().max(other.lower.clone());
        let upper = self.upper.clone().min(other.upper.clone());
        match Interval::from_marks(lower, upper) {
            Some(span) => IntervalSet::from_iter([span]),
            None => IntervalSet::new(),
        }
    }

    /// Complement within `(-inf;+inf)` as a canonical set of at most two
    /// intervals.
    pub fn complement(&self) -> IntervalSet<T> {
        let below = Interval::from_marks(Mark::lower(None, false), self.lower.pred());
        let above = Interval::from_marks(self.upper.succ(), Mark::upper(None, false));
        IntervalSet::from_iter(below.into_iter().chain(above))
    }

    /// Points of `self` not in `other`, as a canonical set.
    pub fn difference(&self, other: &Self) -> IntervalSet<T> {
        IntervalSet::from_iter([self.clone()]).difference(&IntervalSet::from_iter([other.clone()]))
    }

    /// Points in exactly one of the operands, as a canonical set.
    pub fn symmetric_difference(&self, other: &Self) -> IntervalSet<T> {
        IntervalSet::from_iter([self.clone()])
            .symmetric_difference(&IntervalSet::from_iter([other.clone()]))
    }
}

impl<T: Ord> Default for Atomic<T> {
    /// The unbounded interval, mirroring construction with no bounds.
    fn default() -> Self {
        Atomic::NonEmpty(Interval::full())
    }
}

impl<T> Atomic<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Atomic::Empty)
    }

    pub fn as_interval(&self) -> Option<&Interval<T>> {
        match self {
            Atomic::Empty => None,
            Atomic::NonEmpty(span) => Some(span),
        }
    }

    pub fn into_interval(self) -> Option<Interval<T>> {
        match self {
            Atomic::Empty => None,
            Atomic::NonEmpty(span) => Some(span),
        }
    }
}

macro_rules! atomic_relation {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        pub fn $name(&self, other: &Self, strict: bool, reverse: bool) -> bool {
            match (self, other) {
                (Atomic::NonEmpty(a), Atomic::NonEmpty(b)) => a.$name(b, strict, reverse),
                _ => false,
            }
        }
    };
}

impl<T: Ord> Atomic<T> {
    atomic_relation!(
        /// See [`Interval::meets`]; false when either side is empty.
        meets
    );
    atomic_relation!(
        /// See [`Interval::overlaps`]; false when either side is empty.
        overlaps
    );
    atomic_relation!(
        /// See [`Interval::starts`]; false when either side is empty.
        starts
    );
    atomic_relation!(
        /// See [`Interval::during`]; false when either side is empty.
        during
    );
    atomic_relation!(
        /// See [`Interval::finishes`]; false when either side is empty.
        finishes
    );

    /// True if every point of `self` is strictly before every point of
    /// `other`; false when either side is empty.
    pub fn before(&self, other: &Self) -> bool {
        match (self, other) {
            (Atomic::NonEmpty(a), Atomic::NonEmpty(b)) => a.before(b),
            _ => false,
        }
    }

    /// Mirror of [`Atomic::before`].
    pub fn after(&self, other: &Self) -> bool {
        match (self, other) {
            (Atomic::NonEmpty(a), Atomic::NonEmpty(b)) => a.after(b),
            _ => false,
        }
    }
}

impl<T: Ord + Clone> Atomic<T> {
    /// Union as a canonical set; see [`Interval::union`].
    pub fn union(&self, other: &Self) -> IntervalSet<T> {
        IntervalSet::from_iter(
            [self.clone(), other.clone()]
                .into_iter()
                .filter_map(Atomic::into_interval),
        )
    }

    /// Intersection as a canonical set.
    pub fn intersection(&self, other: &Self) -> IntervalSet<T> {
        match (self, other) {
            (Atomic::NonEmpty(a), Atomic::NonEmpty(b)) => a.intersection(b),
            _ => IntervalSet::new(),
        }
    }

    /// Complement within `(-inf;+inf)` as a canonical set.
    pub fn complement(&self) -> IntervalSet<T> {
        match self {
            Atomic::Empty => IntervalSet::from_iter([Interval::full()]),
            Atomic::NonEmpty(span) => span.complement(),
        }
    }
}

impl<T> From<Interval<T>> for Atomic<T> {
    fn from(span: Interval<T>) -> Self {
        Atomic::NonEmpty(span)
    }
}

impl<T: Display> Display for Interval<T> {
    /// Renders `[10;20)`, `(-inf;+inf)`, `['a';'b']`-style bounds.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{};{}{}",
            if self.lower.is_closed() { '[' } else { '(' },
            self.lower.value(),
            self.upper.value(),
            if self.upper.is_closed() { ']' } else { ')' },
        )
    }
}

impl<T: Display> Display for Atomic<T> {
    /// The empty set renders as the empty string, as interval-set joins
    /// expect.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Atomic::Empty => Ok(()),
            Atomic::NonEmpty(span) => span.fmt(f),
        }
    }
}

// =============================================================================
// Serde support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for Interval<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Interval", 4)?;
        s.serialize_field("lower", &self.lower_value())?;
        s.serialize_field("lower_closed", &self.lower_closed())?;
        s.serialize_field("upper", &self.upper_value())?;
        s.serialize_field("upper_closed", &self.upper_closed())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T: Ord + serde::Deserialize<'de>> serde::Deserialize<'de> for Interval<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw<T> {
            lower: Option<T>,
            lower_closed: bool,
            upper: Option<T>,
            upper_closed: bool,
        }

        let raw = Raw::deserialize(deserializer)?;
        match Interval::from_bounds(raw.lower, raw.upper, raw.lower_closed, raw.upper_closed) {
            Ok(Atomic::NonEmpty(span)) => Ok(span),
            Ok(Atomic::Empty) => Err(serde::de::Error::custom("interval is empty")),
            Err(err) => Err(serde::de::Error::custom(err)),
        }
    }
}
