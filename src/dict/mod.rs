//! Interval-keyed dictionaries.
//!
//! An [`IntervalDict`] maps disjoint interval keys to values. The key axis
//! keeps the same canonical invariant as interval sets, except that adjacent
//! entries with *different* values are legal: merging equal-valued
//! neighbours is the explicit [`IntervalDict::compress`] pass, not an
//! invariant. [`MutableIntervalDict`] adds assignment, removal and
//! operator-combining updates.

mod error;
mod mutable;

pub use error::DictError;
pub use mutable::MutableIntervalDict;

use std::fmt::Display;
use std::ops::BitOr;

use crate::interval::{Atomic, Interval, IntervalError, IntervalLike};

/// A frozen dictionary over disjoint interval keys.
///
/// Immutable after construction; hashable when the value type is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntervalDict<T: Ord + Clone, V> {
    entries: Vec<(Interval<T>, V)>,
}

impl<T: Ord + Clone, V> IntervalDict<T, V> {
    /// Creates the empty dictionary.
    pub fn new() -> Self {
        IntervalDict {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Interval<T>, &V)> {
        self.entries.iter().map(|(span, value)| (span, value))
    }

    /// Interval keys in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = &Interval<T>> {
        self.entries.iter().map(|(span, _)| span)
    }

    /// Values in canonical key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub(crate) fn entries(&self) -> &[(Interval<T>, V)] {
        &self.entries
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Vec<(Interval<T>, V)> {
        &mut self.entries
    }

    /// The value of the single entry covering `span`, if any.
    pub(crate) fn covering_value(&self, span: &Interval<T>) -> Option<&V> {
        let index = self.entries.partition_point(|(s, _)| s.upper() < span.lower());
        self.entries.get(index).and_then(|(member, value)| {
            if member.lower() <= span.lower() && span.upper() <= member.upper() {
                Some(value)
            } else {
                None
            }
        })
    }

    /// Looks up the value covering the coerced key.
    ///
    /// Fails with [`DictError::KeyNotFound`] unless the whole key lies
    /// inside a single entry; partial coverage is a miss.
    pub fn get<L: Into<IntervalLike<T>>>(&self, key: L) -> Result<&V, DictError> {
        let span = match key.into().resolve()? {
            Atomic::Empty => return Err(DictError::KeyNotFound),
            Atomic::NonEmpty(span) => span,
        };
        self.covering_value(&span).ok_or(DictError::KeyNotFound)
    }

    /// True if the coerced key is fully covered by one entry.
    pub fn contains<L: Into<IntervalLike<T>>>(&self, key: L) -> Result<bool, IntervalError> {
        let span = match key.into().resolve()? {
            Atomic::Empty => return Ok(true),
            Atomic::NonEmpty(span) => span,
        };
        Ok(self.covering_value(&span).is_some())
    }

    /// Lazily yields the entries intersecting the query (non-strict) or
    /// properly contained in it (strict); see the interval-set `select`.
    pub fn select<L: Into<IntervalLike<T>>>(
        &self,
        key: L,
        strict: bool,
    ) -> Result<SelectEntries<'_, T, V>, IntervalError> {
        Ok(SelectEntries::new(
            &self.entries,
            key.into().resolve()?,
            strict,
        ))
    }
}

impl<T: Ord + Clone, V: Clone> IntervalDict<T, V> {
    /// Builds a dictionary from `(interval-like, value)` pairs.
    ///
    /// Later pairs overwrite earlier ones where they overlap, splitting the
    /// straddled entries; this is assignment, not combining.
    pub fn try_from_iter<I, L>(iterable: I) -> Result<Self, IntervalError>
    where
        I: IntoIterator<Item = (L, V)>,
        L: Into<IntervalLike<T>>,
    {
        Ok(MutableIntervalDict::try_from_iter(iterable)?.freeze())
    }

    /// A new dictionary restricted to the overlap with the coerced range.
    ///
    /// Entries are clipped to the range; uncovered sub-ranges are simply
    /// absent, so a partially uncovered query is not an error.
    pub fn get_range<L: Into<IntervalLike<T>>>(&self, key: L) -> Result<Self, IntervalError> {
        let span = match key.into().resolve()? {
            Atomic::Empty => return Ok(Self::new()),
            Atomic::NonEmpty(span) => span,
        };
        let mut entries = Vec::new();
        for (found, value) in SelectEntries::new(&self.entries, Atomic::NonEmpty(span.clone()), false)
        {
            let lower = found.lower().max(span.lower()).clone();
            let upper = found.upper().min(span.upper()).clone();
            entries.push((Interval::raw(lower, upper), value.clone()));
        }
        Ok(IntervalDict { entries })
    }

    /// Merges adjacent entries whose values are equal, returning the
    /// compressed dictionary. Idempotent; never required for validity.
    pub fn compress(&self) -> Self
    where
        V: PartialEq,
    {
        let mut entries: Vec<(Interval<T>, V)> = Vec::with_capacity(self.entries.len());
        for (span, value) in &self.entries {
            if let Some((last_span, last_value)) = entries.last_mut() {
                if last_value == value && last_span.mergeable(span) {
                    *last_span = last_span.hull(span);
                    continue;
                }
            }
            entries.push((span.clone(), value.clone()));
        }
        IntervalDict { entries }
    }

    /// A new dictionary with `other`'s entries assigned over `self`'s.
    pub fn merged(&self, other: &Self) -> Self {
        let mut result = self.clone().into_mutable();
        for (span, value) in &other.entries {
            result.assign(span.clone(), value.clone());
        }
        result.freeze()
    }

    /// Converts into the mutable variant (overwrite semantics, strict).
    pub fn into_mutable(self) -> MutableIntervalDict<T, V> {
        MutableIntervalDict::from_frozen(self)
    }
}

/// Lazy selection over dictionary entries. See [`IntervalDict::select`].
pub struct SelectEntries<'a, T: Ord + Clone, V> {
    entries: &'a [(Interval<T>, V)],
    query: Option<Interval<T>>,
    strict: bool,
    index: usize,
}

impl<'a, T: Ord + Clone, V> SelectEntries<'a, T, V> {
    fn new(entries: &'a [(Interval<T>, V)], query: Atomic<T>, strict: bool) -> Self {
        let query = query.into_interval();
        let index = match &query {
            Some(span) => {
                let mut index = entries.partition_point(|(s, _)| s.upper() < span.lower());
                if strict && index < entries.len() && entries[index].0.lower() < span.lower() {
                    index += 1;
                }
                index
            }
            None => entries.len(),
        };
        SelectEntries {
            entries,
            query,
            strict,
            index,
        }
    }
}

impl<'a, T: Ord + Clone, V> Iterator for SelectEntries<'a, T, V> {
    type Item = (&'a Interval<T>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let query = self.query.as_ref()?;
        let (span, value) = self.entries.get(self.index)?;
        if span.lower() > query.upper() {
            self.query = None;
            return None;
        }
        if span.upper() > query.upper() {
            self.query = None;
            if self.strict {
                return None;
            }
            return Some((span, value));
        }
        self.index += 1;
        Some((span, value))
    }
}

impl<T: Ord + Clone, V> Default for IntervalDict<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone, V> IntoIterator for IntervalDict<T, V> {
    type Item = (Interval<T>, V);
    type IntoIter = std::vec::IntoIter<(Interval<T>, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<T: Ord + Clone, V: Clone> BitOr for &IntervalDict<T, V> {
    type Output = IntervalDict<T, V>;

    fn bitor(self, rhs: Self) -> IntervalDict<T, V> {
        self.merged(rhs)
    }
}

impl<T: Ord + Clone + Display, V: Display> Display for IntervalDict<T, V> {
    /// Renders `{[10;15): 1, [20;25): 2}`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (span, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", span, value)?;
        }
        write!(f, "}}")
    }
}

// =============================================================================
// Serde support
// =============================================================================

#[cfg(feature = "serde")]
impl<T, V> serde::Serialize for IntervalDict<T, V>
where
    T: Ord + Clone + serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.entries.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, V> serde::Deserialize<'de> for IntervalDict<T, V>
where
    T: Ord + Clone + serde::Deserialize<'de>,
    V: Clone + serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<(Interval<T>, V)>::deserialize(deserializer)?;
        IntervalDict::try_from_iter(entries).map_err(serde::de::Error::custom)
    }
}
