//! Mutable interval dictionaries.

use std::fmt::{self, Display};
use std::ops::{BitOrAssign, Deref};
use std::sync::Arc;

use crate::interval::{Atomic, Interval, IntervalError, IntervalLike};
use crate::mark::Mark;
use crate::ops;
use crate::set::IntervalSet;

use super::{DictError, IntervalDict};

/// The configured combining operator: `op(old, new) -> merged`.
type Combine<V> = Arc<dyn Fn(&V, &V) -> V>;

/// The configured default-value factory.
type Factory<V> = Arc<dyn Fn() -> V>;

/// An interval dictionary with in-place assignment, removal and
/// operator-combining updates.
///
/// Assignment (`insert`) always overwrites the covered range, splitting
/// straddled entries and keeping their uncovered remainders. Combining
/// updates (`merge`, `update`) apply the configured operator where the new
/// entry overlaps existing coverage; with no operator configured they
/// degrade to assignment.
///
/// The `relaxed` mode batches updates through a single overlay sweep; it
/// requires the operator to be commutative and associative.
pub struct MutableIntervalDict<T: Ord + Clone, V> {
    dict: IntervalDict<T, V>,
    combine: Option<Combine<V>>,
    default: Option<Factory<V>>,
    strict: bool,
}

impl<T: Ord + Clone, V> MutableIntervalDict<T, V> {
    /// Creates an empty dictionary with overwrite semantics.
    pub fn new() -> Self {
        MutableIntervalDict {
            dict: IntervalDict::new(),
            combine: None,
            default: None,
            strict: true,
        }
    }

    /// Sets the combining operator applied where updates overlap existing
    /// entries.
    pub fn combine(mut self, op: impl Fn(&V, &V) -> V + 'static) -> Self {
        self.combine = Some(Arc::new(op));
        self
    }

    /// Switches updates to the batched overlay sweep. Only sound when the
    /// combining operator is commutative and associative.
    pub fn relaxed(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Sets the factory used by [`MutableIntervalDict::get_or_insert`]
    /// for uncovered keys.
    pub fn default_factory(mut self, factory: impl Fn() -> V + 'static) -> Self {
        self.default = Some(Arc::new(factory));
        self
    }

    pub(crate) fn from_frozen(dict: IntervalDict<T, V>) -> Self {
        MutableIntervalDict {
            dict,
            combine: None,
            default: None,
            strict: true,
        }
    }

    /// Converts into the frozen, hashable variant, dropping the update
    /// configuration.
    pub fn freeze(self) -> IntervalDict<T, V> {
        self.dict
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.dict.entries_mut().clear();
    }
}

impl<T: Ord + Clone, V: Clone> MutableIntervalDict<T, V> {
    /// Builds a dictionary from pairs with overwrite semantics.
    pub fn try_from_iter<I, L>(iterable: I) -> Result<Self, IntervalError>
    where
        I: IntoIterator<Item = (L, V)>,
        L: Into<IntervalLike<T>>,
    {
        let mut dict = Self::new();
        dict.update(iterable)?;
        Ok(dict)
    }

    /// A frozen snapshot of the current content.
    pub fn to_frozen(&self) -> IntervalDict<T, V> {
        self.dict.clone()
    }

    /// Assigns `value` to the coerced range, overwriting existing coverage.
    ///
    /// Entries extending beyond the range are split and their outside
    /// regions retained. Assigning over the empty interval is a no-op.
    pub fn insert<L: Into<IntervalLike<T>>>(
        &mut self,
        key: L,
        value: V,
    ) -> Result<(), IntervalError> {
        if let Atomic::NonEmpty(span) = key.into().resolve()? {
            self.assign(span, value);
        }
        Ok(())
    }

    /// Removes coverage over the coerced range, splitting straddling
    /// entries. The range is left unmapped; removing an uncovered range is
    /// a no-op.
    pub fn remove<L: Into<IntervalLike<T>>>(&mut self, key: L) -> Result<(), IntervalError> {
        if let Atomic::NonEmpty(span) = key.into().resolve()? {
            Self::carve(self.dict.entries_mut(), &span);
        }
        Ok(())
    }

    /// Applies one entry through the combining operator: overlapped
    /// regions become `op(old, new)`, uncovered regions get `new` as-is.
    pub fn merge<L: Into<IntervalLike<T>>>(
        &mut self,
        key: L,
        value: V,
    ) -> Result<(), IntervalError> {
        if let Atomic::NonEmpty(span) = key.into().resolve()? {
            self.merge_span(span, value);
        }
        Ok(())
    }

    /// Folds a sequence of pairs through [`MutableIntervalDict::merge`].
    ///
    /// All keys are coerced before any mutation, so a malformed pair fails
    /// the whole update without partial effects. In `relaxed` mode the
    /// batch is applied in one overlay sweep instead of entry by entry.
    pub fn update<I, L>(&mut self, iterable: I) -> Result<(), IntervalError>
    where
        I: IntoIterator<Item = (L, V)>,
        L: Into<IntervalLike<T>>,
    {
        let mut incoming: Vec<(Interval<T>, V)> = Vec::new();
        for (key, value) in iterable {
            if let Atomic::NonEmpty(span) = key.into().resolve()? {
                incoming.push((span, value));
            }
        }
        match self.combine.clone() {
            Some(op) if !self.strict => {
                let mut all = std::mem::take(self.dict.entries_mut());
                all.extend(incoming);
                *self.dict.entries_mut() = overlay(all, op.as_ref());
            }
            _ => {
                for (span, value) in incoming {
                    self.merge_span(span, value);
                }
            }
        }
        Ok(())
    }

    /// Looks up the value covering the coerced key, inserting one from the
    /// default factory on a miss.
    ///
    /// Without a configured factory this is a plain lookup failing with
    /// [`DictError::KeyNotFound`].
    pub fn get_or_insert<L: Into<IntervalLike<T>>>(&mut self, key: L) -> Result<V, DictError> {
        let span = match key.into().resolve()? {
            Atomic::Empty => return Err(DictError::KeyNotFound),
            Atomic::NonEmpty(span) => span,
        };
        if let Some(value) = self.dict.covering_value(&span) {
            return Ok(value.clone());
        }
        let Some(factory) = self.default.clone() else {
            return Err(DictError::KeyNotFound);
        };
        let value = factory();
        self.assign(span, value.clone());
        Ok(value)
    }

    /// Compresses equal-valued adjacent entries in place.
    pub fn compress_in_place(&mut self)
    where
        V: PartialEq,
    {
        self.dict = self.dict.compress();
    }

    pub(crate) fn assign(&mut self, span: Interval<T>, value: V) {
        let entries = self.dict.entries_mut();
        Self::carve(entries, &span);
        let index = entries.partition_point(|(s, _)| s.lower() < span.lower());
        entries.insert(index, (span, value));
    }

    /// Removes the region covered by `span`, splitting the first and last
    /// overlapped entries and retaining their outside remainders.
    fn carve(entries: &mut Vec<(Interval<T>, V)>, span: &Interval<T>) {
        let start = entries.partition_point(|(s, _)| s.upper() < span.lower());
        let mut end = start;
        while end < entries.len() && entries[end].0.lower() <= span.upper() {
            end += 1;
        }
        if start == end {
            return;
        }
        let mut replacement: Vec<(Interval<T>, V)> = Vec::new();
        let (first_span, first_value) = &entries[start];
        if first_span.lower() < span.lower() {
            if let Some(left) =
                Interval::from_marks(first_span.lower().clone(), span.lower().pred())
            {
                replacement.push((left, first_value.clone()));
            }
        }
        let (last_span, last_value) = &entries[end - 1];
        if last_span.upper() > span.upper() {
            if let Some(right) =
                Interval::from_marks(span.upper().succ(), last_span.upper().clone())
            {
                replacement.push((right, last_value.clone()));
            }
        }
        entries.splice(start..end, replacement);
    }

    fn merge_span(&mut self, span: Interval<T>, value: V) {
        let Some(op) = self.combine.clone() else {
            self.assign(span, value);
            return;
        };
        let entries = self.dict.entries();
        let start = entries.partition_point(|(s, _)| s.upper() < span.lower());
        let mut pieces: Vec<(Interval<T>, V)> = Vec::new();
        let mut covered: Vec<Interval<T>> = Vec::new();
        let mut index = start;
        while index < entries.len() && entries[index].0.lower() <= span.upper() {
            let (found, old) = &entries[index];
            let lower = found.lower().max(span.lower()).clone();
            let upper = found.upper().min(span.upper()).clone();
            let clipped = Interval::raw(lower, upper);
            pieces.push((clipped.clone(), op(old, &value)));
            covered.push(clipped);
            index += 1;
        }
        // the parts of the new range not covered by any entry keep the new
        // value unchanged
        let covered: IntervalSet<T> = covered.into_iter().collect();
        for gap in ops::difference(&[span], covered.as_slice()) {
            pieces.push((gap, value.clone()));
        }
        for (piece, merged) in pieces {
            self.assign(piece, merged);
        }
    }
}

/// Single-pass overlay of possibly overlapping entries.
///
/// Sweeps boundary events in mark order, keeping the currently open
/// entries in an active list; each elementary segment between two
/// boundaries is emitted with the fold of the active values under `op`.
fn overlay<T: Ord + Clone, V: Clone>(
    mut entries: Vec<(Interval<T>, V)>,
    op: &dyn Fn(&V, &V) -> V,
) -> Vec<(Interval<T>, V)> {
    entries.sort_by(|a, b| a.0.lower().cmp(b.0.lower()));

    let mut out: Vec<(Interval<T>, V)> = Vec::new();
    let mut active: Vec<(Mark<T>, V)> = Vec::new();
    let mut pending = entries.into_iter().peekable();
    let mut lower: Mark<T> = match pending.peek() {
        Some((span, _)) => span.lower().clone(),
        None => return out,
    };

    loop {
        if active.is_empty() {
            match pending.peek() {
                Some((span, _)) => lower = span.lower().clone(),
                None => break,
            }
        }
        while pending
            .peek()
            .map_or(false, |(span, _)| *span.lower() == lower)
        {
            if let Some((span, value)) = pending.next() {
                active.push((span.upper().clone(), value));
            }
        }
        let Some(min_upper) = active.iter().map(|(upper, _)| upper).min() else {
            break;
        };
        let mut upper = min_upper.clone();
        if let Some((next_span, _)) = pending.peek() {
            let cap = next_span.lower().pred();
            if cap < upper {
                upper = cap;
            }
        }
        let mut values = active.iter().map(|(_, value)| value);
        let Some(first) = values.next() else { break };
        let mut merged = first.clone();
        for value in values {
            merged = op(&merged, value);
        }
        out.push((Interval::raw(lower.clone(), upper.clone()), merged));
        active.retain(|(end, _)| *end > upper);
        lower = upper.succ();
    }
    out
}

impl<T: Ord + Clone, V> Default for MutableIntervalDict<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone, V> Deref for MutableIntervalDict<T, V> {
    type Target = IntervalDict<T, V>;

    fn deref(&self) -> &IntervalDict<T, V> {
        &self.dict
    }
}

impl<T: Ord + Clone, V: Clone> From<IntervalDict<T, V>> for MutableIntervalDict<T, V> {
    fn from(dict: IntervalDict<T, V>) -> Self {
        Self::from_frozen(dict)
    }
}

impl<T: Ord + Clone, V: Clone> BitOrAssign<&IntervalDict<T, V>> for MutableIntervalDict<T, V> {
    /// Merges `other`'s entries through the configured operator.
    fn bitor_assign(&mut self, rhs: &IntervalDict<T, V>) {
        for (span, value) in rhs.iter() {
            self.merge_span(span.clone(), value.clone());
        }
    }
}

impl<T: Ord + Clone, V: Clone> Clone for MutableIntervalDict<T, V> {
    fn clone(&self) -> Self {
        MutableIntervalDict {
            dict: self.dict.clone(),
            combine: self.combine.clone(),
            default: self.default.clone(),
            strict: self.strict,
        }
    }
}

impl<T: Ord + Clone + fmt::Debug, V: fmt::Debug> fmt::Debug for MutableIntervalDict<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutableIntervalDict")
            .field("entries", &self.dict.entries())
            .field("combine", &self.combine.is_some())
            .field("default", &self.default.is_some())
            .field("strict", &self.strict)
            .finish()
    }
}

impl<T: Ord + Clone, V: PartialEq> PartialEq for MutableIntervalDict<T, V> {
    /// Equality ignores the update configuration and compares entries.
    fn eq(&self, other: &Self) -> bool {
        self.dict == other.dict
    }
}

impl<T: Ord + Clone + Display, V: Display> Display for MutableIntervalDict<T, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.dict.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn mdict(items: Vec<((i32, i32), i32)>) -> MutableIntervalDict<i32, i32> {
        MutableIntervalDict::try_from_iter(items).unwrap()
    }

    #[test]
    fn insert_splits_straddling_entries() {
        let mut a = mdict(vec![((10, 15), 1), ((20, 25), 2), ((30, 35), 3)]);
        a.insert(12, 4).unwrap();
        assert_eq!(
            a.to_string(),
            "{[10;12): 1, [12;12]: 4, (12;15): 1, [20;25): 2, [30;35): 3}"
        );
        a.insert((13, 31), 5).unwrap();
        assert_eq!(
            a.to_string(),
            "{[10;12): 1, [12;12]: 4, (12;13): 1, [13;31): 5, [31;35): 3}"
        );
    }

    #[test]
    fn insert_full_range_replaces_everything() {
        let mut a = mdict(vec![((10, 15), 1), ((20, 25), 2)]);
        a.insert((None, None), 0).unwrap();
        assert_eq!(a.to_string(), "{(-inf;+inf): 0}");
    }

    #[test]
    fn remove_splits_and_unmaps() {
        let mut a = mdict(vec![((10, 15), 1), ((20, 25), 2), ((30, 35), 3)]);
        a.remove(12).unwrap();
        assert_eq!(
            a.to_string(),
            "{[10;12): 1, (12;15): 1, [20;25): 2, [30;35): 3}"
        );
        a.remove((13, 31)).unwrap();
        assert_eq!(a.to_string(), "{[10;12): 1, (12;13): 1, [31;35): 3}");
        a.remove((None, None)).unwrap();
        assert!(a.is_empty());
    }

    #[test]
    fn remove_uncovered_range_is_noop() {
        let mut a = mdict(vec![((10, 15), 1)]);
        a.remove((20, 30)).unwrap();
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn merge_without_operator_overwrites() {
        let mut a = mdict(vec![((10, 20), 1)]);
        a.merge((15, 25), 2).unwrap();
        assert_eq!(a.to_string(), "{[10;15): 1, [15;25): 2}");
    }

    #[test]
    fn merge_applies_operator_on_overlap() {
        let mut a: MutableIntervalDict<i32, i32> =
            MutableIntervalDict::new().combine(|old: &i32, new: &i32| old + new);
        a.update(vec![((1, 10), 1)]).unwrap();
        assert_eq!(a.to_string(), "{[1;10): 1}");
        a.update(vec![((5, 20), 2)]).unwrap();
        assert_eq!(a.to_string(), "{[1;5): 1, [5;10): 3, [10;20): 2}");
        a.update(vec![((10, 30), 3)]).unwrap();
        assert_eq!(a.to_string(), "{[1;5): 1, [5;10): 3, [10;20): 5, [20;30): 3}");
    }

    #[test]
    fn relaxed_update_matches_strict_result() {
        let entries = vec![((1, 10), 1), ((5, 20), 2), ((10, 30), 3)];

        let mut strict: MutableIntervalDict<i32, i32> =
            MutableIntervalDict::new().combine(|a: &i32, b: &i32| a + b);
        strict.update(entries.clone()).unwrap();

        let mut relaxed: MutableIntervalDict<i32, i32> = MutableIntervalDict::new()
            .combine(|a: &i32, b: &i32| a + b)
            .relaxed();
        relaxed.update(entries).unwrap();

        assert_eq!(strict, relaxed);
        assert_eq!(
            relaxed.to_string(),
            "{[1;5): 1, [5;10): 3, [10;20): 5, [20;30): 3}"
        );
    }

    #[test]
    fn relaxed_set_union_accumulation() {
        let mut a: MutableIntervalDict<i32, BTreeSet<i32>> = MutableIntervalDict::new()
            .combine(|old: &BTreeSet<i32>, new: &BTreeSet<i32>| old | new)
            .relaxed();
        let single = |n: i32| BTreeSet::from([n]);

        a.update(vec![((1, 10), single(1))]).unwrap();
        a.update(vec![((5, 20), single(2))]).unwrap();
        a.update(vec![((10, 30), single(1))]).unwrap();

        let rendered: Vec<(String, Vec<i32>)> = a
            .iter()
            .map(|(span, value)| (span.to_string(), value.iter().copied().collect()))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("[1;5)".to_string(), vec![1]),
                ("[5;10)".to_string(), vec![1, 2]),
                ("[10;20)".to_string(), vec![1, 2]),
                ("[20;30)".to_string(), vec![1]),
            ]
        );
        let compressed = a.to_frozen().compress();
        let rendered: Vec<String> = compressed.keys().map(|span| span.to_string()).collect();
        assert_eq!(rendered, vec!["[1;5)", "[5;20)", "[20;30)"]);
    }

    #[test]
    fn update_rejects_malformed_pairs_without_partial_effects() {
        let mut a = mdict(vec![((0, 5), 1)]);
        let err = a.update(vec![((7, 9), 2), ((9, 7), 3)]);
        assert!(err.is_err());
        assert_eq!(a.to_string(), "{[0;5): 1}");
    }

    #[test]
    fn get_or_insert_uses_factory() {
        let mut a = MutableIntervalDict::<i32, i32>::new().default_factory(|| 0);
        assert_eq!(a.get_or_insert((1, 5)), Ok(0));
        assert_eq!(a.to_string(), "{[1;5): 0}");
        a.insert((1, 5), 9).unwrap();
        assert_eq!(a.get_or_insert(3), Ok(9));
    }

    #[test]
    fn get_or_insert_without_factory_is_plain_lookup() {
        let mut a = mdict(vec![((0, 5), 1)]);
        assert_eq!(a.get_or_insert(1), Ok(1));
        assert_eq!(a.get_or_insert(9), Err(DictError::KeyNotFound));
    }

    #[test]
    fn bitor_assign_merges_with_operator() {
        let b = IntervalDict::try_from_iter(vec![((5, 20), 2)]).unwrap();
        let mut a: MutableIntervalDict<i32, i32> =
            MutableIntervalDict::new().combine(|old: &i32, new: &i32| old + new);
        a.update(vec![((1, 10), 1)]).unwrap();
        a |= &b;
        assert_eq!(a.to_string(), "{[1;5): 1, [5;10): 3, [10;20): 2}");
    }

    #[test]
    fn compress_in_place() {
        let mut a = mdict(vec![((10, 15), 1), ((15, 25), 1)]);
        a.compress_in_place();
        assert_eq!(a.to_string(), "{[10;25): 1}");
    }

    #[test]
    fn clear_empties() {
        let mut a = mdict(vec![((10, 15), 1)]);
        a.clear();
        assert!(a.is_empty());
    }

    #[test]
    fn read_api_through_deref() {
        let a = mdict(vec![((10, 15), 1), ((20, 25), 2)]);
        assert_eq!(a.get(12), Ok(&1));
        assert_eq!(a.len(), 2);
        let selected: Vec<i32> = a.select((0, 30), false).unwrap().map(|(_, v)| *v).collect();
        assert_eq!(selected, vec![1, 2]);
    }

    #[test]
    fn keys_stay_canonical_under_random_updates() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(11);
        let mut a = MutableIntervalDict::<i32, i32>::new().combine(|x: &i32, y: &i32| x + y);
        for _ in 0..300 {
            let lower = rng.gen_range(-50..50);
            let width = rng.gen_range(1..15);
            match rng.gen_range(0..3) {
                0 => a.insert((lower, lower + width), rng.gen_range(0..5)).unwrap(),
                1 => a.merge((lower, lower + width), rng.gen_range(0..5)).unwrap(),
                _ => a.remove((lower, lower + width)).unwrap(),
            }
            let keys: Vec<_> = a.keys().cloned().collect();
            // entries must stay sorted and pairwise disjoint; near
            // neighbours with different values are legal
            for window in keys.windows(2) {
                assert!(window[0].upper() < window[1].lower());
            }
        }
    }
}
