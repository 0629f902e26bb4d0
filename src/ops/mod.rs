//! Canonical-sequence engine.
//!
//! Every interval collection stores a *canonical sequence*: a vector of
//! non-empty intervals sorted by lower mark, pairwise disjoint, with no two
//! consecutive intervals near each other. The operations here maintain that
//! form ([`insert`]) and compute set algebra over two canonical sequences in
//! a single forward sweep ([`union`], [`intersection`], [`difference`],
//! [`symmetric_difference`], [`complement`]).

mod complement;
mod difference;
mod intersection;
mod union;

pub(crate) use complement::complement;
pub(crate) use difference::{difference, symmetric_difference};
pub(crate) use intersection::intersection;
pub(crate) use union::union;

use crate::interval::Interval;
use crate::mark::Mark;

/// True if `spans` is in canonical form: sorted by lower mark, pairwise
/// disjoint, and no two consecutive spans near enough to merge.
pub(crate) fn is_canonical<T: Ord>(spans: &[Interval<T>]) -> bool {
    spans.windows(2).all(|w| {
        let (prev, curr) = (&w[0], &w[1]);
        prev.upper() < curr.lower() && !prev.upper().near(curr.lower())
    })
}

/// Index of the first span whose upper mark is not before `lower`.
///
/// On a canonical sequence the predicate is monotone, so this is a binary
/// search; the result is the start of the window any query with that lower
/// mark can intersect.
pub(crate) fn locate<T: Ord>(spans: &[Interval<T>], lower: &Mark<T>) -> usize {
    spans.partition_point(|span| span.upper() < lower)
}

/// Inserts `span` into a canonical sequence, merging the run of
/// overlapping-or-near neighbours into a single span.
///
/// O(log n) to locate the window, O(k) to splice the run of k merged
/// spans. Construction from arbitrary input is repeated insertion.
pub(crate) fn insert<T: Ord + Clone>(spans: &mut Vec<Interval<T>>, span: Interval<T>) {
    debug_assert!(is_canonical(spans));
    let start = spans
        .partition_point(|s| s.upper() < span.lower() && !s.upper().near(span.lower()));
    let mut end = start;
    while end < spans.len()
        && (spans[end].lower() <= span.upper() || span.upper().near(spans[end].lower()))
    {
        end += 1;
    }
    if start == end {
        spans.insert(start, span);
        return;
    }
    let lower = span.lower().min(spans[start].lower()).clone();
    let upper = span.upper().max(spans[end - 1].upper()).clone();
    spans.splice(start..end, [Interval::raw(lower, upper)]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Atomic;

    fn iv(lower: i32, upper: i32) -> Interval<i32> {
        match Interval::from_bounds(Some(lower), Some(upper), true, false) {
            Ok(Atomic::NonEmpty(span)) => span,
            _ => panic!("expected a non-empty interval"),
        }
    }

    fn iv4(lower: i32, upper: i32, lower_closed: bool, upper_closed: bool) -> Interval<i32> {
        match Interval::from_bounds(Some(lower), Some(upper), lower_closed, upper_closed) {
            Ok(Atomic::NonEmpty(span)) => span,
            _ => panic!("expected a non-empty interval"),
        }
    }

    #[test]
    fn canonical_detects_overlap_and_nearness() {
        assert!(is_canonical::<i32>(&[]));
        assert!(is_canonical(&[iv(0, 10)]));
        assert!(is_canonical(&[iv(0, 10), iv(20, 30)]));
        // overlapping
        assert!(!is_canonical(&[iv(0, 10), iv(5, 30)]));
        // abutting [0;10) [10;30)
        assert!(!is_canonical(&[iv(0, 10), iv(10, 30)]));
        // (..;10) (10;..) leaves the point 10 out: canonical
        assert!(is_canonical(&[iv(0, 10), iv4(10, 30, false, false)]));
        // out of order
        assert!(!is_canonical(&[iv(20, 30), iv(0, 10)]));
    }

    #[test]
    fn insert_into_empty() {
        let mut spans = Vec::new();
        insert(&mut spans, iv(10, 20));
        assert_eq!(spans, vec![iv(10, 20)]);
    }

    #[test]
    fn insert_disjoint_keeps_order() {
        let mut spans = vec![iv(10, 20)];
        insert(&mut spans, iv(30, 40));
        insert(&mut spans, iv(0, 5));
        assert_eq!(spans, vec![iv(0, 5), iv(10, 20), iv(30, 40)]);
    }

    #[test]
    fn insert_merges_overlap() {
        let mut spans = vec![iv(0, 10), iv(20, 30)];
        insert(&mut spans, iv(5, 25));
        assert_eq!(spans, vec![iv(0, 30)]);
    }

    #[test]
    fn insert_merges_near_neighbours() {
        let mut spans = vec![iv(0, 10)];
        insert(&mut spans, iv(10, 20));
        assert_eq!(spans, vec![iv(0, 20)]);

        // closed-closed touching an open lower bound
        let mut spans = vec![iv4(0, 10, true, true)];
        insert(&mut spans, iv4(10, 20, false, false));
        assert_eq!(spans, vec![iv4(0, 20, true, false)]);
    }

    #[test]
    fn insert_does_not_merge_across_a_point_gap() {
        let mut spans = vec![iv(0, 10)];
        insert(&mut spans, iv4(10, 20, false, false));
        assert_eq!(spans, vec![iv(0, 10), iv4(10, 20, false, false)]);
        assert!(is_canonical(&spans));
    }

    #[test]
    fn locate_finds_first_candidate() {
        let spans = vec![iv(0, 5), iv(10, 15), iv(20, 25)];
        assert_eq!(locate(&spans, iv(12, 13).lower()), 1);
        assert_eq!(locate(&spans, iv(16, 17).lower()), 2);
        assert_eq!(locate(&spans, iv(30, 40).lower()), 3);
    }
}
