use crate::interval::Interval;
use crate::mark::Mark;

/// Computes the complement of a canonical sequence within `(-inf;+inf)`.
///
/// Cursor walk over the gaps: each gap runs from the complementary mark of
/// the previous upper bound to the complementary mark of the next lower
/// bound, so endpoint closure flips. Degenerate gaps at the infinities
/// collapse and are dropped.
pub(crate) fn complement<T: Ord + Clone>(spans: &[Interval<T>]) -> Vec<Interval<T>> {
    debug_assert!(super::is_canonical(spans));

    let mut result = Vec::with_capacity(spans.len() + 1);
    let mut cursor: Mark<T> = Mark::lower(None, false);
    for span in spans {
        if let Some(gap) = Interval::from_marks(cursor, span.lower().pred()) {
            result.push(gap);
        }
        cursor = span.upper().succ();
    }
    if let Some(tail) = Interval::from_marks(cursor, Mark::upper(None, false)) {
        result.push(tail);
    }
    result
}
