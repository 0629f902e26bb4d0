use std::cmp::Ordering;

use crate::interval::Interval;

/// Computes the intersection of two canonical sequences.
///
/// Two-cursor sweep advancing past the smaller upper mark, O(|a|+|b|).
/// The output inherits the gaps of its inputs, so it is canonical without
/// a re-merge pass.
pub(crate) fn intersection<T: Ord + Clone>(
    a: &[Interval<T>],
    b: &[Interval<T>],
) -> Vec<Interval<T>> {
    debug_assert!(super::is_canonical(a));
    debug_assert!(super::is_canonical(b));

    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(a.len().min(b.len()));
    let mut i = 0usize;
    let mut j = 0usize;

    while i < a.len() && j < b.len() {
        let ia = &a[i];
        let ib = &b[j];

        if ia.intersects(ib) {
            let lower = ia.lower().max(ib.lower()).clone();
            let upper = ia.upper().min(ib.upper()).clone();
            result.push(Interval::raw(lower, upper));
        }

        match ia.upper().cmp(ib.upper()) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }

    result
}
