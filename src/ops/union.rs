use crate::interval::Interval;

/// Appends `span` to the output run, merging with the last emitted span
/// when they overlap or are near.
fn merge_into<T: Ord + Clone>(result: &mut Vec<Interval<T>>, span: Interval<T>) {
    if let Some(last) = result.last_mut() {
        if last.mergeable(&span) {
            *last = last.hull(&span);
            return;
        }
    }
    result.push(span);
}

/// Computes the union of two canonical sequences.
///
/// Single forward sweep ordered by lower mark, O(|a|+|b|); the output is
/// re-normalized on the fly by [`merge_into`].
pub(crate) fn union<T: Ord + Clone>(a: &[Interval<T>], b: &[Interval<T>]) -> Vec<Interval<T>> {
    debug_assert!(super::is_canonical(a));
    debug_assert!(super::is_canonical(b));

    let mut result = Vec::with_capacity(a.len() + b.len());
    let mut i = 0usize;
    let mut j = 0usize;

    while i < a.len() && j < b.len() {
        if a[i].lower() <= b[j].lower() {
            merge_into(&mut result, a[i].clone());
            i += 1;
        } else {
            merge_into(&mut result, b[j].clone());
            j += 1;
        }
    }

    while i < a.len() {
        merge_into(&mut result, a[i].clone());
        i += 1;
    }

    while j < b.len() {
        merge_into(&mut result, b[j].clone());
        j += 1;
    }

    result
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
    fn union_disjoint() {
        let u = union(&[iv(0, 5)], &[iv(10, 15)]);
        assert_eq!(u, vec![iv(0, 5), iv(10, 15)]);
    }

    #[test]
    fn union_overlapping() {
        let u = union(&[iv(0, 10)], &[iv(5, 15)]);
        assert_eq!(u, vec![iv(0, 15)]);
    }

    #[test]
    fn union_abutting_merges() {
        let u = union(&[iv(0, 5)], &[iv(5, 10)]);
        assert_eq!(u, vec![iv(0, 10)]);
    }

    #[test]
    fn union_point_touch_merges() {
        // [1;3] followed by [3;10) covers [1;10)
        let u = union(&[iv4(1, 3, true, true)], &[iv(3, 10)]);
        assert_eq!(u, vec![iv(1, 10)]);
    }

    #[test]
    fn union_open_gap_is_kept() {
        // [0;10) and (10;20) leave the point 10 uncovered
        let u = union(&[iv(0, 10)], &[iv4(10, 20, false, false)]);
        assert_eq!(u, vec![iv(0, 10), iv4(10, 20, false, false)]);
    }

    #[test]
    fn union_interleaved() {
        let a = [iv(0, 2), iv(5, 10), iv(13, 23), iv(24, 25)];
        let b = [iv4(1, 5, true, true), iv(8, 12), iv(15, 18), iv4(20, 24, true, true)];
        let u = union(&a, &b);
        assert_eq!(u, vec![iv(0, 12), iv(13, 25)]);
    }

    #[test]
    fn union_with_empty_side() {
        let a = [iv(0, 2)];
        assert_eq!(union(&a, &[]), vec![iv(0, 2)]);
        assert_eq!(union(&[], &a), vec![iv(0, 2)]);
        assert!(union::<i32>(&[], &[]).is_empty());
    }
}
