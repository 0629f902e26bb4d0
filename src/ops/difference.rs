use crate::interval::Interval;

/// Computes `a` minus `b` over canonical sequences as `a` intersected with
/// the complement of `b`.
pub(crate) fn difference<T: Ord + Clone>(a: &[Interval<T>], b: &[Interval<T>]) -> Vec<Interval<T>> {
    super::intersection(a, &super::complement(b))
}

/// Computes the symmetric difference of two canonical sequences as
/// `(a | b) - (a & b)`.
pub(crate) fn symmetric_difference<T: Ord + Clone>(
    a: &[Interval<T>],
    b: &[Interval<T>],
) -> Vec<Interval<T>> {
    difference(&super::union(a, b), &super::intersection(a, b))
}
