//! spans - intervals over totally ordered domains
//!
//! A library for intervals with any combination of open, closed or infinite
//! bounds, and for collections of intervals kept in canonical form:
//!
//! * [`Mark`] encodes one interval endpoint comparably, with infinities as
//!   part of the enumeration rather than sentinel values;
//! * [`Atomic`] / [`Interval`] model a single convex subset and implement
//!   Allen's interval algebra;
//! * [`IntervalSet`] / [`MutableIntervalSet`] hold sorted, disjoint,
//!   non-adjacent intervals and compute set algebra with linear sweeps;
//! * [`IntervalDict`] / [`MutableIntervalDict`] attach a value to every
//!   interval key, combining overlapping updates through a configurable
//!   operator and compressing equal-valued neighbours on demand.
//!
//! Frozen variants are immutable after construction and hashable; mutable
//! variants rebuild their canonical sequence on each mutation.

pub mod dict;
pub mod interval;
pub mod mark;
pub mod set;

pub(crate) mod ops;

pub use dict::{DictError, IntervalDict, MutableIntervalDict};
pub use interval::{Atomic, Interval, IntervalError, IntervalLike};
pub use mark::{Extreme, Mark};
pub use set::{IntervalSet, MutableIntervalSet, SetError};
