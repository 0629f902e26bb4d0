use thiserror::Error;

use crate::interval::IntervalError;

/// Errors raised by mutating interval-set operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetError {
    #[error(transparent)]
    Invalid(#[from] IntervalError),

    #[error("Interval is not a member of the set")]
    NotFound,

    #[error("Cannot pop from an empty set")]
    EmptyPop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        assert_eq!(
            SetError::NotFound.to_string(),
            "Interval is not a member of the set"
        );
    }

    #[test]
    fn empty_pop_display() {
        assert_eq!(SetError::EmptyPop.to_string(), "Cannot pop from an empty set");
    }

    #[test]
    fn invalid_is_transparent() {
        let err = SetError::from(IntervalError::InvalidInterval);
        assert_eq!(err.to_string(), IntervalError::InvalidInterval.to_string());
    }

    #[test]
    fn error_equality() {
        assert_eq!(SetError::NotFound, SetError::NotFound);
        assert_ne!(SetError::NotFound, SetError::EmptyPop);
    }
}
