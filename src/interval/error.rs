use thiserror::Error;

/// Errors raised when building or coercing atomic intervals.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntervalError {
    #[error("Lower bound must not exceed upper bound")]
    InvalidBounds,

    #[error("Value cannot be coerced into an interval")]
    InvalidInterval,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_bounds_display() {
        assert_eq!(
            IntervalError::InvalidBounds.to_string(),
            "Lower bound must not exceed upper bound"
        );
    }

    #[test]
    fn invalid_interval_display() {
        assert_eq!(
            IntervalError::InvalidInterval.to_string(),
            "Value cannot be coerced into an interval"
        );
    }

    #[test]
    fn error_equality() {
        assert_eq!(IntervalError::InvalidBounds, IntervalError::InvalidBounds);
        assert_ne!(IntervalError::InvalidBounds, IntervalError::InvalidInterval);
    }
}
