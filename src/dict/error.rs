use thiserror::Error;

use crate::interval::IntervalError;

/// Errors raised by interval-dictionary lookups and updates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DictError {
    #[error(transparent)]
    Invalid(#[from] IntervalError),

    #[error("Key is not covered by any entry")]
    KeyNotFound,
}
