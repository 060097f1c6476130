//! Error types for the forecast-eval library.

use thiserror::Error;

/// Result type alias for evaluation operations.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors that can occur while evaluating forecasts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Input data is empty, has mismatched lengths, or is otherwise malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A metric denominator evaluated to zero.
    #[error("division by zero: {0}")]
    DivisionByZero(String),
}

impl EvalError {
    pub(crate) fn length_mismatch(what: &str, expected: usize, got: usize) -> Self {
        Self::InvalidInput(format!("{what} length mismatch: expected {expected}, got {got}"))
    }
}
