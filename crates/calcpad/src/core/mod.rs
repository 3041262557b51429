//! Evaluation core: tokenizer, two-pass evaluator and result formatting
//!
//! Everything in here is pure. Errors are typed for tests and logs, but the
//! accumulator only ever sees the uniform [`ERROR_MARKER`].

pub mod evaluator;
mod format;
mod operations;
pub mod parser;

pub use format::{format_result, DEFAULT_PRECISION};
pub use operations::{Calculator, Operation};

use thiserror::Error;

/// Display string shown for any failed evaluation
pub const ERROR_MARKER: &str = "Error";

/// Result type for evaluation
pub type EvalResult<T> = Result<T, EvaluationError>;

/// Evaluation failures - every variant surfaces as [`ERROR_MARKER`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// Intermediate or final result is not finite
    #[error("Overflow: result exceeds maximum value")]
    Overflow,
    /// Malformed expression
    #[error("Invalid expression: {0}")]
    ParseError(String),
    /// Nothing to evaluate
    #[error("Empty expression")]
    EmptyExpression,
}

impl EvaluationError {
    /// Creates a parse error from any message
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError(message.into())
    }
}
