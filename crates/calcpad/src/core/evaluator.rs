//! Two-pass precedence evaluator
//!
//! Pass one folds every `*` and `/` into the operand on its left, pass two
//! applies `+` and `-` left to right over the folded terms.

use tracing::debug;

use crate::core::parser::{OperandChain, Parser};
use crate::core::{format_result, Calculator, EvalResult, Operation, DEFAULT_PRECISION, ERROR_MARKER};

/// Evaluator for flat keypad expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluator {
    precision: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator with [`DEFAULT_PRECISION`]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }

    /// Creates an evaluator with a custom number of fractional digits
    #[must_use]
    pub const fn with_precision(precision: usize) -> Self {
        Self { precision }
    }

    /// Fractional digits kept when formatting
    #[must_use]
    pub const fn precision(&self) -> usize {
        self.precision
    }

    /// Evaluates a parsed chain with `*` and `/` binding tighter than `+` and `-`
    pub fn evaluate_chain(&self, chain: &OperandChain) -> EvalResult<f64> {
        // (sign, term) pairs; the first term is always added
        let mut terms: Vec<(Operation, f64)> = Vec::with_capacity(chain.rest.len() + 1);
        let mut current = chain.first;
        let mut pending_sign = Operation::Add;

        for &(op, operand) in &chain.rest {
            if op.is_multiplicative() {
                current = Calculator::calculate(current, operand, op)?;
            } else {
                terms.push((pending_sign, current));
                pending_sign = op;
                current = operand;
            }
        }
        terms.push((pending_sign, current));

        terms
            .into_iter()
            .try_fold(0.0, |acc, (op, term)| Calculator::calculate(acc, term, op))
    }

    /// Evaluates a string expression
    pub fn evaluate_str(&self, input: &str) -> EvalResult<f64> {
        let chain = Parser::parse_str(input)?;
        self.evaluate_chain(&chain)
    }

    /// Formats a value with this evaluator's precision
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        format_result(value, self.precision)
    }

    /// Evaluates and formats, keeping the typed error
    pub fn evaluate_formatted(&self, input: &str) -> EvalResult<String> {
        self.evaluate_str(input).map(|value| self.format(value))
    }

    /// Evaluates for display: any failure becomes [`ERROR_MARKER`]
    #[must_use]
    pub fn evaluate_display(&self, input: &str) -> String {
        match self.evaluate_formatted(input) {
            Ok(text) => text,
            Err(err) => {
                debug!(expression = input, error = %err, "evaluation failed");
                ERROR_MARKER.to_string()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::core::EvaluationError;

    fn eval(input: &str) -> EvalResult<f64> {
        Evaluator::new().evaluate_str(input)
    }

    fn display(input: &str) -> String {
        Evaluator::new().evaluate_display(input)
    }

    // ===== Precedence =====

    #[test]
    fn test_multiply_binds_tighter_than_add() {
        assert_eq!(eval("2+3*4").unwrap(), 14.0);
        assert_eq!(eval("2*3+4").unwrap(), 10.0);
    }

    #[test]
    fn test_divide_binds_tighter_than_subtract() {
        assert_eq!(eval("10-6/2").unwrap(), 7.0);
    }

    #[test]
    fn test_left_associative_subtraction() {
        assert_eq!(eval("10-3-2").unwrap(), 5.0);
    }

    #[test]
    fn test_left_associative_division() {
        assert_eq!(eval("100/10/2").unwrap(), 5.0);
    }

    #[test]
    fn test_mixed_chain() {
        assert_eq!(eval("1+2*3-4/2").unwrap(), 5.0);
        assert_eq!(eval("8/4*3").unwrap(), 6.0);
    }

    #[test]
    fn test_subtract_then_multiply_group() {
        // 20 - (2*3) - 4
        assert_eq!(eval("20-2*3-4").unwrap(), 10.0);
    }

    #[test]
    fn test_single_operand() {
        assert_eq!(eval("42").unwrap(), 42.0);
        assert_eq!(eval("0.5").unwrap(), 0.5);
    }

    // ===== Errors =====

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("5/0"), Err(EvaluationError::DivisionByZero));
        assert_eq!(eval("1+5/0*2"), Err(EvaluationError::DivisionByZero));
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(eval("5+"), Err(EvaluationError::ParseError(_))));
        assert!(matches!(eval("1.2.3+1"), Err(EvaluationError::ParseError(_))));
        assert!(matches!(eval("-5"), Err(EvaluationError::ParseError(_))));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(eval(""), Err(EvaluationError::EmptyExpression));
    }

    #[test]
    fn test_overflow() {
        let huge = format!("{}*10", "9".repeat(308));
        assert_eq!(eval(&huge), Err(EvaluationError::Overflow));
    }

    // ===== Display =====

    #[test]
    fn test_display_precision() {
        assert_eq!(display("0.1+0.2"), "0.3");
        assert_eq!(display("1/3"), "0.33333");
        assert_eq!(display("2+3*4"), "14");
    }

    #[test]
    fn test_display_errors_are_uniform() {
        assert_eq!(display("5/0"), ERROR_MARKER);
        assert_eq!(display("5+"), ERROR_MARKER);
        assert_eq!(display(""), ERROR_MARKER);
    }

    #[test]
    fn test_display_negative_result() {
        assert_eq!(display("3-5"), "-2");
    }

    #[test]
    fn test_custom_precision() {
        let evaluator = Evaluator::with_precision(2);
        assert_eq!(evaluator.precision(), 2);
        assert_eq!(evaluator.evaluate_display("1/3"), "0.33");
    }

    #[test]
    fn test_evaluate_formatted_keeps_error_type() {
        let evaluator = Evaluator::default();
        assert_eq!(evaluator.evaluate_formatted("6/4"), Ok("1.5".to_string()));
        assert_eq!(
            evaluator.evaluate_formatted("6/0"),
            Err(EvaluationError::DivisionByZero)
        );
    }
}
