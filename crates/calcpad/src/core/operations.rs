//! Binary arithmetic for the four keypad operators

use crate::core::{EvalResult, EvaluationError};

/// Type-safe operator set - exactly the keys on the pad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operation {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the operator symbol used in expressions
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Parses an operator symbol
    #[must_use]
    pub const fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Returns the precedence level (higher binds tighter)
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
        }
    }

    /// Returns true for `*` and `/`
    #[must_use]
    pub const fn is_multiplicative(&self) -> bool {
        matches!(self, Self::Multiply | Self::Divide)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Stateless arithmetic with division-by-zero and overflow checks
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl Calculator {
    /// Performs an operation on two operands
    pub fn calculate(a: f64, b: f64, op: Operation) -> EvalResult<f64> {
        match op {
            Operation::Add => Self::check_finite(a + b),
            Operation::Subtract => Self::check_finite(a - b),
            Operation::Multiply => Self::check_finite(a * b),
            Operation::Divide => Self::divide(a, b),
        }
    }

    /// Division: a / b
    pub fn divide(a: f64, b: f64) -> EvalResult<f64> {
        if b == 0.0 {
            return Err(EvaluationError::DivisionByZero);
        }
        Self::check_finite(a / b)
    }

    fn check_finite(result: f64) -> EvalResult<f64> {
        if result.is_finite() {
            Ok(result)
        } else {
            Err(EvaluationError::Overflow)
        }
    }
}
