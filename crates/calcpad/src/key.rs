//! Logical key tokens fed to the accumulator

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::core::Operation;

/// A single logical keypad key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Digit 0-9.
    ///
    /// Values above 9 append nothing; build digits with [`Key::digit`]
    /// to reject them up front.
    Digit(u8),
    /// Binary operator
    Operator(Operation),
    /// Decimal point
    Decimal,
    /// Delete last character
    Delete,
    /// Clear everything
    Reset,
    /// Evaluate
    Equals,
}

/// Rejected key token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown key token: '{token}'")]
pub struct KeyParseError {
    /// The token that failed to parse
    pub token: String,
}

impl Key {
    /// Every key, digits first
    pub const ALL: [Self; 18] = [
        Self::Digit(0),
        Self::Digit(1),
        Self::Digit(2),
        Self::Digit(3),
        Self::Digit(4),
        Self::Digit(5),
        Self::Digit(6),
        Self::Digit(7),
        Self::Digit(8),
        Self::Digit(9),
        Self::Operator(Operation::Add),
        Self::Operator(Operation::Subtract),
        Self::Operator(Operation::Multiply),
        Self::Operator(Operation::Divide),
        Self::Decimal,
        Self::Delete,
        Self::Reset,
        Self::Equals,
    ];

    /// Creates a digit key, rejecting values above 9
    #[must_use]
    pub const fn digit(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self::Digit(value))
        } else {
            None
        }
    }

    /// Returns the string token for this key
    #[must_use]
    pub fn token(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Decimal => ".".to_string(),
            Self::Delete => "del".to_string(),
            Self::Reset => "reset".to_string(),
            Self::Equals => "=".to_string(),
        }
    }

    /// Returns the character this key appends to the expression, if any
    #[must_use]
    pub const fn append_char(&self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(*d as u32, 10),
            Self::Operator(op) => Some(op.symbol()),
            Self::Decimal => Some('.'),
            Self::Delete | Self::Reset | Self::Equals => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "." => Ok(Self::Decimal),
            "del" => Ok(Self::Delete),
            "reset" => Ok(Self::Reset),
            "=" => Ok(Self::Equals),
            _ => {
                let mut chars = s.chars();
                let parsed = match (chars.next(), chars.next()) {
                    (Some(ch), None) => ch
                        .to_digit(10)
                        .map(|d| Self::Digit(d as u8))
                        .or_else(|| Operation::from_symbol(ch).map(Self::Operator)),
                    _ => None,
                };
                parsed.ok_or_else(|| KeyParseError {
                    token: s.to_string(),
                })
            }
        }
    }
}
