//! Input accumulator
//!
//! Turns a stream of [`Key`] presses into an expression buffer and a display
//! string. The displayed value is derived from the buffer and the [`Mode`],
//! never stored separately.

use tracing::debug;

use crate::config::CalculatorConfig;
use crate::core::evaluator::Evaluator;
use crate::core::ERROR_MARKER;
use crate::key::Key;

/// Placeholder shown for an empty buffer
pub const EMPTY_DISPLAY: &str = "0";

/// What the display is currently showing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Showing the live expression (or the placeholder when empty)
    #[default]
    Editing,
    /// Showing a formatted evaluation result
    Result(String),
    /// Showing [`ERROR_MARKER`] after a failed evaluation
    ErrorShown,
}

impl Mode {
    /// True when the display shows the outcome of `=`
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Editing)
    }
}

/// Keystroke accumulator and display state
#[derive(Debug, Clone)]
pub struct Accumulator {
    expression: String,
    mode: Mode,
    evaluator: Evaluator,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator {
    /// Creates an empty accumulator with default precision
    #[must_use]
    pub fn new() -> Self {
        Self::with_evaluator(Evaluator::new())
    }

    /// Creates an accumulator with a custom result precision
    #[must_use]
    pub fn with_precision(precision: usize) -> Self {
        Self::with_evaluator(Evaluator::with_precision(precision))
    }

    /// Creates an accumulator from configuration
    #[must_use]
    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self::with_precision(config.precision)
    }

    fn with_evaluator(evaluator: Evaluator) -> Self {
        Self {
            expression: String::new(),
            mode: Mode::Editing,
            evaluator,
        }
    }

    /// Returns the expression buffer
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns the current display mode
    #[must_use]
    pub const fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Returns exactly what the display shows
    #[must_use]
    pub fn display(&self) -> String {
        match &self.mode {
            Mode::Result(text) => text.clone(),
            Mode::ErrorShown => ERROR_MARKER.to_string(),
            Mode::Editing if self.expression.is_empty() => EMPTY_DISPLAY.to_string(),
            Mode::Editing => self.expression.clone(),
        }
    }

    /// Applies one key press
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(_) | Key::Operator(_) | Key::Decimal => self.append(key),
            Key::Delete => self.delete(),
            Key::Reset => self.reset(),
            Key::Equals => self.evaluate(),
        }
        debug!(key = %key, expression = %self.expression, display = %self.display(), "key pressed");
    }

    /// Applies a raw string token; unknown tokens are ignored
    pub fn press_token(&mut self, token: &str) -> bool {
        match token.parse::<Key>() {
            Ok(key) => {
                self.press(key);
                true
            }
            Err(err) => {
                debug!(error = %err, "ignored key token");
                false
            }
        }
    }

    /// Applies a sequence of keys in order
    pub fn press_all(&mut self, keys: impl IntoIterator<Item = Key>) {
        for key in keys {
            self.press(key);
        }
    }

    /// Clears the buffer and returns to the placeholder
    pub fn reset(&mut self) {
        self.expression.clear();
        self.mode = Mode::Editing;
    }

    fn append(&mut self, key: Key) {
        let Some(ch) = key.append_char() else {
            return;
        };

        // a shown result or error is replaced, never extended
        if self.mode.is_terminal() {
            self.reset();
        }

        if matches!(key, Key::Digit(_)) && self.expression == EMPTY_DISPLAY {
            self.expression.clear();
        }
        self.expression.push(ch);
    }

    fn delete(&mut self) {
        if self.mode.is_terminal() {
            self.reset();
            return;
        }
        self.expression.pop();
    }

    fn evaluate(&mut self) {
        if self.expression.is_empty() {
            return;
        }

        let shown = self.evaluator.evaluate_display(&self.expression);
        self.expression.clear();
        self.mode = if shown == ERROR_MARKER {
            Mode::ErrorShown
        } else {
            Mode::Result(shown)
        };
    }
}
