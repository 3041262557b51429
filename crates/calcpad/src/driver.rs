//! Unified calculator driver
//!
//! Scenario checks are written once against [`CalculatorDriver`] and run
//! against every front end: the bare accumulator, the terminal app and the
//! DOM-backed widget.

use crate::accumulator::Accumulator;
use crate::key::Key;

/// Abstract driver for keypad interactions
pub trait CalculatorDriver {
    /// Presses one key
    fn press(&mut self, key: Key);

    /// Returns exactly what the display shows
    fn display(&self) -> String;

    /// Presses whitespace-separated key tokens; unknown tokens are skipped
    fn press_tokens(&mut self, tokens: &str) {
        for token in tokens.split_whitespace() {
            if let Ok(key) = token.parse() {
                self.press(key);
            }
        }
    }

    /// Returns to the initial state
    fn reset(&mut self) {
        self.press(Key::Reset);
    }
}

/// Driver over a bare [`Accumulator`]
#[derive(Debug, Default)]
pub struct CoreDriver {
    accumulator: Accumulator,
}

impl CoreDriver {
    /// Creates a driver with a fresh accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the underlying accumulator
    #[must_use]
    pub const fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }
}

impl CalculatorDriver for CoreDriver {
    fn press(&mut self, key: Key) {
        self.accumulator.press(key);
    }

    fn display(&self) -> String {
        self.accumulator.display()
    }
}

/// Terminal driver
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::CalculatorDriver;
    use crate::key::Key;
    use crate::tui::CalculatorApp;

    /// Driver over the terminal app state
    #[derive(Debug)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl Default for TuiDriver {
        fn default() -> Self {
            Self::new()
        }
    }

    impl TuiDriver {
        /// Creates a TUI driver with in-memory preferences
        #[must_use]
        pub fn new() -> Self {
            Self {
                app: CalculatorApp::new(),
            }
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub const fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, key: Key) {
            self.app.press(key);
        }

        fn display(&self) -> String {
            self.app.display()
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified scenarios =====
// These work with ANY CalculatorDriver implementation

/// Verifies the initial and reset states show the placeholder
pub fn verify_initial_state<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    assert_eq!(driver.display(), "0");
}

/// Verifies the four operators
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    for (keys, expected) in [
        ("2 + 3 =", "5"),
        ("1 0 - 4 =", "6"),
        ("6 * 7 =", "42"),
        ("2 0 / 4 =", "5"),
    ] {
        driver.reset();
        driver.press_tokens(keys);
        assert_eq!(driver.display(), expected, "keys: {keys}");
    }
}

/// Verifies `*` and `/` bind tighter than `+` and `-`
pub fn verify_precedence<D: CalculatorDriver>(driver: &mut D) {
    for (keys, expected) in [("2 + 3 * 4 =", "14"), ("1 0 - 6 / 2 =", "7")] {
        driver.reset();
        driver.press_tokens(keys);
        assert_eq!(driver.display(), expected, "keys: {keys}");
    }
}

/// Verifies bounded precision formatting
pub fn verify_formatting<D: CalculatorDriver>(driver: &mut D) {
    for (keys, expected) in [("0 . 1 + 0 . 2 =", "0.3"), ("1 / 3 =", "0.33333")] {
        driver.reset();
        driver.press_tokens(keys);
        assert_eq!(driver.display(), expected, "keys: {keys}");
    }
}

/// Verifies failures show the error marker and recover on the next digit
pub fn verify_error_handling<D: CalculatorDriver>(driver: &mut D) {
    for keys in ["5 / 0 =", "5 + =", "1 + + 2 ="] {
        driver.reset();
        driver.press_tokens(keys);
        assert_eq!(driver.display(), "Error", "keys: {keys}");
    }
    driver.press(Key::Digit(1));
    assert_eq!(driver.display(), "1");
}

/// Verifies delete and reset
pub fn verify_editing<D: CalculatorDriver>(driver: &mut D) {
    driver.reset();
    driver.press_tokens("1 2 del");
    assert_eq!(driver.display(), "1");
    driver.press_tokens("del del");
    assert_eq!(driver.display(), "0");

    driver.press_tokens("0 5");
    assert_eq!(driver.display(), "5");
    driver.press(Key::Reset);
    assert_eq!(driver.display(), "0");

    driver.press(Key::Equals);
    assert_eq!(driver.display(), "0");
}

/// Complete verification suite
pub fn run_full_suite<D: CalculatorDriver>(driver: &mut D) {
    verify_initial_state(driver);
    verify_basic_arithmetic(driver);
    verify_precedence(driver);
    verify_formatting(driver);
    verify_error_handling(driver);
    verify_editing(driver);
}
