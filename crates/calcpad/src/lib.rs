//! Calcpad - a keypad calculator widget
//!
//! The widget accumulates keypad presses into an expression string,
//! evaluates it with `*` and `/` binding tighter than `+` and `-`, and shows
//! the result rounded to five decimal places with trailing zeros removed.
//! Any failure (division by zero, a dangling operator) shows `Error`.
//!
//! A theme store persists the user's choice of `dark`, `light`, `violet`
//! or `system`, and follows the OS color scheme while `system` is selected.
//!
//! Front ends:
//! - [`tui`]: terminal app rendered into a [`tui::TextGrid`] (feature `tui`)
//! - [`wasm`]: DOM model, keypad wiring and the wasm-bindgen entry point
//!   (bindings behind feature `wasm`)
//!
//! # Example
//!
//! ```rust
//! use calcpad::prelude::*;
//!
//! let mut calc = Accumulator::new();
//! for token in ["2", "+", "3", "*", "4", "="] {
//!     calc.press_token(token);
//! }
//! assert_eq!(calc.display(), "14");
//!
//! let evaluator = Evaluator::new();
//! assert_eq!(evaluator.evaluate_display("1/3"), "0.33333");
//! assert_eq!(evaluator.evaluate_display("5/0"), "Error");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod accumulator;
pub mod config;
pub mod core;
pub mod driver;
pub mod key;
pub mod keymap;
pub mod theme;

#[cfg(feature = "tui")]
pub mod tui;

/// Browser widget - always compiled so the mock DOM can be tested natively
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::accumulator::{Accumulator, Mode, EMPTY_DISPLAY};
    pub use crate::config::{CalculatorConfig, ConfigError};
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::parser::{OperandChain, Parser, Token, Tokenizer};
    pub use crate::core::{
        format_result, Calculator, EvalResult, EvaluationError, Operation, DEFAULT_PRECISION,
        ERROR_MARKER,
    };
    pub use crate::driver::{CalculatorDriver, CoreDriver};
    pub use crate::key::{Key, KeyParseError};
    pub use crate::keymap::map_physical_key;
    pub use crate::theme::{
        ColorScheme, MemoryPreferences, PreferenceError, PreferenceStore, SchemeSignal,
        ThemeName, ThemeOption, ThemeStore,
    };

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;

    pub use crate::wasm::{DomDriver, DomElement, DomEvent, MockDom};
}
