//! Terminal front end
//!
//! State lives in [`CalculatorApp`]; [`render`] draws it into a
//! [`TextGrid`] that the binary copies to the screen with crossterm.

mod app;
mod grid;
mod input;
mod ui;

pub use app::{CalculatorApp, DynPreferences};
pub use grid::TextGrid;
pub use input::{physical_key_name, InputHandler, KeyAction};
pub use ui::{render, theme_indicator, Palette, HELP_LINE, TITLE};
