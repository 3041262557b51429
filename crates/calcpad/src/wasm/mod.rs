//! Browser widget
//!
//! The DOM model, keypad wiring and display scaling compile natively so the
//! widget can be tested without a browser; `browser` adds the wasm-bindgen
//! entry point.

#[cfg(feature = "wasm")]
mod browser;
mod display;
mod dom;
mod driver;
mod keypad;

#[cfg(feature = "wasm")]
pub use browser::{BrowserCalculator, LocalStoragePreferences};
pub use display::DisplayScale;
pub use dom::{DomElement, DomEvent, KeyboardEvent, ListenerId, MockDom, DISPLAY_ID, KEYPAD_ID, THEME_RANGE_ID};
pub use driver::DomDriver;
pub use keypad::{
    find_button_by_id, keypad_rows, ButtonDef, ButtonVariant, Keypad, KEYPAD_BUTTONS,
    KEYPAD_COLUMNS,
};
