//! Terminal rendering
//!
//! Layout, top to bottom:
//! ```text
//!  calc                  Theme: dark (1/3)
//! ┌──────────────────────────────────────┐
//! │                                  399 │
//! └──────────────────────────────────────┘
//!  [ 7 ]  [ 8 ]  [ 9 ]  [DEL]
//!  ...
//!  Esc reset | Tab theme | Ctrl+C quit
//! ```

use crossterm::style::Color;

use crate::theme::{slider_position, ThemeName};
use crate::wasm::{keypad_rows, KEYPAD_COLUMNS};

use super::app::CalculatorApp;
use super::grid::TextGrid;

/// Title shown in the header row
pub const TITLE: &str = "calc";

/// Key help shown under the keypad
pub const HELP_LINE: &str = "Esc reset | Tab theme | Ctrl+C quit";

/// Rows used by the header and display box
const DISPLAY_ROWS: u16 = 4;

/// Terminal colors for a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Text
    pub foreground: Color,
    /// Screen background
    pub background: Color,
    /// Display text and the `=` key
    pub accent: Color,
}

impl Palette {
    /// Palette for a concrete theme
    #[must_use]
    pub const fn for_theme(theme: ThemeName) -> Self {
        match theme {
            ThemeName::Dark => Self {
                foreground: Color::White,
                background: Color::Rgb { r: 58, g: 70, b: 100 },
                accent: Color::Rgb { r: 208, g: 63, b: 47 },
            },
            ThemeName::Light => Self {
                foreground: Color::Rgb { r: 54, g: 54, b: 44 },
                background: Color::Rgb { r: 230, g: 230, b: 230 },
                accent: Color::Rgb { r: 200, g: 85, b: 2 },
            },
            ThemeName::Violet => Self {
                foreground: Color::Rgb { r: 255, g: 229, b: 61 },
                background: Color::Rgb { r: 23, g: 6, b: 42 },
                accent: Color::Rgb { r: 0, g: 222, b: 208 },
            },
        }
    }
}

/// Label of the theme indicator, e.g. `Theme: violet (3/3)`
#[must_use]
pub fn theme_indicator(theme: ThemeName) -> String {
    format!(
        "Theme: {theme} ({}/{})",
        slider_position(theme) + 1,
        ThemeName::AVAILABLE.len()
    )
}

/// Renders the whole app into `grid`
pub fn render(app: &CalculatorApp, grid: &mut TextGrid) {
    grid.clear();
    let width = grid.width();
    if width < 4 || grid.height() < DISPLAY_ROWS {
        // too small for the frame, show the value only
        grid.write_right_aligned(0, width, 0, &app.display());
        return;
    }

    grid.write_str(1, 0, TITLE);
    let after_title = u16::try_from(TITLE.len() + 2).unwrap_or(u16::MAX);
    grid.write_right_aligned(
        after_title,
        width - 1,
        0,
        &theme_indicator(app.applied_theme()),
    );

    grid.draw_box(0, 1, width, 3);
    grid.write_right_aligned(2, width - 2, 2, &app.display());

    let mut y = DISPLAY_ROWS;
    if app.show_keypad() {
        y = render_keypad(grid, y + 1) + 1;
    }

    grid.write_str(1, y, HELP_LINE);
    if let Some(status) = app.status() {
        grid.write_str(1, y + 1, status);
    }
}

/// Draws keypad rows from `top`; returns the next free row
fn render_keypad(grid: &mut TextGrid, top: u16) -> u16 {
    let cell = (grid.width().saturating_sub(2) / KEYPAD_COLUMNS as u16).max(3);
    let mut y = top;
    for row in keypad_rows() {
        let mut x = 1;
        for button in row {
            let span = cell * button.span() as u16;
            let inner = usize::from(span - 2);
            grid.write_str(x, y, &format!("[{:^inner$}]", button.label));
            x += span;
        }
        y += 1;
    }
    y
}
