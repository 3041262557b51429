//! Theme names, resolution and persisted preference
//!
//! A stored choice is one of the concrete themes or `system`; what actually
//! gets applied is always a concrete [`ThemeName`], produced by [`resolve`].

mod preferences;
mod signal;
mod store;

pub use preferences::{FilePreferences, MemoryPreferences, PreferenceError, PreferenceStore};
pub use signal::{SchemeSignal, SubscriptionId};
pub use store::ThemeStore;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Default preference key the theme choice is persisted under
pub const THEME_PREFERENCE_KEY: &str = "theme";

/// A concrete, renderable theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeName {
    /// Dark theme
    Dark,
    /// Light theme
    Light,
    /// Violet theme
    Violet,
}

/// Error for an unrecognized theme or scheme string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown theme value: '{value}'")]
pub struct ThemeParseError {
    /// The rejected value
    pub value: String,
}

impl ThemeParseError {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

impl ThemeName {
    /// Themes in slider order
    pub const AVAILABLE: [Self; 3] = [Self::Dark, Self::Light, Self::Violet];

    /// Class name applied to the document root
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Violet => "violet",
        }
    }

    /// Position in [`Self::AVAILABLE`]
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Dark => 0,
            Self::Light => 1,
            Self::Violet => 2,
        }
    }

    /// Theme at a slider position
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::AVAILABLE.get(index).copied()
    }

    /// Next theme in slider order, wrapping around
    #[must_use]
    pub const fn next(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Violet,
            Self::Violet => Self::Dark,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::AVAILABLE
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| ThemeParseError::new(s))
    }
}

impl From<ColorScheme> for ThemeName {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Dark => Self::Dark,
            ColorScheme::Light => Self::Light,
        }
    }
}

/// A selectable theme option: a concrete theme or `system`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeOption {
    /// Fixed theme
    Named(ThemeName),
    /// Follow the OS light/dark preference
    #[default]
    System,
}

impl ThemeOption {
    /// All selectable options, `system` last
    pub const SELECTABLE: [Self; 4] = [
        Self::Named(ThemeName::Dark),
        Self::Named(ThemeName::Light),
        Self::Named(ThemeName::Violet),
        Self::System,
    ];

    /// Stored string form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Named(name) => name.as_str(),
            Self::System => "system",
        }
    }

    /// True for `system`
    #[must_use]
    pub const fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

impl From<ThemeName> for ThemeOption {
    fn from(name: ThemeName) -> Self {
        Self::Named(name)
    }
}

impl fmt::Display for ThemeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeOption {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "system" {
            return Ok(Self::System);
        }
        s.parse::<ThemeName>()
            .map(Self::Named)
            .map_err(|_| ThemeParseError::new(s))
    }
}

/// OS-level light/dark preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorScheme {
    /// Prefers dark
    Dark,
    /// Prefers light (also the fallback when no preference is reported)
    #[default]
    Light,
}

impl ColorScheme {
    /// Builds a scheme from a "prefers dark" media query result
    #[must_use]
    pub const fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(ThemeParseError::new(s)),
        }
    }
}

/// Resolves a choice against the OS scheme
#[must_use]
pub fn resolve(choice: ThemeOption, os_scheme: ColorScheme) -> ThemeName {
    match choice {
        ThemeOption::Named(name) => name,
        ThemeOption::System => ThemeName::from(os_scheme),
    }
}

/// Slider value for the resolved theme
#[must_use]
pub const fn slider_position(resolved: ThemeName) -> usize {
    resolved.index()
}

/// Slider tick labels, one-based
#[must_use]
pub fn slider_labels() -> Vec<String> {
    (1..=ThemeName::AVAILABLE.len())
        .map(|n| n.to_string())
        .collect()
}
