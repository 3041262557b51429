//! Terminal application state

use crate::accumulator::Accumulator;
use crate::config::CalculatorConfig;
use crate::key::Key;
use crate::theme::{
    FilePreferences, MemoryPreferences, PreferenceStore, SchemeSignal, ThemeName, ThemeOption,
    ThemeStore,
};

use super::input::KeyAction;

/// Preference backend chosen at startup
pub type DynPreferences = Box<dyn PreferenceStore>;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    accumulator: Accumulator,
    theme: ThemeStore<DynPreferences>,
    show_keypad: bool,
    status: Option<String>,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates an app with default config and in-memory preferences
    #[must_use]
    pub fn new() -> Self {
        Self::with_theme_store(
            &CalculatorConfig::default(),
            ThemeStore::init(Box::new(MemoryPreferences::new()), SchemeSignal::default()),
        )
    }

    /// Creates an app from configuration.
    ///
    /// Preferences go to `preferences_path` when set, otherwise stay in memory.
    #[must_use]
    pub fn from_config(config: &CalculatorConfig, signal: SchemeSignal) -> Self {
        let preferences: DynPreferences = match &config.preferences_path {
            Some(path) => Box::new(FilePreferences::new(path)),
            None => Box::new(MemoryPreferences::new()),
        };
        let theme = ThemeStore::init_with_key(preferences, signal, config.preference_key.clone());
        Self::with_theme_store(config, theme)
    }

    /// Creates an app around an existing theme store
    #[must_use]
    pub fn with_theme_store(config: &CalculatorConfig, theme: ThemeStore<DynPreferences>) -> Self {
        Self {
            accumulator: Accumulator::from_config(config),
            theme,
            show_keypad: config.show_keypad,
            status: None,
            should_quit: false,
        }
    }

    /// Returns the accumulator
    #[must_use]
    pub const fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Returns the theme store
    #[must_use]
    pub const fn theme(&self) -> &ThemeStore<DynPreferences> {
        &self.theme
    }

    /// Theme currently applied
    #[must_use]
    pub fn applied_theme(&self) -> ThemeName {
        self.theme.applied()
    }

    /// Returns exactly what the display shows
    #[must_use]
    pub fn display(&self) -> String {
        self.accumulator.display()
    }

    /// Whether the keypad grid is rendered
    #[must_use]
    pub const fn show_keypad(&self) -> bool {
        self.show_keypad
    }

    /// Last status message (theme persistence failures)
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Returns whether the app should quit
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Feeds one key to the calculator
    pub fn press(&mut self, key: Key) {
        self.accumulator.press(key);
    }

    /// Selects a theme option
    pub fn set_theme(&mut self, choice: ThemeOption) {
        self.status = self
            .theme
            .set_choice(choice)
            .err()
            .map(|err| format!("Theme not saved: {err}"));
    }

    /// Selects the next theme
    pub fn cycle_theme(&mut self) {
        let next = self.theme.resolved().next();
        self.set_theme(next.into());
    }

    /// Applies an input action
    pub fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Press(key) => self.press(key),
            KeyAction::CycleTheme => self.cycle_theme(),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operation;
    use crate::theme::ColorScheme;
    use tempfile::TempDir;

    #[test]
    fn test_app_new() {
        let app = CalculatorApp::new();
        assert_eq!(app.display(), "0");
        assert!(!app.should_quit());
        assert!(app.show_keypad());
        assert_eq!(app.status(), None);
        assert_eq!(app.theme().current_choice(), ThemeOption::System);
    }

    #[test]
    fn test_handle_press_actions() {
        let mut app = CalculatorApp::default();
        for action in [
            KeyAction::Press(Key::Digit(6)),
            KeyAction::Press(Key::Operator(Operation::Multiply)),
            KeyAction::Press(Key::Digit(7)),
            KeyAction::Press(Key::Equals),
        ] {
            app.handle_action(action);
        }
        assert_eq!(app.display(), "42");
    }

    #[test]
    fn test_handle_quit() {
        let mut app = CalculatorApp::new();
        app.handle_action(KeyAction::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_handle_none() {
        let mut app = CalculatorApp::new();
        app.handle_action(KeyAction::None);
        assert_eq!(app.display(), "0");
        assert!(!app.should_quit());
    }

    #[test]
    fn test_cycle_theme() {
        let config = CalculatorConfig::default();
        let mut app = CalculatorApp::from_config(&config, SchemeSignal::new(ColorScheme::Dark));
        assert_eq!(app.applied_theme(), ThemeName::Dark);

        app.handle_action(KeyAction::CycleTheme);
        assert_eq!(app.applied_theme(), ThemeName::Light);
        app.handle_action(KeyAction::CycleTheme);
        assert_eq!(app.applied_theme(), ThemeName::Violet);
        app.handle_action(KeyAction::CycleTheme);
        assert_eq!(app.applied_theme(), ThemeName::Dark);
    }

    #[test]
    fn test_from_config_precision_and_keypad() {
        let config = CalculatorConfig::default()
            .with_precision(2)
            .with_show_keypad(false);
        let mut app = CalculatorApp::from_config(&config, SchemeSignal::default());
        assert!(!app.show_keypad());

        for key in [
            Key::Digit(1),
            Key::Operator(Operation::Divide),
            Key::Digit(3),
            Key::Equals,
        ] {
            app.press(key);
        }
        assert_eq!(app.display(), "0.33");
    }

    #[test]
    fn test_from_config_file_preferences() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        let config = CalculatorConfig::default().with_preferences_path(&path);

        {
            let mut app = CalculatorApp::from_config(&config, SchemeSignal::default());
            app.set_theme(ThemeName::Violet.into());
            assert_eq!(app.status(), None);
        }

        let app = CalculatorApp::from_config(&config, SchemeSignal::default());
        assert_eq!(app.applied_theme(), ThemeName::Violet);
    }

    #[test]
    fn test_persist_failure_sets_status() {
        let dir = TempDir::new().unwrap();
        // a directory cannot be written as a file
        let config = CalculatorConfig::default().with_preferences_path(dir.path());
        let mut app = CalculatorApp::from_config(&config, SchemeSignal::default());

        app.set_theme(ThemeName::Light.into());
        assert_eq!(app.applied_theme(), ThemeName::Light);
        assert!(app.status().unwrap().starts_with("Theme not saved"));
    }
}
