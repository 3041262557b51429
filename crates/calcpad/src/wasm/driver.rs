//! DOM-backed driver
//!
//! Wires the mock DOM, keypad, accumulator and theme store together the way
//! the browser widget does, so the same scenarios can run natively.

use tracing::debug;

use crate::accumulator::Accumulator;
use crate::driver::CalculatorDriver;
use crate::key::Key;
use crate::theme::{
    slider_position, ColorScheme, MemoryPreferences, PreferenceError, SchemeSignal, ThemeName,
    ThemeOption, ThemeStore,
};

use super::display::DisplayScale;
use super::dom::{DomEvent, MockDom, DISPLAY_ID, THEME_RANGE_ID};
use super::keypad::{Keypad, KEYPAD_BUTTONS};

/// Mounted calculator widget over a [`MockDom`]
#[derive(Debug)]
pub struct DomDriver {
    dom: MockDom,
    keypad: Keypad,
    accumulator: Accumulator,
    theme: ThemeStore<MemoryPreferences>,
}

impl Default for DomDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl DomDriver {
    /// Mounts a widget with in-memory preferences and a light OS scheme
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(
            Accumulator::new(),
            ThemeStore::init(MemoryPreferences::new(), SchemeSignal::default()),
        )
    }

    /// Mounts a widget around existing state
    #[must_use]
    pub fn with_state(accumulator: Accumulator, theme: ThemeStore<MemoryPreferences>) -> Self {
        let mut dom = MockDom::calculator();
        let mut keypad = Keypad::new();
        keypad.activate(&mut dom);

        let mut driver = Self {
            dom,
            keypad,
            accumulator,
            theme,
        };
        driver.sync_dom();
        driver
    }

    /// Returns the DOM
    #[must_use]
    pub const fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Returns the accumulator
    #[must_use]
    pub const fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Returns the theme store
    #[must_use]
    pub const fn theme(&self) -> &ThemeStore<MemoryPreferences> {
        &self.theme
    }

    /// Whether the keydown listener is still registered
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.keypad.is_active()
    }

    /// Clicks an element; returns whether it was a keypad button
    pub fn click(&mut self, element_id: &str) -> bool {
        self.dom.dispatch_event(DomEvent::click(element_id));
        let handled = self.keypad.handle_click(element_id).is_some();
        self.drain_keypad();
        handled
    }

    /// Dispatches a physical keydown; returns whether default was prevented
    pub fn press_physical(&mut self, key: &str) -> bool {
        let event = self.dom.dispatch_keydown(key);
        self.drain_keypad();
        event.default_prevented()
    }

    /// Moves the theme slider.
    ///
    /// Out-of-range positions are ignored and return `Ok(false)`.
    pub fn set_slider(&mut self, index: usize) -> Result<bool, PreferenceError> {
        self.dom
            .dispatch_event(DomEvent::input(THEME_RANGE_ID, &index.to_string()));
        let result = self.theme.set_slider_position(index);
        self.sync_dom();
        result
    }

    /// Selects a theme option directly
    pub fn set_theme(&mut self, choice: ThemeOption) -> Result<(), PreferenceError> {
        let result = self.theme.set_choice(choice);
        self.sync_dom();
        result
    }

    /// Simulates an OS color scheme change
    pub fn set_os_scheme(&mut self, scheme: ColorScheme) {
        self.theme.signal().set(scheme);
        self.sync_dom();
    }

    /// Removes the keydown listener and OS subscription
    pub fn teardown(&mut self) {
        self.keypad.deactivate(&mut self.dom);
        self.theme.teardown();
    }

    /// Text of the display element
    #[must_use]
    pub fn display_element_text(&self) -> Option<&str> {
        self.dom.get_element_text(DISPLAY_ID)
    }

    /// Inline font size of the display element
    #[must_use]
    pub fn display_font_size(&self) -> Option<&str> {
        self.dom.get_element(DISPLAY_ID)?.get_style("font-size")
    }

    /// Value attribute of the theme range input
    #[must_use]
    pub fn slider_value(&self) -> Option<&str> {
        self.dom.get_element(THEME_RANGE_ID)?.get_attr("value")
    }

    /// Theme class currently on `<html>`
    #[must_use]
    pub fn document_theme(&self) -> Option<ThemeName> {
        let root = self.dom.document_element();
        ThemeName::AVAILABLE
            .into_iter()
            .find(|name| root.has_class(name.as_str()))
    }

    fn drain_keypad(&mut self) {
        let pressed = self.keypad.take_pressed();
        if pressed.is_empty() {
            return;
        }
        for key in pressed {
            self.accumulator.press(key);
        }
        self.sync_dom();
    }

    /// Copies state into the DOM
    fn sync_dom(&mut self) {
        let text = self.accumulator.display();
        let font_size = DisplayScale::for_text(&text).font_size();
        if let Some(display) = self.dom.get_element_mut(DISPLAY_ID) {
            display.set_text(&text);
            display.set_style("font-size", font_size);
        }

        let applied = self.theme.applied();
        self.dom.apply_theme_class(applied);
        if let Some(range) = self.dom.get_element_mut(THEME_RANGE_ID) {
            range
                .attributes
                .insert("value".to_string(), slider_position(applied).to_string());
        }
        debug!(display = %text, theme = %applied, "dom synced");
    }
}

impl Drop for DomDriver {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl CalculatorDriver for DomDriver {
    fn press(&mut self, key: Key) {
        if let Some(button) = KEYPAD_BUTTONS.iter().find(|b| b.key == key) {
            self.click(&button.id());
        }
    }

    fn display(&self) -> String {
        self.display_element_text().unwrap_or_default().to_string()
    }
}
