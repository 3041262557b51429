//! Browser bindings
//!
//! JS glue owns the real DOM and forwards button clicks, keydown events and
//! slider input here; it reads back the display text and font size after
//! each call. The theme class on `<html>` is kept current from here,
//! including when the OS color scheme changes.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use tracing::warn;
use web_sys::{MediaQueryList, Storage};

use crate::accumulator::Accumulator;
use crate::key::Key;
use crate::keymap::map_physical_key;
use crate::theme::{
    slider_position, ColorScheme, PreferenceError, PreferenceStore, SchemeSignal, ThemeName,
    ThemeOption, ThemeStore,
};

use super::display::DisplayScale;

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// Puts `theme` on `<html>` as its only theme class
fn apply_document_theme(theme: ThemeName) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let classes = root.class_list();
    for name in ThemeName::AVAILABLE {
        if name == theme {
            continue;
        }
        if let Err(err) = classes.remove_1(name.as_str()) {
            warn!(class = %name, error = ?err, "could not remove theme class");
        }
    }
    if let Err(err) = classes.add_1(theme.as_str()) {
        warn!(class = %theme, error = ?err, "could not add theme class");
    }
}

/// `window.localStorage` as a preference store
#[derive(Debug, Default)]
pub struct LocalStoragePreferences {
    storage: Option<Storage>,
}

impl LocalStoragePreferences {
    /// Opens local storage; private browsing modes may deny it
    #[must_use]
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, PreferenceError> {
        self.storage
            .as_ref()
            .ok_or_else(|| PreferenceError::unavailable("localStorage is not accessible"))
    }
}

impl PreferenceStore for LocalStoragePreferences {
    fn load(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| PreferenceError::unavailable(format!("{err:?}")))
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| PreferenceError::unavailable(format!("{err:?}")))
    }
}

/// Browser calculator - the WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    accumulator: Accumulator,
    theme: ThemeStore<LocalStoragePreferences>,
    media: Option<MediaQueryList>,
    _on_change: Option<Closure<dyn Fn()>>,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Mounts the calculator and starts following the OS color scheme
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console_error_panic_hook::set_once();

        let media = web_sys::window().and_then(|w| w.match_media(DARK_SCHEME_QUERY).ok().flatten());
        let prefers_dark = media.as_ref().is_some_and(MediaQueryList::matches);
        let signal = SchemeSignal::new(ColorScheme::from_prefers_dark(prefers_dark));

        let on_change = media.as_ref().map(|list| {
            let list = list.clone();
            let signal = signal.clone();
            let closure = Closure::wrap(Box::new(move || {
                signal.set(ColorScheme::from_prefers_dark(list.matches()));
            }) as Box<dyn Fn()>);
            list.set_onchange(Some(closure.as_ref().unchecked_ref::<js_sys::Function>()));
            closure
        });

        let mut theme = ThemeStore::init(LocalStoragePreferences::open(), signal);
        theme.on_applied_change(apply_document_theme);

        Self {
            accumulator: Accumulator::new(),
            theme,
            media,
            _on_change: on_change,
        }
    }

    /// Presses a keypad token (`7`, `+`, `.`, `del`, `reset`, `=`)
    pub fn press(&mut self, token: &str) -> bool {
        self.accumulator.press_token(token)
    }

    /// Handles a keydown `key` name; returns whether to call `preventDefault`
    pub fn handle_key(&mut self, key: &str) -> bool {
        match map_physical_key(key) {
            Some(mapped) => {
                self.accumulator.press(mapped);
                true
            }
            None => false,
        }
    }

    /// Display text
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.accumulator.display()
    }

    /// Inline font size for the display, if any
    #[wasm_bindgen(getter)]
    pub fn font_size(&self) -> Option<String> {
        DisplayScale::for_text(&self.accumulator.display())
            .font_size()
            .map(str::to_string)
    }

    /// Class to put on `<html>`
    #[wasm_bindgen(getter)]
    pub fn theme_class(&self) -> String {
        self.theme.applied().as_str().to_string()
    }

    /// Slider position of the applied theme
    #[wasm_bindgen(getter)]
    pub fn slider_position(&self) -> usize {
        slider_position(self.theme.applied())
    }

    /// Handles slider input; returns whether the position named a theme.
    ///
    /// Throws if the choice could not be saved; the theme is applied
    /// regardless.
    pub fn set_slider(&mut self, index: usize) -> Result<bool, JsValue> {
        self.theme
            .set_slider_position(index)
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Selects `dark`, `light`, `violet` or `system`.
    ///
    /// Throws on an unknown value, or if the choice could not be saved. A
    /// known value is applied even when saving fails.
    pub fn set_theme(&mut self, value: &str) -> Result<(), JsValue> {
        let choice: ThemeOption = value
            .parse()
            .map_err(|err| JsValue::from_str(&format!("{err}")))?;
        self.theme
            .set_choice(choice)
            .map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Resets the display
    pub fn reset(&mut self) {
        self.accumulator.press(Key::Reset);
    }
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BrowserCalculator {
    fn drop(&mut self) {
        if let Some(media) = &self.media {
            media.set_onchange(None);
        }
        self.theme.teardown();
    }
}
