//! Theme choice state, persistence and OS subscription

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{info, warn};

use super::{
    resolve, PreferenceError, PreferenceStore, SchemeSignal, SubscriptionId, ThemeName,
    ThemeOption, THEME_PREFERENCE_KEY,
};

type AppliedHook = Rc<dyn Fn(ThemeName)>;

/// Applied theme shared between the store and its OS listener
#[derive(Clone)]
struct AppliedTheme {
    current: Rc<Cell<ThemeName>>,
    hook: Rc<RefCell<Option<AppliedHook>>>,
}

impl AppliedTheme {
    fn new(theme: ThemeName) -> Self {
        Self {
            current: Rc::new(Cell::new(theme)),
            hook: Rc::new(RefCell::new(None)),
        }
    }

    fn get(&self) -> ThemeName {
        self.current.get()
    }

    fn set(&self, theme: ThemeName) {
        if self.current.replace(theme) == theme {
            return;
        }
        // clone out so the hook runs without the borrow held
        let hook = self.hook.borrow().clone();
        if let Some(hook) = hook {
            hook(theme);
        }
    }
}

/// Holds the user's theme choice and the theme currently applied.
///
/// While the choice is `system` the store listens to its [`SchemeSignal`]
/// and re-applies on every change. The listener is removed when the choice
/// becomes a named theme, on [`ThemeStore::teardown`], and on drop.
pub struct ThemeStore<P: PreferenceStore> {
    choice: ThemeOption,
    key: String,
    preferences: P,
    signal: SchemeSignal,
    applied: AppliedTheme,
    subscription: Option<SubscriptionId>,
}

impl<P: PreferenceStore> std::fmt::Debug for ThemeStore<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("choice", &self.choice)
            .field("key", &self.key)
            .field("applied", &self.applied.get())
            .field("subscribed", &self.subscription.is_some())
            .field("hooked", &self.applied.hook.borrow().is_some())
            .field("preferences", &self.preferences)
            .finish_non_exhaustive()
    }
}

impl<P: PreferenceStore> ThemeStore<P> {
    /// Loads the persisted choice under the default key and applies it
    pub fn init(preferences: P, signal: SchemeSignal) -> Self {
        Self::init_with_key(preferences, signal, THEME_PREFERENCE_KEY)
    }

    /// Loads the persisted choice under `key` and applies it.
    ///
    /// A missing, unreadable or unrecognized value falls back to `system`.
    pub fn init_with_key(preferences: P, signal: SchemeSignal, key: impl Into<String>) -> Self {
        let key = key.into();
        let choice = match preferences.load(&key) {
            Ok(Some(saved)) => saved.parse().unwrap_or_else(|err| {
                warn!(key = %key, error = %err, "ignoring persisted theme");
                ThemeOption::System
            }),
            Ok(None) => ThemeOption::System,
            Err(err) => {
                warn!(key = %key, error = %err, "could not read theme preference");
                ThemeOption::System
            }
        };

        let applied = AppliedTheme::new(resolve(choice, signal.current()));
        let mut store = Self {
            choice,
            key,
            preferences,
            signal,
            applied,
            subscription: None,
        };
        store.apply();
        store
    }

    /// The stored choice
    #[must_use]
    pub const fn current_choice(&self) -> ThemeOption {
        self.choice
    }

    /// The choice resolved against the signal's current value
    #[must_use]
    pub fn resolved(&self) -> ThemeName {
        resolve(self.choice, self.signal.current())
    }

    /// The theme class currently applied to the document root
    #[must_use]
    pub fn applied(&self) -> ThemeName {
        self.applied.get()
    }

    /// Calls `hook` with the applied theme now and after every change.
    ///
    /// Changes driven by the OS signal reach the hook too, so a host can
    /// keep the document class in sync without polling. Replaces any
    /// earlier hook.
    pub fn on_applied_change(&mut self, hook: impl Fn(ThemeName) + 'static) {
        let hook: AppliedHook = Rc::new(hook);
        *self.applied.hook.borrow_mut() = Some(Rc::clone(&hook));
        hook(self.applied());
    }

    /// Whether an OS scheme listener is registered
    #[must_use]
    pub const fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// The preference backend
    #[must_use]
    pub const fn preferences(&self) -> &P {
        &self.preferences
    }

    /// The OS scheme signal this store follows
    #[must_use]
    pub const fn signal(&self) -> &SchemeSignal {
        &self.signal
    }

    /// Updates the choice, applies it and persists it.
    ///
    /// The in-memory choice and applied theme change even if persisting
    /// fails; the error is returned so callers can report it.
    pub fn set_choice(&mut self, choice: ThemeOption) -> Result<(), PreferenceError> {
        self.choice = choice;
        self.apply();
        info!(choice = %choice, applied = %self.applied(), "theme changed");

        self.preferences
            .store(&self.key, choice.as_str())
            .map_err(|err| {
                warn!(error = %err, "could not persist theme preference");
                err
            })
    }

    /// Selects the theme at a slider position
    pub fn set_slider_position(&mut self, index: usize) -> Result<bool, PreferenceError> {
        match ThemeName::from_index(index) {
            Some(name) => self.set_choice(name.into()).map(|()| true),
            None => Ok(false),
        }
    }

    /// Selects the next concrete theme after the resolved one
    pub fn cycle(&mut self) -> Result<(), PreferenceError> {
        let next = self.resolved().next();
        self.set_choice(next.into())
    }

    /// Removes the OS listener
    pub fn teardown(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.signal.unsubscribe(id);
        }
    }

    fn apply(&mut self) {
        self.applied.set(self.resolved());

        if self.choice.is_system() {
            if self.subscription.is_none() {
                let applied = self.applied.clone();
                let id = self
                    .signal
                    .subscribe(move |scheme| applied.set(ThemeName::from(scheme)));
                self.subscription = Some(id);
            }
        } else {
            self.teardown();
        }
    }
}

impl<P: PreferenceStore> Drop for ThemeStore<P> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ColorScheme, FilePreferences, MemoryPreferences};
    use tempfile::TempDir;

    fn store_with(saved: Option<&str>, os: ColorScheme) -> ThemeStore<MemoryPreferences> {
        let prefs = saved.map_or_else(MemoryPreferences::new, |value| {
            MemoryPreferences::with_entry(THEME_PREFERENCE_KEY, value)
        });
        ThemeStore::init(prefs, SchemeSignal::new(os))
    }

    /// Preferences that fail every operation
    #[derive(Debug)]
    struct BrokenPreferences;

    impl PreferenceStore for BrokenPreferences {
        fn load(&self, _key: &str) -> Result<Option<String>, PreferenceError> {
            Err(PreferenceError::unavailable("broken"))
        }

        fn store(&mut self, _key: &str, _value: &str) -> Result<(), PreferenceError> {
            Err(PreferenceError::unavailable("broken"))
        }
    }

    // ===== init =====

    #[test]
    fn test_init_missing_defaults_to_system() {
        let store = store_with(None, ColorScheme::Dark);
        assert_eq!(store.current_choice(), ThemeOption::System);
        assert_eq!(store.applied(), ThemeName::Dark);
        assert!(store.is_subscribed());
    }

    #[test]
    fn test_init_unknown_defaults_to_system() {
        let store = store_with(Some("sepia"), ColorScheme::Light);
        assert_eq!(store.current_choice(), ThemeOption::System);
        assert_eq!(store.applied(), ThemeName::Light);
    }

    #[test]
    fn test_init_saved_named_theme() {
        let store = store_with(Some("violet"), ColorScheme::Dark);
        assert_eq!(store.current_choice(), ThemeOption::Named(ThemeName::Violet));
        assert_eq!(store.applied(), ThemeName::Violet);
        assert!(!store.is_subscribed());
        assert_eq!(store.signal().listener_count(), 0);
    }

    #[test]
    fn test_init_read_failure_defaults_to_system() {
        let store = ThemeStore::init(BrokenPreferences, SchemeSignal::new(ColorScheme::Dark));
        assert_eq!(store.current_choice(), ThemeOption::System);
        assert_eq!(store.applied(), ThemeName::Dark);
    }

    #[test]
    fn test_init_custom_key() {
        let prefs = MemoryPreferences::with_entry("calc-theme", "light");
        let store = ThemeStore::init_with_key(prefs, SchemeSignal::default(), "calc-theme");
        assert_eq!(store.applied(), ThemeName::Light);
    }

    // ===== OS signal =====

    #[test]
    fn test_system_follows_os_changes() {
        let signal = SchemeSignal::new(ColorScheme::Light);
        let store = ThemeStore::init(MemoryPreferences::new(), signal.clone());
        assert_eq!(store.applied(), ThemeName::Light);

        signal.set(ColorScheme::Dark);
        assert_eq!(store.applied(), ThemeName::Dark);
        assert_eq!(store.resolved(), ThemeName::Dark);
    }

    #[test]
    fn test_named_ignores_os_changes() {
        let signal = SchemeSignal::new(ColorScheme::Light);
        let mut store = ThemeStore::init(MemoryPreferences::new(), signal.clone());
        store.set_choice(ThemeName::Violet.into()).unwrap();

        signal.set(ColorScheme::Dark);
        assert_eq!(store.applied(), ThemeName::Violet);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn test_switching_back_to_system_resubscribes_once() {
        let signal = SchemeSignal::new(ColorScheme::Dark);
        let mut store = ThemeStore::init(MemoryPreferences::new(), signal.clone());
        store.set_choice(ThemeName::Light.into()).unwrap();
        store.set_choice(ThemeOption::System).unwrap();
        store.set_choice(ThemeOption::System).unwrap();

        assert_eq!(signal.listener_count(), 1);
        assert_eq!(store.applied(), ThemeName::Dark);
    }

    #[test]
    fn test_teardown_unsubscribes() {
        let signal = SchemeSignal::new(ColorScheme::Light);
        let mut store = ThemeStore::init(MemoryPreferences::new(), signal.clone());
        assert_eq!(signal.listener_count(), 1);

        store.teardown();
        assert_eq!(signal.listener_count(), 0);
        signal.set(ColorScheme::Dark);
        assert_eq!(store.applied(), ThemeName::Light);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let signal = SchemeSignal::new(ColorScheme::Light);
        {
            let _store = ThemeStore::init(MemoryPreferences::new(), signal.clone());
            assert_eq!(signal.listener_count(), 1);
        }
        assert_eq!(signal.listener_count(), 0);
    }

    // ===== applied hook =====

    fn recorded(store: &mut ThemeStore<MemoryPreferences>) -> Rc<RefCell<Vec<ThemeName>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.on_applied_change(move |theme| sink.borrow_mut().push(theme));
        seen
    }

    #[test]
    fn test_hook_called_on_registration() {
        let mut store = store_with(Some("violet"), ColorScheme::Dark);
        let seen = recorded(&mut store);
        assert_eq!(*seen.borrow(), vec![ThemeName::Violet]);
    }

    #[test]
    fn test_hook_follows_os_signal_while_system() {
        let signal = SchemeSignal::new(ColorScheme::Light);
        let mut store = ThemeStore::init(MemoryPreferences::new(), signal.clone());
        let seen = recorded(&mut store);

        signal.set(ColorScheme::Dark);
        signal.set(ColorScheme::Light);
        assert_eq!(
            *seen.borrow(),
            vec![ThemeName::Light, ThemeName::Dark, ThemeName::Light]
        );
    }

    #[test]
    fn test_hook_follows_set_choice_only_on_change() {
        let signal = SchemeSignal::new(ColorScheme::Dark);
        let mut store = ThemeStore::init(MemoryPreferences::new(), signal.clone());
        let seen = recorded(&mut store);

        store.set_choice(ThemeName::Dark.into()).unwrap();
        store.set_choice(ThemeName::Violet.into()).unwrap();
        signal.set(ColorScheme::Light);
        store.set_choice(ThemeOption::System).unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![ThemeName::Dark, ThemeName::Violet, ThemeName::Light]
        );
    }

    #[test]
    fn test_hook_silent_after_teardown() {
        let signal = SchemeSignal::new(ColorScheme::Light);
        let mut store = ThemeStore::init(MemoryPreferences::new(), signal.clone());
        let seen = recorded(&mut store);

        store.teardown();
        signal.set(ColorScheme::Dark);
        assert_eq!(*seen.borrow(), vec![ThemeName::Light]);
    }

    // ===== set_choice =====

    #[test]
    fn test_set_choice_persists() {
        let mut store = store_with(None, ColorScheme::Light);
        store.set_choice(ThemeName::Dark.into()).unwrap();
        assert_eq!(store.preferences().get(THEME_PREFERENCE_KEY), Some("dark"));

        store.set_choice(ThemeOption::System).unwrap();
        assert_eq!(store.preferences().get(THEME_PREFERENCE_KEY), Some("system"));
    }

    #[test]
    fn test_set_choice_persist_failure_still_applies() {
        let mut store = ThemeStore::init(BrokenPreferences, SchemeSignal::default());
        let result = store.set_choice(ThemeName::Violet.into());
        assert!(matches!(result, Err(PreferenceError::Unavailable { .. })));
        assert_eq!(store.applied(), ThemeName::Violet);
    }

    #[test]
    fn test_set_slider_position() {
        let mut store = store_with(None, ColorScheme::Dark);
        assert!(store.set_slider_position(2).unwrap());
        assert_eq!(store.applied(), ThemeName::Violet);
        assert!(!store.set_slider_position(7).unwrap());
        assert_eq!(store.applied(), ThemeName::Violet);
    }

    #[test]
    fn test_cycle() {
        let mut store = store_with(None, ColorScheme::Light);
        store.cycle().unwrap();
        assert_eq!(store.current_choice(), ThemeOption::Named(ThemeName::Violet));
        store.cycle().unwrap();
        assert_eq!(store.applied(), ThemeName::Dark);
    }

    #[test]
    fn test_file_backed_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        {
            let mut store =
                ThemeStore::init(FilePreferences::new(&path), SchemeSignal::default());
            store.set_choice(ThemeName::Violet.into()).unwrap();
        }
        let store = ThemeStore::init(FilePreferences::new(&path), SchemeSignal::default());
        assert_eq!(store.applied(), ThemeName::Violet);
    }

    #[test]
    fn test_debug_output() {
        let store = store_with(None, ColorScheme::Dark);
        let debug = format!("{store:?}");
        assert!(debug.contains("ThemeStore"));
        assert!(debug.contains("System"));
    }
}
