//! Observable OS color scheme

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::ColorScheme;

/// Handle returned by [`SchemeSignal::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(ColorScheme)>;

struct SignalState {
    current: ColorScheme,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

/// Single-threaded OS light/dark signal.
///
/// Clones share state, so a host can keep one handle to drive changes while
/// a [`super::ThemeStore`] holds another to listen.
#[derive(Clone)]
pub struct SchemeSignal {
    inner: Rc<RefCell<SignalState>>,
}

impl fmt::Debug for SchemeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("SchemeSignal")
            .field("current", &state.current)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

impl Default for SchemeSignal {
    fn default() -> Self {
        Self::new(ColorScheme::default())
    }
}

impl SchemeSignal {
    /// Creates a signal with an initial scheme
    #[must_use]
    pub fn new(initial: ColorScheme) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SignalState {
                current: initial,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Current OS scheme
    #[must_use]
    pub fn current(&self) -> ColorScheme {
        self.inner.borrow().current
    }

    /// Updates the scheme and notifies subscribers if it changed
    pub fn set(&self, scheme: ColorScheme) {
        let listeners: Vec<Listener> = {
            let mut state = self.inner.borrow_mut();
            if state.current == scheme {
                return;
            }
            state.current = scheme;
            state.listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
        };

        // borrow released: listeners may read or (un)subscribe
        for listener in listeners {
            listener(scheme);
        }
    }

    /// Registers a change listener
    pub fn subscribe(&self, listener: impl Fn(ColorScheme) + 'static) -> SubscriptionId {
        let mut state = self.inner.borrow_mut();
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;
        state.listeners.push((id, Rc::new(listener)));
        id
    }

    /// Removes a listener; returns false if it was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.inner.borrow_mut();
        let before = state.listeners.len();
        state.listeners.retain(|(lid, _)| *lid != id);
        state.listeners.len() != before
    }

    /// Number of registered listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}
