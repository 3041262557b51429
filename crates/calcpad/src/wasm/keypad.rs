//! Keypad layout and keyboard wiring
//!
//! Layout (reading order, `RESET` and `=` span two columns):
//! ```text
//! [ 7 ] [ 8 ] [ 9 ] [DEL]
//! [ 4 ] [ 5 ] [ 6 ] [ + ]
//! [ 1 ] [ 2 ] [ 3 ] [ - ]
//! [ . ] [ 0 ] [ / ] [ x ]
//! [  RESET  ] [    =    ]
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::core::Operation;
use crate::key::Key;
use crate::keymap::map_physical_key;

use super::dom::{DomElement, ListenerId, MockDom};

/// Visual weight of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonVariant {
    /// Command keys (DEL, RESET)
    #[default]
    Primary,
    /// Digits and operators
    Secondary,
    /// The `=` key
    Accent,
}

impl ButtonVariant {
    /// CSS class for this variant
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
        }
    }
}

impl fmt::Display for ButtonVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonDef {
    /// Text on the button
    pub label: &'static str,
    /// Key emitted when pressed
    pub key: Key,
    /// Visual weight
    pub variant: ButtonVariant,
    /// Spans two grid columns
    pub wide: bool,
}

impl ButtonDef {
    const fn new(label: &'static str, key: Key, variant: ButtonVariant, wide: bool) -> Self {
        Self {
            label,
            key,
            variant,
            wide,
        }
    }

    const fn digit(label: &'static str, d: u8) -> Self {
        Self::new(label, Key::Digit(d), ButtonVariant::Secondary, false)
    }

    const fn operator(label: &'static str, op: Operation) -> Self {
        Self::new(label, Key::Operator(op), ButtonVariant::Secondary, false)
    }

    /// DOM element ID
    #[must_use]
    pub fn id(&self) -> String {
        let suffix = match self.key {
            Key::Digit(d) => return format!("btn-{d}"),
            Key::Operator(Operation::Add) => "plus",
            Key::Operator(Operation::Subtract) => "minus",
            Key::Operator(Operation::Multiply) => "times",
            Key::Operator(Operation::Divide) => "divide",
            Key::Decimal => "decimal",
            Key::Delete => "del",
            Key::Reset => "reset",
            Key::Equals => "equals",
        };
        format!("btn-{suffix}")
    }

    /// Number of grid columns occupied
    #[must_use]
    pub const fn span(&self) -> usize {
        if self.wide {
            2
        } else {
            1
        }
    }

    /// Builds the `<button>` element
    #[must_use]
    pub fn to_element(&self) -> DomElement {
        let mut element = DomElement::new("button")
            .with_id(&self.id())
            .with_class("key-button")
            .with_class(self.variant.as_str())
            .with_attr("type", "button")
            .with_attr("data-key", &self.key.token())
            .with_text(self.label);
        if self.wide {
            element.add_class("wide");
        }
        element
    }
}

/// Keypad columns
pub const KEYPAD_COLUMNS: usize = 4;

/// All buttons in reading order
pub static KEYPAD_BUTTONS: [ButtonDef; 18] = [
    ButtonDef::digit("7", 7),
    ButtonDef::digit("8", 8),
    ButtonDef::digit("9", 9),
    ButtonDef::new("DEL", Key::Delete, ButtonVariant::Primary, false),
    ButtonDef::digit("4", 4),
    ButtonDef::digit("5", 5),
    ButtonDef::digit("6", 6),
    ButtonDef::operator("+", Operation::Add),
    ButtonDef::digit("1", 1),
    ButtonDef::digit("2", 2),
    ButtonDef::digit("3", 3),
    ButtonDef::operator("-", Operation::Subtract),
    ButtonDef::new(".", Key::Decimal, ButtonVariant::Secondary, false),
    ButtonDef::digit("0", 0),
    ButtonDef::operator("/", Operation::Divide),
    ButtonDef::operator("x", Operation::Multiply),
    ButtonDef::new("RESET", Key::Reset, ButtonVariant::Primary, true),
    ButtonDef::new("=", Key::Equals, ButtonVariant::Accent, true),
];

/// Groups [`KEYPAD_BUTTONS`] into grid rows by column span
#[must_use]
pub fn keypad_rows() -> Vec<Vec<&'static ButtonDef>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut used = 0;
    for button in KEYPAD_BUTTONS.iter() {
        if used + button.span() > KEYPAD_COLUMNS {
            rows.push(std::mem::take(&mut row));
            used = 0;
        }
        used += button.span();
        row.push(button);
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

/// Finds a button by element ID
#[must_use]
pub fn find_button_by_id(id: &str) -> Option<&'static ButtonDef> {
    KEYPAD_BUTTONS.iter().find(|b| b.id() == id)
}

/// Keypad input source: button clicks plus a scoped window keydown listener.
///
/// Pressed keys are queued until the owner drains them with
/// [`Keypad::take_pressed`].
#[derive(Debug, Default)]
pub struct Keypad {
    pressed: Rc<RefCell<Vec<Key>>>,
    listener: Option<ListenerId>,
}

impl Keypad {
    /// Creates an inactive keypad
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the keydown listener is registered
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    /// Registers the keydown listener; a second call is a no-op
    pub fn activate(&mut self, dom: &mut MockDom) {
        if self.listener.is_some() {
            return;
        }
        let queue = Rc::clone(&self.pressed);
        let id = dom.add_keydown_listener(move |event| {
            if let Some(key) = map_physical_key(&event.key) {
                event.prevent_default();
                queue.borrow_mut().push(key);
            }
        });
        debug!(?id, "keypad keydown listener registered");
        self.listener = Some(id);
    }

    /// Removes the listener registered by [`Keypad::activate`]
    pub fn deactivate(&mut self, dom: &mut MockDom) {
        if let Some(id) = self.listener.take() {
            dom.remove_keydown_listener(id);
            debug!(?id, "keypad keydown listener removed");
        }
    }

    /// Handles a click on a button element; returns the queued key
    pub fn handle_click(&self, element_id: &str) -> Option<Key> {
        let key = find_button_by_id(element_id)?.key;
        self.pressed.borrow_mut().push(key);
        Some(key)
    }

    /// Drains queued key presses in order
    pub fn take_pressed(&self) -> Vec<Key> {
        std::mem::take(&mut *self.pressed.borrow_mut())
    }
}
